use serde::Deserialize;

/// Fields of a movie resolved from TMDB, before it has an id.
#[derive(Clone, Debug, PartialEq)]
pub struct NewMovie {
    pub title: String,
    pub year: i32,
    pub description: String,
    pub img_url: String,
}

#[derive(Debug, Deserialize)]
pub struct IdQuery {
    pub id: i32,
}

#[derive(Debug, Deserialize)]
pub struct FindQuery {
    pub id: i64,
}

#[derive(Debug, Default, Deserialize)]
pub struct RateForm {
    #[serde(default)]
    pub rating: String,
    #[serde(default)]
    pub review: String,
}

impl RateForm {
    /// Both fields are required; the rating's range is not enforced.
    pub fn validate(&self) -> Result<(f64, String), &'static str> {
        let rating = self.rating.trim();
        if rating.is_empty() {
            return Err("rating is required");
        }
        let rating: f64 = rating.parse().map_err(|_| "rating must be a number, e.g. 7.5")?;
        if !rating.is_finite() {
            return Err("rating must be a number, e.g. 7.5");
        }

        let review = self.review.trim();
        if review.is_empty() {
            return Err("review is required");
        }

        Ok((rating, review.to_string()))
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct AddForm {
    #[serde(default)]
    pub title: String,
}

impl AddForm {
    pub fn title(&self) -> Option<&str> {
        let title = self.title.trim();
        (!title.is_empty()).then_some(title)
    }
}
