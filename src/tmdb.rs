use std::{num::NonZeroU32, sync::Arc};

use governor::{
    Quota, RateLimiter,
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
};
use serde::Deserialize;

use crate::{
    error::{AppError, AppResult},
    models::NewMovie,
};

pub const IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";

pub struct TmdbClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    image_base_url: String,
    limiter: Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>,
}

impl TmdbClient {
    pub fn new(
        client: reqwest::Client,
        api_key: String,
        base_url: String,
        image_base_url: String,
        rps: u32,
    ) -> Self {
        if api_key.trim().is_empty() {
            tracing::warn!("Using mock TMDB data - no TMDB_API_KEY provided");
        }

        let quota = Quota::per_second(NonZeroU32::new(rps).unwrap_or(NonZeroU32::MIN));
        let limiter = Arc::new(RateLimiter::direct(quota));
        Self { client, api_key, base_url, image_base_url, limiter }
    }

    fn is_mock(&self) -> bool {
        self.api_key.trim().is_empty()
    }

    pub async fn search_movies(&self, title: &str) -> AppResult<Vec<SearchMovie>> {
        if self.is_mock() {
            return Ok(vec![mock_search_result()]);
        }

        self.limiter.until_ready().await;

        let url = format!("{}/search/movie", self.base_url.trim_end_matches('/'));
        let resp: SearchResponse = self
            .client
            .get(url)
            .query(&[("api_key", self.api_key.as_str()), ("query", title)])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        tracing::debug!(title, results = resp.results.len(), "TMDB search");
        Ok(resp.results)
    }

    pub async fn movie_details(&self, tmdb_id: i64) -> AppResult<MovieDetails> {
        if self.is_mock() {
            return Ok(mock_details());
        }

        self.limiter.until_ready().await;

        let url = format!("{}/movie/{}", self.base_url.trim_end_matches('/'), tmdb_id);
        let details: MovieDetails = self
            .client
            .get(url)
            .query(&[("api_key", self.api_key.as_str())])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        tracing::debug!(tmdb_id, title = %details.title, "TMDB details");
        Ok(details)
    }

    /// Fetches a movie by TMDB id and maps it onto a new record.
    pub async fn lookup(&self, tmdb_id: i64) -> AppResult<NewMovie> {
        self.movie_details(tmdb_id).await?.into_new_movie(&self.image_base_url)
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    results: Vec<SearchMovie>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct SearchMovie {
    pub id: i64,
    #[serde(default)]
    pub title: String,
    pub release_date: Option<String>,
    pub overview: Option<String>,
    pub poster_path: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct MovieDetails {
    pub title: String,
    pub release_date: Option<String>,
    pub overview: Option<String>,
    pub poster_path: Option<String>,
}

impl MovieDetails {
    pub fn into_new_movie(self, image_base_url: &str) -> AppResult<NewMovie> {
        let release_date = self.release_date.unwrap_or_default();
        let year = release_year(&release_date).ok_or_else(|| {
            AppError::Upstream(format!(
                "no release year for \"{}\" (release_date {release_date:?})",
                self.title
            ))
        })?;

        Ok(NewMovie {
            title: self.title,
            year,
            description: self.overview.unwrap_or_default(),
            img_url: self
                .poster_path
                .map(|path| poster_url(image_base_url, &path))
                .unwrap_or_default(),
        })
    }
}

/// Year component of a TMDB `YYYY-MM-DD` date.
pub fn release_year(release_date: &str) -> Option<i32> {
    release_date.split('-').next()?.trim().parse().ok()
}

/// TMDB poster paths carry their own leading `/`.
pub fn poster_url(image_base_url: &str, poster_path: &str) -> String {
    format!("{image_base_url}{poster_path}")
}

const MOCK_ID: i64 = 1817;
const MOCK_TITLE: &str = "Phone Booth";
const MOCK_RELEASE_DATE: &str = "2002-11-14";
const MOCK_OVERVIEW: &str = "Publicist Stuart Shepard finds himself trapped in a phone booth, \
     pinned down by an extortionist's sniper rifle. Unable to leave or receive outside help, \
     Stuart's negotiation with the caller leads to a jaw-dropping climax.";
const MOCK_POSTER: &str = "/tjrX2oWRCM3Tvarz38zlZM7Uc10.jpg";

fn mock_search_result() -> SearchMovie {
    SearchMovie {
        id: MOCK_ID,
        title: MOCK_TITLE.to_string(),
        release_date: Some(MOCK_RELEASE_DATE.to_string()),
        overview: Some(MOCK_OVERVIEW.to_string()),
        poster_path: Some(MOCK_POSTER.to_string()),
    }
}

fn mock_details() -> MovieDetails {
    MovieDetails {
        title: MOCK_TITLE.to_string(),
        release_date: Some(MOCK_RELEASE_DATE.to_string()),
        overview: Some(MOCK_OVERVIEW.to_string()),
        poster_path: Some(MOCK_POSTER.to_string()),
    }
}
