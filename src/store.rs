use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    SqlErr, TransactionTrait, sea_query::Expr,
};
use tracing::debug;

use crate::{
    entities::movie,
    error::{AppError, AppResult},
    models::NewMovie,
};

#[derive(Clone)]
pub struct MovieStore {
    db: DatabaseConnection,
}

impl MovieStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    /// All movies in ascending rating order, with `ranking` refreshed.
    ///
    /// Unrated movies sort first and ties keep insertion order, so the best
    /// rated movie is last and ranked 1. Rankings that moved are written
    /// back in one transaction; calling this again without changes writes
    /// nothing.
    pub async fn list_ranked(&self) -> AppResult<Vec<movie::Model>> {
        let mut movies = movie::Entity::find()
            .order_by_asc(movie::Column::Rating)
            .order_by_asc(movie::Column::Id)
            .all(&self.db)
            .await?;

        let changed = assign_rankings(&mut movies);
        if !changed.is_empty() {
            let txn = self.db.begin().await?;
            for (id, ranking) in &changed {
                movie::Entity::update_many()
                    .col_expr(movie::Column::Ranking, Expr::value(*ranking))
                    .filter(movie::Column::Id.eq(*id))
                    .exec(&txn)
                    .await?;
            }
            txn.commit().await?;
        }

        debug!(total = movies.len(), updated = changed.len(), "rankings refreshed");
        Ok(movies)
    }

    pub async fn get(&self, id: i32) -> AppResult<Option<movie::Model>> {
        Ok(movie::Entity::find_by_id(id).one(&self.db).await?)
    }

    pub async fn require(&self, id: i32) -> AppResult<movie::Model> {
        self.get(id).await?.ok_or(AppError::NotFound { id })
    }

    pub async fn insert(&self, new: NewMovie) -> AppResult<movie::Model> {
        let title = new.title.clone();
        let model = movie::ActiveModel {
            id: Default::default(),
            title: Set(new.title),
            year: Set(new.year),
            description: Set(new.description),
            rating: Set(None),
            ranking: Set(None),
            review: Set(None),
            img_url: Set(new.img_url),
        };

        let created = model.insert(&self.db).await.map_err(|err| match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                AppError::Conflict(format!("\"{title}\" is already in your list"))
            },
            _ => AppError::from(err),
        })?;

        debug!(id = created.id, title = %created.title, "movie added");
        Ok(created)
    }

    /// Overwrites rating and review, leaving every other column untouched.
    pub async fn rate(&self, id: i32, rating: f64, review: &str) -> AppResult<movie::Model> {
        let mut active: movie::ActiveModel = self.require(id).await?.into();
        active.rating = Set(Some(rating));
        active.review = Set(Some(review.to_string()));

        let updated = active.update(&self.db).await?;
        debug!(id, rating, "movie rated");
        Ok(updated)
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let res = movie::Entity::delete_by_id(id).exec(&self.db).await?;
        if res.rows_affected == 0 {
            return Err(AppError::NotFound { id });
        }
        debug!(id, "movie deleted");
        Ok(())
    }

    pub async fn close(self) -> AppResult<()> {
        self.db.close().await?;
        Ok(())
    }
}

/// Sets `ranking = len - index` on movies already sorted by ascending
/// rating and returns the `(id, ranking)` pairs that differ from what was
/// stored.
fn assign_rankings(movies: &mut [movie::Model]) -> Vec<(i32, i32)> {
    let total = movies.len() as i32;
    let mut changed = Vec::new();
    for (index, movie) in movies.iter_mut().enumerate() {
        let ranking = total - index as i32;
        if movie.ranking != Some(ranking) {
            movie.ranking = Some(ranking);
            changed.push((movie.id, ranking));
        }
    }
    changed
}
