use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use tracing::info;

use crate::{
    AppState,
    error::AppResult,
    extract::{Form, Query},
    models::{AddForm, FindQuery, IdQuery, RateForm},
    templates,
};

pub async fn index(State(state): State<Arc<AppState>>) -> AppResult<Html<String>> {
    let movies = state.store.list_ranked().await?;
    Ok(Html(templates::index_page(&movies)))
}

pub async fn edit_form(
    State(state): State<Arc<AppState>>,
    Query(q): Query<IdQuery>,
) -> AppResult<Html<String>> {
    let movie = state.store.require(q.id).await?;
    let rating = movie.rating.map(|r| r.to_string()).unwrap_or_default();
    let review = movie.review.clone().unwrap_or_default();
    Ok(Html(templates::edit_page(&movie, &rating, &review, None)))
}

pub async fn edit_submit(
    State(state): State<Arc<AppState>>,
    Query(q): Query<IdQuery>,
    Form(form): Form<RateForm>,
) -> AppResult<Response> {
    let movie = state.store.require(q.id).await?;

    let (rating, review) = match form.validate() {
        Ok(valid) => valid,
        Err(message) => {
            let body = templates::edit_page(&movie, &form.rating, &form.review, Some(message));
            return Ok((StatusCode::UNPROCESSABLE_ENTITY, Html(body)).into_response());
        },
    };

    state.store.rate(movie.id, rating, &review).await?;
    info!(id = movie.id, title = %movie.title, rating, "rating saved");
    Ok(Redirect::to("/").into_response())
}

pub async fn delete(
    State(state): State<Arc<AppState>>,
    Query(q): Query<IdQuery>,
) -> AppResult<Redirect> {
    state.store.delete(q.id).await?;
    info!(id = q.id, "movie removed");
    Ok(Redirect::to("/"))
}

pub async fn add_form() -> Html<String> {
    Html(templates::add_page("", None))
}

pub async fn add_submit(
    State(state): State<Arc<AppState>>,
    Form(form): Form<AddForm>,
) -> AppResult<Response> {
    let Some(title) = form.title() else {
        let body = templates::add_page(&form.title, Some("movie title is required"));
        return Ok((StatusCode::UNPROCESSABLE_ENTITY, Html(body)).into_response());
    };

    let results = state.tmdb.search_movies(title).await?;
    Ok(Html(templates::select_page(title, &results)).into_response())
}

pub async fn find(
    State(state): State<Arc<AppState>>,
    Query(q): Query<FindQuery>,
) -> AppResult<Redirect> {
    let new_movie = state.tmdb.lookup(q.id).await?;
    let movie = state.store.insert(new_movie).await?;
    info!(id = movie.id, tmdb_id = q.id, title = %movie.title, "movie created from TMDB");

    Ok(Redirect::to(&format!("/edit?id={}", movie.id)))
}
