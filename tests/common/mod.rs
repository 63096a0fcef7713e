use std::{collections::HashMap, sync::Arc};

use axum::{
    Json, Router,
    body::Body,
    extract::{Path, Query},
    http::{Request, StatusCode, header},
    response::{IntoResponse, Response},
    routing,
};
use sea_orm::ConnectOptions;
use serde_json::json;
use tower::ServiceExt;

use topmovies::{AppState, db, store::MovieStore, tmdb::TmdbClient};

pub const API_KEY: &str = "test-key";
pub const IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";

/// App router plus a handle on its store, backed by in-memory SQLite and a
/// fake TMDB listening on an ephemeral port.
pub async fn build_test_app() -> (Router, MovieStore) {
    let mut opts = ConnectOptions::new("sqlite::memory:");
    opts.max_connections(1).min_connections(1).sqlx_logging(false);
    let store = MovieStore::new(db::connect_and_migrate(opts).await.unwrap());

    let tmdb = TmdbClient::new(
        reqwest::Client::new(),
        API_KEY.to_string(),
        spawn_fake_tmdb().await,
        IMAGE_BASE_URL.to_string(),
        100,
    );

    let state = Arc::new(AppState { store: store.clone(), tmdb: Arc::new(tmdb) });
    (topmovies::router(state), store)
}

async fn spawn_fake_tmdb() -> String {
    let app = Router::new()
        .route("/3/search/movie", routing::get(fake_search))
        .route("/3/movie/{id}", routing::get(fake_details));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{addr}/3")
}

fn authorized(params: &HashMap<String, String>) -> bool {
    params.get("api_key").map(String::as_str) == Some(API_KEY)
}

async fn fake_search(Query(params): Query<HashMap<String, String>>) -> Response {
    if !authorized(&params) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    let query = params.get("query").cloned().unwrap_or_default().to_lowercase();

    let results: Vec<_> = catalog()
        .into_iter()
        .filter(|(_, movie)| {
            movie["title"].as_str().unwrap_or_default().to_lowercase().contains(&query)
        })
        .map(|(id, mut movie)| {
            movie["id"] = json!(id);
            movie
        })
        .collect();

    Json(json!({ "page": 1, "results": results })).into_response()
}

async fn fake_details(
    Path(id): Path<i64>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if !authorized(&params) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    match catalog().into_iter().find(|(movie_id, _)| *movie_id == id) {
        Some((_, movie)) => Json(movie).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({ "status_code": 34, "status_message": "not found" })),
        )
            .into_response(),
    }
}

fn catalog() -> Vec<(i64, serde_json::Value)> {
    vec![
        (
            1817,
            json!({
                "title": "Phone Booth",
                "release_date": "2002-11-14",
                "overview": "Publicist Stuart Shepard finds himself trapped in a phone booth.",
                "poster_path": "/tjrX2oWRCM3Tvarz38zlZM7Uc10.jpg"
            }),
        ),
        (
            1538,
            json!({
                "title": "Collateral",
                "release_date": "2004-08-05",
                "overview": "Cab driver Max picks up a man who offers him $600 to drive him around.",
                "poster_path": "/iOqsTyJhE0Q6JLvxMB3bf8xlj8a.jpg"
            }),
        ),
        (
            99,
            json!({
                "title": "Untitled Project",
                "release_date": "",
                "overview": "",
                "poster_path": null
            }),
        ),
    ]
}

pub async fn get(app: &Router, uri: &str) -> Response {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    app.clone().oneshot(request).await.unwrap()
}

pub async fn post_form(app: &Router, uri: &str, body: &str) -> Response {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

pub async fn body_string(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub fn location(response: &Response) -> &str {
    response.headers()[header::LOCATION].to_str().unwrap()
}
