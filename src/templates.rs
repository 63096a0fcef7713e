use axum::http::StatusCode;
use maud::{DOCTYPE, Markup, html};

use crate::{entities::movie, tmdb::SearchMovie};

const TAILWIND_CDN: &str = "https://cdn.tailwindcss.com";

const INPUT_CLASS: &str = "mt-2 w-full rounded-md border border-gray-300 px-3 py-2 focus:border-blue-500 focus:outline-none focus:ring-1 focus:ring-blue-500";
const BUTTON_CLASS: &str =
    "w-full rounded-md bg-blue-600 px-4 py-2 font-semibold text-white hover:bg-blue-700";

/// `movies` is in ascending rating order; the page shows ranking 1 first.
pub fn index_page(movies: &[movie::Model]) -> String {
    page(
        "My Top Movies",
        html! {
            div class="max-w-4xl mx-auto px-6 py-12" {
                div class="flex items-start justify-between gap-6" {
                    div {
                        h1 class="text-3xl font-bold text-gray-900" { "My Top " (movies.len()) " Movies" }
                        p class="mt-2 text-gray-600" { "These are my all-time favourite movies." }
                    }
                    a class="rounded-md bg-blue-600 px-4 py-2 font-semibold text-white hover:bg-blue-700" href="/add" { "Add Movie" }
                }

                @if movies.is_empty() {
                    div class="mt-10 bg-white shadow rounded-lg p-8" {
                        p class="text-gray-600" { "No movies yet." }
                    }
                } @else {
                    div class="mt-10 space-y-4" {
                        @for movie in movies.iter().rev() {
                            (movie_card(movie))
                        }
                    }
                }
            }
        },
    )
}

fn movie_card(movie: &movie::Model) -> Markup {
    html! {
        div class="bg-white shadow rounded-lg p-6 flex gap-6" id=(format!("movie-{}", movie.id)) {
            @if !movie.img_url.is_empty() {
                img class="w-32 rounded" src=(movie.img_url) alt=(format!("{} poster", movie.title));
            }
            div class="flex-1" {
                div class="flex items-start justify-between gap-4" {
                    h2 class="text-xl font-semibold text-gray-900" {
                        @if let Some(ranking) = movie.ranking {
                            span class="mr-2 text-gray-400" { "#" (ranking) }
                        }
                        (movie.title)
                        span class="ml-2 font-normal text-gray-500" { "(" (movie.year) ")" }
                    }
                    @if let Some(rating) = movie.rating {
                        span class="text-lg font-semibold text-yellow-600" { (format!("{rating:.1}")) }
                    }
                }
                @if let Some(review) = &movie.review {
                    p class="mt-2 italic text-gray-700" { "\u{201c}" (review) "\u{201d}" }
                }
                p class="mt-2 text-sm text-gray-600" { (movie.description) }
                div class="mt-4 flex gap-4 text-sm" {
                    a class="text-blue-600 hover:text-blue-800" href=(format!("/edit?id={}", movie.id)) { "Update" }
                    a class="text-red-600 hover:text-red-800" href=(format!("/delete?id={}", movie.id)) { "Delete" }
                }
            }
        }
    }
}

pub fn edit_page(movie: &movie::Model, rating: &str, review: &str, error: Option<&str>) -> String {
    page(
        "Edit Movie",
        html! {
            (form_card(html! {
                h1 class="text-3xl font-bold text-gray-900" { (movie.title) }
                p class="mt-2 text-gray-600" { "Edit movie rating" }
                (error_notice(error))

                form class="mt-8 space-y-6" method="post" action=(format!("/edit?id={}", movie.id)) {
                    div {
                        label class="block text-sm font-medium text-gray-700" for="rating" { "Your Rating Out of 10 e.g. 7.5" }
                        input class=(INPUT_CLASS) name="rating" id="rating" inputmode="decimal" value=(rating) required;
                    }
                    div {
                        label class="block text-sm font-medium text-gray-700" for="review" { "Your Review" }
                        input class=(INPUT_CLASS) name="review" id="review" maxlength="250" value=(review) required;
                    }
                    button class=(BUTTON_CLASS) type="submit" { "Done" }
                }
            }))
        },
    )
}

pub fn add_page(title: &str, error: Option<&str>) -> String {
    page(
        "Add Movie",
        html! {
            (form_card(html! {
                h1 class="text-3xl font-bold text-gray-900" { "Add a Movie" }
                (error_notice(error))

                form class="mt-8 space-y-6" method="post" action="/add" {
                    div {
                        label class="block text-sm font-medium text-gray-700" for="title" { "Movie Title" }
                        input class=(INPUT_CLASS) name="title" id="title" value=(title) required;
                    }
                    button class=(BUTTON_CLASS) type="submit" { "Add Movie" }
                }
            }))
        },
    )
}

pub fn select_page(query: &str, results: &[SearchMovie]) -> String {
    page(
        "Select Movie",
        html! {
            div class="max-w-2xl mx-auto px-6 py-12" {
                div class="flex items-start justify-between gap-6" {
                    div {
                        h1 class="text-3xl font-bold text-gray-900" { "Select Movie" }
                        p class="mt-2 text-gray-600" { "Results for \u{201c}" (query) "\u{201d}" }
                    }
                    a class="text-sm text-blue-600 hover:text-blue-800" href="/add" { "New search" }
                }

                @if results.is_empty() {
                    div class="mt-10 bg-white shadow rounded-lg p-8" {
                        p class="text-gray-600" { "No matches on TMDB." }
                    }
                } @else {
                    ul class="mt-10 space-y-3" {
                        @for result in results {
                            li class="bg-white shadow rounded-lg p-4" {
                                a class="text-lg font-semibold text-blue-600 hover:text-blue-800" href=(format!("/find?id={}", result.id)) {
                                    (result.title)
                                    @if let Some(date) = result.release_date.as_deref().filter(|d| !d.is_empty()) {
                                        span class="ml-2 font-normal text-gray-500" { "- " (date) }
                                    }
                                }
                                @if let Some(overview) = &result.overview {
                                    p class="mt-1 text-sm text-gray-600" { (overview) }
                                }
                            }
                        }
                    }
                }
            }
        },
    )
}

pub fn error_page(status: StatusCode, message: &str) -> String {
    page(
        "Error",
        html! {
            div class="min-h-screen bg-gray-50 flex items-center justify-center" {
                div class="max-w-xl w-full px-6" {
                    div class="bg-white shadow rounded-lg p-8" {
                        h1 class="text-2xl font-bold text-gray-900" {
                            (status.canonical_reason().unwrap_or("Error"))
                        }
                        p class="mt-4 text-gray-700" { (message) }
                        a class="mt-6 inline-block text-blue-600 hover:text-blue-800" href="/" { "Back" }
                    }
                }
            }
        },
    )
}

fn form_card(inner: Markup) -> Markup {
    html! {
        div class="max-w-2xl mx-auto px-6 py-12" {
            div class="bg-white shadow rounded-lg p-8" { (inner) }
        }
    }
}

fn error_notice(error: Option<&str>) -> Markup {
    html! {
        @if let Some(error) = error {
            p class="mt-4 rounded-md bg-red-50 px-3 py-2 text-sm text-red-700" role="alert" { (error) }
        }
    }
}

fn page(title: &str, body: Markup) -> String {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
                script src=(TAILWIND_CDN) {}
            }
            body class="bg-gray-50" { (body) }
        }
    }
    .into_string()
}
