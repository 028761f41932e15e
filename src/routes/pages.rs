use std::collections::HashMap;

use askama::Template;
use axum::{
    Form,
    extract::{Path, Query, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use tracing::{error, instrument};
use url::Url;

use crate::errors::AppError;
use crate::models::short_url::ShortUrlRecord;
use crate::startup::AppState;

const CREATE_FAILED: &str = "Failed to create short URL. Please try again.";
const INVALID_URL: &str = "Please enter a valid URL (must start with http:// or https://)";

#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate {
    links: Vec<ShortUrlRecord>,
    toast: Option<&'static str>,
}

#[derive(Template)]
#[template(path = "create.html")]
struct CreateTemplate {
    url: String,
    error: Option<&'static str>,
}

#[derive(serde::Deserialize)]
pub struct CreateUrlForm {
    pub url: String,
}

#[instrument(name = "Web: List short URLs", skip(state, params))]
pub async fn index_page(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    let flag = |name: &str| params.get(name).map(String::as_str) == Some("true");
    let toast = if flag("created") {
        Some("Short URL created successfully!")
    } else if flag("deleted") {
        Some("URL deleted successfully")
    } else if flag("cleared") {
        Some("All URLs cleared")
    } else {
        None
    };

    let links = state.link_service.list();
    Html(IndexTemplate { links, toast }.render().unwrap())
}

pub async fn create_page() -> impl IntoResponse {
    let template = CreateTemplate {
        url: "".into(),
        error: None,
    };
    Html(template.render().unwrap())
}

#[instrument(name = "Web: Create short URL", skip(state, form))]
pub async fn create_post(
    State(state): State<AppState>,
    Form(form): Form<CreateUrlForm>,
) -> Response {
    // Cosmetic well-formedness check, same as the form's own validation; the
    // backend does its own and the JSON proxy forwards anything.
    if Url::parse(&form.url).is_err() {
        let template = CreateTemplate {
            url: form.url,
            error: Some(INVALID_URL),
        };
        return Html(template.render().unwrap()).into_response();
    }

    match state.link_service.create(&form.url).await {
        Ok(_) => Redirect::to("/?created=true").into_response(),
        Err(err) => {
            error!("Failed to shorten URL: {:?}", err);
            let template = CreateTemplate {
                url: form.url,
                error: Some(CREATE_FAILED),
            };
            Html(template.render().unwrap()).into_response()
        }
    }
}

#[instrument(name = "Web: Delete short URL", skip(state))]
pub async fn delete_link(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.link_service.delete(&code)?;
    Ok(Redirect::to("/?deleted=true"))
}

#[instrument(name = "Web: Clear short URLs", skip(state))]
pub async fn clear_links(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    state.link_service.clear()?;
    Ok(Redirect::to("/?cleared=true"))
}
