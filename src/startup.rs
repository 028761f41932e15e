use axum::{
    Router,
    routing::{get, post},
};
use tower_http::services::ServeDir;

use crate::backend::BackendClient;
use crate::configuration::get_configuration;
use crate::routes::api::create_short_url;
use crate::routes::pages::{clear_links, create_page, create_post, delete_link, index_page};
use crate::routes::redirect::redirect;
use crate::services::LinkService;
use crate::store::LinkStore;

#[derive(Clone, Debug)]
pub struct AppState {
    pub link_service: LinkService,
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_page))
        .route("/create", get(create_page).post(create_post))
        .route("/links/{code}/delete", post(delete_link))
        .route("/links/clear", post(clear_links))
        .route("/s/{code}", get(redirect))
        .route("/api/short-urls", post(create_short_url))
        .nest_service("/assets", ServeDir::new("public"))
        .with_state(state)
}

pub async fn run() -> anyhow::Result<()> {
    let cfg = get_configuration()?;

    let store = LinkStore::new(cfg.store.path.clone());
    let backend = BackendClient::new(cfg.backend.base_url.clone());
    let link_service = LinkService::new(store, backend);
    let app_state = AppState { link_service };

    let address = format!("{}:{}", cfg.application.host, cfg.application.port);
    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!("Listening on {}", address);
    axum::serve(listener, app(app_state)).await?;
    Ok(())
}
