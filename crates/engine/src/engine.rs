use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::http::HttpServer;
use crate::{page, schema};
use axum::{
    Router,
    extract::{Query, State},
    response::Html,
    routing::get,
};
use serde::Deserialize;
use std::sync::Arc;
use tinysite_store::Store;

pub struct Engine {
    config: EngineConfig,
    store: Store,
}

struct AppState {
    config: EngineConfig,
    store: Store,
}

#[derive(Debug, Deserialize)]
struct PageParams {
    page: Option<String>,
}

impl Engine {
    /// Connect the store and make sure the page table exists. A failure
    /// here is the caller's to handle; nothing aborts the process.
    pub async fn new(config: EngineConfig) -> Result<Self, EngineError> {
        let store = Store::connect(&config.database_path).await?;
        schema::initialize(&store, &config.page_table).await?;
        Ok(Self { config, store })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn router(&self) -> Router {
        let state = Arc::new(AppState {
            config: self.config.clone(),
            store: self.store.clone(),
        });
        Router::new().route("/", get(serve_page)).with_state(state)
    }

    pub async fn run(&self) -> Result<(), EngineError> {
        let server = HttpServer::new(self.config.addr(), self.router());
        server.start().await?;
        Ok(())
    }
}

async fn serve_page(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PageParams>,
) -> Result<Html<String>, EngineError> {
    // An absent parameter means the first page; junk input casts to id 0,
    // which no row carries, and lands on the not-found page.
    let id = match params.page.as_deref() {
        Some(raw) => raw.parse().unwrap_or(0),
        None => 1,
    };

    let body = page::render_page(&state.store, &state.config, id).await?;
    Ok(Html(body))
}
