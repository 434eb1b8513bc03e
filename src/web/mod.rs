mod error;
mod form;
mod handlers;
mod page;

use anyhow::Result;
use axum::routing::get;
use axum::Router;
use std::sync::Arc;

use crate::store::LedgerStore;
use page::Pages;

/// Shared by every request. The store is the only mutable state and lives
/// on disk; nothing is cached between requests.
#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) store: Arc<dyn LedgerStore>,
    pub(crate) pages: Arc<Pages>,
}

impl AppState {
    pub(crate) fn new(store: Arc<dyn LedgerStore>) -> Result<Self> {
        Ok(Self {
            store,
            pages: Arc::new(Pages::new()?),
        })
    }
}

pub(crate) fn app() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::index).post(handlers::add_expense))
        .route("/delete/:id", get(handlers::delete_expense))
}
