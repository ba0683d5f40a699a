//! HTTP service rendering comparisons as HTML pages

use crate::compare::{CancelToken, Comparator, ComparisonResult};
use crate::error::{Result, SheetDiffError};
use crate::output::HtmlFormatter;
use crate::source::{fetch_pair, DocumentSource};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Shared state for every request
pub struct AppState {
    pub source: Arc<dyn DocumentSource>,
    pub comparator: Comparator,
}

/// Health check response.
#[derive(Serialize, Deserialize)]
pub struct Health {
    /// Server status ("ok" when healthy).
    pub status: String,
    /// Server version from Cargo.toml.
    pub version: String,
}

/// Health check endpoint handler.
pub async fn health() -> Json<Health> {
    Json(Health {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Create the application router.
///
/// This is separated from `serve()` to allow testing.
pub fn create_router(source: Arc<dyn DocumentSource>, comparator: Comparator) -> Router {
    let state = Arc::new(AppState { source, comparator });
    Router::new()
        .route("/health", get(health))
        .route("/compare/:old/:new", get(compare_handler))
        .with_state(state)
}

pub async fn serve(
    bind: &str,
    source: Arc<dyn DocumentSource>,
    comparator: Comparator,
) -> Result<()> {
    let app = create_router(source, comparator);
    let listener = tokio::net::TcpListener::bind(bind).await?;
    log::info!("sheetdiff listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}

async fn compare_handler(
    State(state): State<Arc<AppState>>,
    Path((old, new)): Path<(String, String)>,
) -> Response {
    log::info!("Comparing '{}' and '{}'", old, new);

    match run_comparison(state, old.clone(), new.clone()).await {
        Ok(result) => Html(HtmlFormatter::format_page(&result, chrono::Utc::now())).into_response(),
        Err(e) => {
            log::error!("Comparison of '{}' and '{}' failed: {}", old, new, e);
            (status_for(&e), e.to_string()).into_response()
        }
    }
}

/// Cancels the token when the request future is dropped (client went away)
struct CancelOnDrop(CancelToken);

impl Drop for CancelOnDrop {
    fn drop(&mut self) {
        self.0.cancel();
    }
}

async fn run_comparison(
    state: Arc<AppState>,
    old: String,
    new: String,
) -> Result<ComparisonResult> {
    let cancel = CancelToken::new();
    let _guard = CancelOnDrop(cancel.clone());

    let task = tokio::task::spawn_blocking(move || {
        let (old_doc, new_doc) = fetch_pair(state.source.as_ref(), &old, &new)?;
        state.comparator.compare(&old_doc, &new_doc, &cancel)
    });

    task.await
        .map_err(|e| SheetDiffError::Generic(anyhow::Error::new(e)))?
}

fn status_for(err: &SheetDiffError) -> StatusCode {
    match err {
        SheetDiffError::Validation { .. } => StatusCode::BAD_REQUEST,
        SheetDiffError::Fetch { .. } => StatusCode::BAD_GATEWAY,
        // nginx's "client closed request"
        SheetDiffError::Cancelled => {
            StatusCode::from_u16(499).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
        }
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
