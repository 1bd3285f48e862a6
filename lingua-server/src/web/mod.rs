//! HTTP API
//!
//! JSON endpoints under `/api`, plus multipart uploads for speech and
//! documents. Translation and history endpoints require HTTP Basic
//! credentials on every request.

mod account;
mod extract;
mod history;
mod meta;
mod response;
mod translate;

use std::future::Future;
use std::io;
use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use lingua_common::MAX_UPLOAD_BYTES;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::session::SessionController;

pub use extract::{Authenticated, Locale};
pub use response::{ApiError, Localize};

/// Multipart framing allowance on top of the upload itself
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub session: Arc<SessionController>,
}

impl AppState {
    pub fn new(session: SessionController) -> Self {
        Self {
            session: Arc::new(session),
        }
    }
}

/// Build the API router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(meta::health))
        .route("/api/languages", get(meta::languages))
        .route("/api/register", post(account::register))
        .route("/api/login", post(account::login))
        .route("/api/translate", post(translate::translate_text))
        .route("/api/translate/speech", post(translate::translate_speech))
        .route("/api/translate/document", post(translate::translate_document))
        .route("/api/history", get(history::history))
        .layer(DefaultBodyLimit::max(
            MAX_UPLOAD_BYTES + MULTIPART_OVERHEAD_BYTES,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve the API on `listener` until `shutdown` resolves
pub async fn serve<F>(listener: TcpListener, state: AppState, shutdown: F) -> io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await
}
