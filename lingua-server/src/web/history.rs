//! Translation history endpoint

use axum::Json;
use axum::extract::State;
use lingua_common::protocol::{HistoryEntry, HistoryResponse};

use crate::db::HistoryRecord;
use crate::web::{ApiError, AppState, Authenticated, Localize};

/// `GET /api/history`
pub async fn history(
    State(state): State<AppState>,
    auth: Authenticated,
) -> Result<Json<HistoryResponse>, ApiError> {
    let records = state.session.history(&auth.user).await.localize(auth.locale)?;

    Ok(Json(HistoryResponse {
        entries: records.into_iter().map(HistoryEntry::from).collect(),
    }))
}

impl From<HistoryRecord> for HistoryEntry {
    fn from(record: HistoryRecord) -> Self {
        Self {
            input_text: record.input_text,
            source_lang: record.source_lang,
            translated_text: record.translated_text,
            target_lang: record.target_lang,
            timestamp: record.timestamp,
        }
    }
}
