//! Health and language selector endpoints

use axum::Json;
use lingua_common::Language;
use lingua_common::language::AUTO;
use lingua_common::protocol::{HealthResponse, LanguagesResponse};

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

pub async fn languages() -> Json<LanguagesResponse> {
    let target: Vec<String> = Language::all().map(String::from).collect();
    let source = std::iter::once(AUTO.to_string())
        .chain(target.iter().cloned())
        .collect();
    Json(LanguagesResponse { source, target })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_languages_lists_auto_first() {
        let Json(languages) = languages().await;

        assert_eq!(languages.source.len(), 7);
        assert_eq!(languages.source[0], "auto");
        assert_eq!(languages.source[1..], languages.target[..]);
        assert_eq!(
            languages.target,
            ["English", "Hindi", "French", "Spanish", "German", "Telugu"]
        );
    }
}
