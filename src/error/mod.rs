use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::metadata::DecodeError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Fetching {0} is forbidden by robots.txt")]
    RobotsDenied(String),

    #[error("Could not fetch {url}: {message}")]
    Transport { url: String, message: String },

    #[error("Could not fetch {url}: upstream returned {status}: {body}")]
    Upstream {
        url: String,
        status: u16,
        body: String,
    },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    #[error("Internal server error")]
    Internal,
}

impl AppError {
    /// Upstream HTTP status, when the failure came from a non-2xx response.
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            AppError::Upstream { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let upstream_status = self.upstream_status();
        let (status, message): (StatusCode, String) = match self {
            AppError::InvalidUrl(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            AppError::RobotsDenied(_) => (StatusCode::FORBIDDEN, "forbidden by robots.txt".into()),
            AppError::Transport { .. } | AppError::Upstream { .. } => {
                tracing::warn!(error = %self, "Upstream fetch failed");
                (StatusCode::BAD_GATEWAY, self.to_string())
            }
            AppError::Parse(_) => (StatusCode::UNPROCESSABLE_ENTITY, self.to_string()),
            AppError::Decode(e) => {
                tracing::error!("Card schema error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Card schema error".into(),
                )
            }
            AppError::Internal => {
                tracing::error!("Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".into(),
                )
            }
        };

        let body = match upstream_status {
            Some(code) => json!({ "error": message, "upstream_status": code }),
            None => json!({ "error": message }),
        };
        (status, Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::response::IntoResponse;
    use http_body_util::BodyExt;

    async fn body_json(body: Body) -> serde_json::Value {
        let bytes = body.collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn invalid_url_returns_400() {
        let response = AppError::InvalidUrl("not-a-url".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn robots_denied_returns_403_with_fixed_message() {
        let response = AppError::RobotsDenied("https://a/b".into()).into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        let json = body_json(response.into_body()).await;
        assert_eq!(json["error"], "forbidden by robots.txt");
    }

    #[tokio::test]
    async fn transport_error_returns_502() {
        let response = AppError::Transport {
            url: "https://a".into(),
            message: "timed out".into(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let json = body_json(response.into_body()).await;
        assert!(json.get("upstream_status").is_none());
    }

    #[tokio::test]
    async fn upstream_error_carries_status_and_body() {
        let response = AppError::Upstream {
            url: "https://a".into(),
            status: 404,
            body: "no such page".into(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let json = body_json(response.into_body()).await;
        assert_eq!(json["upstream_status"], 404);
        assert!(json["error"].as_str().unwrap().contains("no such page"));
    }

    #[tokio::test]
    async fn parse_error_returns_422() {
        let response = AppError::Parse("bad selector".into()).into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn decode_error_returns_500() {
        let err: AppError = DecodeError::EmptyKey {
            path: "Article.url".into(),
        }
        .into();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn internal_error_returns_500() {
        let response = AppError::Internal.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_json(response.into_body()).await;
        assert_eq!(json["error"], "Internal server error");
    }

    #[test]
    fn upstream_status_only_for_upstream_errors() {
        let upstream = AppError::Upstream {
            url: "u".into(),
            status: 503,
            body: String::new(),
        };
        assert_eq!(upstream.upstream_status(), Some(503));
        assert_eq!(AppError::Internal.upstream_status(), None);
    }
}
