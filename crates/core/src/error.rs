use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use bytes::Bytes;
use serde_json::json;

/// Message returned when the request body carries no usable `text`.
pub const MISSING_TEXT_MESSAGE: &str = "Falta 'text' en el body.";
/// Message returned when no upstream API key is configured.
pub const MISSING_API_KEY_MESSAGE: &str = "OPENAI_API_KEY no configurada.";
/// Message returned for every failure whose detail stays in the operator log.
pub const GENERIC_ERROR_MESSAGE: &str = "Error procesando la solicitud.";

/// Unified error type for the relay pipeline.
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error("missing 'text' in request body")]
    MissingText,

    #[error("upstream API key is not configured")]
    MissingApiKey,

    #[error("upstream error (status {status}): {}", String::from_utf8_lossy(.body))]
    Upstream {
        status: u16,
        /// Raw upstream body, `{}` when it was not JSON.
        body: Bytes,
    },

    #[error("network error: {0}")]
    Network(String),

    #[error("malformed request body: {0}")]
    BadRequest(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl RelayError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingText => StatusCode::BAD_REQUEST,
            Self::Upstream { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            Self::MissingApiKey | Self::Network(_) | Self::BadRequest(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Upstream failure relaying `raw` untouched when it is a JSON document,
    /// `{}` otherwise.
    pub fn upstream(status: u16, raw: Bytes) -> Self {
        let body = if serde_json::from_slice::<serde::de::IgnoredAny>(&raw).is_ok() {
            raw
        } else {
            Bytes::from_static(b"{}")
        };
        Self::Upstream { status, body }
    }

    /// True for failures the caller only ever sees as the generic message.
    pub fn is_opaque(&self) -> bool {
        matches!(
            self,
            Self::Network(_) | Self::BadRequest(_) | Self::Internal(_)
        )
    }

    fn client_message(&self) -> &'static str {
        match self {
            Self::MissingText => MISSING_TEXT_MESSAGE,
            Self::MissingApiKey => MISSING_API_KEY_MESSAGE,
            _ => GENERIC_ERROR_MESSAGE,
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Upstream failures are relayed as-is
        if let Self::Upstream { body, .. } = &self {
            return (status, [("content-type", "application/json")], body.clone())
                .into_response();
        }

        let body = json!({ "error": self.client_message() });

        (
            status,
            [("content-type", "application/json")],
            body.to_string(),
        )
            .into_response()
    }
}

impl From<reqwest::Error> for RelayError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Network(format!("request timed out: {e}"))
        } else if e.is_connect() {
            Self::Network(format!("connection failed: {e}"))
        } else {
            Self::Network(e.to_string())
        }
    }
}

impl From<serde_json::Error> for RelayError {
    fn from(e: serde_json::Error) -> Self {
        Self::Internal(format!("JSON error: {e}"))
    }
}
