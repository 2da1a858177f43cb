use crate::AppState;
use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use bytes::Bytes;
use relay_core::error::RelayError;
use relay_core::invocation::{AssistRequest, Invocation};
use relay_core::sanitize::sanitize_citations;
use relay_core::types::responses::UpstreamOutput;
use relay_provider::openai::ResponsesClient;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct AssistReply {
    pub text: String,
}

/// Relay caller text to the Responses API and return the cleaned answer.
pub async fn assistant(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<AssistReply>, RelayError> {
    relay(&state, &body)
        .await
        .map(Json)
        .inspect_err(log_failure)
}

/// CORS preflight; the headers come from the router layer.
pub async fn preflight() -> StatusCode {
    StatusCode::NO_CONTENT
}

pub async fn method_not_allowed() -> impl IntoResponse {
    (StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed")
}

async fn relay(state: &AppState, body: &[u8]) -> Result<AssistReply, RelayError> {
    let request = AssistRequest::parse(body)?;

    let config = state.config.load_full();
    // Must fail before any network activity
    let api_key = config
        .upstream
        .api_key()
        .ok_or(RelayError::MissingApiKey)?;

    let invocation = Invocation::resolve(&request, &config.upstream);
    tracing::debug!(
        model = %invocation.model,
        assistant_id = invocation.assistant_id.as_deref().unwrap_or("-"),
        temperature = invocation.temperature,
        variant = ?config.upstream.payload_variant,
        "Resolved upstream invocation"
    );
    let payload = invocation.into_payload(&request.text, config.upstream.payload_variant);

    let client = ResponsesClient::from_config(&config)?;
    let data = client.create(api_key, &payload).await?;

    let text = sanitize_citations(&UpstreamOutput::decode(&data).into_text());
    Ok(AssistReply { text })
}

fn log_failure(err: &RelayError) {
    match err {
        RelayError::Upstream { status, body } => {
            tracing::warn!(
                status = *status,
                body = %String::from_utf8_lossy(body),
                "Upstream returned an error"
            );
        }
        RelayError::MissingApiKey => {
            tracing::error!("Upstream API key is not configured");
        }
        e if e.is_opaque() => {
            tracing::error!(error = %e, "Request processing failed");
        }
        e => {
            tracing::debug!(error = %e, "Rejected request");
        }
    }
}
