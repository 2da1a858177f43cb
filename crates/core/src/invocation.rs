//! Turning a caller request plus configuration into an upstream payload.

use crate::config::{PayloadVariant, UpstreamConfig};
use crate::error::RelayError;
use crate::types::responses::{
    AssistantInvocation, InputMessage, ModelInvocation, UpstreamPayload,
};
use serde_json::Value;

/// Only assistant ids with this prefix are honored.
pub const ASSISTANT_ID_PREFIX: &str = "asst_";
/// Temperature used when the caller does not send a number.
pub const DEFAULT_TEMPERATURE: f64 = 0.4;

/// Validated caller request.
#[derive(Debug, Clone, PartialEq)]
pub struct AssistRequest {
    pub text: String,
    pub asst: Option<String>,
    pub temperature: Option<f64>,
}

impl AssistRequest {
    /// Parse a raw request body. An empty body reads as `{}`.
    ///
    /// Malformed JSON and a `null` document are `BadRequest` (opaque to the
    /// caller); a missing, non-string or empty `text` is `MissingText`.
    pub fn parse(body: &[u8]) -> Result<Self, RelayError> {
        let value: Value = if body.is_empty() {
            Value::Object(Default::default())
        } else {
            serde_json::from_slice(body).map_err(|e| RelayError::BadRequest(e.to_string()))?
        };

        if value.is_null() {
            return Err(RelayError::BadRequest("request body is null".into()));
        }

        let text = value
            .get("text")
            .and_then(|t| t.as_str())
            .filter(|t| !t.is_empty())
            .ok_or(RelayError::MissingText)?
            .to_string();

        let asst = value
            .get("asst")
            .and_then(|a| a.as_str())
            .map(|a| a.to_string());

        let temperature = value.get("temperature").and_then(|t| t.as_f64());

        Ok(Self {
            text,
            asst,
            temperature,
        })
    }
}

/// Pick the assistant id: a well-formed caller id wins over a well-formed
/// configured one; otherwise none.
pub fn resolve_assistant_id(requested: Option<&str>, configured: Option<&str>) -> Option<String> {
    [requested, configured]
        .into_iter()
        .flatten()
        .find(|id| id.starts_with(ASSISTANT_ID_PREFIX))
        .map(|id| id.to_string())
}

/// Settings resolved for one upstream call.
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    pub assistant_id: Option<String>,
    pub model: String,
    pub temperature: f64,
}

impl Invocation {
    pub fn resolve(request: &AssistRequest, upstream: &UpstreamConfig) -> Self {
        Self {
            assistant_id: resolve_assistant_id(request.asst.as_deref(), upstream.assistant_id()),
            model: upstream.model().to_string(),
            temperature: request.temperature.unwrap_or(DEFAULT_TEMPERATURE),
        }
    }

    /// Build the upstream body for a single user turn carrying `text`.
    pub fn into_payload(self, text: &str, variant: PayloadVariant) -> UpstreamPayload {
        let input = vec![InputMessage::user_text(text)];

        match (self.assistant_id, variant) {
            (None, _) => UpstreamPayload::Model(ModelInvocation {
                model: self.model,
                input,
                temperature: self.temperature,
            }),
            (Some(assistant_id), PayloadVariant::AlwaysIncludeModel) => {
                UpstreamPayload::Assistant(AssistantInvocation {
                    assistant_id,
                    model: Some(self.model),
                    input,
                    temperature: self.temperature,
                })
            }
            (Some(assistant_id), PayloadVariant::AssistantExcludesModel) => {
                UpstreamPayload::Assistant(AssistantInvocation {
                    assistant_id,
                    model: None,
                    input,
                    temperature: self.temperature,
                })
            }
        }
    }
}
