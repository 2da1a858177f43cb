//! Wire types for the OpenAI Responses API (`/v1/responses`).

use serde::Serialize;
use serde_json::Value;

// ─── Request ───────────────────────────────────────────────────────────────

/// Body sent upstream. Which variant is built depends on whether an
/// assistant id was resolved and on the configured payload variant.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum UpstreamPayload {
    Assistant(AssistantInvocation),
    Model(ModelInvocation),
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AssistantInvocation {
    pub assistant_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    pub input: Vec<InputMessage>,
    pub temperature: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ModelInvocation {
    pub model: String,
    pub input: Vec<InputMessage>,
    pub temperature: f64,
}

impl UpstreamPayload {
    pub fn assistant_id(&self) -> Option<&str> {
        match self {
            Self::Assistant(a) => Some(&a.assistant_id),
            Self::Model(_) => None,
        }
    }

    pub fn model(&self) -> Option<&str> {
        match self {
            Self::Assistant(a) => a.model.as_deref(),
            Self::Model(m) => Some(&m.model),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct InputMessage {
    pub role: Role,
    pub content: Vec<InputContent>,
}

impl InputMessage {
    /// A single user turn carrying `text` verbatim.
    pub fn user_text(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: vec![InputContent::InputText { text: text.into() }],
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputContent {
    InputText { text: String },
}

// ─── Response ──────────────────────────────────────────────────────────────

/// Text carried by an upstream response, by shape.
#[derive(Debug, Clone, PartialEq)]
pub enum UpstreamOutput {
    /// Top-level `output_text` string.
    Text(String),
    /// `text` strings found under `output[].content[]`, in order.
    Structured(Vec<String>),
    /// Neither shape present.
    Empty,
}

impl UpstreamOutput {
    /// Classify a decoded upstream body.
    ///
    /// A string `output_text` wins over `output`. Parts without a `content`
    /// array and items without a string `text` are skipped.
    pub fn decode(data: &Value) -> Self {
        if let Some(text) = data.get("output_text").and_then(|t| t.as_str()) {
            return Self::Text(text.to_string());
        }

        let Some(parts) = data.get("output").and_then(|o| o.as_array()) else {
            return Self::Empty;
        };

        let fragments = parts
            .iter()
            .filter_map(|part| part.get("content").and_then(|c| c.as_array()))
            .flatten()
            .filter_map(|item| item.get("text").and_then(|t| t.as_str()))
            .map(str::to_string)
            .collect();

        Self::Structured(fragments)
    }

    /// Flatten into a single string. Structured fragments are joined with
    /// `\n`, with no separator while nothing has been accumulated yet.
    pub fn into_text(self) -> String {
        match self {
            Self::Text(text) => text,
            Self::Structured(fragments) => {
                fragments.into_iter().fold(String::new(), |mut out, fragment| {
                    if !out.is_empty() {
                        out.push('\n');
                    }
                    out.push_str(&fragment);
                    out
                })
            }
            Self::Empty => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_user_turn_serialization() {
        let msg = InputMessage::user_text("hola");
        assert_eq!(
            serde_json::to_value(&msg).unwrap(),
            json!({"role": "user", "content": [{"type": "input_text", "text": "hola"}]})
        );
    }

    #[test]
    fn test_assistant_payload_without_model() {
        let payload = UpstreamPayload::Assistant(AssistantInvocation {
            assistant_id: "asst_1".into(),
            model: None,
            input: vec![InputMessage::user_text("q")],
            temperature: 0.4,
        });
        let value = serde_json::to_value(&payload).unwrap();
        assert!(value.get("model").is_none());
        assert_eq!(value["assistant_id"], "asst_1");
        assert_eq!(payload.assistant_id(), Some("asst_1"));
        assert_eq!(payload.model(), None);
    }

    #[test]
    fn test_decode_output_text() {
        let data = json!({"output_text": "hola", "output": [{"content": [{"text": "x"}]}]});
        assert_eq!(UpstreamOutput::decode(&data), UpstreamOutput::Text("hola".into()));
    }

    #[test]
    fn test_decode_non_string_output_text_falls_back() {
        let data = json!({"output_text": 5, "output": [{"content": [{"text": "x"}]}]});
        assert_eq!(
            UpstreamOutput::decode(&data),
            UpstreamOutput::Structured(vec!["x".into()])
        );
    }

    #[test]
    fn test_decode_structured_output() {
        let data = json!({
            "output": [
                {"type": "file_search_call"},
                {"type": "message", "content": [
                    {"type": "output_text", "text": "uno"},
                    {"type": "refusal", "refusal": "no"},
                    {"type": "output_text", "text": "dos"}
                ]},
                {"content": "not an array"},
                {"content": [{"text": "tres"}, {"text": 7}]}
            ]
        });
        let output = UpstreamOutput::decode(&data);
        assert_eq!(
            output,
            UpstreamOutput::Structured(vec!["uno".into(), "dos".into(), "tres".into()])
        );
        assert_eq!(output.into_text(), "uno\ndos\ntres");
    }

    #[test]
    fn test_decode_empty_shapes() {
        assert_eq!(UpstreamOutput::decode(&json!({})), UpstreamOutput::Empty);
        assert_eq!(UpstreamOutput::decode(&json!([])), UpstreamOutput::Empty);
        assert_eq!(UpstreamOutput::decode(&json!({"output": {}})), UpstreamOutput::Empty);
        assert_eq!(UpstreamOutput::Empty.into_text(), "");
    }

    #[test]
    fn test_join_skips_separator_while_empty() {
        let output = UpstreamOutput::Structured(vec!["".into(), "a".into(), "".into(), "b".into()]);
        assert_eq!(output.into_text(), "a\n\nb");
    }
}
