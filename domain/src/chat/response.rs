//! Inbound half of a chat turn.
//!
//! The backend answers `/chat` with one loosely-shaped JSON object
//! ([`ChatResponse`]). It is classified exactly once, at the protocol
//! boundary, into a [`ChatReply`] whose [`ChatOutcome`] callers match on
//! exhaustively:
//!
//! ```text
//! ChatResponse ──classify──▶ ChatReply { outcome, model, note }
//!                                 │
//!                                 ├─ Answer       text only
//!                                 ├─ ToolInvoked  tool_call (+ tool_result)
//!                                 ├─ Clarify      clarify
//!                                 └─ Empty        none of the above
//! ```

use crate::core::error::DomainError;
use crate::tool::entities::ToolCall;
use serde::{Deserialize, Serialize};

/// Raw `/chat` reply exactly as the backend sends it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_call: Option<ToolCall>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_result: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clarify: Option<Clarification>,
}

/// A pending decision: the backend could not map `phrase` to one target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clarification {
    /// Category of ambiguity (e.g. "ambiguous_device", "app_alias")
    pub kind: String,
    /// The ambiguous span of the user's input
    pub phrase: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Candidates in the order the backend ranked them. May be empty.
    #[serde(default)]
    pub options: Vec<ClarifyOption>,
}

impl Clarification {
    /// Find an option by id, falling back to its display name.
    pub fn option(&self, value: &str) -> Option<&ClarifyOption> {
        self.options
            .iter()
            .find(|o| o.id.as_deref() == Some(value))
            .or_else(|| self.options.iter().find(|o| o.name.as_deref() == Some(value)))
    }

    /// Nothing matched; any answer must come from the user as free text.
    pub fn is_open_ended(&self) -> bool {
        self.options.is_empty()
    }
}

/// One candidate of a [`Clarification`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClarifyOption {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Where the candidate came from (e.g. "desktop", "flatpak", "memory")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl ClarifyOption {
    /// The value to submit when this option is chosen: id, else name.
    pub fn choice_value(&self) -> Option<&str> {
        self.id.as_deref().or(self.name.as_deref())
    }

    /// Human-facing label: name, else id.
    pub fn label(&self) -> &str {
        self.name
            .as_deref()
            .or(self.id.as_deref())
            .unwrap_or("(unnamed)")
    }
}

/// The primary outcome of a chat turn.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ChatOutcome {
    /// Direct conversational answer.
    Answer { text: String },
    /// The backend already ran a tool on the user's behalf.
    #[serde(rename = "tool_call")]
    ToolInvoked {
        call: ToolCall,
        result: Option<serde_json::Value>,
        text: Option<String>,
    },
    /// The backend needs the user to pick a target.
    Clarify {
        clarification: Clarification,
        text: Option<String>,
    },
    /// Nothing to act on. Not an error.
    Empty,
}

impl ChatOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatOutcome::Answer { .. } => "answer",
            ChatOutcome::ToolInvoked { .. } => "tool_call",
            ChatOutcome::Clarify { .. } => "clarify",
            ChatOutcome::Empty => "empty",
        }
    }
}

/// A classified chat reply.
///
/// # Examples
///
/// ```
/// use aios_domain::chat::response::{ChatOutcome, ChatReply, ChatResponse};
///
/// let raw: ChatResponse = serde_json::from_value(serde_json::json!({
///     "text": "It is 14:02.",
///     "model": "llama3.1:8b",
/// })).unwrap();
///
/// let reply = ChatReply::classify(raw).unwrap();
/// assert_eq!(reply.model.as_deref(), Some("llama3.1:8b"));
/// assert!(matches!(reply.outcome, ChatOutcome::Answer { .. }));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatReply {
    #[serde(flatten)]
    pub outcome: ChatOutcome,
    /// Model label reported by the backend, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Advisory text that may accompany any outcome
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl ChatReply {
    /// Classify a raw reply.
    ///
    /// Fails when the reply is self-contradictory: a tool call and a
    /// clarification at once, a tool result without the call that produced
    /// it, or a tool call without a name.
    pub fn classify(response: ChatResponse) -> Result<Self, DomainError> {
        let ChatResponse {
            text,
            model,
            tool_call,
            tool_result,
            note,
            clarify,
        } = response;

        let text = text.filter(|t| !t.is_empty());

        let outcome = match (tool_call, tool_result, clarify) {
            (Some(_), _, Some(_)) | (None, Some(_), Some(_)) => {
                return Err(DomainError::ContractViolation(
                    "reply carries both a tool call and a clarification".to_string(),
                ));
            }
            (None, Some(_), None) => {
                return Err(DomainError::ContractViolation(
                    "reply carries a tool_result without a tool_call".to_string(),
                ));
            }
            (Some(call), result, None) => {
                call.validate().map_err(|_| {
                    DomainError::ContractViolation("tool_call has an empty name".to_string())
                })?;
                ChatOutcome::ToolInvoked { call, result, text }
            }
            (None, None, Some(clarification)) => ChatOutcome::Clarify {
                clarification,
                text,
            },
            (None, None, None) => match text {
                Some(text) => ChatOutcome::Answer { text },
                None => ChatOutcome::Empty,
            },
        };

        Ok(Self {
            outcome,
            model,
            note,
        })
    }

    pub fn clarification(&self) -> Option<&Clarification> {
        match &self.outcome {
            ChatOutcome::Clarify { clarification, .. } => Some(clarification),
            _ => None,
        }
    }

    pub fn tool_call(&self) -> Option<&ToolCall> {
        match &self.outcome {
            ChatOutcome::ToolInvoked { call, .. } => Some(call),
            _ => None,
        }
    }

    pub fn needs_clarification(&self) -> bool {
        self.clarification().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn classify(value: serde_json::Value) -> Result<ChatReply, DomainError> {
        ChatReply::classify(serde_json::from_value(value).unwrap())
    }

    #[test]
    fn test_text_only_is_answer() {
        let reply = classify(json!({"text": "Hello!", "note": "cached"})).unwrap();
        assert_eq!(
            reply.outcome,
            ChatOutcome::Answer {
                text: "Hello!".to_string()
            }
        );
        assert_eq!(reply.note.as_deref(), Some("cached"));
    }

    #[test]
    fn test_tool_call_with_result() {
        let reply = classify(json!({
            "text": "Opening Firefox.",
            "tool_call": {"name": "open_app", "arguments": {"app": "firefox"}},
            "tool_result": {"ok": true, "launched": "firefox"},
        }))
        .unwrap();

        match reply.outcome {
            ChatOutcome::ToolInvoked { call, result, text } => {
                assert_eq!(call.name, "open_app");
                assert_eq!(call.get_string("app"), Some("firefox"));
                assert_eq!(result, Some(json!({"ok": true, "launched": "firefox"})));
                assert_eq!(text.as_deref(), Some("Opening Firefox."));
            }
            other => panic!("expected ToolInvoked, got {:?}", other),
        }
    }

    #[test]
    fn test_tool_call_without_result() {
        let reply = classify(json!({"tool_call": {"name": "datetime"}})).unwrap();
        assert_eq!(reply.tool_call().map(|c| c.name.as_str()), Some("datetime"));
    }

    #[test]
    fn test_clarify() {
        let reply = classify(json!({
            "clarify": {
                "kind": "ambiguous_device",
                "phrase": "the lights",
                "options": [{"id": "living_room"}, {"id": "bedroom", "source": "memory"}],
            }
        }))
        .unwrap();

        let clarification = reply.clarification().unwrap();
        assert_eq!(clarification.kind, "ambiguous_device");
        assert_eq!(clarification.phrase, "the lights");
        assert_eq!(clarification.category, None);
        assert_eq!(clarification.options.len(), 2);
        assert_eq!(
            clarification.option("bedroom").and_then(|o| o.source.as_deref()),
            Some("memory")
        );
        assert!(!clarification.is_open_ended());
    }

    #[test]
    fn test_clarify_with_no_options() {
        let reply = classify(json!({
            "clarify": {"kind": "app_alias", "phrase": "my editor", "options": []}
        }))
        .unwrap();
        assert!(reply.clarification().unwrap().is_open_ended());
    }

    #[test]
    fn test_nothing_is_empty_not_error() {
        assert_eq!(classify(json!({})).unwrap().outcome, ChatOutcome::Empty);
        assert_eq!(classify(json!({"text": ""})).unwrap().outcome, ChatOutcome::Empty);
        let noted = classify(json!({"note": "muted"})).unwrap();
        assert_eq!(noted.outcome, ChatOutcome::Empty);
        assert_eq!(noted.note.as_deref(), Some("muted"));
    }

    #[test]
    fn test_tool_call_and_clarify_is_violation() {
        let err = classify(json!({
            "tool_call": {"name": "lights.off"},
            "clarify": {"kind": "ambiguous_device", "phrase": "the lights"},
        }))
        .unwrap_err();
        assert!(err.is_contract_violation());
    }

    #[test]
    fn test_tool_result_and_clarify_is_violation() {
        let err = classify(json!({
            "tool_result": {"ok": true},
            "clarify": {"kind": "ambiguous_device", "phrase": "the lights"},
        }))
        .unwrap_err();
        assert!(err.is_contract_violation());
    }

    #[test]
    fn test_orphan_tool_result_is_violation() {
        assert!(classify(json!({"tool_result": {"ok": true}})).is_err());
    }

    #[test]
    fn test_nameless_tool_call_is_violation() {
        assert!(classify(json!({"tool_call": {"name": ""}})).is_err());
    }

    #[test]
    fn test_option_lookup_falls_back_to_name() {
        let clarification = Clarification {
            kind: "app_alias".to_string(),
            phrase: "browser".to_string(),
            category: Some("apps".to_string()),
            options: vec![ClarifyOption {
                id: None,
                name: Some("Firefox".to_string()),
                source: None,
            }],
        };
        let option = clarification.option("Firefox").unwrap();
        assert_eq!(option.choice_value(), Some("Firefox"));
        assert_eq!(option.label(), "Firefox");
    }

    #[test]
    fn test_outcome_labels() {
        assert_eq!(ChatOutcome::Empty.as_str(), "empty");
        assert_eq!(
            ChatOutcome::Answer {
                text: String::new()
            }
            .as_str(),
            "answer"
        );
    }

    #[test]
    fn test_reply_serializes_with_outcome_tag() {
        let reply = classify(json!({
            "text": "Lights off.",
            "model": "llama3.1:8b",
            "tool_call": {"name": "lights.off", "arguments": {"room": "bedroom"}},
            "tool_result": {"ok": true}
        }))
        .unwrap();

        let value = serde_json::to_value(&reply).unwrap();
        assert_eq!(value["outcome"], "tool_call");
        assert_eq!(value["call"]["name"], "lights.off");
        assert_eq!(value["result"]["ok"], true);
        assert_eq!(value["model"], "llama3.1:8b");
        assert!(value.get("note").is_none());
    }
}
