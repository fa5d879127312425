//! Preference value objects

use crate::chat::response::Clarification;
use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

fn is_false(value: &bool) -> bool {
    !*value
}

/// The user's answer to a clarify outcome.
///
/// Serialized as the `/memory/alias` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClarificationChoice {
    /// Chosen option id, or free text when nothing matched
    pub choice: String,
    /// The ambiguous phrase this choice resolves
    pub phrase: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Remember the mapping as the durable default for `phrase`
    #[serde(default, skip_serializing_if = "is_false")]
    pub make_default: bool,
    /// Overwrite an existing default instead of reporting a conflict
    #[serde(default, skip_serializing_if = "is_false")]
    pub force: bool,
}

impl ClarificationChoice {
    pub fn new(choice: impl Into<String>, phrase: impl Into<String>) -> Self {
        Self {
            choice: choice.into(),
            phrase: phrase.into(),
            category: None,
            make_default: false,
            force: false,
        }
    }

    /// Choose one of the offered options by id (or display name).
    ///
    /// When the clarification offered no options at all, `value` is taken as
    /// free text instead.
    pub fn for_option(clarification: &Clarification, value: &str) -> Result<Self, DomainError> {
        if clarification.is_open_ended() {
            return Ok(Self::free_text(clarification, value));
        }

        let option = clarification
            .option(value)
            .ok_or_else(|| DomainError::UnknownOption {
                option: value.to_string(),
                phrase: clarification.phrase.clone(),
            })?;
        let choice = option.choice_value().unwrap_or(value);

        Ok(Self::new(choice, &clarification.phrase)
            .with_optional_category(clarification.category.clone()))
    }

    /// Answer with caller-supplied text, whatever the options were.
    pub fn free_text(clarification: &Clarification, text: impl Into<String>) -> Self {
        Self::new(text, &clarification.phrase)
            .with_optional_category(clarification.category.clone())
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    fn with_optional_category(mut self, category: Option<String>) -> Self {
        self.category = category;
        self
    }

    /// Ask the backend to keep this as the default for the phrase.
    pub fn remembered(mut self) -> Self {
        self.make_default = true;
        self
    }

    /// Overwrite any existing default for the phrase.
    pub fn forced(mut self) -> Self {
        self.force = true;
        self
    }
}

/// A standing `kind → target` default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultBinding {
    pub kind: String,
    pub target: String,
}

impl DefaultBinding {
    pub fn new(kind: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            target: target.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::response::ClarifyOption;
    use serde_json::json;

    fn lights() -> Clarification {
        Clarification {
            kind: "ambiguous_device".to_string(),
            phrase: "the lights".to_string(),
            category: Some("devices".to_string()),
            options: vec![
                ClarifyOption {
                    id: Some("living_room".to_string()),
                    name: Some("Living room".to_string()),
                    source: None,
                },
                ClarifyOption {
                    id: Some("bedroom".to_string()),
                    ..Default::default()
                },
            ],
        }
    }

    #[test]
    fn test_minimal_wire_shape() {
        let choice = ClarificationChoice::new("firefox", "browser");
        assert_eq!(
            serde_json::to_value(&choice).unwrap(),
            json!({"choice": "firefox", "phrase": "browser"})
        );
    }

    #[test]
    fn test_full_wire_shape() {
        let choice = ClarificationChoice::new("firefox", "browser")
            .with_category("apps")
            .remembered()
            .forced();
        assert_eq!(
            serde_json::to_value(&choice).unwrap(),
            json!({
                "choice": "firefox",
                "phrase": "browser",
                "category": "apps",
                "make_default": true,
                "force": true,
            })
        );
    }

    #[test]
    fn test_for_option_by_id_and_by_name() {
        let by_id = ClarificationChoice::for_option(&lights(), "bedroom").unwrap();
        assert_eq!(by_id.choice, "bedroom");
        assert_eq!(by_id.phrase, "the lights");
        assert_eq!(by_id.category.as_deref(), Some("devices"));

        let by_name = ClarificationChoice::for_option(&lights(), "Living room").unwrap();
        assert_eq!(by_name.choice, "living_room");
    }

    #[test]
    fn test_for_option_unknown_id() {
        let err = ClarificationChoice::for_option(&lights(), "attic").unwrap_err();
        assert_eq!(
            err,
            DomainError::UnknownOption {
                option: "attic".to_string(),
                phrase: "the lights".to_string(),
            }
        );
    }

    #[test]
    fn test_open_ended_accepts_free_text() {
        let clarification = Clarification {
            options: Vec::new(),
            ..lights()
        };
        let choice = ClarificationChoice::for_option(&clarification, "kitchen strip").unwrap();
        assert_eq!(choice.choice, "kitchen strip");
        assert!(!choice.make_default);
    }

    #[test]
    fn test_default_binding_wire_shape() {
        assert_eq!(
            serde_json::to_value(DefaultBinding::new("browser", "firefox")).unwrap(),
            json!({"kind": "browser", "target": "firefox"})
        );
    }
}
