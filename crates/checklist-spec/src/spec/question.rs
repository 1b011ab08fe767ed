use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Input widget used for a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    Text,
    Textarea,
    Radio,
    Checkbox,
}

impl QuestionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionType::Text => "text",
            QuestionType::Textarea => "textarea",
            QuestionType::Radio => "radio",
            QuestionType::Checkbox => "checkbox",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct QuestionSpec {
    pub id: String,
    pub label: String,
    #[serde(rename = "type")]
    pub kind: QuestionType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tooltip: Option<String>,
    #[serde(default)]
    pub required: bool,
}

impl QuestionSpec {
    /// Tooltip text, ignoring blank entries.
    pub fn tooltip(&self) -> Option<&str> {
        self.tooltip
            .as_deref()
            .map(str::trim)
            .filter(|tooltip| !tooltip.is_empty())
    }
}
