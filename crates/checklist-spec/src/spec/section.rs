use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::spec::question::QuestionSpec;

/// Titled group of questions that can be answered several times.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SectionSpec {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub summary: String,
    pub questions: Vec<QuestionSpec>,
}

const SUMMARY_PREVIEW_CHARS: usize = 195;

impl SectionSpec {
    pub fn question(&self, question_id: &str) -> Option<&QuestionSpec> {
        self.questions
            .iter()
            .find(|question| question.id == question_id)
    }

    /// Collapsed summary text, cut at a fixed character count with a trailing ellipsis.
    pub fn summary_preview(&self) -> String {
        if self.summary.chars().count() <= SUMMARY_PREVIEW_CHARS {
            return self.summary.clone();
        }
        let mut preview: String = self.summary.chars().take(SUMMARY_PREVIEW_CHARS).collect();
        preview.push_str("...");
        preview
    }
}
