use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::registry::DEFAULT_TEMPLATE_ID;

/// One respondent's answers to one section repetition, keyed by question id.
pub type AnswerInstance = BTreeMap<String, String>;

/// Answer blob persisted with a form.
///
/// The flat answers sit at the top level of the JSON object and mirror the
/// first instance of every section; `instances` is nested beside them so a
/// single write updates both.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormData {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub instances: BTreeMap<String, Vec<AnswerInstance>>,
    #[serde(flatten)]
    pub answers: AnswerInstance,
}

impl FormData {
    /// Instances for a section; falls back to the flat answers as the only
    /// instance when no explicit list exists.
    pub fn section_instances(&self, section_id: &str) -> &[AnswerInstance] {
        match self.instances.get(section_id) {
            Some(list) if !list.is_empty() => list,
            _ => std::slice::from_ref(&self.answers),
        }
    }

    pub fn has_explicit_instances(&self, section_id: &str) -> bool {
        self.instances
            .get(section_id)
            .is_some_and(|list| !list.is_empty())
    }
}

/// The unit that is saved, exported and published.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormSnapshot {
    pub title: String,
    #[serde(default = "default_template_id")]
    pub template_id: String,
    #[serde(default)]
    pub form_data: FormData,
}

impl FormSnapshot {
    pub fn new(title: impl Into<String>, template_id: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            template_id: template_id.into(),
            form_data: FormData::default(),
        }
    }
}

/// Template assumed for data saved before forms recorded one.
pub fn default_template_id() -> String {
    DEFAULT_TEMPLATE_ID.to_string()
}

/// Treats empty and whitespace-only values as unanswered.
pub fn answer_text<'a>(instance: &'a AnswerInstance, question_id: &str) -> Option<&'a str> {
    instance
        .get(question_id)
        .map(String::as_str)
        .filter(|value| !value.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn instances_nest_inside_answer_blob() {
        let data: FormData = serde_json::from_value(json!({
            "q1": "drafting",
            "instances": {
                "tasks-performed": [{ "q1": "drafting" }, { "q1": "coding" }]
            }
        }))
        .expect("form data");
        assert_eq!(data.answers.get("q1").map(String::as_str), Some("drafting"));
        assert!(!data.answers.contains_key("instances"));
        assert_eq!(data.section_instances("tasks-performed").len(), 2);

        let value = serde_json::to_value(&data).expect("encode");
        assert_eq!(value["instances"]["tasks-performed"][1]["q1"], "coding");
        assert_eq!(value["q1"], "drafting");
    }

    #[test]
    fn empty_instance_list_falls_back_to_flat_answers() {
        let data: FormData = serde_json::from_value(json!({
            "q1": "drafting",
            "instances": { "tasks-performed": [] }
        }))
        .expect("form data");
        let instances = data.section_instances("tasks-performed");
        assert_eq!(instances.len(), 1);
        assert_eq!(instances[0].get("q1").map(String::as_str), Some("drafting"));
        assert!(!data.has_explicit_instances("tasks-performed"));
    }

    #[test]
    fn whitespace_answers_count_as_empty() {
        let instance = AnswerInstance::from([("q1".into(), "   ".into())]);
        assert_eq!(answer_text(&instance, "q1"), None);
        assert_eq!(answer_text(&instance, "q2"), None);
    }

    #[test]
    fn snapshot_without_template_uses_default() {
        let snapshot: FormSnapshot =
            serde_json::from_value(json!({ "title": "Old", "form_data": { "q1": "a" } }))
                .expect("decode");
        assert_eq!(snapshot.template_id, DEFAULT_TEMPLATE_ID);
    }
}
