use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::spec::question::QuestionSpec;
use crate::spec::section::SectionSpec;

/// Display group ordering a subset of the template sections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SectionGroup {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub section_ids: Vec<String>,
}

/// Shows `question` only while `controller` holds exactly `equals` in the same instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct VisibilityRule {
    pub question: String,
    pub controller: String,
    pub equals: String,
}

/// Top-level checklist template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Template {
    pub id: String,
    pub name: String,
    pub version: String,
    #[serde(default)]
    pub description: String,
    /// Noun used to label repeated instances, e.g. "AI Tool".
    pub instance_noun: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub add_instance_label: Option<String>,
    pub sections: Vec<SectionSpec>,
    pub section_groups: Vec<SectionGroup>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub visibility_rules: Vec<VisibilityRule>,
    /// Display labels that replace the positional number of a question.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub numbering_overrides: BTreeMap<String, String>,
}

impl Template {
    pub fn section(&self, section_id: &str) -> Option<&SectionSpec> {
        self.sections.iter().find(|section| section.id == section_id)
    }

    /// Sections reachable through the section groups, in display order.
    ///
    /// Stale ids in a group are skipped.
    pub fn grouped_sections(&self) -> impl Iterator<Item = (&SectionGroup, &SectionSpec)> {
        self.section_groups.iter().flat_map(move |group| {
            group
                .section_ids
                .iter()
                .filter_map(move |id| self.section(id).map(|section| (group, section)))
        })
    }

    pub fn rule_for(&self, question_id: &str) -> Option<&VisibilityRule> {
        self.visibility_rules
            .iter()
            .find(|rule| rule.question == question_id)
    }

    /// Label shown before a question: the override if one exists, otherwise `index + 1`.
    pub fn question_number(&self, index: usize, question: &QuestionSpec) -> String {
        self.numbering_overrides
            .get(&question.id)
            .cloned()
            .unwrap_or_else(|| (index + 1).to_string())
    }

    pub fn instance_label(&self, index: usize) -> String {
        format!("{} {}", self.instance_noun, index + 1)
    }

    pub fn add_instance_label(&self) -> String {
        self.add_instance_label
            .clone()
            .unwrap_or_else(|| format!("+ Add Another {}", self.instance_noun))
    }
}
