//! Resolved export tree.
//!
//! Every renderer consumes an [`Outline`], so section selection, instance
//! expansion, numbering and visibility are decided exactly once.

use serde::{Deserialize, Serialize};

use crate::snapshot::{AnswerInstance, FormSnapshot, answer_text};
use crate::spec::{section::SectionSpec, template::Template};
use crate::visibility::is_visible;

pub const NOT_ANSWERED: &str = "Not answered";
pub const NO_ANSWER: &str = "No answer";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ExportMode {
    /// Numbered question/answer pairs.
    #[default]
    Detailed,
    /// One paragraph of answers per instance.
    Summary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportOptions {
    pub mode: ExportMode,
    pub include_empty: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            mode: ExportMode::Detailed,
            include_empty: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Outline {
    pub title: String,
    pub mode: ExportMode,
    pub groups: Vec<OutlineGroup>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutlineGroup {
    /// Empty for untitled groups, which get no heading.
    pub title: String,
    pub sections: Vec<OutlineSection>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutlineSection {
    pub id: String,
    pub title: String,
    pub instances: Vec<OutlineInstance>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutlineInstance {
    /// Present only when the section has more than one instance.
    pub label: Option<String>,
    pub body: InstanceBody,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InstanceBody {
    Entries { entries: Vec<OutlineEntry> },
    Paragraph { text: String },
    NoAnswer,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutlineEntry {
    pub question_id: String,
    pub number: String,
    pub label: String,
    pub required: bool,
    /// `None` renders as "Not answered".
    pub answer: Option<String>,
}

impl OutlineEntry {
    /// `"<number>. <label>"` with a trailing ` *` for required questions.
    pub fn heading(&self) -> String {
        let marker = if self.required { " *" } else { "" };
        format!("{}. {}{}", self.number, self.label, marker)
    }

    pub fn answer_or_placeholder(&self) -> &str {
        self.answer.as_deref().unwrap_or(NOT_ANSWERED)
    }
}

pub fn build_outline(template: &Template, snapshot: &FormSnapshot, options: ExportOptions) -> Outline {
    let groups = template
        .section_groups
        .iter()
        .map(|group| OutlineGroup {
            title: group.title.trim().to_string(),
            sections: group
                .section_ids
                .iter()
                .filter_map(|id| template.section(id))
                .filter_map(|section| outline_section(template, section, snapshot, options))
                .collect(),
        })
        .collect();

    Outline {
        title: snapshot.title.clone(),
        mode: options.mode,
        groups,
    }
}

fn outline_section(
    template: &Template,
    section: &SectionSpec,
    snapshot: &FormSnapshot,
    options: ExportOptions,
) -> Option<OutlineSection> {
    let instances = snapshot.form_data.section_instances(&section.id);
    let labelled = instances.len() > 1;

    let resolved = instances
        .iter()
        .enumerate()
        .filter_map(|(index, instance)| {
            let answered = visible_answers(template, section, instance);
            if answered.is_empty() && !options.include_empty {
                return None;
            }
            let body = match options.mode {
                ExportMode::Detailed => InstanceBody::Entries {
                    entries: detailed_entries(template, section, instance, options.include_empty),
                },
                ExportMode::Summary if answered.is_empty() => InstanceBody::NoAnswer,
                ExportMode::Summary => InstanceBody::Paragraph {
                    text: answered.join(" "),
                },
            };
            Some(OutlineInstance {
                label: labelled.then(|| template.instance_label(index)),
                body,
            })
        })
        .collect::<Vec<_>>();

    if resolved.is_empty() {
        return None;
    }
    Some(OutlineSection {
        id: section.id.clone(),
        title: section.title.trim().to_string(),
        instances: resolved,
    })
}

/// Visible, non-empty answers of one instance in question order.
fn visible_answers<'a>(
    template: &Template,
    section: &SectionSpec,
    instance: &'a AnswerInstance,
) -> Vec<&'a str> {
    section
        .questions
        .iter()
        .filter(|question| is_visible(template, &question.id, instance))
        .filter_map(|question| answer_text(instance, &question.id).map(str::trim))
        .collect()
}

fn detailed_entries(
    template: &Template,
    section: &SectionSpec,
    instance: &AnswerInstance,
    include_empty: bool,
) -> Vec<OutlineEntry> {
    section
        .questions
        .iter()
        .enumerate()
        .filter(|(_, question)| is_visible(template, &question.id, instance))
        .filter_map(|(index, question)| {
            let answer = answer_text(instance, &question.id).map(|text| text.trim().to_string());
            if answer.is_none() && !include_empty {
                return None;
            }
            Some(OutlineEntry {
                question_id: question.id.clone(),
                number: template.question_number(index, question),
                label: question.label.trim().to_string(),
                required: question.required,
                answer,
            })
        })
        .collect()
}
