use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::snapshot::{AnswerInstance, FormSnapshot, answer_text};
use crate::spec::question::{QuestionSpec, QuestionType};
use crate::spec::section::SectionSpec;
use crate::spec::template::Template;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance: Option<usize>,
    pub message: String,
    pub code: String,
}

/// A required question left blank in one instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingAnswer {
    pub section_id: String,
    pub instance: usize,
    pub question_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<ValidationError>,
    pub missing_required: Vec<MissingAnswer>,
    pub unknown_fields: Vec<String>,
}

/// Structural problems in a template definition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TemplateReport {
    pub template_id: String,
    pub valid: bool,
    pub errors: Vec<ValidationError>,
    /// Non-fatal findings such as stale group references or ungrouped sections.
    pub warnings: Vec<ValidationError>,
}

pub fn validate_template(template: &Template) -> TemplateReport {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();
    let mut seen = BTreeSet::new();

    for section in &template.sections {
        for question in &section.questions {
            if !seen.insert(question.id.as_str()) {
                errors.push(issue(
                    Some(section),
                    Some(&question.id),
                    "question id is used more than once in the template",
                    "duplicate_question",
                ));
            }
            if question.kind == QuestionType::Radio
                && question.options.as_ref().is_none_or(Vec::is_empty)
            {
                errors.push(issue(
                    Some(section),
                    Some(&question.id),
                    "radio question has no options",
                    "missing_options",
                ));
            }
        }
    }

    for rule in &template.visibility_rules {
        let Some(section) = template
            .sections
            .iter()
            .find(|section| section.question(&rule.question).is_some())
        else {
            errors.push(issue(
                None,
                Some(&rule.question),
                "visibility rule targets an unknown question",
                "unknown_rule_question",
            ));
            continue;
        };
        match section.question(&rule.controller) {
            None => errors.push(issue(
                Some(section),
                Some(&rule.question),
                &format!(
                    "controller '{}' is not in the same section",
                    rule.controller
                ),
                "controller_outside_section",
            )),
            Some(controller) => {
                if let Some(options) = &controller.options
                    && !options.contains(&rule.equals)
                {
                    errors.push(issue(
                        Some(section),
                        Some(&rule.question),
                        &format!(
                            "controller '{}' can never equal '{}'",
                            controller.id, rule.equals
                        ),
                        "unreachable_rule",
                    ));
                }
            }
        }
    }

    for question_id in template.numbering_overrides.keys() {
        if !seen.contains(question_id.as_str()) {
            warnings.push(issue(
                None,
                Some(question_id),
                "numbering override names an unknown question",
                "unknown_override",
            ));
        }
    }

    let mut grouped = BTreeSet::new();
    for group in &template.section_groups {
        for section_id in &group.section_ids {
            grouped.insert(section_id.as_str());
            if template.section(section_id).is_none() {
                warnings.push(ValidationError {
                    section_id: Some(section_id.clone()),
                    question_id: None,
                    instance: None,
                    message: format!("group '{}' references an unknown section", group.title),
                    code: "unknown_section".into(),
                });
            }
        }
    }
    for section in &template.sections {
        if !grouped.contains(section.id.as_str()) {
            warnings.push(issue(
                Some(section),
                None,
                "section is not part of any group and will not be rendered",
                "ungrouped_section",
            ));
        }
    }

    TemplateReport {
        template_id: template.id.clone(),
        valid: errors.is_empty(),
        errors,
        warnings,
    }
}

/// Required questions left blank in any instance, whether or not their rule shows them.
pub fn missing_required(
    section: &SectionSpec,
    instances: &[AnswerInstance],
) -> Vec<MissingAnswer> {
    instances
        .iter()
        .enumerate()
        .flat_map(|(index, instance)| {
            section
                .questions
                .iter()
                .filter(move |question| {
                    question.required && answer_text(instance, &question.id).is_none()
                })
                .map(move |question| MissingAnswer {
                    section_id: section.id.clone(),
                    instance: index,
                    question_id: question.id.clone(),
                })
        })
        .collect()
}

/// Checks a snapshot's answers against its template.
pub fn validate_snapshot(template: &Template, snapshot: &FormSnapshot) -> ValidationResult {
    let mut errors = Vec::new();
    let mut missing = Vec::new();

    if snapshot.template_id != template.id {
        errors.push(ValidationError {
            section_id: None,
            question_id: None,
            instance: None,
            message: format!(
                "snapshot uses template '{}' but was checked against '{}'",
                snapshot.template_id, template.id
            ),
            code: "template_mismatch".into(),
        });
    }

    for (_, section) in template.grouped_sections() {
        let instances = snapshot.form_data.section_instances(&section.id);
        missing.extend(missing_required(section, instances));
        for (index, instance) in instances.iter().enumerate() {
            for question in &section.questions {
                if let Some(value) = answer_text(instance, &question.id)
                    && let Some(error) = validate_value(section, question, index, value)
                {
                    errors.push(error);
                }
            }
        }
    }

    let known_ids: BTreeSet<&str> = template
        .sections
        .iter()
        .flat_map(|section| section.questions.iter().map(|q| q.id.as_str()))
        .collect();
    let unknown_fields = snapshot
        .form_data
        .answers
        .keys()
        .filter(|key| !known_ids.contains(key.as_str()))
        .cloned()
        .collect::<Vec<_>>();
    for section_id in snapshot.form_data.instances.keys() {
        if template.section(section_id).is_none() {
            errors.push(ValidationError {
                section_id: Some(section_id.clone()),
                question_id: None,
                instance: None,
                message: "instances recorded for an unknown section".into(),
                code: "unknown_section".into(),
            });
        }
    }

    ValidationResult {
        valid: errors.is_empty() && missing.is_empty() && unknown_fields.is_empty(),
        errors,
        missing_required: missing,
        unknown_fields,
    }
}

fn validate_value(
    section: &SectionSpec,
    question: &QuestionSpec,
    index: usize,
    value: &str,
) -> Option<ValidationError> {
    if question.kind == QuestionType::Radio
        && let Some(options) = &question.options
        && !options.iter().any(|option| option == value)
    {
        return Some(ValidationError {
            section_id: Some(section.id.clone()),
            question_id: Some(question.id.clone()),
            instance: Some(index),
            message: format!("'{}' is not one of the offered options", value),
            code: "invalid_option".into(),
        });
    }
    None
}

fn issue(
    section: Option<&SectionSpec>,
    question_id: Option<&String>,
    message: &str,
    code: &str,
) -> ValidationError {
    ValidationError {
        section_id: section.map(|section| section.id.clone()),
        question_id: question_id.cloned(),
        instance: None,
        message: message.into(),
        code: code.into(),
    }
}
