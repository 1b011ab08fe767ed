use crate::snapshot::AnswerInstance;
use crate::spec::{section::SectionSpec, template::Template};

pub type VisibilityMap = std::collections::BTreeMap<String, bool>;

/// Decides whether a question applies to one answer instance.
///
/// A rule-gated question is shown only while its controller holds the exact
/// required value; an unanswered controller hides it.
pub fn is_visible(template: &Template, question_id: &str, instance: &AnswerInstance) -> bool {
    match template.rule_for(question_id) {
        Some(rule) => instance
            .get(&rule.controller)
            .is_some_and(|value| *value == rule.equals),
        None => true,
    }
}

pub fn resolve_visibility(
    template: &Template,
    section: &SectionSpec,
    instance: &AnswerInstance,
) -> VisibilityMap {
    section
        .questions
        .iter()
        .map(|question| {
            (
                question.id.clone(),
                is_visible(template, &question.id, instance),
            )
        })
        .collect()
}
