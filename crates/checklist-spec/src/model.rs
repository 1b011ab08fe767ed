//! In-memory form state driven by editing events.

use std::sync::Arc;

use thiserror::Error;

use crate::snapshot::{AnswerInstance, FormSnapshot};
use crate::spec::{section::SectionSpec, template::Template};
use crate::validate::{MissingAnswer, missing_required};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("section '{0}' is not part of the template")]
    UnknownSection(String),
    #[error("question '{question}' is not part of section '{section}'")]
    UnknownQuestion { section: String, question: String },
    #[error("section '{section}' has no instance {index}")]
    InstanceOutOfRange { section: String, index: usize },
    #[error("snapshot uses template '{snapshot}' but the form was opened with '{template}'")]
    TemplateMismatch { snapshot: String, template: String },
}

/// Completion details for one section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionCompletion {
    pub section_id: String,
    pub complete: bool,
    pub missing: Vec<MissingAnswer>,
}

/// A snapshot bound to the template it was created with.
#[derive(Debug, Clone)]
pub struct FormState {
    template: Arc<Template>,
    snapshot: FormSnapshot,
}

impl FormState {
    pub fn new(template: Arc<Template>, title: impl Into<String>) -> Self {
        let snapshot = FormSnapshot::new(title, template.id.clone());
        Self { template, snapshot }
    }

    pub fn from_snapshot(template: Arc<Template>, snapshot: FormSnapshot) -> Result<Self, ModelError> {
        if snapshot.template_id != template.id {
            return Err(ModelError::TemplateMismatch {
                snapshot: snapshot.template_id,
                template: template.id.clone(),
            });
        }
        Ok(Self { template, snapshot })
    }

    pub fn template(&self) -> &Arc<Template> {
        &self.template
    }

    pub fn snapshot(&self) -> &FormSnapshot {
        &self.snapshot
    }

    pub fn into_snapshot(self) -> FormSnapshot {
        self.snapshot
    }

    pub fn title(&self) -> &str {
        &self.snapshot.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.snapshot.title = title.into();
    }

    pub fn instances(&self, section_id: &str) -> &[AnswerInstance] {
        self.snapshot.form_data.section_instances(section_id)
    }

    pub fn instance_count(&self, section_id: &str) -> usize {
        self.instances(section_id).len()
    }

    /// Replaces one answer. Instance 0 is mirrored into the flat answers.
    pub fn set_answer(
        &mut self,
        instance_index: usize,
        section_id: &str,
        question_id: &str,
        value: impl Into<String>,
    ) -> Result<(), ModelError> {
        let section = self.section(section_id)?;
        if section.question(question_id).is_none() {
            return Err(ModelError::UnknownQuestion {
                section: section_id.to_string(),
                question: question_id.to_string(),
            });
        }
        let value = value.into();
        let instances = self.materialize(section_id)?;
        let instance =
            instances
                .get_mut(instance_index)
                .ok_or_else(|| ModelError::InstanceOutOfRange {
                    section: section_id.to_string(),
                    index: instance_index,
                })?;
        instance.insert(question_id.to_string(), value.clone());

        if instance_index == 0 {
            self.snapshot
                .form_data
                .answers
                .insert(question_id.to_string(), value);
        }
        Ok(())
    }

    /// Appends an empty instance and returns the new instance count.
    pub fn add_instance(&mut self, section_id: &str) -> Result<usize, ModelError> {
        let instances = self.materialize(section_id)?;
        instances.push(AnswerInstance::new());
        Ok(instances.len())
    }

    /// Removes an instance. Returns `false` without changes when it is the last one.
    pub fn remove_instance(&mut self, section_id: &str, index: usize) -> Result<bool, ModelError> {
        let count = {
            self.section(section_id)?;
            self.instance_count(section_id)
        };
        if count <= 1 {
            return Ok(false);
        }
        if index >= count {
            return Err(ModelError::InstanceOutOfRange {
                section: section_id.to_string(),
                index,
            });
        }

        let instances = self.materialize(section_id)?;
        instances.remove(index);
        if index == 0 {
            self.mirror_first_instance(section_id)?;
        }
        Ok(true)
    }

    pub fn section_completion(&self, section_id: &str) -> Result<SectionCompletion, ModelError> {
        let section = self.section(section_id)?;
        let missing = missing_required(section, self.instances(section_id));
        Ok(SectionCompletion {
            section_id: section_id.to_string(),
            complete: missing.is_empty(),
            missing,
        })
    }

    /// `false` when any instance leaves a required question blank.
    pub fn is_section_complete(&self, section_id: &str) -> Result<bool, ModelError> {
        Ok(self.section_completion(section_id)?.complete)
    }

    fn section(&self, section_id: &str) -> Result<&SectionSpec, ModelError> {
        self.template
            .section(section_id)
            .ok_or_else(|| ModelError::UnknownSection(section_id.to_string()))
    }

    /// Turns the implicit single instance into an explicit list.
    fn materialize(&mut self, section_id: &str) -> Result<&mut Vec<AnswerInstance>, ModelError> {
        let question_ids = self
            .section(section_id)?
            .questions
            .iter()
            .map(|question| question.id.clone())
            .collect::<Vec<_>>();
        let data = &mut self.snapshot.form_data;
        if !data.has_explicit_instances(section_id) {
            let seed = question_ids
                .iter()
                .filter_map(|id| data.answers.get(id).map(|value| (id.clone(), value.clone())))
                .collect::<AnswerInstance>();
            data.instances.insert(section_id.to_string(), vec![seed]);
        }
        Ok(data.instances.entry(section_id.to_string()).or_default())
    }

    fn mirror_first_instance(&mut self, section_id: &str) -> Result<(), ModelError> {
        let section = self.section(section_id)?.clone();
        let first = self.instances(section_id).first().cloned().unwrap_or_default();
        let answers = &mut self.snapshot.form_data.answers;
        for question in &section.questions {
            match first.get(&question.id) {
                Some(value) => {
                    answers.insert(question.id.clone(), value.clone());
                }
                None => {
                    answers.remove(&question.id);
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::TemplateRegistry;

    fn ai_form() -> FormState {
        let registry = TemplateRegistry::builtin().expect("registry");
        FormState::new(registry.get("ai-disclosure").expect("template"), "Study")
    }

    #[test]
    fn single_instance_answers_live_in_flat_map() {
        let mut form = ai_form();
        form.set_answer(0, "tasks-performed", "q1", "used for drafting")
            .expect("set");
        let data = &form.snapshot().form_data;
        assert_eq!(data.answers.get("q1").map(String::as_str), Some("used for drafting"));
        assert_eq!(form.instances("tasks-performed")[0].get("q1"), data.answers.get("q1"));
    }

    #[test]
    fn remove_last_instance_is_noop() {
        let mut form = ai_form();
        assert_eq!(form.instance_count("model-details"), 1);
        assert!(!form.remove_instance("model-details", 0).expect("remove"));
        assert_eq!(form.instance_count("model-details"), 1);

        assert_eq!(form.add_instance("model-details").expect("add"), 2);
        assert!(form.remove_instance("model-details", 1).expect("remove"));
        assert!(!form.remove_instance("model-details", 0).expect("remove"));
        assert_eq!(form.instance_count("model-details"), 1);
    }

    #[test]
    fn removing_first_instance_remirrors_flat_answers() {
        let mut form = ai_form();
        form.set_answer(0, "tasks-performed", "q1", "first").expect("set");
        form.add_instance("tasks-performed").expect("add");
        form.set_answer(1, "tasks-performed", "q1", "second").expect("set");
        assert!(form.remove_instance("tasks-performed", 0).expect("remove"));
        assert_eq!(
            form.snapshot().form_data.answers.get("q1").map(String::as_str),
            Some("second")
        );
    }

    #[test]
    fn out_of_range_instance_is_reported() {
        let mut form = ai_form();
        let err = form
            .set_answer(3, "tasks-performed", "q1", "x")
            .expect_err("out of range");
        assert_eq!(
            err,
            ModelError::InstanceOutOfRange {
                section: "tasks-performed".into(),
                index: 3
            }
        );
        assert!(matches!(
            form.set_answer(0, "nope", "q1", "x"),
            Err(ModelError::UnknownSection(_))
        ));
        assert!(matches!(
            form.set_answer(0, "tasks-performed", "q5", "x"),
            Err(ModelError::UnknownQuestion { .. })
        ));
    }

    #[test]
    fn completion_is_or_across_instances() {
        let mut form = ai_form();
        form.set_answer(0, "tasks-performed", "q1", "a").expect("set");
        form.set_answer(0, "tasks-performed", "q2", "b").expect("set");
        assert!(form.is_section_complete("tasks-performed").expect("status"));

        form.add_instance("tasks-performed").expect("add");
        form.set_answer(1, "tasks-performed", "q1", "c").expect("set");
        let completion = form.section_completion("tasks-performed").expect("status");
        assert!(!completion.complete);
        assert_eq!(completion.missing.len(), 1);
        assert_eq!(completion.missing[0].instance, 1);
        assert_eq!(completion.missing[0].question_id, "q2");
    }

    #[test]
    fn whitespace_answer_is_incomplete() {
        let mut form = ai_form();
        form.set_answer(0, "tasks-performed", "q1", "a").expect("set");
        form.set_answer(0, "tasks-performed", "q2", "   ").expect("set");
        assert!(!form.is_section_complete("tasks-performed").expect("status"));
    }

    #[test]
    fn hidden_required_follow_up_still_blocks_completion() {
        let mut form = ai_form();
        for (question, value) in [
            ("q5", "GPT"),
            ("q6", "Proprietary"),
            ("q7", "May"),
            ("q8", "No"),
            ("q10", "link"),
            ("q11", "none"),
            ("q12", "defaults"),
        ] {
            form.set_answer(0, "model-details", question, value).expect("set");
        }
        let completion = form.section_completion("model-details").expect("status");
        assert!(!completion.complete);
        assert_eq!(completion.missing.len(), 1);
        assert_eq!(completion.missing[0].question_id, "q9");

        form.set_answer(0, "model-details", "q9", "coded responses").expect("set");
        assert!(form.is_section_complete("model-details").expect("status"));
    }

    #[test]
    fn loading_snapshot_for_other_template_fails() {
        let registry = TemplateRegistry::builtin().expect("registry");
        let snapshot = FormSnapshot::new("t", "aapor-transparency");
        let err = FormState::from_snapshot(registry.get("ai-disclosure").expect("template"), snapshot)
            .expect_err("mismatch");
        assert!(matches!(err, ModelError::TemplateMismatch { .. }));
    }
}
