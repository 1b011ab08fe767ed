use serde::Serialize;

use crate::outline::NO_ANSWER;
use crate::snapshot::{FormSnapshot, answer_text};
use crate::spec::template::Template;
use crate::visibility::is_visible;

/// Read-only rendering of a published form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublicView {
    pub title: String,
    pub template_name: String,
    pub author_name: Option<String>,
    pub groups: Vec<PublicGroup>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublicGroup {
    pub title: String,
    pub description: String,
    pub sections: Vec<PublicSection>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublicSection {
    pub id: String,
    pub title: String,
    pub instances: Vec<PublicInstance>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublicInstance {
    pub label: Option<String>,
    pub answers: Vec<PublicAnswer>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublicAnswer {
    pub question_id: String,
    pub label: String,
    pub answer: Option<String>,
}

pub fn build_public_view(
    template: &Template,
    snapshot: &FormSnapshot,
    author_name: Option<&str>,
) -> PublicView {
    let groups = template
        .section_groups
        .iter()
        .map(|group| PublicGroup {
            title: group.title.clone(),
            description: group.description.clone(),
            sections: group
                .section_ids
                .iter()
                .filter_map(|id| template.section(id))
                .map(|section| {
                    let instances = snapshot.form_data.section_instances(&section.id);
                    let multiple = instances.len() > 1;
                    PublicSection {
                        id: section.id.clone(),
                        title: section.title.trim().to_string(),
                        instances: instances
                            .iter()
                            .enumerate()
                            .map(|(index, instance)| PublicInstance {
                                label: multiple.then(|| template.instance_label(index)),
                                answers: section
                                    .questions
                                    .iter()
                                    .filter(|question| is_visible(template, &question.id, instance))
                                    .map(|question| PublicAnswer {
                                        question_id: question.id.clone(),
                                        label: question.label.trim().to_string(),
                                        answer: answer_text(instance, &question.id)
                                            .map(str::to_string),
                                    })
                                    .collect(),
                            })
                            .collect(),
                    }
                })
                .collect(),
        })
        .collect();

    PublicView {
        title: snapshot.title.clone(),
        template_name: template.name.clone(),
        author_name: author_name
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string),
        groups,
    }
}

pub fn render_public_text(view: &PublicView) -> String {
    let mut lines = vec![view.title.clone()];
    if let Some(author) = &view.author_name {
        lines.push(format!("By {}", author));
    }
    lines.push(view.template_name.clone());

    for group in &view.groups {
        if !group.title.trim().is_empty() {
            lines.push(String::new());
            lines.push(group.title.to_uppercase());
        }
        for section in &group.sections {
            lines.push(String::new());
            lines.push(section.title.clone());
            for instance in &section.instances {
                if let Some(label) = &instance.label {
                    lines.push(format!("[{}]", label));
                }
                for answer in &instance.answers {
                    lines.push(format!("  {}", answer.label));
                    lines.push(format!(
                        "    {}",
                        answer.answer.as_deref().unwrap_or(NO_ANSWER)
                    ));
                }
            }
        }
    }

    lines.join("\n")
}
