use serde_json::{Map, Value, json};

use crate::{
    snapshot::{AnswerInstance, FormSnapshot, answer_text},
    spec::{question::QuestionType, section::SectionSpec, template::Template},
    validate::missing_required,
    visibility::resolve_visibility,
};

/// Status labels returned by the renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderStatus {
    /// At least one required question is still blank.
    NeedInput,
    /// Every visible required question is filled.
    Complete,
}

impl RenderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RenderStatus::NeedInput => "need_input",
            RenderStatus::Complete => "complete",
        }
    }
}

/// Progress counters exposed to renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderProgress {
    pub answered: usize,
    pub total: usize,
}

/// Describes a single question for render outputs.
#[derive(Debug, Clone)]
pub struct RenderQuestion {
    pub id: String,
    pub number: String,
    pub label: String,
    pub kind: QuestionType,
    pub required: bool,
    pub placeholder: Option<String>,
    pub tooltip: Option<String>,
    pub options: Option<Vec<String>>,
    pub visible: bool,
    pub current_value: Option<String>,
}

#[derive(Debug, Clone)]
pub struct RenderInstance {
    pub index: usize,
    /// Present only when the section has more than one instance.
    pub label: Option<String>,
    /// Removing is offered only while more than one instance exists.
    pub removable: bool,
    pub questions: Vec<RenderQuestion>,
}

/// One expandable card.
#[derive(Debug, Clone)]
pub struct RenderSection {
    pub id: String,
    pub title: String,
    pub summary: String,
    pub summary_preview: String,
    pub complete: bool,
    pub add_instance_label: String,
    pub instances: Vec<RenderInstance>,
}

#[derive(Debug, Clone)]
pub struct RenderGroup {
    pub title: String,
    pub description: String,
    pub sections: Vec<RenderSection>,
}

/// Collected payload used by both text and JSON renderers.
#[derive(Debug, Clone)]
pub struct RenderPayload {
    pub template_id: String,
    pub template_name: String,
    pub template_version: String,
    pub form_title: String,
    pub status: RenderStatus,
    pub progress: RenderProgress,
    pub help: Option<String>,
    pub groups: Vec<RenderGroup>,
}

/// Build the renderer payload from a template and the current snapshot.
pub fn build_render_payload(template: &Template, snapshot: &FormSnapshot) -> RenderPayload {
    let mut progress = RenderProgress {
        answered: 0,
        total: 0,
    };

    let groups = template
        .section_groups
        .iter()
        .map(|group| RenderGroup {
            title: group.title.clone(),
            description: group.description.clone(),
            sections: group
                .section_ids
                .iter()
                .filter_map(|id| template.section(id))
                .map(|section| render_section(template, section, snapshot, &mut progress))
                .collect(),
        })
        .collect::<Vec<_>>();

    let complete = groups
        .iter()
        .flat_map(|group| group.sections.iter())
        .all(|section| section.complete);
    let status = if complete {
        RenderStatus::Complete
    } else {
        RenderStatus::NeedInput
    };
    let help = Some(template.description.clone()).filter(|text| !text.trim().is_empty());

    RenderPayload {
        template_id: template.id.clone(),
        template_name: template.name.clone(),
        template_version: template.version.clone(),
        form_title: snapshot.title.clone(),
        status,
        progress,
        help,
        groups,
    }
}

fn render_section(
    template: &Template,
    section: &SectionSpec,
    snapshot: &FormSnapshot,
    progress: &mut RenderProgress,
) -> RenderSection {
    let instances = snapshot.form_data.section_instances(&section.id);
    let multiple = instances.len() > 1;

    let rendered = instances
        .iter()
        .enumerate()
        .map(|(index, instance)| {
            let questions = render_questions(template, section, instance);
            for question in questions.iter().filter(|question| question.visible) {
                progress.total += 1;
                if question.current_value.is_some() {
                    progress.answered += 1;
                }
            }
            RenderInstance {
                index,
                label: multiple.then(|| template.instance_label(index)),
                removable: multiple,
                questions,
            }
        })
        .collect();

    RenderSection {
        id: section.id.clone(),
        title: section.title.clone(),
        summary: section.summary.clone(),
        summary_preview: section.summary_preview(),
        complete: missing_required(section, instances).is_empty(),
        add_instance_label: template.add_instance_label(),
        instances: rendered,
    }
}

fn render_questions(
    template: &Template,
    section: &SectionSpec,
    instance: &AnswerInstance,
) -> Vec<RenderQuestion> {
    let visibility = resolve_visibility(template, section, instance);
    section
        .questions
        .iter()
        .enumerate()
        .map(|(index, question)| RenderQuestion {
            id: question.id.clone(),
            number: template.question_number(index, question),
            label: question.label.clone(),
            kind: question.kind,
            required: question.required,
            placeholder: question.placeholder.clone(),
            tooltip: question.tooltip().map(str::to_string),
            options: question.options.clone(),
            visible: visibility.get(&question.id).copied().unwrap_or(true),
            current_value: answer_text(instance, &question.id).map(str::to_string),
        })
        .collect()
}

/// Render the payload as a structured JSON-friendly value.
pub fn render_json_ui(payload: &RenderPayload) -> Value {
    let groups = payload
        .groups
        .iter()
        .map(|group| {
            let sections = group
                .sections
                .iter()
                .map(|section| {
                    let instances = section
                        .instances
                        .iter()
                        .map(|instance| {
                            json!({
                                "index": instance.index,
                                "label": instance.label,
                                "removable": instance.removable,
                                "questions": instance
                                    .questions
                                    .iter()
                                    .map(question_json)
                                    .collect::<Vec<_>>(),
                            })
                        })
                        .collect::<Vec<_>>();
                    json!({
                        "id": section.id,
                        "title": section.title,
                        "summary": section.summary,
                        "summary_preview": section.summary_preview,
                        "complete": section.complete,
                        "add_instance_label": section.add_instance_label,
                        "instances": instances,
                    })
                })
                .collect::<Vec<_>>();
            json!({
                "title": group.title,
                "description": group.description,
                "sections": sections,
            })
        })
        .collect::<Vec<_>>();

    json!({
        "template_id": payload.template_id,
        "template_name": payload.template_name,
        "template_version": payload.template_version,
        "form_title": payload.form_title,
        "status": payload.status.as_str(),
        "progress": {
            "answered": payload.progress.answered,
            "total": payload.progress.total,
        },
        "help": payload.help,
        "groups": groups,
    })
}

fn question_json(question: &RenderQuestion) -> Value {
    let mut map = Map::new();
    map.insert("id".into(), Value::String(question.id.clone()));
    map.insert("number".into(), Value::String(question.number.clone()));
    map.insert("label".into(), Value::String(question.label.clone()));
    map.insert("type".into(), Value::String(question.kind.as_str().into()));
    map.insert("required".into(), Value::Bool(question.required));
    map.insert("visible".into(), Value::Bool(question.visible));
    if let Some(placeholder) = &question.placeholder {
        map.insert("placeholder".into(), Value::String(placeholder.clone()));
    }
    if let Some(tooltip) = &question.tooltip {
        map.insert("tooltip".into(), Value::String(tooltip.clone()));
    }
    if let Some(options) = &question.options {
        map.insert(
            "options".into(),
            Value::Array(options.iter().cloned().map(Value::String).collect()),
        );
    }
    if let Some(value) = &question.current_value {
        map.insert("current_value".into(), Value::String(value.clone()));
    }
    Value::Object(map)
}

/// Render the payload as human-friendly text.
pub fn render_text(payload: &RenderPayload) -> String {
    let mut lines = Vec::new();
    lines.push(format!(
        "Form: {} ({} v{})",
        payload.form_title, payload.template_name, payload.template_version
    ));
    lines.push(format!(
        "Status: {} ({}/{})",
        payload.status.as_str(),
        payload.progress.answered,
        payload.progress.total
    ));
    if let Some(help) = &payload.help {
        lines.push(format!("Help: {}", help));
    }

    for group in &payload.groups {
        if !group.title.trim().is_empty() {
            lines.push(String::new());
            lines.push(format!("## {}", group.title));
        }
        for section in &group.sections {
            let marker = if section.complete { "" } else { " [incomplete]" };
            lines.push(format!("# {}{}", section.title.trim(), marker));
            for instance in &section.instances {
                if let Some(label) = &instance.label {
                    lines.push(format!("  {}", label));
                }
                for question in instance.questions.iter().filter(|question| question.visible) {
                    let mut entry = format!("  {}. {}", question.number, question.label.trim());
                    if question.required {
                        entry.push_str(" *");
                    }
                    if let Some(value) = &question.current_value {
                        entry.push_str(&format!(" = {}", value));
                    }
                    lines.push(entry);
                }
            }
        }
    }

    lines.join("\n")
}
