use checklist_spec::{
    ExportMode, ExportOptions, FormSnapshot, FormState, InstanceBody, RenderStatus,
    TemplateRegistry, build_outline, build_render_payload, render_json_ui, render_text,
};

fn fixture(name: &str) -> &'static str {
    match name {
        "model_details_two_tools" => include_str!("../tests/fixtures/model_details_two_tools.json"),
        _ => panic!("unknown fixture {}", name),
    }
}

#[test]
fn render_json_ui_exposes_instances() {
    let registry = TemplateRegistry::builtin().expect("registry");
    let template = registry.get("ai-disclosure").expect("template");
    let snapshot: FormSnapshot =
        serde_json::from_str(fixture("model_details_two_tools")).expect("deserialize");
    let payload = build_render_payload(&template, &snapshot);
    assert_eq!(payload.status, RenderStatus::NeedInput);

    let ui = render_json_ui(&payload);
    assert_eq!(ui["template_id"], "ai-disclosure");
    assert_eq!(ui["groups"][0]["title"], "Immediate Disclosures");
    let model = ui["groups"][1]["sections"][0].clone();
    assert_eq!(model["id"], "model-details");
    assert_eq!(model["add_instance_label"], "+ Add Another AI Tool or Use Case");
    assert_eq!(model["instances"][1]["label"], "AI Tool 2");
    let first_q9 = model["instances"][0]["questions"]
        .as_array()
        .expect("questions")
        .iter()
        .find(|question| question["id"] == "q9")
        .cloned()
        .expect("q9");
    assert_eq!(first_q9["visible"], false);
    assert_eq!(first_q9["number"], "4a");
}

#[test]
fn render_text_marks_incomplete_sections() {
    let registry = TemplateRegistry::builtin().expect("registry");
    let template = registry.get("ai-disclosure").expect("template");
    let mut form = FormState::new(template, "Study");
    form.set_answer(0, "tasks-performed", "q1", "used for drafting")
        .expect("set");
    let payload = build_render_payload(form.template(), form.snapshot());
    let text = render_text(&payload);
    assert!(text.contains("# Tasks Performed by AI [incomplete]"));
    assert!(text.contains("1. How was the AI tool used? * = used for drafting"));
}

#[test]
fn single_instance_snapshot_round_trips_through_json() {
    let registry = TemplateRegistry::builtin().expect("registry");
    let template = registry.get("ai-disclosure").expect("template");
    let original = FormSnapshot {
        title: "Legacy".into(),
        template_id: "ai-disclosure".into(),
        form_data: serde_json::from_value(serde_json::json!({
            "q1": "used for drafting",
            "q2": "wrote items"
        }))
        .expect("form data"),
    };

    let stored = serde_json::to_string(&original).expect("encode");
    let reloaded: FormSnapshot = serde_json::from_str(&stored).expect("decode");
    assert_eq!(reloaded, original);
    assert!(reloaded.form_data.instances.is_empty());

    let outline = build_outline(
        &template,
        &reloaded,
        ExportOptions {
            mode: ExportMode::Summary,
            include_empty: false,
        },
    );
    let tasks = &outline.groups[0].sections[0];
    assert_eq!(tasks.id, "tasks-performed");
    assert_eq!(
        tasks.instances[0].body,
        InstanceBody::Paragraph {
            text: "used for drafting wrote items".into()
        }
    );
}

#[test]
fn detailed_skip_empty_drops_section_iff_all_instances_empty() {
    let registry = TemplateRegistry::builtin().expect("registry");
    let template = registry.get("ai-disclosure").expect("template");
    let options = ExportOptions {
        mode: ExportMode::Detailed,
        include_empty: false,
    };

    let mut form = FormState::new(template, "Study");
    form.add_instance("access-tooling-details").expect("add");
    form.add_instance("access-tooling-details").expect("add");
    let outline = build_outline(form.template(), form.snapshot(), options);
    assert!(
        outline
            .groups
            .iter()
            .flat_map(|group| group.sections.iter())
            .all(|section| section.id != "access-tooling-details")
    );

    form.set_answer(2, "access-tooling-details", "q14", "Qualtrics plugin")
        .expect("set");
    let outline = build_outline(form.template(), form.snapshot(), options);
    let access = outline
        .groups
        .iter()
        .flat_map(|group| group.sections.iter())
        .find(|section| section.id == "access-tooling-details")
        .expect("section present");
    assert_eq!(access.instances.len(), 1);
    assert_eq!(access.instances[0].label.as_deref(), Some("AI Tool 3"));
}
