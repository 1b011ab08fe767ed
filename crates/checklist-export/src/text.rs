//! Plain text renderer with `=`/`-` underlined headings.

use checklist_spec::{ExportMode, InstanceBody, NO_ANSWER, Outline, OutlineSection};

use crate::instance_heading;

pub fn render(outline: &Outline) -> String {
    let mut text = format!("{}\n{}\n\n", outline.title, underline(&outline.title, '='));

    for (index, group) in outline.groups.iter().enumerate() {
        if !group.title.is_empty() {
            let heading = group.title.to_uppercase();
            let gap = if index == 0 { "\n" } else { "\n\n" };
            text.push_str(&format!("{}{}\n{}\n", gap, heading, underline(&heading, '=')));
        }
        for section in &group.sections {
            render_section(&mut text, section, outline.mode);
        }
    }

    text
}

fn render_section(text: &mut String, section: &OutlineSection, mode: ExportMode) {
    text.push_str(&format!(
        "\n{}\n{}\n",
        section.title,
        underline(&section.title, '-')
    ));

    for instance in &section.instances {
        if let Some(label) = &instance.label {
            text.push_str(&format!("\n{}\n", instance_heading(label, mode)));
        }
        match &instance.body {
            InstanceBody::Entries { entries } => {
                for entry in entries {
                    text.push_str(&format!(
                        "\n{}\n   {}\n",
                        entry.heading(),
                        entry.answer_or_placeholder()
                    ));
                }
            }
            InstanceBody::Paragraph { text: paragraph } => {
                text.push_str(paragraph);
                text.push('\n');
            }
            InstanceBody::NoAnswer => {
                text.push_str(NO_ANSWER);
                text.push('\n');
            }
        }
    }
}

fn underline(heading: &str, mark: char) -> String {
    mark.to_string().repeat(heading.chars().count())
}
