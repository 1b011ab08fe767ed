//! OpenXML wordprocessing renderer.

use std::io::Cursor;

use docx_rs::{AlignmentType, Docx, LineSpacing, Paragraph, Run};

use checklist_spec::{ExportMode, InstanceBody, NO_ANSWER, Outline, OutlineSection};

use crate::{ExportError, instance_heading};

// Run sizes are in half-points.
const TITLE_SIZE: usize = 48;
const GROUP_SIZE: usize = 32;
const SECTION_SIZE: usize = 26;
const BODY_SIZE: usize = 22;
const MUTED: &str = "999999";

pub fn render(outline: &Outline) -> Result<Vec<u8>, ExportError> {
    let mut doc = Docx::new().add_paragraph(
        Paragraph::new()
            .add_run(Run::new().add_text(&outline.title).bold().size(TITLE_SIZE))
            .align(AlignmentType::Center)
            .line_spacing(LineSpacing::new().after(400)),
    );

    for group in &outline.groups {
        if !group.title.is_empty() {
            doc = doc.add_paragraph(
                Paragraph::new()
                    .add_run(Run::new().add_text(&group.title).bold().size(GROUP_SIZE))
                    .line_spacing(LineSpacing::new().before(400).after(200)),
            );
        }
        for section in &group.sections {
            doc = section_paragraphs(section, outline.mode)
                .into_iter()
                .fold(doc, |doc, paragraph| doc.add_paragraph(paragraph));
        }
    }

    let mut cursor = Cursor::new(Vec::new());
    doc.build()
        .pack(&mut cursor)
        .map_err(|err| ExportError::Docx(err.to_string()))?;
    Ok(cursor.into_inner())
}

fn section_paragraphs(section: &OutlineSection, mode: ExportMode) -> Vec<Paragraph> {
    let mut paragraphs = vec![
        Paragraph::new()
            .add_run(Run::new().add_text(&section.title).bold().size(SECTION_SIZE))
            .line_spacing(LineSpacing::new().before(300).after(200)),
    ];

    for instance in &section.instances {
        if let Some(label) = &instance.label {
            paragraphs.push(
                Paragraph::new()
                    .add_run(Run::new().add_text(instance_heading(label, mode)).bold().size(BODY_SIZE))
                    .line_spacing(LineSpacing::new().before(150)),
            );
        }
        match &instance.body {
            InstanceBody::Entries { entries } => {
                for entry in entries {
                    paragraphs.push(
                        Paragraph::new()
                            .add_run(Run::new().add_text(entry.heading()).bold().size(BODY_SIZE))
                            .line_spacing(LineSpacing::new().before(150)),
                    );
                    let run = match &entry.answer {
                        Some(answer) => Run::new().add_text(answer).size(BODY_SIZE),
                        None => Run::new()
                            .add_text(entry.answer_or_placeholder())
                            .italic()
                            .color(MUTED)
                            .size(BODY_SIZE),
                    };
                    paragraphs.push(
                        Paragraph::new()
                            .add_run(run)
                            .indent(Some(400), None, None, None)
                            .line_spacing(LineSpacing::new().after(100)),
                    );
                }
            }
            InstanceBody::Paragraph { text } => paragraphs.push(
                Paragraph::new()
                    .add_run(Run::new().add_text(text).size(BODY_SIZE))
                    .line_spacing(LineSpacing::new().after(200)),
            ),
            InstanceBody::NoAnswer => paragraphs.push(
                Paragraph::new()
                    .add_run(
                        Run::new()
                            .add_text(NO_ANSWER)
                            .italic()
                            .color(MUTED)
                            .size(BODY_SIZE),
                    )
                    .line_spacing(LineSpacing::new().after(200)),
            ),
        }
    }

    paragraphs
}
