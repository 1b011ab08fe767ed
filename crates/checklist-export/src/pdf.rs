//! PDF renderer built on genpdf.

use genpdf::elements::{Break, Paragraph};
use genpdf::style::{Color, Style, StyledString};
use genpdf::{Alignment, Document, Element as _, Margins, SimplePageDecorator};

use checklist_spec::{ExportMode, InstanceBody, NO_ANSWER, Outline, OutlineSection};

use crate::{ExportConfig, ExportError, instance_heading};

const TITLE_SIZE: u8 = 20;
const GROUP_SIZE: u8 = 15;
const SECTION_SIZE: u8 = 13;
const BODY_SIZE: u8 = 10;

fn load_document(config: &ExportConfig) -> Result<Document, ExportError> {
    let family = genpdf::fonts::from_files(&config.fonts_dir, &config.font_family, None)
        .map_err(|err| ExportError::Fonts {
            dir: config.fonts_dir.clone(),
            family: config.font_family.clone(),
            message: err.to_string(),
        })?;
    let mut doc = Document::new(family);
    doc.set_font_size(BODY_SIZE);
    doc.set_line_spacing(1.25);

    let mut decorator = SimplePageDecorator::new();
    decorator.set_margins(15);
    doc.set_page_decorator(decorator);
    Ok(doc)
}

fn muted() -> Style {
    Style::new().italic().with_color(Color::Greyscale(150))
}

pub fn render(outline: &Outline, config: &ExportConfig) -> Result<Vec<u8>, ExportError> {
    let mut doc = load_document(config)?;
    doc.set_title(outline.title.clone());

    doc.push(
        Paragraph::new(outline.title.as_str())
            .aligned(Alignment::Center)
            .styled(Style::new().bold().with_font_size(TITLE_SIZE)),
    );
    doc.push(Break::new(1.5));

    for group in &outline.groups {
        if !group.title.is_empty() {
            doc.push(Break::new(1));
            doc.push(
                Paragraph::new(group.title.as_str())
                    .styled(Style::new().bold().with_font_size(GROUP_SIZE)),
            );
        }
        for section in &group.sections {
            push_section(&mut doc, section, outline.mode);
        }
    }

    let mut bytes = Vec::new();
    doc.render(&mut bytes)
        .map_err(|err| ExportError::Pdf(err.to_string()))?;
    Ok(bytes)
}

fn push_section(doc: &mut Document, section: &OutlineSection, mode: ExportMode) {
    doc.push(Break::new(1));
    doc.push(
        Paragraph::new(section.title.as_str())
            .styled(Style::new().bold().with_font_size(SECTION_SIZE)),
    );

    for instance in &section.instances {
        if let Some(label) = &instance.label {
            doc.push(Break::new(0.5));
            doc.push(Paragraph::new(StyledString::new(
                instance_heading(label, mode),
                Style::new().bold(),
            )));
        }
        match &instance.body {
            InstanceBody::Entries { entries } => {
                for entry in entries {
                    doc.push(Break::new(0.5));
                    doc.push(Paragraph::new(StyledString::new(
                        entry.heading(),
                        Style::new().bold(),
                    )));
                    let answer = match &entry.answer {
                        Some(answer) => StyledString::new(answer.clone(), Style::new()),
                        None => StyledString::new(entry.answer_or_placeholder(), muted()),
                    };
                    doc.push(Paragraph::new(answer).padded(Margins::trbl(0, 0, 0, 6)));
                }
            }
            InstanceBody::Paragraph { text } => {
                doc.push(Paragraph::new(text.as_str()));
            }
            InstanceBody::NoAnswer => {
                doc.push(Paragraph::new(StyledString::new(NO_ANSWER, muted())));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use checklist_spec::ExportMode;

    #[test]
    fn missing_fonts_are_reported() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = ExportConfig {
            fonts_dir: dir.path().to_path_buf(),
            font_family: "LiberationSans".into(),
        };
        let outline = Outline {
            title: "Study".into(),
            mode: ExportMode::Summary,
            groups: Vec::new(),
        };
        let err = render(&outline, &config).expect_err("fonts missing");
        match err {
            ExportError::Fonts { family, .. } => assert_eq!(family, "LiberationSans"),
            other => panic!("unexpected error {other}"),
        }
    }
}
