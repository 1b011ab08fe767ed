pub mod docx;
pub mod pdf;
pub mod text;

use std::path::PathBuf;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error};

use checklist_spec::{ExportMode, ExportOptions, FormSnapshot, Template, build_outline};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("snapshot uses template '{snapshot}' but '{template}' was supplied")]
    TemplateMismatch { snapshot: String, template: String },
    #[error("failed to load fonts '{family}' from {dir}: {message}")]
    Fonts {
        dir: PathBuf,
        family: String,
        message: String,
    },
    #[error("pdf rendering failed: {0}")]
    Pdf(String),
    #[error("docx packaging failed: {0}")]
    Docx(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    Pdf,
    Docx,
    Txt,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Pdf => "pdf",
            ExportFormat::Docx => "docx",
            ExportFormat::Txt => "txt",
        }
    }

    pub fn media_type(&self) -> &'static str {
        match self {
            ExportFormat::Pdf => "application/pdf",
            ExportFormat::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            ExportFormat::Txt => "text/plain;charset=utf-8",
        }
    }
}

/// Renderer settings that do not affect content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Directory holding the TrueType files of `font_family`.
    pub fonts_dir: PathBuf,
    /// Family prefix, e.g. `LiberationSans` for `LiberationSans-Regular.ttf`.
    pub font_family: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            fonts_dir: PathBuf::from("./fonts"),
            font_family: "LiberationSans".into(),
        }
    }
}

/// A fully rendered file, ready to be written or downloaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedDocument {
    pub file_name: String,
    pub media_type: &'static str,
    pub bytes: Vec<u8>,
}

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// `<title with whitespace runs as underscores>[_summary].<ext>`.
pub fn file_name(title: &str, mode: ExportMode, format: ExportFormat) -> String {
    let base = WHITESPACE.replace_all(title, "_");
    let suffix = match mode {
        ExportMode::Detailed => "",
        ExportMode::Summary => "_summary",
    };
    format!("{}{}.{}", base, suffix, format.extension())
}

/// Instance label as printed above its answers; summary labels end in `:`.
pub(crate) fn instance_heading(label: &str, mode: ExportMode) -> String {
    match mode {
        ExportMode::Detailed => label.to_string(),
        ExportMode::Summary => format!("{}:", label),
    }
}

/// Renders a snapshot into one of the supported file formats.
///
/// Either the whole document is produced or an error is returned.
pub fn export(
    format: ExportFormat,
    options: ExportOptions,
    template: &Template,
    snapshot: &FormSnapshot,
    config: &ExportConfig,
) -> Result<ExportedDocument, ExportError> {
    if snapshot.template_id != template.id {
        return Err(ExportError::TemplateMismatch {
            snapshot: snapshot.template_id.clone(),
            template: template.id.clone(),
        });
    }

    let outline = build_outline(template, snapshot, options);
    let rendered = match format {
        ExportFormat::Txt => Ok(text::render(&outline).into_bytes()),
        ExportFormat::Docx => docx::render(&outline),
        ExportFormat::Pdf => pdf::render(&outline, config),
    };

    match rendered {
        Ok(bytes) => {
            let file_name = file_name(&snapshot.title, options.mode, format);
            debug!(%file_name, size = bytes.len(), "export rendered");
            Ok(ExportedDocument {
                file_name,
                media_type: format.media_type(),
                bytes,
            })
        }
        Err(err) => {
            error!(format = format.extension(), "export failed: {}", err);
            Err(err)
        }
    }
}
