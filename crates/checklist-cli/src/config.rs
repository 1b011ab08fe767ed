//! Layered settings: `checklist.toml`, then `CHECKLIST_*` variables, then flags.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use checklist_export::ExportConfig;
use checklist_store::DEFAULT_SHARE_BASE_URL;

pub const DEFAULT_CONFIG_FILE: &str = "checklist.toml";
pub const DEFAULT_STORE_DIR: &str = ".checklist";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Keys accepted in `checklist.toml`.
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub store_dir: Option<PathBuf>,
    pub fonts_dir: Option<PathBuf>,
    pub font_family: Option<String>,
    pub templates_dir: Option<PathBuf>,
    pub share_base_url: Option<String>,
    pub owner: Option<String>,
}

impl FileConfig {
    pub fn parse(path: &Path, contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Reads `path`; without an explicit path a missing default file is not an error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let (path, explicit) = match path {
            Some(path) => (path.to_path_buf(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
        };
        match fs::read_to_string(&path) {
            Ok(contents) => Self::parse(&path, &contents),
            Err(err) if !explicit && err.kind() == std::io::ErrorKind::NotFound => {
                Ok(Self::default())
            }
            Err(source) => Err(ConfigError::Read { path, source }),
        }
    }

    /// Overlays `CHECKLIST_*` variables read through `lookup`.
    fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        if let Some(value) = var("CHECKLIST_STORE_DIR") {
            self.store_dir = Some(value.into());
        }
        if let Some(value) = var("CHECKLIST_FONTS_DIR") {
            self.fonts_dir = Some(value.into());
        }
        if let Some(value) = var("CHECKLIST_TEMPLATES_DIR") {
            self.templates_dir = Some(value.into());
        }
        if let Some(value) = var("CHECKLIST_SHARE_URL") {
            self.share_base_url = Some(value);
        }
        if let Some(value) = var("CHECKLIST_OWNER") {
            self.owner = Some(value);
        }
    }
}

/// Values given on the command line.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub store_dir: Option<PathBuf>,
    pub fonts_dir: Option<PathBuf>,
    pub templates_dir: Option<PathBuf>,
    pub share_base_url: Option<String>,
    pub owner: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub store_dir: PathBuf,
    pub templates_dir: Option<PathBuf>,
    pub share_base_url: String,
    pub owner: Option<String>,
    pub export: ExportConfig,
}

impl Settings {
    pub fn resolve(
        mut file: FileConfig,
        lookup: impl Fn(&str) -> Option<String>,
        overrides: Overrides,
    ) -> Self {
        file.apply_env(lookup);
        let defaults = ExportConfig::default();
        Self {
            store_dir: overrides
                .store_dir
                .or(file.store_dir)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_STORE_DIR)),
            templates_dir: overrides.templates_dir.or(file.templates_dir),
            share_base_url: overrides
                .share_base_url
                .or(file.share_base_url)
                .unwrap_or_else(|| DEFAULT_SHARE_BASE_URL.to_string()),
            owner: overrides.owner.or(file.owner),
            export: ExportConfig {
                fonts_dir: overrides
                    .fonts_dir
                    .or(file.fonts_dir)
                    .unwrap_or(defaults.fonts_dir),
                font_family: file.font_family.unwrap_or(defaults.font_family),
            },
        }
    }

    pub fn load(config: Option<&Path>, overrides: Overrides) -> Result<Self, ConfigError> {
        let file = FileConfig::load(config)?;
        Ok(Self::resolve(file, |key| std::env::var(key).ok(), overrides))
    }
}
