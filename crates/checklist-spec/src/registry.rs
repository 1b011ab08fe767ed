use std::fs;
use std::path::Path;
use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use crate::spec::template::Template;

pub const DEFAULT_TEMPLATE_ID: &str = "ai-disclosure";

const BUILTIN_TEMPLATES: &[(&str, &str)] = &[
    (
        "ai_disclosure.json",
        include_str!("../templates/ai_disclosure.json"),
    ),
    (
        "aapor_transparency.json",
        include_str!("../templates/aapor_transparency.json"),
    ),
];

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("failed to parse template {name}: {source}")]
    Parse {
        name: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to read template directory: {0}")]
    Io(#[from] std::io::Error),
    #[error("template '{0}' is registered twice")]
    Duplicate(String),
}

/// Read-only catalogue of templates.
#[derive(Debug, Clone, Default)]
pub struct TemplateRegistry {
    templates: Vec<Arc<Template>>,
}

impl TemplateRegistry {
    /// Registry holding the templates shipped with the crate.
    pub fn builtin() -> Result<Self, TemplateError> {
        let mut registry = Self::default();
        for (name, source) in BUILTIN_TEMPLATES {
            registry.insert(parse_template(name, source)?)?;
        }
        Ok(registry)
    }

    pub fn from_templates(templates: Vec<Template>) -> Result<Self, TemplateError> {
        let mut registry = Self::default();
        for template in templates {
            registry.insert(template)?;
        }
        Ok(registry)
    }

    /// Adds every `*.json` template found directly inside `dir`.
    pub fn load_dir(&mut self, dir: &Path) -> Result<usize, TemplateError> {
        let mut paths = fs::read_dir(dir)?
            .filter_map(|entry| entry.ok().map(|entry| entry.path()))
            .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
            .collect::<Vec<_>>();
        paths.sort();

        for path in &paths {
            let source = fs::read_to_string(path)?;
            let template = parse_template(&path.display().to_string(), &source)?;
            debug!(template = %template.id, path = %path.display(), "loaded custom template");
            self.insert(template)?;
        }
        Ok(paths.len())
    }

    fn insert(&mut self, template: Template) -> Result<(), TemplateError> {
        if self.get(&template.id).is_some() {
            return Err(TemplateError::Duplicate(template.id));
        }
        self.templates.push(Arc::new(template));
        Ok(())
    }

    pub fn get(&self, template_id: &str) -> Option<Arc<Template>> {
        self.templates
            .iter()
            .find(|template| template.id == template_id)
            .cloned()
    }

    /// Looks up `template_id`, or the default template when none is given.
    pub fn get_or_default(&self, template_id: Option<&str>) -> Option<Arc<Template>> {
        self.get(template_id.unwrap_or(DEFAULT_TEMPLATE_ID))
    }

    pub fn list(&self) -> &[Arc<Template>] {
        &self.templates
    }
}

fn parse_template(name: &str, source: &str) -> Result<Template, TemplateError> {
    serde_json::from_str(source).map_err(|source| TemplateError::Parse {
        name: name.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_registry_lists_both_templates() {
        let registry = TemplateRegistry::builtin().expect("registry");
        let ids: Vec<_> = registry.list().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["ai-disclosure", "aapor-transparency"]);
        assert_eq!(
            registry.get_or_default(None).map(|t| t.id.clone()),
            Some(DEFAULT_TEMPLATE_ID.to_string())
        );
        assert!(registry.get("missing").is_none());
    }

    #[test]
    fn load_dir_rejects_duplicate_ids() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(
            dir.path().join("copy.json"),
            include_str!("../templates/ai_disclosure.json"),
        )
        .expect("write");
        let mut registry = TemplateRegistry::builtin().expect("registry");
        let err = registry.load_dir(dir.path()).expect_err("duplicate");
        assert!(matches!(err, TemplateError::Duplicate(id) if id == "ai-disclosure"));
    }

    #[test]
    fn load_dir_adds_custom_templates() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(
            dir.path().join("custom.json"),
            r#"{
                "id": "custom",
                "name": "Custom",
                "version": "0.1.0",
                "instance_noun": "Entry",
                "sections": [],
                "section_groups": []
            }"#,
        )
        .expect("write");
        fs::write(dir.path().join("notes.txt"), "ignored").expect("write");
        let mut registry = TemplateRegistry::builtin().expect("registry");
        assert_eq!(registry.load_dir(dir.path()).expect("load"), 1);
        let custom = registry.get("custom").expect("custom");
        assert_eq!(custom.add_instance_label(), "+ Add Another Entry");
    }
}
