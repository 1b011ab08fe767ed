//! Persisted form records and the write rules every gateway shares.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use checklist_spec::{FormData, FormSnapshot, default_template_id};

use crate::gateway::{GatewayError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FormStatus {
    #[default]
    Active,
    Submitted,
}

/// Durable form row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormRecord {
    pub id: String,
    pub user_id: String,
    pub title: String,
    #[serde(default = "default_template_id")]
    pub template_id: String,
    pub form_data: FormData,
    #[serde(default)]
    pub status: FormStatus,
    /// Minted on first publish and kept for the life of the record.
    #[serde(default)]
    pub public_id: Option<String>,
    #[serde(default)]
    pub is_public: bool,
    #[serde(default)]
    pub author_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Bumped on every write.
    #[serde(default)]
    pub revision: u64,
}

/// Dashboard row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormSummary {
    pub id: String,
    pub title: String,
    pub template_id: String,
    pub status: FormStatus,
    pub is_public: bool,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicLink {
    pub form_id: String,
    pub public_id: String,
}

/// What an anonymous viewer receives for a published form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublishedForm {
    pub public_id: String,
    pub title: String,
    pub template_id: String,
    pub author_name: Option<String>,
    pub form_data: FormData,
    pub updated_at: DateTime<Utc>,
}

impl PublishedForm {
    pub fn snapshot(&self) -> FormSnapshot {
        FormSnapshot {
            title: self.title.clone(),
            template_id: self.template_id.clone(),
            form_data: self.form_data.clone(),
        }
    }
}

impl FormRecord {
    pub fn new(owner: &str, snapshot: FormSnapshot) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            user_id: owner.to_string(),
            title: snapshot.title,
            template_id: snapshot.template_id,
            form_data: snapshot.form_data,
            status: FormStatus::Active,
            public_id: None,
            is_public: false,
            author_name: None,
            created_at: now,
            updated_at: now,
            revision: 1,
        }
    }

    pub fn snapshot(&self) -> FormSnapshot {
        FormSnapshot {
            title: self.title.clone(),
            template_id: self.template_id.clone(),
            form_data: self.form_data.clone(),
        }
    }

    pub fn summary(&self) -> FormSummary {
        FormSummary {
            id: self.id.clone(),
            title: self.title.clone(),
            template_id: self.template_id.clone(),
            status: self.status,
            is_public: self.is_public,
            updated_at: self.updated_at,
        }
    }

    pub fn published(&self) -> Option<PublishedForm> {
        if !self.is_public {
            return None;
        }
        let public_id = self.public_id.clone()?;
        Some(PublishedForm {
            public_id,
            title: self.title.clone(),
            template_id: self.template_id.clone(),
            author_name: self.author_name.clone(),
            form_data: self.form_data.clone(),
            updated_at: self.updated_at,
        })
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
        self.revision += 1;
    }

    /// Overwrites title and answers. The template is fixed at creation.
    pub(crate) fn apply_snapshot(&mut self, snapshot: FormSnapshot) -> Result<()> {
        if snapshot.template_id != self.template_id {
            return Err(GatewayError::TemplateMismatch {
                id: self.id.clone(),
                stored: self.template_id.clone(),
                supplied: snapshot.template_id,
            });
        }
        self.title = snapshot.title;
        self.form_data = snapshot.form_data;
        self.touch();
        Ok(())
    }

    pub(crate) fn publish(&mut self, snapshot: FormSnapshot, author: &str) -> Result<PublicLink> {
        self.apply_snapshot(snapshot)?;
        let public_id = self
            .public_id
            .get_or_insert_with(|| Uuid::new_v4().to_string())
            .clone();
        self.is_public = true;
        self.author_name = Some(author.trim().to_string());
        Ok(PublicLink {
            form_id: self.id.clone(),
            public_id,
        })
    }

    pub(crate) fn unpublish(&mut self) {
        self.is_public = false;
        self.touch();
    }

    pub(crate) fn submit(&mut self) {
        self.status = FormStatus::Submitted;
        self.touch();
    }
}

/// Active forms of one owner, most recently updated first.
pub(crate) fn owner_summaries<'a>(
    records: impl Iterator<Item = &'a FormRecord>,
    owner: &str,
) -> Vec<FormSummary> {
    let mut summaries = records
        .filter(|record| record.user_id == owner && record.status == FormStatus::Active)
        .map(FormRecord::summary)
        .collect::<Vec<_>>();
    summaries.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
    summaries
}
