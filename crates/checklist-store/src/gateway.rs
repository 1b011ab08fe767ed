//! Persistence gateway contract.

use async_trait::async_trait;

use checklist_spec::FormSnapshot;

use crate::record::{FormRecord, FormSummary, PublicLink, PublishedForm};

pub type Result<T> = std::result::Result<T, GatewayError>;

#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("form '{0}' not found")]
    NotFound(String),

    #[error("form '{id}' uses template '{stored}' but the snapshot uses '{supplied}'")]
    TemplateMismatch {
        id: String,
        stored: String,
        supplied: String,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The backing store refused or could not be reached.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Remote form storage.
///
/// Implementations are last-write-wins and never retry; callers log and
/// surface failures.
#[async_trait]
pub trait FormGateway: Send + Sync {
    /// Inserts a new active record owned by `owner`.
    async fn create(&self, owner: &str, snapshot: FormSnapshot) -> Result<FormRecord>;

    /// Replaces title and answers of an existing record.
    async fn update(&self, id: &str, snapshot: FormSnapshot) -> Result<FormRecord>;

    async fn get(&self, id: &str) -> Result<Option<FormRecord>>;

    /// Active records of `owner`, newest `updated_at` first.
    async fn list(&self, owner: &str) -> Result<Vec<FormSummary>>;

    async fn delete(&self, id: &str) -> Result<()>;

    /// Writes the snapshot, marks the record public and returns its link.
    async fn publish(&self, id: &str, snapshot: FormSnapshot, author: &str)
    -> Result<PublicLink>;

    async fn unpublish(&self, id: &str) -> Result<()>;

    /// Moves the record to `submitted`, which hides it from [`FormGateway::list`].
    async fn submit(&self, id: &str) -> Result<FormRecord>;

    /// `None` when the id is unknown or the form is not currently public.
    async fn fetch_public(&self, public_id: &str) -> Result<Option<PublishedForm>>;
}
