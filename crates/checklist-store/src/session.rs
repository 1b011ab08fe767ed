//! Editing session: owns one form, debounces auto-saves and drives publishing.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use checklist_spec::{FormSnapshot, FormState, ModelError, Template};

use crate::gateway::{FormGateway, GatewayError};
use crate::record::FormRecord;
use crate::share::share_url;

pub const DEFAULT_AUTOSAVE_DELAY: Duration = Duration::from_secs(5);
pub const DEFAULT_SHARE_BASE_URL: &str = "http://localhost:5173/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub autosave_delay: Duration,
    pub share_base_url: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            autosave_delay: DEFAULT_AUTOSAVE_DELAY,
            share_base_url: DEFAULT_SHARE_BASE_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionMode {
    /// Nothing is ever persisted.
    Guest,
    /// Saves go to records owned by this user id.
    Owner(String),
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("guest forms cannot be saved or published")]
    GuestMode,
    #[error("form title must not be empty")]
    EmptyTitle,
    #[error("author name must not be empty")]
    EmptyAuthor,
    #[error("form has not been saved yet")]
    NotSaved,
    #[error(transparent)]
    Model(#[from] ModelError),
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

#[derive(Debug, Default)]
struct LinkState {
    record_id: Option<String>,
    public_id: Option<String>,
    is_public: bool,
}

pub struct FormSession {
    form: FormState,
    mode: SessionMode,
    gateway: Arc<dyn FormGateway>,
    config: SessionConfig,
    // Held across gateway calls so saves never interleave.
    link: Arc<Mutex<LinkState>>,
    pending: Option<JoinHandle<()>>,
}

impl FormSession {
    pub fn new(
        form: FormState,
        mode: SessionMode,
        gateway: Arc<dyn FormGateway>,
        config: SessionConfig,
    ) -> Self {
        Self {
            form,
            mode,
            gateway,
            config,
            link: Arc::new(Mutex::new(LinkState::default())),
            pending: None,
        }
    }

    /// Reopens a stored record for its owner.
    pub fn resume(
        record: FormRecord,
        template: Arc<Template>,
        gateway: Arc<dyn FormGateway>,
        config: SessionConfig,
    ) -> Result<Self, SessionError> {
        let form = FormState::from_snapshot(template, record.snapshot())?;
        let link = LinkState {
            record_id: Some(record.id),
            public_id: record.public_id,
            is_public: record.is_public,
        };
        Ok(Self {
            form,
            mode: SessionMode::Owner(record.user_id),
            gateway,
            config,
            link: Arc::new(Mutex::new(link)),
            pending: None,
        })
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn mode(&self) -> &SessionMode {
        &self.mode
    }

    pub fn is_guest(&self) -> bool {
        self.mode == SessionMode::Guest
    }

    pub async fn record_id(&self) -> Option<String> {
        self.link.lock().await.record_id.clone()
    }

    pub async fn is_public(&self) -> bool {
        self.link.lock().await.is_public
    }

    /// Share URL of the published view, if the form was ever published.
    pub async fn share_url(&self) -> Option<String> {
        let link = self.link.lock().await;
        link.public_id
            .as_deref()
            .map(|public_id| share_url(&self.config.share_base_url, public_id))
    }

    pub fn autosave_pending(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.form.set_title(title);
        self.schedule_autosave();
    }

    pub fn set_answer(
        &mut self,
        instance: usize,
        section_id: &str,
        question_id: &str,
        value: impl Into<String>,
    ) -> Result<(), SessionError> {
        self.form
            .set_answer(instance, section_id, question_id, value)?;
        self.schedule_autosave();
        Ok(())
    }

    pub fn add_instance(&mut self, section_id: &str) -> Result<usize, SessionError> {
        let count = self.form.add_instance(section_id)?;
        self.schedule_autosave();
        Ok(count)
    }

    pub fn remove_instance(&mut self, section_id: &str, index: usize) -> Result<bool, SessionError> {
        let removed = self.form.remove_instance(section_id, index)?;
        if removed {
            self.schedule_autosave();
        }
        Ok(removed)
    }

    /// Drops a pending auto-save that has not started yet.
    pub fn cancel_autosave(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    /// Re-arms the debounce timer with the current snapshot.
    fn schedule_autosave(&mut self) {
        let SessionMode::Owner(owner) = self.mode.clone() else {
            return;
        };
        self.cancel_autosave();

        let delay = self.config.autosave_delay;
        let gateway = Arc::clone(&self.gateway);
        let link = Arc::clone(&self.link);
        let snapshot = self.form.snapshot().clone();
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // Detached so a later edit cannot cancel a save already under way.
            tokio::spawn(async move {
                match persist(gateway.as_ref(), &link, &owner, snapshot).await {
                    Ok(record) => debug!(id = %record.id, revision = record.revision, "auto-saved"),
                    Err(SessionError::EmptyTitle) => debug!("auto-save skipped: empty title"),
                    Err(err) => warn!("auto-save failed: {}", err),
                }
            });
        }));
    }

    /// Saves immediately. A pending auto-save stays armed.
    pub async fn save_now(&self) -> Result<FormRecord, SessionError> {
        let SessionMode::Owner(owner) = &self.mode else {
            return Err(SessionError::GuestMode);
        };
        let result = persist(
            self.gateway.as_ref(),
            &self.link,
            owner,
            self.form.snapshot().clone(),
        )
        .await;
        match &result {
            Ok(record) => debug!(id = %record.id, revision = record.revision, "saved"),
            Err(SessionError::Gateway(err)) => warn!("save failed: {}", err),
            Err(_) => {}
        }
        result
    }

    /// Publishes the current snapshot under `author` and returns the share URL.
    ///
    /// An unsaved form is created first; re-publishing keeps the same link.
    pub async fn publish(&self, author: &str) -> Result<String, SessionError> {
        let SessionMode::Owner(owner) = &self.mode else {
            return Err(SessionError::GuestMode);
        };
        let author = author.trim();
        if author.is_empty() {
            return Err(SessionError::EmptyAuthor);
        }
        let snapshot = self.form.snapshot().clone();
        if snapshot.title.trim().is_empty() {
            return Err(SessionError::EmptyTitle);
        }

        let mut link = self.link.lock().await;
        let record_id = match &link.record_id {
            Some(id) => id.clone(),
            None => {
                let record = self
                    .gateway
                    .create(owner, snapshot.clone())
                    .await
                    .inspect_err(|err| warn!("create before publish failed: {}", err))?;
                link.record_id = Some(record.id.clone());
                record.id
            }
        };

        let public = self
            .gateway
            .publish(&record_id, snapshot, author)
            .await
            .inspect_err(|err| warn!(id = %record_id, "publish failed: {}", err))?;
        link.public_id = Some(public.public_id.clone());
        link.is_public = true;

        let url = share_url(&self.config.share_base_url, &public.public_id);
        info!(id = %record_id, public_id = %public.public_id, "form published");
        Ok(url)
    }

    pub async fn unpublish(&self) -> Result<(), SessionError> {
        if self.is_guest() {
            return Err(SessionError::GuestMode);
        }
        let mut link = self.link.lock().await;
        let record_id = link.record_id.clone().ok_or(SessionError::NotSaved)?;
        self.gateway
            .unpublish(&record_id)
            .await
            .inspect_err(|err| warn!(id = %record_id, "unpublish failed: {}", err))?;
        link.is_public = false;
        info!(id = %record_id, "form unpublished");
        Ok(())
    }

    /// Deletes the stored record and ends the session.
    pub async fn delete(mut self) -> Result<(), SessionError> {
        if self.is_guest() {
            return Err(SessionError::GuestMode);
        }
        self.cancel_autosave();
        let record_id = self
            .link
            .lock()
            .await
            .record_id
            .clone()
            .ok_or(SessionError::NotSaved)?;
        self.gateway
            .delete(&record_id)
            .await
            .inspect_err(|err| warn!(id = %record_id, "delete failed: {}", err))?;
        info!(id = %record_id, "form deleted");
        Ok(())
    }

    pub fn into_snapshot(mut self) -> FormSnapshot {
        self.cancel_autosave();
        self.form.snapshot().clone()
    }
}

impl Drop for FormSession {
    fn drop(&mut self) {
        self.cancel_autosave();
    }
}

async fn persist(
    gateway: &dyn FormGateway,
    link: &Mutex<LinkState>,
    owner: &str,
    snapshot: FormSnapshot,
) -> Result<FormRecord, SessionError> {
    if snapshot.title.trim().is_empty() {
        return Err(SessionError::EmptyTitle);
    }
    let mut link = link.lock().await;
    let record = match &link.record_id {
        Some(id) => gateway.update(id, snapshot).await?,
        None => {
            let record = gateway.create(owner, snapshot).await?;
            link.record_id = Some(record.id.clone());
            record
        }
    };
    Ok(record)
}
