//! In-process gateway for tests and guest previews.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use checklist_spec::FormSnapshot;

use crate::gateway::{FormGateway, GatewayError, Result};
use crate::record::{FormRecord, FormSummary, PublicLink, PublishedForm, owner_summaries};

#[derive(Debug, Default)]
pub struct InMemoryGateway {
    records: Mutex<BTreeMap<String, FormRecord>>,
    offline: AtomicBool,
}

impl InMemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// While offline every call fails with [`GatewayError::Unavailable`].
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn check_online(&self) -> Result<()> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(GatewayError::Unavailable("in-memory store is offline".into()));
        }
        Ok(())
    }

    pub async fn len(&self) -> usize {
        self.records.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.lock().await.is_empty()
    }
}

#[async_trait]
impl FormGateway for InMemoryGateway {
    async fn create(&self, owner: &str, snapshot: FormSnapshot) -> Result<FormRecord> {
        self.check_online()?;
        let record = FormRecord::new(owner, snapshot);
        self.records
            .lock()
            .await
            .insert(record.id.clone(), record.clone());
        Ok(record)
    }

    async fn update(&self, id: &str, snapshot: FormSnapshot) -> Result<FormRecord> {
        self.check_online()?;
        let mut records = self.records.lock().await;
        let record = records
            .get_mut(id)
            .ok_or_else(|| GatewayError::NotFound(id.to_string()))?;
        record.apply_snapshot(snapshot)?;
        Ok(record.clone())
    }

    async fn get(&self, id: &str) -> Result<Option<FormRecord>> {
        self.check_online()?;
        Ok(self.records.lock().await.get(id).cloned())
    }

    async fn list(&self, owner: &str) -> Result<Vec<FormSummary>> {
        self.check_online()?;
        Ok(owner_summaries(self.records.lock().await.values(), owner))
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.check_online()?;
        self.records
            .lock()
            .await
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| GatewayError::NotFound(id.to_string()))
    }

    async fn publish(
        &self,
        id: &str,
        snapshot: FormSnapshot,
        author: &str,
    ) -> Result<PublicLink> {
        self.check_online()?;
        let mut records = self.records.lock().await;
        let record = records
            .get_mut(id)
            .ok_or_else(|| GatewayError::NotFound(id.to_string()))?;
        record.publish(snapshot, author)
    }

    async fn unpublish(&self, id: &str) -> Result<()> {
        self.check_online()?;
        let mut records = self.records.lock().await;
        let record = records
            .get_mut(id)
            .ok_or_else(|| GatewayError::NotFound(id.to_string()))?;
        record.unpublish();
        Ok(())
    }

    async fn submit(&self, id: &str) -> Result<FormRecord> {
        self.check_online()?;
        let mut records = self.records.lock().await;
        let record = records
            .get_mut(id)
            .ok_or_else(|| GatewayError::NotFound(id.to_string()))?;
        record.submit();
        Ok(record.clone())
    }

    async fn fetch_public(&self, public_id: &str) -> Result<Option<PublishedForm>> {
        self.check_online()?;
        Ok(self
            .records
            .lock()
            .await
            .values()
            .find(|record| record.public_id.as_deref() == Some(public_id))
            .and_then(FormRecord::published))
    }
}
