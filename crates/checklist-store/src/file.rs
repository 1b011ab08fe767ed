//! JSON file gateway.
//!
//! Stores one pretty-printed JSON document per record under `<root>/forms/`.
//! A process-local lock serialises read-modify-write cycles; concurrent
//! processes are last-write-wins.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::fs;
use tokio::sync::Mutex;
use tracing::debug;
use uuid::Uuid;

use checklist_spec::FormSnapshot;

use crate::gateway::{FormGateway, GatewayError, Result};
use crate::record::{FormRecord, FormSummary, PublicLink, PublishedForm, owner_summaries};

pub struct JsonFileGateway {
    root: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileGateway {
    /// Opens (and creates if needed) a store rooted at `root`.
    pub async fn open(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(root.join("forms")).await?;
        Ok(Self {
            root,
            write_lock: Mutex::new(()),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Record ids are uuids; anything else cannot name a stored file.
    fn record_path(&self, id: &str) -> Option<PathBuf> {
        Uuid::parse_str(id)
            .ok()
            .map(|uuid| self.root.join("forms").join(format!("{}.json", uuid)))
    }

    async fn load(&self, id: &str) -> Result<Option<FormRecord>> {
        match self.record_path(id) {
            Some(path) => read_json(&path).await,
            None => Ok(None),
        }
    }

    async fn load_existing(&self, id: &str) -> Result<FormRecord> {
        self.load(id)
            .await?
            .ok_or_else(|| GatewayError::NotFound(id.to_string()))
    }

    async fn store(&self, record: &FormRecord) -> Result<()> {
        let path = self
            .record_path(&record.id)
            .ok_or_else(|| GatewayError::NotFound(record.id.clone()))?;
        write_json(&path, record).await?;
        debug!(id = %record.id, revision = record.revision, "record written");
        Ok(())
    }

    async fn all(&self) -> Result<Vec<FormRecord>> {
        list_dir(&self.root.join("forms")).await
    }
}

#[async_trait]
impl FormGateway for JsonFileGateway {
    async fn create(&self, owner: &str, snapshot: FormSnapshot) -> Result<FormRecord> {
        let _guard = self.write_lock.lock().await;
        let record = FormRecord::new(owner, snapshot);
        self.store(&record).await?;
        Ok(record)
    }

    async fn update(&self, id: &str, snapshot: FormSnapshot) -> Result<FormRecord> {
        let _guard = self.write_lock.lock().await;
        let mut record = self.load_existing(id).await?;
        record.apply_snapshot(snapshot)?;
        self.store(&record).await?;
        Ok(record)
    }

    async fn get(&self, id: &str) -> Result<Option<FormRecord>> {
        self.load(id).await
    }

    async fn list(&self, owner: &str) -> Result<Vec<FormSummary>> {
        let records = self.all().await?;
        Ok(owner_summaries(records.iter(), owner))
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let path = self
            .record_path(id)
            .ok_or_else(|| GatewayError::NotFound(id.to_string()))?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(GatewayError::NotFound(id.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn publish(
        &self,
        id: &str,
        snapshot: FormSnapshot,
        author: &str,
    ) -> Result<PublicLink> {
        let _guard = self.write_lock.lock().await;
        let mut record = self.load_existing(id).await?;
        let link = record.publish(snapshot, author)?;
        self.store(&record).await?;
        Ok(link)
    }

    async fn unpublish(&self, id: &str) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut record = self.load_existing(id).await?;
        record.unpublish();
        self.store(&record).await
    }

    async fn submit(&self, id: &str) -> Result<FormRecord> {
        let _guard = self.write_lock.lock().await;
        let mut record = self.load_existing(id).await?;
        record.submit();
        self.store(&record).await?;
        Ok(record)
    }

    async fn fetch_public(&self, public_id: &str) -> Result<Option<PublishedForm>> {
        Ok(self
            .all()
            .await?
            .iter()
            .find(|record| record.public_id.as_deref() == Some(public_id))
            .and_then(FormRecord::published))
    }
}

async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    match fs::read_to_string(path).await {
        Ok(json) => Ok(Some(serde_json::from_str(&json)?)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Writes through a sibling temp file so readers never see a torn record.
async fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json.as_bytes()).await?;
    fs::rename(&tmp, path).await?;
    Ok(())
}

async fn list_dir<T: DeserializeOwned>(dir: &Path) -> Result<Vec<T>> {
    let mut items = Vec::new();
    let mut rd = fs::read_dir(dir).await?;
    while let Some(entry) = rd.next_entry().await? {
        if entry.path().extension().and_then(|s| s.to_str()) != Some("json") {
            continue;
        }
        match read_json(&entry.path()).await {
            Ok(Some(item)) => items.push(item),
            Ok(None) => {}
            Err(err) => debug!(path = %entry.path().display(), "skipping unreadable record: {}", err),
        }
    }
    Ok(items)
}
