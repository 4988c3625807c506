use std::path::PathBuf;
use std::sync::Arc;

use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::errors::ServiceError;
use crate::ident;
use crate::mint::MintRecord;
use crate::storage::RecordStore;

/// Filesystem-backed record store: one pretty-printed JSON file per record,
/// named `<root>/<id>.json`.
///
/// Distinct ids map to distinct files, so concurrent writers need no mutual
/// exclusion; the only shared discipline is creating the root directory,
/// which is idempotent.
#[derive(Clone)]
pub struct FileRecordStore {
    root: PathBuf,
}

impl FileRecordStore {
    /// Initialize the store rooted at `root`, creating the directory if absent.
    pub async fn new<P: Into<PathBuf>>(root: P) -> Result<Arc<Self>, ServiceError> {
        let root = root.into();
        fs::create_dir_all(&root)
            .await
            .map_err(|e| ServiceError::Persistence(format!("cannot create {}: {e}", root.display())))?;
        Ok(Arc::new(Self { root }))
    }

    fn record_path(&self, id: &str) -> PathBuf {
        self.root.join(format!("{id}.json"))
    }
}

#[async_trait::async_trait]
impl RecordStore for FileRecordStore {
    async fn put(&self, record: &MintRecord) -> Result<(), ServiceError> {
        // Ids become file names; only well-formed ones may reach the path.
        // Ids are always generator-produced, so a malformed one is a store
        // invariant breach, not a caller mistake
        if !ident::is_valid_id(&record.id) {
            return Err(ServiceError::Persistence(format!("malformed record id: {}", record.id)));
        }

        let data = serde_json::to_vec_pretty(record)
            .map_err(|e| ServiceError::Persistence(e.to_string()))?;

        let path = self.record_path(&record.id);
        // create_new is the atomic create-if-absent: an occupied id is a
        // collision, surfaced instead of silently overwritten
        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::AlreadyExists {
                    ServiceError::collision(&record.id)
                } else {
                    ServiceError::Persistence(format!("cannot write {}: {e}", path.display()))
                }
            })?;
        file.write_all(&data)
            .await
            .map_err(|e| ServiceError::Persistence(format!("cannot write {}: {e}", path.display())))?;
        file.flush()
            .await
            .map_err(|e| ServiceError::Persistence(format!("cannot flush {}: {e}", path.display())))?;

        debug!(id = %record.id, path = %path.display(), "record persisted");
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Option<MintRecord>, ServiceError> {
        if !ident::is_valid_id(id) {
            return Ok(None);
        }
        match fs::read(self.record_path(id)).await {
            Ok(bytes) => {
                let record: MintRecord = serde_json::from_slice(&bytes)
                    .map_err(|e| ServiceError::Persistence(format!("corrupt record {id}: {e}")))?;
                Ok(Some(record))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(ServiceError::Persistence(format!("cannot read record {id}: {e}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use uuid::Uuid;

    fn tmp_root() -> PathBuf {
        std::env::temp_dir().join(format!("mint_store_{}", Uuid::new_v4()))
    }

    fn sample_record(id: &str) -> MintRecord {
        MintRecord {
            id: id.to_string(),
            owner: "alice".into(),
            metadata: json!({"name": "CryptoCat"}),
            time: 1_700_000_000_000,
        }
    }

    #[tokio::test]
    async fn put_then_get_round_trips() -> Result<(), anyhow::Error> {
        let root = tmp_root();
        let store = FileRecordStore::new(&root).await?;

        let record = sample_record("abcDEF123-");
        store.put(&record).await?;

        let loaded = store.get("abcDEF123-").await?.expect("record present");
        assert_eq!(loaded, record);

        // On-disk document carries the wire field names
        let raw = tokio::fs::read(root.join("abcDEF123-.json")).await?;
        let doc: serde_json::Value = serde_json::from_slice(&raw)?;
        assert_eq!(doc["id"], "abcDEF123-");
        assert_eq!(doc["owner"], "alice");
        assert_eq!(doc["metadata"]["name"], "CryptoCat");
        assert_eq!(doc["time"], 1_700_000_000_000i64);

        let _ = tokio::fs::remove_dir_all(&root).await;
        Ok(())
    }

    #[tokio::test]
    async fn duplicate_id_is_a_collision_not_an_overwrite() -> Result<(), anyhow::Error> {
        let root = tmp_root();
        let store = FileRecordStore::new(&root).await?;

        let first = sample_record("aaaaaaaaaa");
        store.put(&first).await?;

        let mut second = sample_record("aaaaaaaaaa");
        second.owner = "mallory".into();
        let err = store.put(&second).await.expect_err("collision expected");
        assert!(matches!(err, ServiceError::Persistence(_)));

        // Original record untouched
        let loaded = store.get("aaaaaaaaaa").await?.expect("record present");
        assert_eq!(loaded.owner, "alice");

        let _ = tokio::fs::remove_dir_all(&root).await;
        Ok(())
    }

    #[tokio::test]
    async fn malformed_ids_never_touch_the_filesystem() -> Result<(), anyhow::Error> {
        let root = tmp_root();
        let store = FileRecordStore::new(&root).await?;

        let record = sample_record("../escape!");
        assert!(matches!(store.put(&record).await, Err(ServiceError::Persistence(_))));
        assert!(store.get("../escape!").await?.is_none());

        let mut entries = tokio::fs::read_dir(&root).await?;
        assert!(entries.next_entry().await?.is_none());

        let _ = tokio::fs::remove_dir_all(&root).await;
        Ok(())
    }

    #[tokio::test]
    async fn get_missing_id_is_none() -> Result<(), anyhow::Error> {
        let root = tmp_root();
        let store = FileRecordStore::new(&root).await?;
        assert!(store.get("zzzzzzzzzz").await?.is_none());
        let _ = tokio::fs::remove_dir_all(&root).await;
        Ok(())
    }

    #[tokio::test]
    async fn store_reopens_over_existing_data() -> Result<(), anyhow::Error> {
        let root = tmp_root();
        {
            let store = FileRecordStore::new(&root).await?;
            store.put(&sample_record("0123456789")).await?;
        }
        // A fresh store over the same root sees the earlier record
        let reopened = FileRecordStore::new(&root).await?;
        assert!(reopened.get("0123456789").await?.is_some());
        let _ = tokio::fs::remove_dir_all(&root).await;
        Ok(())
    }
}
