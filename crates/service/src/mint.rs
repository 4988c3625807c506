use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::errors::ServiceError;
use crate::ident::IdGenerator;
use crate::storage::RecordStore;

/// An issued record. Immutable once persisted: the system defines no update
/// or delete operation at any layer.
/// - `id`: store-assigned, 10-char URL-safe string
/// - `owner`: caller-supplied, non-empty
/// - `metadata`: caller-supplied opaque JSON, non-null and non-empty
/// - `time`: epoch milliseconds at creation
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct MintRecord {
    pub id: String,
    pub owner: String,
    pub metadata: Value,
    pub time: i64,
}

/// Inbound issuance payload. Both fields are optional at the wire level so
/// absent, null, and empty inputs are all representable and all rejected.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MintRequest {
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub metadata: Option<Value>,
}

impl MintRequest {
    /// Boundary validation; the reference contract has a single message for
    /// every missing-field shape.
    pub fn validate(&self) -> Result<(&str, &Value), ServiceError> {
        let owner = self
            .owner
            .as_deref()
            .filter(|o| !o.trim().is_empty())
            .ok_or_else(|| ServiceError::Validation("owner & metadata required".into()))?;
        let metadata = self
            .metadata
            .as_ref()
            .filter(|m| !m.is_null() && m.as_str().map_or(true, |s| !s.trim().is_empty()))
            .ok_or_else(|| ServiceError::Validation("owner & metadata required".into()))?;
        Ok((owner, metadata))
    }
}

/// Issuance service: validates, assigns an identifier, stamps the creation
/// time, and hands the record to the store. Exactly one durable write per
/// successful call; a failed write discards the generated id.
#[derive(Clone)]
pub struct MintService {
    store: Arc<dyn RecordStore>,
    ids: IdGenerator,
}

impl MintService {
    pub fn new(store: Arc<dyn RecordStore>) -> Arc<Self> {
        Arc::new(Self { store, ids: IdGenerator })
    }

    pub async fn issue(&self, request: MintRequest) -> Result<MintRecord, ServiceError> {
        let (owner, metadata) = request.validate()?;

        let record = MintRecord {
            id: self.ids.generate(),
            owner: owner.to_string(),
            metadata: metadata.clone(),
            time: Utc::now().timestamp_millis(),
        };

        // No retry: on failure the caller resubmits and gets a fresh id
        self.store.put(&record).await?;
        info!(id = %record.id, owner = %record.owner, "record minted");
        Ok(record)
    }

    /// Read back a previously issued record. Not bound to an HTTP route, but
    /// part of the storage contract.
    pub async fn fetch(&self, id: &str) -> Result<Option<MintRecord>, ServiceError> {
        self.store.get(id).await
    }
}
