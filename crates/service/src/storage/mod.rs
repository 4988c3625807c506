use crate::errors::ServiceError;
use crate::mint::MintRecord;

pub mod file_store;

/// Durable persistence seam for minted records, one unit per identifier.
///
/// The medium is an implementation detail; handlers and the issuance service
/// only see this trait, so a filesystem store can be swapped for a key-value
/// or object store without touching callers.
#[async_trait::async_trait]
pub trait RecordStore: Send + Sync {
    /// Persist a fully constructed record under its already-assigned id.
    /// Writing to an occupied id is a persistence error, never an overwrite.
    async fn put(&self, record: &MintRecord) -> Result<(), ServiceError>;

    /// Read back the record stored under `id`, if any.
    async fn get(&self, id: &str) -> Result<Option<MintRecord>, ServiceError>;
}
