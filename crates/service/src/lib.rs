//! Issuance and persistence layer for minted records.
//! - `ident` generates collision-resistant URL-safe identifiers.
//! - `storage` persists one durable unit per record, addressed by id.
//! - `mint` validates requests and ties the two together.

pub mod errors;
pub mod ident;
pub mod mint;
pub mod storage;
