use serde::{Deserialize, Serialize};

/// Liveness payload returned by `GET /health`. Static, no dependency checks.
#[derive(Serialize, Deserialize, Debug)]
pub struct Health {
    pub status: &'static str,
    pub service: &'static str,
}
