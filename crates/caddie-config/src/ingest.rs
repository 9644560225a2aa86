//! CSV ingestion configuration.

use serde::{Deserialize, Serialize};

const fn default_flip_offline_sign() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IngestConfig {
    /// Negate the simulator's `Offline` column so right of target is negative.
    /// Turn off for exports that already use that convention.
    #[serde(default = "default_flip_offline_sign")]
    pub flip_offline_sign: bool,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            flip_offline_sign: default_flip_offline_sign(),
        }
    }
}
