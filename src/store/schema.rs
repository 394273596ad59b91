use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const SCHEMA_VERSION: u32 = 1;

/// The one durable record: lifetime answer totals across every session,
/// overwritten wholesale after each answered problem.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProfileData {
    pub schema_version: u32,
    pub lifetime_correct: u64,
    pub lifetime_incorrect: u64,
    pub last_practiced: Option<DateTime<Utc>>,
}

impl Default for ProfileData {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            lifetime_correct: 0,
            lifetime_incorrect: 0,
            last_practiced: None,
        }
    }
}

impl ProfileData {
    /// Check if loaded data has a stale schema version and needs reset.
    pub fn needs_reset(&self) -> bool {
        self.schema_version != SCHEMA_VERSION
    }
}
