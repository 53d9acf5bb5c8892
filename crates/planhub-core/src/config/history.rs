//! Action history configuration.

use serde::{Deserialize, Serialize};

/// Fallback retention cap when no configuration is provided.
pub const DEFAULT_RETENTION_LIMIT: i64 = 100;

/// Action history engine settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// Maximum number of action records retained per user.
    #[serde(default = "default_retention_limit")]
    pub retention_limit: i64,
    /// Default page size for history listings.
    #[serde(default = "default_list_limit")]
    pub default_list_limit: i64,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            retention_limit: default_retention_limit(),
            default_list_limit: default_list_limit(),
        }
    }
}

fn default_retention_limit() -> i64 {
    DEFAULT_RETENTION_LIMIT
}

fn default_list_limit() -> i64 {
    50
}
