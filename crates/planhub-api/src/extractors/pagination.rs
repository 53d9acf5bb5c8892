//! History list query parameters.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use planhub_core::types::pagination::PageRequest;

/// Query parameters for `GET /api/action-history`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryListParams {
    /// Maximum number of records to return (default: 50).
    pub limit: Option<i64>,
    /// Number of records to skip (default: 0).
    pub offset: Option<i64>,
    /// Restrict to one workspace.
    pub workspace_id: Option<Uuid>,
}

impl HistoryListParams {
    /// Converts to a `PageRequest`, applying the configured default limit.
    pub fn into_page_request(self, default_limit: i64) -> PageRequest {
        PageRequest::new(self.limit.unwrap_or(default_limit), self.offset.unwrap_or(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_applied() {
        let params = HistoryListParams {
            limit: None,
            offset: None,
            workspace_id: None,
        };
        let page = params.into_page_request(50);
        assert_eq!(page.limit(), 50);
        assert_eq!(page.offset(), 0);
    }

    #[test]
    fn test_explicit_values_clamped() {
        let params = HistoryListParams {
            limit: Some(-3),
            offset: Some(20),
            workspace_id: None,
        };
        let page = params.into_page_request(50);
        assert_eq!(page.limit(), 1);
        assert_eq!(page.offset(), 20);
    }
}
