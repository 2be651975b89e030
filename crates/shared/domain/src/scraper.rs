//! Payloads exchanged with the scraper process.

use serde::{Deserialize, Serialize};

/// Lifecycle state reported by the scraper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum ScraperStatus {
    Started,
    Running,
    Idle,
    Success,
    Failed,
}

/// Body of the status and trigger endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ScraperState {
    pub status: ScraperStatus,
}

/// Body of the health endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ScraperHealth {
    #[cfg_attr(feature = "openapi", schema(example = "healthy"))]
    pub state: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_uses_variant_names() {
        let state: ScraperState = serde_json::from_str(r#"{"status":"Running"}"#).unwrap();
        assert_eq!(state.status, ScraperStatus::Running);

        let json = serde_json::to_string(&ScraperState { status: ScraperStatus::Idle }).unwrap();
        assert_eq!(json, r#"{"status":"Idle"}"#);
    }

    #[test]
    fn test_unknown_status_rejected() {
        assert!(serde_json::from_str::<ScraperState>(r#"{"status":"Sleeping"}"#).is_err());
    }
}
