use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use emporia_core::{MetricKind, TenantId};

/// Query parameters for metric reads.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct MetricQuery {
    /// Filter by metric category.
    pub kind: Option<MetricKind>,
    /// Filter by tenant.
    pub tenant: Option<TenantId>,
    /// Only observations recorded at or after this time.
    pub from: Option<DateTime<Utc>>,
    /// Only observations recorded at or before this time.
    pub to: Option<DateTime<Utc>>,
    /// Maximum number of rows to return (default 500, max 1000).
    pub limit: Option<u32>,
}

impl MetricQuery {
    /// Return the effective limit, clamped to 1..=1000, defaulting to 500.
    #[must_use]
    pub fn effective_limit(&self) -> u32 {
        self.limit.unwrap_or(500).clamp(1, 1000)
    }
}

/// Query parameters for activity feed reads.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct ActivityQuery {
    /// Only activities at or after this time.
    pub from: Option<DateTime<Utc>>,
    /// Maximum number of rows to return (default 500, max 1000).
    pub limit: Option<u32>,
}

impl ActivityQuery {
    /// Return the effective limit, clamped to 1..=1000, defaulting to 500.
    #[must_use]
    pub fn effective_limit(&self) -> u32 {
        self.limit.unwrap_or(500).clamp(1, 1000)
    }
}
