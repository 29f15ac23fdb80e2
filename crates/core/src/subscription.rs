use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::TenantId;

/// Billing state of a subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    Active,
    Trial,
    Failed,
}

impl SubscriptionStatus {
    /// Parse a status string as stored by the hosted database.
    #[must_use]
    pub fn parse_or_default(raw: Option<&str>) -> Self {
        match raw.map(str::to_ascii_lowercase).as_deref() {
            Some("trial") => Self::Trial,
            Some("failed") => Self::Failed,
            _ => Self::Active,
        }
    }
}

/// A tenant's billing subscription.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Subscription {
    /// Unique subscription identifier.
    pub id: String,
    /// Owning tenant.
    pub tenant_id: TenantId,
    /// Plan tag; `None` when the row carries no plan.
    pub plan: Option<String>,
    /// Monthly price. Missing prices normalize to 0.
    pub price: f64,
    /// Billing period start.
    pub start_date: DateTime<Utc>,
    /// Billing period end.
    pub end_date: DateTime<Utc>,
    /// Billing state.
    pub status: SubscriptionStatus,
    /// Payment method label, when captured.
    pub payment_method: Option<String>,
}
