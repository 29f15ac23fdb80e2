use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::TenantId;

/// Lifecycle state of a tenant account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum TenantStatus {
    /// Paying account in good standing.
    Active,
    /// Free trial period.
    Trial,
    /// Subscription lapsed.
    Expired,
    /// Deactivated by the operator or the tenant.
    Inactive,
    /// Signed up but not yet live.
    Onboarding,
}

impl TenantStatus {
    /// Whether this status counts toward churn.
    #[must_use]
    pub fn is_churned(self) -> bool {
        matches!(self, Self::Inactive | Self::Expired)
    }

    /// Parse a status string as stored by the hosted database.
    /// Unknown values normalize to `Active`, matching the dashboard's
    /// historical fallback.
    #[must_use]
    pub fn parse_or_default(raw: Option<&str>) -> Self {
        match raw.map(str::to_ascii_lowercase).as_deref() {
            Some("trial") => Self::Trial,
            Some("expired") => Self::Expired,
            Some("inactive") => Self::Inactive,
            Some("onboarding") => Self::Onboarding,
            _ => Self::Active,
        }
    }
}

/// A customer organization operating its own marketplace instance.
///
/// Normalized once at the store boundary: nullable columns become
/// `Option` fields and are never re-defaulted downstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Tenant {
    /// Unique tenant identifier.
    pub id: TenantId,
    /// Company display name.
    pub company_name: Option<String>,
    /// Industry category as a kebab-case slug (e.g. `health-tech`).
    pub industry: Option<String>,
    /// Free-text location (e.g. `USA`).
    pub location: Option<String>,
    /// Lifecycle status.
    pub status: TenantStatus,
    /// Subscription plan tag (e.g. `trial`, `basic`, `premium`).
    pub plan: String,
    /// Billing period start.
    pub subscription_start: Option<DateTime<Utc>>,
    /// Billing period end.
    pub subscription_end: Option<DateTime<Utc>>,
    /// When the tenant signed up.
    pub created_at: DateTime<Utc>,
    /// Storefront template reference; `Some` marks an active marketplace.
    pub template_id: Option<String>,
}

impl Tenant {
    /// Whether this tenant has a live marketplace (template applied).
    #[must_use]
    pub fn has_marketplace(&self) -> bool {
        self.template_id.is_some()
    }
}
