use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{TenantId, UserId};

/// An end user registered on a tenant's marketplace.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct MarketplaceUser {
    /// Unique user identifier.
    pub id: UserId,
    /// Tenant whose marketplace the user belongs to.
    pub tenant_id: TenantId,
    /// Role on the marketplace (e.g. `buyer`, `provider`).
    pub role: Option<String>,
    /// When the user registered.
    pub created_at: DateTime<Utc>,
}
