use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use emporia_core::{
    AnalyticsSnapshot, MarketplaceUser, MetricKind, Subscription, SubscriptionStatus, SystemMetric,
    Tenant, TenantActivity, TenantId, TenantStatus, UsageMetric,
};
use emporia_store::error::StoreError;
use emporia_store::query::{ActivityQuery, MetricQuery};
use emporia_store::store::DashboardStore;

use crate::config::PostgresConfig;

/// Build `PgConnectOptions` from a [`PostgresConfig`], applying SSL settings
/// when configured.
pub(crate) fn build_connect_options(
    config: &PostgresConfig,
) -> Result<sqlx::postgres::PgConnectOptions, StoreError> {
    let mut options: sqlx::postgres::PgConnectOptions = config
        .url
        .parse()
        .map_err(|e: sqlx::Error| StoreError::Connection(e.to_string()))?;

    if let Some(ref mode) = config.ssl_mode {
        let ssl_mode = match mode.as_str() {
            "disable" => sqlx::postgres::PgSslMode::Disable,
            "prefer" => sqlx::postgres::PgSslMode::Prefer,
            "require" => sqlx::postgres::PgSslMode::Require,
            "verify-ca" => sqlx::postgres::PgSslMode::VerifyCa,
            "verify-full" => sqlx::postgres::PgSslMode::VerifyFull,
            other => {
                return Err(StoreError::Connection(format!("unknown ssl_mode: {other}")));
            }
        };
        options = options.ssl_mode(ssl_mode);
    }

    if let Some(ref path) = config.ssl_root_cert {
        options = options.ssl_root_cert(path);
    }

    if let Some(ref path) = config.ssl_cert {
        options = options.ssl_client_cert(path);
    }

    if let Some(ref path) = config.ssl_key {
        options = options.ssl_client_key(path);
    }

    Ok(options)
}

/// PostgreSQL-backed implementation of [`DashboardStore`].
///
/// Read-only: the table schema is owned by the hosted database service,
/// so no migrations run here. Nullable columns normalize to `Option`
/// fields (or documented numeric defaults) at this boundary.
pub struct PostgresDashboardStore {
    pool: PgPool,
    config: PostgresConfig,
}

impl PostgresDashboardStore {
    /// Connect to `PostgreSQL` and create the connection pool.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Connection`] if the URL is invalid or pool
    /// creation fails.
    pub async fn new(config: PostgresConfig) -> Result<Self, StoreError> {
        let connect_options = build_connect_options(&config)?;
        let pool = sqlx::postgres::PgPoolOptions::new()
            .max_connections(config.pool_size)
            .connect_with(connect_options)
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        Ok(Self { pool, config })
    }

    /// Create a store from an existing pool and config.
    #[must_use]
    pub fn from_pool(pool: PgPool, config: PostgresConfig) -> Self {
        Self { pool, config }
    }
}

type TenantRow = (
    String,                    // id
    Option<String>,            // company_name
    Option<String>,            // industry
    Option<String>,            // location
    Option<String>,            // status
    Option<String>,            // subscription_plan
    Option<DateTime<Utc>>,     // subscription_start_date
    Option<DateTime<Utc>>,     // subscription_end_date
    DateTime<Utc>,             // created_at
    Option<String>,            // template_id
);

type SubscriptionRow = (
    String,                // id
    String,                // tenant_id
    Option<String>,        // plan
    Option<f64>,           // price
    DateTime<Utc>,         // start_date
    DateTime<Utc>,         // end_date
    Option<String>,        // status
    Option<String>,        // payment_method
);

type SnapshotRow = (
    String,            // id
    String,            // tenant_id
    DateTime<Utc>,     // date
    Option<i64>,       // total_users
    Option<i64>,       // total_providers
    Option<i64>,       // total_buyers
    Option<i64>,       // total_requests
    Option<i64>,       // total_completed_requests
    Option<f64>,       // total_revenue
);

#[async_trait]
impl DashboardStore for PostgresDashboardStore {
    async fn tenants(&self) -> Result<Vec<Tenant>, StoreError> {
        let table = self.config.qualified("tenants");
        let query = format!(
            "SELECT id, company_name, industry, location, status, subscription_plan, \
             subscription_start_date, subscription_end_date, created_at, template_id \
             FROM {table} ORDER BY created_at DESC"
        );

        let rows: Vec<TenantRow> = sqlx::query_as(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        Ok(rows
            .into_iter()
            .map(
                |(id, company_name, industry, location, status, plan, start, end, created_at, template_id)| {
                    Tenant {
                        id: TenantId::from(id),
                        company_name,
                        industry,
                        location,
                        status: TenantStatus::parse_or_default(status.as_deref()),
                        plan: plan.unwrap_or_else(|| "trial".to_owned()),
                        subscription_start: start,
                        subscription_end: end,
                        created_at,
                        template_id,
                    }
                },
            )
            .collect())
    }

    async fn subscriptions(&self) -> Result<Vec<Subscription>, StoreError> {
        let table = self.config.qualified("subscriptions");
        let query = format!(
            "SELECT id, tenant_id, plan, price, start_date, end_date, status, payment_method \
             FROM {table} ORDER BY start_date ASC"
        );

        let rows: Vec<SubscriptionRow> = sqlx::query_as(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        Ok(rows
            .into_iter()
            .map(
                |(id, tenant_id, plan, price, start_date, end_date, status, payment_method)| {
                    Subscription {
                        id,
                        tenant_id: TenantId::from(tenant_id),
                        plan,
                        price: price.unwrap_or(0.0),
                        start_date,
                        end_date,
                        status: SubscriptionStatus::parse_or_default(status.as_deref()),
                        payment_method,
                    }
                },
            )
            .collect())
    }

    async fn analytics_snapshots(&self, limit: u32) -> Result<Vec<AnalyticsSnapshot>, StoreError> {
        let table = self.config.qualified("analytics");
        let query = format!(
            "SELECT id, tenant_id, date, total_users, total_providers, total_buyers, \
             total_requests, total_completed_requests, total_revenue \
             FROM {table} ORDER BY date DESC LIMIT $1"
        );

        let rows: Vec<SnapshotRow> = sqlx::query_as(&query)
            .bind(i64::from(limit))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        Ok(rows
            .into_iter()
            .map(
                |(id, tenant_id, date, users, providers, buyers, requests, completed, revenue)| {
                    AnalyticsSnapshot {
                        id,
                        tenant_id: TenantId::from(tenant_id),
                        date,
                        total_users: users.unwrap_or(0),
                        total_providers: providers.unwrap_or(0),
                        total_buyers: buyers.unwrap_or(0),
                        total_requests: requests.unwrap_or(0),
                        total_completed_requests: completed.unwrap_or(0),
                        total_revenue: revenue.unwrap_or(0.0),
                    }
                },
            )
            .collect())
    }

    async fn usage_metrics(&self, query: &MetricQuery) -> Result<Vec<UsageMetric>, StoreError> {
        let table = self.config.qualified("usage_metrics");
        let sql = format!(
            "SELECT id, metric_type, value, tenant_id, recorded_at FROM {table} \
             WHERE ($1::text IS NULL OR metric_type = $1) \
               AND ($2::text IS NULL OR tenant_id = $2) \
               AND ($3::timestamptz IS NULL OR recorded_at >= $3) \
               AND ($4::timestamptz IS NULL OR recorded_at <= $4) \
             ORDER BY recorded_at ASC LIMIT $5"
        );

        let rows: Vec<(String, Option<String>, Option<f64>, Option<String>, DateTime<Utc>)> =
            sqlx::query_as(&sql)
                .bind(query.kind.map(MetricKind::as_str))
                .bind(query.tenant.as_ref().map(ToString::to_string))
                .bind(query.from)
                .bind(query.to)
                .bind(i64::from(query.effective_limit()))
                .fetch_all(&self.pool)
                .await
                .map_err(|e| StoreError::Backend(e.to_string()))?;

        Ok(rows
            .into_iter()
            .map(|(id, kind, value, tenant_id, recorded_at)| UsageMetric {
                id,
                kind: MetricKind::parse_or_default(kind.as_deref()),
                value: value.unwrap_or(0.0),
                tenant_id: tenant_id.map(TenantId::from),
                recorded_at,
            })
            .collect())
    }

    async fn system_metrics(&self, query: &MetricQuery) -> Result<Vec<SystemMetric>, StoreError> {
        let table = self.config.qualified("system_metrics");
        let sql = format!(
            "SELECT id, tenant_id, error_rate, uptime, recorded_at FROM {table} \
             WHERE ($1::text IS NULL OR tenant_id = $1) \
               AND ($2::timestamptz IS NULL OR recorded_at >= $2) \
               AND ($3::timestamptz IS NULL OR recorded_at <= $3) \
             ORDER BY recorded_at ASC LIMIT $4"
        );

        let rows: Vec<(String, Option<String>, Option<f64>, Option<f64>, DateTime<Utc>)> =
            sqlx::query_as(&sql)
                .bind(query.tenant.as_ref().map(ToString::to_string))
                .bind(query.from)
                .bind(query.to)
                .bind(i64::from(query.effective_limit()))
                .fetch_all(&self.pool)
                .await
                .map_err(|e| StoreError::Backend(e.to_string()))?;

        Ok(rows
            .into_iter()
            .map(|(id, tenant_id, error_rate, uptime, recorded_at)| SystemMetric {
                id,
                tenant_id: tenant_id.map(TenantId::from),
                error_rate: error_rate.unwrap_or(0.0),
                uptime: uptime.unwrap_or(100.0),
                recorded_at,
            })
            .collect())
    }

    async fn latest_system_metric(
        &self,
        tenant: &TenantId,
    ) -> Result<Option<SystemMetric>, StoreError> {
        let table = self.config.qualified("system_metrics");
        let sql = format!(
            "SELECT id, tenant_id, error_rate, uptime, recorded_at FROM {table} \
             WHERE tenant_id = $1 ORDER BY recorded_at DESC LIMIT 1"
        );

        let row: Option<(String, Option<String>, Option<f64>, Option<f64>, DateTime<Utc>)> =
            sqlx::query_as(&sql)
                .bind(tenant.as_str())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| StoreError::Backend(e.to_string()))?;

        Ok(row.map(|(id, tenant_id, error_rate, uptime, recorded_at)| SystemMetric {
            id,
            tenant_id: tenant_id.map(TenantId::from),
            error_rate: error_rate.unwrap_or(0.0),
            uptime: uptime.unwrap_or(100.0),
            recorded_at,
        }))
    }

    async fn tenant_activities(
        &self,
        query: &ActivityQuery,
    ) -> Result<Vec<TenantActivity>, StoreError> {
        let table = self.config.qualified("tenant_activities");
        let sql = format!(
            "SELECT id, activity_type, user_id, created_at FROM {table} \
             WHERE ($1::timestamptz IS NULL OR created_at >= $1) \
             ORDER BY created_at DESC LIMIT $2"
        );

        let rows: Vec<(String, String, String, DateTime<Utc>)> = sqlx::query_as(&sql)
            .bind(query.from)
            .bind(i64::from(query.effective_limit()))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        Ok(rows
            .into_iter()
            .map(|(id, activity_type, user_id, occurred_at)| TenantActivity {
                id,
                activity_type,
                user_id: user_id.into(),
                occurred_at,
            })
            .collect())
    }

    async fn marketplace_users(&self) -> Result<Vec<MarketplaceUser>, StoreError> {
        let table = self.config.qualified("marketplace_users");
        let query = format!(
            "SELECT id, tenant_id, role, created_at FROM {table} ORDER BY created_at ASC"
        );

        let rows: Vec<(String, String, Option<String>, DateTime<Utc>)> = sqlx::query_as(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        Ok(rows
            .into_iter()
            .map(|(id, tenant_id, role, created_at)| MarketplaceUser {
                id: id.into(),
                tenant_id: TenantId::from(tenant_id),
                role,
                created_at,
            })
            .collect())
    }
}
