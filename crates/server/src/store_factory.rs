//! Builds the dashboard store backend selected by configuration.

use std::sync::Arc;

use tracing::info;

use emporia_store::DashboardStore;
use emporia_store_memory::MemoryDashboardStore;

use crate::config::StoreConfig;
use crate::error::ServerError;

/// Create the store backend named in `config.backend`.
///
/// # Errors
///
/// Returns [`ServerError::Config`] for unknown backends or missing
/// required settings, and [`ServerError::Store`] if the backend fails
/// to connect.
pub async fn create_store(config: &StoreConfig) -> Result<Arc<dyn DashboardStore>, ServerError> {
    match config.backend.as_str() {
        "memory" => {
            info!("using in-memory dashboard store");
            Ok(Arc::new(MemoryDashboardStore::new()))
        }
        #[cfg(feature = "postgres")]
        "postgres" => {
            let url = config.url.clone().ok_or_else(|| {
                ServerError::Config("store.url is required for the postgres backend".to_owned())
            })?;

            let mut pg = emporia_store_postgres::PostgresConfig {
                url,
                ..emporia_store_postgres::PostgresConfig::default()
            };
            if let Some(pool_size) = config.pool_size {
                pg.pool_size = pool_size;
            }
            if let Some(ref schema) = config.schema {
                pg.schema.clone_from(schema);
            }
            pg.ssl_mode.clone_from(&config.ssl_mode);
            pg.ssl_root_cert.clone_from(&config.ssl_root_cert);
            pg.ssl_cert.clone_from(&config.ssl_cert);
            pg.ssl_key.clone_from(&config.ssl_key);

            let store = emporia_store_postgres::PostgresDashboardStore::new(pg).await?;
            info!("using postgres dashboard store");
            Ok(Arc::new(store))
        }
        #[cfg(not(feature = "postgres"))]
        "postgres" => Err(ServerError::Config(
            "server was built without postgres support (enable the `postgres` feature)".to_owned(),
        )),
        other => Err(ServerError::Config(format!(
            "unknown store backend: {other}"
        ))),
    }
}
