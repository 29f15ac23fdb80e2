pub mod config;
pub mod store;

pub use config::PostgresConfig;
pub use store::PostgresDashboardStore;
