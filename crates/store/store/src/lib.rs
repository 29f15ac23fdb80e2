pub mod error;
pub mod query;
pub mod store;

pub use error::StoreError;
pub use query::{ActivityQuery, MetricQuery};
pub use store::DashboardStore;
