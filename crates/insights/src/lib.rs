pub mod cache;
pub mod refresh;
pub mod service;

pub use cache::{QueryCache, QueryKey};
pub use refresh::{spawn_refresh, RefreshHandle};
pub use service::InsightsService;
