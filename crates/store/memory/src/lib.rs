pub mod store;

pub use store::MemoryDashboardStore;
