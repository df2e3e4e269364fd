//! Application layer - Use cases and orchestration

pub mod init;
pub mod insights;

pub use insights::InsightsService;
