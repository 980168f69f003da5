pub mod aggregate;
pub mod period;
pub mod report;
pub mod streak;

pub use report::StatsService;
