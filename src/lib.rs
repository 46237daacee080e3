pub mod args;
pub mod cloudflare;
pub mod config;
pub mod error;
pub mod query;
pub mod readme;
pub mod render;
pub mod stats;
pub mod update;
pub mod utils;

pub use args::Args;
pub use config::Config;
pub use error::Error;
pub use stats::{DailyMetric, PeriodSummary, TrafficStats};
pub use update::{print_update_results, update_readme, UpdateResult};
