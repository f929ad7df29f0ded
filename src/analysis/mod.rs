//! Usage analysis and heuristic scoring

pub mod activity;
pub mod imports;
pub mod score;
pub mod textual;
pub mod usage;

pub use score::{DependencyScore, DirectoryScore, Weights};
pub use usage::{DependencyTally, UsageEngine, UsageReport};
