pub mod analysis;
pub mod config;
pub mod core;
pub mod format;
pub mod fs;
pub mod interactive;
pub mod manifest;
pub mod registry;
pub mod runner;

// Re-export key items for convenience
pub use analysis::{DependencyScore, DirectoryScore, UsageEngine, Weights};
pub use config::HeftConfig;
pub use core::{AnalysisReport, ProjectReport};
pub use registry::Registry;
pub use runner::{run_analysis, run_analyze};
