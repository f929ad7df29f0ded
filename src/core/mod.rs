//! Core types and project scanning

pub mod scanner;
pub mod types;

pub use scanner::scan_project;
pub use types::*;
