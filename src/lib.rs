pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::cli::CliConfig;

pub use crate::adapters::storage::LocalStorage;
pub use crate::config::ReportSettings;
pub use crate::core::{etl::ReportEngine, generate_report, pipeline::ReportPipeline};
pub use crate::utils::error::{ReportError, Result};
