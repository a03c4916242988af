#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::core::pipeline::{FORMAT_CSV, FORMAT_JSON};
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_allowed_values, validate_file_extension, validate_path, validate_required_field,
    Validate,
};
use toml_config::TomlConfig;

pub const DEFAULT_OUTPUT_DIR: &str = "./output";
pub const DEFAULT_OUTPUT_FILE: &str = "report.csv";
pub const ALLOWED_FORMATS: [&str; 2] = [FORMAT_CSV, FORMAT_JSON];

/// Effective settings after merging the optional TOML file with command line overrides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportSettings {
    pub input_path: Option<String>,
    pub output_dir: String,
    pub output_file: String,
    pub output_formats: Vec<String>,
    pub verbose: bool,
    pub json_logs: bool,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            input_path: None,
            output_dir: DEFAULT_OUTPUT_DIR.to_string(),
            output_file: DEFAULT_OUTPUT_FILE.to_string(),
            output_formats: vec![FORMAT_CSV.to_string()],
            verbose: false,
            json_logs: false,
        }
    }
}

impl From<TomlConfig> for ReportSettings {
    fn from(config: TomlConfig) -> Self {
        let defaults = Self::default();
        Self {
            input_path: config.input.path,
            output_dir: config.output.dir.unwrap_or(defaults.output_dir),
            output_file: config.output.file.unwrap_or(defaults.output_file),
            output_formats: config.output.formats.unwrap_or(defaults.output_formats),
            verbose: config.logging.verbose.unwrap_or(defaults.verbose),
            json_logs: config.logging.json.unwrap_or(defaults.json_logs),
        }
    }
}

impl Validate for ReportSettings {
    fn validate(&self) -> Result<()> {
        let input_path = validate_required_field("input", &self.input_path)?;
        validate_path("input", input_path)?;
        validate_path("output_dir", &self.output_dir)?;
        validate_path("output_file", &self.output_file)?;
        validate_file_extension("output_file", &self.output_file, &[FORMAT_CSV])?;
        validate_allowed_values("format", &self.output_formats, &ALLOWED_FORMATS)?;
        Ok(())
    }
}

impl ConfigProvider for ReportSettings {
    fn input_path(&self) -> &str {
        self.input_path.as_deref().unwrap_or_default()
    }

    fn output_dir(&self) -> &str {
        &self.output_dir
    }

    fn output_file(&self) -> &str {
        &self.output_file
    }

    fn output_formats(&self) -> &[String] {
        &self.output_formats
    }
}
