use crate::config::toml_config::TomlConfig;
use crate::config::ReportSettings;
use crate::utils::error::Result;
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "org-report")]
#[command(about = "Builds a sorted department/manager CSV report from an organisation JSON document")]
pub struct CliConfig {
    /// Organisation document with `departments` and `employees` arrays
    #[arg(short, long)]
    pub input: Option<String>,

    /// Directory the report is written to
    #[arg(long)]
    pub output_dir: Option<String>,

    /// Report file name; the JSON rendering uses the same stem
    #[arg(long)]
    pub output_file: Option<String>,

    /// Output formats (csv, json)
    #[arg(long, value_delimiter = ',')]
    pub format: Vec<String>,

    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Print the CSV report to stdout instead of writing files
    #[arg(long)]
    pub stdout: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,
}

impl CliConfig {
    /// Loads the TOML file if one was given and applies command line overrides on top.
    pub fn into_settings(self) -> Result<ReportSettings> {
        let mut settings = match &self.config {
            Some(path) => ReportSettings::from(TomlConfig::from_file(path)?),
            None => ReportSettings::default(),
        };

        if let Some(input) = self.input {
            settings.input_path = Some(input);
        }
        if let Some(output_dir) = self.output_dir {
            settings.output_dir = output_dir;
        }
        if let Some(output_file) = self.output_file {
            settings.output_file = output_file;
        }
        if !self.format.is_empty() {
            settings.output_formats = self.format;
        }
        settings.verbose |= self.verbose;
        settings.json_logs |= self.json_logs;

        Ok(settings)
    }
}
