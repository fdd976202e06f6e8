pub mod toml_config;

#[cfg(feature = "cli")]
use crate::core::ConfigProvider;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{validate_io_settings, validate_path, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "slcsp")]
#[command(about = "Find the second lowest cost Silver plan rate for a list of ZIP codes")]
pub struct CliConfig {
    #[arg(long, default_value = "zips.csv", help = "ZIP code to county and rate area mapping")]
    pub zips: String,

    #[arg(long, default_value = "plans.csv", help = "Health plan catalog")]
    pub plans: String,

    #[arg(long, default_value = "slcsp.csv", help = "ZIP codes to resolve")]
    pub slcsp: String,

    #[arg(long, default_value = ".", help = "Directory the input and output paths are relative to")]
    pub data_dir: String,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    #[arg(long, value_delimiter = ',', default_value = "csv")]
    pub output_formats: Vec<String>,

    #[arg(long, help = "Also print the result CSV to stdout")]
    pub stdout: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log phase timings and memory usage")]
    pub monitor: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn zips_file(&self) -> &str {
        &self.zips
    }

    fn plans_file(&self) -> &str {
        &self.plans
    }

    fn queries_file(&self) -> &str {
        &self.slcsp
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn output_formats(&self) -> &[String] {
        &self.output_formats
    }

    fn print_to_stdout(&self) -> bool {
        self.stdout
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_path("data_dir", &self.data_dir)?;
        validate_io_settings(
            &[
                ("zips", self.zips.as_str()),
                ("plans", self.plans.as_str()),
                ("slcsp", self.slcsp.as_str()),
            ],
            &self.output_path,
            &self.output_formats,
        )
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let config = CliConfig::parse_from(["slcsp"]);

        assert_eq!(config.zips_file(), "zips.csv");
        assert_eq!(config.plans_file(), "plans.csv");
        assert_eq!(config.queries_file(), "slcsp.csv");
        assert_eq!(config.output_formats(), &["csv".to_string()]);
        assert!(!config.print_to_stdout());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_cli_output_formats_list() {
        let config = CliConfig::parse_from(["slcsp", "--output-formats", "csv,json", "--stdout"]);

        assert!(config.wants_format("json"));
        assert!(config.wants_format("csv"));
        assert!(config.print_to_stdout());
    }

    #[test]
    fn test_cli_rejects_output_over_input() {
        let config = CliConfig::parse_from(["slcsp", "--output-path", "."]);
        assert!(config.validate().is_err());
    }
}
