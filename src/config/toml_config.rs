use crate::core::ConfigProvider;
use crate::utils::error::{Result, SlcspError};
use crate::utils::validation::{
    validate_io_settings, validate_non_empty_string, validate_path, Validate,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub pipeline: PipelineConfig,
    pub input: InputConfig,
    pub output: OutputConfig,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    pub data_dir: Option<String>,
    pub zips: String,
    pub plans: String,
    pub slcsp: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: String,
    #[serde(default = "default_formats")]
    pub formats: Vec<String>,
    pub stdout: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
    pub log_level: Option<String>,
    pub log_format: Option<String>,
}

fn default_formats() -> Vec<String> {
    vec!["csv".to_string()]
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(SlcspError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| SlcspError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unset variables are left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| SlcspError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_non_empty_string("pipeline.name", &self.pipeline.name)?;
        validate_path("input.data_dir", self.data_dir())?;
        validate_io_settings(
            &[
                ("input.zips", self.input.zips.as_str()),
                ("input.plans", self.input.plans.as_str()),
                ("input.slcsp", self.input.slcsp.as_str()),
            ],
            &self.output.path,
            &self.output.formats,
        )?;

        if let Some(format) = self.log_format() {
            if !["compact", "json"].contains(&format) {
                return Err(SlcspError::InvalidConfigValueError {
                    field: "monitoring.log_format".to_string(),
                    value: format.to_string(),
                    reason: "Valid formats: compact, json".to_string(),
                });
            }
        }

        Ok(())
    }

    pub fn data_dir(&self) -> &str {
        self.input.data_dir.as_deref().unwrap_or(".")
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }

    pub fn log_level(&self) -> Option<&str> {
        self.monitoring.as_ref().and_then(|m| m.log_level.as_deref())
    }

    pub fn log_format(&self) -> Option<&str> {
        self.monitoring.as_ref().and_then(|m| m.log_format.as_deref())
    }
}

impl ConfigProvider for TomlConfig {
    fn zips_file(&self) -> &str {
        &self.input.zips
    }

    fn plans_file(&self) -> &str {
        &self.input.plans
    }

    fn queries_file(&self) -> &str {
        &self.input.slcsp
    }

    fn output_path(&self) -> &str {
        &self.output.path
    }

    fn output_formats(&self) -> &[String] {
        &self.output.formats
    }

    fn print_to_stdout(&self) -> bool {
        self.output.stdout.unwrap_or(false)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const BASIC: &str = r#"
[pipeline]
name = "slcsp-test"

[input]
zips = "zips.csv"
plans = "plans.csv"
slcsp = "slcsp.csv"

[output]
path = "./out"
"#;

    #[test]
    fn test_parse_basic_toml_config() {
        let config = TomlConfig::from_toml_str(BASIC).unwrap();

        assert_eq!(config.pipeline.name, "slcsp-test");
        assert_eq!(config.zips_file(), "zips.csv");
        assert_eq!(config.data_dir(), ".");
        assert_eq!(config.output_formats(), &["csv".to_string()]);
        assert!(!config.print_to_stdout());
        assert!(!config.monitoring_enabled());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("SLCSP_TEST_DATA_DIR", "/srv/marketplace");

        let toml_content = r#"
[pipeline]
name = "env"

[input]
data_dir = "${SLCSP_TEST_DATA_DIR}"
zips = "zips.csv"
plans = "plans.csv"
slcsp = "slcsp.csv"

[output]
path = "${SLCSP_TEST_UNSET_VAR}/out"
formats = ["csv", "json"]

[monitoring]
enabled = true
log_format = "json"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.data_dir(), "/srv/marketplace");
        assert_eq!(config.output_path(), "${SLCSP_TEST_UNSET_VAR}/out");
        assert!(config.wants_format("json"));
        assert!(config.monitoring_enabled());
        assert_eq!(config.log_format(), Some("json"));

        std::env::remove_var("SLCSP_TEST_DATA_DIR");
    }

    #[test]
    fn test_config_validation() {
        let toml_content = r#"
[pipeline]
name = "bad"

[input]
zips = "zips.xlsx"
plans = "plans.csv"
slcsp = "slcsp.csv"

[output]
path = "./out"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_section_is_config_error() {
        let err = TomlConfig::from_toml_str("[pipeline]\nname = \"x\"\n").unwrap_err();
        assert!(matches!(err, SlcspError::ConfigValidationError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(BASIC.as_bytes()).unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.pipeline.name, "slcsp-test");
    }
}
