use thiserror::Error;

#[derive(Error, Debug)]
pub enum SlcspError {
    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid record in {file} at line {line}: {message}")]
    InvalidRecordError {
        file: String,
        line: u64,
        message: String,
    },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Input,
    Processing,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl SlcspError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            SlcspError::ConfigError { .. }
            | SlcspError::ConfigValidationError { .. }
            | SlcspError::InvalidConfigValueError { .. }
            | SlcspError::MissingConfigError { .. } => ErrorCategory::Configuration,
            SlcspError::CsvError(_) | SlcspError::InvalidRecordError { .. } => ErrorCategory::Input,
            SlcspError::SerializationError(_) | SlcspError::ProcessingError { .. } => {
                ErrorCategory::Processing
            }
            SlcspError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Input => ErrorSeverity::High,
            ErrorCategory::Processing => ErrorSeverity::Medium,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            SlcspError::CsvError(_) => {
                "Check that every input file is comma-separated and has a header row".to_string()
            }
            SlcspError::IoError(_) => {
                "Check that the input files exist and the output directory is writable".to_string()
            }
            SlcspError::SerializationError(_) => {
                "Retry without the json output format to isolate the report writer".to_string()
            }
            SlcspError::ConfigError { .. } | SlcspError::ConfigValidationError { .. } => {
                "Review the configuration file syntax and section names".to_string()
            }
            SlcspError::InvalidConfigValueError { field, .. } => {
                format!("Correct the value of '{}'", field)
            }
            SlcspError::MissingConfigError { field } => {
                format!("Provide a value for '{}'", field)
            }
            SlcspError::InvalidRecordError { file, line, .. } => {
                format!("Fix or remove line {} of {}", line, file)
            }
            SlcspError::ProcessingError { .. } => {
                "Re-run with --verbose to see which step failed".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Input => format!("Could not read input data: {}", self),
            ErrorCategory::Processing => format!("Processing failed: {}", self),
            ErrorCategory::System => format!("System error: {}", self),
        }
    }

    /// Process exit code for the binaries. Always non-zero.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn invalid_record(file: &str, line: u64, message: impl Into<String>) -> Self {
        SlcspError::InvalidRecordError {
            file: file.to_string(),
            line,
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SlcspError>;
