use crate::core::pipeline::OUTPUT_CSV;
use crate::utils::error::{Result, SlcspError};
use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};

pub const SUPPORTED_OUTPUT_FORMATS: [&str; 2] = ["csv", "json"];

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.trim().is_empty() {
        return Err(SlcspError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(SlcspError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_file_extensions(
    field_name: &str,
    files: &[&str],
    allowed_extensions: &[&str],
) -> Result<()> {
    let allowed_set: HashSet<&str> = allowed_extensions.iter().copied().collect();

    for file in files {
        match std::path::Path::new(file)
            .extension()
            .and_then(|ext| ext.to_str())
        {
            Some(extension) if allowed_set.contains(extension) => {}
            Some(extension) => {
                return Err(SlcspError::InvalidConfigValueError {
                    field: field_name.to_string(),
                    value: file.to_string(),
                    reason: format!(
                        "Unsupported file extension: {}. Allowed extensions: {}",
                        extension,
                        allowed_extensions.join(", ")
                    ),
                });
            }
            None => {
                return Err(SlcspError::InvalidConfigValueError {
                    field: field_name.to_string(),
                    value: file.to_string(),
                    reason: "File has no extension or invalid filename".to_string(),
                });
            }
        }
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(SlcspError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_output_formats(field_name: &str, formats: &[String]) -> Result<()> {
    if formats.is_empty() {
        return Err(SlcspError::MissingConfigError {
            field: field_name.to_string(),
        });
    }

    for format in formats {
        if !SUPPORTED_OUTPUT_FORMATS.contains(&format.as_str()) {
            return Err(SlcspError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: format.clone(),
                reason: format!(
                    "Unsupported format. Valid formats: {}",
                    SUPPORTED_OUTPUT_FORMATS.join(", ")
                ),
            });
        }
    }

    Ok(())
}

/// Shared checks for anything that names the three input files and an output location.
pub fn validate_io_settings(
    input_files: &[(&str, &str)],
    output_path: &str,
    output_formats: &[String],
) -> Result<()> {
    for (field, path) in input_files {
        validate_path(field, path)?;
        validate_file_extensions(field, &[*path], &["csv"])?;
    }
    validate_path("output_path", output_path)?;
    validate_output_formats("output_formats", output_formats)?;

    let output_csv = normalized(&Path::new(output_path).join(OUTPUT_CSV));
    for (field, path) in input_files {
        if normalized(Path::new(path)) == output_csv {
            return Err(SlcspError::InvalidConfigValueError {
                field: "output_path".to_string(),
                value: output_path.to_string(),
                reason: format!("Output would overwrite the {} input file", field),
            });
        }
    }

    Ok(())
}

fn normalized(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_path() {
        assert!(validate_path("zips", "data/zips.csv").is_ok());
        assert!(validate_path("zips", "").is_err());
        assert!(validate_path("zips", "   ").is_err());
        assert!(validate_path("zips", "bad\0path.csv").is_err());
    }

    #[test]
    fn test_validate_file_extensions() {
        assert!(validate_file_extensions("plans", &["plans.csv"], &["csv"]).is_ok());
        assert!(validate_file_extensions("plans", &["plans.tsv"], &["csv"]).is_err());
        assert!(validate_file_extensions("plans", &["plans"], &["csv"]).is_err());
    }

    #[test]
    fn test_validate_output_formats() {
        let ok = vec!["csv".to_string(), "json".to_string()];
        assert!(validate_output_formats("output_formats", &ok).is_ok());

        let unknown = vec!["xlsx".to_string()];
        assert!(matches!(
            validate_output_formats("output_formats", &unknown),
            Err(SlcspError::InvalidConfigValueError { .. })
        ));

        assert!(matches!(
            validate_output_formats("output_formats", &[]),
            Err(SlcspError::MissingConfigError { .. })
        ));
    }

    #[test]
    fn test_validate_io_settings_rejects_overwriting_queries() {
        let formats = vec!["csv".to_string()];
        let inputs = [("zips", "zips.csv"), ("plans", "plans.csv"), ("slcsp", "./slcsp.csv")];

        assert!(validate_io_settings(&inputs, "output", &formats).is_ok());
        assert!(validate_io_settings(&inputs, ".", &formats).is_err());
        assert!(validate_io_settings(&[("zips", "zips.txt")], "output", &formats).is_err());
    }
}
