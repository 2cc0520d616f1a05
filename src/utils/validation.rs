use crate::domain::model::{unique_formats, OutputFormat};
use crate::utils::error::{AnalyzerError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(AnalyzerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(AnalyzerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

/// 報告檔名只能是單一檔名，不能含路徑分隔符
pub fn validate_file_name(field_name: &str, name: &str) -> Result<()> {
    validate_path(field_name, name)?;

    if name.contains('/') || name.contains('\\') || name == "." || name == ".." {
        return Err(AnalyzerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: name.to_string(),
            reason: "Expected a plain file name without directories".to_string(),
        });
    }

    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(AnalyzerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_threshold_mb(field_name: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(AnalyzerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Threshold must be a non-negative number of megabytes".to_string(),
        });
    }
    Ok(())
}

pub fn validate_extensions(field_name: &str, extensions: &[String]) -> Result<()> {
    for ext in extensions {
        if !ext.starts_with('.') || ext.contains('/') || ext.contains('\\') {
            return Err(AnalyzerError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: ext.clone(),
                reason: "Extensions look like '.py' or '.txt'".to_string(),
            });
        }
    }
    Ok(())
}

pub fn validate_formats(field_name: &str, formats: &[String]) -> Result<Vec<OutputFormat>> {
    if formats.is_empty() {
        return Err(AnalyzerError::ConfigValidationError {
            field: field_name.to_string(),
            message: "At least one output format is required".to_string(),
        });
    }

    formats
        .iter()
        .map(|f| {
            OutputFormat::parse(f).ok_or_else(|| AnalyzerError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: f.clone(),
                reason: format!(
                    "Unsupported format. Valid formats: {}",
                    OutputFormat::NAMES.join(", ")
                ),
            })
        })
        .collect()
}

/// 每種格式各自寫一個檔；推導出的檔名不能互相覆蓋
pub fn validate_output_names(
    field_name: &str,
    report_name: &str,
    formats: &[OutputFormat],
) -> Result<()> {
    let formats = unique_formats(formats.iter().copied());
    let mut seen: Vec<(OutputFormat, String)> = Vec::with_capacity(formats.len());

    for format in formats {
        let name = format.file_name(report_name);
        if let Some((other, _)) = seen.iter().find(|(_, existing)| *existing == name) {
            return Err(AnalyzerError::ConfigError {
                message: format!(
                    "'{}' = '{}' makes the {:?} and {:?} reports both write '{}'",
                    field_name, report_name, other, format, name
                ),
            });
        }
        seen.push((format, name));
    }

    Ok(())
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| AnalyzerError::MissingConfigError {
        field: field_name.to_string(),
    })
}

/// `py`、`.PY` 都正規化成 `.py`
pub fn normalize_extension(raw: &str) -> String {
    let trimmed = raw.trim().to_lowercase();
    if trimmed.starts_with('.') {
        trimmed
    } else {
        format!(".{}", trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_path() {
        assert!(validate_path("report.output_dir", "./out").is_ok());
        assert!(validate_path("report.output_dir", "").is_err());
        assert!(validate_path("report.output_dir", "bad\0path").is_err());
    }

    #[test]
    fn test_validate_file_name() {
        assert!(validate_file_name("report.filename", "file_report.json").is_ok());
        assert!(validate_file_name("report.filename", "nested/report.json").is_err());
        assert!(validate_file_name("report.filename", "..").is_err());
    }

    #[test]
    fn test_validate_threshold_mb() {
        assert!(validate_threshold_mb("analysis.large_file_threshold_mb", 0.01).is_ok());
        assert!(validate_threshold_mb("analysis.large_file_threshold_mb", 0.0).is_ok());
        assert!(validate_threshold_mb("analysis.large_file_threshold_mb", -1.0).is_err());
        assert!(validate_threshold_mb("analysis.large_file_threshold_mb", f64::NAN).is_err());
    }

    #[test]
    fn test_validate_formats() {
        let formats = vec!["json".to_string(), "CSV".to_string()];
        let parsed = validate_formats("report.formats", &formats).unwrap();
        assert_eq!(parsed, vec![OutputFormat::Json, OutputFormat::Csv]);

        assert!(validate_formats("report.formats", &["xml".to_string()]).is_err());
        assert!(validate_formats("report.formats", &[]).is_err());
    }

    #[test]
    fn test_validate_output_names() {
        let both = [OutputFormat::Json, OutputFormat::Csv];
        assert!(validate_output_names("report_name", "file_report.json", &both).is_ok());
        assert!(validate_output_names("report_name", "scan.csv", &[OutputFormat::Json]).is_ok());
        assert!(validate_output_names(
            "report_name",
            "report.json",
            &[OutputFormat::Json, OutputFormat::Json]
        )
        .is_ok());

        let err = validate_output_names("report_name", "scan.csv", &both).unwrap_err();
        assert!(matches!(err, AnalyzerError::ConfigError { .. }));
        assert!(err.to_string().contains("scan.csv"));
    }

    #[test]
    fn test_normalize_extension() {
        assert_eq!(normalize_extension("py"), ".py");
        assert_eq!(normalize_extension(".TXT"), ".txt");
        assert_eq!(normalize_extension(" log "), ".log");
    }

    #[test]
    fn test_validate_extensions() {
        assert!(validate_extensions("analysis.extensions", &[".py".to_string()]).is_ok());
        assert!(validate_extensions("analysis.extensions", &["py".to_string()]).is_err());
    }
}
