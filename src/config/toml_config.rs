use crate::core::analyzer::{
    DEFAULT_LARGE_FILE_THRESHOLD_MB, DEFAULT_REPORT_NAME, DEFAULT_REPORT_TOP,
};
use crate::core::ConfigProvider;
use crate::domain::model::{unique_formats, OutputFormat};
use crate::utils::error::{AnalyzerError, Result};
use crate::utils::logger::LogFormat;
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

static ENV_VAR_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is a valid regex")
});

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub analysis: AnalysisConfig,
    pub report: Option<ReportConfig>,
    pub logging: Option<LoggingConfig>,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisConfig {
    pub directory: Option<String>,
    pub extensions: Option<Vec<String>>,
    pub large_file_threshold_mb: Option<f64>,
    pub display_threshold_mb: Option<f64>,
    pub display_top: Option<usize>,
    pub report_top: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    pub enabled: Option<bool>,
    pub output_dir: Option<String>,
    pub filename: Option<String>,
    pub formats: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub format: Option<LogFormat>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(AnalyzerError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| AnalyzerError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${DATA_DIR})；未設定的保留原樣
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR_PATTERN
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn validate_config(&self) -> Result<()> {
        let directory = validation::validate_required_field(
            "analysis.directory",
            &self.analysis.directory,
        )?;
        validation::validate_path("analysis.directory", directory)?;

        if let Some(extensions) = &self.analysis.extensions {
            validation::validate_extensions("analysis.extensions", extensions)?;
        }
        validation::validate_threshold_mb(
            "analysis.large_file_threshold_mb",
            self.large_file_threshold_mb(),
        )?;
        validation::validate_threshold_mb(
            "analysis.display_threshold_mb",
            self.display_threshold_mb(),
        )?;
        validation::validate_positive_number("analysis.report_top", self.report_top(), 1)?;

        validation::validate_path("report.output_dir", self.output_dir())?;
        validation::validate_file_name("report.filename", self.report_name())?;

        let formats = match self.report.as_ref().and_then(|r| r.formats.as_ref()) {
            Some(formats) => validation::validate_formats("report.formats", formats)?,
            None => self.formats(),
        };
        validation::validate_output_names("report.filename", self.report_name(), &formats)?;

        Ok(())
    }

    /// 命令列指定的目錄優先
    pub fn set_directory(&mut self, directory: String) {
        self.analysis.directory = Some(directory);
    }

    pub fn display_threshold_mb(&self) -> f64 {
        self.analysis.display_threshold_mb.unwrap_or(5.0)
    }

    pub fn display_top(&self) -> usize {
        self.analysis.display_top.unwrap_or(5)
    }

    pub fn log_format(&self) -> LogFormat {
        self.logging
            .as_ref()
            .and_then(|l| l.format)
            .unwrap_or_default()
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }
}

impl ConfigProvider for TomlConfig {
    fn directory(&self) -> &str {
        self.analysis.directory.as_deref().unwrap_or_default()
    }

    fn extensions(&self) -> Option<&[String]> {
        self.analysis.extensions.as_deref()
    }

    fn large_file_threshold_mb(&self) -> f64 {
        self.analysis
            .large_file_threshold_mb
            .unwrap_or(DEFAULT_LARGE_FILE_THRESHOLD_MB)
    }

    fn report_top(&self) -> usize {
        self.analysis.report_top.unwrap_or(DEFAULT_REPORT_TOP)
    }

    fn output_dir(&self) -> &str {
        self.report
            .as_ref()
            .and_then(|r| r.output_dir.as_deref())
            .unwrap_or_else(|| self.directory())
    }

    fn report_name(&self) -> &str {
        self.report
            .as_ref()
            .and_then(|r| r.filename.as_deref())
            .unwrap_or(DEFAULT_REPORT_NAME)
    }

    fn formats(&self) -> Vec<OutputFormat> {
        match self.report.as_ref().and_then(|r| r.formats.as_ref()) {
            Some(formats) => {
                unique_formats(formats.iter().filter_map(|f| OutputFormat::parse(f)))
            }
            None => vec![OutputFormat::Json],
        }
    }

    fn report_enabled(&self) -> bool {
        self.report
            .as_ref()
            .and_then(|r| r.enabled)
            .unwrap_or(true)
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

    #[test]
    fn test_parse_full_toml_config() {
        let toml_content = r#"
[analysis]
directory = "/srv/data"
extensions = [".py", ".txt"]
large_file_threshold_mb = 1.5
display_threshold_mb = 0.5
display_top = 3
report_top = 20

[report]
output_dir = "/srv/reports"
filename = "data_report.json"
formats = ["json", "csv"]

[logging]
format = "json"

[monitoring]
enabled = true
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.directory(), "/srv/data");
        assert_eq!(
            config.extensions(),
            Some(&[".py".to_string(), ".txt".to_string()][..])
        );
        assert_eq!(config.large_file_threshold_mb(), 1.5);
        assert_eq!(config.display_threshold_mb(), 0.5);
        assert_eq!(config.display_top(), 3);
        assert_eq!(config.report_top(), 20);
        assert_eq!(config.output_dir(), "/srv/reports");
        assert_eq!(config.report_name(), "data_report.json");
        assert_eq!(config.formats(), vec![OutputFormat::Json, OutputFormat::Csv]);
        assert_eq!(config.log_format(), LogFormat::Json);
        assert!(config.monitoring_enabled());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config = TomlConfig::from_toml_str("[analysis]\ndirectory = \"./data\"\n").unwrap();

        assert_eq!(config.output_dir(), "./data");
        assert_eq!(config.report_name(), "file_report.json");
        assert_eq!(config.large_file_threshold_mb(), 10.0);
        assert_eq!(config.report_top(), 10);
        assert_eq!(config.formats(), vec![OutputFormat::Json]);
        assert_eq!(config.log_format(), LogFormat::Compact);
        assert!(config.extensions().is_none());
        assert!(config.report_enabled());
        assert!(!config.monitoring_enabled());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("FILE_ANALYZER_TEST_DATA_DIR", "/mnt/scan-target");

        let toml_content = r#"
[analysis]
directory = "${FILE_ANALYZER_TEST_DATA_DIR}"

[report]
output_dir = "${FILE_ANALYZER_TEST_UNSET_VAR}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.directory(), "/mnt/scan-target");
        assert_eq!(config.output_dir(), "${FILE_ANALYZER_TEST_UNSET_VAR}");

        std::env::remove_var("FILE_ANALYZER_TEST_DATA_DIR");
    }

    #[test]
    fn test_missing_directory_fails_validation() {
        let mut config = TomlConfig::from_toml_str("[analysis]\n").unwrap();
        let err = config.validate().unwrap_err();
        assert!(matches!(err, AnalyzerError::MissingConfigError { .. }));

        config.set_directory("./data".to_string());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_unsupported_format_fails_validation() {
        let toml_content = r#"
[analysis]
directory = "./data"

[report]
formats = ["json", "xml"]
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_report_filename_must_not_collide_across_formats() {
        let toml_content = r#"
[analysis]
directory = "./data"

[report]
filename = "scan.csv"
formats = ["json", "csv", "csv"]
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        let err = config.validate().unwrap_err();
        assert!(matches!(err, AnalyzerError::ConfigError { .. }));

        let renamed = toml_content.replace("scan.csv", "scan.json");
        let config = TomlConfig::from_toml_str(&renamed).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.formats(), vec![OutputFormat::Json, OutputFormat::Csv]);
    }

    #[test]
    fn test_invalid_toml_is_a_config_error() {
        let err = TomlConfig::from_toml_str("[analysis\n").unwrap_err();
        assert_eq!(
            err.category(),
            crate::utils::error::ErrorCategory::Configuration
        );
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[analysis]\ndirectory = \"/tmp\"\nreport_top = 3\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.report_top(), 3);
    }
}
