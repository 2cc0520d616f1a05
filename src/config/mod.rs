pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use args::CliConfig;

#[cfg(feature = "cli")]
mod args {
    use crate::core::analyzer::{
        DEFAULT_LARGE_FILE_THRESHOLD_MB, DEFAULT_REPORT_NAME, DEFAULT_REPORT_TOP,
    };
    use crate::core::ConfigProvider;
    use crate::domain::model::{unique_formats, OutputFormat};
    use crate::utils::error::{AnalyzerError, Result};
    use crate::utils::logger::LogFormat;
    use crate::utils::validation::{
        normalize_extension, validate_extensions, validate_file_name, validate_output_names,
        validate_path, validate_positive_number, validate_threshold_mb, Validate,
    };
    use clap::Parser;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, Serialize, Deserialize, Parser)]
    #[command(name = "file-analyzer")]
    #[command(about = "Analyze the files in a directory and write a JSON report")]
    pub struct CliConfig {
        /// Directory to analyze
        pub directory: String,

        /// Only list files with these extensions (e.g. .py,.txt)
        #[arg(long, value_delimiter = ',', value_parser = parse_extension)]
        pub extensions: Vec<String>,

        /// Size threshold in MB for the large files printed to the console
        #[arg(long, default_value_t = 5.0)]
        pub min_size_mb: f64,

        /// Size threshold in MB for the large files written to the report
        #[arg(long, default_value_t = DEFAULT_LARGE_FILE_THRESHOLD_MB)]
        pub report_threshold_mb: f64,

        /// How many large files to print
        #[arg(long, default_value_t = 5)]
        pub top: usize,

        /// How many large files to keep in the report
        #[arg(long, default_value_t = DEFAULT_REPORT_TOP)]
        pub report_top: usize,

        /// Where to write the report (defaults to the analyzed directory)
        #[arg(long)]
        pub output_dir: Option<String>,

        #[arg(long, default_value = DEFAULT_REPORT_NAME)]
        pub report_name: String,

        #[arg(long, value_enum, value_delimiter = ',', default_value = "json")]
        pub formats: Vec<OutputFormat>,

        /// Print the summary without writing a report file
        #[arg(long)]
        pub no_report: bool,

        #[arg(long, value_enum, default_value = "compact")]
        pub log_format: LogFormat,

        #[arg(short, long, help = "Enable verbose output")]
        pub verbose: bool,

        #[arg(long, help = "Log CPU and memory usage per phase")]
        pub monitor: bool,
    }

    fn parse_extension(raw: &str) -> std::result::Result<String, String> {
        if raw.trim().is_empty() {
            return Err("extension cannot be empty".to_string());
        }
        Ok(normalize_extension(raw))
    }

    impl ConfigProvider for CliConfig {
        fn directory(&self) -> &str {
            &self.directory
        }

        fn extensions(&self) -> Option<&[String]> {
            if self.extensions.is_empty() {
                None
            } else {
                Some(self.extensions.as_slice())
            }
        }

        fn large_file_threshold_mb(&self) -> f64 {
            self.report_threshold_mb
        }

        fn report_top(&self) -> usize {
            self.report_top
        }

        fn output_dir(&self) -> &str {
            self.output_dir.as_deref().unwrap_or(&self.directory)
        }

        fn report_name(&self) -> &str {
            &self.report_name
        }

        fn formats(&self) -> Vec<OutputFormat> {
            unique_formats(self.formats.iter().copied())
        }

        fn report_enabled(&self) -> bool {
            !self.no_report
        }
    }

    impl Validate for CliConfig {
        fn validate(&self) -> Result<()> {
            validate_path("directory", &self.directory)?;
            if let Some(output_dir) = &self.output_dir {
                validate_path("output_dir", output_dir)?;
            }
            validate_file_name("report_name", &self.report_name)?;
            validate_extensions("extensions", &self.extensions)?;
            validate_threshold_mb("min_size_mb", self.min_size_mb)?;
            validate_threshold_mb("report_threshold_mb", self.report_threshold_mb)?;
            validate_positive_number("report_top", self.report_top, 1)?;

            if self.formats.is_empty() {
                return Err(AnalyzerError::ConfigValidationError {
                    field: "formats".to_string(),
                    message: "At least one output format is required".to_string(),
                });
            }
            validate_output_names("report_name", &self.report_name, &self.formats)?;

            Ok(())
        }
    }

}
