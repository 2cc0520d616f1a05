use crate::core::analyzer::{report_from_entries, FileAnalyzer};
use crate::core::{AnalysisResult, ConfigProvider, FileEntry, Pipeline, Storage};
use crate::domain::model::{bytes_to_mb, unique_formats, OutputFormat, RenderedOutput, Report};
use crate::utils::error::{AnalyzerError, Result};
use crate::utils::validation::validate_output_names;

/// 掃描 -> 彙整報告 -> 寫出報告檔
pub struct ReportPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    analyzer: FileAnalyzer,
}

impl<S: Storage, C: ConfigProvider> ReportPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Result<Self> {
        let analyzer = FileAnalyzer::new(config.directory())?;
        if config.report_enabled() {
            validate_output_names("report_name", config.report_name(), &config.formats())?;
        }
        Ok(Self {
            storage,
            config,
            analyzer,
        })
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for ReportPipeline<S, C> {
    async fn extract(&self) -> Result<Vec<FileEntry>> {
        tracing::debug!("Scanning directory: {}", self.analyzer.directory());
        self.analyzer.scan()
    }

    async fn transform(&self, entries: Vec<FileEntry>) -> Result<AnalysisResult> {
        let report = report_from_entries(
            self.analyzer.directory(),
            &entries,
            self.config.large_file_threshold_mb(),
            self.config.report_top(),
        );

        let mut rendered = Vec::new();
        if self.config.report_enabled() {
            for format in unique_formats(self.config.formats()) {
                let content = match format {
                    OutputFormat::Json => render_json(&report)?,
                    OutputFormat::Csv => render_csv(&entries)?,
                };
                rendered.push(RenderedOutput {
                    format,
                    file_name: format.file_name(self.config.report_name()),
                    content,
                });
            }
        }

        Ok(AnalysisResult {
            report,
            entries,
            rendered,
        })
    }

    async fn load(&self, result: &AnalysisResult) -> Result<Vec<String>> {
        let mut output_paths = Vec::with_capacity(result.rendered.len());

        for output in &result.rendered {
            let path = self
                .storage
                .write_file(&output.file_name, &output.content)
                .await?;
            tracing::debug!("Wrote {:?} output to {}", output.format, path);
            output_paths.push(path);
        }

        Ok(output_paths)
    }
}

pub fn render_json(report: &Report) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec_pretty(report)?)
}

/// 每個檔案一列：path,extension,size_bytes,size_mb；大小未知時留空
pub fn render_csv(entries: &[FileEntry]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["path", "extension", "size_bytes", "size_mb"])?;

    for entry in entries {
        let (size_bytes, size_mb) = match entry.size_bytes {
            Some(size) => (size.to_string(), bytes_to_mb(size).to_string()),
            None => (String::new(), String::new()),
        };
        writer.write_record([
            entry.display_path(),
            entry.extension.clone(),
            size_bytes,
            size_mb,
        ])?;
    }

    writer
        .into_inner()
        .map_err(|e| AnalyzerError::IoError(e.into_error()))
}
