use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// 掃描時找到的單一檔案
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub path: PathBuf,
    /// 小寫、含前導點的副檔名；沒有副檔名時為空字串
    pub extension: String,
    /// 無法讀取 metadata 時為 None
    pub size_bytes: Option<u64>,
}

impl FileEntry {
    pub fn display_path(&self) -> String {
        self.path.to_string_lossy().into_owned()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileStats {
    pub total_files: u64,
    pub total_size_bytes: u64,
    pub total_size_mb: f64,
    pub extensions_count: BTreeMap<String, u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LargeFile {
    pub path: String,
    pub size_bytes: u64,
    pub size_mb: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub directory: String,
    pub generated_at: DateTime<Utc>,
    pub statistics: FileStats,
    pub files_by_extension: BTreeMap<String, Vec<String>>,
    pub large_files: Vec<LargeFile>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Json,
    Csv,
}

impl OutputFormat {
    pub const NAMES: [&'static str; 2] = ["json", "csv"];

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "json" => Some(OutputFormat::Json),
            "csv" => Some(OutputFormat::Csv),
            _ => None,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
        }
    }

    /// 輸出檔名：JSON 用設定的檔名，其他格式換掉副檔名
    pub fn file_name(&self, report_name: &str) -> String {
        match self {
            OutputFormat::Json => report_name.to_string(),
            other => Path::new(report_name)
                .with_extension(other.extension())
                .to_string_lossy()
                .into_owned(),
        }
    }
}

/// 去除重複的格式，保留第一次出現的順序
pub fn unique_formats(formats: impl IntoIterator<Item = OutputFormat>) -> Vec<OutputFormat> {
    let mut unique = Vec::new();
    for format in formats {
        if !unique.contains(&format) {
            unique.push(format);
        }
    }
    unique
}

/// 一次分析的所有產出：報告本體與各格式的輸出內容
#[derive(Debug, Clone)]
pub struct AnalysisResult {
    pub report: Report,
    pub entries: Vec<FileEntry>,
    pub rendered: Vec<RenderedOutput>,
}

#[derive(Debug, Clone)]
pub struct RenderedOutput {
    pub format: OutputFormat,
    pub file_name: String,
    pub content: Vec<u8>,
}

/// 取副檔名的規則：忽略檔名開頭的點，以最後一個點切割，結果轉小寫
pub fn extension_of(file_name: &str) -> String {
    let stem_start = file_name.len() - file_name.trim_start_matches('.').len();
    match file_name[stem_start..].rfind('.') {
        Some(idx) => file_name[stem_start + idx..].to_lowercase(),
        None => String::new(),
    }
}

/// 位元組轉 MB，取到小數第二位；剛好一半時取偶數
pub fn bytes_to_mb(bytes: u64) -> f64 {
    ((bytes as f64 / BYTES_PER_MB) * 100.0).round_ties_even() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_of() {
        assert_eq!(extension_of("test.py"), ".py");
        assert_eq!(extension_of("Photo.JPG"), ".jpg");
        assert_eq!(extension_of("archive.tar.gz"), ".gz");
        assert_eq!(extension_of("no_extension"), "");
        assert_eq!(extension_of(".bashrc"), "");
        assert_eq!(extension_of("..hidden"), "");
        assert_eq!(extension_of(".config.toml"), ".toml");
        assert_eq!(extension_of("trailing."), ".");
    }

    #[test]
    fn test_bytes_to_mb() {
        assert_eq!(bytes_to_mb(0), 0.0);
        assert_eq!(bytes_to_mb(1024 * 1024), 1.0);
        assert_eq!(bytes_to_mb(100_000), 0.1);
        assert_eq!(bytes_to_mb(15 * 1024 * 1024 / 10), 1.5);
        // 0.125 MB 與 0.375 MB 剛好落在中間
        assert_eq!(bytes_to_mb(131_072), 0.12);
        assert_eq!(bytes_to_mb(393_216), 0.38);
    }

    #[test]
    fn test_output_format_parse() {
        assert_eq!(OutputFormat::parse("JSON"), Some(OutputFormat::Json));
        assert_eq!(OutputFormat::parse(" csv "), Some(OutputFormat::Csv));
        assert_eq!(OutputFormat::parse("tsv"), None);
    }

    #[test]
    fn test_output_file_names() {
        assert_eq!(OutputFormat::Json.file_name("file_report.json"), "file_report.json");
        assert_eq!(OutputFormat::Csv.file_name("file_report.json"), "file_report.csv");
        assert_eq!(OutputFormat::Csv.file_name("report"), "report.csv");
        assert_eq!(OutputFormat::Csv.file_name("scan.csv"), "scan.csv");
    }

    #[test]
    fn test_unique_formats_keeps_first_occurrence() {
        let formats = [
            OutputFormat::Csv,
            OutputFormat::Json,
            OutputFormat::Csv,
            OutputFormat::Json,
        ];
        assert_eq!(
            unique_formats(formats),
            vec![OutputFormat::Csv, OutputFormat::Json]
        );
    }
}
