use crate::domain::model::{
    bytes_to_mb, extension_of, FileEntry, FileStats, LargeFile, Report, BYTES_PER_MB,
};
use crate::utils::error::{AnalyzerError, Result};
use chrono::Utc;
use std::collections::BTreeMap;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_LARGE_FILE_THRESHOLD_MB: f64 = 10.0;
pub const DEFAULT_REPORT_TOP: usize = 10;
pub const DEFAULT_REPORT_NAME: &str = "file_report.json";

/// 分析單一目錄（含子目錄）內的檔案
#[derive(Debug, Clone)]
pub struct FileAnalyzer {
    directory: String,
}

impl FileAnalyzer {
    /// 目錄不存在或不是目錄時回傳錯誤
    pub fn new(directory: impl Into<String>) -> Result<Self> {
        let directory = directory.into();
        let path = Path::new(&directory);

        if !path.exists() {
            return Err(AnalyzerError::DirectoryNotFound { path: directory });
        }

        if !path.is_dir() {
            return Err(AnalyzerError::NotADirectory { path: directory });
        }

        Ok(Self { directory })
    }

    pub fn directory(&self) -> &str {
        &self.directory
    }

    /// 由上而下走訪目錄：每層先列出檔案（依名稱排序），再依序進入子目錄。
    /// 指向目錄的符號連結不會展開；無法讀取的子目錄會被略過。
    pub fn scan(&self) -> Result<Vec<FileEntry>> {
        let mut entries = Vec::new();
        walk_dir(Path::new(&self.directory), &mut entries)?;
        tracing::debug!("Scanned {} files under {}", entries.len(), self.directory);
        Ok(entries)
    }

    pub fn files_by_extension(
        &self,
        extensions: Option<&[String]>,
    ) -> Result<BTreeMap<String, Vec<String>>> {
        Ok(group_by_extension(&self.scan()?, extensions))
    }

    pub fn file_stats(&self) -> Result<FileStats> {
        Ok(collect_stats(&self.scan()?))
    }

    pub fn find_large_files(&self, min_size_mb: f64) -> Result<Vec<LargeFile>> {
        Ok(select_large_files(&self.scan()?, min_size_mb))
    }

    pub fn build_report(&self, large_files_limit: usize) -> Result<Report> {
        let entries = self.scan()?;
        Ok(report_from_entries(
            &self.directory,
            &entries,
            DEFAULT_LARGE_FILE_THRESHOLD_MB,
            large_files_limit,
        ))
    }

    /// 產生完整報告，以 JSON 寫入分析目錄下的 `output_file`
    pub fn generate_report(&self, output_file: &str) -> Result<PathBuf> {
        let report = self.build_report(DEFAULT_REPORT_TOP)?;
        let output_path = Path::new(&self.directory).join(output_file);

        fs::write(&output_path, serde_json::to_string_pretty(&report)?)?;
        tracing::info!("📝 Report written to {}", output_path.display());

        Ok(output_path)
    }
}

fn walk_dir(dir: &Path, entries: &mut Vec<FileEntry>) -> Result<()> {
    let mut files: Vec<(OsString, PathBuf, Option<u64>)> = Vec::new();
    let mut subdirs: Vec<PathBuf> = Vec::new();

    for item in fs::read_dir(dir)? {
        let item = match item {
            Ok(item) => item,
            Err(e) => {
                tracing::warn!("Skipping unreadable entry in {}: {}", dir.display(), e);
                continue;
            }
        };

        let path = item.path();
        let file_type = match item.file_type() {
            Ok(file_type) => file_type,
            Err(e) => {
                tracing::warn!("Skipping {}: {}", path.display(), e);
                continue;
            }
        };

        if file_type.is_dir() {
            subdirs.push(path);
        } else if file_type.is_symlink() {
            match fs::metadata(&path) {
                Ok(meta) if meta.is_dir() => {
                    tracing::debug!("Not following directory symlink {}", path.display());
                }
                Ok(meta) => files.push((item.file_name(), path, Some(meta.len()))),
                Err(_) => files.push((item.file_name(), path, None)),
            }
        } else {
            let size = item.metadata().ok().map(|meta| meta.len());
            files.push((item.file_name(), path, size));
        }
    }

    files.sort_by(|a, b| a.0.cmp(&b.0));
    subdirs.sort();

    for (name, path, size_bytes) in files {
        entries.push(FileEntry {
            extension: extension_of(&name.to_string_lossy()),
            path,
            size_bytes,
        });
    }

    for subdir in subdirs {
        if let Err(e) = walk_dir(&subdir, entries) {
            tracing::warn!("Skipping directory {}: {}", subdir.display(), e);
        }
    }

    Ok(())
}

/// 依副檔名分組；`extensions` 為 None 時包含所有檔案
pub fn group_by_extension(
    entries: &[FileEntry],
    extensions: Option<&[String]>,
) -> BTreeMap<String, Vec<String>> {
    let mut files_by_ext: BTreeMap<String, Vec<String>> = BTreeMap::new();

    for entry in entries {
        let wanted = extensions.map_or(true, |list| list.contains(&entry.extension));
        if wanted {
            files_by_ext
                .entry(entry.extension.clone())
                .or_default()
                .push(entry.display_path());
        }
    }

    files_by_ext
}

/// 只統計能取得大小的檔案
pub fn collect_stats(entries: &[FileEntry]) -> FileStats {
    let mut total_files = 0u64;
    let mut total_size = 0u64;
    let mut extensions_count: BTreeMap<String, u64> = BTreeMap::new();

    for entry in entries {
        if let Some(size) = entry.size_bytes {
            total_files += 1;
            total_size += size;
            *extensions_count.entry(entry.extension.clone()).or_insert(0) += 1;
        }
    }

    FileStats {
        total_files,
        total_size_bytes: total_size,
        total_size_mb: bytes_to_mb(total_size),
        extensions_count,
    }
}

/// 大小 >= 門檻的檔案，由大到小排序
pub fn select_large_files(entries: &[FileEntry], min_size_mb: f64) -> Vec<LargeFile> {
    let min_size_bytes = min_size_mb * BYTES_PER_MB;

    let mut large_files: Vec<LargeFile> = entries
        .iter()
        .filter_map(|entry| {
            let size = entry.size_bytes?;
            (size as f64 >= min_size_bytes).then(|| LargeFile {
                path: entry.display_path(),
                size_bytes: size,
                size_mb: bytes_to_mb(size),
            })
        })
        .collect();

    large_files.sort_by(|a, b| b.size_bytes.cmp(&a.size_bytes));
    large_files
}

pub fn report_from_entries(
    directory: &str,
    entries: &[FileEntry],
    large_file_threshold_mb: f64,
    large_files_limit: usize,
) -> Report {
    let mut large_files = select_large_files(entries, large_file_threshold_mb);
    large_files.truncate(large_files_limit);

    Report {
        directory: directory.to_string(),
        generated_at: Utc::now(),
        statistics: collect_stats(entries),
        files_by_extension: group_by_extension(entries, None),
        large_files,
    }
}
