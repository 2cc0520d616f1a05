use crate::core::analyzer::{group_by_extension, select_large_files};
use crate::domain::model::{FileEntry, Report};
use std::fmt::Write;

/// 終端輸出的摘要內容
pub struct SummaryOptions<'a> {
    pub display_threshold_mb: f64,
    pub display_top: usize,
    pub extensions: Option<&'a [String]>,
}

pub fn render_summary(
    report: &Report,
    entries: &[FileEntry],
    options: &SummaryOptions<'_>,
    output_paths: &[String],
) -> String {
    let mut out = String::new();
    let stats = &report.statistics;

    let _ = writeln!(out, "Analyzing directory: {}", report.directory);
    let _ = writeln!(out, "{}", "-".repeat(50));
    let _ = writeln!(out, "Total files: {}", stats.total_files);
    let _ = writeln!(out, "Total size: {:?} MB", stats.total_size_mb);

    let _ = writeln!(out, "\nFile types:");
    for (ext, count) in &stats.extensions_count {
        let ext_display = if ext.is_empty() { "(no extension)" } else { ext };
        let _ = writeln!(out, "  {}: {}", ext_display, count);
    }

    if let Some(filter) = options.extensions {
        let _ = writeln!(out, "\nMatching files ({}):", filter.join(", "));
        for (ext, paths) in group_by_extension(entries, Some(filter)) {
            let _ = writeln!(out, "  {} ({} files)", ext, paths.len());
            for path in paths {
                let _ = writeln!(out, "    {}", path);
            }
        }
    }

    let large_files = select_large_files(entries, options.display_threshold_mb);
    if !large_files.is_empty() {
        let _ = writeln!(out, "\nLarge files (>{} MB):", options.display_threshold_mb);
        for file in large_files.iter().take(options.display_top) {
            let _ = writeln!(out, "  {:?} MB: {}", file.size_mb, file.path);
        }
    }

    for path in output_paths {
        let _ = writeln!(out, "\nReport saved: {}", path);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::analyzer::report_from_entries;
    use std::path::PathBuf;

    fn entry(path: &str, extension: &str, size: u64) -> FileEntry {
        FileEntry {
            path: PathBuf::from(path),
            extension: extension.to_string(),
            size_bytes: Some(size),
        }
    }

    #[test]
    fn test_summary_lists_types_and_large_files() {
        let entries = vec![
            entry("d/movie.mp4", ".mp4", 8 * 1024 * 1024),
            entry("d/README", "", 100),
            entry("d/main.py", ".py", 200),
        ];
        let report = report_from_entries("d", &entries, 10.0, 10);
        let filter = vec![".py".to_string()];
        let options = SummaryOptions {
            display_threshold_mb: 5.0,
            display_top: 5,
            extensions: Some(filter.as_slice()),
        };

        let summary = render_summary(&report, &entries, &options, &["d/file_report.json".to_string()]);

        assert!(summary.starts_with("Analyzing directory: d\n"));
        assert!(summary.contains("Total files: 3"));
        assert!(summary.contains("Total size: 8.0 MB"));
        assert!(summary.contains("  (no extension): 1"));
        assert!(summary.contains("  .py (1 files)\n    d/main.py"));
        assert!(summary.contains("Large files (>5 MB):\n  8.0 MB: d/movie.mp4"));
        assert!(summary.contains("Report saved: d/file_report.json"));
    }

    #[test]
    fn test_summary_omits_empty_large_file_section() {
        let entries = vec![entry("d/a.txt", ".txt", 1)];
        let report = report_from_entries("d", &entries, 10.0, 10);
        let options = SummaryOptions {
            display_threshold_mb: 5.0,
            display_top: 5,
            extensions: None,
        };

        let summary = render_summary(&report, &entries, &options, &[]);
        assert!(!summary.contains("Large files"));
        assert!(!summary.contains("Report saved"));
    }
}
