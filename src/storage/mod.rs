// SPDX-License-Identifier: PMPL-1.0-or-later

//! Where case reports land on disk

use crate::report::{self, ReportOutputFormat};
use crate::types::CaseReport;
use anyhow::Result;
use std::path::{Path, PathBuf};

/// Trailing separator marks it as a directory even before it exists
pub const DEFAULT_RESULTS_DIR: &str = "results/";

/// `<case>Report`, plus an extension for structured formats
pub fn report_file_name(case_name: &str, format: ReportOutputFormat) -> String {
    match format.extension() {
        Some(ext) => format!("{case_name}Report.{ext}"),
        None => format!("{case_name}Report"),
    }
}

/// Resolve the destination: an existing directory (or one spelled with a
/// trailing separator) gets the default file name inside it, anything else
/// is taken as the file path.
pub fn report_path(destination: &Path, case_dir: &Path, format: ReportOutputFormat) -> PathBuf {
    let looks_like_dir = destination.is_dir()
        || destination
            .to_str()
            .map(|s| s.ends_with(std::path::MAIN_SEPARATOR) || s.ends_with('/'))
            .unwrap_or(false);

    if looks_like_dir {
        destination.join(report_file_name(&case_name(case_dir), format))
    } else {
        destination.to_path_buf()
    }
}

/// Format implied by a destination's extension, if it names one
pub fn format_for_path(destination: &Path) -> Option<ReportOutputFormat> {
    destination
        .extension()
        .and_then(|ext| ext.to_str())
        .and_then(ReportOutputFormat::parse)
}

/// Explicit choice first, then the destination's extension, then text
pub fn resolve_format(
    explicit: Option<ReportOutputFormat>,
    destination: &Path,
) -> ReportOutputFormat {
    explicit
        .or_else(|| format_for_path(destination))
        .unwrap_or(ReportOutputFormat::Text)
}

pub fn case_name(case_dir: &Path) -> String {
    case_dir
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "case".to_string())
}

pub fn persist_report(
    report: &CaseReport,
    destination: &Path,
    case_dir: &Path,
    format: ReportOutputFormat,
) -> Result<PathBuf> {
    let path = report_path(destination, case_dir, format);
    report::save_report(report, &path, format)?;
    Ok(path)
}
