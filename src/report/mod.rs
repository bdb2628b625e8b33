// SPDX-License-Identifier: PMPL-1.0-or-later

//! Case report generation and output

pub mod formatter;
pub mod generator;
pub mod output;

use crate::department::PoliceDepartment;
use crate::types::CaseReport;
use anyhow::Result;
use std::path::Path;

pub use formatter::ReportFormatter;
pub use generator::ReportGenerator;
pub use output::ReportOutputFormat;

/// Build the summary for everything the department has done so far
pub fn generate_case_report(department: &PoliceDepartment) -> CaseReport {
    ReportGenerator::new().generate(department)
}

/// Save report to file in the given format
pub fn save_report<P: AsRef<Path>>(
    report: &CaseReport,
    path: P,
    format: ReportOutputFormat,
) -> Result<()> {
    let formatter = ReportFormatter::new();
    formatter.save(report, path, format)
}

/// Print report to console
pub fn print_report(report: &CaseReport) {
    let formatter = ReportFormatter::new();
    formatter.print(report);
}
