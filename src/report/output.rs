// SPDX-License-Identifier: PMPL-1.0-or-later

//! Serialization helpers for printed/exported reports

use crate::types::CaseReport;
use anyhow::Result;
use clap::ValueEnum;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportOutputFormat {
    Text,
    Json,
    Yaml,
}

impl ReportOutputFormat {
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "text" | "txt" => Some(ReportOutputFormat::Text),
            "json" => Some(ReportOutputFormat::Json),
            "yaml" | "yml" => Some(ReportOutputFormat::Yaml),
            _ => None,
        }
    }

    /// File extension, `None` for the classic extensionless text report
    pub fn extension(&self) -> Option<&'static str> {
        match self {
            ReportOutputFormat::Text => None,
            ReportOutputFormat::Json => Some("json"),
            ReportOutputFormat::Yaml => Some("yaml"),
        }
    }

    pub fn serialize(&self, report: &CaseReport) -> Result<String> {
        match self {
            ReportOutputFormat::Text => Ok(format_report_as_text(report)),
            ReportOutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
            ReportOutputFormat::Yaml => Ok(serde_yaml::to_string(report)?),
        }
    }
}

/// The plain case report handed to the commissioner
pub fn format_report_as_text(report: &CaseReport) -> String {
    let mut out = String::new();
    out.push_str("CASE REPORT ");
    out.push_str(&format!("\n\nIn charge of Operation: {}", report.captain));
    out.push_str(&format!("\n\nTotal arrests made: {}", report.total_arrests));
    out.push_str("\n\nCurrent Status of Criminal Organizations:\n");
    for org in &report.organizations {
        if org.dissolved {
            out.push_str("\nDISSOLVED");
        }
        out.push('\n');
        out.push_str(&org.rendering);
        out.push_str("---");
    }
    out.push_str("\nEND OF REPORT");
    out
}
