// SPDX-License-Identifier: PMPL-1.0-or-later

//! Report formatting and output

use crate::report::output::ReportOutputFormat;
use crate::types::*;
use anyhow::{Context, Result};
use colored::*;
use std::fs;
use std::path::Path;

pub struct ReportFormatter;

impl ReportFormatter {
    pub fn new() -> Self {
        Self
    }

    pub fn print(&self, report: &CaseReport) {
        println!("\n{}", "=== CASE REPORT ===".bold().cyan());
        println!();
        println!("  In charge of operation: {}", report.captain.bold());
        println!(
            "  Total arrests made: {}",
            report.total_arrests.to_string().bold()
        );
        println!(
            "  Organizations dissolved: {}/{}",
            report.dissolved_count(),
            report.organizations.len()
        );
        println!();

        self.print_flyers(&report.flyers);
        println!();

        self.print_organizations(&report.organizations);
        println!();
    }

    fn print_flyers(&self, flyers: &[FlyerOutcome]) {
        println!("{}", "FLYERS".bold().yellow());

        if flyers.is_empty() {
            println!("  No flyers processed");
            return;
        }

        for outcome in flyers {
            match (&outcome.arrest, &outcome.error) {
                (_, Some(err)) => {
                    println!("  {} {} ({})", "SKIPPED".red(), outcome.flyer, err.dimmed());
                }
                (Some(ArrestOutcome::Arrested {
                    organization,
                    member,
                    newly_arrested,
                }), None) => {
                    println!(
                        "  {} {} -> {} in {} ({} new arrests)",
                        "ARREST".green(),
                        outcome.flyer,
                        member.bold(),
                        organization,
                        newly_arrested
                    );
                }
                _ => {
                    println!(
                        "  {} {} -> {:?} not on record",
                        "NO MATCH".yellow(),
                        outcome.flyer,
                        outcome.nickname.as_deref().unwrap_or_default()
                    );
                }
            }
        }
    }

    fn print_organizations(&self, organizations: &[OrganizationStatus]) {
        println!("{}", "ORGANIZATIONS".bold().yellow());

        for org in organizations {
            let status = if org.dissolved {
                "DISSOLVED".red().bold()
            } else {
                "ACTIVE".green()
            };
            println!(
                "  {} [{}] {}/{} in custody",
                org.name.bold(),
                status,
                org.arrested,
                org.members
            );
            for line in org.rendering.lines().skip(1) {
                println!("    {}", line.dimmed());
            }
        }
    }

    pub fn save<P: AsRef<Path>>(
        &self,
        report: &CaseReport,
        path: P,
        format: ReportOutputFormat,
    ) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        let content = format.serialize(report)?;
        fs::write(path, content).with_context(|| format!("writing {}", path.display()))?;
        println!("Report saved to: {}", path.display());
        Ok(())
    }
}

impl Default for ReportFormatter {
    fn default() -> Self {
        Self::new()
    }
}
