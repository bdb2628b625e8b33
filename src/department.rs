// SPDX-License-Identifier: PMPL-1.0-or-later

//! Police department: runs one case from start to finish
//!
//! Organizations are loaded once, in file-name order. Flyers are then
//! taken in whatever order the directory hands them out: each one is
//! decoded, its nickname looked up across the organizations (first match
//! wins), and the match arrested along with its cascade. A flyer that
//! cannot be decoded is logged and skipped.

use crate::arrest::{self, ArrestLedger};
use crate::cipher::FlyerCipher;
use crate::config::CaseConfig;
use crate::error::DecodeError;
use crate::organization::{self, Organization};
use crate::report;
use crate::types::{ArrestOutcome, CaseReport, FlyerOutcome};
use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

#[derive(Debug, Clone)]
pub struct PoliceDepartment {
    captain: String,
    organizations: Vec<Organization>,
    ledger: ArrestLedger,
    outcomes: Vec<FlyerOutcome>,
}

impl PoliceDepartment {
    pub fn new(captain: impl Into<String>) -> Self {
        Self::with_organizations(captain, Vec::new())
    }

    /// Department over organizations that are already in case order
    pub fn with_organizations(captain: impl Into<String>, organizations: Vec<Organization>) -> Self {
        Self {
            captain: captain.into(),
            organizations,
            ledger: ArrestLedger::new(),
            outcomes: Vec::new(),
        }
    }

    pub fn captain(&self) -> &str {
        &self.captain
    }

    pub fn organizations(&self) -> &[Organization] {
        &self.organizations
    }

    pub fn total_arrests(&self) -> usize {
        self.ledger.total()
    }

    pub fn outcomes(&self) -> &[FlyerOutcome] {
        &self.outcomes
    }

    /// Load every organization file in `dir`, sorted by file name. Any
    /// malformed file aborts the setup and nothing is added.
    pub fn set_up_organizations(&mut self, dir: &Path) -> Result<usize> {
        let mut files = list_case_files(dir)?;
        files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

        let mut loaded = Vec::with_capacity(files.len());
        for file in &files {
            let org = organization::parse_file(file)
                .with_context(|| format!("malformed organization {}", file.display()))?;
            info!(
                organization = org.name(),
                boss = %org.boss().nickname(),
                members = org.member_count(),
                leader_key = org.leader_key(),
                "organization on record"
            );
            loaded.push(org);
        }

        let count = loaded.len();
        self.organizations.extend(loaded);
        Ok(count)
    }

    /// Decode a flyer stream into the nickname it hides
    pub fn decipher<R: BufRead>(&self, reader: R) -> Result<String, DecodeError> {
        let cipher = FlyerCipher::open(reader)?;
        let index = cipher.organization_index(self.organizations.len())?;
        let leader_key = self.organizations[index].leader_key();
        cipher.reveal(leader_key)
    }

    pub fn decipher_message(&self, flyer: &Path) -> Result<String, DecodeError> {
        let file = File::open(flyer)?;
        self.decipher(BufReader::new(file))
    }

    /// Arrest the first member answering to `nickname`, searching the
    /// organizations in order, and cascade below them.
    pub fn arrest(&mut self, nickname: &str) -> ArrestOutcome {
        for org in self.organizations.iter_mut() {
            let Some(path) = org.find_by_nickname(nickname) else {
                continue;
            };
            let organization = org.name().to_string();
            let Some(target) = org.member_mut(&path) else {
                continue;
            };

            let member = target.nickname().to_string();
            let newly_arrested = arrest::arrest_and_cascade(target, &mut self.ledger);
            info!(
                organization = %organization,
                member = %member,
                newly_arrested,
                total = self.ledger.total(),
                "arrest made"
            );
            return ArrestOutcome::Arrested {
                organization,
                member,
                newly_arrested,
            };
        }

        info!(nickname, "no member answers to this nickname");
        ArrestOutcome::NotFound
    }

    /// Decode one flyer and act on it. Decode failures are recorded, not
    /// returned.
    pub fn process_flyer(&mut self, flyer: &Path) -> &FlyerOutcome {
        let name = flyer
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| flyer.display().to_string());

        let outcome = match self.decipher_message(flyer) {
            Ok(nickname) => {
                debug!(flyer = %name, nickname = %nickname, "flyer decoded");
                let arrest = self.arrest(&nickname);
                FlyerOutcome {
                    flyer: name,
                    nickname: Some(nickname),
                    arrest: Some(arrest),
                    error: None,
                }
            }
            Err(err) => {
                warn!(flyer = %name, error = %err, "skipping flyer");
                FlyerOutcome {
                    flyer: name,
                    nickname: None,
                    arrest: None,
                    error: Some(err.to_string()),
                }
            }
        };

        self.outcomes.push(outcome);
        &self.outcomes[self.outcomes.len() - 1]
    }

    /// Process every flyer in `dir` in directory order
    pub fn process_flyers(&mut self, dir: &Path) -> Result<usize> {
        let flyers = list_case_files(dir)?;
        for flyer in &flyers {
            self.process_flyer(flyer);
        }
        Ok(flyers.len())
    }

    pub fn report(&self) -> CaseReport {
        report::generate_case_report(self)
    }
}

/// Regular, non-hidden files directly inside `dir`, in directory order
fn list_case_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        anyhow::bail!("Not a directory: {}", dir.display());
    }

    let mut files = Vec::new();
    let entries = fs::read_dir(dir).with_context(|| format!("listing {}", dir.display()))?;
    for entry in entries.flatten() {
        let path = entry.path();
        let hidden = entry.file_name().to_string_lossy().starts_with('.');
        if path.is_file() && !hidden {
            files.push(path);
        }
    }
    Ok(files)
}

/// Run a whole case directory: set up, work every flyer, and hand back the
/// department for reporting.
pub fn run_case(case_dir: &Path, config: &CaseConfig) -> Result<PoliceDepartment> {
    let mut department = PoliceDepartment::new(config.captain.clone());

    let organizations_dir = config.organizations_path(case_dir);
    let count = department.set_up_organizations(&organizations_dir)?;
    info!(count, dir = %organizations_dir.display(), "organizations loaded");

    let flyers_dir = config.flyers_path(case_dir);
    let processed = department.process_flyers(&flyers_dir)?;
    info!(
        processed,
        total_arrests = department.total_arrests(),
        "flyers processed"
    );

    Ok(department)
}
