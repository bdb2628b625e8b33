// SPDX-License-Identifier: PMPL-1.0-or-later

//! Case configuration
//!
//! A case directory may carry a `case.yaml` manifest naming the captain and
//! the two input folders. Everything is optional; command-line flags win
//! over the manifest.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const MANIFEST_FILE: &str = "case.yaml";
pub const DEFAULT_CAPTAIN: &str = "Captain Morgan";
pub const DEFAULT_ORGANIZATIONS_DIR: &str = "CriminalOrganizations";
pub const DEFAULT_FLYERS_DIR: &str = "Flyers";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CaseConfig {
    pub captain: String,
    pub organizations_dir: PathBuf,
    pub flyers_dir: PathBuf,
}

impl Default for CaseConfig {
    fn default() -> Self {
        Self {
            captain: DEFAULT_CAPTAIN.to_string(),
            organizations_dir: PathBuf::from(DEFAULT_ORGANIZATIONS_DIR),
            flyers_dir: PathBuf::from(DEFAULT_FLYERS_DIR),
        }
    }
}

impl CaseConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading case config {}", path.display()))?;
        serde_yaml::from_str(&content)
            .with_context(|| format!("parsing case config {}", path.display()))
    }

    /// Explicit config file if given, otherwise `<case>/case.yaml` if it
    /// exists, otherwise defaults.
    pub fn load(case_dir: &Path, explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        let manifest = case_dir.join(MANIFEST_FILE);
        if manifest.is_file() {
            Self::from_file(&manifest)
        } else {
            Ok(Self::default())
        }
    }

    pub fn with_captain(mut self, captain: Option<String>) -> Self {
        if let Some(captain) = captain {
            self.captain = captain;
        }
        self
    }

    pub fn organizations_path(&self, case_dir: &Path) -> PathBuf {
        case_dir.join(&self.organizations_dir)
    }

    pub fn flyers_path(&self, case_dir: &Path) -> PathBuf {
        case_dir.join(&self.flyers_dir)
    }
}
