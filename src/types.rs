// SPDX-License-Identifier: PMPL-1.0-or-later

//! Shared result types for a case run

use serde::{Deserialize, Serialize};

/// What came of looking a nickname up across the case's organizations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ArrestOutcome {
    /// No organization has a member by that nickname
    NotFound,
    Arrested {
        organization: String,
        member: String,
        /// Members whose flag flipped because of this arrest, target included
        newly_arrested: usize,
    },
}

impl ArrestOutcome {
    pub fn newly_arrested(&self) -> usize {
        match self {
            ArrestOutcome::NotFound => 0,
            ArrestOutcome::Arrested { newly_arrested, .. } => *newly_arrested,
        }
    }
}

/// One processed flyer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlyerOutcome {
    pub flyer: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arrest: Option<ArrestOutcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Per-organization line of the case report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationStatus {
    pub name: String,
    pub dissolved: bool,
    pub members: usize,
    pub arrested: usize,
    pub rendering: String,
}

/// Complete case report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseReport {
    pub created_at: String,
    pub captain: String,
    pub total_arrests: usize,
    pub organizations: Vec<OrganizationStatus>,
    pub flyers: Vec<FlyerOutcome>,
}

impl CaseReport {
    pub fn dissolved_count(&self) -> usize {
        self.organizations.iter().filter(|org| org.dissolved).count()
    }
}
