// SPDX-License-Identifier: PMPL-1.0-or-later

//! Report generation logic

use crate::department::PoliceDepartment;
use crate::types::*;
use chrono::Utc;

pub struct ReportGenerator;

impl ReportGenerator {
    pub fn new() -> Self {
        Self
    }

    pub fn generate(&self, department: &PoliceDepartment) -> CaseReport {
        let organizations = department
            .organizations()
            .iter()
            .map(|org| OrganizationStatus {
                name: org.name().to_string(),
                dissolved: org.is_dissolved(),
                members: org.member_count(),
                arrested: org.arrested_count(),
                rendering: org.to_string(),
            })
            .collect();

        CaseReport {
            created_at: Utc::now().to_rfc3339(),
            captain: department.captain().to_string(),
            total_arrests: department.total_arrests(),
            organizations,
            flyers: department.outcomes().to_vec(),
        }
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}
