// SPDX-License-Identifier: PMPL-1.0-or-later

//! Cascading arrests
//!
//! Once a target is located it is arrested directly, then the cascade
//! walks down from its underlings. At every level the whole frontier is
//! arrested, but only one member is followed further: the one with the
//! most underlings, earliest wins on a tie. Branches that lose that
//! comparison are left alone below the first level.

use crate::organization::Member;

/// Running arrest count for a case
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArrestLedger {
    total: usize,
}

impl ArrestLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// Arrest `member`, counting it only if it was still free
    pub fn book(&mut self, member: &mut Member) -> bool {
        let fresh = member.arrest();
        if fresh {
            self.total += 1;
        }
        fresh
    }
}

/// Arrest `target` and run the cascade below it. Returns how many members
/// this call newly arrested.
pub fn arrest_and_cascade(target: &mut Member, ledger: &mut ArrestLedger) -> usize {
    let before = ledger.total();
    ledger.book(target);
    cascade(target.underlings_mut(), ledger);
    ledger.total() - before
}

/// Arrest every member of `frontier`, then descend into the underlings of
/// the widest one, until a frontier comes up empty.
pub fn cascade(frontier: &mut [Member], ledger: &mut ArrestLedger) {
    let mut frontier = frontier;

    while !frontier.is_empty() {
        for member in frontier.iter_mut() {
            ledger.book(member);
        }

        let next = widest(frontier);
        let current = frontier;
        frontier = current[next].underlings_mut();
    }
}

/// Index of the first member with strictly the most underlings
fn widest(frontier: &[Member]) -> usize {
    let mut max = 0;
    let mut index = 0;
    for (i, member) in frontier.iter().enumerate() {
        let width = member.underlings().len();
        if width > max {
            max = width;
            index = i;
        }
    }
    index
}
