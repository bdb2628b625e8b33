// SPDX-License-Identifier: PMPL-1.0-or-later

//! Criminal organization hierarchies
//!
//! An [`Organization`] owns a tree of [`Member`]s rooted at its boss. Every
//! member exclusively owns its underlings, so a tree built here can never
//! share or loop back to a node. After construction the shape is frozen;
//! the only thing that ever changes is a member's `arrested` flag, and that
//! only goes one way.

pub mod parser;

use std::fmt;

pub use parser::{parse_file, parse_roster, parse_yaml};

/// Deepest chain of command a parsed organization may have, boss included
pub const MAX_DEPTH: usize = 1_000;

/// A single node of an organization tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    nickname: String,
    arrested: bool,
    underlings: Vec<Member>,
}

impl Member {
    pub fn new(nickname: impl Into<String>) -> Self {
        Self {
            nickname: nickname.into(),
            arrested: false,
            underlings: Vec::new(),
        }
    }

    pub fn with_underlings(nickname: impl Into<String>, underlings: Vec<Member>) -> Self {
        Self {
            nickname: nickname.into(),
            arrested: false,
            underlings,
        }
    }

    pub fn nickname(&self) -> &str {
        &self.nickname
    }

    pub fn underlings(&self) -> &[Member] {
        &self.underlings
    }

    /// Flags below this member may change, the shape may not
    pub(crate) fn underlings_mut(&mut self) -> &mut [Member] {
        &mut self.underlings
    }

    pub fn is_arrested(&self) -> bool {
        self.arrested
    }

    /// Mark the member arrested. Returns `true` only when this call made
    /// the transition, so callers can count each member exactly once.
    pub fn arrest(&mut self) -> bool {
        if self.arrested {
            return false;
        }
        self.arrested = true;
        true
    }

    /// Case-insensitive nickname comparison
    pub fn answers_to(&self, nickname: &str) -> bool {
        self.nickname.to_uppercase() == nickname.to_uppercase()
    }

    /// Number of members in this subtree, including `self`
    pub fn subtree_size(&self) -> usize {
        self.count_where(|_| true)
    }

    fn arrested_in_subtree(&self) -> usize {
        self.count_where(Member::is_arrested)
    }

    fn count_where<P>(&self, predicate: P) -> usize
    where
        P: Fn(&Member) -> bool,
    {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(member) = stack.pop() {
            if predicate(member) {
                count += 1;
            }
            stack.extend(member.underlings.iter());
        }
        count
    }
}

impl Drop for Member {
    // Flatten the subtree first so long chains do not drop recursively.
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.underlings);
        while let Some(mut member) = pending.pop() {
            pending.append(&mut member.underlings);
        }
    }
}

/// Index path from the boss to a member: each entry picks an underling
/// of the previous node. The empty path is the boss.
pub type MemberPath = Vec<usize>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Organization {
    name: String,
    boss: Member,
    leader_key: usize,
}

impl Organization {
    pub fn new(name: impl Into<String>, boss: Member, leader_key: usize) -> Self {
        Self {
            name: name.into(),
            boss,
            leader_key,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn boss(&self) -> &Member {
        &self.boss
    }

    pub fn leader_key(&self) -> usize {
        self.leader_key
    }

    /// An organization is dissolved once its boss is arrested, no matter
    /// how many underlings are still free.
    pub fn is_dissolved(&self) -> bool {
        self.boss.arrested
    }

    pub fn member_count(&self) -> usize {
        self.boss.subtree_size()
    }

    pub fn arrested_count(&self) -> usize {
        self.boss.arrested_in_subtree()
    }

    /// All members satisfying `predicate`, in pre-order: a node is tested
    /// before its underlings, and underlings are walked in the order they
    /// were defined.
    pub fn search<P>(&self, predicate: P) -> Vec<&Member>
    where
        P: Fn(&Member) -> bool,
    {
        self.locate(predicate)
            .iter()
            .filter_map(|path| self.member(path))
            .collect()
    }

    /// Same traversal as [`Organization::search`], returning paths so the
    /// caller can come back for a mutable borrow.
    pub fn locate<P>(&self, predicate: P) -> Vec<MemberPath>
    where
        P: Fn(&Member) -> bool,
    {
        let mut found = Vec::new();
        let mut stack: Vec<(&Member, MemberPath)> = vec![(&self.boss, Vec::new())];

        while let Some((member, path)) = stack.pop() {
            if predicate(member) {
                found.push(path.clone());
            }
            // Reverse push keeps the first-defined underling on top.
            for (index, underling) in member.underlings.iter().enumerate().rev() {
                let mut child_path = path.clone();
                child_path.push(index);
                stack.push((underling, child_path));
            }
        }

        found
    }

    /// First member, in pre-order, whose nickname matches case-insensitively
    pub fn find_by_nickname(&self, nickname: &str) -> Option<MemberPath> {
        self.locate(|member| member.answers_to(nickname))
            .into_iter()
            .next()
    }

    pub fn member(&self, path: &[usize]) -> Option<&Member> {
        path.iter()
            .try_fold(&self.boss, |member, &index| member.underlings.get(index))
    }

    pub(crate) fn member_mut(&mut self, path: &[usize]) -> Option<&mut Member> {
        path.iter()
            .try_fold(&mut self.boss, |member, &index| member.underlings.get_mut(index))
    }
}

impl fmt::Display for Organization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} (leader key {})", self.name, self.leader_key)?;

        let mut stack: Vec<(&Member, usize)> = vec![(&self.boss, 0)];
        while let Some((member, depth)) = stack.pop() {
            let role = if depth == 0 { "Boss: " } else { "- " };
            let marker = if member.arrested { " [ARRESTED]" } else { "" };
            writeln!(
                f,
                "{}{}{}{}",
                "  ".repeat(depth),
                role,
                member.nickname,
                marker
            )?;
            for underling in member.underlings.iter().rev() {
                stack.push((underling, depth + 1));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Organization {
        // GHOST
        // ├── Viper
        // │   └── Ash
        // └── Shade
        //     ├── Ember
        //     └── viper
        Organization::new(
            "sample",
            Member::with_underlings(
                "GHOST",
                vec![
                    Member::with_underlings("Viper", vec![Member::new("Ash")]),
                    Member::with_underlings(
                        "Shade",
                        vec![Member::new("Ember"), Member::new("viper")],
                    ),
                ],
            ),
            2,
        )
    }

    #[test]
    fn test_search_is_preorder_in_definition_order() {
        let org = sample();
        let visited: Vec<&str> = org
            .search(|_| true)
            .into_iter()
            .map(Member::nickname)
            .collect();
        assert_eq!(visited, vec!["GHOST", "Viper", "Ash", "Shade", "Ember", "viper"]);
    }

    #[test]
    fn test_search_accumulates_all_matches() {
        let org = sample();
        let hits = org.search(|m| m.answers_to("VIPER"));
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].nickname(), "Viper", "pre-order puts the shallower branch first");
        assert_eq!(hits[1].nickname(), "viper");
    }

    #[test]
    fn test_search_no_match_is_empty() {
        let org = sample();
        assert!(org.search(|m| m.answers_to("nobody")).is_empty());
        assert!(org.find_by_nickname("nobody").is_none());
    }

    #[test]
    fn test_boss_is_tested_first() {
        let org = sample();
        assert_eq!(org.find_by_nickname("ghost"), Some(vec![]));
    }

    #[test]
    fn test_member_paths_resolve() {
        let mut org = sample();
        let path = org.find_by_nickname("ember").expect("Ember is in the tree");
        assert_eq!(path, vec![1, 0]);
        assert_eq!(org.member(&path).map(Member::nickname), Some("Ember"));

        let ember = org.member_mut(&path).expect("path is valid");
        assert!(ember.arrest());
        assert!(org.member(&[5]).is_none());
        assert_eq!(org.arrested_count(), 1);
    }

    #[test]
    fn test_arrest_is_monotonic() {
        let mut member = Member::new("Rook");
        assert!(!member.is_arrested());
        assert!(member.arrest());
        assert!(!member.arrest(), "second arrest must not report a transition");
        assert!(member.is_arrested());
    }

    #[test]
    fn test_dissolved_tracks_boss_only() {
        let mut org = sample();
        let ash = org.find_by_nickname("ash").unwrap();
        org.member_mut(&ash).unwrap().arrest();
        assert!(!org.is_dissolved());

        org.member_mut(&[]).unwrap().arrest();
        assert!(org.is_dissolved());
    }

    #[test]
    fn test_long_chain_counts_without_recursion() {
        let mut member = Member::new("M50000");
        for i in (0..50_000).rev() {
            member = Member::with_underlings(format!("M{i}"), vec![member]);
        }
        let mut org = Organization::new("chain", member, 1);

        assert_eq!(org.member_count(), 50_001);
        org.member_mut(&[0, 0]).unwrap().arrest();
        assert_eq!(org.arrested_count(), 1);
        drop(org);
    }

    #[test]
    fn test_accessors_expose_shape_read_only() {
        let org = sample();
        let shade = &org.boss().underlings()[1];
        assert_eq!(shade.nickname(), "Shade");
        let names: Vec<&str> = shade.underlings().iter().map(Member::nickname).collect();
        assert_eq!(names, vec!["Ember", "viper"]);
    }

    #[test]
    fn test_counts_and_rendering() {
        let mut org = sample();
        assert_eq!(org.member_count(), 6);
        org.member_mut(&[1]).unwrap().arrest();

        let rendered = org.to_string();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "sample (leader key 2)");
        assert_eq!(lines[1], "Boss: GHOST");
        assert_eq!(lines[2], "  - Viper");
        assert_eq!(lines[3], "    - Ash");
        assert_eq!(lines[4], "  - Shade [ARRESTED]");
        assert!(rendered.ends_with('\n'));
    }
}
