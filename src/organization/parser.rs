// SPDX-License-Identifier: PMPL-1.0-or-later

//! Organization source parsing
//!
//! Two source shapes are accepted, picked by file extension:
//!
//! * roster text (default): `leader_key = N`, `boss = NICK`, and one
//!   `PARENT -> CHILD, CHILD` line per group of underlings. A parent must
//!   already be in the tree when its line is read.
//! * YAML (`.yaml` / `.yml`): a nested `boss` mapping with `underlings`.
//!
//! Either the whole tree is built or an error is returned. Chains of
//! command longer than [`MAX_DEPTH`] are rejected.

use super::{Member, Organization, MAX_DEPTH};
use crate::error::MalformedOrganizationError;
use regex::Regex;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Parse an organization file, naming the organization after the file stem
pub fn parse_file(path: &Path) -> Result<Organization, MalformedOrganizationError> {
    let name = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string());
    let content = fs::read_to_string(path)?;

    let is_yaml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"))
        .unwrap_or(false);

    if is_yaml {
        parse_yaml(&name, &content)
    } else {
        parse_roster(&name, &content)
    }
}

/// Flat arena node used while the roster is still being read
struct Draft {
    nickname: String,
    depth: usize,
    children: Vec<usize>,
}

/// Parse the line-oriented roster format
pub fn parse_roster(name: &str, source: &str) -> Result<Organization, MalformedOrganizationError> {
    let directive_re =
        Regex::new(r"^(leader_key|boss)\s*=\s*(.*)$").expect("directive pattern is valid");
    let edge_re = Regex::new(r"^(.*?)\s*->\s*(.*)$").expect("edge pattern is valid");

    let mut leader_key: Option<usize> = None;
    let mut arena: Vec<Draft> = Vec::new();
    let mut index_of: HashMap<String, usize> = HashMap::new();

    for (offset, raw) in source.lines().enumerate() {
        let line_no = offset + 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if let Some(caps) = directive_re.captures(line) {
            let value = caps[2].trim();
            match &caps[1] {
                "leader_key" => {
                    if leader_key.is_some() {
                        return Err(MalformedOrganizationError::DuplicateDirective {
                            line: line_no,
                            directive: "leader_key",
                        });
                    }
                    leader_key = Some(parse_leader_key(value, line_no)?);
                }
                _ => {
                    if !arena.is_empty() {
                        return Err(MalformedOrganizationError::DuplicateDirective {
                            line: line_no,
                            directive: "boss",
                        });
                    }
                    let nickname = require_nickname(value, line_no)?;
                    index_of.insert(nickname.clone(), 0);
                    arena.push(Draft {
                        nickname,
                        depth: 1,
                        children: Vec::new(),
                    });
                }
            }
            continue;
        }

        if let Some(caps) = edge_re.captures(line) {
            let parent = require_nickname(&caps[1], line_no)?;
            let Some(&parent_index) = index_of.get(&parent) else {
                return Err(MalformedOrganizationError::DanglingReference {
                    line: line_no,
                    nickname: parent,
                });
            };

            let children = caps[2].trim();
            if children.is_empty() {
                return Err(MalformedOrganizationError::Syntax {
                    line: line_no,
                    message: format!("`{parent}` lists no underlings"),
                });
            }

            let depth = arena[parent_index].depth + 1;
            if depth > MAX_DEPTH {
                return Err(MalformedOrganizationError::TooDeep {
                    line: line_no,
                    depth,
                });
            }

            for child in children.split(',') {
                let nickname = require_nickname(child, line_no)?;
                if index_of.contains_key(&nickname) {
                    return Err(MalformedOrganizationError::DuplicateMember {
                        line: line_no,
                        nickname,
                    });
                }
                let child_index = arena.len();
                index_of.insert(nickname.clone(), child_index);
                arena.push(Draft {
                    nickname,
                    depth,
                    children: Vec::new(),
                });
                arena[parent_index].children.push(child_index);
            }
            continue;
        }

        return Err(MalformedOrganizationError::Syntax {
            line: line_no,
            message: format!("unrecognized line `{line}`"),
        });
    }

    if arena.is_empty() {
        return Err(MalformedOrganizationError::MissingBoss);
    }
    let leader_key = leader_key.ok_or(MalformedOrganizationError::MissingLeaderKey)?;

    let boss = assemble(arena).ok_or(MalformedOrganizationError::MissingBoss)?;
    Ok(Organization::new(name, boss, leader_key))
}

/// Turn the arena into an owned tree, boss first in the result. Children
/// always sit at a higher index than their parent, so walking the arena
/// backwards finishes every subtree before its parent needs it.
fn assemble(arena: Vec<Draft>) -> Option<Member> {
    let mut built: Vec<Option<Member>> = (0..arena.len()).map(|_| None).collect();

    for (index, draft) in arena.into_iter().enumerate().rev() {
        let underlings = draft
            .children
            .iter()
            .filter_map(|&child| built[child].take())
            .collect();
        built[index] = Some(Member::with_underlings(draft.nickname, underlings));
    }

    built.into_iter().next().flatten()
}

fn parse_leader_key(value: &str, line: usize) -> Result<usize, MalformedOrganizationError> {
    match value.parse::<usize>() {
        Ok(key) if key > 0 => Ok(key),
        _ => Err(MalformedOrganizationError::InvalidLeaderKey {
            line,
            value: value.to_string(),
        }),
    }
}

/// Roster punctuation that can never be part of a nickname
const RESERVED: [&str; 3] = ["->", ",", "="];

fn require_nickname(raw: &str, line: usize) -> Result<String, MalformedOrganizationError> {
    let nickname = raw.trim();
    if nickname.is_empty() {
        return Err(MalformedOrganizationError::Syntax {
            line,
            message: "empty nickname".to_string(),
        });
    }
    if let Some(token) = RESERVED.iter().find(|token| nickname.contains(**token)) {
        return Err(MalformedOrganizationError::Syntax {
            line,
            message: format!("nickname `{nickname}` contains `{token}`"),
        });
    }
    Ok(nickname.to_string())
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct YamlOrganization {
    leader_key: Option<i64>,
    boss: Option<YamlMember>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct YamlMember {
    nickname: String,
    #[serde(default)]
    underlings: Vec<YamlMember>,
}

impl YamlMember {
    /// Levels below and including this node
    fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(self, 1)];
        while let Some((member, depth)) = stack.pop() {
            deepest = deepest.max(depth);
            stack.extend(member.underlings.iter().map(|underling| (underling, depth + 1)));
        }
        deepest
    }

    fn into_member(self) -> Result<Member, MalformedOrganizationError> {
        let nickname = require_nickname(&self.nickname, 0)?;
        let underlings = self
            .underlings
            .into_iter()
            .map(YamlMember::into_member)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Member::with_underlings(nickname, underlings))
    }
}

/// Parse the nested YAML format
pub fn parse_yaml(name: &str, source: &str) -> Result<Organization, MalformedOrganizationError> {
    let raw: YamlOrganization = serde_yaml::from_str(source)?;

    let boss = raw.boss.ok_or(MalformedOrganizationError::MissingBoss)?;
    let leader_key = match raw.leader_key {
        None => return Err(MalformedOrganizationError::MissingLeaderKey),
        Some(key) if key > 0 => key as usize,
        Some(key) => {
            return Err(MalformedOrganizationError::InvalidLeaderKey {
                line: 0,
                value: key.to_string(),
            })
        }
    };

    let depth = boss.depth();
    if depth > MAX_DEPTH {
        return Err(MalformedOrganizationError::TooDeep { line: 0, depth });
    }

    Ok(Organization::new(name, boss.into_member()?, leader_key))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROSTER: &str = "\
# The Phantoms
leader_key = 2
boss = GHOST

GHOST -> Viper, Shade, Rook
Shade -> Ash, Ember
GHOST -> Wraith
Ash -> Cinder
";

    fn nicknames(org: &Organization) -> Vec<String> {
        org.search(|_| true)
            .into_iter()
            .map(|m| m.nickname().to_string())
            .collect()
    }

    #[test]
    fn test_roster_builds_tree_in_definition_order() {
        let org = parse_roster("phantoms", ROSTER).expect("roster should parse");
        assert_eq!(org.name(), "phantoms");
        assert_eq!(org.leader_key(), 2);
        assert_eq!(org.boss().nickname(), "GHOST");
        assert_eq!(
            nicknames(&org),
            vec!["GHOST", "Viper", "Shade", "Ash", "Cinder", "Ember", "Rook", "Wraith"]
        );
        assert_eq!(org.boss().underlings().len(), 4, "later lines append to the parent");
    }

    #[test]
    fn test_roster_boss_only() {
        let org = parse_roster("solo", "boss = Lone\nleader_key = 1\n").unwrap();
        assert_eq!(org.member_count(), 1);
    }

    #[test]
    fn test_roster_missing_boss() {
        let err = parse_roster("x", "leader_key = 3\n").unwrap_err();
        assert!(matches!(err, MalformedOrganizationError::MissingBoss));
    }

    #[test]
    fn test_roster_missing_leader_key() {
        let err = parse_roster("x", "boss = A\nA -> B\n").unwrap_err();
        assert!(matches!(err, MalformedOrganizationError::MissingLeaderKey));
    }

    #[test]
    fn test_roster_rejects_zero_leader_key() {
        let err = parse_roster("x", "leader_key = 0\nboss = A\n").unwrap_err();
        assert!(matches!(
            err,
            MalformedOrganizationError::InvalidLeaderKey { line: 1, .. }
        ));
    }

    #[test]
    fn test_roster_dangling_parent() {
        let err = parse_roster("x", "leader_key = 1\nboss = A\nB -> C\n").unwrap_err();
        match err {
            MalformedOrganizationError::DanglingReference { line, nickname } => {
                assert_eq!(line, 3);
                assert_eq!(nickname, "B");
            }
            other => panic!("expected dangling reference, got {other:?}"),
        }
    }

    #[test]
    fn test_roster_edge_before_boss_is_dangling() {
        let err = parse_roster("x", "A -> B\nboss = A\nleader_key = 1\n").unwrap_err();
        assert!(matches!(
            err,
            MalformedOrganizationError::DanglingReference { line: 1, .. }
        ));
    }

    #[test]
    fn test_roster_rejects_cycles_and_sharing() {
        let looped = "leader_key = 1\nboss = A\nA -> B\nB -> A\n";
        assert!(matches!(
            parse_roster("x", looped).unwrap_err(),
            MalformedOrganizationError::DuplicateMember { line: 4, .. }
        ));

        let shared = "leader_key = 1\nboss = A\nA -> B, C\nC -> B\n";
        assert!(matches!(
            parse_roster("x", shared).unwrap_err(),
            MalformedOrganizationError::DuplicateMember { line: 4, .. }
        ));
    }

    #[test]
    fn test_roster_duplicate_directives() {
        let err = parse_roster("x", "leader_key = 1\nboss = A\nboss = B\n").unwrap_err();
        assert!(matches!(
            err,
            MalformedOrganizationError::DuplicateDirective {
                directive: "boss",
                ..
            }
        ));
    }

    #[test]
    fn test_roster_syntax_errors() {
        let err = parse_roster("x", "leader_key = 1\nboss = A\nA -> B,,C\n").unwrap_err();
        assert!(matches!(err, MalformedOrganizationError::Syntax { line: 3, .. }));

        let err = parse_roster("x", "leader_key = 1\nboss = A\nwhat is this\n").unwrap_err();
        assert!(matches!(err, MalformedOrganizationError::Syntax { line: 3, .. }));

        let err = parse_roster("x", "leader_key = 1\nboss = A\nA -> B -> C\n").unwrap_err();
        assert!(matches!(err, MalformedOrganizationError::Syntax { line: 3, .. }));

        let err = parse_roster("x", "leader_key = 1\nboss = A -> B\n").unwrap_err();
        assert!(matches!(err, MalformedOrganizationError::Syntax { line: 2, .. }));

        let err = parse_roster("x", "leader_key = 1\nboss = A\nA -> B = C\n").unwrap_err();
        assert!(matches!(err, MalformedOrganizationError::Syntax { line: 3, .. }));
    }

    /// `boss = M1` followed by `M1 -> M2`, ..., giving `levels` levels
    fn chain(levels: usize) -> String {
        let mut source = String::from("leader_key = 1\nboss = M1\n");
        for level in 1..levels {
            source.push_str(&format!("M{} -> M{}\n", level, level + 1));
        }
        source
    }

    #[test]
    fn test_roster_depth_cap() {
        let org = parse_roster("x", &chain(MAX_DEPTH)).expect("a chain at the cap parses");
        assert_eq!(org.member_count(), MAX_DEPTH);

        let err = parse_roster("x", &chain(50_000)).unwrap_err();
        match err {
            MalformedOrganizationError::TooDeep { line, depth } => {
                assert_eq!(depth, MAX_DEPTH + 1);
                assert_eq!(line, MAX_DEPTH + 2, "two directive lines precede the edges");
            }
            other => panic!("expected too deep, got {other:?}"),
        }
    }

    #[test]
    fn test_yaml_deep_nesting_is_rejected() {
        let mut source = String::from("leader_key: 1\nboss:\n");
        let mut indent = String::from("  ");
        for level in 0..300 {
            source.push_str(&format!("{indent}nickname: M{level}\n{indent}underlings:\n"));
            indent.push_str("  ");
            source.push_str(&format!("{indent}-\n"));
            indent.push_str("  ");
        }
        source.push_str(&format!("{indent}nickname: Last\n"));

        let err = parse_yaml("x", &source).unwrap_err();
        assert!(matches!(
            err,
            MalformedOrganizationError::TooDeep { .. } | MalformedOrganizationError::Yaml(_)
        ));
    }

    #[test]
    fn test_yaml_nested_tree() {
        let source = r#"
leader_key: 3
boss:
  nickname: Kingpin
  underlings:
    - nickname: Left
      underlings:
        - nickname: Deep
    - nickname: Right
"#;
        let org = parse_yaml("syndicate", source).expect("yaml should parse");
        assert_eq!(org.leader_key(), 3);
        assert_eq!(nicknames(&org), vec!["Kingpin", "Left", "Deep", "Right"]);
    }

    #[test]
    fn test_yaml_missing_pieces() {
        let err = parse_yaml("x", "leader_key: 1\n").unwrap_err();
        assert!(matches!(err, MalformedOrganizationError::MissingBoss));

        let err = parse_yaml("x", "boss:\n  nickname: A\n").unwrap_err();
        assert!(matches!(err, MalformedOrganizationError::MissingLeaderKey));

        let err = parse_yaml("x", "leader_key: -2\nboss:\n  nickname: A\n").unwrap_err();
        assert!(matches!(err, MalformedOrganizationError::InvalidLeaderKey { .. }));

        let err = parse_yaml("x", "leader_key: 1\nboss:\n  nickname: ' '\n").unwrap_err();
        assert!(matches!(err, MalformedOrganizationError::Syntax { .. }));
    }

    #[test]
    fn test_parse_file_dispatches_on_extension() {
        let dir = tempfile::TempDir::new().unwrap();
        let roster = dir.path().join("a_phantoms.txt");
        fs::write(&roster, ROSTER).unwrap();
        let yaml = dir.path().join("b_syndicate.yml");
        fs::write(&yaml, "leader_key: 1\nboss:\n  nickname: Kingpin\n").unwrap();

        assert_eq!(parse_file(&roster).unwrap().name(), "a_phantoms");
        assert_eq!(parse_file(&yaml).unwrap().boss().nickname(), "Kingpin");
        assert!(matches!(
            parse_file(&dir.path().join("missing.txt")).unwrap_err(),
            MalformedOrganizationError::Io(_)
        ));
    }
}
