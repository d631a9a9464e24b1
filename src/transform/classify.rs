//! Name-based classification into fixed groups
//!
//! Rules move every entry whose display name contains a keyword into a
//! target group. Classified groups are placed ahead of all other groups in
//! rule order. Members of a classified group keep the order in which they
//! were first discovered, and `numeric` rules order them by the channel number
//! that follows the keyword first (`CCTV-5` sorts before `CCTV-13`).

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::merge::MergeState;
use crate::Result;

/// One classification rule, as written in the configuration file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifyRule {
    /// Case-insensitive substring of the display name
    pub keyword: String,

    /// Target group label
    pub group: String,

    /// Order members by the number following the keyword
    #[serde(default)]
    pub numeric: bool,
}

#[derive(Debug)]
struct CompiledRule {
    keyword: String,
    group: String,
    number: Option<Regex>,
}

/// Compiled rule set
#[derive(Debug, Default)]
pub struct Classifier {
    rules: Vec<CompiledRule>,
}

impl Classifier {
    pub fn new(rules: &[ClassifyRule]) -> Result<Self> {
        let rules = rules
            .iter()
            .map(|rule| {
                let number = if rule.numeric {
                    let pattern = format!(r"(?i){}-?(\d+)", regex::escape(rule.keyword.trim()));
                    Some(Regex::new(&pattern)?)
                } else {
                    None
                };
                Ok(CompiledRule {
                    keyword: rule.keyword.trim().to_lowercase(),
                    group: rule.group.clone(),
                    number,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { rules })
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Index of the first rule matching a display name
    fn rule_for(&self, name: &str) -> Option<usize> {
        let name = name.to_lowercase();
        self.rules.iter().position(|r| name.contains(r.keyword.as_str()))
    }

    /// Apply the rules, returning how many entries matched one
    pub fn apply(&self, state: &mut MergeState) -> usize {
        if self.is_empty() {
            return 0;
        }

        let classified = state
            .entries()
            .filter(|entry| self.rule_for(&entry.name).is_some())
            .count();

        let moved = state.regroup(|entry| {
            self.rule_for(&entry.name)
                .map(|index| self.rules[index].group.clone())
        });

        // Members follow first discovery; numeric rules order by channel number first
        for rule in self.rules.iter() {
            let number = rule.number.as_ref();
            state.sort_group_members_by_key(&rule.group, |entry| {
                let channel = number.map_or(0, |pattern| channel_number(pattern, &entry.name));
                (channel, entry.origin_index)
            });
        }

        state.sort_groups_by_key(|label| {
            self.rules
                .iter()
                .position(|r| &r.group == label)
                .unwrap_or(usize::MAX)
        });

        tracing::info!(classified, moved, "Applied classification rules");
        classified
    }
}

/// Number following the keyword; unnumbered names sort last
fn channel_number(pattern: &Regex, name: &str) -> u32 {
    pattern
        .captures(name)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(u32::MAX)
}
