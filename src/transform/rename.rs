//! Rename mode: conditional entry and group renames

use std::collections::HashSet;

use crate::merge::MergeState;
use crate::{M3uMergeError, Result};

use super::filter::EntryPredicates;

/// Counts produced by a rename pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenameOutcome {
    pub renamed_entries: usize,
    pub renamed_groups: usize,
    pub regrouped_entries: usize,
}

/// Apply the configured renames.
///
/// Entry rename requires the name and resource predicates. Group rename
/// requires the group predicate plus whichever of the name and resource
/// predicates were supplied. All predicates are evaluated against the state
/// before any rename is applied.
pub fn apply(
    state: &mut MergeState,
    new_name: Option<&str>,
    new_group: Option<&str>,
    predicates: &EntryPredicates,
) -> Result<RenameOutcome> {
    if new_group.is_some() && !predicates.group.is_set() {
        return Err(M3uMergeError::MissingGroupForRename);
    }

    let mut outcome = RenameOutcome::default();

    let group_moves: HashSet<String> = match new_group {
        Some(target) => state
            .entries()
            .filter(|entry| entry.group != target)
            .filter(|entry| {
                predicates.group_holds(entry)
                    && predicates.resource_holds(entry)
                    && predicates.name_holds(entry)
            })
            .map(|entry| entry.key.clone())
            .collect(),
        None => HashSet::new(),
    };

    if let Some(name) = new_name {
        for entry in state.entries_mut() {
            if entry.name == name {
                continue;
            }
            if predicates.name_holds(entry) && predicates.resource_holds(entry) {
                tracing::debug!(key = %entry.key, from = %entry.name, to = %name, "Renaming entry");
                entry.rename(name);
                outcome.renamed_entries += 1;
            }
        }
    }

    if let Some(target) = new_group {
        let mut source_groups = HashSet::new();
        outcome.regrouped_entries = state.regroup(|entry| {
            if group_moves.contains(&entry.key) {
                source_groups.insert(entry.group.clone());
                Some(target.to_string())
            } else {
                None
            }
        });
        outcome.renamed_groups = source_groups.len();
        tracing::debug!(
            target = %target,
            groups = ?source_groups,
            entries = outcome.regrouped_entries,
            "Renamed groups"
        );
    }

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::playlist::{KeyPolicy, ParsedDocument};
    use crate::transform::filter::KeywordFilter;

    const DOC: &str = "#EXTINF:-1 group-title=\"News HD\",CNN\nhttp://cdn.a/cnn\nhttp://backup/cnn\n\
                       #EXTINF:-1 tvg-name=\"BBC\" group-title=\"News HD\",BBC\nhttp://cdn.a/bbc\n\
                       #EXTINF:-1,ESPN\n#EXTGRP:Sports\nhttp://cdn.b/espn\n\
                       #EXTINF:-1,Local\nhttp://cdn.a/local\n";

    fn state() -> MergeState {
        let mut state = MergeState::new(KeyPolicy::Exact);
        state.ingest(ParsedDocument::parse(DOC, &KeyPolicy::Exact));
        state
    }

    fn predicates(name: &[&str], resource: &[&str], group: &[&str]) -> EntryPredicates {
        EntryPredicates {
            name: KeywordFilter::new(name.iter().copied()),
            resource: KeywordFilter::new(resource.iter().copied()),
            group: KeywordFilter::new(group.iter().copied()),
        }
    }

    #[test]
    fn test_group_rename_requires_group_keywords() {
        let mut state = state();
        let result = apply(&mut state, None, Some("World"), &predicates(&[], &[], &[]));
        assert!(matches!(result, Err(M3uMergeError::MissingGroupForRename)));
    }

    #[test]
    fn test_entry_rename_needs_name_and_resource_match() {
        let mut state = state();
        let outcome = apply(
            &mut state,
            Some("BBC One"),
            None,
            &predicates(&["bbc", "espn"], &["cdn.a"], &[]),
        )
        .unwrap();

        assert_eq!(outcome.renamed_entries, 1);
        let bbc = state.entry("BBC").unwrap();
        assert_eq!(bbc.name, "BBC One");
        assert_eq!(
            bbc.metadata_line.as_deref(),
            Some("#EXTINF:-1 tvg-name=\"BBC One\" group-title=\"News HD\",BBC One")
        );
        // ESPN matches the name keywords but none of its resources match
        assert_eq!(state.entry("ESPN").unwrap().name, "ESPN");
    }

    #[test]
    fn test_unconditional_group_rename_within_matching_groups() {
        let mut state = state();
        let outcome = apply(&mut state, None, Some("News"), &predicates(&[], &[], &["hd"])).unwrap();

        assert_eq!(outcome.regrouped_entries, 2);
        assert_eq!(outcome.renamed_groups, 1);
        assert_eq!(state.group("News").unwrap().keys(), ["CNN", "BBC"]);
        assert!(state.group("News HD").unwrap().is_empty());
        assert_eq!(
            state.entry("CNN").unwrap().inline_group().as_deref(),
            Some("News")
        );
    }

    #[test]
    fn test_group_rename_with_resource_filter() {
        let mut state = state();
        let outcome = apply(
            &mut state,
            None,
            Some("Backed up"),
            &predicates(&[], &["backup"], &["news"]),
        )
        .unwrap();

        assert_eq!(outcome.regrouped_entries, 1);
        assert_eq!(state.entry("CNN").unwrap().group, "Backed up");
        assert_eq!(state.entry("BBC").unwrap().group, "News HD");
    }

    #[test]
    fn test_group_rename_patches_tag_line() {
        let mut state = state();
        apply(&mut state, None, Some("Sport"), &predicates(&[], &[], &["sports"])).unwrap();

        let espn = state.entry("ESPN").unwrap();
        assert_eq!(espn.group_tag_line.as_deref(), Some("#EXTGRP:Sport"));
        assert_eq!(espn.metadata_line.as_deref(), Some("#EXTINF:-1,ESPN"));
    }

    #[test]
    fn test_group_rename_synthesizes_attribute() {
        let mut state = state();
        apply(
            &mut state,
            None,
            Some("Regional"),
            &predicates(&["local"], &[], &["unclassified"]),
        )
        .unwrap();

        assert_eq!(
            state.entry("Local").unwrap().metadata_line.as_deref(),
            Some("#EXTINF:-1 group-title=\"Regional\",Local")
        );
    }
}
