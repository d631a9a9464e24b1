//! Sort mode: keyword-priority ordering of resources and groups

use crate::merge::MergeState;

use super::filter::EntryPredicates;
use super::score::{KeywordScorer, ScoreDirection};

/// Counts produced by a sort pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SortOutcome {
    /// Entries whose resource order changed
    pub resources_reordered: usize,

    /// Whether the group sequence changed
    pub groups_reordered: bool,
}

/// Sort parameters
#[derive(Debug, Clone, Copy)]
pub struct SortPlan<'a> {
    pub resource_keywords: &'a [String],
    pub group_keywords: &'a [String],
    pub direction: ScoreDirection,
    pub reorder_groups: bool,
    pub case_sensitive: bool,
}

/// Reorder resources within entries and, optionally, whole groups.
///
/// With group reordering on, the group keywords score group labels; with it
/// off they narrow which entries get their resources sorted.
pub fn apply(state: &mut MergeState, plan: &SortPlan<'_>, predicates: &EntryPredicates) -> SortOutcome {
    let mut outcome = SortOutcome::default();

    let resource_scorer =
        KeywordScorer::new(plan.resource_keywords, plan.direction, plan.case_sensitive);
    if !resource_scorer.is_empty() {
        for entry in state.entries_mut() {
            if !predicates.name_holds(entry) {
                continue;
            }
            if !plan.reorder_groups && !predicates.group_holds(entry) {
                continue;
            }
            if entry.resources.sort_by_key(|r| resource_scorer.score(r)) {
                outcome.resources_reordered += 1;
            }
        }
    }

    if plan.reorder_groups {
        let group_scorer =
            KeywordScorer::new(plan.group_keywords, plan.direction, plan.case_sensitive);
        if !group_scorer.is_empty() {
            outcome.groups_reordered = state.sort_groups_by_key(|label| group_scorer.score(label));
        }
    }

    tracing::debug!(
        reordered = outcome.resources_reordered,
        groups_reordered = outcome.groups_reordered,
        "Sort pass complete"
    );

    outcome
}
