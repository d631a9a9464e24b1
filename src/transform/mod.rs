//! Conditional transform engine
//!
//! Runs once over the merged state, in one of two exclusive modes:
//!
//! - **Rename**: a new display name and/or a new group label is applied to
//!   the entries selected by the keyword predicates.
//! - **Sort**: resources are reordered by keyword priority, and optionally
//!   whole groups are reordered by the same scoring over group labels.
//!
//! Rename mode never reorders resources.

mod classify;
mod filter;
mod rename;
mod score;
mod sort;

pub use classify::{ClassifyRule, Classifier};
pub use filter::{EntryPredicates, KeywordFilter};
pub use rename::RenameOutcome;
pub use score::{KeywordScorer, ScoreDirection};
pub use sort::{SortOutcome, SortPlan};

use serde::Serialize;

use crate::merge::MergeState;
use crate::Result;

/// Transform mode, chosen by whether rename targets are configured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TransformMode {
    Rename,
    Sort,
}

/// Transform parameters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransformOptions {
    /// New display name for matching entries
    pub rename_name: Option<String>,

    /// New group label for matching entries
    pub rename_group: Option<String>,

    pub name_keywords: Vec<String>,
    pub resource_keywords: Vec<String>,
    pub group_keywords: Vec<String>,

    /// Unmatched first, matches last
    pub reverse: bool,

    /// Reorder whole groups by `group_keywords`
    pub reorder_groups: bool,

    /// Case-sensitive resource/group scoring (predicates are always case-insensitive)
    pub case_sensitive: bool,
}

impl TransformOptions {
    pub fn mode(&self) -> TransformMode {
        if self.rename_name.is_some() || self.rename_group.is_some() {
            TransformMode::Rename
        } else {
            TransformMode::Sort
        }
    }

    pub fn predicates(&self) -> EntryPredicates {
        EntryPredicates {
            name: KeywordFilter::new(&self.name_keywords),
            resource: KeywordFilter::new(&self.resource_keywords),
            group: KeywordFilter::new(&self.group_keywords),
        }
    }

    fn direction(&self) -> ScoreDirection {
        if self.reverse {
            ScoreDirection::Reverse
        } else {
            ScoreDirection::Forward
        }
    }
}

/// What a transform pass changed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TransformSummary {
    pub mode: TransformMode,
    pub renamed_entries: usize,
    pub renamed_groups: usize,
    pub regrouped_entries: usize,
    pub resources_reordered: usize,
    pub groups_reordered: bool,
}

impl TransformSummary {
    fn empty(mode: TransformMode) -> Self {
        Self {
            mode,
            renamed_entries: 0,
            renamed_groups: 0,
            regrouped_entries: 0,
            resources_reordered: 0,
            groups_reordered: false,
        }
    }
}

/// Apply the transform selected by `options` to the merged state
pub fn apply(state: &mut MergeState, options: &TransformOptions) -> Result<TransformSummary> {
    let mode = options.mode();
    let predicates = options.predicates();
    let mut summary = TransformSummary::empty(mode);

    match mode {
        TransformMode::Rename => {
            let outcome = rename::apply(
                state,
                options.rename_name.as_deref(),
                options.rename_group.as_deref(),
                &predicates,
            )?;
            summary.renamed_entries = outcome.renamed_entries;
            summary.renamed_groups = outcome.renamed_groups;
            summary.regrouped_entries = outcome.regrouped_entries;
        }
        TransformMode::Sort => {
            let plan = SortPlan {
                resource_keywords: &options.resource_keywords,
                group_keywords: &options.group_keywords,
                direction: options.direction(),
                reorder_groups: options.reorder_groups,
                case_sensitive: options.case_sensitive,
            };
            let outcome = sort::apply(state, &plan, &predicates);
            summary.resources_reordered = outcome.resources_reordered;
            summary.groups_reordered = outcome.groups_reordered;
        }
    }

    tracing::info!(?mode, "Transform applied");
    Ok(summary)
}
