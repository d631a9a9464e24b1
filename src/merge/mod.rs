//! Multi-document merge engine
//!
//! Folds parsed documents into one consolidated playlist. Resources are
//! deduplicated per logical entry, group membership follows the latest
//! occurrence, and entries a later document introduces are inserted right
//! after their last already-known neighbour from that document.

mod group_order;
mod state;

pub use group_order::{GroupOrder, InsertionCursor, Placement};
pub use state::{IngestStats, MergeState};
