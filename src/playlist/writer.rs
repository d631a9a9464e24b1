//! Serializer: merged state back to M3U text

use crate::merge::MergeState;

use super::attrs;
use super::entry::{Entry, DEFAULT_GROUP};

/// Line separator used in the output document
pub const LINE_SEPARATOR: &str = "\n";

/// Rendering options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Emit comment/option lines (`#EXTVLCOPT:` and friends)
    pub keep_config: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { keep_config: true }
    }
}

/// Render the merged state into output lines
pub fn render_lines(state: &MergeState, options: &RenderOptions) -> Vec<String> {
    let mut lines = Vec::new();

    if let Some(header) = state.header() {
        lines.push(header.to_string());
    }

    let mut previous_group: Option<&str> = None;
    for entry in state.ordered_entries() {
        lines.push(entry.rendered_metadata_line());

        if let Some(ref tag) = entry.group_tag_line {
            if needs_tag_line(entry, previous_group) {
                lines.push(tag.clone());
            }
        }

        if options.keep_config {
            lines.extend(entry.config_lines.iter().map(str::to_string));
        }

        lines.extend(entry.resources.iter().map(str::to_string));
        previous_group = Some(entry.group.as_str());
    }

    lines
}

/// Render the merged state into a single document
pub fn render(state: &MergeState, options: &RenderOptions) -> String {
    render_lines(state, options).join(LINE_SEPARATOR)
}

/// A tag line is emitted for the first entry after a group transition, and
/// for any later entry whose metadata line alone would resolve elsewhere.
fn needs_tag_line(entry: &Entry, previous_group: Option<&str>) -> bool {
    if previous_group != Some(entry.group.as_str()) {
        return true;
    }

    let without_tag = entry
        .metadata_line
        .as_deref()
        .and_then(attrs::inline_group)
        .unwrap_or_else(|| DEFAULT_GROUP.to_string());
    without_tag != entry.group
}
