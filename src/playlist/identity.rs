//! Identity keys and group resolution
//!
//! Decides when two entries describe the same logical channel and which
//! group label an entry belongs to.

use serde::{Deserialize, Serialize};

use super::attrs;
use super::entry::DEFAULT_GROUP;

/// Default designator stripped by normalized keys ("台", station)
pub const DEFAULT_DESIGNATOR: char = '台';

/// Identity mode as written in the configuration file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentityMode {
    /// Display name as-is
    #[default]
    Exact,

    /// Hyphens and one trailing designator removed, upper-cased
    Normalized,
}

/// Identity key policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPolicy {
    /// `key = name`, case-sensitive
    Exact,

    /// `CCTV-1`, `cctv1` and `CCTV1台` all map to `CCTV1`
    Normalized { designator: char },
}

impl Default for KeyPolicy {
    fn default() -> Self {
        Self::Exact
    }
}

impl KeyPolicy {
    /// Build a policy from the configured mode
    pub fn from_mode(mode: IdentityMode, designator: char) -> Self {
        match mode {
            IdentityMode::Exact => Self::Exact,
            IdentityMode::Normalized => Self::Normalized { designator },
        }
    }

    /// Compute the identity key for a display name
    pub fn key(&self, name: &str) -> String {
        match *self {
            KeyPolicy::Exact => name.trim().to_string(),
            KeyPolicy::Normalized { designator } => {
                let stripped = name.trim().replace('-', "");
                let stripped = stripped.strip_suffix(designator).unwrap_or(&stripped);
                stripped.trim().to_uppercase()
            }
        }
    }

    /// Whether a display name is the canonical spelling of its key.
    ///
    /// Only meaningful in normalized mode, where names written with a hyphen
    /// or the designator suffix are kept over their bare variants.
    pub fn is_preferred(&self, name: &str) -> bool {
        match *self {
            KeyPolicy::Exact => false,
            KeyPolicy::Normalized { designator } => {
                name.contains('-') || name.trim_end().ends_with(designator)
            }
        }
    }

    /// Whether an incoming occurrence's metadata line replaces the stored one.
    ///
    /// Last write wins unless exactly one side is the preferred spelling.
    pub fn replaces(&self, current: &str, incoming: &str) -> bool {
        !(self.is_preferred(current) && !self.is_preferred(incoming))
    }
}

/// Resolve an entry's group label.
///
/// Precedence: standalone `#EXTGRP:` tag, then inline `group-title`, then
/// [`DEFAULT_GROUP`].
pub fn resolve_group(tag_line: Option<&str>, metadata_line: Option<&str>) -> String {
    tag_line
        .and_then(attrs::tag_group)
        .or_else(|| metadata_line.and_then(attrs::inline_group))
        .filter(|group| !group.is_empty())
        .unwrap_or_else(|| DEFAULT_GROUP.to_string())
}
