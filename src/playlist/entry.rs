//! Entry data structure
//!
//! One logical channel: a metadata line, a resolved group and the resource
//! locators collected for it.

use std::collections::HashSet;

use super::attrs;
use super::identity::KeyPolicy;
use super::parser::METADATA_PREFIX;

/// Group label used when an entry carries neither a tag nor an inline attribute
pub const DEFAULT_GROUP: &str = "unclassified";

/// Display name given to resources found before any metadata line
pub const PLACEHOLDER_NAME: &str = "unnamed";

/// Insertion-ordered set of lines
///
/// Deduplicates by exact string equality and keeps first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineSet {
    lines: Vec<String>,
    seen: HashSet<String>,
}

impl LineSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a line, returning `false` if it was already present
    pub fn insert(&mut self, line: impl Into<String>) -> bool {
        let line = line.into();
        if self.seen.contains(&line) {
            return false;
        }
        self.seen.insert(line.clone());
        self.lines.push(line);
        true
    }

    /// Union another set into this one, returning how many lines were new
    pub fn union(&mut self, other: LineSet) -> usize {
        other
            .lines
            .into_iter()
            .filter(|line| self.insert(line.clone()))
            .count()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Stable sort by a derived key, returning whether the order changed
    pub fn sort_by_key<K, F>(&mut self, f: F) -> bool
    where
        K: Ord,
        F: FnMut(&String) -> K,
    {
        let before = self.lines.clone();
        self.lines.sort_by_key(f);
        before != self.lines
    }
}

impl<S: Into<String>> FromIterator<S> for LineSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = LineSet::new();
        for line in iter {
            set.insert(line);
        }
        set
    }
}

/// One logical channel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Identity key (see [`KeyPolicy`])
    pub key: String,

    /// Display name (text after the final comma of the metadata line)
    pub name: String,

    /// Full `#EXTINF:` line, `None` for a placeholder entry
    pub metadata_line: Option<String>,

    /// Resolved group label
    pub group: String,

    /// Raw `#EXTGRP:` line when the source used a standalone tag
    pub group_tag_line: Option<String>,

    /// Resource locators, deduplicated, in output order
    pub resources: LineSet,

    /// Comment/option lines such as `#EXTVLCOPT:`
    pub config_lines: LineSet,

    /// Position at first discovery
    pub origin_index: usize,
}

impl Entry {
    /// Whether this entry was synthesized for resources with no metadata line
    pub fn is_placeholder(&self) -> bool {
        self.metadata_line.is_none()
    }

    /// Metadata line to emit, synthesizing one for placeholders
    pub fn rendered_metadata_line(&self) -> String {
        match self.metadata_line {
            Some(ref line) => line.clone(),
            None => placeholder_line(&self.name),
        }
    }

    /// Inline `group-title` of the metadata line, if any
    pub fn inline_group(&self) -> Option<String> {
        self.metadata_line.as_deref().and_then(attrs::inline_group)
    }

    /// Fold a later occurrence of the same logical entry into this one.
    ///
    /// Metadata and group are last-write-wins (the key policy may keep the
    /// current metadata line); resources and config lines are unioned.
    pub fn absorb(&mut self, incoming: Entry, policy: &KeyPolicy) {
        let replace = incoming.metadata_line.is_some()
            && (self.metadata_line.is_none() || policy.replaces(&self.name, &incoming.name));

        if replace {
            self.name = incoming.name;
            self.metadata_line = incoming.metadata_line;
        }

        self.group = incoming.group;
        self.group_tag_line = incoming.group_tag_line;
        if !replace {
            self.align_group_attribute();
        }

        self.resources.union(incoming.resources);
        self.config_lines.union(incoming.config_lines);
    }

    /// Move the entry to another group, patching whichever mechanism it uses
    pub fn set_group(&mut self, group: &str) {
        self.group = group.to_string();
        self.align_group_attribute();
    }

    /// Rewrite the display name on the metadata line
    pub fn rename(&mut self, name: &str) {
        let line = self.rendered_metadata_line();
        self.metadata_line = Some(attrs::replace_display_name(&line, name));
        self.name = name.to_string();
    }

    /// Make the emitted lines resolve to `self.group` again.
    ///
    /// A standalone tag is rewritten in place; otherwise the inline attribute
    /// is patched, or synthesized when the entry had none.
    fn align_group_attribute(&mut self) {
        if let Some(ref tag) = self.group_tag_line {
            if attrs::tag_group(tag).as_deref() != Some(self.group.as_str()) {
                self.group_tag_line = Some(attrs::tag_line(&self.group));
            }
            return;
        }

        match self.inline_group() {
            Some(current) if current == self.group => {}
            Some(_) => {
                if let Some(ref line) = self.metadata_line {
                    self.metadata_line = Some(attrs::replace_inline_group(line, &self.group));
                }
            }
            None if self.group == DEFAULT_GROUP => {}
            None => {
                let line = self.rendered_metadata_line();
                self.metadata_line = Some(attrs::insert_inline_group(&line, &self.group));
            }
        }
    }
}

fn placeholder_line(name: &str) -> String {
    format!("{}-1,{}", METADATA_PREFIX, name)
}
