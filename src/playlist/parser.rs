//! Line-oriented M3U parser
//!
//! Turns one document into an ordered list of entries. Parsing never fails:
//! malformed input degrades to a best-effort entry list.

use std::collections::HashMap;

use super::attrs;
use super::entry::{Entry, LineSet, PLACEHOLDER_NAME};
use super::identity::{resolve_group, KeyPolicy};

/// Document declaration line
pub const HEADER_PREFIX: &str = "#EXTM3U";

/// Entry metadata line
pub const METADATA_PREFIX: &str = "#EXTINF:";

/// Standalone grouping tag
pub const GROUP_TAG_PREFIX: &str = "#EXTGRP:";

/// Recognized resource locator schemes
pub const RESOURCE_SCHEMES: [&str; 2] = ["http://", "https://"];

/// Generic comment/option line
pub const COMMENT_PREFIX: char = '#';

/// UTF-8 byte order mark some exporters put before the first line
const BYTE_ORDER_MARK: char = '\u{feff}';

/// A parsed playlist document
#[derive(Debug, Clone, Default)]
pub struct ParsedDocument {
    /// First `#EXTM3U` line, verbatim
    pub header: Option<String>,

    /// Entries in first-encounter order, one per identity key
    pub entries: Vec<Entry>,
}

impl ParsedDocument {
    /// Parse document text with the given identity policy
    pub fn parse(text: &str, policy: &KeyPolicy) -> Self {
        let mut builder = DocumentBuilder::new(policy);
        let text = text.strip_prefix(BYTE_ORDER_MARK).unwrap_or(text);

        for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
            builder.feed(line);
        }

        builder.finish()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total resource locators across all entries
    pub fn resource_count(&self) -> usize {
        self.entries.iter().map(|e| e.resources.len()).sum()
    }
}

/// Whether a line is a resource locator
pub fn is_resource(line: &str) -> bool {
    RESOURCE_SCHEMES.iter().any(|scheme| line.starts_with(scheme))
}

/// Entry under construction
#[derive(Debug, Default)]
struct PendingEntry {
    name: String,
    metadata_line: Option<String>,
    group_tag_line: Option<String>,
    resources: LineSet,
    config_lines: LineSet,
}

impl PendingEntry {
    fn from_metadata(line: &str) -> Self {
        Self {
            name: attrs::display_name(line).unwrap_or_else(|| PLACEHOLDER_NAME.to_string()),
            metadata_line: Some(line.to_string()),
            ..Default::default()
        }
    }

    fn placeholder() -> Self {
        Self {
            name: PLACEHOLDER_NAME.to_string(),
            ..Default::default()
        }
    }

    fn into_entry(self, policy: &KeyPolicy, origin_index: usize) -> Entry {
        let group = resolve_group(self.group_tag_line.as_deref(), self.metadata_line.as_deref());
        Entry {
            key: policy.key(&self.name),
            name: self.name,
            metadata_line: self.metadata_line,
            group,
            group_tag_line: self.group_tag_line,
            resources: self.resources,
            config_lines: self.config_lines,
            origin_index,
        }
    }
}

struct DocumentBuilder<'a> {
    policy: &'a KeyPolicy,
    header: Option<String>,
    entries: Vec<Entry>,
    index: HashMap<String, usize>,
    current: Option<PendingEntry>,
    pending_tag: Option<String>,
}

impl<'a> DocumentBuilder<'a> {
    fn new(policy: &'a KeyPolicy) -> Self {
        Self {
            policy,
            header: None,
            entries: Vec::new(),
            index: HashMap::new(),
            current: None,
            pending_tag: None,
        }
    }

    fn feed(&mut self, line: &str) {
        if line.starts_with(HEADER_PREFIX) {
            if self.header.is_none() {
                self.header = Some(line.to_string());
            }
        } else if line.starts_with(METADATA_PREFIX) {
            self.flush();
            let mut entry = PendingEntry::from_metadata(line);
            entry.group_tag_line = self.pending_tag.take();
            self.current = Some(entry);
        } else if line.starts_with(GROUP_TAG_PREFIX) {
            match self.current {
                // A tag right after the metadata line belongs to that entry
                Some(ref mut entry) if entry.resources.is_empty() => {
                    entry.group_tag_line = Some(line.to_string());
                }
                _ => self.pending_tag = Some(line.to_string()),
            }
        } else if is_resource(line) {
            let pending_tag = &mut self.pending_tag;
            let entry = self.current.get_or_insert_with(|| {
                tracing::warn!(
                    resource = %line,
                    "Resource line without a preceding #EXTINF, attaching to placeholder entry"
                );
                let mut placeholder = PendingEntry::placeholder();
                placeholder.group_tag_line = pending_tag.take();
                placeholder
            });
            entry.resources.insert(line);
        } else if line.starts_with(COMMENT_PREFIX) {
            match self.current {
                Some(ref mut entry) => {
                    entry.config_lines.insert(line);
                }
                None => tracing::debug!(line = %line, "Ignoring comment line outside an entry"),
            }
        } else {
            tracing::trace!(line = %line, "Ignoring unrecognized line");
        }
    }

    fn flush(&mut self) {
        let Some(pending) = self.current.take() else {
            return;
        };

        let entry = pending.into_entry(self.policy, self.entries.len());
        match self.index.get(&entry.key) {
            Some(&position) => {
                tracing::debug!(key = %entry.key, "Duplicate entry within document, merging");
                self.entries[position].absorb(entry, self.policy);
            }
            None => {
                self.index.insert(entry.key.clone(), self.entries.len());
                self.entries.push(entry);
            }
        }
    }

    fn finish(mut self) -> ParsedDocument {
        self.flush();
        ParsedDocument {
            header: self.header,
            entries: self.entries,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::playlist::entry::DEFAULT_GROUP;
    use crate::playlist::identity::DEFAULT_DESIGNATOR;

    const SAMPLE: &str = r#"#EXTM3U x-tvg-url="http://epg.example/guide.xml"

#EXTINF:-1 tvg-id="cnn" group-title="News",CNN
#EXTVLCOPT:http-user-agent=Mozilla
http://cdn.example/cnn.m3u8
https://backup.example/cnn.m3u8

#EXTINF:-1 tvg-id="espn",ESPN
#EXTGRP:Sports
http://cdn.example/espn.m3u8
rtmp://ignored.example/espn
#EXTINF:-1,Plain
http://cdn.example/plain.m3u8
"#;

    #[test]
    fn test_parse_sample() {
        let doc = ParsedDocument::parse(SAMPLE, &KeyPolicy::Exact);

        assert_eq!(
            doc.header.as_deref(),
            Some(r#"#EXTM3U x-tvg-url="http://epg.example/guide.xml""#)
        );
        assert_eq!(doc.entries.len(), 3);

        let cnn = &doc.entries[0];
        assert_eq!(cnn.name, "CNN");
        assert_eq!(cnn.group, "News");
        assert_eq!(cnn.config_lines.as_slice(), ["#EXTVLCOPT:http-user-agent=Mozilla"]);
        assert_eq!(
            cnn.resources.as_slice(),
            ["http://cdn.example/cnn.m3u8", "https://backup.example/cnn.m3u8"]
        );

        let espn = &doc.entries[1];
        assert_eq!(espn.group, "Sports");
        assert_eq!(espn.group_tag_line.as_deref(), Some("#EXTGRP:Sports"));
        assert_eq!(espn.resources.len(), 1);

        let plain = &doc.entries[2];
        assert_eq!(plain.group, DEFAULT_GROUP);
        assert_eq!(plain.origin_index, 2);
    }

    #[test]
    fn test_tag_before_metadata_applies_to_next_entry() {
        let text = "#EXTINF:-1,A\nhttp://a\n#EXTGRP:Movies\n#EXTINF:-1,B\nhttp://b\n";
        let doc = ParsedDocument::parse(text, &KeyPolicy::Exact);

        assert_eq!(doc.entries[0].group, DEFAULT_GROUP);
        assert_eq!(doc.entries[1].group, "Movies");
    }

    #[test]
    fn test_tag_overrides_inline_group() {
        let text = "#EXTINF:-1 group-title=\"Inline\",A\n#EXTGRP:Tagged\nhttp://a\n";
        let doc = ParsedDocument::parse(text, &KeyPolicy::Exact);
        assert_eq!(doc.entries[0].group, "Tagged");
    }

    #[test]
    fn test_resource_without_metadata_is_kept() {
        let text = "#EXTM3U\nhttp://orphan/1\nhttp://orphan/2\n#EXTINF:-1,A\nhttp://a\n";
        let doc = ParsedDocument::parse(text, &KeyPolicy::Exact);

        assert_eq!(doc.entries.len(), 2);
        let placeholder = &doc.entries[0];
        assert!(placeholder.is_placeholder());
        assert_eq!(placeholder.name, PLACEHOLDER_NAME);
        assert_eq!(placeholder.resources.len(), 2);
    }

    #[test]
    fn test_duplicate_key_in_same_document_is_merged() {
        let text = "#EXTINF:-1 group-title=\"X\",A\nhttp://a/1\n#EXTVLCOPT:x=1\n\
                    #EXTINF:-1,B\nhttp://b\n\
                    #EXTINF:-1 group-title=\"Y\",A\n#EXTVLCOPT:x=1\nhttp://a/1\nhttp://a/2\n";
        let doc = ParsedDocument::parse(text, &KeyPolicy::Exact);

        assert_eq!(doc.entries.len(), 2);
        let a = &doc.entries[0];
        assert_eq!(a.group, "Y");
        assert_eq!(a.resources.as_slice(), ["http://a/1", "http://a/2"]);
        assert_eq!(a.config_lines.len(), 1);
        assert_eq!(a.metadata_line.as_deref(), Some("#EXTINF:-1 group-title=\"Y\",A"));
    }

    #[test]
    fn test_normalized_policy_merges_variants() {
        let text = "#EXTINF:-1,CCTV1\nhttp://a\n#EXTINF:-1,CCTV-1\nhttp://b\n#EXTINF:-1,cctv1\nhttp://c\n";
        let policy = KeyPolicy::Normalized {
            designator: DEFAULT_DESIGNATOR,
        };
        let doc = ParsedDocument::parse(text, &policy);

        assert_eq!(doc.entries.len(), 1);
        assert_eq!(doc.entries[0].key, "CCTV1");
        assert_eq!(doc.entries[0].name, "CCTV-1");
        assert_eq!(doc.resource_count(), 3);
    }

    #[test]
    fn test_metadata_without_resources_is_kept() {
        let doc = ParsedDocument::parse("#EXTINF:-1,Lonely\n", &KeyPolicy::Exact);
        assert_eq!(doc.entries.len(), 1);
        assert!(doc.entries[0].resources.is_empty());
    }

    #[test]
    fn test_empty_document() {
        let doc = ParsedDocument::parse("\n\n#EXTM3U\n", &KeyPolicy::Exact);
        assert!(doc.is_empty());
        assert_eq!(doc.header.as_deref(), Some("#EXTM3U"));
    }

    #[test]
    fn test_leading_byte_order_mark_before_metadata() {
        let doc = ParsedDocument::parse(
            "\u{feff}#EXTINF:-1 group-title=\"News\",CNN\nhttp://a/cnn\n",
            &KeyPolicy::Exact,
        );

        assert_eq!(doc.entries.len(), 1);
        let cnn = &doc.entries[0];
        assert_eq!(cnn.name, "CNN");
        assert_eq!(cnn.group, "News");
        assert_eq!(
            cnn.metadata_line.as_deref(),
            Some("#EXTINF:-1 group-title=\"News\",CNN")
        );
    }

    #[test]
    fn test_leading_byte_order_mark_before_header() {
        let doc = ParsedDocument::parse(
            "\u{feff}#EXTM3U\n#EXTINF:-1,CNN\nhttp://a/cnn\n",
            &KeyPolicy::Exact,
        );

        assert_eq!(doc.header.as_deref(), Some("#EXTM3U"));
        assert_eq!(doc.entries[0].name, "CNN");
    }

    #[test]
    fn test_is_resource() {
        assert!(is_resource("http://x"));
        assert!(is_resource("https://x"));
        assert!(!is_resource("rtmp://x"));
        assert!(!is_resource("#EXTINF:-1,x"));
    }
}
