//! Merge state: entry table, group order and the document fold

use std::collections::HashMap;

use crate::playlist::{Entry, KeyPolicy, ParsedDocument};

use super::group_order::{GroupOrder, InsertionCursor, Placement};

/// Outcome of folding one document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestStats {
    /// Keys seen for the first time
    pub new_entries: usize,

    /// Keys that already existed and were updated
    pub updated_entries: usize,

    /// Existing keys whose group changed
    pub migrated_entries: usize,

    /// Resources that were not already known
    pub new_resources: usize,
}

/// Consolidated playlist built from one or more documents
#[derive(Debug, Clone)]
pub struct MergeState {
    policy: KeyPolicy,
    header: Option<String>,
    entries: HashMap<String, Entry>,
    group_labels: Vec<String>,
    groups: HashMap<String, GroupOrder>,
    next_origin: usize,
    documents: usize,
}

impl MergeState {
    /// Create an empty state
    pub fn new(policy: KeyPolicy) -> Self {
        Self {
            policy,
            header: None,
            entries: HashMap::new(),
            group_labels: Vec::new(),
            groups: HashMap::new(),
            next_origin: 0,
            documents: 0,
        }
    }

    /// Fold one parsed document into the state.
    ///
    /// Documents must be ingested in the caller's merge order: insert
    /// positions depend on what earlier documents left behind.
    pub fn ingest(&mut self, document: ParsedDocument) -> IngestStats {
        let mut stats = IngestStats::default();
        self.documents += 1;

        if self.header.is_none() {
            self.header = document.header;
        }

        for (label, entries) in bucket_by_group(document.entries) {
            self.register_group(&label);
            let mut cursor = InsertionCursor::new();

            for incoming in entries {
                let key = incoming.key.clone();

                match self.entries.get_mut(&key) {
                    Some(existing) => {
                        let previous_group = existing.group.clone();
                        let before = existing.resources.len();
                        existing.absorb(incoming, &self.policy);
                        stats.new_resources += existing.resources.len() - before;
                        stats.updated_entries += 1;

                        if previous_group != label {
                            if let Some(old) = self.groups.get_mut(&previous_group) {
                                old.remove(&key);
                            }
                            stats.migrated_entries += 1;
                            tracing::debug!(
                                key = %key,
                                from = %previous_group,
                                to = %label,
                                "Entry changed group"
                            );
                        }
                    }
                    None => {
                        let mut entry = incoming;
                        entry.origin_index = self.next_origin;
                        self.next_origin += 1;
                        stats.new_resources += entry.resources.len();
                        stats.new_entries += 1;
                        self.entries.insert(key.clone(), entry);
                    }
                }

                let order = self.groups.entry(label.clone()).or_default();
                if let Placement::Inserted(index) = cursor.place(order, &key) {
                    tracing::trace!(key = %key, group = %label, index, "Inserted entry");
                }
            }
        }

        tracing::debug!(
            new = stats.new_entries,
            updated = stats.updated_entries,
            migrated = stats.migrated_entries,
            "Document merged"
        );

        stats
    }

    /// Kept document header (first one seen)
    pub fn header(&self) -> Option<&str> {
        self.header.as_deref()
    }

    pub fn policy(&self) -> &KeyPolicy {
        &self.policy
    }

    /// Number of documents ingested so far
    pub fn document_count(&self) -> usize {
        self.documents
    }

    pub fn entry(&self, key: &str) -> Option<&Entry> {
        self.entries.get(key)
    }

    pub fn entry_mut(&mut self, key: &str) -> Option<&mut Entry> {
        self.entries.get_mut(key)
    }

    /// All entries, unordered
    pub fn entries(&self) -> impl Iterator<Item = &Entry> {
        self.entries.values()
    }

    /// All entries, unordered, mutable
    pub fn entries_mut(&mut self) -> impl Iterator<Item = &mut Entry> {
        self.entries.values_mut()
    }

    /// Group labels in output order, including emptied groups
    pub fn group_labels(&self) -> &[String] {
        &self.group_labels
    }

    pub fn group(&self, label: &str) -> Option<&GroupOrder> {
        self.groups.get(label)
    }

    /// Entries in output order: groups in order, members in order
    pub fn ordered_entries(&self) -> impl Iterator<Item = &Entry> {
        self.group_labels
            .iter()
            .filter_map(move |label| self.groups.get(label))
            .flat_map(|order| order.keys().iter())
            .filter_map(move |key| self.entries.get(key))
    }

    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Groups that still have at least one member
    pub fn group_count(&self) -> usize {
        self.groups.values().filter(|g| !g.is_empty()).count()
    }

    pub fn resource_count(&self) -> usize {
        self.entries.values().map(|e| e.resources.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Move entries between groups.
    ///
    /// `target` returns the new label for entries that should move. Walks the
    /// current output order, so relative order is preserved. Existing labels
    /// keep their position and new labels are appended. Returns the number
    /// of entries moved.
    pub fn regroup<F>(&mut self, mut target: F) -> usize
    where
        F: FnMut(&Entry) -> Option<String>,
    {
        let labels = std::mem::take(&mut self.group_labels);
        let mut old_groups = std::mem::take(&mut self.groups);
        let mut moved = 0;

        for label in &labels {
            self.register_group(label);
        }

        for label in labels {
            let Some(order) = old_groups.remove(&label) else {
                continue;
            };

            for key in order.keys() {
                let Some(entry) = self.entries.get_mut(key) else {
                    continue;
                };

                let destination = match target(entry) {
                    Some(new_label) if new_label != entry.group => {
                        entry.set_group(&new_label);
                        moved += 1;
                        new_label
                    }
                    _ => entry.group.clone(),
                };

                self.register_group(&destination);
                if let Some(group) = self.groups.get_mut(&destination) {
                    group.push(key);
                }
            }
        }

        moved
    }

    /// Stable sort of the group sequence by a key derived from the label
    pub fn sort_groups_by_key<K, F>(&mut self, f: F) -> bool
    where
        K: Ord,
        F: FnMut(&String) -> K,
    {
        let before = self.group_labels.clone();
        self.group_labels.sort_by_key(f);
        before != self.group_labels
    }

    /// Stable sort of one group's members by a key derived from the entry
    pub fn sort_group_members_by_key<K, F>(&mut self, label: &str, mut f: F)
    where
        K: Ord,
        F: FnMut(&Entry) -> K,
    {
        let entries = &self.entries;
        if let Some(order) = self.groups.get_mut(label) {
            order.sort_by_key(|key| entries.get(key).map(&mut f));
        }
    }

    fn register_group(&mut self, label: &str) {
        if !self.groups.contains_key(label) {
            self.groups.insert(label.to_string(), GroupOrder::new());
            self.group_labels.push(label.to_string());
        }
    }
}

/// Split a document's entries by group, groups in first-seen order
fn bucket_by_group(entries: Vec<Entry>) -> Vec<(String, Vec<Entry>)> {
    let mut buckets: Vec<(String, Vec<Entry>)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for entry in entries {
        match index.get(&entry.group) {
            Some(&i) => buckets[i].1.push(entry),
            None => {
                index.insert(entry.group.clone(), buckets.len());
                buckets.push((entry.group.clone(), vec![entry]));
            }
        }
    }

    buckets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::playlist::DEFAULT_DESIGNATOR;

    fn ingest_all<S: AsRef<str>>(state: &mut MergeState, texts: &[S]) {
        for text in texts {
            let doc = ParsedDocument::parse(text.as_ref(), state.policy());
            state.ingest(doc);
        }
    }

    fn keys(state: &MergeState, label: &str) -> Vec<String> {
        state.group(label).map(|g| g.keys().to_vec()).unwrap_or_default()
    }

    fn doc(group: &str, names: &[&str]) -> String {
        names
            .iter()
            .map(|n| format!("#EXTINF:-1 group-title=\"{}\",{}\nhttp://{}/1\n", group, n, n))
            .collect()
    }

    #[test]
    fn test_relative_order_across_documents() {
        let mut state = MergeState::new(KeyPolicy::Exact);
        ingest_all(&mut state, &[&doc("G", &["A", "B", "C"]), &doc("G", &["A", "D", "B"])]);

        assert_eq!(keys(&state, "G"), ["A", "D", "B", "C"]);
    }

    #[test]
    fn test_alpha_beta_scenario() {
        let doc1 = "#EXTINF:-1 group-title=\"X\",Alpha\nhttp://u1\n";
        let doc2 = "#EXTINF:-1 group-title=\"X\",Alpha\nhttp://u1\nhttp://u2\n\
                    #EXTINF:-1 group-title=\"X\",Beta\nhttp://b\n";
        let mut state = MergeState::new(KeyPolicy::Exact);
        ingest_all(&mut state, &[doc1, doc2]);

        assert_eq!(keys(&state, "X"), ["Alpha", "Beta"]);
        let alpha = state.entry("Alpha").unwrap();
        assert_eq!(alpha.resources.as_slice(), ["http://u1", "http://u2"]);
    }

    #[test]
    fn test_group_migration() {
        let mut state = MergeState::new(KeyPolicy::Exact);
        ingest_all(
            &mut state,
            &[&doc("News", &["A", "B"]), &doc("Sports", &["A"])],
        );

        assert_eq!(keys(&state, "News"), ["B"]);
        assert_eq!(keys(&state, "Sports"), ["A"]);
        assert_eq!(state.entry("A").unwrap().group, "Sports");
        // Resources collected under the old group are carried over
        assert_eq!(state.entry("A").unwrap().resources.len(), 1);
    }

    #[test]
    fn test_resource_dedup_is_idempotent() {
        let text = doc("G", &["A", "B"]);
        let mut once = MergeState::new(KeyPolicy::Exact);
        ingest_all(&mut once, &[&text]);
        let mut twice = MergeState::new(KeyPolicy::Exact);
        ingest_all(&mut twice, &[&text, &text]);

        for key in ["A", "B"] {
            assert_eq!(
                once.entry(key).unwrap().resources,
                twice.entry(key).unwrap().resources
            );
        }
        assert_eq!(keys(&once, "G"), keys(&twice, "G"));
    }

    #[test]
    fn test_group_order_is_first_seen() {
        let mut state = MergeState::new(KeyPolicy::Exact);
        ingest_all(
            &mut state,
            &[
                &(doc("B", &["b1"]) + &doc("A", &["a1"])),
                &(doc("C", &["c1"]) + &doc("A", &["a2"])),
            ],
        );

        assert_eq!(state.group_labels(), ["B", "A", "C"]);
        assert_eq!(state.group_count(), 3);
    }

    #[test]
    fn test_origin_index_is_global() {
        let mut state = MergeState::new(KeyPolicy::Exact);
        ingest_all(&mut state, &[&doc("G", &["A", "B"]), &doc("G", &["C", "A"])]);

        assert_eq!(state.entry("A").unwrap().origin_index, 0);
        assert_eq!(state.entry("B").unwrap().origin_index, 1);
        assert_eq!(state.entry("C").unwrap().origin_index, 2);
    }

    #[test]
    fn test_header_from_first_document_that_has_one() {
        let mut state = MergeState::new(KeyPolicy::Exact);
        ingest_all(
            &mut state,
            &["#EXTINF:-1,A\nhttp://a\n", "#EXTM3U first\n", "#EXTM3U second\n"],
        );
        assert_eq!(state.header(), Some("#EXTM3U first"));
    }

    #[test]
    fn test_normalized_merge_prefers_canonical_name() {
        let policy = KeyPolicy::Normalized {
            designator: DEFAULT_DESIGNATOR,
        };
        let mut state = MergeState::new(policy);
        ingest_all(
            &mut state,
            &[
                "#EXTINF:-1 group-title=\"TV\",CCTV-1\nhttp://a\n",
                "#EXTINF:-1 group-title=\"TV\",cctv1\nhttp://b\n",
            ],
        );

        assert_eq!(state.entry_count(), 1);
        let entry = state.entry("CCTV1").unwrap();
        assert_eq!(entry.name, "CCTV-1");
        assert_eq!(entry.resources.len(), 2);
    }

    #[test]
    fn test_regroup_moves_and_preserves_order() {
        let mut state = MergeState::new(KeyPolicy::Exact);
        ingest_all(
            &mut state,
            &[&(doc("A", &["a1", "a2"]) + &doc("B", &["b1"]))],
        );

        let moved = state.regroup(|e| (e.key == "a2").then(|| "B".to_string()));

        assert_eq!(moved, 1);
        assert_eq!(keys(&state, "A"), ["a1"]);
        assert_eq!(keys(&state, "B"), ["a2", "b1"]);
        assert_eq!(state.entry("a2").unwrap().inline_group().as_deref(), Some("B"));
    }

    #[test]
    fn test_every_member_exists_in_entry_table() {
        let mut state = MergeState::new(KeyPolicy::Exact);
        ingest_all(
            &mut state,
            &[&doc("X", &["A", "B"]), &doc("Y", &["B", "C"]), &doc("X", &["C"])],
        );

        let mut seen = std::collections::HashSet::new();
        for label in state.group_labels() {
            for key in state.group(label).unwrap().keys() {
                assert!(state.entry(key).is_some());
                assert!(seen.insert(key.clone()), "key in two groups: {}", key);
            }
        }
        assert_eq!(seen.len(), state.entry_count());
    }
}
