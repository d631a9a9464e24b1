//! Keyword predicates over entry name, group and resources

use crate::playlist::Entry;

/// Case-insensitive substring predicate.
///
/// An unset filter (no keywords) holds for every input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordFilter {
    keywords: Vec<String>,
}

impl KeywordFilter {
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keywords = keywords
            .into_iter()
            .map(|k| k.as_ref().trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();
        Self { keywords }
    }

    /// Whether any keyword was supplied
    pub fn is_set(&self) -> bool {
        !self.keywords.is_empty()
    }

    /// Whether `text` contains any keyword
    pub fn matches(&self, text: &str) -> bool {
        let text = text.to_lowercase();
        self.keywords.iter().any(|k| text.contains(k.as_str()))
    }

    /// Like [`matches`](Self::matches), but vacuously true when unset
    pub fn holds(&self, text: &str) -> bool {
        !self.is_set() || self.matches(text)
    }

    /// Vacuously true when unset, otherwise any of `texts` matches
    pub fn holds_any<'a, I>(&self, texts: I) -> bool
    where
        I: IntoIterator<Item = &'a str>,
    {
        !self.is_set() || texts.into_iter().any(|t| self.matches(t))
    }
}

/// The three entry predicates of a run
#[derive(Debug, Clone, Default)]
pub struct EntryPredicates {
    pub name: KeywordFilter,
    pub resource: KeywordFilter,
    pub group: KeywordFilter,
}

impl EntryPredicates {
    pub fn name_holds(&self, entry: &Entry) -> bool {
        self.name.holds(&entry.name)
    }

    pub fn resource_holds(&self, entry: &Entry) -> bool {
        self.resource.holds_any(entry.resources.iter())
    }

    pub fn group_holds(&self, entry: &Entry) -> bool {
        self.group.holds(&entry.group)
    }
}
