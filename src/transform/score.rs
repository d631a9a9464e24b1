//! Keyword-priority scoring
//!
//! For K keywords, text matching keyword `i` (first match wins) scores
//! `i - K` in forward mode and `i + 1` in reverse mode; unmatched text
//! scores `0`. Sorting ascending by score gives:
//!
//! - forward: `[kw0] [kw1] ... [unmatched]`
//! - reverse: `[unmatched] [kw0] [kw1] ...`

/// Scoring direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScoreDirection {
    /// Matches first, in keyword order
    #[default]
    Forward,

    /// Unmatched first, matches last
    Reverse,
}

#[derive(Debug, Clone, Default)]
pub struct KeywordScorer {
    keywords: Vec<String>,
    direction: ScoreDirection,
    case_sensitive: bool,
}

impl KeywordScorer {
    pub fn new<I, S>(keywords: I, direction: ScoreDirection, case_sensitive: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keywords = keywords
            .into_iter()
            .map(|k| k.as_ref().trim().to_string())
            .filter(|k| !k.is_empty())
            .map(|k| if case_sensitive { k } else { k.to_lowercase() })
            .collect();

        Self {
            keywords,
            direction,
            case_sensitive,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    pub fn score(&self, text: &str) -> i64 {
        let folded;
        let haystack = if self.case_sensitive {
            text
        } else {
            folded = text.to_lowercase();
            folded.as_str()
        };

        let count = self.keywords.len() as i64;
        match self.keywords.iter().position(|k| haystack.contains(k.as_str())) {
            Some(index) => match self.direction {
                ScoreDirection::Forward => index as i64 - count,
                ScoreDirection::Reverse => index as i64 + 1,
            },
            None => 0,
        }
    }
}
