//! Terminal styling utilities
//!
//! Colors for the run summary printed by the CLI.
//! Uses crossterm for cross-platform terminal colors.

use crossterm::style::{StyledContent, Stylize};

/// Transform mode label
/// - rename: Magenta
/// - sort: Cyan
pub fn mode_style(mode: &str) -> StyledContent<String> {
    let label = format!("[{}]", mode);
    match mode.to_lowercase().as_str() {
        "rename" => label.magenta(),
        "sort" => label.cyan(),
        _ => label.white(),
    }
}

/// Count of things the run changed
/// - Zero: Dim
/// - Positive: Green
pub fn count_changed(n: usize) -> StyledContent<String> {
    if n == 0 {
        n.to_string().dark_grey()
    } else {
        n.to_string().green()
    }
}

/// Count of inputs that were skipped
pub fn count_skipped(n: usize) -> StyledContent<String> {
    if n == 0 {
        n.to_string().dark_grey()
    } else {
        n.to_string().yellow()
    }
}

pub fn count_normal(n: usize) -> StyledContent<String> {
    n.to_string().white()
}

/// Yes/no flag
pub fn flag(value: bool) -> StyledContent<&'static str> {
    if value {
        "yes".green()
    } else {
        "no".dark_grey()
    }
}

/// Section headers
pub fn header(text: &str) -> StyledContent<String> {
    text.to_string().bold()
}

/// Dim/muted text
pub fn dim(text: &str) -> StyledContent<String> {
    text.to_string().dark_grey()
}

/// Success text
pub fn success(text: &str) -> StyledContent<String> {
    text.to_string().green()
}

/// Error text
pub fn error(text: &str) -> StyledContent<String> {
    text.to_string().red()
}

/// Path styling
pub fn path(p: &str) -> StyledContent<String> {
    p.to_string().blue()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_labels() {
        assert_eq!(mode_style("rename").content(), "[rename]");
        assert_eq!(mode_style("sort").content(), "[sort]");
    }

    #[test]
    fn test_counts_keep_value() {
        assert_eq!(count_changed(0).content(), "0");
        assert_eq!(count_changed(7).content(), "7");
        assert_eq!(count_skipped(2).content(), "2");
        assert_eq!(*flag(true).content(), "yes");
    }
}
