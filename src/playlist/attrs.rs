//! Single-line attribute helpers for `#EXTINF:` and `#EXTGRP:` lines
//!
//! Every helper works on one line and only touches the attribute it targets,
//! so attributes this crate does not model (tvg-id, tvg-logo, catchup, ...)
//! survive a rewrite verbatim.

use lazy_static::lazy_static;
use regex::{Captures, Regex};

use super::parser::GROUP_TAG_PREFIX;

lazy_static! {
    /// `group-title="..."` or `group-title='...'`
    static ref GROUP_TITLE: Regex =
        Regex::new(r#"group-title=(?:"([^"]*)"|'([^']*)')"#).expect("valid group-title pattern");

    /// `tvg-name="..."` or `tvg-name='...'`
    static ref TVG_NAME: Regex =
        Regex::new(r#"tvg-name=(?:"([^"]*)"|'([^']*)')"#).expect("valid tvg-name pattern");
}

/// Display name: the text after the final comma, trimmed.
///
/// Returns `None` when the line has no comma or the field is blank.
pub fn display_name(line: &str) -> Option<String> {
    let (_, name) = line.rsplit_once(',')?;
    let name = name.trim();
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

/// First inline `group-title` value, either quote style.
pub fn inline_group(line: &str) -> Option<String> {
    let caps = GROUP_TITLE.captures(line)?;
    caps.get(1)
        .or_else(|| caps.get(2))
        .map(|m| m.as_str().trim().to_string())
}

/// Replace the first inline `group-title` value, keeping its quote style.
pub fn replace_inline_group(line: &str, group: &str) -> String {
    replace_quoted(&GROUP_TITLE, "group-title", line, group)
}

/// Insert `group-title="<group>"` immediately before the display-name field.
pub fn insert_inline_group(line: &str, group: &str) -> String {
    let attribute = format!("group-title=\"{}\"", group);
    match line.rfind(',') {
        Some(comma) => {
            let (head, tail) = line.split_at(comma);
            format!("{}{}{}", head, separator_after(head), attribute) + tail
        }
        None => format!("{}{}{}", line, separator_after(line), attribute),
    }
}

/// Rewrite the display-name field and any `tvg-name` attribute.
pub fn replace_display_name(line: &str, name: &str) -> String {
    let line = if TVG_NAME.is_match(line) {
        replace_quoted(&TVG_NAME, "tvg-name", line, name)
    } else {
        line.to_string()
    };

    match line.rfind(',') {
        Some(comma) => format!("{},{}", &line[..comma], name),
        None => format!("{},{}", line, name),
    }
}

/// Group label carried by a standalone `#EXTGRP:` line.
pub fn tag_group(line: &str) -> Option<String> {
    let group = line.strip_prefix(GROUP_TAG_PREFIX)?.trim();
    if group.is_empty() {
        None
    } else {
        Some(group.to_string())
    }
}

/// Build a standalone `#EXTGRP:` line.
pub fn tag_line(group: &str) -> String {
    format!("{}{}", GROUP_TAG_PREFIX, group)
}

fn replace_quoted(pattern: &Regex, attribute: &str, line: &str, value: &str) -> String {
    pattern
        .replacen(line, 1, |caps: &Captures| {
            let quote = if caps.get(2).is_some() { '\'' } else { '"' };
            format!("{}={}{}{}", attribute, quote, value, quote)
        })
        .into_owned()
}

fn separator_after(head: &str) -> &'static str {
    if head.ends_with(':') || head.ends_with(char::is_whitespace) {
        ""
    } else {
        " "
    }
}
