//! M3U playlist model
//!
//! Parses EXTM3U documents into typed entries and renders merged state back
//! to text.
//!
//! # Example Document
//!
//! ```text
//! #EXTM3U x-tvg-url="http://epg.example/guide.xml"
//! #EXTINF:-1 tvg-id="cnn" group-title="News",CNN
//! #EXTVLCOPT:http-user-agent=Mozilla
//! http://cdn.example/cnn.m3u8
//! #EXTINF:-1,ESPN
//! #EXTGRP:Sports
//! http://cdn.example/espn.m3u8
//! ```

pub mod attrs;
mod entry;
mod identity;
mod parser;
mod writer;

pub use entry::{Entry, LineSet, DEFAULT_GROUP, PLACEHOLDER_NAME};
pub use identity::{resolve_group, IdentityMode, KeyPolicy, DEFAULT_DESIGNATOR};
pub use parser::{
    is_resource, ParsedDocument, COMMENT_PREFIX, GROUP_TAG_PREFIX, HEADER_PREFIX, METADATA_PREFIX,
    RESOURCE_SCHEMES,
};
pub use writer::{render, render_lines, RenderOptions, LINE_SEPARATOR};
