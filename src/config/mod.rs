//! Configuration system
//!
//! Loads ~/.config/m3u-merge/config.yaml with support for:
//! - Identity key mode and designator
//! - Rename targets and keyword predicates
//! - Sort direction and group reordering
//! - Name-based classification rules

mod merge_config;
pub mod validation;

pub use merge_config::{
    IdentityConfig, KeywordConfig, MergeConfig, OutputConfig, RenameConfig, SortConfig,
};
pub use validation::{validate_config, validate_config_result, ValidationError};
