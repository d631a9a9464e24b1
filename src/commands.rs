//! Command-line interface definitions
//!
//! Flags given on the command line override the configuration file.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::MergeConfig;
use crate::playlist::IdentityMode;

/// m3u-merge - Merge, deduplicate and reorder M3U playlists
#[derive(Parser, Debug)]
#[command(name = "m3u-merge")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to config file (default: ~/.config/m3u-merge/config.yaml)
    #[arg(short, long, global = true, env = "M3U_MERGE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose/debug output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Merge playlists into one output document
    Merge(MergeArgs),

    /// Manage the configuration file
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Args, Debug, Clone, Default)]
pub struct MergeArgs {
    /// Input playlists, merged in the order given
    #[arg(short, long = "input", num_args = 1.., required = true)]
    pub inputs: Vec<PathBuf>,

    /// Output playlist (may be one of the inputs)
    #[arg(short, long)]
    pub output: PathBuf,

    /// Overwrite an existing output that is not one of the inputs
    #[arg(long)]
    pub force: bool,

    /// Ignore the configuration file
    #[arg(long)]
    pub ignore_config: bool,

    /// Merge entries by normalized name (CCTV-1 == CCTV1台)
    #[arg(long)]
    pub normalize: bool,

    /// Trailing designator stripped by --normalize
    #[arg(long)]
    pub designator: Option<char>,

    /// Drop comment/option lines such as #EXTVLCOPT
    #[arg(long)]
    pub no_config: bool,

    /// New display name for matching entries (rename mode)
    #[arg(long)]
    pub rename_name: Option<String>,

    /// New group for matching entries (rename mode, needs --group-keywords)
    #[arg(long)]
    pub rename_group: Option<String>,

    /// Name keywords (comma-separated)
    #[arg(long)]
    pub name_keywords: Option<String>,

    /// Resource keywords, in priority order (comma-separated)
    #[arg(short, long)]
    pub keywords: Option<String>,

    /// Group keywords, in priority order (comma-separated)
    #[arg(long)]
    pub group_keywords: Option<String>,

    /// Put unmatched items first and matches last
    #[arg(short, long)]
    pub reverse: bool,

    /// Reorder whole groups by --group-keywords
    #[arg(long)]
    pub reorder_groups: bool,

    /// Case-sensitive keyword scoring
    #[arg(long)]
    pub case_sensitive: bool,

    /// Print the run summary as JSON
    #[arg(long)]
    pub json: bool,
}

impl MergeArgs {
    /// Overlay the flags that were given onto a loaded configuration
    pub fn apply_to(&self, config: &mut MergeConfig) {
        if self.normalize {
            config.identity.mode = IdentityMode::Normalized;
        }
        if let Some(designator) = self.designator {
            config.identity.designator = designator;
        }
        if self.force {
            config.output.force = true;
        }
        if self.no_config {
            config.output.keep_config = false;
        }

        if let Some(ref name) = self.rename_name {
            config.rename.name = Some(name.clone());
        }
        if let Some(ref group) = self.rename_group {
            config.rename.group = Some(group.clone());
        }

        if let Some(ref list) = self.name_keywords {
            config.keywords.name = parse_list(list);
        }
        if let Some(ref list) = self.keywords {
            config.keywords.resource = parse_list(list);
        }
        if let Some(ref list) = self.group_keywords {
            config.keywords.group = parse_list(list);
        }

        if self.reverse {
            config.sort.reverse = true;
        }
        if self.reorder_groups {
            config.sort.reorder_groups = true;
        }
        if self.case_sensitive {
            config.sort.case_sensitive = true;
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Print the effective configuration
    Show,

    /// Print the configuration file path
    Path,
}

/// Split a comma-separated list, trimming items and dropping empty ones
pub fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
