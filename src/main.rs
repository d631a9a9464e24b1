//! m3u-merge - Merge, deduplicate and reorder M3U playlists
//!
//! Main entry point for the m3u-merge CLI.

use clap::Parser;
use m3u_merge::commands::{Cli, Commands, ConfigCommands, MergeArgs};
use m3u_merge::config::MergeConfig;
use m3u_merge::output::FileSink;
use m3u_merge::pipeline::{guard_output, MergeReport, Pipeline};
use m3u_merge::style;
use std::path::{Path, PathBuf};
use std::process;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = m3u_merge::logging::init(cli.verbose) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    if let Err(e) = run(cli) {
        eprintln!("{} {}", style::error("Error:"), e);
        // Usage errors exit 2, like clap's own argument errors
        process::exit(if e.is_config_error() { 2 } else { 1 });
    }
}

fn run(cli: Cli) -> m3u_merge::Result<()> {
    match cli.command {
        Commands::Merge(ref args) => handle_merge_command(args, cli.config.as_deref()),
        Commands::Config(ref cmd) => handle_config_command(cmd, cli.config.as_deref()),
    }
}

fn handle_merge_command(args: &MergeArgs, config_path: Option<&Path>) -> m3u_merge::Result<()> {
    let mut config = if args.ignore_config {
        MergeConfig::default()
    } else {
        MergeConfig::load_or_default(config_path)?
    };
    args.apply_to(&mut config);

    guard_output(&args.inputs, &args.output, config.output.force)?;

    let pipeline = Pipeline::new(config);
    let mut sink = FileSink::new(&args.output);
    let report = pipeline.run(&args.inputs, &mut sink)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    Ok(())
}

fn print_report(report: &MergeReport) {
    let mode = report
        .mode
        .map(|m| format!("{:?}", m).to_lowercase())
        .unwrap_or_default();

    println!(
        "{} {}",
        style::success("Merged playlist written to"),
        style::path(report.output.as_deref().unwrap_or("-"))
    );
    println!();
    println!("{} {}", style::header("Summary"), style::mode_style(&mode));
    println!(
        "  Documents:        {} merged, {} skipped",
        style::count_normal(report.documents_merged),
        style::count_skipped(report.documents_skipped)
    );
    println!("  Entries:          {}", style::count_normal(report.total_entries));
    println!("  Groups:           {}", style::count_normal(report.total_groups));
    println!(
        "  Resources:        {} ({} entries with more than one)",
        style::count_normal(report.total_resources),
        style::count_normal(report.multi_resource_entries)
    );
    println!("  Classified:       {}", style::count_changed(report.classified_entries));
    println!(
        "  Renamed:          {} entries, {} groups",
        style::count_changed(report.renamed_entries),
        style::count_changed(report.renamed_groups)
    );
    println!(
        "  Reordered:        {} entries, groups {}",
        style::count_changed(report.resources_reordered),
        style::flag(report.groups_reordered)
    );
}

fn handle_config_command(cmd: &ConfigCommands, config_path: Option<&Path>) -> m3u_merge::Result<()> {
    let path: PathBuf = config_path
        .map(Path::to_path_buf)
        .unwrap_or_else(MergeConfig::default_path);

    match cmd {
        ConfigCommands::Init { force } => {
            if path.exists() && !force {
                println!(
                    "Configuration already exists at {}",
                    style::path(&path.display().to_string())
                );
                println!("{}", style::dim("Use --force to overwrite it."));
                return Ok(());
            }
            MergeConfig::starter().save(&path)?;
            println!(
                "{} {}",
                style::success("Created configuration at"),
                style::path(&path.display().to_string())
            );
        }
        ConfigCommands::Show => {
            let config = MergeConfig::load_or_default(config_path)?;
            print!("{}", serde_yaml::to_string(&config)?);
        }
        ConfigCommands::Path => {
            println!("{}", path.display());
        }
    }

    Ok(())
}
