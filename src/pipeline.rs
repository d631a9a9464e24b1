//! Merge pipeline
//!
//! Validates the configuration, loads the inputs in order, merges them,
//! applies classification and the transform, then renders and commits the
//! result to an [`OutputSink`] exactly once.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::{validate_config_result, MergeConfig};
use crate::merge::MergeState;
use crate::output::OutputSink;
use crate::playlist::{render, ParsedDocument};
use crate::transform::{self, Classifier, TransformMode};
use crate::{M3uMergeError, Result};

/// File extensions accepted without a warning
const PLAYLIST_EXTENSIONS: [&str; 2] = ["m3u", "m3u8"];

/// One input document
#[derive(Debug, Clone)]
pub struct Document {
    /// Where the text came from, for logs
    pub source: String,
    pub content: String,
}

impl Document {
    pub fn new(source: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            content: content.into(),
        }
    }

    /// Read a document from disk
    pub fn read(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(Self::new(path.display().to_string(), content))
    }
}

/// Summary of a pipeline run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MergeReport {
    pub documents_merged: usize,
    pub documents_skipped: usize,
    pub total_entries: usize,
    pub total_groups: usize,
    pub total_resources: usize,
    pub multi_resource_entries: usize,
    pub renamed_entries: usize,
    pub renamed_groups: usize,
    pub resources_reordered: usize,
    pub groups_reordered: bool,
    pub classified_entries: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<TransformMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
}

/// Merge pipeline bound to one configuration
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: MergeConfig,
}

impl Pipeline {
    pub fn new(config: MergeConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MergeConfig {
        &self.config
    }

    /// Merge the files at `inputs` and commit the result to `sink`.
    ///
    /// Unreadable inputs are skipped with a warning. Nothing is committed
    /// unless at least one input yielded an entry.
    pub fn run(&self, inputs: &[PathBuf], sink: &mut dyn OutputSink) -> Result<MergeReport> {
        let classifier = self.prepare()?;

        let mut documents = Vec::with_capacity(inputs.len());
        let mut skipped = 0;
        for path in inputs {
            if !has_playlist_extension(path) {
                tracing::warn!(path = %path.display(), "Input does not have an .m3u extension");
            }
            match Document::read(path) {
                Ok(document) => documents.push(document),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Skipping unreadable input");
                    skipped += 1;
                }
            }
        }

        let (content, mut report) = self.execute(&classifier, &documents)?;
        report.documents_skipped = skipped;

        sink.commit(&content)?;
        report.output = Some(sink.describe());

        tracing::info!(
            output = %sink.describe(),
            entries = report.total_entries,
            groups = report.total_groups,
            "Merged playlist written"
        );

        Ok(report)
    }

    /// Merge in-memory documents and return the rendered text
    pub fn process(&self, documents: &[Document]) -> Result<(String, MergeReport)> {
        let classifier = self.prepare()?;
        self.execute(&classifier, documents)
    }

    /// Validate the configuration and compile the classification rules
    fn prepare(&self) -> Result<Classifier> {
        validate_config_result(&self.config)?;
        Classifier::new(&self.config.classify)
    }

    fn execute(
        &self,
        classifier: &Classifier,
        documents: &[Document],
    ) -> Result<(String, MergeReport)> {
        let policy = self.config.key_policy();
        let mut state = MergeState::new(policy);
        let mut report = MergeReport::default();

        for document in documents {
            let parsed = ParsedDocument::parse(&document.content, &policy);
            if parsed.is_empty() {
                tracing::warn!(source = %document.source, "Document contains no entries");
            }
            let stats = state.ingest(parsed);
            report.documents_merged += 1;

            tracing::info!(
                source = %document.source,
                new = stats.new_entries,
                updated = stats.updated_entries,
                migrated = stats.migrated_entries,
                resources = stats.new_resources,
                "Merged document"
            );
        }

        if state.is_empty() {
            return Err(M3uMergeError::NoEntries);
        }

        report.classified_entries = classifier.apply(&mut state);

        let summary = transform::apply(&mut state, &self.config.transform_options())?;
        report.mode = Some(summary.mode);
        report.renamed_entries = summary.renamed_entries;
        report.renamed_groups = summary.renamed_groups;
        report.resources_reordered = summary.resources_reordered;
        report.groups_reordered = summary.groups_reordered;

        report.total_entries = state.entry_count();
        report.total_groups = state.group_count();
        report.total_resources = state.resource_count();
        report.multi_resource_entries = state.entries().filter(|e| e.resources.len() > 1).count();

        let content = render(&state, &self.config.render_options());
        Ok((content, report))
    }
}

fn has_playlist_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| PLAYLIST_EXTENSIONS.iter().any(|e| ext.eq_ignore_ascii_case(e)))
        .unwrap_or(false)
}

/// Refuse to overwrite an existing output that is not one of the inputs
pub fn guard_output(inputs: &[PathBuf], output: &Path, force: bool) -> Result<()> {
    if force || !output.exists() {
        return Ok(());
    }
    if inputs.iter().any(|input| same_file(input, output)) {
        return Ok(());
    }
    Err(M3uMergeError::OutputExists(output.to_path_buf()))
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}
