//! Command-line interface.
//!
//! Command-line values are merged on top of the configuration file: extra
//! suggestions and tags are appended, presentation options replace the
//! configured ones.

use std::path::{Path, PathBuf};

use clap::Parser;
use tracing::{debug, warn};

use crate::config::Settings;
use crate::error::Result;
use crate::ui::Suggestion;

/// Suggestions used when neither the config nor the command line gives any.
const SAMPLE_SUGGESTIONS: &[&str] = &[
    "Red", "Blue", "White", "Black", "Magenta", "Yellow", "Green",
];

/// Initial tags that go with the sample suggestions.
const SAMPLE_TAGS: &[&str] = &["Violet", "Orange"];

/// Pick tags from a list of suggestions or type your own.
///
/// The chosen tags are printed to stdout when you press Esc.
#[derive(Debug, Parser)]
#[command(name = "tagbox", version, about)]
pub struct Cli {
    /// Add a suggestion (repeatable).
    #[arg(short = 's', long = "suggestion", value_name = "NAME")]
    pub suggestions: Vec<String>,

    /// Start with this tag already selected (repeatable).
    #[arg(short = 't', long = "tag", value_name = "NAME")]
    pub tags: Vec<String>,

    /// Read suggestions from a file, one per line.
    #[arg(long, value_name = "PATH")]
    pub suggestions_file: Option<PathBuf>,

    /// Text-field placeholder.
    #[arg(long)]
    pub placeholder: Option<String>,

    /// Message shown when nothing matches.
    #[arg(long = "not-found", value_name = "TEXT")]
    pub not_found: Option<String>,

    /// Print the tags as a JSON array.
    #[arg(long)]
    pub json: bool,

    /// Use this config file instead of the default one.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Write logs to this directory.
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,
}

impl Cli {
    /// Replace configured presentation options with command-line ones.
    pub fn apply_overrides(&self, settings: &mut Settings) {
        if let Some(placeholder) = &self.placeholder {
            settings.placeholder = Some(placeholder.clone());
        }
        if let Some(not_found) = &self.not_found {
            settings.not_found_content = Some(not_found.clone());
        }
    }

    /// Build the candidate pool and initial tags.
    ///
    /// Order is config, then `--suggestions-file`, then `--suggestion`.
    /// Later duplicates of a name are dropped. Falls back to the built-in
    /// sample when nothing was given at all.
    pub fn build_input(&self, settings: &Settings) -> Result<(Vec<Suggestion>, Vec<String>)> {
        let mut names: Vec<String> = settings.suggestions.clone();
        if let Some(path) = &self.suggestions_file {
            names.extend(read_suggestions_file(path)?);
        }
        names.extend(self.suggestions.iter().cloned());

        let mut tags: Vec<String> = settings.selected_tags.clone();
        tags.extend(self.tags.iter().cloned());

        if names.is_empty() && tags.is_empty() {
            debug!("No suggestions given, using sample data");
            names = SAMPLE_SUGGESTIONS.iter().map(|s| s.to_string()).collect();
            tags = SAMPLE_TAGS.iter().map(|s| s.to_string()).collect();
        }

        let mut pool: Vec<Suggestion> = Vec::with_capacity(names.len());
        for name in names {
            if pool.iter().any(|s| s.name == name) {
                warn!(suggestion = %name, "Dropping duplicate suggestion");
                continue;
            }
            pool.push(Suggestion::new(name));
        }

        Ok((pool, tags))
    }

    /// Format the final tags for stdout.
    pub fn format_tags(&self, tags: &[String]) -> Result<String> {
        if self.json {
            serde_json::to_string(tags).map_err(|e| crate::error::AppError::other(e.to_string()))
        } else {
            Ok(tags.join("\n"))
        }
    }
}

/// Read one suggestion per line, trimming whitespace and skipping blanks.
fn read_suggestions_file(path: &Path) -> Result<Vec<String>> {
    let contents = std::fs::read_to_string(path)?;
    Ok(contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}
