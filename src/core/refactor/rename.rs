//! Rename engine: rewrite naming conventions across selected files.
//!
//! For each file selected from the configured directories this module:
//! 1. Swaps the separator for its placeholder
//! 2. Rewrites identifiers (underscore prefix, then camel case)
//! 3. Swaps the placeholder back
//! 4. Writes the result over the original file (unless dry-run)
//!
//! Each file is read, rewritten and written before the next one is opened.

use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use super::guard::SeparatorGuard;
use super::lexer::{self, TokenKind};
use super::rules;
use crate::config::{RenamerConfig, RewriteMode};
use crate::error::{Error, ErrorCode, Result};
use crate::restore::WorkingTreeRestorer;
use crate::selector;
use crate::utils::io;

// ============================================================================
// Types
// ============================================================================

/// Result of rewriting one piece of content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentRewrite {
    pub content: String,
    /// Number of identifier occurrences replaced.
    pub replacements: usize,
    /// Distinct renames, original → rewritten.
    pub renames: BTreeMap<String, String>,
}

/// Outcome for a single file.
#[derive(Debug, Clone, Serialize)]
pub struct FileRewrite {
    pub file: String,
    pub replacements: usize,
    pub renames: BTreeMap<String, String>,
    /// Whether new content was written to disk.
    pub written: bool,
}

/// A file that failed while `keep_going` was set.
#[derive(Debug, Clone, Serialize)]
pub struct FileFailure {
    pub file: String,
    pub code: String,
    pub message: String,
}

/// Working-tree restore requested before the run.
#[derive(Debug, Clone)]
pub struct RestoreRequest {
    pub root: PathBuf,
    pub exclude: Vec<PathBuf>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RestoreOutcome {
    pub root: String,
    pub restored: bool,
    /// Set when the restore was requested but not run (dry run).
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub skipped: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Compute rewrites without writing.
    pub dry_run: bool,
    /// Record per-file failures and continue instead of aborting.
    pub keep_going: bool,
    pub restore: Option<RestoreRequest>,
}

/// The full result of a rename run.
#[derive(Debug, Clone, Serialize)]
pub struct RenameReport {
    pub mode: String,
    pub dry_run: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restore: Option<RestoreOutcome>,
    pub files: Vec<FileRewrite>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<FileFailure>,
    pub total_files: usize,
    pub changed_files: usize,
    pub total_replacements: usize,
}

// ============================================================================
// Content rewriting
// ============================================================================

#[derive(Default)]
struct Tally {
    replacements: usize,
    renames: BTreeMap<String, String>,
}

impl Tally {
    fn record(&mut self, from: &str, to: &str) {
        self.replacements += 1;
        self.renames
            .entry(from.to_string())
            .or_insert_with(|| to.to_string());
    }
}

/// Maximal runs of the characters the lexer accepts inside an identifier
/// (`char::is_alphanumeric` or `_`).
static TEXT_WORD_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\p{Alphabetic}\p{N}_]+").expect("word pattern is valid"));

/// Rewrite identifier tokens only.
fn rewrite_tokens(text: &str, config: &RenamerConfig, tally: &mut Tally) -> String {
    let mut out = String::with_capacity(text.len() + text.len() / 8);
    for token in lexer::tokenize(text) {
        let replacement = match token.kind {
            TokenKind::Identifier => rules::rewrite_identifier(token.text, config),
            _ => None,
        };
        match replacement {
            Some(new) => {
                tally.record(token.text, &new);
                out.push_str(&new);
            }
            None => out.push_str(token.text),
        }
    }
    out
}

/// Rewrite every word run in the raw text, strings and comments included.
///
/// Prefixing only ever prepends to a run that is already word-bounded, so a
/// single pass applying both rules per run is the same as a prefix pass
/// followed by a camel-case pass.
fn rewrite_text(text: &str, config: &RenamerConfig, tally: &mut Tally) -> String {
    let rewritten = TEXT_WORD_PATTERN.replace_all(text, |caps: &regex::Captures<'_>| {
        let word = &caps[0];
        match rules::rewrite_identifier(word, config) {
            Some(new) => {
                tally.record(word, &new);
                new
            }
            None => word.to_string(),
        }
    });

    rewritten.into_owned()
}

/// Run the full pipeline over one piece of content.
pub fn rewrite_content(content: &str, config: &RenamerConfig) -> Result<ContentRewrite> {
    let guard = SeparatorGuard::new(&config.separator, config.placeholder);
    let protected = guard.protect(content)?;

    let mut tally = Tally::default();
    let rewritten = match config.mode {
        RewriteMode::Lexical => rewrite_tokens(&protected, config, &mut tally),
        RewriteMode::Text => rewrite_text(&protected, config, &mut tally),
    };

    Ok(ContentRewrite {
        content: guard.restore(&rewritten),
        replacements: tally.replacements,
        renames: tally.renames,
    })
}

// ============================================================================
// File processing
// ============================================================================

/// Read, rewrite and (unless `dry_run`) overwrite one file.
///
/// The file is written only when every transform succeeded and the content
/// actually changed.
pub fn process_file(path: &Path, config: &RenamerConfig, dry_run: bool) -> Result<FileRewrite> {
    let display = path.display().to_string();
    let content = io::read_file(path, &format!("read {}", display))?;

    let rewrite = rewrite_content(&content, config).map_err(|e| match e.code {
        ErrorCode::RewritePlaceholderCollision => {
            Error::placeholder_collision(config.placeholder, Some(display.clone()))
        }
        _ => e,
    })?;

    let changed = rewrite.content != content;
    if changed && !dry_run {
        io::write_file(path, &rewrite.content, &format!("write {}", display))?;
    }

    Ok(FileRewrite {
        file: display,
        replacements: rewrite.replacements,
        renames: rewrite.renames,
        written: changed && !dry_run,
    })
}

fn run_restore(
    restorer: &dyn WorkingTreeRestorer,
    request: &RestoreRequest,
    dry_run: bool,
) -> RestoreOutcome {
    let root = selector::expand_path(&request.root);
    let root_display = root.display().to_string();

    if dry_run {
        log_status!("restore", "Dry run, not restoring {}", root_display);
        return RestoreOutcome {
            root: root_display,
            restored: false,
            skipped: true,
            error: None,
        };
    }

    match restorer.restore(&root, &request.exclude) {
        Ok(()) => {
            log_status!("restore", "Restored working tree under {}", root_display);
            RestoreOutcome {
                root: root_display,
                restored: true,
                skipped: false,
                error: None,
            }
        }
        Err(e) => {
            let detail = e
                .details
                .get("error")
                .and_then(|v| v.as_str())
                .map(str::to_string)
                .unwrap_or_else(|| e.message.clone());
            log_status!("restore", "Restore failed, continuing: {}", detail);
            RestoreOutcome {
                root: root_display,
                restored: false,
                skipped: false,
                error: Some(detail),
            }
        }
    }
}

/// Run the renamer over every selected file.
///
/// Restore (if requested) runs first and never fails the run; a dry run
/// skips it. A missing
/// source directory aborts before any file is touched. Per-file errors abort
/// the run unless `keep_going` is set.
pub fn run(
    config: &RenamerConfig,
    options: &RunOptions,
    restorer: &dyn WorkingTreeRestorer,
) -> Result<RenameReport> {
    config.validate()?;

    let restore = options
        .restore
        .as_ref()
        .map(|request| run_restore(restorer, request, options.dry_run));

    let files = selector::select_files(&config.source_paths, &config.file_suffixes)?;
    log_status!("rename", "Selected {} file(s)", files.len());

    let mut rewrites = Vec::new();
    let mut failures = Vec::new();

    for path in &files {
        match process_file(path, config, options.dry_run) {
            Ok(rewrite) => {
                if rewrite.replacements > 0 {
                    log_status!(
                        "rename",
                        "{}: {} replacement(s)",
                        rewrite.file,
                        rewrite.replacements
                    );
                }
                rewrites.push(rewrite);
            }
            Err(e) if options.keep_going => {
                log_status!("rename", "{}: {}", path.display(), e.message);
                failures.push(FileFailure {
                    file: path.display().to_string(),
                    code: e.code.as_str().to_string(),
                    message: e.message,
                });
            }
            Err(e) => return Err(e),
        }
    }

    let changed_files = rewrites.iter().filter(|r| r.replacements > 0).count();
    let total_replacements = rewrites.iter().map(|r| r.replacements).sum();

    Ok(RenameReport {
        mode: config.mode.as_str().to_string(),
        dry_run: options.dry_run,
        restore,
        total_files: files.len(),
        changed_files,
        total_replacements,
        files: rewrites,
        failures,
    })
}

// ============================================================================
// Tests
// ============================================================================
