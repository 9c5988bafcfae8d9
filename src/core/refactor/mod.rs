//! Naming-convention refactoring: rewrite identifiers across source files.
//!
//! Tokenizes (or scans) each selected file, prefixes underscore-initial
//! identifiers, camel-cases underscore-separated ones, and writes the result
//! back in place.

pub mod guard;
pub mod lexer;
pub mod rules;
mod rename;

pub use rename::{
    process_file, rewrite_content, run, ContentRewrite, FileFailure, FileRewrite, RenameReport,
    RestoreOutcome, RestoreRequest, RunOptions,
};
