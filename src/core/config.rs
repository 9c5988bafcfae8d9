//! Renamer configuration.
//!
//! Every knob the pipeline reads lives on `RenamerConfig`. Defaults match the
//! conventions the tool was written for (`.cpp`/`.h` files, `m_`/`a_` markers,
//! the C++ standard-library ignore list). A JSON file can override any field;
//! CLI flags are layered on top by the command layer.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::utils::io;

/// How identifiers are located in file content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RewriteMode {
    /// Tokenize the file and rewrite identifier tokens only.
    #[default]
    Lexical,
    /// Blind word-boundary substitution over the raw text, strings and
    /// comments included.
    Text,
}

impl RewriteMode {
    pub fn from_str(s: &str) -> Result<Self> {
        match s {
            "lexical" => Ok(RewriteMode::Lexical),
            "text" => Ok(RewriteMode::Text),
            _ => Err(Error::validation_invalid_argument(
                "mode",
                format!("Unknown mode '{}'. Use: lexical, text", s),
            )),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RewriteMode::Lexical => "lexical",
            RewriteMode::Text => "text",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenamerConfig {
    /// Directories whose immediate children are candidates.
    #[serde(default)]
    pub source_paths: Vec<PathBuf>,

    #[serde(default = "default_file_suffixes")]
    pub file_suffixes: Vec<String>,

    /// Identifiers never camel-cased. Not consulted by the prefix transform.
    #[serde(default = "default_ignored_identifiers")]
    pub ignored_identifiers: BTreeSet<String>,

    #[serde(default = "default_member_prefix_marker")]
    pub member_prefix_marker: String,

    #[serde(default = "default_argument_prefix_marker")]
    pub argument_prefix_marker: String,

    /// Literal text shielded from both transforms.
    #[serde(default = "default_separator")]
    pub separator: String,

    /// Single glyph standing in for `separator` while the transforms run.
    #[serde(default = "default_placeholder")]
    pub placeholder: char,

    #[serde(default)]
    pub mode: RewriteMode,

    /// When false only the underscore-prefix transform runs.
    #[serde(default = "default_camel_case")]
    pub camel_case: bool,
}

impl Default for RenamerConfig {
    fn default() -> Self {
        Self {
            source_paths: Vec::new(),
            file_suffixes: default_file_suffixes(),
            ignored_identifiers: default_ignored_identifiers(),
            member_prefix_marker: default_member_prefix_marker(),
            argument_prefix_marker: default_argument_prefix_marker(),
            separator: default_separator(),
            placeholder: default_placeholder(),
            mode: RewriteMode::default(),
            camel_case: default_camel_case(),
        }
    }
}

// =============================================================================
// Default value functions
// =============================================================================

fn default_file_suffixes() -> Vec<String> {
    vec![".cpp".to_string(), ".h".to_string()]
}

/// Standard-library names with underscores that belong to an interface we
/// cannot rename.
const STD_IDENTIFIERS: &[&str] = &[
    "back_inserter",
    "c_str",
    "const_cast",
    "dynamic_cast",
    "emplace_back",
    "find_first_not_of",
    "find_first_of",
    "find_if",
    "find_if_not",
    "find_last_not_of",
    "find_last_of",
    "invalid_argument",
    "is_open",
    "logic_error",
    "make_pair",
    "make_shared",
    "make_unique",
    "out_of_range",
    "pop_back",
    "push_back",
    "reinterpret_cast",
    "remove_if",
    "runtime_error",
    "shared_ptr",
    "size_t",
    "size_type",
    "static_cast",
    "string_view",
    "to_string",
    "unique_ptr",
    "unordered_map",
    "unordered_set",
];

/// Keywords, alternative tokens and built-in or `<cstdint>`/`<cstddef>`
/// types that contain an underscore. The lexer tags them as identifiers.
const CPP_KEYWORDS_AND_TYPES: &[&str] = &[
    "and_eq",
    "char16_t",
    "char32_t",
    "char8_t",
    "co_await",
    "co_return",
    "co_yield",
    "int16_t",
    "int32_t",
    "int64_t",
    "int8_t",
    "int_fast16_t",
    "int_fast32_t",
    "int_fast64_t",
    "int_fast8_t",
    "int_least16_t",
    "int_least32_t",
    "int_least64_t",
    "int_least8_t",
    "intmax_t",
    "intptr_t",
    "max_align_t",
    "not_eq",
    "nullptr_t",
    "off_t",
    "or_eq",
    "ptrdiff_t",
    "ssize_t",
    "static_assert",
    "thread_local",
    "time_t",
    "uint16_t",
    "uint32_t",
    "uint64_t",
    "uint8_t",
    "uint_fast16_t",
    "uint_fast32_t",
    "uint_fast64_t",
    "uint_fast8_t",
    "uint_least16_t",
    "uint_least32_t",
    "uint_least64_t",
    "uint_least8_t",
    "uintmax_t",
    "uintptr_t",
    "wchar_t",
    "xor_eq",
];

fn default_ignored_identifiers() -> BTreeSet<String> {
    CPP_KEYWORDS_AND_TYPES
        .iter()
        .chain(STD_IDENTIFIERS)
        .map(|s| s.to_string())
        .collect()
}

fn default_member_prefix_marker() -> String {
    "m".to_string()
}

fn default_argument_prefix_marker() -> String {
    "a".to_string()
}

/// Divider used in the assembler's console output: a run of underscores
/// followed by two escaped newlines, as written inside a string literal.
fn default_separator() -> String {
    format!("{}\\n\\n", "_".repeat(50))
}

fn default_placeholder() -> char {
    '§'
}

fn default_camel_case() -> bool {
    true
}

// =============================================================================
// Loading and validation
// =============================================================================

impl RenamerConfig {
    /// Load a config file. Missing keys fall back to defaults; relative
    /// source paths are resolved against the file's directory.
    pub fn load(path: &Path) -> Result<Self> {
        let content = io::read_file(path, &format!("read {}", path.display()))?;
        let mut config: RenamerConfig = serde_json::from_str(&content)
            .map_err(|e| Error::config_invalid_json(path.display().to_string(), e))?;

        if let Some(base) = path.parent() {
            config.source_paths = config
                .source_paths
                .into_iter()
                .map(|p| if p.is_relative() { base.join(p) } else { p })
                .collect();
        }

        config.validate()?;
        Ok(config)
    }

    /// Reject settings that would make the transforms misbehave.
    pub fn validate(&self) -> Result<()> {
        if self.file_suffixes.iter().all(|s| s.is_empty()) {
            return Err(Error::config_invalid_value(
                "fileSuffixes",
                None,
                "At least one non-empty suffix is required",
            ));
        }

        for (key, marker) in [
            ("memberPrefixMarker", &self.member_prefix_marker),
            ("argumentPrefixMarker", &self.argument_prefix_marker),
        ] {
            if marker.is_empty() || !marker.chars().all(|c| c.is_alphanumeric()) {
                return Err(Error::config_invalid_value(
                    key,
                    Some(marker.clone()),
                    "Prefix markers must be non-empty and contain only letters or digits",
                ));
            }
        }

        if self.placeholder.is_ascii() || self.placeholder.is_alphanumeric() {
            return Err(Error::config_invalid_value(
                "placeholder",
                Some(self.placeholder.to_string()),
                "Placeholder must be a non-ASCII, non-word character",
            ));
        }

        if self.separator.is_empty() {
            return Err(Error::config_invalid_value(
                "separator",
                None,
                "Separator must not be empty",
            ));
        }

        if self.separator.contains(self.placeholder) {
            return Err(Error::config_invalid_value(
                "separator",
                Some(self.separator.clone()),
                "Separator must not contain the placeholder glyph",
            ));
        }

        Ok(())
    }

    pub fn is_ignored(&self, identifier: &str) -> bool {
        self.ignored_identifiers.contains(identifier)
    }
}
