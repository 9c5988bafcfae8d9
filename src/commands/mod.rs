use clap::Args;
use std::path::{Path, PathBuf};

use varcase::{RenamerConfig, RewriteMode};

pub type CmdResult<T> = varcase::Result<(T, i32)>;

pub(crate) struct GlobalArgs {}

/// Arguments shared by every command that builds a `RenamerConfig`.
///
/// Values from `--config` are loaded first; flags then override
/// (`PATHS`, `--suffix`, `--mode`) or extend (`--ignore`) them.
#[derive(Args, Default, Debug)]
pub struct ConfigArgs {
    /// JSON config file (sourcePaths, fileSuffixes, ignoredIdentifiers, ...)
    #[arg(long, value_name = "FILE")]
    pub config: Option<String>,

    /// File name suffixes to select (replaces the configured list)
    #[arg(long = "suffix", value_name = "SUFFIX")]
    pub suffixes: Vec<String>,

    /// Additional identifiers to leave un-camel-cased
    #[arg(long = "ignore", value_name = "IDENT")]
    pub ignore: Vec<String>,

    /// Rewrite mode: lexical (identifiers only) or text (raw word runs)
    #[arg(long)]
    pub mode: Option<String>,

    /// Only apply the underscore-prefix rule
    #[arg(long)]
    pub prefix_only: bool,
}

impl ConfigArgs {
    /// Build the effective config. `paths`, when non-empty, replaces the
    /// configured source paths.
    pub fn resolve(&self, paths: &[String]) -> varcase::Result<RenamerConfig> {
        let mut config = match &self.config {
            Some(file) => {
                let expanded = shellexpand::tilde(file).to_string();
                RenamerConfig::load(Path::new(&expanded))?
            }
            None => RenamerConfig::default(),
        };

        if !paths.is_empty() {
            config.source_paths = paths.iter().map(PathBuf::from).collect();
        }
        if !self.suffixes.is_empty() {
            config.file_suffixes = self.suffixes.clone();
        }
        config
            .ignored_identifiers
            .extend(self.ignore.iter().cloned());
        if let Some(mode) = &self.mode {
            config.mode = RewriteMode::from_str(mode)?;
        }
        if self.prefix_only {
            config.camel_case = false;
        }

        config.validate()?;
        Ok(config)
    }
}

pub mod explain;
pub mod files;
pub mod rename;

/// Dispatch a command to its handler and map result to JSON.
macro_rules! dispatch {
    ($args:expr, $module:ident) => {
        crate::output::map_cmd_result_to_json($module::run_json($args))
    };
    ($args:expr, $global:expr, $module:ident) => {
        crate::output::map_cmd_result_to_json($module::run($args, $global))
    };
}

pub(crate) fn run_json(
    command: crate::Commands,
    global: &GlobalArgs,
) -> (varcase::Result<serde_json::Value>, i32) {
    crate::tty::status("varcase is working...");

    match command {
        // Commands without global context
        crate::Commands::Explain(args) => dispatch!(args, explain),
        crate::Commands::Files(args) => dispatch!(args, files),

        // Commands with global context
        crate::Commands::Rename(args) => dispatch!(args, global, rename),
    }
}
