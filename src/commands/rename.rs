use clap::Args;
use std::path::PathBuf;

use varcase::refactor::{self, RenameReport, RestoreRequest, RunOptions};
use varcase::{GitRestorer, NoopRestorer, WorkingTreeRestorer};

use super::{CmdResult, ConfigArgs};

/// Exit code when `--keep-going` skipped at least one file.
const PARTIAL_SUCCESS_EXIT_CODE: i32 = 3;

#[derive(Args)]
pub struct RenameArgs {
    /// Source directories (non-recursive)
    pub paths: Vec<String>,

    #[command(flatten)]
    pub config: ConfigArgs,

    /// Show what would change without writing files
    #[arg(long)]
    pub dry_run: bool,

    /// Continue past files that fail instead of aborting
    #[arg(long)]
    pub keep_going: bool,

    /// Restore tracked files with git before rewriting
    #[arg(long)]
    pub restore: bool,

    /// Directory to restore (default: current directory)
    #[arg(long, value_name = "DIR", requires = "restore")]
    pub restore_root: Option<String>,

    /// Paths staged before the restore so they keep local edits
    #[arg(long = "restore-exclude", value_name = "PATH", requires = "restore")]
    pub restore_exclude: Vec<String>,
}

pub fn run(args: RenameArgs, _global: &crate::commands::GlobalArgs) -> CmdResult<RenameReport> {
    let config = args.config.resolve(&args.paths)?;

    let restore = args.restore.then(|| RestoreRequest {
        root: PathBuf::from(args.restore_root.as_deref().unwrap_or(".")),
        exclude: args.restore_exclude.iter().map(PathBuf::from).collect(),
    });

    let options = RunOptions {
        dry_run: args.dry_run,
        keep_going: args.keep_going,
        restore,
    };

    let restorer: Box<dyn WorkingTreeRestorer> = if args.restore {
        Box::new(GitRestorer::new())
    } else {
        Box::new(NoopRestorer)
    };

    let report = refactor::run(&config, &options, restorer.as_ref())?;

    let exit_code = if report.failures.is_empty() {
        0
    } else {
        PARTIAL_SUCCESS_EXIT_CODE
    };

    Ok((report, exit_code))
}
