use clap::Args;
use serde::Serialize;

use varcase::selector;

use super::{CmdResult, ConfigArgs};

#[derive(Args)]
pub struct FilesArgs {
    /// Source directories (non-recursive)
    pub paths: Vec<String>,

    #[command(flatten)]
    pub config: ConfigArgs,
}

#[derive(Serialize)]
pub struct FilesOutput {
    pub source_paths: Vec<String>,
    pub file_suffixes: Vec<String>,
    pub files: Vec<String>,
    pub total_files: usize,
}

pub fn run_json(args: FilesArgs) -> CmdResult<FilesOutput> {
    let config = args.config.resolve(&args.paths)?;
    let files = selector::select_files(&config.source_paths, &config.file_suffixes)?;

    let exit_code = if files.is_empty() { 1 } else { 0 };

    Ok((
        FilesOutput {
            source_paths: config
                .source_paths
                .iter()
                .map(|p| p.display().to_string())
                .collect(),
            file_suffixes: config.file_suffixes.clone(),
            total_files: files.len(),
            files: files.iter().map(|f| f.display().to_string()).collect(),
        },
        exit_code,
    ))
}
