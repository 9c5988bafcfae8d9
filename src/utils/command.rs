//! External process execution with consistent error handling.

use std::ffi::OsStr;
use std::path::Path;
use std::process::{Command, Output};

use crate::error::{Error, Result};

/// Run `program` with `args` inside `dir`.
///
/// Returns trimmed stdout on success. A spawn failure or non-zero exit becomes
/// an `internal.io_error` whose `error` detail carries stderr (stdout when
/// stderr is empty) and whose `context` names the step.
pub fn run_in<I, S>(dir: &Path, program: &str, args: I, context: &str) -> Result<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let output = Command::new(program)
        .args(args)
        .current_dir(dir)
        .output()
        .map_err(|e| {
            Error::internal_io(
                format!("Failed to run {}: {}", program, e),
                Some(context.to_string()),
            )
        })?;

    if !output.status.success() {
        let code = output
            .status
            .code()
            .map(|c| c.to_string())
            .unwrap_or_else(|| "signal".to_string());
        return Err(Error::internal_io(
            format!("{} (exit {}): {}", context, code, error_text(&output)),
            Some(context.to_string()),
        ));
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

/// Stderr of a finished command, falling back to stdout when stderr is blank.
pub fn error_text(output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr);
    if !stderr.trim().is_empty() {
        return stderr.trim().to_string();
    }
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::os::unix::process::ExitStatusExt;
    use std::process::ExitStatus;
    use tempfile::TempDir;

    fn output(stdout: &str, stderr: &str) -> Output {
        Output {
            status: ExitStatus::from_raw(256),
            stdout: stdout.as_bytes().to_vec(),
            stderr: stderr.as_bytes().to_vec(),
        }
    }

    #[test]
    fn run_in_returns_trimmed_stdout() {
        let dir = TempDir::new().unwrap();
        let result = run_in(dir.path(), "echo", ["hello"], "echo test");
        assert_eq!(result.unwrap(), "hello");
    }

    #[test]
    fn run_in_runs_inside_directory() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("Assembler.cpp"), "").unwrap();

        let listing = run_in(dir.path(), "ls", Vec::<String>::new(), "list").unwrap();
        assert_eq!(listing, "Assembler.cpp");
    }

    #[test]
    fn run_in_fails_with_unknown_program() {
        let dir = TempDir::new().unwrap();
        let err = run_in(dir.path(), "nonexistent_command_xyz", [""; 0], "probe").unwrap_err();
        assert_eq!(err.code.as_str(), "internal.io_error");
        assert_eq!(err.details["context"], "probe");
    }

    #[test]
    fn run_in_reports_exit_code_on_failure() {
        let dir = TempDir::new().unwrap();
        let err = run_in(dir.path(), "false", [""; 0], "false test").unwrap_err();
        let detail = err.details["error"].as_str().unwrap();
        assert!(detail.starts_with("false test (exit 1)"));
    }

    #[test]
    fn error_text_prefers_stderr() {
        assert_eq!(error_text(&output("out", "  err \n")), "err");
        assert_eq!(error_text(&output("out\n", "  ")), "out");
    }
}
