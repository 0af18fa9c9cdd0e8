// src/conjure.rs

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;

use crate::errors::{HarnessError, Result};

/// Handle on the external `conjure` executable.
///
/// All semantic work (type-checking, pretty-printing, solution validation)
/// happens inside conjure; this type only builds the command lines and
/// collects what the process printed.
#[derive(Debug, Clone)]
pub struct Conjure {
    program: PathBuf,
    timeout: Option<Duration>,
}

/// Captured result of one conjure invocation.
#[derive(Debug, Clone)]
pub struct ToolOutput {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
    /// The command line that produced this output, quoted for display.
    pub command: String,
}

impl ToolOutput {
    /// stdout followed by stderr.
    pub fn combined(&self) -> String {
        let mut text = self.stdout.clone();
        text.push_str(&self.stderr);
        text
    }
}

impl Conjure {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            timeout: None,
        }
    }

    /// Bounds every invocation; `None` waits forever.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Arguments for `validate-solution --essence <spec> [--param <file>] --solution <file>`.
    pub fn validate_solution_args(
        essence: &Path,
        param: Option<&Path>,
        solution: &Path,
    ) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            "validate-solution".into(),
            "--essence".into(),
            essence.into(),
        ];
        if let Some(param) = param {
            args.push("--param".into());
            args.push(param.into());
        }
        args.push("--solution".into());
        args.push(solution.into());
        args
    }

    pub async fn validate_solution(
        &self,
        essence: &Path,
        param: Option<&Path>,
        solution: &Path,
    ) -> Result<ToolOutput> {
        self.run(Self::validate_solution_args(essence, param, solution))
            .await
    }

    pub async fn type_check(&self, file: &Path) -> Result<ToolOutput> {
        self.run(vec!["type-check".into(), file.into()]).await
    }

    /// `pretty <file> --output-format json`
    pub async fn pretty_json(&self, file: &Path) -> Result<ToolOutput> {
        self.run(vec![
            "pretty".into(),
            file.into(),
            "--output-format".into(),
            "json".into(),
        ])
        .await
    }

    async fn run(&self, args: Vec<OsString>) -> Result<ToolOutput> {
        let command = command_line(&self.program, &args);
        log::debug!("Running {}", command);

        let mut cmd = Command::new(&self.program);
        cmd.args(&args).stdin(Stdio::null()).kill_on_drop(true);
        let pending = cmd.output();

        let output = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, pending).await.map_err(|_| {
                HarnessError::ToolTimeout {
                    command: command.clone(),
                    seconds: limit.as_secs(),
                }
            })?,
            None => pending.await,
        }
        .map_err(|source| HarnessError::ToolSpawn {
            program: self.program.display().to_string(),
            source,
        })?;

        let result = ToolOutput {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            command,
        };
        if !result.success {
            log::warn!("conjure exited with {}: {}", output.status, result.command);
        }
        Ok(result)
    }
}

/// Renders a command as `"prog" "arg1" "arg2"` for diagnostics.
pub fn command_line(program: &Path, args: &[OsString]) -> String {
    std::iter::once(program.as_os_str())
        .chain(args.iter().map(OsString::as_os_str))
        .map(|part| format!("\"{}\"", part.to_string_lossy()))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_args_without_param() {
        let args = Conjure::validate_solution_args(
            Path::new("model.essence"),
            None,
            Path::new("out/solution1.solution"),
        );
        let rendered = command_line(Path::new("conjure"), &args);
        assert_eq!(
            rendered,
            r#""conjure" "validate-solution" "--essence" "model.essence" "--solution" "out/solution1.solution""#
        );
    }

    #[test]
    fn test_validate_args_with_param() {
        let args = Conjure::validate_solution_args(
            Path::new("model.essence"),
            Some(Path::new("inst.param")),
            Path::new("solution3.solution"),
        );
        assert_eq!(args.len(), 7);
        assert_eq!(args[3], OsString::from("--param"));
        assert_eq!(args[4], OsString::from("inst.param"));
        assert_eq!(args[6], OsString::from("solution3.solution"));
    }

    #[tokio::test]
    async fn test_missing_program_is_spawn_error() {
        let conjure = Conjure::new("/nonexistent/conjure-binary");
        let err = conjure
            .type_check(Path::new("model.essence"))
            .await
            .unwrap_err();
        assert!(matches!(err, HarnessError::ToolSpawn { .. }));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_nonzero_exit_is_not_success() {
        // `sh type-check <file>` fails because there is no script called type-check.
        let conjure = Conjure::new("/bin/sh");
        let output = conjure
            .type_check(Path::new("model.essence"))
            .await
            .unwrap();
        assert!(!output.success);
        assert!(output.command.starts_with("\"/bin/sh\" \"type-check\""));
    }

    #[test]
    fn test_combined_output_order() {
        let output = ToolOutput {
            success: false,
            stdout: "out\n".to_string(),
            stderr: "err\n".to_string(),
            command: String::new(),
        };
        assert_eq!(output.combined(), "out\nerr\n");
    }
}
