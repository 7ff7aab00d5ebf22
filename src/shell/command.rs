//! Subprocess execution.
//!
//! Programs are spawned directly with an argument vector, never through a
//! shell, so element names and URLs cannot inject shell syntax.

use crate::error::{ElementsError, Result};
use std::collections::BTreeMap;
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

/// Result of executing a command.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Exit code (None if killed by signal).
    pub exit_code: Option<i32>,

    /// Standard output, when captured.
    pub stdout: String,

    /// Standard error, when captured.
    pub stderr: String,

    /// Execution duration.
    pub duration: Duration,

    /// Whether command succeeded (exit code 0).
    pub success: bool,
}

impl CommandResult {
    /// Create a success result.
    pub fn success(stdout: String, stderr: String, duration: Duration) -> Self {
        Self {
            exit_code: Some(0),
            stdout,
            stderr,
            duration,
            success: true,
        }
    }

    /// Create a failure result.
    pub fn failure(
        exit_code: Option<i32>,
        stdout: String,
        stderr: String,
        duration: Duration,
    ) -> Self {
        Self {
            exit_code,
            stdout,
            stderr,
            duration,
            success: false,
        }
    }

    /// Short description of why the command failed, for error messages.
    pub fn failure_message(&self) -> String {
        let stderr = self.stderr.trim();
        match (self.exit_code, stderr.is_empty()) {
            (Some(code), true) => format!("exit status {}", code),
            (Some(code), false) => format!("exit status {}: {}", code, stderr),
            (None, true) => "terminated by signal".to_string(),
            (None, false) => format!("terminated by signal: {}", stderr),
        }
    }
}

/// Where a child's output stream goes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum OutputTarget {
    /// Drop the output.
    #[default]
    Discard,
    /// Collect into the [`CommandResult`].
    Capture,
    /// Pass through to our own stdout/stderr.
    Inherit,
    /// Append to a log file, creating it and its directory as needed.
    Append(PathBuf),
}

impl OutputTarget {
    fn is_captured(&self) -> bool {
        matches!(self, Self::Capture)
    }

    fn to_stdio(&self) -> Result<Stdio> {
        Ok(match self {
            Self::Discard => Stdio::null(),
            Self::Capture => Stdio::piped(),
            Self::Inherit => Stdio::inherit(),
            Self::Append(path) => Stdio::from(open_log(path)?),
        })
    }
}

fn open_log(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    Ok(OpenOptions::new().create(true).append(true).open(path)?)
}

/// Destinations for both output streams of a family of related commands.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputRouting {
    pub stdout: OutputTarget,
    pub stderr: OutputTarget,
}

impl OutputRouting {
    /// Send both streams to `<dir>/<name>.out` and `<dir>/<name>.err`.
    pub fn log_files(dir: &Path, name: &str) -> Self {
        Self {
            stdout: OutputTarget::Append(dir.join(format!("{}.out", name))),
            stderr: OutputTarget::Append(dir.join(format!("{}.err", name))),
        }
    }

    /// Pass both streams through to the terminal.
    pub fn inherit() -> Self {
        Self {
            stdout: OutputTarget::Inherit,
            stderr: OutputTarget::Inherit,
        }
    }

    /// Command options using this routing.
    pub fn options(&self) -> CommandOptions {
        CommandOptions {
            stdout: self.stdout.clone(),
            stderr: self.stderr.clone(),
            ..Default::default()
        }
    }
}

/// Options for command execution.
#[derive(Debug, Clone, Default)]
pub struct CommandOptions {
    /// Working directory.
    pub cwd: Option<PathBuf>,

    /// Environment variables (merged with system env).
    pub env: BTreeMap<String, String>,

    /// Destination of the child's stdout.
    pub stdout: OutputTarget,

    /// Destination of the child's stderr.
    pub stderr: OutputTarget,
}

impl CommandOptions {
    /// Capture both streams.
    pub fn captured() -> Self {
        Self {
            stdout: OutputTarget::Capture,
            stderr: OutputTarget::Capture,
            ..Default::default()
        }
    }

    /// Set the working directory.
    pub fn in_dir(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }
}

/// Render a program and its arguments the way a user would type them.
pub fn display_command(program: &str, args: &[String]) -> String {
    std::iter::once(program)
        .chain(args.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Execute a program.
///
/// A non-zero exit is reported through [`CommandResult::success`]; only a
/// failure to start the program is an error.
pub fn execute(program: &str, args: &[String], options: &CommandOptions) -> Result<CommandResult> {
    let start = Instant::now();
    let rendered = display_command(program, args);
    tracing::debug!(command = %rendered, cwd = ?options.cwd, "Executing");

    let mut cmd = Command::new(program);
    cmd.args(args);

    if let Some(cwd) = &options.cwd {
        cmd.current_dir(cwd);
    }

    for (key, value) in &options.env {
        cmd.env(key, value);
    }

    cmd.stdin(Stdio::null());
    cmd.stdout(options.stdout.to_stdio()?);
    cmd.stderr(options.stderr.to_stdio()?);

    let output = cmd.output().map_err(|e| {
        tracing::debug!("Failed to start {}: {}", program, e);
        ElementsError::CommandFailed {
            command: rendered.clone(),
            code: None,
        }
    })?;

    let duration = start.elapsed();

    let stdout = if options.stdout.is_captured() {
        String::from_utf8_lossy(&output.stdout).to_string()
    } else {
        String::new()
    };

    let stderr = if options.stderr.is_captured() {
        String::from_utf8_lossy(&output.stderr).to_string()
    } else {
        String::new()
    };

    if output.status.success() {
        Ok(CommandResult::success(stdout, stderr, duration))
    } else {
        tracing::debug!(command = %rendered, code = ?output.status.code(), "Command failed");
        Ok(CommandResult::failure(
            output.status.code(),
            stdout,
            stderr,
            duration,
        ))
    }
}

/// Execute a program and collect both output streams.
pub fn execute_quiet(program: &str, args: &[String], cwd: Option<&Path>) -> Result<CommandResult> {
    let mut options = CommandOptions::captured();
    options.cwd = cwd.map(Path::to_path_buf);
    execute(program, args, &options)
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn execute_successful_command() {
        let result = execute("echo", &args(&["hello"]), &CommandOptions::captured()).unwrap();

        assert!(result.success);
        assert_eq!(result.exit_code, Some(0));
        assert!(result.stdout.contains("hello"));
    }

    #[test]
    fn execute_failing_command() {
        let result = execute("sh", &args(&["-c", "exit 3"]), &CommandOptions::captured()).unwrap();

        assert!(!result.success);
        assert_eq!(result.exit_code, Some(3));
        assert_eq!(result.failure_message(), "exit status 3");
    }

    #[test]
    fn failure_message_includes_stderr() {
        let result = execute(
            "sh",
            &args(&["-c", "echo broken >&2; exit 1"]),
            &CommandOptions::captured(),
        )
        .unwrap();

        assert_eq!(result.failure_message(), "exit status 1: broken");
    }

    #[test]
    fn missing_program_is_an_error() {
        let err = execute(
            "definitely-not-a-real-program-xyz",
            &[],
            &CommandOptions::default(),
        )
        .unwrap_err();

        assert!(matches!(err, ElementsError::CommandFailed { code: None, .. }));
    }

    #[test]
    fn arguments_are_not_shell_interpreted() {
        let result = execute("echo", &args(&["$HOME; ls"]), &CommandOptions::captured()).unwrap();
        assert_eq!(result.stdout.trim(), "$HOME; ls");
    }

    #[test]
    fn execute_with_env() {
        let mut options = CommandOptions::captured();
        options
            .env
            .insert("MY_VAR".to_string(), "my_value".to_string());

        let result = execute("sh", &args(&["-c", "echo $MY_VAR"]), &options).unwrap();

        assert!(result.success);
        assert!(result.stdout.contains("my_value"));
    }

    #[test]
    fn execute_with_cwd() {
        let temp = TempDir::new().unwrap();
        let options = CommandOptions::captured().in_dir(temp.path());

        let result = execute("pwd", &[], &options).unwrap();

        assert!(result.success);
        let reported = std::fs::canonicalize(result.stdout.trim()).unwrap();
        assert_eq!(reported, std::fs::canonicalize(temp.path()).unwrap());
    }

    #[test]
    fn discarded_output_is_not_captured() {
        let result = execute("echo", &args(&["hidden"]), &CommandOptions::default()).unwrap();
        assert!(result.success);
        assert!(result.stdout.is_empty());
    }

    #[test]
    fn append_target_writes_log_files() {
        let temp = TempDir::new().unwrap();
        let log = temp.path().join("logs").join("hermes.out");
        let options = CommandOptions {
            stdout: OutputTarget::Append(log.clone()),
            ..Default::default()
        };

        execute("echo", &args(&["first"]), &options).unwrap();
        execute("echo", &args(&["second"]), &options).unwrap();

        let content = std::fs::read_to_string(&log).unwrap();
        assert_eq!(content, "first\nsecond\n");
    }

    #[test]
    fn log_file_routing_names_streams_after_element() {
        let routing = OutputRouting::log_files(Path::new("/src/element-logs"), "hermes");
        assert_eq!(
            routing.stdout,
            OutputTarget::Append(PathBuf::from("/src/element-logs/hermes.out"))
        );
        assert_eq!(
            routing.stderr,
            OutputTarget::Append(PathBuf::from("/src/element-logs/hermes.err"))
        );
        assert!(routing.options().cwd.is_none());
    }

    #[test]
    fn display_command_joins_arguments() {
        assert_eq!(
            display_command("make", &args(&["-j4", "all"])),
            "make -j4 all"
        );
    }

    #[test]
    fn execute_quiet_captures_both_streams() {
        let result = execute_quiet("sh", &args(&["-c", "echo out; echo err >&2"]), None).unwrap();
        assert_eq!(result.stdout.trim(), "out");
        assert_eq!(result.stderr.trim(), "err");
    }
}
