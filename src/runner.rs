use std::path::Path;
use std::process::{Command, ExitStatus};
use thiserror::Error;

use crate::logging::Logger;

/// Captured output of a successfully completed command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
}

/// Failure modes of an external command invocation.
///
/// Any stderr output is an error even when the exit status is zero: the
/// generator reports real problems on stderr without always failing the
/// process, so callers must see them.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("failed to run `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` exited with {status}\n{stderr}")]
    Failed {
        command: String,
        status: ExitStatus,
        stderr: String,
    },

    #[error("`{command}` wrote to stderr\n{stderr}")]
    Stderr { command: String, stderr: String },
}

/// Runs `program args...` in `cwd`, logging the invocation and its output.
pub fn run_command(
    program: &str,
    args: &[&str],
    cwd: &Path,
    logger: &dyn Logger,
) -> Result<CommandOutput, RunError> {
    let command_line = if args.is_empty() {
        program.to_string()
    } else {
        format!("{} {}", program, args.join(" "))
    };

    logger.line(&format!("Running command in: {}", cwd.display()));

    let output = Command::new(program)
        .args(args)
        .current_dir(cwd)
        .output()
        .map_err(|source| RunError::Spawn {
            command: command_line.clone(),
            source,
        })?;

    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

    if !output.status.success() {
        logger.line(&format!("Failed to run `{}`", command_line));
        logger.line(&stderr);
        return Err(RunError::Failed {
            command: command_line,
            status: output.status,
            stderr,
        });
    }

    if !stderr.is_empty() {
        logger.line(&format!("stderr from `{}`:", command_line));
        logger.line(&stderr);
        return Err(RunError::Stderr {
            command: command_line,
            stderr,
        });
    }

    logger.line(&stdout);
    Ok(CommandOutput { stdout })
}

/// Runs the slang code generator in the project root.
pub fn run_slang_gen(root: &Path, logger: &dyn Logger) -> Result<CommandOutput, RunError> {
    run_command("dart", &["run", "slang"], root, logger)
}

/// Adds packages via `dart pub add`. Dev-time packages are expected to
/// already carry the `dev:` prefix.
pub fn add_dependencies(
    root: &Path,
    dependencies: &[String],
    logger: &dyn Logger,
) -> Result<CommandOutput, RunError> {
    logger.line(&format!("Adding dependencies: {}", dependencies.join(", ")));

    let mut args = vec!["pub", "add"];
    args.extend(dependencies.iter().map(String::as_str));
    run_command("dart", &args, root, logger)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::mock::RecordingLogger;

    #[test]
    fn captures_stdout_on_success() {
        let logger = RecordingLogger::new();
        let output = run_command("sh", &["-c", "printf ok"], Path::new("."), &logger).unwrap();

        assert_eq!(output.stdout, "ok");
        assert!(logger.contains("Running command in:"));
    }

    #[test]
    fn nonzero_exit_is_an_error() {
        let logger = RecordingLogger::new();
        let err = run_command("sh", &["-c", "exit 3"], Path::new("."), &logger).unwrap_err();

        match err {
            RunError::Failed { status, .. } => assert_eq!(status.code(), Some(3)),
            other => panic!("expected Failed, got {:?}", other),
        }
    }

    #[test]
    fn stderr_with_zero_exit_is_an_error() {
        let logger = RecordingLogger::new();
        let err = run_command(
            "sh",
            &["-c", "printf warning >&2"],
            Path::new("."),
            &logger,
        )
        .unwrap_err();

        match err {
            RunError::Stderr { stderr, .. } => assert_eq!(stderr, "warning"),
            other => panic!("expected Stderr, got {:?}", other),
        }
        assert!(logger.contains("stderr from"));
    }

    #[test]
    fn missing_program_is_a_spawn_error() {
        let logger = RecordingLogger::new();
        let err = run_command(
            "definitely-not-a-real-program",
            &[],
            Path::new("."),
            &logger,
        )
        .unwrap_err();

        assert!(matches!(err, RunError::Spawn { .. }));
    }
}
