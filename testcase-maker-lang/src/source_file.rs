use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::process::ExitStatus;
use std::sync::Arc;
use std::time::Duration;

use scopeguard::guard;
use thiserror::Error;

use crate::{run_process, Language, LanguageManager, ProcessError};

/// Name of the file, inside the working directory, that is fed to the solution as standard input.
pub const TEMP_INPUT_NAME: &str = "temp_input.txt";

/// The step of an execution of a source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionPhase {
    /// The source file is being compiled.
    Compilation,
    /// The program is running on the input.
    Execution,
}

impl Display for ExecutionPhase {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ExecutionPhase::Compilation => write!(f, "compilation"),
            ExecutionPhase::Execution => write!(f, "execution"),
        }
    }
}

/// Limits applied to the executions of a source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionOptions {
    /// Maximum wall time of the program, `None` means no limit.
    pub time_limit: Option<Duration>,
    /// Maximum wall time of the compilation, `None` means no limit.
    pub build_time_limit: Option<Duration>,
}

impl Default for ExecutionOptions {
    fn default() -> Self {
        ExecutionOptions {
            time_limit: Some(Duration::from_secs(10)),
            build_time_limit: Some(Duration::from_secs(60)),
        }
    }
}

/// The reasons why running a source file did not produce an output.
#[derive(Debug, Error)]
pub enum ExecutionError {
    /// A transient file could not be written.
    #[error("failed to write {}: {source}", .path.display())]
    Io {
        /// The file that was being written.
        path: PathBuf,
        /// The underlying error.
        source: std::io::Error,
    },
    /// A process could not be started or waited for.
    #[error("{phase} failed: {source}")]
    Process {
        /// The step that failed.
        phase: ExecutionPhase,
        /// The underlying error.
        source: ProcessError,
    },
    /// The compiler did not compile the source file.
    #[error("compilation of {} failed ({status})", .file.display())]
    Build {
        /// The source file.
        file: PathBuf,
        /// The exit status of the compiler.
        status: ExitStatus,
        /// What the compiler wrote to its standard error.
        stderr: String,
    },
    /// The program did not exit successfully.
    #[error("the program failed at runtime ({status})")]
    Runtime {
        /// The exit status of the program.
        status: ExitStatus,
        /// What the program wrote to its standard error.
        stderr: String,
    },
    /// The compiler or the program did not terminate in time and it has been killed.
    #[error("the {phase} did not terminate within {limit:?}")]
    Timeout {
        /// The step that timed out.
        phase: ExecutionPhase,
        /// The exceeded limit.
        limit: Duration,
    },
}

impl ExecutionError {
    fn from_process(phase: ExecutionPhase, error: ProcessError) -> ExecutionError {
        match error {
            ProcessError::Timeout { limit, .. } => ExecutionError::Timeout { phase, limit },
            source => ExecutionError::Process { phase, source },
        }
    }

    /// What the failing process wrote to its standard error, if any.
    pub fn stderr(&self) -> Option<&str> {
        match self {
            ExecutionError::Build { stderr, .. } | ExecutionError::Runtime { stderr, .. } => {
                Some(stderr.as_str())
            }
            _ => None,
        }
    }
}

/// A source file that will be able to be executed (with an optional compilation step).
///
/// The program runs inside the directory that contains the source file, which for the discovered
/// solutions is the working directory: the transient input file and the compiled artifacts are
/// created there, and they are removed before `execute` returns, whatever the outcome.
#[derive(Debug, Clone)]
pub struct SourceFile {
    /// Path to the source file.
    pub path: PathBuf,
    /// Language of the source file.
    language: Arc<dyn Language>,
}

impl SourceFile {
    /// Make a new `SourceFile` from the provided file. Will return `None` if the language is
    /// unknown.
    ///
    /// The language of the source file will be detected using the
    /// [`LanguageManager`](struct.LanguageManager.html), only those languages are supported.
    pub fn new<P: Into<PathBuf>>(path: P) -> Option<SourceFile> {
        let path = path.into();
        let language = LanguageManager::detect_language(&path)?;
        Some(SourceFile { path, language })
    }

    /// Make a new `SourceFile` in the provided language.
    pub fn with_language<P: Into<PathBuf>>(path: P, language: Arc<dyn Language>) -> SourceFile {
        SourceFile {
            path: path.into(),
            language,
        }
    }

    /// The language of this source file.
    pub fn language(&self) -> &dyn Language {
        self.language.as_ref()
    }

    /// The file name of this source file.
    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| self.path.to_string_lossy().to_string())
    }

    /// The directory where the program runs.
    pub fn base_dir(&self) -> PathBuf {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }

    /// Compile (if needed) and run the program feeding it `input`, returning its standard output
    /// with the surrounding whitespaces removed.
    ///
    /// A program that exits successfully without writing anything produces `Ok("")`. Failing
    /// compilations, failing programs and programs exceeding the time limits are reported as
    /// different `ExecutionError`s.
    pub fn execute(&self, input: &str, options: &ExecutionOptions) -> Result<String, ExecutionError> {
        let dir = self.base_dir();
        // the commands run inside `dir`, relative paths would be resolved twice
        let dir = dir.canonicalize().map_err(|source| ExecutionError::Io {
            path: dir.clone(),
            source,
        })?;
        let source = PathBuf::from(self.name());

        let input_path = dir.join(TEMP_INPUT_NAME);
        std::fs::write(&input_path, input).map_err(|source| ExecutionError::Io {
            path: input_path.clone(),
            source,
        })?;
        let _input = guard(input_path, |path| remove_transient(&path));
        let _artifacts = guard((), |_| {
            for artifact in self.language.compiled_artifacts(&source, &dir) {
                remove_transient(&artifact);
            }
        });

        if let Some(compilation) = self.language.compilation(&source) {
            info!("Compiling {}", self.path.display());
            let output = run_process(compilation.to_command(&dir), None, options.build_time_limit)
                .map_err(|e| ExecutionError::from_process(ExecutionPhase::Compilation, e))?;
            if !output.status.success() {
                return Err(ExecutionError::Build {
                    file: self.path.clone(),
                    status: output.status,
                    stderr: String::from_utf8_lossy(&output.stderr).to_string(),
                });
            }
        }

        let runtime = self.language.runtime(&source);
        debug!(
            "Running {} ({}) with {:?}",
            self.path.display(),
            self.language.kind(),
            runtime
        );
        let output = run_process(
            runtime.to_command(&dir),
            Some(dir.join(TEMP_INPUT_NAME).as_path()),
            options.time_limit,
        )
        .map_err(|e| ExecutionError::from_process(ExecutionPhase::Execution, e))?;
        if !output.status.success() {
            return Err(ExecutionError::Runtime {
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

/// Remove a file created for a single execution, ignoring the ones that were never created.
fn remove_transient(path: &Path) {
    match std::fs::remove_file(path) {
        Ok(()) => trace!("Removed {}", path.display()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => warn!("Failed to remove {}: {:?}", path.display(), e),
    }
}

#[cfg(test)]
mod tests {
    use speculoos::prelude::*;

    use super::*;

    #[test]
    fn test_new_detects_language() {
        let source = SourceFile::new("dir/solution.cpp").unwrap();
        assert_that!(source.language().name()).is_equal_to("C++");
        assert_that!(source.name()).is_equal_to("solution.cpp".to_string());
        assert_that!(source.base_dir()).is_equal_to(PathBuf::from("dir"));
    }

    #[test]
    fn test_new_unknown_language() {
        assert_that!(SourceFile::new("solution.blah").is_none()).is_true();
    }

    #[test]
    fn test_base_dir_of_bare_name() {
        let source = SourceFile::new("solution.py").unwrap();
        assert_that!(source.base_dir()).is_equal_to(PathBuf::from("."));
    }

    #[test]
    fn test_timeout_is_distinct() {
        let err = ExecutionError::from_process(
            ExecutionPhase::Execution,
            ProcessError::Timeout {
                program: "sol".into(),
                limit: Duration::from_secs(1),
            },
        );
        assert!(matches!(
            err,
            ExecutionError::Timeout {
                phase: ExecutionPhase::Execution,
                ..
            }
        ));
        assert_that!(err.to_string())
            .is_equal_to("the execution did not terminate within 1s".to_string());
    }
}
