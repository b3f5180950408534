use std::path::{Path, PathBuf};

use crate::languages::source_name;
use crate::{ExecutionCommand, Invocation, Language, LanguageKind, ToolProbe};

/// Configuration of an interpreted language.
#[derive(Clone, Debug)]
pub struct InterpretedConfiguration {
    /// Name of the language.
    pub name: &'static str,
    /// Extension of the source files.
    pub extension: &'static str,
    /// The file name of a solution in this language.
    pub solution_file_name: &'static str,
    /// The name of what has to be installed, as shown to the user.
    pub toolchain_name: &'static str,
    /// The interpreters to look for in `$PATH`, the first one found is used.
    pub interpreters: Vec<PathBuf>,
    /// The arguments that make the interpreter print its version.
    pub version_args: Vec<String>,
}

impl InterpretedConfiguration {
    /// The configuration of Python. Both `python3` and `python` are accepted.
    pub fn python() -> InterpretedConfiguration {
        InterpretedConfiguration {
            name: "Python",
            extension: "py",
            solution_file_name: "solution.py",
            toolchain_name: "Python",
            interpreters: vec!["python3".into(), "python".into()],
            version_args: vec!["--version".into()],
        }
    }
}

/// A language whose source files are run directly by an interpreter.
#[derive(Debug)]
pub struct LanguageInterpreted {
    /// The configuration of this language.
    pub config: InterpretedConfiguration,
}

impl LanguageInterpreted {
    /// Make a new interpreted language with the provided configuration.
    pub fn new(config: InterpretedConfiguration) -> LanguageInterpreted {
        LanguageInterpreted { config }
    }

    /// The interpreter to use: the first found in `$PATH`, or the preferred one if none is found.
    fn interpreter(&self) -> PathBuf {
        self.config
            .interpreters
            .iter()
            .find(|interpreter| which::which(interpreter).is_ok())
            .or_else(|| self.config.interpreters.first())
            .cloned()
            .unwrap_or_else(|| PathBuf::from(self.config.name.to_lowercase()))
    }
}

impl Language for LanguageInterpreted {
    fn name(&self) -> &'static str {
        self.config.name
    }

    fn extensions(&self) -> Vec<&'static str> {
        vec![self.config.extension]
    }

    fn kind(&self) -> LanguageKind {
        LanguageKind::Interpreted
    }

    fn solution_file_name(&self) -> &'static str {
        self.config.solution_file_name
    }

    fn requirement(&self) -> String {
        format!(
            "{}: Required for .{} files",
            self.config.toolchain_name, self.config.extension
        )
    }

    fn toolchain(&self) -> Vec<ToolProbe> {
        vec![ToolProbe::new(
            self.config.toolchain_name,
            self.config.interpreters.clone(),
            self.config.version_args.clone(),
        )
        .missing_message(format!("{} interpreter not found", self.config.toolchain_name))]
    }

    fn runtime(&self, source: &Path) -> Invocation {
        Invocation::new(ExecutionCommand::system(self.interpreter())).arg(source_name(source))
    }
}
