use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::ToolProbe;

/// How a language turns a source file into something that runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LanguageKind {
    /// The source file is passed directly to an interpreter.
    Interpreted,
    /// The source file is compiled to a native executable, which is then run.
    CompiledNative,
    /// The source file is compiled to bytecode, which is then run by a virtual machine.
    CompiledBytecode,
}

impl Display for LanguageKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            LanguageKind::Interpreted => write!(f, "interpreted"),
            LanguageKind::CompiledNative => write!(f, "compiled to native code"),
            LanguageKind::CompiledBytecode => write!(f, "compiled to bytecode"),
        }
    }
}

/// The program to start for an invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionCommand {
    /// A program that is looked up in `$PATH`.
    System(PathBuf),
    /// A program that lives inside the working directory.
    Local(PathBuf),
}

impl ExecutionCommand {
    /// Make a command that refers to a program in `$PATH`.
    pub fn system<P: Into<PathBuf>>(path: P) -> ExecutionCommand {
        ExecutionCommand::System(path.into())
    }

    /// Make a command that refers to a program inside the working directory.
    pub fn local<P: Into<PathBuf>>(path: P) -> ExecutionCommand {
        ExecutionCommand::Local(path.into())
    }

    /// The path of the program to spawn. System programs that cannot be found in `$PATH` are left
    /// untouched, spawning them will fail with a meaningful error.
    pub fn resolve(&self, dir: &Path) -> PathBuf {
        match self {
            ExecutionCommand::System(program) => {
                which::which(program).unwrap_or_else(|_| program.clone())
            }
            ExecutionCommand::Local(program) => dir.join(program),
        }
    }
}

/// A command line: the program to start and its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// The program to start.
    pub command: ExecutionCommand,
    /// The arguments to pass to the program.
    pub args: Vec<String>,
}

impl Invocation {
    /// Make a new invocation without arguments.
    pub fn new(command: ExecutionCommand) -> Invocation {
        Invocation {
            command,
            args: vec![],
        }
    }

    /// Add a new argument to the list.
    pub fn arg<S: Into<String>>(mut self, arg: S) -> Invocation {
        self.args.push(arg.into());
        self
    }

    /// Build the `Command` that starts this invocation inside `dir`.
    pub fn to_command(&self, dir: &Path) -> Command {
        let mut command = Command::new(self.command.resolve(dir));
        command.args(&self.args).current_dir(dir);
        command
    }
}

/// Trait that defines the properties of the supported languages.
///
/// A language can be either compiled or not-compiled. When `compilation` returns `Some` the
/// compilation step is run before every execution, and all the files listed by
/// `compiled_artifacts` are removed after it.
///
/// All the paths passed to the methods are relative to the working directory, where the commands
/// are run.
pub trait Language: std::fmt::Debug + Send + Sync {
    /// Full name of the language. This must be unique between all the other languages.
    fn name(&self) -> &'static str;

    /// List of valid extensions for this language. A file is considered in this language if its
    /// extension is inside this list.
    fn extensions(&self) -> Vec<&'static str>;

    /// The kind of runner this language uses.
    fn kind(&self) -> LanguageKind;

    /// The file name a solution in this language is expected to have.
    fn solution_file_name(&self) -> &'static str;

    /// A line that explains what has to be installed for using this language.
    fn requirement(&self) -> String;

    /// The tools that must be available in the system for using this language.
    fn toolchain(&self) -> Vec<ToolProbe>;

    /// The command that compiles the source file, if the language needs a compilation step.
    fn compilation(&self, _source: &Path) -> Option<Invocation> {
        None
    }

    /// The files produced by the compilation of the source file that should be removed after the
    /// execution. This is called after the compilation ended (even if unsuccessfully).
    fn compiled_artifacts(&self, _source: &Path, _dir: &Path) -> Vec<PathBuf> {
        vec![]
    }

    /// The command that runs the program.
    fn runtime(&self, source: &Path) -> Invocation;
}

#[cfg(test)]
mod tests {
    use speculoos::prelude::*;

    use super::*;

    #[test]
    fn test_local_command_resolve() {
        let command = ExecutionCommand::local("solution");
        assert_that!(command.resolve(Path::new("/tmp/work")))
            .is_equal_to(PathBuf::from("/tmp/work/solution"));
    }

    #[test]
    fn test_system_command_not_found_is_untouched() {
        let command = ExecutionCommand::system("surely-not-an-installed-program");
        assert_that!(command.resolve(Path::new("/tmp")))
            .is_equal_to(PathBuf::from("surely-not-an-installed-program"));
    }

    #[test]
    fn test_invocation_args() {
        let invocation = Invocation::new(ExecutionCommand::system("gcc"))
            .arg("-o")
            .arg("solution");
        assert_that!(invocation.args).is_equal_to(vec!["-o".to_string(), "solution".to_string()]);
    }
}
