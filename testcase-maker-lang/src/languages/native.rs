use std::path::{Path, PathBuf};

use crate::languages::source_name;
use crate::{ExecutionCommand, Invocation, Language, LanguageKind, ToolProbe};

/// Configuration of a language compiled to a native executable.
#[derive(Clone, Debug)]
pub struct NativeConfiguration {
    /// Name of the language.
    pub name: &'static str,
    /// Extension of the source files.
    pub extension: &'static str,
    /// The file name of a solution in this language.
    pub solution_file_name: &'static str,
    /// The name of the compiler, as shown to the user.
    pub toolchain_name: &'static str,
    /// Compiler to use (e.g. `gcc`).
    pub compiler: PathBuf,
    /// Flags to pass to the compiler before the source file.
    pub flags: Vec<String>,
    /// Flags to pass to the compiler after the source file (e.g. `-lm`).
    pub libs: Vec<String>,
    /// Name of the produced executable, inside the working directory.
    pub executable_name: String,
}

impl NativeConfiguration {
    /// The configuration of C, compiled with `gcc`.
    pub fn c() -> NativeConfiguration {
        NativeConfiguration {
            name: "C",
            extension: "c",
            solution_file_name: "solution.c",
            toolchain_name: "GCC",
            compiler: "gcc".into(),
            flags: vec!["-O2".into()],
            libs: vec!["-lm".into()],
            executable_name: default_executable_name(),
        }
    }

    /// The configuration of C++, compiled with `g++`.
    pub fn cpp() -> NativeConfiguration {
        NativeConfiguration {
            name: "C++",
            extension: "cpp",
            solution_file_name: "solution.cpp",
            toolchain_name: "G++",
            compiler: "g++".into(),
            flags: vec!["-O2".into()],
            libs: vec![],
            executable_name: default_executable_name(),
        }
    }
}

/// Both C and C++ solutions are compiled to the same executable name.
fn default_executable_name() -> String {
    format!("solution{}", std::env::consts::EXE_SUFFIX)
}

/// A language compiled to a native executable before running.
#[derive(Debug)]
pub struct LanguageNative {
    /// The configuration of this language.
    pub config: NativeConfiguration,
}

impl LanguageNative {
    /// Make a new natively compiled language with the provided configuration.
    pub fn new(config: NativeConfiguration) -> LanguageNative {
        LanguageNative { config }
    }
}

impl Language for LanguageNative {
    fn name(&self) -> &'static str {
        self.config.name
    }

    fn extensions(&self) -> Vec<&'static str> {
        vec![self.config.extension]
    }

    fn kind(&self) -> LanguageKind {
        LanguageKind::CompiledNative
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
            [self.config.compiler.clone()],
            ["--version"],
        )
        .missing_message(format!("{} compiler not found", self.config.toolchain_name))]
    }

    fn compilation(&self, source: &Path) -> Option<Invocation> {
        let mut args = self.config.flags.clone();
        args.push("-o".into());
        args.push(self.config.executable_name.clone());
        args.push(source_name(source));
        args.extend(self.config.libs.iter().cloned());
        Some(Invocation {
            command: ExecutionCommand::System(self.config.compiler.clone()),
            args,
        })
    }

    fn compiled_artifacts(&self, _source: &Path, dir: &Path) -> Vec<PathBuf> {
        vec![dir.join(&self.config.executable_name)]
    }

    fn runtime(&self, _source: &Path) -> Invocation {
        Invocation::new(ExecutionCommand::local(&self.config.executable_name))
    }
}
