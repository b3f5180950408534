use std::path::{Path, PathBuf};

use crate::languages::source_name;
use crate::{ExecutionCommand, Invocation, Language, LanguageKind, ToolProbe};

/// Configuration of a language compiled to bytecode for a virtual machine.
#[derive(Clone, Debug)]
pub struct BytecodeConfiguration {
    /// Name of the language.
    pub name: &'static str,
    /// Extension of the source files.
    pub extension: &'static str,
    /// The file name of a solution in this language.
    pub solution_file_name: &'static str,
    /// The name of what has to be installed, as shown to the user.
    pub toolchain_name: &'static str,
    /// The bytecode compiler (e.g. `javac`).
    pub compiler: PathBuf,
    /// The virtual machine (e.g. `java`).
    pub runtime: PathBuf,
    /// Extension of the compiled files.
    pub bytecode_extension: &'static str,
    /// At least one of these must appear in the version of the virtual machine.
    pub version_markers: Vec<&'static str>,
}

impl BytecodeConfiguration {
    /// The configuration of Java. The main class must have the same name as the source file.
    pub fn java() -> BytecodeConfiguration {
        BytecodeConfiguration {
            name: "Java",
            extension: "java",
            solution_file_name: "Solution.java",
            toolchain_name: "Java JDK",
            compiler: "javac".into(),
            runtime: "java".into(),
            bytecode_extension: "class",
            version_markers: vec!["java version", "openjdk version"],
        }
    }
}

/// A language compiled to bytecode, that is then run by a virtual machine.
#[derive(Debug)]
pub struct LanguageBytecode {
    /// The configuration of this language.
    pub config: BytecodeConfiguration,
}

impl LanguageBytecode {
    /// Make a new bytecode compiled language with the provided configuration.
    pub fn new(config: BytecodeConfiguration) -> LanguageBytecode {
        LanguageBytecode { config }
    }

    /// The name of the main class, taken from the name of the source file.
    fn class_name(source: &Path) -> String {
        source
            .file_stem()
            .map(|stem| stem.to_string_lossy().to_string())
            .unwrap_or_default()
    }
}

impl Language for LanguageBytecode {
    fn name(&self) -> &'static str {
        self.config.name
    }

    fn extensions(&self) -> Vec<&'static str> {
        vec![self.config.extension]
    }

    fn kind(&self) -> LanguageKind {
        LanguageKind::CompiledBytecode
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
        let mut runtime = ToolProbe::new(self.config.name, [self.config.runtime.clone()], ["-version"])
            .missing_message(format!("{} Runtime not found", self.config.name));
        for marker in &self.config.version_markers {
            runtime = runtime.marker(*marker);
        }
        vec![
            runtime,
            ToolProbe::new(
                format!("{} compiler", self.config.name),
                [self.config.compiler.clone()],
                ["-version"],
            ),
        ]
    }

    fn compilation(&self, source: &Path) -> Option<Invocation> {
        Some(
            Invocation::new(ExecutionCommand::System(self.config.compiler.clone()))
                .arg(source_name(source)),
        )
    }

    fn compiled_artifacts(&self, source: &Path, dir: &Path) -> Vec<PathBuf> {
        let class_name = Self::class_name(source);
        let ext = self.config.bytecode_extension;
        let mut artifacts = vec![dir.join(format!("{}.{}", class_name, ext))];
        // nested and anonymous classes are compiled to Main$Inner.class
        let pattern = format!(
            "{}/{}$*.{}",
            glob::Pattern::escape(&dir.to_string_lossy()),
            glob::Pattern::escape(&class_name),
            ext
        );
        match glob::glob(&pattern) {
            Ok(paths) => artifacts.extend(paths.flatten()),
            Err(e) => warn!("Invalid pattern {}: {:?}", pattern, e),
        }
        artifacts
    }

    fn runtime(&self, source: &Path) -> Invocation {
        Invocation::new(ExecutionCommand::System(self.config.runtime.clone()))
            .arg("-cp")
            .arg(".")
            .arg(Self::class_name(source))
    }
}
