//! Crate for managing programming languages and running solution source files.
//!
//! The [`Language`](trait.Language.html) trait exposes the interface for defining new programming
//! languages. There are three kinds of runners: interpreted, compiled to a native executable and
//! compiled to bytecode. The list of supported programming languages can be found in the source of
//! this crate.
//!
//! The entry point of this crate is [`LanguageManager`](struct.LanguageManager.html), a struct that
//! is able to detect the language of a source file based on its extension, and that knows the
//! conventional solution file name of every language.
//!
//! To actually use the language you can use [`SourceFile`](struct.SourceFile.html), it exposes the
//! functionalities for compiling and running a source file against an input text.
//!
//! # Example
//!
//! ```
//! use testcase_maker_lang::LanguageManager;
//!
//! let lang = LanguageManager::detect_language("solution.cpp").expect("unknown lang");
//! assert!(lang.name().contains("C++"))
//! ```

#![deny(missing_docs)]

#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;

mod language;
mod languages;
mod probe;
mod process;
mod source_file;

pub use language::{ExecutionCommand, Invocation, Language, LanguageKind};
pub use languages::bytecode::{BytecodeConfiguration, LanguageBytecode};
pub use languages::interpreted::{InterpretedConfiguration, LanguageInterpreted};
pub use languages::native::{LanguageNative, NativeConfiguration};
pub use probe::{probe_language, ProbeResult, ToolProbe};
pub use process::{run_process, ProcessError, ProcessOutput};
pub use source_file::{ExecutionError, ExecutionOptions, ExecutionPhase, SourceFile, TEMP_INPUT_NAME};

use std::path::Path;
use std::sync::Arc;

/// Manager of all the known languages, you should use this to get
/// [`Language`](trait.Language.html) instances.
pub struct LanguageManager {
    /// The list of all the known languages.
    known_languages: Vec<Arc<dyn Language>>,
}

impl LanguageManager {
    /// Make a new `LanguageManager` with all the known languages.
    fn new() -> LanguageManager {
        LanguageManager {
            // ordered as the solutions are looked up in the working directory
            known_languages: vec![
                Arc::new(LanguageInterpreted::new(InterpretedConfiguration::python())),
                Arc::new(LanguageBytecode::new(BytecodeConfiguration::java())),
                Arc::new(LanguageNative::new(NativeConfiguration::c())),
                Arc::new(LanguageNative::new(NativeConfiguration::cpp())),
            ],
        }
    }

    /// The list of the known languages, in the order the solutions should be looked up.
    pub fn known_languages() -> Vec<Arc<dyn Language>> {
        LANGUAGE_MANAGER_SINGL.known_languages.clone()
    }

    /// Given a path to a file guess the language that the source file probably is.
    ///
    /// ```
    /// use testcase_maker_lang::LanguageManager;
    ///
    /// let c = LanguageManager::detect_language("solution.c").unwrap();
    /// assert_eq!(c.name(), "C");
    /// let java = LanguageManager::detect_language("Solution.java").unwrap();
    /// assert_eq!(java.name(), "Java");
    /// let unknown = LanguageManager::detect_language("solution.foobar");
    /// assert!(unknown.is_none());
    /// ```
    pub fn detect_language<P: AsRef<Path>>(path: P) -> Option<Arc<dyn Language>> {
        let ext = path
            .as_ref()
            .extension()
            .map(|s| s.to_string_lossy())
            .unwrap_or_else(|| "".into())
            .to_lowercase();
        LANGUAGE_MANAGER_SINGL
            .known_languages
            .iter()
            .find(|lang| lang.extensions().iter().any(|lang_ext| ext == *lang_ext))
            .cloned()
    }

    /// Search between the known languages the one with the specified name and return it if found.
    pub fn from_name<S: AsRef<str>>(name: S) -> Option<Arc<dyn Language>> {
        LANGUAGE_MANAGER_SINGL
            .known_languages
            .iter()
            .find(|lang| lang.name() == name.as_ref())
            .cloned()
    }
}

lazy_static! {
    /// The singleton instance of the `LanguageManager`.
    static ref LANGUAGE_MANAGER_SINGL: LanguageManager = LanguageManager::new();
}
