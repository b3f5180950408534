//! Generation and validation of the test cases of a solution.
//!
//! A [`Session`](struct.Session.html) describes where the test cases live, which languages can be
//! used, how the solution is chosen and where the messages for the user are printed. The
//! [`generator`](generator/index.html) creates new `inNN.txt`/`outNN.txt` pairs running the
//! solution on random inputs, the [`validator`](validator/index.html) runs the solution again on
//! the stored inputs and checks that the outputs did not change.

#![deny(missing_docs)]

#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;

use std::io::{BufRead, BufReader};
use std::path::PathBuf;
use std::sync::Arc;

use testcase_maker_lang::{ExecutionOptions, Language, LanguageManager};

use crate::ui::{Printer, WriteColor};

pub use generator::{generate_testcases, GenerationOutcome, GenerationReport, GeneratorConfig};
pub use solution::{select_solution, Selection, SelectionMode};
pub use validator::{validate_testcases, CaseResult, CaseStatus, ValidationOutcome, ValidationReport};

pub mod generator;
mod input_gen;
pub mod solution;
pub mod testcase;
pub mod ui;
pub mod validator;

pub use input_gen::{random_input, MAX_VALUE, MIN_VALUE};

/// Everything the generator and the validator need to know about the environment they run in.
pub struct Session<W: WriteColor> {
    /// The working directory, where the solutions and the test cases are.
    pub dir: PathBuf,
    /// The languages whose solutions are looked for, in order.
    pub languages: Vec<Arc<dyn Language>>,
    /// How the solution is chosen.
    pub selection: SelectionMode,
    /// Where the interactive answers of the user are read from.
    pub input: Box<dyn BufRead>,
    /// Where the messages for the user are printed.
    pub printer: Printer<W>,
    /// The limits of the executions of the solution.
    pub execution: ExecutionOptions,
}

impl<W: WriteColor> Session<W> {
    /// Make a new session on `dir` with all the known languages, interactive selection from stdin
    /// and the default execution limits.
    pub fn new<P: Into<PathBuf>>(dir: P, printer: Printer<W>) -> Session<W> {
        Session {
            dir: dir.into(),
            languages: LanguageManager::known_languages(),
            selection: SelectionMode::Interactive,
            input: Box::new(BufReader::new(std::io::stdin())),
            printer,
            execution: ExecutionOptions::default(),
        }
    }

    /// Use only these languages.
    pub fn with_languages(mut self, languages: Vec<Arc<dyn Language>>) -> Session<W> {
        self.languages = languages;
        self
    }

    /// Choose the solution in this way.
    pub fn with_selection(mut self, selection: SelectionMode) -> Session<W> {
        self.selection = selection;
        self
    }

    /// Read the answers of the user from `input`.
    pub fn with_input<R: BufRead + 'static>(mut self, input: R) -> Session<W> {
        self.input = Box::new(input);
        self
    }

    /// Run the solution with these limits.
    pub fn with_execution_options(mut self, execution: ExecutionOptions) -> Session<W> {
        self.execution = execution;
        self
    }
}
