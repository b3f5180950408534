//! Validation of the stored test cases running the solution again on their inputs.

use std::path::{Path, PathBuf};

use anyhow::{Context, Error};
use testcase_maker_lang::SourceFile;

use crate::solution::{select_solution, Selection};
use crate::testcase::{discover_inputs, display_name, output_for_input};
use crate::ui::{WriteColor, GREEN};
use crate::Session;

/// The result of validating a single test case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaseStatus {
    /// The solution produced the stored output.
    Passed,
    /// The output file of the test case does not exist, the solution has not been run.
    MissingOutput,
    /// The solution produced a different output.
    Mismatch {
        /// The stored output, trimmed.
        expected: String,
        /// The output of the solution, trimmed.
        actual: String,
    },
    /// The test case could not be checked (e.g. the solution crashed).
    Error(String),
}

impl CaseStatus {
    /// Whether the test case passed.
    pub fn is_passed(&self) -> bool {
        matches!(self, CaseStatus::Passed)
    }
}

/// A validated test case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseResult {
    /// The input file of the test case.
    pub input: PathBuf,
    /// How it went.
    pub status: CaseStatus,
}

/// What happened validating the test cases.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationReport {
    /// The test cases in the order they have been validated.
    pub cases: Vec<CaseResult>,
}

impl ValidationReport {
    /// Number of validated test cases.
    pub fn total(&self) -> usize {
        self.cases.len()
    }

    /// Number of passed test cases.
    pub fn passed(&self) -> usize {
        self.cases.iter().filter(|case| case.status.is_passed()).count()
    }

    /// Number of test cases that did not pass, for any reason.
    pub fn failed(&self) -> usize {
        self.total() - self.passed()
    }

    /// Whether every test case passed.
    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }
}

/// The result of [`validate_testcases`](fn.validate_testcases.html).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    /// There is no usable solution.
    NoSolution,
    /// There are no input files in the working directory.
    NoTestcases,
    /// All the test cases have been checked.
    Completed(ValidationReport),
}

impl ValidationOutcome {
    /// Whether the validation succeeded, i.e. all the test cases passed.
    pub fn is_success(&self) -> bool {
        match self {
            ValidationOutcome::Completed(report) => report.is_success(),
            _ => false,
        }
    }
}

/// Check that the solution still produces the stored outputs of all the test cases in the
/// working directory of the session. The test case files are never modified.
pub fn validate_testcases<W: WriteColor>(
    session: &mut Session<W>,
) -> Result<ValidationOutcome, Error> {
    session.printer.header("Test Case Validation");
    let source = match select_solution(session)? {
        Selection::Selected(source) => source,
        Selection::NoneAvailable => {
            session
                .printer
                .error("No valid solution file available for validation");
            return Ok(ValidationOutcome::NoSolution);
        }
    };

    let inputs = discover_inputs(&session.dir)?;
    if inputs.is_empty() {
        session.printer.error("No test cases found to validate!");
        return Ok(ValidationOutcome::NoTestcases);
    }

    session.printer.header("Test Case Validation Started");
    let mut report = ValidationReport::default();
    for input in inputs {
        let name = display_name(&input);
        let output = output_for_input(&input);
        let status = if !output.exists() {
            session
                .printer
                .error(format!("Missing output file for {}", name));
            CaseStatus::MissingOutput
        } else {
            match check_testcase(session, &source, &input, &output) {
                Ok(CaseStatus::Passed) => {
                    session
                        .printer
                        .success(format!("Test case passed: {}", name));
                    CaseStatus::Passed
                }
                Ok(CaseStatus::Mismatch { expected, actual }) => {
                    session
                        .printer
                        .error(format!("Test case failed: {}", name));
                    session.printer.info("Expected output:");
                    session.printer.line(&expected);
                    session.printer.info("Actual output:");
                    session.printer.line(&actual);
                    CaseStatus::Mismatch { expected, actual }
                }
                Ok(status) => status,
                Err(e) => {
                    warn!("Validation of {} failed: {:?}", name, e);
                    session
                        .printer
                        .error(format!("Error validating {}: {:#}", name, e));
                    session.printer.execution_stderr(&e);
                    CaseStatus::Error(format!("{:#}", e))
                }
            }
        };
        report.cases.push(CaseResult { input, status });
    }

    session.printer.header("Test Results Summary");
    session
        .printer
        .info(format!("Total test cases: {}", report.total()));
    session.printer.info(format!("Passed: {}", report.passed()));
    session.printer.info(format!("Failed: {}", report.failed()));
    if report.is_success() {
        session
            .printer
            .colored(&GREEN, "\nAll test cases passed successfully!");
    } else {
        session
            .printer
            .error("Some test cases failed. Please check the output above.");
    }
    Ok(ValidationOutcome::Completed(report))
}

/// Run the solution on the input of a test case and compare the result with the stored output.
fn check_testcase<W: WriteColor>(
    session: &Session<W>,
    source: &SourceFile,
    input: &Path,
    output: &Path,
) -> Result<CaseStatus, Error> {
    let input_data = std::fs::read_to_string(input)
        .with_context(|| format!("Failed to read {}", input.display()))?;
    let expected = std::fs::read_to_string(output)
        .with_context(|| format!("Failed to read {}", output.display()))?;
    let expected = expected.trim();
    let actual = source.execute(&input_data, &session.execution)?;
    if actual == expected {
        Ok(CaseStatus::Passed)
    } else {
        Ok(CaseStatus::Mismatch {
            expected: expected.to_string(),
            actual,
        })
    }
}
