//! Generation of new test cases running the solution on random inputs.

use std::path::PathBuf;

use anyhow::{Context, Error};
use testcase_maker_lang::SourceFile;

use crate::input_gen::random_input;
use crate::solution::{select_solution, Selection};
use crate::testcase::{input_file_name, output_file_name};
use crate::ui::{WriteColor, GREEN};
use crate::Session;

/// The parameters of a generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// The maximum number of cases inside each input file.
    pub max_cases: u32,
    /// The number of test case files to generate.
    pub num_files: u32,
    /// The seed of the random inputs, `None` for a different set of inputs at every run.
    pub seed: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            max_cases: 100,
            num_files: 10,
            seed: None,
        }
    }
}

/// What happened generating the test case files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationReport {
    /// The solution used for producing the outputs.
    pub solution: PathBuf,
    /// The number of test case files requested.
    pub requested: u32,
    /// The number of test case files actually written.
    pub generated: u32,
    /// The index of each test case that could not be generated, with the reason.
    pub failures: Vec<(u32, String)>,
}

impl GenerationReport {
    /// Whether all the requested test cases have been generated.
    pub fn is_success(&self) -> bool {
        self.generated == self.requested
    }
}

/// The result of [`generate_testcases`](fn.generate_testcases.html).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationOutcome {
    /// There is no usable solution, nothing has been generated.
    NoSolution,
    /// The generation has been attempted for all the test cases.
    Completed(GenerationReport),
}

impl GenerationOutcome {
    /// Whether all the requested test cases have been generated.
    pub fn is_success(&self) -> bool {
        match self {
            GenerationOutcome::NoSolution => false,
            GenerationOutcome::Completed(report) => report.is_success(),
        }
    }
}

/// Generate `config.num_files` test cases in the working directory of the session.
///
/// A test case that cannot be generated does not stop the others, and none of its files is
/// written. The only errors are the ones of the selection of the solution.
pub fn generate_testcases<W: WriteColor>(
    session: &mut Session<W>,
    config: &GeneratorConfig,
) -> Result<GenerationOutcome, Error> {
    session.printer.header("Test Case Generator");
    let source = match select_solution(session)? {
        Selection::Selected(source) => source,
        Selection::NoneAvailable => return Ok(GenerationOutcome::NoSolution),
    };
    session.printer.success(format!(
        "Generating {} test files with up to {} test cases each...",
        config.num_files, config.max_cases
    ));

    let mut rng = match config.seed {
        Some(seed) => fastrand::Rng::with_seed(seed),
        None => fastrand::Rng::new(),
    };
    let mut report = GenerationReport {
        solution: source.path.clone(),
        requested: config.num_files,
        generated: 0,
        failures: vec![],
    };
    for index in 0..config.num_files {
        let input = random_input(&mut rng, config.max_cases);
        match generate_testcase(session, &source, index, &input) {
            Ok(()) => {
                session
                    .printer
                    .success(format!("Generated test case {:02}", index));
                report.generated += 1;
            }
            Err(e) => {
                warn!("Test case {} failed: {:?}", index, e);
                session
                    .printer
                    .error(format!("Failed to generate test case {:02}: {:#}", index, e));
                session.printer.execution_stderr(&e);
                report.failures.push((index, format!("{:#}", e)));
            }
        }
    }

    session.printer.header("Test Case Generation Complete");
    if report.is_success() {
        session.printer.colored(
            &GREEN,
            format!(
                "Generated all {} test case files successfully!",
                report.requested
            ),
        );
    } else {
        session.printer.warning(format!(
            "Generated {} out of {} test case files",
            report.generated, report.requested
        ));
    }
    Ok(GenerationOutcome::Completed(report))
}

/// Run the solution on `input` and write the pair of files of the test case.
fn generate_testcase<W: WriteColor>(
    session: &Session<W>,
    source: &SourceFile,
    index: u32,
    input: &str,
) -> Result<(), Error> {
    let output = source.execute(input, &session.execution)?;
    let input_path = session.dir.join(input_file_name(index));
    let output_path = session.dir.join(output_file_name(index));
    // the output goes first: an output file without its input is never validated
    std::fs::write(&output_path, &output)
        .with_context(|| format!("Failed to write {}", output_path.display()))?;
    std::fs::write(&input_path, input)
        .with_context(|| format!("Failed to write {}", input_path.display()))?;
    debug!(
        "Written {} ({} bytes) and {} ({} bytes)",
        input_path.display(),
        input.len(),
        output_path.display(),
        output.len()
    );
    Ok(())
}
