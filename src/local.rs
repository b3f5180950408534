use anyhow::{Context, Error};

use testcase_maker_format::ui::{StdoutPrinter, WriteColor};
use testcase_maker_format::{
    generate_testcases, validate_testcases, GenerationOutcome, GeneratorConfig, Session,
    ValidationOutcome,
};

use crate::opt::{Action, Opt};

/// What happened during a run of the tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// The requested action.
    pub action: Action,
    /// The result of the generation, if it has been run.
    pub generation: Option<GenerationOutcome>,
    /// The result of the validation, if it has been run.
    pub validation: Option<ValidationOutcome>,
    /// Whether the validation has been skipped because the generation failed.
    pub aborted: bool,
}

impl RunSummary {
    /// The exit code of the process.
    ///
    /// A failing generation or validation run on its own still exits with `0`, only the
    /// validation skipped after a failed generation is reported as a failure.
    pub fn exit_code(&self) -> i32 {
        if self.aborted {
            1
        } else {
            0
        }
    }
}

/// Entry point of the tool: run the action of `opt` in its working directory, printing to stdout
/// and reading the choices from stdin. Returns the exit code.
pub fn main_local(opt: Opt) -> Result<i32, Error> {
    let dir = opt
        .dir
        .canonicalize()
        .with_context(|| format!("Invalid working directory {}", opt.dir.display()))?;
    let printer = StdoutPrinter::stdout(opt.color_choice());
    let mut session = Session::new(dir, printer)
        .with_selection(opt.selection_mode())
        .with_execution_options(opt.execution_options());
    let summary = run(opt.action, &mut session, &opt.generator_config())?;
    Ok(summary.exit_code())
}

/// Run `action` in the session.
pub fn run<W: WriteColor>(
    action: Action,
    session: &mut Session<W>,
    config: &GeneratorConfig,
) -> Result<RunSummary, Error> {
    let mut summary = RunSummary {
        action,
        generation: None,
        validation: None,
        aborted: false,
    };
    info!("Running {:?} in {}", action, session.dir.display());
    session
        .printer
        .info(format!("Working directory: {}", session.dir.display()));

    if action.generates() {
        session.printer.header("Starting Test Case Generation");
        let outcome = generate_testcases(session, config)?;
        let success = outcome.is_success();
        summary.generation = Some(outcome);
        if !success && action == Action::Both {
            session
                .printer
                .error("Test case generation failed. Skipping validation.");
            summary.aborted = true;
            return Ok(summary);
        }
    }

    if action.validates() {
        session.printer.header("Starting Test Case Validation");
        summary.validation = Some(validate_testcases(session)?);
    }
    Ok(summary)
}
