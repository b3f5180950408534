use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgAction, Parser, ValueEnum, ValueHint};
use termcolor::ColorChoice;

use testcase_maker_format::{GeneratorConfig, SelectionMode};
use testcase_maker_lang::ExecutionOptions;

#[derive(Parser, Debug, Clone)]
#[clap(
    name = "testcase-maker",
    about = "Generate and validate the test cases of a solution"
)]
pub struct Opt {
    /// Action to perform
    #[clap(value_enum)]
    pub action: Action,

    /// Maximum number of test cases per file
    #[clap(
        long = "max-cases",
        default_value = "100",
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub max_cases: u32,

    /// Number of test files to generate
    #[clap(
        long = "num-files",
        default_value = "10",
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub num_files: u32,

    /// Directory with the solutions and the test cases
    #[clap(short = 'd', long = "dir", default_value = ".", value_hint = ValueHint::DirPath)]
    pub dir: PathBuf,

    /// Use this solution instead of asking which one to use
    ///
    /// A relative path is relative to the directory of the test cases.
    #[clap(short = 's', long = "solution", value_hint = ValueHint::FilePath)]
    pub solution: Option<PathBuf>,

    /// Seed of the random inputs, for generating the same test cases again
    #[clap(long)]
    pub seed: Option<u64>,

    /// Time limit of each execution of the solution, in seconds. 0 means no limit.
    #[clap(long, default_value = "10")]
    pub timeout: u64,

    /// Time limit of the compilation of the solution, in seconds. 0 means no limit.
    #[clap(long = "build-timeout", default_value = "60")]
    pub build_timeout: u64,

    /// When to use the colors
    #[clap(long, value_enum, default_value = "auto")]
    pub color: ColorOpt,

    #[clap(flatten)]
    pub logger: LoggerOpt,
}

/// What to do with the test cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Action {
    /// Generate new test cases
    Generate,
    /// Check the existing test cases
    Validate,
    /// Generate new test cases and then check them
    Both,
}

impl Action {
    /// Whether the test cases are generated.
    pub fn generates(&self) -> bool {
        matches!(self, Action::Generate | Action::Both)
    }

    /// Whether the test cases are validated.
    pub fn validates(&self) -> bool {
        matches!(self, Action::Validate | Action::Both)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorOpt {
    /// Use the colors only if the terminal supports them
    Auto,
    /// Always use the colors
    Always,
    /// Never use the colors
    Never,
}

#[derive(Parser, Debug, Clone)]
pub struct LoggerOpt {
    /// Verbose mode (-v, -vv, -vvv, etc.)
    #[clap(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Opt {
    /// Make a `GeneratorConfig` from this command line options.
    pub fn generator_config(&self) -> GeneratorConfig {
        GeneratorConfig {
            max_cases: self.max_cases,
            num_files: self.num_files,
            seed: self.seed,
        }
    }

    /// Make the `ExecutionOptions` from this command line options.
    pub fn execution_options(&self) -> ExecutionOptions {
        ExecutionOptions {
            time_limit: seconds(self.timeout),
            build_time_limit: seconds(self.build_timeout),
        }
    }

    /// How the solution should be chosen.
    pub fn selection_mode(&self) -> SelectionMode {
        match &self.solution {
            Some(path) => SelectionMode::Path(path.clone()),
            None => SelectionMode::Interactive,
        }
    }

    /// Whether the output on stdout should be colored.
    pub fn color_choice(&self) -> ColorChoice {
        match self.color {
            ColorOpt::Always => ColorChoice::Always,
            ColorOpt::Never => ColorChoice::Never,
            ColorOpt::Auto => {
                if supports_color::on(supports_color::Stream::Stdout).is_some() {
                    ColorChoice::Auto
                } else {
                    ColorChoice::Never
                }
            }
        }
    }
}

fn seconds(secs: u64) -> Option<Duration> {
    if secs == 0 {
        None
    } else {
        Some(Duration::from_secs(secs))
    }
}

impl LoggerOpt {
    pub fn enable_log(&self) {
        let mut builder = env_logger::Builder::from_default_env();
        if self.verbose > 0 {
            std::env::set_var("RUST_BACKTRACE", "1");
            match self.verbose {
                0 => unreachable!(),
                1 => builder.filter_level(log::LevelFilter::Info),
                2 => builder.filter_level(log::LevelFilter::Debug),
                _ => builder.filter_level(log::LevelFilter::Trace),
            };
        }
        builder.format_timestamp_nanos().init();
        better_panic::install();
    }
}
