use std::path::PathBuf;
use std::process::Command;
use std::time::Duration;

use anyhow::Error;
use regex::Regex;

use crate::{run_process, Language};

/// Version checks are expected to be fast, a tool that hangs is considered missing.
const PROBE_TIMEOUT: Duration = Duration::from_secs(10);

/// Pieces of output that mean that the tool is not really there (e.g. a shell wrapper that prints
/// `command not found`).
const MISSING_MARKERS: &[&str] = &["not found", "not recognized"];

/// The outcome of checking whether a language can be used in this system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeResult {
    /// Whether all the tools of the language are usable.
    pub available: bool,
    /// A human readable description of what was found, or why the language is not usable.
    pub message: String,
}

impl ProbeResult {
    fn available<S: Into<String>>(message: S) -> ProbeResult {
        ProbeResult {
            available: true,
            message: message.into(),
        }
    }

    fn unavailable<S: Into<String>>(message: S) -> ProbeResult {
        ProbeResult {
            available: false,
            message: message.into(),
        }
    }
}

/// A version-check command of a tool needed by a language, e.g. `gcc --version`.
#[derive(Debug, Clone)]
pub struct ToolProbe {
    /// The name of the tool to show to the user.
    pub display_name: String,
    /// The programs to look for in `$PATH`, the first one found is used.
    pub programs: Vec<PathBuf>,
    /// The arguments that make the program print its version.
    pub args: Vec<String>,
    /// If not empty, at least one of these (lowercase) strings must appear in the output.
    pub markers: Vec<String>,
    /// The message to report when the tool is not usable.
    pub missing_message: String,
}

impl ToolProbe {
    /// Make a new probe that runs the first of `programs` found in `$PATH` with `args`.
    pub fn new<S, P, A>(display_name: S, programs: P, args: A) -> ToolProbe
    where
        S: Into<String>,
        P: IntoIterator,
        P::Item: Into<PathBuf>,
        A: IntoIterator,
        A::Item: Into<String>,
    {
        let display_name = display_name.into();
        ToolProbe {
            missing_message: format!("{} not found", display_name),
            display_name,
            programs: programs.into_iter().map(Into::into).collect(),
            args: args.into_iter().map(Into::into).collect(),
            markers: vec![],
        }
    }

    /// Require `marker` (case insensitive) in the output, unless another marker is found.
    pub fn marker<S: Into<String>>(mut self, marker: S) -> ToolProbe {
        self.markers.push(marker.into().to_lowercase());
        self
    }

    /// Change the message reported when the tool is not usable.
    pub fn missing_message<S: Into<String>>(mut self, message: S) -> ToolProbe {
        self.missing_message = message.into();
        self
    }

    /// The first of the programs that can be found in `$PATH`.
    pub fn resolve(&self) -> Option<PathBuf> {
        self.programs
            .iter()
            .find_map(|program| which::which(program).ok())
    }

    /// Run the version check. This never fails: any error is reported as an unavailable tool.
    pub fn probe(&self) -> ProbeResult {
        match self.try_probe() {
            Ok(result) => result,
            Err(e) => {
                debug!("Probe of {} failed: {:?}", self.display_name, e);
                ProbeResult::unavailable(format!("{:#}", e))
            }
        }
    }

    fn try_probe(&self) -> Result<ProbeResult, Error> {
        let program = match self.resolve() {
            Some(program) => program,
            None => return Ok(ProbeResult::unavailable(&self.missing_message)),
        };
        let mut command = Command::new(&program);
        command.args(&self.args);
        let output = run_process(command, None, Some(PROBE_TIMEOUT))?;

        // some tools (e.g. java) print their version to stderr
        let mut text = String::from_utf8_lossy(&output.stdout).to_string();
        text += &String::from_utf8_lossy(&output.stderr);
        let lower = text.to_lowercase();
        trace!("{} version check output: {:?}", program.display(), text);

        let missing = MISSING_MARKERS.iter().any(|m| lower.contains(m));
        let marked = self.markers.is_empty() || self.markers.iter().any(|m| lower.contains(m));
        if !output.status.success() || lower.trim().is_empty() || missing || !marked {
            return Ok(ProbeResult::unavailable(&self.missing_message));
        }
        Ok(match extract_version(&text) {
            Some(version) => ProbeResult::available(format!("{} {} found", self.display_name, version)),
            None => ProbeResult::available(format!("{} found", self.display_name)),
        })
    }
}

/// Check whether all the tools needed by `language` are usable.
pub fn probe_language(language: &dyn Language) -> ProbeResult {
    let mut found = vec![];
    for tool in language.toolchain() {
        let result = tool.probe();
        if !result.available {
            return result;
        }
        found.push(result.message);
    }
    ProbeResult::available(found.join(", "))
}

/// Find the first version number (e.g. `11.4.0`) inside the output of a version check.
fn extract_version(text: &str) -> Option<&str> {
    lazy_static! {
        static ref VERSION: Regex = Regex::new(r"\d+(?:\.\d+)+").expect("Invalid regex");
    }
    VERSION.find(text).map(|m| m.as_str())
}
