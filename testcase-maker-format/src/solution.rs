//! Choice of the solution used for generating and validating the test cases.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Error};
use testcase_maker_lang::{probe_language, Language, SourceFile};

use crate::testcase::display_name;
use crate::ui::{WriteColor, BLUE};
use crate::Session;

/// How the solution is chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionMode {
    /// Look for the known solution files in the working directory and ask the user which one to
    /// use.
    Interactive,
    /// Use this file. A relative path is relative to the working directory.
    Path(PathBuf),
}

/// The result of choosing a solution.
#[derive(Debug)]
pub enum Selection {
    /// This solution can be used.
    Selected(SourceFile),
    /// There is no solution that can be used in this system.
    NoneAvailable,
}

impl Selection {
    /// The selected solution, if any.
    pub fn source(&self) -> Option<&SourceFile> {
        match self {
            Selection::Selected(source) => Some(source),
            Selection::NoneAvailable => None,
        }
    }
}

/// Choose the solution to use, according to the selection mode of the session.
///
/// The only error is the user closing the input while a choice is being asked.
pub fn select_solution<W: WriteColor>(session: &mut Session<W>) -> Result<Selection, Error> {
    let selection = match session.selection.clone() {
        SelectionMode::Interactive => select_interactive(session)?,
        SelectionMode::Path(path) => select_path(session, path),
    };
    if let Selection::Selected(source) = &selection {
        info!("Using {:?} as solution", source);
        session
            .printer
            .success(format!("Selected solution: {}", source.name()));
    }
    Ok(selection)
}

fn select_interactive<W: WriteColor>(session: &mut Session<W>) -> Result<Selection, Error> {
    let mut available = vec![];
    for language in session.languages.clone() {
        let path = session.dir.join(language.solution_file_name());
        if !path.is_file() {
            trace!("{} not present", path.display());
            continue;
        }
        if let Some(source) = check_toolchain(session, path, language) {
            available.push(source);
        }
    }

    if available.is_empty() {
        session.printer.error("No usable solution files found!");
        print_requirements(session);
        return Ok(Selection::NoneAvailable);
    }

    session
        .printer
        .colored(&BLUE, "\nAvailable Solution Files");
    for (index, source) in available.iter().enumerate() {
        session
            .printer
            .colored(&BLUE, format!("{}. {}", index + 1, source.name()));
    }

    loop {
        session
            .printer
            .prompt(format!("Select a solution file (1-{}): ", available.len()));
        let mut line = String::new();
        let read = session
            .input
            .read_line(&mut line)
            .context("Failed to read the choice")?;
        if read == 0 {
            bail!("No solution file selected");
        }
        match line.trim().parse::<usize>() {
            Ok(choice) if (1..=available.len()).contains(&choice) => {
                return Ok(Selection::Selected(available.swap_remove(choice - 1)));
            }
            _ => session.printer.error("Invalid choice! Please try again."),
        }
    }
}

fn select_path<W: WriteColor>(session: &mut Session<W>, path: PathBuf) -> Selection {
    let path = if path.is_absolute() {
        path
    } else {
        session.dir.join(path)
    };
    let name = display_name(&path);
    let ext = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    let language = session
        .languages
        .iter()
        .find(|lang| lang.extensions().iter().any(|lang_ext| *lang_ext == ext))
        .cloned();
    let language = match language {
        Some(language) => language,
        None => {
            session
                .printer
                .error(format!("Unknown language of {}", name));
            print_requirements(session);
            return Selection::NoneAvailable;
        }
    };
    if !path.is_file() {
        session.printer.error(format!("{} does not exist", name));
        return Selection::NoneAvailable;
    }
    match check_toolchain(session, path, language.clone()) {
        Some(source) => Selection::Selected(source),
        None => {
            session.printer.info(format!("- {}", language.requirement()));
            Selection::NoneAvailable
        }
    }
}

/// Check that the solution at `path` can be run, telling the user the result.
fn check_toolchain<W: WriteColor>(
    session: &mut Session<W>,
    path: PathBuf,
    language: Arc<dyn Language>,
) -> Option<SourceFile> {
    let name = display_name(&path);
    let probe = probe_language(language.as_ref());
    if probe.available {
        session
            .printer
            .success(format!("Found {} ({})", name, probe.message));
        Some(SourceFile::with_language(path, language))
    } else {
        session
            .printer
            .error(format!("Found {} but {}", name, probe.message));
        None
    }
}

fn print_requirements<W: WriteColor>(session: &mut Session<W>) {
    session
        .printer
        .info("Please ensure you have the required language support installed:");
    for language in &session.languages {
        session.printer.info(format!("- {}", language.requirement()));
    }
}
