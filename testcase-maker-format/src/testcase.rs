//! Naming and discovery of the test case files.
//!
//! A test case is a pair of files in the working directory: `inNN.txt` with the input and
//! `outNN.txt` with the expected output, where `NN` is the zero padded index of the test case.

use std::path::{Path, PathBuf};

use anyhow::{Context, Error};

/// The name of the input file of the test case with index `index`.
///
/// ```
/// use testcase_maker_format::testcase::input_file_name;
///
/// assert_eq!(input_file_name(7), "in07.txt");
/// assert_eq!(input_file_name(123), "in123.txt");
/// ```
pub fn input_file_name(index: u32) -> String {
    format!("in{:02}.txt", index)
}

/// The name of the output file of the test case with index `index`.
pub fn output_file_name(index: u32) -> String {
    format!("out{:02}.txt", index)
}

/// The path of the output file that pairs with the input file at `input`: the `in` prefix of the
/// file name is replaced with `out`.
pub fn output_for_input(input: &Path) -> PathBuf {
    let name = input
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_default();
    let suffix = name.strip_prefix("in").unwrap_or(&name);
    input.with_file_name(format!("out{}", suffix))
}

/// The name of the file at `path`, for showing it to the user.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string_lossy().to_string())
}

/// All the `in*.txt` files inside `dir`, sorted by file name.
pub fn discover_inputs(dir: &Path) -> Result<Vec<PathBuf>, Error> {
    let pattern = format!(
        "{}/in*.txt",
        glob::Pattern::escape(&dir.to_string_lossy())
    );
    let mut inputs = vec![];
    for entry in glob::glob(&pattern).context("Invalid test case pattern")? {
        let path = entry.context("Failed to list the test case files")?;
        if path.is_file() {
            inputs.push(path);
        }
    }
    inputs.sort_by_key(|path| path.file_name().map(|name| name.to_os_string()));
    debug!("Found {} input files in {}", inputs.len(), dir.display());
    Ok(inputs)
}
