#![allow(dead_code)]

use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use termcolor::NoColor;

use testcase_maker_format::ui::Printer;
use testcase_maker_format::Session;
use testcase_maker_lang::{
    ExecutionOptions, InterpretedConfiguration, Language, LanguageInterpreted,
};

pub type TestSession = Session<NoColor<Vec<u8>>>;

/// Reads T and then sums the two numbers of every case.
pub const SUM_SOLUTION: &str = r#"read t
while [ "$t" -gt 0 ]; do
  read a b
  echo $((a + b))
  t=$((t - 1))
done
"#;

/// Like `SUM_SOLUTION`, but always one off.
pub const WRONG_SOLUTION: &str = r#"read t
while [ "$t" -gt 0 ]; do
  read a b
  echo $((a + b + 1))
  t=$((t - 1))
done
"#;

pub const CRASHING_SOLUTION: &str = "echo oops >&2\nexit 1\n";

pub const HANGING_SOLUTION: &str = "exec sleep 10\n";

/// A language that runs the `.sh` files with the system shell.
pub fn shell() -> Arc<dyn Language> {
    Arc::new(LanguageInterpreted::new(InterpretedConfiguration {
        name: "Shell",
        extension: "sh",
        solution_file_name: "solution.sh",
        toolchain_name: "Shell",
        interpreters: vec!["sh".into()],
        version_args: vec!["-c".into(), "echo sh 1.0".into()],
    }))
}

/// A language whose interpreter is never installed.
pub fn missing_language() -> Arc<dyn Language> {
    Arc::new(LanguageInterpreted::new(InterpretedConfiguration {
        name: "Missing",
        extension: "missing",
        solution_file_name: "solution.missing",
        toolchain_name: "Missing",
        interpreters: vec!["surely-not-an-installed-program".into()],
        version_args: vec!["--version".into()],
    }))
}

/// A session on `dir` with the shell language only, that reads the choices from `input`.
pub fn session(dir: &Path, input: &str) -> TestSession {
    Session::new(dir, Printer::new(NoColor::new(vec![])))
        .with_languages(vec![shell()])
        .with_input(Cursor::new(input.to_string()))
        .with_execution_options(ExecutionOptions {
            time_limit: Some(Duration::from_secs(5)),
            build_time_limit: Some(Duration::from_secs(30)),
        })
}

/// Everything printed so far by the session.
pub fn printed(session: &TestSession) -> String {
    String::from_utf8_lossy(session.printer.stream.get_ref()).to_string()
}

pub fn write_solution(dir: &Path, source: &str) -> PathBuf {
    let path = dir.join("solution.sh");
    std::fs::write(&path, source).unwrap();
    path
}

pub fn read(path: PathBuf) -> String {
    std::fs::read_to_string(path).unwrap()
}

/// The names of the files in `dir`, sorted.
pub fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<_> = std::fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    names.sort();
    names
}

/// The sum of every case of an input file, one per line.
pub fn expected_sums(input: &str) -> String {
    input
        .lines()
        .skip(1)
        .map(|line| {
            line.split(' ')
                .map(|v| v.parse::<u32>().unwrap())
                .sum::<u32>()
                .to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}
