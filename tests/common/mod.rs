#![allow(dead_code)]

use std::io::Cursor;
use std::path::Path;
use std::process::{Command, Output, Stdio};
use std::sync::Arc;

use termcolor::NoColor;

use testcase_maker_format::ui::Printer;
use testcase_maker_format::Session;
use testcase_maker_lang::{InterpretedConfiguration, Language, LanguageInterpreted};

pub type TestSession = Session<NoColor<Vec<u8>>>;

pub const SUM_SOLUTION: &str = r#"read t
while [ "$t" -gt 0 ]; do
  read a b
  echo $((a + b))
  t=$((t - 1))
done
"#;

pub const CRASHING_SOLUTION: &str = "exit 3\n";

pub fn setup() {
    let _ = env_logger::Builder::from_default_env()
        .format_timestamp_nanos()
        .is_test(true)
        .try_init();
}

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

/// A session on `dir` that knows only the shell language and reads the choices from `input`.
pub fn session(dir: &Path, input: &str) -> TestSession {
    Session::new(dir, Printer::new(NoColor::new(vec![])))
        .with_languages(vec![shell()])
        .with_input(Cursor::new(input.to_string()))
}

pub fn printed(session: &TestSession) -> String {
    String::from_utf8_lossy(session.printer.stream.get_ref()).to_string()
}

/// Run the binary inside `dir` with the provided arguments and no input.
pub fn run_binary(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_testcase-maker"))
        .args(args)
        .arg("--color")
        .arg("never")
        .current_dir(dir)
        .stdin(Stdio::null())
        .output()
        .unwrap()
}
