//! The console output of the generator and the validator.

use std::io::Write;

pub use termcolor::WriteColor;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream};
use testcase_maker_lang::ExecutionError;

use crate::{cwrite, cwriteln};

/// Width of the rulers around the headers.
const HEADER_WIDTH: usize = 50;

lazy_static! {
    /// The RED color to use with `cwrite!` and `cwriteln!`
    pub static ref RED: ColorSpec = {
        let mut color = ColorSpec::new();
        color.set_fg(Some(Color::Red)).set_intense(true).set_bold(true);
        color
    };
    /// The GREEN color to use with `cwrite!` and `cwriteln!`
    pub static ref GREEN: ColorSpec = {
        let mut color = ColorSpec::new();
        color.set_fg(Some(Color::Green)).set_intense(true).set_bold(true);
        color
    };
    /// The YELLOW color to use with `cwrite!` and `cwriteln!`
    pub static ref YELLOW: ColorSpec = {
        let mut color = ColorSpec::new();
        color.set_fg(Some(Color::Yellow)).set_intense(true).set_bold(true);
        color
    };
    /// The BLUE color to use with `cwrite!` and `cwriteln!`
    pub static ref BLUE: ColorSpec = {
        let mut color = ColorSpec::new();
        color.set_fg(Some(Color::Blue)).set_intense(true).set_bold(true);
        color
    };
    /// The CYAN color to use with `cwrite!` and `cwriteln!`
    pub static ref CYAN: ColorSpec = {
        let mut color = ColorSpec::new();
        color.set_fg(Some(Color::Cyan)).set_intense(true);
        color
    };
    /// The default style, used for the raw content of the files.
    pub static ref PLAIN: ColorSpec = ColorSpec::new();
}

/// A printer of human readable messages. This can be used with `cwrite!` and `cwriteln!`.
///
/// Writing to the console is best-effort: a closed stdout must not abort the generation of the
/// test cases, so the write errors are ignored.
pub struct Printer<W: WriteColor> {
    /// The actual stream.
    pub stream: W,
}

/// A printer that writes to the standard output.
pub type StdoutPrinter = Printer<StandardStream>;

impl StdoutPrinter {
    /// Make a printer for stdout, using colors according to `choice`.
    pub fn stdout(choice: ColorChoice) -> StdoutPrinter {
        Printer::new(StandardStream::stdout(choice))
    }
}

impl<W: WriteColor> Printer<W> {
    /// Make a new printer that writes to `stream`.
    pub fn new(stream: W) -> Printer<W> {
        Printer { stream }
    }

    /// Print a section header, surrounded by two rulers.
    pub fn header<S: AsRef<str>>(&mut self, title: S) {
        let ruler = "=".repeat(HEADER_WIDTH);
        cwriteln!(self, CYAN, "\n{}", ruler);
        cwriteln!(self, CYAN, "{}", title.as_ref());
        cwriteln!(self, CYAN, "{}", ruler);
    }

    /// Print something that went wrong.
    pub fn error<S: AsRef<str>>(&mut self, message: S) {
        cwriteln!(self, RED, "[ERROR] {}", message.as_ref());
    }

    /// Print something that went well.
    pub fn success<S: AsRef<str>>(&mut self, message: S) {
        cwriteln!(self, GREEN, "[OK] {}", message.as_ref());
    }

    /// Print something that is not completely right.
    pub fn warning<S: AsRef<str>>(&mut self, message: S) {
        cwriteln!(self, YELLOW, "[WARN] {}", message.as_ref());
    }

    /// Print an informative message.
    pub fn info<S: AsRef<str>>(&mut self, message: S) {
        cwriteln!(self, BLUE, "[INFO] {}", message.as_ref());
    }

    /// Print what the failed program wrote to its standard error, if `error` comes from an
    /// execution and that is not empty.
    pub fn execution_stderr(&mut self, error: &anyhow::Error) {
        let stderr = error
            .downcast_ref::<ExecutionError>()
            .and_then(|e| e.stderr());
        if let Some(stderr) = stderr {
            if !stderr.trim().is_empty() {
                self.line(stderr.trim_end());
            }
        }
    }

    /// Print a line without any decoration.
    pub fn line<S: AsRef<str>>(&mut self, message: S) {
        cwriteln!(self, PLAIN, "{}", message.as_ref());
    }

    /// Print a colored line without any prefix.
    pub fn colored<S: AsRef<str>>(&mut self, color: &ColorSpec, message: S) {
        cwriteln!(self, color, "{}", message.as_ref());
    }

    /// Print a question for the user, leaving the cursor on the same line.
    pub fn prompt<S: AsRef<str>>(&mut self, question: S) {
        cwrite!(self, GREEN, "\n{}", question.as_ref());
        let _ = self.stream.flush();
    }
}

/// Write to `$self.stream`, in the color specified as second parameter. The arguments that follow
/// will be passed to `write!`.
///
/// ```
/// #[macro_use]
/// extern crate testcase_maker_format;
///
/// use termcolor::{ColorSpec, ColorChoice};
/// use testcase_maker_format::ui::StdoutPrinter;
/// use testcase_maker_format::cwrite;
///
/// # fn main() {
/// let mut color = ColorSpec::new();
/// color.set_bold(true);
///
/// let mut printer = StdoutPrinter::stdout(ColorChoice::Never);
/// cwrite!(printer, color, "The output is {}", 42);
/// # }
/// ```
#[macro_export]
macro_rules! cwrite {
    ($self:expr, $color:expr, $($arg:tt)*) => {{
        use std::io::Write;
        use $crate::ui::WriteColor;
        let _ = $self.stream.set_color(&$color);
        let _ = write!(&mut $self.stream, $($arg)*);
        let _ = $self.stream.reset();
    }};
}

/// Write to `$self.stream`, in the color specified as second parameter. The arguments that follow
/// will be passed to `writeln!`.
///
/// ```
/// #[macro_use]
/// extern crate testcase_maker_format;
/// use termcolor::{ColorSpec, ColorChoice};
/// use testcase_maker_format::ui::StdoutPrinter;
/// use testcase_maker_format::cwriteln;
///
/// # fn main() {
/// let mut color = ColorSpec::new();
/// color.set_bold(true);
///
/// let mut printer = StdoutPrinter::stdout(ColorChoice::Never);
/// cwriteln!(printer, color, "The output is {}", 42);
/// # }
/// ```
#[macro_export]
macro_rules! cwriteln {
    ($self:expr, $color:expr, $($arg:tt)*) => {{
        use std::io::Write;
        use $crate::ui::WriteColor;
        let _ = $self.stream.set_color(&$color);
        let _ = writeln!(&mut $self.stream, $($arg)*);
        let _ = $self.stream.reset();
    }};
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use termcolor::NoColor;

    use super::*;

    fn printer() -> Printer<NoColor<Vec<u8>>> {
        Printer::new(NoColor::new(vec![]))
    }

    fn text(printer: Printer<NoColor<Vec<u8>>>) -> String {
        String::from_utf8(printer.stream.into_inner()).unwrap()
    }

    #[test]
    fn test_header() {
        let mut printer = printer();
        printer.header("Title");
        let ruler = "=".repeat(HEADER_WIDTH);
        assert_eq!(text(printer), format!("\n{}\nTitle\n{}\n", ruler, ruler));
    }

    #[test]
    fn test_prefixes() {
        let mut printer = printer();
        printer.error("bad");
        printer.success("good");
        printer.warning("meh");
        printer.info("fyi");
        printer.line("raw");
        assert_eq!(
            text(printer),
            "[ERROR] bad\n[OK] good\n[WARN] meh\n[INFO] fyi\nraw\n"
        );
    }

    #[test]
    fn test_prompt_has_no_newline_at_end() {
        let mut printer = printer();
        printer.prompt("Choose: ");
        assert_eq!(text(printer), "\nChoose: ");
    }
}
