use std::io::Write;

use anyhow::Error;

/// Adds methods for failing without panic. Like `expect` but without panic.
pub trait NiceError<T> {
    /// Fail exiting with `1` if the value is an error. Otherwise return the content.
    fn nice_unwrap(self) -> T;
}

/// Write the error and all its causes, one per paragraph.
pub fn report_error<W: Write>(error: &Error, out: &mut W) {
    let mut chain = error.chain();
    if let Some(fail) = chain.next() {
        let _ = writeln!(out, "Error: {}", fail);
    }
    for cause in chain {
        let _ = writeln!(out, "\nCaused by:\n    {}", cause);
    }
}

fn fail(error: Error) -> ! {
    debug!("{:?}", error);
    report_error(&error, &mut std::io::stderr());
    std::process::exit(1);
}

impl<T> NiceError<T> for Result<T, Error> {
    fn nice_unwrap(self) -> T {
        match self {
            Ok(x) => x,
            Err(e) => fail(e),
        }
    }
}
