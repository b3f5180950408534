//! # testcase-maker
//!
//! This is both an application and a library, the library can be used to achieve the same
//! functionalities of the testcase-maker binary, inside your application.
//!
//! The actual work is done by the `testcase-maker-format` crate (selection of the solution,
//! generation and validation of the test cases) and by the `testcase-maker-lang` crate (running
//! the solutions). This crate parses the command line and drives them.

#[macro_use]
extern crate log;

pub mod error;
pub mod local;
pub mod opt;

pub use local::*;
pub use opt::*;
