use clap::Parser;

use testcase_maker::error::NiceError;
use testcase_maker::{main_local, Opt};

fn main() {
    let opt = Opt::parse();
    opt.logger.enable_log();

    let code = main_local(opt).nice_unwrap();
    std::process::exit(code);
}
