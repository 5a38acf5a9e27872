//! `oasdecl` binary.

use oasdecl_common::init_tracing;

fn main() {
    init_tracing();
    std::process::exit(oasdecl_cli::run_cli(std::env::args_os()));
}
