//! Command-line front end for oasdecl.
//!
//! Loads a Swagger/OpenAPI document, compiles its schema definitions and
//! writes one TypeScript declaration file.

pub mod generate;
pub mod loader;
pub mod prolog;

use clap::Parser;
use std::ffi::OsString;

pub use generate::{GenerateArgs, GenerateError, Generated};
pub use loader::{LoadError, load_document};

#[derive(Parser, Debug)]
#[command(
    name = "oasdecl",
    version,
    about = "Generate TypeScript declarations from Swagger/OpenAPI schemas"
)]
struct Cli {
    #[command(flatten)]
    args: GenerateArgs,
}

/// Parse `args` (program name first) and run; returns the process exit code.
pub fn run_cli<I, T>(args: I) -> i32
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    match Cli::try_parse_from(args) {
        Ok(cli) => generate::run(&cli.args),
        Err(e) => {
            let code = e.exit_code();
            let _ = e.print();
            code
        }
    }
}
