use clap::Args;
use console::style;
use std::path::{Path, PathBuf};
use std::time::Instant;
use thiserror::Error;
use tracing::debug;

use oasdecl_common::{Config, ConfigError};
use oasdecl_core::{Compiler, EmissionSink, EmitError, FileSink, extract};

use crate::loader::{LoadError, load_document};
use crate::prolog::{TOOL_NAME, TOOL_VERSION, header_lines, output_path};

/// Arguments of a generation run.
#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    /// Input document.
    #[arg(value_name = "INPUT", help = "Swagger/OpenAPI document (JSON or YAML)")]
    pub input: PathBuf,
    /// Output root, overriding the config file.
    #[arg(
        long = "out-dir",
        value_name = "DIR",
        help = "Root directory for declaration files. Overrides the config file"
    )]
    pub out_dir: Option<PathBuf>,
    /// Explicit config file.
    #[arg(
        long = "config",
        value_name = "FILE",
        help = "Config file. Defaults to oasdecl.toml in the working directory, if present"
    )]
    pub config: Option<PathBuf>,
    /// Suppress progress output.
    #[arg(short, long, help = "Only print errors")]
    pub quiet: bool,
}

/// Anything that stops a generation run.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// Bad or unreadable config file.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Bad or unreadable input document.
    #[error(transparent)]
    Load(#[from] LoadError),
    /// The declaration file could not be written.
    #[error(transparent)]
    Emit(#[from] EmitError),
}

/// Result of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generated {
    /// Declaration file written.
    pub path: PathBuf,
    /// Interface names in emission order.
    pub interfaces: Vec<String>,
}

/// Run the generator, printing errors in red; returns the exit code.
pub fn run(args: &GenerateArgs) -> i32 {
    let work_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    match generate(args, &work_dir) {
        Ok(_) => 0,
        Err(err) => {
            eprintln!("{}", style(err).red());
            1
        }
    }
}

/// Generate the declaration file for `args.input`, resolving the config
/// file relative to `work_dir`.
pub fn generate(args: &GenerateArgs, work_dir: &Path) -> Result<Generated, GenerateError> {
    let start_time = Instant::now();
    let config = Config::load(args.config.as_deref(), work_dir)?;
    let output_dir = args.out_dir.clone().unwrap_or(config.output_dir);
    let progress = Progress { quiet: args.quiet };

    if config.banner {
        progress.line(
            style(format!(
                "{TOOL_NAME} {TOOL_VERSION}: Swagger/OpenAPI schemas to TypeScript declarations"
            ))
            .bold(),
        );
    }

    progress.line(format!("Loading: \"{}\"", args.input.display()));
    let document = load_document(&args.input)?;
    let extraction = extract(&document);
    let info = extraction.info.as_ref();

    let path = output_path(&output_dir, info, &config.file_name);
    progress.line(format!("+ add declaration file: {}", path.display()));

    let mut compiler = Compiler::new();
    compiler.compile_extraction(&extraction);
    let interfaces: Vec<String> = compiler
        .declarations()
        .iter()
        .map(|declaration| declaration.name.clone())
        .collect();
    for name in &interfaces {
        progress.line(style(format!("+ add interface \"{name}\"")).green());
    }
    progress.line(format!("* detected {} interfaces", interfaces.len()));

    let header = header_lines(&args.input, info, chrono::Local::now());
    let mut sink = FileSink::new(&path);
    sink.write(&compiler.finish(header))?;
    progress.line(format!("save declaration file: {}", path.display()));

    let elapsed = start_time.elapsed();
    debug!(elapsed_ms = elapsed.as_millis(), "Generation finished.");
    progress.line(format!("done. ({}ms)", elapsed.as_millis()));

    Ok(Generated { path, interfaces })
}

/// Progress output on stdout, silenced by `--quiet`.
#[derive(Debug, Clone, Copy)]
struct Progress {
    quiet: bool,
}

impl Progress {
    fn line(self, message: impl std::fmt::Display) {
        if !self.quiet {
            println!("{message}");
        }
    }
}
