//! Tracing subscriber setup.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

/// Environment variable controlling the log filter.
pub const LOG_ENV_VAR: &str = "OASDECL_LOG";

const WORKSPACE_TARGETS: [&str; 4] = ["oasdecl", "oasdecl_cli", "oasdecl_core", "oasdecl_common"];
const DEFAULT_LEVEL: &str = "info";

/// Install the global fmt subscriber, writing to stderr.
///
/// OASDECL_LOG controls log level: "trace", "debug", "info", "warn", "error"
/// or a full tracing filter spec like "oasdecl_core=debug,oasdecl_cli=warn"
pub fn init_tracing() {
    let filter = filter_spec(std::env::var(LOG_ENV_VAR).ok().as_deref());

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .with_file(true)
        .with_filter(EnvFilter::new(filter));

    if tracing_subscriber::registry()
        .with(fmt_layer)
        .try_init()
        .is_err()
    {
        eprintln!("Warning: tracing subscriber already initialized");
    }
}

/// Build the filter spec from the raw env value.
fn filter_spec(env_value: Option<&str>) -> String {
    match env_value {
        Some(level) if is_plain_level(level) => scoped(&level.to_ascii_lowercase()),
        Some(spec) if !spec.trim().is_empty() => spec.to_string(),
        _ => scoped(DEFAULT_LEVEL),
    }
}

fn scoped(level: &str) -> String {
    WORKSPACE_TARGETS
        .iter()
        .map(|target| format!("{target}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

fn is_plain_level(s: &str) -> bool {
    matches!(
        s.to_ascii_lowercase().as_str(),
        "trace" | "debug" | "info" | "warn" | "error"
    )
}
