//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;
use fsmgen_compiler::annotation::DEFAULT_MIN_EVENT_LEN;

/// Generate state machines from `*Declaration` structs.
///
/// Every requested declaration is compiled into `<machine>.fsm.rs` in the
/// working directory.
#[derive(Debug, Parser)]
#[command(name = "fsmgen", version, about)]
pub struct Cli {
    /// Comma-separated list of declaration type names
    #[arg(long = "type", value_name = "TYPES", value_delimiter = ',', required = true)]
    pub types: Vec<String>,

    /// Working directory holding the declarations
    #[arg(long, value_name = "DIR", env = "FSMGEN_DIR", default_value = ".")]
    pub dir: PathBuf,

    /// Print each machine's Graphviz description
    #[arg(short, long)]
    pub verbose: bool,

    /// Also generate the async operator trait
    #[arg(long)]
    pub asynchronous: bool,

    /// Path of the runtime crate in generated code
    #[arg(long, value_name = "PATH", default_value = "::fsmgen")]
    pub crate_path: String,

    /// Shortest accepted event name
    #[arg(long, value_name = "N", default_value_t = DEFAULT_MIN_EVENT_LEN)]
    pub min_event_len: usize,
}
