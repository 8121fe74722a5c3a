//! Error types for the CLI

use std::io;
use std::path::PathBuf;

use fsmgen_compiler::{CompileError, ErrorKind};
use thiserror::Error;

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// Errors that can occur in the CLI
#[derive(Debug, Error)]
pub enum CliError {
    /// A requested type name is unusable
    #[error("{0}")]
    Type(ErrorKind),

    /// A declaration failed to compile
    #[error(transparent)]
    Compile(#[from] CompileError),

    #[error("can't read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("can't parse {}: {source}", path.display())]
    Parse { path: PathBuf, source: syn::Error },

    #[error("can't write {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("invalid crate path `{path}`: {source}")]
    CratePath { path: String, source: syn::Error },

    /// Some machines were generated, others were not
    #[error("{failed} of {total} machines failed to generate")]
    Failed { failed: usize, total: usize },
}
