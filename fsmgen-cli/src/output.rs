//! Writing generated files.

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{CliError, CliResult};

/// Writes `contents` to `dir/name` through a temporary file in the same
/// directory, so readers never observe a partial file.
pub fn write_atomic(dir: &Path, name: &str, contents: &str) -> CliResult<PathBuf> {
    let path = dir.join(name);
    let write_err = |source| CliError::Write {
        path: path.clone(),
        source,
    };

    let mut file = tempfile::NamedTempFile::new_in(dir).map_err(write_err)?;
    file.write_all(contents.as_bytes()).map_err(write_err)?;
    file.persist(&path).map_err(|e| write_err(e.error))?;
    Ok(path)
}
