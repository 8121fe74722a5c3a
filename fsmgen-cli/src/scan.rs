//! Locating declarations in a working directory.

use std::fs;
use std::path::{Path, PathBuf};

use fsmgen_compiler::source::find_item;

use crate::error::{CliError, CliResult};

/// Suffix of generated files, which are never scanned.
pub const GENERATED_SUFFIX: &str = ".fsm.rs";

/// A parsed Rust source file of the working directory.
#[derive(Debug)]
pub struct SourceFile {
    pub path: PathBuf,
    /// Module implied by the file's location.
    pub package: Option<String>,
    pub file: syn::File,
}

impl SourceFile {
    pub fn find(&self, name: &str) -> Option<&syn::Item> {
        find_item(&self.file.items, name)
    }
}

/// Parses every `*.rs` file directly inside `dir`, in path order.
pub fn scan(dir: &Path) -> CliResult<Vec<SourceFile>> {
    let entries = fs::read_dir(dir).map_err(|source| CliError::Read {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut paths = Vec::new();
    for entry in entries {
        let path = entry
            .map_err(|source| CliError::Read {
                path: dir.to_path_buf(),
                source,
            })?
            .path();
        if is_candidate(&path) {
            paths.push(path);
        }
    }
    paths.sort();

    paths
        .into_iter()
        .map(|path| {
            let text = fs::read_to_string(&path).map_err(|source| CliError::Read {
                path: path.clone(),
                source,
            })?;
            let file = syn::parse_file(&text).map_err(|source| CliError::Parse {
                path: path.clone(),
                source,
            })?;
            tracing::debug!(path = %path.display(), items = file.items.len(), "parsed source file");
            Ok(SourceFile {
                package: package_name(&path),
                path,
                file,
            })
        })
        .collect()
}

fn is_candidate(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    path.is_file() && name.ends_with(".rs") && !name.ends_with(GENERATED_SUFFIX)
}

/// Module name of a source file: its stem, or the enclosing directory for
/// crate roots and `mod.rs`.
pub fn package_name(path: &Path) -> Option<String> {
    let stem = path.file_stem()?.to_str()?;
    if matches!(stem, "lib" | "main" | "mod") {
        let parent = path.parent()?.canonicalize().ok()?;
        return parent.file_name()?.to_str().map(str::to_owned);
    }
    Some(stem.to_owned())
}
