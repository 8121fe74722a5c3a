//! fsmgen command-line generator.
//!
//! ## Usage
//!
//! ```bash
//! fsmgen --type CbmDeclaration                  # generate ./cbm.fsm.rs
//! fsmgen --type ADeclaration,BDeclaration -v    # print each description too
//! fsmgen --type CbmDeclaration --dir src/breaker
//! ```

use std::path::PathBuf;

use fsmgen_compiler::naming::verify_type_name;
use fsmgen_compiler::{ErrorKind, Location, Options, ParsePolicy, compile};

pub mod cli;
pub mod error;
pub mod output;
pub mod scan;

pub use crate::cli::Cli;
pub use crate::error::{CliError, CliResult};

use crate::scan::SourceFile;

/// A machine written to disk.
#[derive(Debug, Clone)]
pub struct Generated {
    pub machine: String,
    pub path: PathBuf,
    pub description: String,
}

/// Outcome of a run that got as far as compiling.
#[derive(Debug, Default)]
pub struct Report {
    pub generated: Vec<Generated>,
    pub failed: usize,
}

impl Report {
    /// Fails if any requested machine was not generated.
    pub fn check(&self) -> CliResult<()> {
        if self.failed > 0 {
            return Err(CliError::Failed {
                failed: self.failed,
                total: self.failed + self.generated.len(),
            });
        }
        Ok(())
    }
}

/// Generates every requested machine.
///
/// Type names are checked before any file is read. Machines are then compiled
/// independently: one failure does not stop the others and is counted in the
/// report.
pub fn run(cli: &Cli) -> CliResult<Report> {
    for name in &cli.types {
        verify_type_name(name, &Location::call_site()).map_err(|e| CliError::Type(e.kind().clone()))?;
    }

    let crate_path = syn::parse_str::<syn::Path>(&cli.crate_path).map_err(|source| CliError::CratePath {
        path: cli.crate_path.clone(),
        source,
    })?;
    let files = scan::scan(&cli.dir)?;
    tracing::debug!(dir = %cli.dir.display(), files = files.len(), "scanned working directory");

    let mut report = Report::default();
    for name in &cli.types {
        let options = Options {
            machine_name: None,
            package: None,
            policy: ParsePolicy {
                min_event_len: cli.min_event_len,
            },
            crate_path: crate_path.clone(),
            asynchronous: cli.asynchronous,
        };

        match generate(cli, &files, name, options) {
            Ok(machine) => {
                tracing::info!(machine = %machine.machine, path = %machine.path.display(), "generated");
                report.generated.push(machine);
            }
            Err(e) => {
                tracing::error!(declaration = %name, "{e}");
                report.failed += 1;
            }
        }
    }

    Ok(report)
}

fn generate(cli: &Cli, files: &[SourceFile], name: &str, mut options: Options) -> CliResult<Generated> {
    let Some((source, item)) = files
        .iter()
        .find_map(|source| source.find(name).map(|item| (source, item)))
    else {
        return Err(CliError::Type(ErrorKind::MissingDeclaration {
            name: name.to_owned(),
        }));
    };

    let _span = tracing::info_span!("machine", declaration = %name).entered();

    options.package = source.package.clone();
    let compiled = compile(item, &options).map_err(|e| e.in_file(&source.path))?;
    let text = compiled.render().map_err(|e| e.in_file(&source.path))?;
    let path = output::write_atomic(&cli.dir, &compiled.file_name(), &text)?;

    Ok(Generated {
        machine: compiled.machine_name(),
        path,
        description: compiled.description,
    })
}
