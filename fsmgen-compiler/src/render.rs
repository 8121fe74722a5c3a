//! Source text of a generated artifact.

use proc_macro2::TokenStream;

use crate::error::{CompileError, ErrorKind, Location, Result};

/// Formats generated tokens as a standalone `.fsm.rs` file.
///
/// `declaration` and `package` only feed the header comment.
pub fn render_file(
    machine: &str,
    declaration: &str,
    package: Option<&str>,
    tokens: TokenStream,
) -> Result<String> {
    let file: syn::File = syn::parse2(tokens).map_err(|err| {
        CompileError::new(
            ErrorKind::Render {
                machine: machine.to_owned(),
                message: err.to_string(),
            },
            Location::new(err.span()),
        )
    })?;

    let origin = match package {
        Some(package) => format!("`{declaration}` in module `{package}`"),
        None => format!("`{declaration}`"),
    };
    let header = format!("// Code generated by fsmgen from {origin}. DO NOT EDIT.\n\n");

    Ok(header + &prettyplease::unparse(&file))
}
