//! Attribute parsing for the fsm macro.

use darling::{FromDeriveInput, FromMeta};
use fsmgen_compiler::{Options, ParsePolicy};

/// Arguments for the `#[fsm(...)]` attribute.
#[derive(Debug, Default, FromMeta)]
#[darling(default)]
pub struct FsmArgs {
    /// Machine name; defaults to the type name without its `Declaration` suffix.
    pub name: Option<String>,

    /// Path of the runtime crate in generated code (default: `::fsmgen`).
    #[darling(rename = "crate")]
    pub krate: Option<syn::Path>,

    /// Also generate the async operator trait.
    pub asynchronous: bool,

    /// Shortest accepted event name.
    pub min_event_len: Option<usize>,
}

impl FsmArgs {
    pub fn into_options(self) -> Options {
        let defaults = Options::default();
        Options {
            machine_name: self.name,
            package: None,
            policy: ParsePolicy {
                min_event_len: self
                    .min_event_len
                    .unwrap_or(defaults.policy.min_event_len),
            },
            crate_path: self.krate.unwrap_or(defaults.crate_path),
            asynchronous: self.asynchronous,
        }
    }
}

/// Container arguments of `#[derive(Declaration)]`, given as
/// `#[declaration(min_event_len = 1)]`.
///
/// Mirrors the `fsmgen` command-line options that change what is accepted.
#[derive(Debug, Default, FromDeriveInput)]
#[darling(attributes(declaration), default)]
pub struct DeclarationArgs {
    /// Shortest accepted event name.
    pub min_event_len: Option<usize>,
}

impl DeclarationArgs {
    pub fn into_options(self) -> Options {
        let defaults = Options::default();
        Options {
            policy: ParsePolicy {
                min_event_len: self
                    .min_event_len
                    .unwrap_or(defaults.policy.min_event_len),
            },
            ..defaults
        }
    }
}
