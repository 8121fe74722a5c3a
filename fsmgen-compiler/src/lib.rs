//! Declaration-to-code compiler for fsmgen.
//!
//! The pipeline is linear and single pass:
//!
//! 1. [`source`] turns a front-end item into a [`Declaration`](source::Declaration).
//! 2. [`extract`] yields one state skeleton per field.
//! 3. [`annotation`] parses each field's `on` annotation.
//! 4. [`graph`] assembles the [`MachineDefinition`](graph::MachineDefinition).
//! 5. [`validate`] resolves every transition into a [`Machine`](validate::Machine).
//! 6. [`describe`] renders the Graphviz description, [`ir`] and [`codegen`]
//!    emit the Rust implementation.
//!
//! Any failure aborts before anything is emitted.
//!
//! ```
//! use fsmgen_compiler::{Options, compile};
//!
//! let declaration: syn::ItemStruct = syn::parse_quote! {
//!     struct DoorDeclaration {
//!         #[on = r#"Close:"Closed""#]
//!         Open: (),
//!         #[on = r#"Open:"Open",Lock:"Locked""#]
//!         Closed: (),
//!         Locked: (),
//!     }
//! };
//! let compiled = compile(&declaration, &Options::default())?;
//! assert_eq!(compiled.machine_name(), "Door");
//! assert_eq!(compiled.file_name(), "door.fsm.rs");
//! assert!(compiled.description.contains("Locked [shape=Msquare];"));
//! # Ok::<(), fsmgen_compiler::CompileError>(())
//! ```

use proc_macro2::TokenStream;
use syn::Ident;

pub mod annotation;
pub mod codegen;
pub mod describe;
pub mod error;
pub mod extract;
pub mod graph;
pub mod ir;
pub mod naming;
pub mod render;
pub mod source;
pub mod validate;

pub use crate::annotation::ParsePolicy;
pub use crate::error::{CompileError, ErrorKind, Location, Result};
pub use crate::source::{Declaration, Introspect};
pub use crate::validate::Machine;

/// Per-machine compilation settings.
#[derive(Debug, Clone)]
pub struct Options {
    /// Overrides the name derived from the declaration type.
    pub machine_name: Option<String>,
    /// Namespace context of the declaration, passed through to the header.
    pub package: Option<String>,
    pub policy: ParsePolicy,
    /// Path of the runtime crate in generated code.
    pub crate_path: syn::Path,
    /// Also emit the async operator trait and `step_async`/`operate_async`.
    pub asynchronous: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            machine_name: None,
            package: None,
            policy: ParsePolicy::default(),
            crate_path: syn::parse_quote!(::fsmgen),
            asynchronous: false,
        }
    }
}

/// Output of a successful compilation.
#[derive(Debug, Clone)]
pub struct Compiled {
    /// Declaration type the machine was compiled from.
    pub declaration: Ident,
    pub machine: Machine,
    pub description: String,
    pub ir: ir::MachineIr,
    pub tokens: TokenStream,
}

impl Compiled {
    pub fn machine_name(&self) -> String {
        self.machine.name().to_string()
    }

    /// `lowercase(machine) + ".fsm.rs"`
    pub fn file_name(&self) -> String {
        naming::file_name(&self.machine_name())
    }

    /// Formats the generated code as a standalone file.
    pub fn render(&self) -> Result<String> {
        render::render_file(
            &self.machine_name(),
            &self.declaration.to_string(),
            self.machine.package(),
            self.tokens.clone(),
        )
    }
}

/// Runs the front half of the pipeline: naming, extraction, parsing, building
/// and validation.
pub fn check<D: Introspect + ?Sized>(source: &D, options: &Options) -> Result<(Ident, Machine)> {
    let decl = source.introspect()?;
    let derived = naming::machine_name(&decl.name.to_string(), &decl.location)?;
    let name = match &options.machine_name {
        Some(name) => machine_ident(name, &decl.location)?,
        None => machine_ident(&derived, &decl.location)?,
    };

    let _span = tracing::debug_span!("compile", machine = %name).entered();

    let skeletons = extract::extract(&decl)?;
    let states = annotation::parse_all(&skeletons, &options.policy)?;
    tracing::debug!(states = states.len(), "parsed annotations");

    let definition = graph::MachineDefinition::build(name, options.package.clone(), states)?;
    let machine = validate::validate(definition)?;
    Ok((decl.name, machine))
}

/// Compiles a declaration into its description and generated code.
pub fn compile<D: Introspect + ?Sized>(source: &D, options: &Options) -> Result<Compiled> {
    let (declaration, machine) = check(source, options)?;

    let description = describe::describe(&machine);
    let ir = ir::MachineIr::new(
        &machine,
        description.clone(),
        options.crate_path.clone(),
        options.asynchronous,
    );
    let tokens = codegen::generate(&ir);

    tracing::debug!(
        machine = %machine.name(),
        transitions = machine.transition_count(),
        "generated machine"
    );

    Ok(Compiled {
        declaration,
        machine,
        description,
        ir,
        tokens,
    })
}

fn machine_ident(name: &str, location: &Location) -> Result<Ident> {
    let mut ident = syn::parse_str::<Ident>(name).map_err(|_| {
        CompileError::new(
            ErrorKind::NamingPolicy {
                name: name.to_owned(),
                min: naming::MIN_TYPE_NAME_LEN,
            },
            location.clone(),
        )
    })?;
    ident.set_span(location.span());
    Ok(ident)
}
