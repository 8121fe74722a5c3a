//! Proc macros compiling fsmgen declarations into state machines.

use darling::{FromDeriveInput, FromMeta};
use darling::ast::NestedMeta;
use fsmgen_compiler::source::is_annotation;
use fsmgen_compiler::{Options, check, compile};
use proc_macro::TokenStream;
use quote::quote;
use syn::{DeriveInput, Fields, Item, parse_macro_input};

mod attrs;

/// Compiles a declaration struct and emits the machine next to it.
///
/// Each named field is a state; its `#[on = "..."]` attribute lists the
/// events leaving it. The declaration itself is kept, with the `on`
/// attributes removed.
#[proc_macro_attribute]
pub fn fsm(args: TokenStream, input: TokenStream) -> TokenStream {
    let args = match NestedMeta::parse_meta_list(args.into()) {
        Ok(args) => args,
        Err(e) => return darling::Error::from(e).write_errors().into(),
    };
    let args = match attrs::FsmArgs::from_list(&args) {
        Ok(args) => args,
        Err(e) => return e.write_errors().into(),
    };

    let item = parse_macro_input!(input as Item);

    match generate_fsm(args.into_options(), item) {
        Ok(tokens) => tokens.into(),
        Err(e) => e.to_compile_error().into(),
    }
}

fn generate_fsm(options: Options, mut item: Item) -> syn::Result<proc_macro2::TokenStream> {
    let compiled = compile(&item, &options)?;
    let generated = compiled.tokens;

    if let Item::Struct(declaration) = &mut item {
        strip_annotations(&mut declaration.fields);
        declaration
            .attrs
            .push(syn::parse_quote!(#[allow(dead_code, non_snake_case)]));
    }

    Ok(quote! {
        #item
        #generated
    })
}

fn strip_annotations(fields: &mut Fields) {
    for field in fields.iter_mut() {
        field.attrs.retain(|attr| !is_annotation(attr));
    }
}

/// Validates a declaration without generating a machine.
///
/// Used for declarations compiled out of band by the `fsmgen` binary: the
/// `on` attributes are registered, the declaration is checked at build time,
/// and its Graphviz description is exposed as `GRAPHVIZ`. A non-default
/// `--min-event-len` is repeated as `#[declaration(min_event_len = N)]`.
#[proc_macro_derive(Declaration, attributes(on, declaration))]
pub fn derive_declaration(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let args = match attrs::DeclarationArgs::from_derive_input(&input) {
        Ok(args) => args,
        Err(e) => return e.write_errors().into(),
    };

    let machine = match check(&input, &args.into_options()) {
        Ok((_, machine)) => machine,
        Err(e) => return syn::Error::from(e).to_compile_error().into(),
    };
    let description = fsmgen_compiler::describe::describe(&machine);

    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    quote! {
        impl #impl_generics #name #ty_generics #where_clause {
            /// Graphviz rendering of the declared transition graph.
            pub const GRAPHVIZ: &'static str = #description;
        }
    }
    .into()
}
