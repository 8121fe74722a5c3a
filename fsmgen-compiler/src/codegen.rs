//! Rust renderer for a machine IR.

use proc_macro2::TokenStream;
use quote::quote;

use crate::ir::MachineIr;

mod enums;
mod impls;
mod structs;

/// Generate the complete machine implementation.
pub fn generate(ir: &MachineIr) -> TokenStream {
    let state_enum = enums::render_state_enum(ir);
    let event_enums = enums::render_event_enums(ir);
    let operator = impls::render_operator_trait(ir);
    let async_operator = impls::render_async_operator_trait(ir);
    let machine_struct = structs::render_machine_struct(ir);
    let machine_impl = impls::render_machine_impl(ir);
    let trait_impls = impls::render_trait_impls(ir);

    quote! {
        #state_enum
        #(#event_enums)*
        #operator
        #async_operator
        #machine_struct
        #machine_impl
        #trait_impls
    }
}
