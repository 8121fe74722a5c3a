use proc_macro2::TokenStream;
use quote::quote;

use crate::ir::MachineIr;

pub fn render_machine_struct(ir: &MachineIr) -> TokenStream {
    let machine = &ir.machine_ident;
    let state_enum = &ir.state_enum_ident;
    let summary = format!("The `{}` state machine.", ir.machine_name);
    let graph_intro = format!("Definition for {} in Graphviz format:", ir.machine_name);
    let graph_lines = ir.description.lines();

    quote! {
        #[doc = #summary]
        ///
        #[doc = #graph_intro]
        ///
        /// ```text
        #(#[doc = #graph_lines])*
        /// ```
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub struct #machine {
            state: #state_enum,
        }
    }
}
