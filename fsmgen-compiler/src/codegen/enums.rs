use proc_macro2::TokenStream;
use quote::quote;

use crate::ir::MachineIr;

pub fn render_state_enum(ir: &MachineIr) -> TokenStream {
    let state_enum = &ir.state_enum_ident;
    let krate = &ir.crate_path;
    let machine_name = &ir.machine_name;
    let count = ir.states.len();
    let states: Vec<_> = ir.states.iter().map(|s| &s.name).collect();
    let labels: Vec<_> = ir.states.iter().map(|s| &s.label).collect();
    let doc = format!("States of [`{}`], in lexicographic order.", ir.machine_ident);

    let terminal: Vec<_> = ir.terminal_states().map(|s| &s.name).collect();
    let is_terminal = if terminal.is_empty() {
        quote! { false }
    } else {
        quote! { matches!(self, #(Self::#terminal)|*) }
    };

    quote! {
        #[doc = #doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum #state_enum {
            #(#states,)*
        }

        impl #state_enum {
            /// Every state, in lexicographic order.
            pub const ALL: [Self; #count] = [#(Self::#states),*];

            /// Declared name of the state.
            pub const fn as_str(self) -> &'static str {
                match self {
                    #(Self::#states => #labels,)*
                }
            }

            /// Returns `true` if the state has no outgoing events.
            pub const fn is_terminal(self) -> bool {
                #is_terminal
            }
        }

        impl ::core::fmt::Display for #state_enum {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl ::core::str::FromStr for #state_enum {
            type Err = #krate::UnknownState;

            fn from_str(s: &str) -> ::core::result::Result<Self, Self::Err> {
                match s {
                    #(#labels => ::core::result::Result::Ok(Self::#states),)*
                    other => ::core::result::Result::Err(#krate::UnknownState::new(#machine_name, other)),
                }
            }
        }
    }
}

/// One event enum per non-terminal state, each with the implicit `Noop`.
pub fn render_event_enums(ir: &MachineIr) -> Vec<TokenStream> {
    let state_enum = &ir.state_enum_ident;
    let krate = &ir.crate_path;

    ir.handlers()
        .map(|(state, handler)| {
            let event_enum = &handler.event_enum;
            let events: Vec<_> = handler.events.iter().map(|e| &e.name).collect();
            let labels: Vec<_> = handler.events.iter().map(|e| &e.label).collect();
            let destinations: Vec<_> = handler.events.iter().map(|e| &e.destination).collect();
            let doc = format!(
                "Events a handler may return while [`{}`] is `{}`.",
                ir.machine_ident, state.label
            );

            quote! {
                #[doc = #doc]
                #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
                pub enum #event_enum {
                    /// Stay in the current state.
                    Noop,
                    #(#events,)*
                }

                impl #event_enum {
                    /// Declared name of the event.
                    pub const fn as_str(self) -> &'static str {
                        match self {
                            Self::Noop => #krate::NOOP,
                            #(Self::#events => #labels,)*
                        }
                    }

                    /// Destination of the event; `None` for `Noop`.
                    pub const fn target(self) -> ::core::option::Option<#state_enum> {
                        match self {
                            Self::Noop => ::core::option::Option::None,
                            #(Self::#events => ::core::option::Option::Some(#state_enum::#destinations),)*
                        }
                    }
                }

                impl ::core::fmt::Display for #event_enum {
                    fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                        f.write_str(self.as_str())
                    }
                }
            }
        })
        .collect()
}
