use proc_macro2::TokenStream;
use quote::quote;

use crate::ir::MachineIr;

pub fn render_operator_trait(ir: &MachineIr) -> TokenStream {
    let operator = &ir.operator_ident;
    let doc = format!(
        "Handlers for every non-terminal state of [`{}`].",
        ir.machine_ident
    );
    let methods = ir.handlers().map(|(state, handler)| {
        let method = &handler.method;
        let event_enum = &handler.event_enum;
        let doc = format!("Called while the machine is `{}`.", state.label);
        quote! {
            #[doc = #doc]
            fn #method(&mut self) -> #event_enum;
        }
    });

    quote! {
        #[doc = #doc]
        pub trait #operator {
            #(#methods)*
        }
    }
}

pub fn render_async_operator_trait(ir: &MachineIr) -> TokenStream {
    let Some(operator) = &ir.async_operator_ident else {
        return quote! {};
    };
    let doc = format!(
        "Async handlers for every non-terminal state of [`{}`].",
        ir.machine_ident
    );
    let methods = ir.handlers().map(|(state, handler)| {
        let method = &handler.method;
        let event_enum = &handler.event_enum;
        let doc = format!("Awaited while the machine is `{}`.", state.label);
        quote! {
            #[doc = #doc]
            fn #method(&mut self) -> impl ::core::future::Future<Output = #event_enum>;
        }
    });

    quote! {
        #[doc = #doc]
        pub trait #operator {
            #(#methods)*
        }
    }
}

/// Builds the body shared by `step` and `step_async`.
///
/// Dispatches on the current state, calls its handler and applies the
/// destination of the returned event. Terminal states return early.
fn build_step_body(ir: &MachineIr, awaited: bool) -> TokenStream {
    let state_enum = &ir.state_enum_ident;
    let krate = &ir.crate_path;

    if ir.handlers().next().is_none() {
        return quote! {
            let _ = operator;
            #krate::Transition::new(self.state, #krate::NOOP, self.state)
        };
    }

    let handler_arms = ir.handlers().map(|(state, handler)| {
        let name = &state.name;
        let method = &handler.method;
        let call = if awaited {
            quote! { operator.#method().await }
        } else {
            quote! { operator.#method() }
        };
        quote! {
            #state_enum::#name => {
                let event = #call;
                (event.as_str(), event.target())
            }
        }
    });

    let terminal: Vec<_> = ir.terminal_states().map(|s| &s.name).collect();
    let terminal_arm = (!terminal.is_empty()).then(|| {
        quote! {
            #(#state_enum::#terminal)|* => return #krate::Transition::new(from, #krate::NOOP, from),
        }
    });

    quote! {
        let from = self.state;
        let (event, target) = match from {
            #(#handler_arms)*
            #terminal_arm
        };
        self.state = match target {
            ::core::option::Option::Some(next) => next,
            ::core::option::Option::None => from,
        };
        #krate::Transition::new(from, event, self.state)
    }
}

pub fn render_machine_impl(ir: &MachineIr) -> TokenStream {
    let machine = &ir.machine_ident;
    let state_enum = &ir.state_enum_ident;
    let operator = &ir.operator_ident;
    let krate = &ir.crate_path;
    let machine_name = &ir.machine_name;
    let description = &ir.description;
    let step_body = build_step_body(ir, false);

    let async_methods = ir.async_operator_ident.as_ref().map(|async_operator| {
        let step_body = build_step_body(ir, true);
        quote! {
            /// Awaits the handler of the current state once and applies the event it returns.
            pub async fn step_async<O: #async_operator + ?Sized>(
                &mut self,
                operator: &mut O,
            ) -> #krate::Transition<#state_enum> {
                #step_body
            }

            /// Drives the machine with async handlers until it reaches a terminal state.
            pub async fn operate_async<O: #async_operator + ?Sized>(&mut self, operator: &mut O) -> #state_enum {
                while !self.state.is_terminal() {
                    self.step_async(operator).await;
                }
                self.state
            }
        }
    });

    quote! {
        impl #machine {
            /// Machine name.
            pub const NAME: &'static str = #machine_name;

            /// Graphviz rendering of the transition graph.
            pub const GRAPHVIZ: &'static str = #description;

            /// Creates the machine in `initial`.
            pub const fn new(initial: #state_enum) -> Self {
                Self { state: initial }
            }

            /// Returns the current state.
            pub const fn current(&self) -> #state_enum {
                self.state
            }

            /// Returns `true` once the machine sits in a terminal state.
            pub const fn is_terminal(&self) -> bool {
                self.state.is_terminal()
            }

            /// Calls the handler of the current state once and applies the event it returns.
            ///
            /// `Noop` leaves the state unchanged. In a terminal state no handler is called.
            pub fn step<O: #operator + ?Sized>(&mut self, operator: &mut O) -> #krate::Transition<#state_enum> {
                #step_body
            }

            /// Drives the machine until it reaches a terminal state.
            ///
            /// Handlers returning `Noop` are called again.
            pub fn operate<O: #operator + ?Sized>(&mut self, operator: &mut O) -> #state_enum {
                while !self.state.is_terminal() {
                    self.step(operator);
                }
                self.state
            }

            #async_methods
        }
    }
}

pub fn render_trait_impls(ir: &MachineIr) -> TokenStream {
    let machine = &ir.machine_ident;
    let state_enum = &ir.state_enum_ident;
    let krate = &ir.crate_path;

    quote! {
        impl #krate::Machine for #machine {
            type State = #state_enum;

            const NAME: &'static str = #machine::NAME;
            const STATES: &'static [#state_enum] = &#state_enum::ALL;
            const GRAPHVIZ: &'static str = #machine::GRAPHVIZ;

            fn current(&self) -> #state_enum {
                self.state
            }

            fn is_terminal(&self) -> bool {
                self.state.is_terminal()
            }
        }

        impl ::core::convert::From<#state_enum> for #machine {
            fn from(state: #state_enum) -> Self {
                Self::new(state)
            }
        }

        impl ::core::str::FromStr for #machine {
            type Err = #krate::UnknownState;

            fn from_str(s: &str) -> ::core::result::Result<Self, Self::Err> {
                s.parse::<#state_enum>().map(Self::new)
            }
        }
    }
}
