use quote::format_ident;
use syn::{Ident, Path};

use crate::naming;
use crate::validate::Machine;

/// Emission-ready view of a validated machine.
///
/// Holds every identifier the renderer needs, with states and events already
/// in their deterministic output order. Nothing here depends on token syntax.
#[derive(Debug, Clone)]
pub struct MachineIr {
    pub machine_ident: Ident,
    pub machine_name: String,
    pub state_enum_ident: Ident,
    pub operator_ident: Ident,
    /// Present when the async operator is requested.
    pub async_operator_ident: Option<Ident>,
    /// Path of the runtime crate in generated code.
    pub crate_path: Path,
    pub package: Option<String>,
    pub description: String,
    /// All states, lexicographic.
    pub states: Vec<StateIr>,
}

#[derive(Debug, Clone)]
pub struct StateIr {
    pub name: Ident,
    pub label: String,
    pub handler: Option<HandlerIr>,
}

/// Dispatch contract of a non-terminal state.
#[derive(Debug, Clone)]
pub struct HandlerIr {
    pub method: Ident,
    pub event_enum: Ident,
    /// Declared events, lexicographic. `Noop` is implicit.
    pub events: Vec<EventIr>,
}

#[derive(Debug, Clone)]
pub struct EventIr {
    pub name: Ident,
    pub label: String,
    pub destination: Ident,
}

impl StateIr {
    pub fn is_terminal(&self) -> bool {
        self.handler.is_none()
    }
}

impl MachineIr {
    pub fn new(machine: &Machine, description: String, crate_path: Path, asynchronous: bool) -> Self {
        let machine_ident = format_ident!("{}", machine.name());
        let state_enum_ident = naming::state_enum_ident(&machine_ident);

        let states = machine
            .states()
            .into_iter()
            .map(|state| {
                let label = state.name.to_string();
                let handler = (!state.is_terminal).then(|| HandlerIr {
                    method: format_ident!("{}", naming::handler_name(&label), span = state.name.span()),
                    event_enum: naming::event_enum_ident(&machine_ident, &state.name),
                    events: machine
                        .outgoing(&label)
                        .into_iter()
                        .map(|outgoing| EventIr {
                            name: outgoing.event.name.clone(),
                            label: outgoing.event.name.to_string(),
                            destination: outgoing.destination.name.clone(),
                        })
                        .collect(),
                });
                StateIr {
                    name: state.name.clone(),
                    label,
                    handler,
                }
            })
            .collect();

        Self {
            machine_name: machine_ident.to_string(),
            operator_ident: naming::operator_ident(&machine_ident),
            async_operator_ident: asynchronous.then(|| naming::async_operator_ident(&machine_ident)),
            state_enum_ident,
            machine_ident,
            crate_path,
            package: machine.package().map(str::to_owned),
            description,
            states,
        }
    }

    /// Non-terminal states with their dispatch contracts.
    pub fn handlers(&self) -> impl Iterator<Item = (&StateIr, &HandlerIr)> {
        self.states
            .iter()
            .filter_map(|state| state.handler.as_ref().map(|handler| (state, handler)))
    }

    pub fn terminal_states(&self) -> impl Iterator<Item = &StateIr> {
        self.states.iter().filter(|state| state.is_terminal())
    }
}
