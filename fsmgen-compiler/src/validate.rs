//! Graph validation and the validated machine.
//!
//! Validation is structural only: every destination must resolve to a state of
//! the same machine. Reachability is not checked; states nothing points at are
//! accepted as they are.

use std::collections::HashMap;

use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use syn::Ident;

use crate::error::{CompileError, ErrorKind, Result};
use crate::graph::{EventDefinition, MachineDefinition, StateDefinition, lexicographic};
use crate::naming;

/// Outgoing transition of a validated state.
#[derive(Debug, Clone, Copy)]
pub struct Outgoing<'a> {
    pub event: &'a EventDefinition,
    pub destination: &'a StateDefinition,
}

/// A machine whose transition graph is closed.
///
/// Nodes carry the position of a state in the definition, edges the position
/// of the event within its source state.
#[derive(Debug, Clone)]
pub struct Machine {
    definition: MachineDefinition,
    graph: DiGraph<usize, usize>,
}

/// Checks the graph invariants and resolves every transition.
///
/// Reports the first dangling reference in declaration order, with every event
/// of that state pointing at the missing destination.
pub fn validate(definition: MachineDefinition) -> Result<Machine> {
    let states = definition.states();
    let mut graph = DiGraph::with_capacity(states.len(), states.iter().map(|s| s.events.len()).sum());
    let nodes: Vec<NodeIndex> = (0..states.len()).map(|i| graph.add_node(i)).collect();

    for (source, state) in states.iter().enumerate() {
        for (position, event) in state.events.iter().enumerate() {
            let Some(target) = definition.position(&event.destination) else {
                return Err(CompileError::new(
                    ErrorKind::DanglingReference {
                        state: state.name.to_string(),
                        destination: event.destination.clone(),
                        events: state
                            .destinations
                            .get(&event.destination)
                            .cloned()
                            .unwrap_or_else(|| vec![event.name.to_string()]),
                    },
                    state.location.clone(),
                ));
            };
            graph.add_edge(nodes[source], nodes[target], position);
        }
    }

    verify_reserved_names(states)?;
    verify_handler_names(states)?;

    tracing::debug!(
        machine = %definition.name(),
        states = graph.node_count(),
        transitions = graph.edge_count(),
        "validated transition graph"
    );

    Ok(Machine { definition, graph })
}

fn verify_reserved_names(states: &[StateDefinition]) -> Result<()> {
    for state in states {
        let label = state.name.to_string();
        let clash = naming::RESERVED_STATE_NAMES
            .contains(&label.as_str())
            .then(|| label.clone())
            .or_else(|| {
                state
                    .events
                    .iter()
                    .map(|event| event.name.to_string())
                    .find(|event| naming::RESERVED_EVENT_NAMES.contains(&event.as_str()))
            });
        if let Some(name) = clash {
            return Err(CompileError::new(
                ErrorKind::ReservedName { state: label, name },
                state.location.clone(),
            ));
        }
    }
    Ok(())
}

fn verify_handler_names(states: &[StateDefinition]) -> Result<()> {
    let mut seen: HashMap<String, &StateDefinition> = HashMap::new();
    for state in states.iter().filter(|s| !s.is_terminal) {
        let method = naming::handler_name(&state.name.to_string());
        if let Some(first) = seen.insert(method.clone(), state) {
            return Err(CompileError::new(
                ErrorKind::HandlerCollision {
                    first: first.name.to_string(),
                    second: state.name.to_string(),
                    method,
                },
                state.location.clone(),
            ));
        }
    }
    Ok(())
}

impl Machine {
    pub fn name(&self) -> &Ident {
        self.definition.name()
    }

    pub fn package(&self) -> Option<&str> {
        self.definition.package()
    }

    pub fn definition(&self) -> &MachineDefinition {
        &self.definition
    }

    /// Every state, in lexicographic order.
    pub fn states(&self) -> Vec<&StateDefinition> {
        let mut states: Vec<_> = self.definition.states().iter().collect();
        lexicographic(&mut states, |s| s.name.to_string());
        states
    }

    /// Non-terminal states, in lexicographic order.
    pub fn operable_states(&self) -> Vec<&StateDefinition> {
        self.states().into_iter().filter(|s| !s.is_terminal).collect()
    }

    /// Outgoing transitions of `state`, in lexicographic event order.
    pub fn outgoing(&self, state: &str) -> Vec<Outgoing<'_>> {
        let Some(position) = self.definition.position(state) else {
            return Vec::new();
        };
        let states = self.definition.states();
        let mut outgoing: Vec<_> = self
            .graph
            .edges(NodeIndex::new(position))
            .map(|edge| Outgoing {
                event: &states[position].events[*edge.weight()],
                destination: &states[self.graph[edge.target()]],
            })
            .collect();
        lexicographic(&mut outgoing, |o| o.event.name.to_string());
        outgoing
    }

    /// Transitions that lead into `state` as `(source, event)` pairs, ordered by
    /// source then event.
    pub fn incoming(&self, state: &str) -> Vec<(&StateDefinition, &EventDefinition)> {
        let Some(position) = self.definition.position(state) else {
            return Vec::new();
        };
        let states = self.definition.states();
        let mut incoming: Vec<_> = self
            .graph
            .edges_directed(NodeIndex::new(position), Direction::Incoming)
            .map(|edge| {
                let source = &states[self.graph[edge.source()]];
                (source, &source.events[*edge.weight()])
            })
            .collect();
        lexicographic(&mut incoming, |(source, event)| format!("{}\0{}", source.name, event.name));
        incoming
    }

    /// Number of `(state, event)` transitions.
    pub fn transition_count(&self) -> usize {
        self.graph.edge_count()
    }
}
