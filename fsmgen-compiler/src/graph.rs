//! Graph builder: folds per-state parse results into one machine definition.

use std::collections::{BTreeMap, HashMap};

use syn::Ident;

use crate::error::{CompileError, ErrorKind, Location, Result};

/// One outgoing transition of a state.
#[derive(Debug, Clone)]
pub struct EventDefinition {
    pub name: Ident,
    pub destination: String,
}

/// A state and its outgoing events, scoped to the state.
#[derive(Debug, Clone)]
pub struct StateDefinition {
    pub name: Ident,
    /// `true` iff the state declared no annotation.
    pub is_terminal: bool,
    /// Outgoing events in annotation order.
    pub events: Vec<EventDefinition>,
    /// Reverse index: destination state to the events that target it.
    pub destinations: BTreeMap<String, Vec<String>>,
    pub location: Location,
}

impl StateDefinition {
    pub fn terminal(name: Ident, location: Location) -> Self {
        Self {
            name,
            is_terminal: true,
            events: Vec::new(),
            destinations: BTreeMap::new(),
            location,
        }
    }

    /// Destination recorded for `event`, if the state declares it.
    pub fn destination(&self, event: &str) -> Option<&str> {
        self.events
            .iter()
            .find(|e| e.name == event)
            .map(|e| e.destination.as_str())
    }
}

/// All states of one machine, keyed by name, in declaration order.
///
/// Built fresh for every compilation and read-only once built.
#[derive(Debug, Clone)]
pub struct MachineDefinition {
    name: Ident,
    package: Option<String>,
    states: Vec<StateDefinition>,
    index: HashMap<String, usize>,
}

impl MachineDefinition {
    /// Assembles the definition. State names must be unique.
    pub fn build(name: Ident, package: Option<String>, states: Vec<StateDefinition>) -> Result<Self> {
        let mut index = HashMap::with_capacity(states.len());
        for (position, state) in states.iter().enumerate() {
            if index.insert(state.name.to_string(), position).is_some() {
                return Err(CompileError::new(
                    ErrorKind::DuplicateState {
                        state: state.name.to_string(),
                    },
                    state.location.clone(),
                ));
            }
        }

        tracing::debug!(
            machine = %name,
            states = states.len(),
            "built machine definition"
        );

        Ok(Self {
            name,
            package,
            states,
            index,
        })
    }

    pub fn name(&self) -> &Ident {
        &self.name
    }

    /// Opaque namespace context, passed through to emission.
    pub fn package(&self) -> Option<&str> {
        self.package.as_deref()
    }

    /// States in declaration order.
    pub fn states(&self) -> &[StateDefinition] {
        &self.states
    }

    pub fn state(&self, name: &str) -> Option<&StateDefinition> {
        self.position(name).map(|i| &self.states[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub(crate) fn position(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }
}

/// Sorts items lexicographically by name.
///
/// Every place that enumerates states or events for output goes through here.
pub fn lexicographic<T>(items: &mut [T], name: impl Fn(&T) -> String) {
    items.sort_by_cached_key(name);
}
