//! Core runtime types for fsmgen.
//!
//! Generated machines are plain Rust: a state enum, one event enum per
//! non-terminal state and a handler trait. The few types they share live here.

use std::fmt;
use std::str::FromStr;

/// Event name reserved for "no transition occurred".
///
/// Every generated event enum carries a `Noop` variant, so declarations may not
/// use this name themselves.
pub const NOOP: &str = "Noop";

/// A state machine produced by the `fsm` macro or the `fsmgen` command.
pub trait Machine {
    /// State enumeration of the machine.
    type State: Copy + Eq + fmt::Debug + fmt::Display + FromStr<Err = UnknownState> + 'static;

    /// Machine name, as derived from the declaration.
    const NAME: &'static str;

    /// Every state, in lexicographic order.
    const STATES: &'static [Self::State];

    /// Graphviz rendering of the transition graph.
    const GRAPHVIZ: &'static str;

    /// Returns the state the machine is currently in.
    fn current(&self) -> Self::State;

    /// Returns `true` when the current state has no outgoing events.
    fn is_terminal(&self) -> bool;
}

/// Record of a single dispatch step.
///
/// Returned by the generated `step` methods. A `Noop` step has `from == to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition<S> {
    /// State the handler was called in.
    pub from: S,
    /// Name of the event returned by the handler.
    pub event: &'static str,
    /// State after applying the event.
    pub to: S,
}

impl<S> Transition<S> {
    /// Creates a new transition record.
    #[must_use]
    pub const fn new(from: S, event: &'static str, to: S) -> Self {
        Self { from, event, to }
    }

    /// Returns `true` if the handler reported the reserved `Noop` event.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.event == NOOP
    }

    /// Extracts the state reached by this step.
    #[must_use]
    pub fn into_state(self) -> S {
        self.to
    }
}

/// Error returned when parsing a state name that the machine does not declare.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown state `{name}` for machine `{machine}`")]
pub struct UnknownState {
    /// Machine the lookup was made against.
    pub machine: &'static str,
    /// The rejected input.
    pub name: String,
}

impl UnknownState {
    /// Creates the error for `name` on `machine`.
    pub fn new(machine: &'static str, name: impl Into<String>) -> Self {
        Self {
            machine,
            name: name.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noop_transition_is_detected() {
        let step = Transition::new(1u8, NOOP, 1u8);
        assert!(step.is_noop());
        assert_eq!(step.into_state(), 1);

        let step = Transition::new(1u8, "Try", 2u8);
        assert!(!step.is_noop());
    }

    #[test]
    fn unknown_state_message_names_machine_and_input() {
        let err = UnknownState::new("Cbm", "Ajar");
        assert_eq!(err.to_string(), "unknown state `Ajar` for machine `Cbm`");
    }
}
