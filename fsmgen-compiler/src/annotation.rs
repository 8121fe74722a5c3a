//! Annotation parser.
//!
//! Grammar: `Entry ("," Entry)*` with `Entry = EventName ":" "\"" Destination "\""`.
//! An absent or blank annotation denotes a terminal state.

use std::collections::BTreeMap;

use fsmgen_core::NOOP;
use syn::Ident;

use crate::error::{CompileError, ErrorKind, Result};
use crate::extract::StateSkeleton;
use crate::graph::{EventDefinition, StateDefinition};

/// Default lower bound on event name length, in characters.
pub const DEFAULT_MIN_EVENT_LEN: usize = 2;

/// Knobs of the annotation grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsePolicy {
    pub min_event_len: usize,
}

impl Default for ParsePolicy {
    fn default() -> Self {
        Self {
            min_event_len: DEFAULT_MIN_EVENT_LEN,
        }
    }
}

/// Parses the annotation of one state.
pub fn parse(skeleton: &StateSkeleton, policy: &ParsePolicy) -> Result<StateDefinition> {
    let text = skeleton
        .annotation
        .as_deref()
        .map(str::trim)
        .filter(|text| !text.is_empty());
    let Some(text) = text else {
        return Ok(StateDefinition::terminal(
            skeleton.name.clone(),
            skeleton.location.clone(),
        ));
    };

    let state = skeleton.name.to_string();
    let fail = |kind: ErrorKind| Err(CompileError::new(kind, skeleton.location.clone()));
    let malformed = |entry: &str, reason: &'static str| {
        fail(ErrorKind::MalformedAnnotation {
            state: state.clone(),
            entry: entry.to_owned(),
            reason,
        })
    };

    let mut events: Vec<EventDefinition> = Vec::new();
    let mut destinations: BTreeMap<String, Vec<String>> = BTreeMap::new();

    for entry in text.split(',').map(str::trim) {
        let parts: Vec<&str> = entry.split(':').map(str::trim).collect();
        let [event, destination] = parts.as_slice() else {
            return malformed(entry, "expected `Event:\"Destination\"`");
        };
        if event.is_empty() {
            return malformed(entry, "event name is empty");
        }
        if destination.is_empty() {
            return malformed(entry, "destination is empty");
        }
        if event.chars().count() < policy.min_event_len {
            return fail(ErrorKind::EventNameTooShort {
                state: state.clone(),
                event: (*event).to_owned(),
                min: policy.min_event_len,
            });
        }
        if *event == NOOP {
            return fail(ErrorKind::ReservedEvent {
                state: state.clone(),
            });
        }
        let Ok(mut name) = syn::parse_str::<Ident>(event) else {
            return malformed(entry, "event name is not a valid identifier");
        };
        name.set_span(skeleton.location.span());

        let Some(destination) = unquote(destination) else {
            return malformed(entry, "destination must be a quoted string");
        };
        if destination.is_empty() {
            return malformed(entry, "destination is empty");
        }

        if events.iter().any(|existing| existing.name == *event) {
            return fail(ErrorKind::DuplicateEvent {
                state: state.clone(),
                event: (*event).to_owned(),
            });
        }

        destinations
            .entry(destination.to_owned())
            .or_default()
            .push((*event).to_owned());
        events.push(EventDefinition {
            name,
            destination: destination.to_owned(),
        });
    }

    Ok(StateDefinition {
        name: skeleton.name.clone(),
        is_terminal: false,
        events,
        destinations,
        location: skeleton.location.clone(),
    })
}

fn unquote(s: &str) -> Option<&str> {
    s.strip_prefix('"')?.strip_suffix('"')
}

/// Parses every skeleton in order, stopping at the first failure.
pub fn parse_all(skeletons: &[StateSkeleton], policy: &ParsePolicy) -> Result<Vec<StateDefinition>> {
    skeletons.iter().map(|s| parse(s, policy)).collect()
}

#[cfg(test)]
mod tests {
    use proc_macro2::Span;

    use super::*;
    use crate::error::Location;

    fn skeleton(name: &str, annotation: Option<&str>) -> StateSkeleton {
        StateSkeleton {
            name: Ident::new(name, Span::call_site()),
            annotation: annotation.map(str::to_owned),
            location: Location::call_site(),
        }
    }

    fn parse_default(name: &str, annotation: &str) -> Result<StateDefinition> {
        parse(&skeleton(name, Some(annotation)), &ParsePolicy::default())
    }

    #[test]
    fn parses_entries_in_order() {
        let state = parse_default(
            "Closed",
            r#"Failure:"Opened",Panic:"Terminal",Error:"Terminal""#,
        )
        .unwrap();
        assert!(!state.is_terminal);
        let events: Vec<_> = state
            .events
            .iter()
            .map(|e| (e.name.to_string(), e.destination.as_str()))
            .collect();
        assert_eq!(
            events,
            [
                ("Failure".to_owned(), "Opened"),
                ("Panic".to_owned(), "Terminal"),
                ("Error".to_owned(), "Terminal"),
            ]
        );
        assert_eq!(state.destinations["Terminal"], ["Panic", "Error"]);
        assert_eq!(state.destinations["Opened"], ["Failure"]);
    }

    #[test]
    fn whitespace_between_entries_is_ignored() {
        let state = parse_default("HalfOpened", r#" Success:"Closed", Failure : "Opened" "#).unwrap();
        assert_eq!(state.events.len(), 2);
        assert_eq!(state.events[1].name, "Failure");
        assert_eq!(state.events[1].destination, "Opened");
    }

    #[test]
    fn absent_or_blank_annotation_is_terminal() {
        for annotation in [None, Some(""), Some("   ")] {
            let state = parse(&skeleton("Terminal", annotation), &ParsePolicy::default()).unwrap();
            assert!(state.is_terminal);
            assert!(state.events.is_empty());
            assert!(state.destinations.is_empty());
        }
    }

    #[test]
    fn malformed_entries() {
        for annotation in [
            r#"Try"#,
            r#"Try:"A":"B""#,
            r#":"A""#,
            r#"Try:"#,
            r#"Try:A"#,
            r#"Try:"""#,
            r#"Try:"A","#,
            r#"fn:"A""#,
            r#"Not-Ident:"A""#,
        ] {
            let err = parse_default("S", annotation).unwrap_err();
            assert!(
                matches!(err.kind(), ErrorKind::MalformedAnnotation { .. }),
                "{annotation:?} gave {err}"
            );
        }
    }

    #[test]
    fn short_event_names_are_rejected_by_policy() {
        let err = parse_default("S", r#"A:"B""#).unwrap_err();
        assert_eq!(
            err.kind(),
            &ErrorKind::EventNameTooShort {
                state: "S".into(),
                event: "A".into(),
                min: 2,
            }
        );

        let strict = ParsePolicy { min_event_len: 3 };
        assert!(parse(&skeleton("S", Some(r#"Aa:"B""#)), &strict).is_err());
        assert!(parse(&skeleton("S", Some(r#"Try:"B""#)), &strict).is_ok());
    }

    #[test]
    fn noop_is_reserved() {
        let err = parse_default("Opened", r#"Try:"Closed",Noop:"Opened""#).unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::ReservedEvent { state: "Opened".into() });
    }

    #[test]
    fn duplicate_event_names_the_state_and_event() {
        let err = parse_default("First", r#"Aa:"Second", Aa:"Third""#).unwrap_err();
        assert_eq!(
            err.kind(),
            &ErrorKind::DuplicateEvent {
                state: "First".into(),
                event: "Aa".into(),
            }
        );
    }
}
