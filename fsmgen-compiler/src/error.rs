//! Compilation errors.
//!
//! Every failure is fatal for the machine being compiled. Errors carry the
//! offending identifiers and the source position they were detected at.

use std::fmt;
use std::path::{Path, PathBuf};

use proc_macro2::Span;

/// Result alias used throughout the compiler.
pub type Result<T, E = CompileError> = std::result::Result<T, E>;

/// Source position attached to a diagnostic.
///
/// The span is opaque to the pipeline; front-ends decide what it points at.
/// The file is only known when declarations are read from disk.
#[derive(Debug, Clone)]
pub struct Location {
    span: Span,
    file: Option<PathBuf>,
}

impl Location {
    pub fn new(span: Span) -> Self {
        Self { span, file: None }
    }

    pub fn call_site() -> Self {
        Self::new(Span::call_site())
    }

    #[must_use]
    pub fn with_file(mut self, file: impl Into<PathBuf>) -> Self {
        self.file = Some(file.into());
        self
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn file(&self) -> Option<&Path> {
        self.file.as_deref()
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let start = self.span.start();
        match &self.file {
            Some(file) => write!(f, "{}:{}:{}", file.display(), start.line, start.column + 1),
            None => write!(f, "line {}, column {}", start.line, start.column + 1),
        }
    }
}

/// What went wrong, independent of where.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ErrorKind {
    #[error("declaration `{name}` not found")]
    MissingDeclaration { name: String },

    #[error("declaration `{name}` is {kind}, expected a struct with named fields")]
    UnsupportedKind { name: String, kind: &'static str },

    #[error("declaration `{name}` is incomplete or has zero fields")]
    NoFields { name: String },

    #[error("state `{state}` is declared as a raw identifier; state names must be plain identifiers")]
    RawStateName { state: String },

    #[error("state `{state}` is declared more than once")]
    DuplicateState { state: String },

    #[error("field must declare exactly one name, found {}", .names.len())]
    MalformedField { names: Vec<String> },

    #[error("unsupported annotation format `{entry}` on state `{state}`: {reason}")]
    MalformedAnnotation {
        state: String,
        entry: String,
        reason: &'static str,
    },

    #[error("event `{event}` on state `{state}` is shorter than {min} characters")]
    EventNameTooShort {
        state: String,
        event: String,
        min: usize,
    },

    #[error("event `Noop` is reserved by the system (state `{state}`)")]
    ReservedEvent { state: String },

    #[error("event `{event}` duplicate on state `{state}`")]
    DuplicateEvent { state: String, event: String },

    #[error(
        "({state}) -[{}]-> ({destination}) is declared, but there is no such destination state as `{destination}`",
        .events.join(", ")
    )]
    DanglingReference {
        state: String,
        destination: String,
        events: Vec<String>,
    },

    #[error(
        "unsupported type name `{name}`: type name should have `Declaration` suffix and at least {min} characters"
    )]
    NamingPolicy { name: String, min: usize },

    #[error("states `{first}` and `{second}` both map to handler `{method}`")]
    HandlerCollision {
        first: String,
        second: String,
        method: String,
    },

    #[error("`{name}` (state `{state}`) clashes with a generated associated item of the same name")]
    ReservedName { state: String, name: String },

    #[error("generated code for `{machine}` could not be formatted: {message}")]
    Render { machine: String, message: String },
}

/// A fatal diagnostic: an [`ErrorKind`] at a [`Location`].
#[derive(Debug, Clone, thiserror::Error)]
#[error("{kind} ({location})")]
pub struct CompileError {
    kind: ErrorKind,
    location: Location,
}

impl CompileError {
    pub fn new(kind: ErrorKind, location: Location) -> Self {
        Self { kind, location }
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    /// Records the file the declaration was read from.
    #[must_use]
    pub fn in_file(mut self, file: impl Into<PathBuf>) -> Self {
        self.location = self.location.with_file(file);
        self
    }

    /// Converts into a spanned `syn::Error` for `compile_error!` output.
    pub fn to_syn_error(&self) -> syn::Error {
        syn::Error::new(self.location.span, &self.kind)
    }
}

impl From<CompileError> for syn::Error {
    fn from(err: CompileError) -> Self {
        err.to_syn_error()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dangling_reference_lists_every_offending_event() {
        let kind = ErrorKind::DanglingReference {
            state: "Second".into(),
            destination: "Fourth".into(),
            events: vec!["Zz".into(), "Yy".into()],
        };
        assert_eq!(
            kind.to_string(),
            "(Second) -[Zz, Yy]-> (Fourth) is declared, but there is no such destination state as `Fourth`"
        );
    }

    #[test]
    fn location_includes_file_when_known() {
        let location = Location::call_site().with_file("src/cbm.rs");
        assert!(location.to_string().starts_with("src/cbm.rs:"));
        assert_eq!(location.file(), Some(Path::new("src/cbm.rs")));
    }
}
