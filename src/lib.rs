//! # fsmgen
//!
//! Compile annotated struct declarations into exhaustive, type-checked finite
//! state machines.
//!
//! A declaration lists every state as a field. The `on` attribute of a field
//! names the events that leave the state and where each one leads; a field
//! without it is a terminal state. The generated code gives every non-terminal
//! state its own event enum and handler method, so a handler can only return
//! events that are valid in its state.
//!
//! ## Example
//!
//! ```rust
//! use fsmgen::{Machine, fsm};
//!
//! #[fsm]
//! struct CbmDeclaration {
//!     #[on = r#"Try:"HalfOpened""#]
//!     Opened: (),
//!     #[on = r#"Success:"Closed",Failure:"Opened""#]
//!     HalfOpened: (),
//!     #[on = r#"Failure:"Opened",Panic:"Terminal",Error:"Terminal""#]
//!     Closed: (),
//!     Terminal: (),
//! }
//!
//! struct Breaker {
//!     failures: u32,
//! }
//!
//! impl CbmOperator for Breaker {
//!     fn operate_closed(&mut self) -> CbmClosedEvent {
//!         if self.failures > 1 {
//!             CbmClosedEvent::Panic
//!         } else {
//!             CbmClosedEvent::Failure
//!         }
//!     }
//!
//!     fn operate_half_opened(&mut self) -> CbmHalfOpenedEvent {
//!         self.failures += 1;
//!         CbmHalfOpenedEvent::Success
//!     }
//!
//!     fn operate_opened(&mut self) -> CbmOpenedEvent {
//!         CbmOpenedEvent::Try
//!     }
//! }
//!
//! let mut machine = Cbm::new(CbmState::Opened);
//! let end = machine.operate(&mut Breaker { failures: 0 });
//! assert_eq!(end, CbmState::Terminal);
//! assert!(machine.is_terminal());
//! assert!(<Cbm as Machine>::GRAPHVIZ.starts_with("digraph Cbm {"));
//! ```
//!
//! ## Compile-time guarantees
//!
//! An operator has to handle every non-terminal state:
//!
//! ```compile_fail
//! #[fsmgen::fsm]
//! struct DoorDeclaration {
//!     #[on = r#"Close:"Closed""#]
//!     Open: (),
//!     #[on = r#"Open:"Open""#]
//!     Closed: (),
//! }
//!
//! struct Porter;
//!
//! impl DoorOperator for Porter {
//!     fn operate_open(&mut self) -> DoorOpenEvent {
//!         DoorOpenEvent::Close
//!     }
//! }
//! ```
//!
//! and a handler cannot return an event declared for another state:
//!
//! ```compile_fail
//! #[fsmgen::fsm]
//! struct DoorDeclaration {
//!     #[on = r#"Close:"Closed""#]
//!     Open: (),
//!     #[on = r#"Open:"Open""#]
//!     Closed: (),
//! }
//!
//! struct Porter;
//!
//! impl DoorOperator for Porter {
//!     fn operate_open(&mut self) -> DoorOpenEvent {
//!         DoorClosedEvent::Open
//!     }
//!
//!     fn operate_closed(&mut self) -> DoorClosedEvent {
//!         DoorClosedEvent::Open
//!     }
//! }
//! ```
//!
//! Declarations that break the grammar or point at undeclared states are
//! rejected when the macro expands:
//!
//! ```compile_fail
//! #[fsmgen::fsm]
//! struct DoorDeclaration {
//!     #[on = r#"Close:"Shut""#]
//!     Open: (),
//!     Closed: (),
//! }
//! ```

#[doc(inline)]
pub use fsmgen_core::*;
#[doc(inline)]
pub use fsmgen_macros::*;
