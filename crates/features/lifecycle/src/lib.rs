//! # Order Lifecycle
//!
//! A seven-state machine driven by named transitions. The transition table is the
//! only source of legality: [`StateMachine::try_apply`] never fails loudly, it
//! returns `false` and leaves the state untouched.
//!
//! Guards that depend on data outside the machine (a step may only end production
//! once all of its actions are completed) are layered on top by the caller.
//!
//! ```rust
//! use twin_lifecycle::{OrderState, StateMachine, Transition};
//!
//! let mut machine = StateMachine::new(OrderState::Created);
//! assert!(machine.try_apply(Transition::Schedule));
//! assert!(!machine.try_apply(Transition::Resume));
//! assert_eq!(machine.state(), OrderState::Planned);
//! ```

mod machine;
mod mapping;
mod state;
mod table;

pub use machine::{StateMachine, Stateful};
pub use state::{OrderState, Transition};
pub use table::{TRANSITIONS, find_transition, target};
