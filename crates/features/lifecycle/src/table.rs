use crate::state::{OrderState, Transition};

use OrderState::{Aborted, Completed, Created, Error, Executing, Planned, Suspended};

/// Every legal `(from, transition, to)` triple. Unlisted pairs are illegal.
///
/// `Completed` has no `Error` edge.
pub const TRANSITIONS: &[(OrderState, Transition, OrderState)] = &[
    (Created, Transition::Schedule, Planned),
    (Planned, Transition::Reset, Created),
    (Planned, Transition::StartProduction, Executing),
    (Executing, Transition::Reset, Planned),
    (Executing, Transition::Suspend, Suspended),
    (Suspended, Transition::Resume, Executing),
    (Executing, Transition::EndProduction, Completed),
    (Created, Transition::Error, Error),
    (Planned, Transition::Error, Error),
    (Executing, Transition::Error, Error),
    (Suspended, Transition::Error, Error),
    (Created, Transition::Abort, Aborted),
    (Planned, Transition::Abort, Aborted),
    (Executing, Transition::Abort, Aborted),
    (Suspended, Transition::Abort, Aborted),
    (Error, Transition::Abort, Aborted),
    (Error, Transition::ReturnToCreated, Created),
    (Error, Transition::ReturnToPlanned, Planned),
    (Error, Transition::ReturnToExecuting, Executing),
    (Error, Transition::ReturnToSuspended, Suspended),
    (Error, Transition::ReturnToCompleted, Completed),
];

/// Target state of `transition` applied in `from`, if the pair is listed.
#[must_use]
pub fn target(from: OrderState, transition: Transition) -> Option<OrderState> {
    TRANSITIONS.iter().find(|(f, t, _)| *f == from && *t == transition).map(|(_, _, to)| *to)
}

/// The transition leading from `from` to `to`. Each ordered pair has at most one.
#[must_use]
pub fn find_transition(from: OrderState, to: OrderState) -> Option<Transition> {
    TRANSITIONS.iter().find(|(f, _, t)| *f == from && *t == to).map(|(_, transition, _)| *transition)
}
