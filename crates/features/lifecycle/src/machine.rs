use crate::state::{OrderState, Transition};
use crate::table;
use tracing::trace;

/// Holds one [`OrderState`] and moves it along the transition table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StateMachine {
    state: OrderState,
}

impl StateMachine {
    #[must_use]
    pub const fn new(initial: OrderState) -> Self {
        Self { state: initial }
    }

    #[must_use]
    pub const fn state(&self) -> OrderState {
        self.state
    }

    #[must_use]
    pub fn can_apply(&self, transition: Transition) -> bool {
        table::target(self.state, transition).is_some()
    }

    /// Applies `transition` if the table lists it for the current state.
    pub fn try_apply(&mut self, transition: Transition) -> bool {
        match table::target(self.state, transition) {
            Some(next) => {
                trace!(from = %self.state, to = %next, %transition, "transition applied");
                self.state = next;
                true
            },
            None => {
                trace!(state = %self.state, %transition, "transition rejected");
                false
            },
        }
    }

    /// Sets the state directly, bypassing the table.
    pub const fn force_set(&mut self, state: OrderState) {
        self.state = state;
    }

    /// The transition that would move this machine to `target`, if any.
    #[must_use]
    pub fn transition_to(&self, target: OrderState) -> Option<Transition> {
        table::find_transition(self.state, target)
    }
}

impl Default for StateMachine {
    fn default() -> Self {
        Self::new(OrderState::Created)
    }
}

/// Capability of anything that carries a lifecycle.
pub trait Stateful {
    fn machine(&self) -> &StateMachine;

    fn machine_mut(&mut self) -> &mut StateMachine;

    fn state(&self) -> OrderState {
        self.machine().state()
    }

    fn can_apply(&self, transition: Transition) -> bool {
        self.machine().can_apply(transition)
    }

    fn try_apply(&mut self, transition: Transition) -> bool {
        self.machine_mut().try_apply(transition)
    }
}

impl Stateful for StateMachine {
    fn machine(&self) -> &StateMachine {
        self
    }

    fn machine_mut(&mut self) -> &mut StateMachine {
        self
    }
}
