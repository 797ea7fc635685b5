use crate::tree::NodeId;
use twin_domain::status::{ActionStatus, StepStatus};
use twin_lifecycle::{StateMachine, Stateful};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Step,
    Action,
}

/// Lifecycle attached to a step node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepFacet {
    pub(crate) machine: StateMachine,
    pub(crate) actions: NodeId,
    pub(crate) status: Option<NodeId>,
}

impl StepFacet {
    /// The container holding the step's actions.
    #[must_use]
    pub const fn actions(&self) -> NodeId {
        self.actions
    }
}

/// Lifecycle attached to an action node.
///
/// `owner` is a lookup-only link to the step whose actions container holds this node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionFacet {
    pub(crate) machine: StateMachine,
    pub(crate) owner: Option<NodeId>,
    pub(crate) status: Option<NodeId>,
}

impl ActionFacet {
    #[must_use]
    pub const fn owner(&self) -> Option<NodeId> {
        self.owner
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Facet {
    Step(StepFacet),
    Action(ActionFacet),
}

impl Facet {
    #[must_use]
    pub const fn role(&self) -> Role {
        match self {
            Self::Step(_) => Role::Step,
            Self::Action(_) => Role::Action,
        }
    }

    /// The `Status` property mirrored from the machine state, if any.
    #[must_use]
    pub const fn status_node(&self) -> Option<NodeId> {
        match self {
            Self::Step(facet) => facet.status,
            Self::Action(facet) => facet.status,
        }
    }

    /// Wire label of the current state.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Step(facet) => StepStatus::from(facet.state()).as_str(),
            Self::Action(facet) => ActionStatus::from(facet.state()).as_str(),
        }
    }
}

impl Stateful for StepFacet {
    fn machine(&self) -> &StateMachine {
        &self.machine
    }

    fn machine_mut(&mut self) -> &mut StateMachine {
        &mut self.machine
    }
}

impl Stateful for ActionFacet {
    fn machine(&self) -> &StateMachine {
        &self.machine
    }

    fn machine_mut(&mut self) -> &mut StateMachine {
        &mut self.machine
    }
}

impl Stateful for Facet {
    fn machine(&self) -> &StateMachine {
        match self {
            Self::Step(facet) => facet.machine(),
            Self::Action(facet) => facet.machine(),
        }
    }

    fn machine_mut(&mut self) -> &mut StateMachine {
        match self {
            Self::Step(facet) => facet.machine_mut(),
            Self::Action(facet) => facet.machine_mut(),
        }
    }
}
