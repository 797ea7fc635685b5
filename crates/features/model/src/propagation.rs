//! Lifecycle facets on tree nodes and action-to-step status propagation.
//!
//! After every successful state change of an action, the owning step is offered
//! the action's new state. The step moves only if its table has an edge from its
//! current state to that target (and, for `EndProduction`, only once every owned
//! action is completed). Otherwise the step stays where it is.

use crate::facet::{ActionFacet, Facet, Role, StepFacet};
use crate::node::Node;
use crate::tree::{NodeId, Tree};
use tracing::debug;
use twin_domain::status::{ActionStatus, StepStatus};
use twin_lifecycle::{OrderState, StateMachine, Stateful, Transition, find_transition};

impl Tree {
    /// Turns `step` into a step with its actions held by the `actions` container.
    ///
    /// `actions` must be a container directly under `step`. The initial state is set
    /// directly from `initial`. Action nodes already inside `actions` become owned by
    /// `step`. `status` is kept in sync with the state label.
    pub fn attach_step(
        &mut self,
        step: NodeId,
        actions: NodeId,
        status: Option<NodeId>,
        initial: StepStatus,
    ) -> bool {
        if !self.contains(step)
            || !self.get(actions).is_some_and(Node::is_container)
            || self.parent(actions) != Some(step)
            || status.is_some_and(|status| !self.contains(status))
        {
            return false;
        }

        let facet = StepFacet { machine: StateMachine::new(initial.into()), actions, status };
        if let Some(entry) = self.entry_mut(step) {
            entry.facet = Some(Facet::Step(facet));
        }
        for action in self.children(actions).to_vec() {
            self.set_owner(action, Some(step));
        }
        self.sync_status(step);
        true
    }

    /// Turns `action` into an action, owned by a step if it already sits in one.
    pub fn attach_action(
        &mut self,
        action: NodeId,
        status: Option<NodeId>,
        initial: ActionStatus,
    ) -> bool {
        if !self.contains(action) || status.is_some_and(|status| !self.contains(status)) {
            return false;
        }

        let owner = self.owning_step(action);
        let facet = ActionFacet { machine: StateMachine::new(initial.into()), owner, status };
        if let Some(entry) = self.entry_mut(action) {
            entry.facet = Some(Facet::Action(facet));
        }
        self.sync_status(action);
        true
    }

    /// Adds `action` to the step's actions container, which also sets its owner link.
    pub fn link_action(&mut self, step: NodeId, action: NodeId) -> bool {
        match self.facet(step) {
            Some(Facet::Step(facet)) => {
                let container = facet.actions;
                self.add(container, action)
            },
            _ => false,
        }
    }

    #[must_use]
    pub fn role(&self, id: NodeId) -> Option<Role> {
        self.facet(id).map(Facet::role)
    }

    #[must_use]
    pub fn state(&self, id: NodeId) -> Option<OrderState> {
        self.facet(id).map(Stateful::state)
    }

    /// The step owning `action`, if attached.
    #[must_use]
    pub fn owner(&self, action: NodeId) -> Option<NodeId> {
        match self.facet(action)? {
            Facet::Action(facet) => facet.owner,
            Facet::Step(_) => None,
        }
    }

    /// Actions owned by `step`, in container order.
    #[must_use]
    pub fn actions(&self, step: NodeId) -> Vec<NodeId> {
        let Some(Facet::Step(facet)) = self.facet(step) else {
            return Vec::new();
        };
        self.children(facet.actions)
            .iter()
            .copied()
            .filter(|child| self.role(*child) == Some(Role::Action))
            .collect()
    }

    /// `true` when every action owned by `step` is `Completed` (vacuously for none).
    #[must_use]
    pub fn actions_completed(&self, step: NodeId) -> bool {
        self.actions(step).into_iter().all(|action| self.state(action) == Some(OrderState::Completed))
    }

    /// Whether [`Tree::apply`] would succeed, including the step guard.
    #[must_use]
    pub fn can_apply(&self, id: NodeId, transition: Transition) -> bool {
        match self.facet(id) {
            Some(facet @ Facet::Step(_)) => {
                facet.can_apply(transition)
                    && (transition != Transition::EndProduction || self.actions_completed(id))
            },
            Some(facet @ Facet::Action(_)) => facet.can_apply(transition),
            None => false,
        }
    }

    /// Applies `transition` to a step or action.
    ///
    /// Returns `false` for illegal transitions, a blocked `EndProduction`, and nodes
    /// without a lifecycle. A successful action transition is propagated to its step.
    pub fn apply(&mut self, id: NodeId, transition: Transition) -> bool {
        match self.role(id) {
            Some(Role::Step) => self.apply_step(id, transition),
            Some(Role::Action) => {
                if !self.machine_mut(id).is_some_and(|machine| machine.try_apply(transition)) {
                    return false;
                }
                self.sync_status(id);
                self.propagate(id);
                true
            },
            None => false,
        }
    }

    /// Sets the state directly, bypassing the table. Actions still propagate.
    pub fn force_state(&mut self, id: NodeId, state: OrderState) -> bool {
        let Some(machine) = self.machine_mut(id) else {
            return false;
        };
        machine.force_set(state);
        self.sync_status(id);
        if self.role(id) == Some(Role::Action) {
            self.propagate(id);
        }
        true
    }

    /// Moves a step to `status` through the single table edge leading there.
    ///
    /// Already being in `status` counts as success.
    pub fn set_step_status(&mut self, step: NodeId, status: StepStatus) -> bool {
        if self.role(step) != Some(Role::Step) {
            return false;
        }
        let target = OrderState::from(status);
        let Some(current) = self.state(step) else {
            return false;
        };
        if current == target {
            return true;
        }
        find_transition(current, target).is_some_and(|transition| self.apply_step(step, transition))
    }

    fn apply_step(&mut self, step: NodeId, transition: Transition) -> bool {
        if transition == Transition::EndProduction && !self.actions_completed(step) {
            debug!(step = self.label_of(step), "end of production blocked by unfinished actions");
            return false;
        }
        let applied = self.machine_mut(step).is_some_and(|machine| machine.try_apply(transition));
        if applied {
            self.sync_status(step);
        }
        applied
    }

    fn propagate(&mut self, action: NodeId) {
        let (Some(step), Some(target)) = (self.owner(action), self.state(action)) else {
            return;
        };
        let Some(current) = self.state(step) else {
            return;
        };

        match find_transition(current, target) {
            Some(transition) => {
                let applied = self.apply_step(step, transition);
                debug!(
                    action = self.label_of(action),
                    step = self.label_of(step),
                    %transition,
                    applied,
                    "propagated action state"
                );
            },
            None => debug!(
                action = self.label_of(action),
                step = self.label_of(step),
                from = %current,
                to = %target,
                "no step transition for action state"
            ),
        }
    }

    /// Re-derives the owner link of every action under `root` after an add.
    pub(crate) fn adopt(&mut self, root: NodeId) {
        for id in self.descendants(root) {
            if self.role(id) == Some(Role::Action) {
                let owner = self.owning_step(id);
                self.set_owner(id, owner);
            }
        }
    }

    /// Clears the owner link of every action under `root` whose step is gone.
    pub(crate) fn release(&mut self, root: NodeId) {
        for id in self.descendants(root) {
            if self.role(id) == Some(Role::Action) && self.owning_step(id).is_none() {
                self.set_owner(id, None);
            }
        }
    }

    fn owning_step(&self, action: NodeId) -> Option<NodeId> {
        let container = self.parent(action)?;
        let step = self.parent(container)?;
        match self.facet(step)? {
            Facet::Step(facet) if facet.actions == container => Some(step),
            _ => None,
        }
    }

    fn set_owner(&mut self, action: NodeId, owner: Option<NodeId>) {
        if let Some(Facet::Action(facet)) = self.entry_mut(action).and_then(|e| e.facet.as_mut()) {
            facet.owner = owner;
        }
    }

    fn machine_mut(&mut self, id: NodeId) -> Option<&mut StateMachine> {
        self.entry_mut(id)?.facet.as_mut().map(|facet| facet.machine_mut())
    }

    fn sync_status(&mut self, id: NodeId) {
        let Some((status, label)) =
            self.facet(id).and_then(|facet| Some((facet.status_node()?, facet.label())))
        else {
            return;
        };
        if let Some(node) = self.get_mut(status) {
            node.set_scalar(label);
        }
    }

    fn label_of(&self, id: NodeId) -> &str {
        self.get(id).map_or("", Node::id_short)
    }
}
