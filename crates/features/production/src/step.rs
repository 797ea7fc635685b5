use crate::action::{Action, ActionSpec};
use crate::elements::{append, append_collection, append_string, child, refill, scalar, semantic};
use crate::scheduling::{SCHEDULING, Scheduling, SchedulingField, SchedulingValues};
use tracing::debug;
use twin_domain::semantics::{
    STEP, STEP_ACTIONS, STEP_ENTERPRISE, STEP_FINAL_STATE, STEP_INITIAL_STATE, STEP_STATION,
    STEP_STATUS, STEP_TITLE, STEP_WORKCENTRE,
};
use twin_domain::status::{ActionStatus, StepStatus};
use twin_model::{Node, NodeId, Role, Transition, Tree};
use typed_builder::TypedBuilder;

pub(crate) const STEP_TITLE_ID: &str = "StepTitle";
pub(crate) const STATUS_ID: &str = "Status";
pub(crate) const ACTIONS_ID: &str = "Actions";
pub(crate) const STATION_ID: &str = "Station";
pub(crate) const INITIAL_STATE_ID: &str = "InitialState";
pub(crate) const FINAL_STATE_ID: &str = "FinalState";
pub(crate) const ENTERPRISE_ID: &str = "Enterprise";
pub(crate) const WORKCENTRE_ID: &str = "Workcentre";

/// Everything needed to build a step collection.
#[derive(Debug, Clone, TypedBuilder)]
pub struct StepSpec {
    #[builder(setter(into))]
    pub id_short: String,
    #[builder(default, setter(into))]
    pub title: String,
    #[builder(default)]
    pub status: StepStatus,
    #[builder(default, setter(into))]
    pub station: String,
    #[builder(default)]
    pub scheduling: SchedulingValues,
    #[builder(default, setter(into))]
    pub enterprise: String,
    #[builder(default, setter(into))]
    pub workcentre: String,
    #[builder(default)]
    pub actions: Vec<ActionSpec>,
}

/// Which of the two state snapshot collections of a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateSnapshot {
    Initial,
    Final,
}

impl StateSnapshot {
    const fn id_short(self) -> &'static str {
        match self {
            Self::Initial => INITIAL_STATE_ID,
            Self::Final => FINAL_STATE_ID,
        }
    }

    const fn semantic_uri(self) -> &'static str {
        match self {
            Self::Initial => STEP_INITIAL_STATE,
            Self::Final => STEP_FINAL_STATE,
        }
    }
}

/// Handle to a step collection inside a [`Tree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Step(NodeId);

impl Step {
    /// Builds a detached step with its actions already linked.
    pub fn create(tree: &mut Tree, spec: &StepSpec) -> Self {
        let root = tree.insert(Node::collection(spec.id_short.trim()).with_semantic_id(semantic(STEP)));

        append_string(tree, root, STEP_TITLE_ID, spec.title.as_str(), semantic(STEP_TITLE));
        let status = append_string(tree, root, STATUS_ID, "", semantic(STEP_STATUS));
        let actions = append_collection(tree, root, ACTIONS_ID, semantic(STEP_ACTIONS));
        append_string(tree, root, STATION_ID, spec.station.as_str(), semantic(STEP_STATION));
        append_collection(tree, root, INITIAL_STATE_ID, semantic(STEP_INITIAL_STATE));
        append_collection(tree, root, FINAL_STATE_ID, semantic(STEP_FINAL_STATE));
        let scheduling = Scheduling::create(tree, &spec.scheduling);
        if !tree.add(root, scheduling.id()) {
            tree.destroy(scheduling.id());
        }
        append_string(tree, root, ENTERPRISE_ID, spec.enterprise.as_str(), semantic(STEP_ENTERPRISE));
        append_string(tree, root, WORKCENTRE_ID, spec.workcentre.as_str(), semantic(STEP_WORKCENTRE));

        if let Some(actions) = actions {
            tree.attach_step(root, actions, status, spec.status);
        }
        let step = Self(root);
        for action in &spec.actions {
            step.add_action(tree, action);
        }
        step
    }

    /// Attaches lifecycles to a parsed step collection and the actions under its
    /// `Actions` collection, which is created when missing.
    pub fn attach(tree: &mut Tree, node: NodeId) -> Option<Self> {
        if !tree.get(node).is_some_and(Node::is_container) {
            return None;
        }
        let actions = match child(tree, node, ACTIONS_ID) {
            Some(actions) => actions,
            None => {
                debug!(step = tree.get(node).map_or("", Node::id_short), "step without actions");
                append_collection(tree, node, ACTIONS_ID, semantic(STEP_ACTIONS))?
            },
        };
        for action in tree.children(actions).to_vec() {
            Action::attach(tree, action);
        }

        let status = child(tree, node, STATUS_ID);
        let initial =
            status.and_then(|id| tree.get(id)).and_then(Node::scalar).map(StepStatus::from_label);
        tree.attach_step(node, actions, status, initial.unwrap_or_default()).then_some(Self(node))
    }

    #[must_use]
    pub fn from_node(tree: &Tree, node: NodeId) -> Option<Self> {
        (tree.role(node) == Some(Role::Step)).then_some(Self(node))
    }

    #[must_use]
    pub const fn id(self) -> NodeId {
        self.0
    }

    #[must_use]
    pub fn id_short(self, tree: &Tree) -> &str {
        tree.get(self.0).map_or("", Node::id_short)
    }

    #[must_use]
    pub fn title(self, tree: &Tree) -> &str {
        scalar(tree, self.0, STEP_TITLE_ID).unwrap_or_default()
    }

    #[must_use]
    pub fn station(self, tree: &Tree) -> &str {
        scalar(tree, self.0, STATION_ID).unwrap_or_default()
    }

    #[must_use]
    pub fn enterprise(self, tree: &Tree) -> &str {
        scalar(tree, self.0, ENTERPRISE_ID).unwrap_or_default()
    }

    #[must_use]
    pub fn workcentre(self, tree: &Tree) -> &str {
        scalar(tree, self.0, WORKCENTRE_ID).unwrap_or_default()
    }

    #[must_use]
    pub fn status(self, tree: &Tree) -> StepStatus {
        tree.state(self.0).map(StepStatus::from).unwrap_or_default()
    }

    /// Moves to `status` through the single table edge leading there.
    ///
    /// Being in `status` already counts as success; a missing edge or an unmet
    /// end-of-production guard leaves the step unchanged.
    pub fn set_status(self, tree: &mut Tree, status: StepStatus) -> bool {
        tree.set_step_status(self.0, status)
    }

    pub fn apply(self, tree: &mut Tree, transition: Transition) -> bool {
        tree.apply(self.0, transition)
    }

    transition_shortcuts! {
        reset => Reset,
        schedule => Schedule,
        start_production => StartProduction,
        suspend => Suspend,
        resume => Resume,
        end_production => EndProduction,
        error => Error,
        abort => Abort,
        return_to_created => ReturnToCreated,
        return_to_planned => ReturnToPlanned,
        return_to_executing => ReturnToExecuting,
        return_to_suspended => ReturnToSuspended,
        return_to_completed => ReturnToCompleted,
    }

    /// Builds an action from `spec` and links it under this step.
    pub fn add_action(self, tree: &mut Tree, spec: &ActionSpec) -> Option<Action> {
        let action = Action::create(tree, spec);
        if self.link_action(tree, action) {
            Some(action)
        } else {
            tree.destroy(action.id());
            None
        }
    }

    /// Links a detached action under this step.
    pub fn link_action(self, tree: &mut Tree, action: Action) -> bool {
        tree.link_action(self.0, action.id())
    }

    #[must_use]
    pub fn actions(self, tree: &Tree) -> Vec<Action> {
        tree.actions(self.0).into_iter().map(Action::from_node_unchecked).collect()
    }

    /// Case-insensitive lookup by idShort.
    #[must_use]
    pub fn action(self, tree: &Tree, id_short: &str) -> Option<Action> {
        let id_short = id_short.trim();
        if id_short.is_empty() {
            return None;
        }
        self.actions(tree)
            .into_iter()
            .find(|action| action.id_short(tree).eq_ignore_ascii_case(id_short))
    }

    #[must_use]
    pub fn actions_by_status(self, tree: &Tree, status: ActionStatus) -> Vec<Action> {
        self.actions(tree).into_iter().filter(|action| action.status(tree) == status).collect()
    }

    /// Removes the named action and frees its subtree.
    pub fn remove_action(self, tree: &mut Tree, id_short: &str) -> bool {
        self.action(tree, id_short).is_some_and(|action| tree.destroy(action.id()))
    }

    /// Unlinks the named action and hands it back, ready to be linked under another
    /// step. The caller owns the returned subtree; [`Tree::destroy`] frees it.
    pub fn detach_action(self, tree: &mut Tree, id_short: &str) -> Option<Action> {
        let action = self.action(tree, id_short)?;
        tree.detach(action.id()).then_some(action)
    }

    #[must_use]
    pub fn scheduling(self, tree: &Tree) -> Option<Scheduling> {
        child(tree, self.0, SCHEDULING).map(Scheduling::from_node)
    }

    /// Overwrites the four raw scheduling values, creating the collection or any
    /// missing property on the way.
    pub fn update_scheduling(self, tree: &mut Tree, values: &SchedulingValues) {
        let scheduling = match self.scheduling(tree) {
            Some(scheduling) => scheduling,
            None => {
                let created = Scheduling::create(tree, &SchedulingValues::default());
                let position = tree
                    .children(self.0)
                    .iter()
                    .position(|id| {
                        tree.get(*id).is_some_and(|node| node.id_short() == ENTERPRISE_ID)
                    })
                    .unwrap_or(usize::MAX);
                if !tree.insert_child(self.0, position, created.id()) {
                    tree.destroy(created.id());
                    return;
                }
                created
            },
        };
        scheduling.set_raw(tree, SchedulingField::StartDateTime, values.start_date_time.as_str());
        scheduling.set_raw(tree, SchedulingField::EndDateTime, values.end_date_time.as_str());
        scheduling.set_raw(tree, SchedulingField::SetupTime, values.setup_time.as_str());
        scheduling.set_raw(tree, SchedulingField::CycleTime, values.cycle_time.as_str());
    }

    /// Clears `InitialState` and refills it with one string property per entry.
    pub fn set_initial_state<K, V>(self, tree: &mut Tree, values: impl IntoIterator<Item = (K, V)>) -> usize
    where
        K: AsRef<str>,
        V: Into<String>,
    {
        self.replace_state(tree, StateSnapshot::Initial, values)
    }

    /// Clears `FinalState` and refills it with one string property per entry.
    pub fn set_final_state<K, V>(self, tree: &mut Tree, values: impl IntoIterator<Item = (K, V)>) -> usize
    where
        K: AsRef<str>,
        V: Into<String>,
    {
        self.replace_state(tree, StateSnapshot::Final, values)
    }

    /// `(idShort, text)` pairs of a snapshot collection.
    #[must_use]
    pub fn state_values(self, tree: &Tree, snapshot: StateSnapshot) -> Vec<(String, String)> {
        let Some(collection) = child(tree, self.0, snapshot.id_short()) else {
            return Vec::new();
        };
        tree.children(collection)
            .iter()
            .filter_map(|id| tree.get(*id))
            .filter_map(|node| Some((node.id_short().to_owned(), node.scalar()?.to_owned())))
            .collect()
    }

    fn replace_state<K, V>(
        self,
        tree: &mut Tree,
        snapshot: StateSnapshot,
        values: impl IntoIterator<Item = (K, V)>,
    ) -> usize
    where
        K: AsRef<str>,
        V: Into<String>,
    {
        let collection = child(tree, self.0, snapshot.id_short()).or_else(|| {
            append(
                tree,
                self.0,
                Node::collection(snapshot.id_short()).with_semantic_id(semantic(snapshot.semantic_uri())),
            )
        });
        collection.map_or(0, |collection| refill(tree, collection, values))
    }
}
