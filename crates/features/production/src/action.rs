use crate::elements::{append, append_collection, append_string, child, scalar, semantic};
use crate::error::ProductionResult;
use crate::parameters::{ParameterSet, ParameterValue, Parameters};
use crate::skill::SkillReference;
use crate::step::Step;
use tracing::debug;
use twin_domain::semantics::{
    ACTION_EFFECTS, ACTION_FINAL_RESULT_DATA, ACTION_INPUT_PARAMETERS, ACTION_MACHINE_NAME,
    ACTION_PRECONDITIONS, ACTION_SKILL_REFERENCE, ACTION_STATUS, ACTION_TITLE, STEP_ACTION,
};
use twin_domain::status::ActionStatus;
use twin_model::{Node, NodeId, Role, Transition, Tree};
use typed_builder::TypedBuilder;

const PREFIX: &str = "Action";

pub(crate) const ACTION_TITLE_ID: &str = "ActionTitle";
pub(crate) const STATUS_ID: &str = "Status";
pub(crate) const INPUT_PARAMETERS_ID: &str = "InputParameters";
pub(crate) const FINAL_RESULT_DATA_ID: &str = "FinalResultData";
pub(crate) const PRECONDITIONS_ID: &str = "Preconditions";
pub(crate) const SKILL_REFERENCE_ID: &str = "SkillReference";
pub(crate) const EFFECTS_ID: &str = "Effects";
pub(crate) const MACHINE_NAME_ID: &str = "MachineName";

/// Everything needed to build an action collection.
#[derive(Debug, Clone, TypedBuilder)]
pub struct ActionSpec {
    #[builder(setter(into))]
    pub id_short: String,
    #[builder(default, setter(into))]
    pub title: String,
    #[builder(default)]
    pub status: ActionStatus,
    #[builder(default, setter(into))]
    pub machine_name: String,
    #[builder(default)]
    pub input_parameters: Vec<(String, ParameterValue)>,
    #[builder(default)]
    pub final_result_data: Vec<(String, ParameterValue)>,
    #[builder(default)]
    pub skill_reference: SkillReference,
}

/// Handle to an action collection inside a [`Tree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Action(NodeId);

impl Action {
    /// Builds a detached action. Link it to a step with [`Step::link_action`].
    ///
    /// Blank parameter keys in `spec` are skipped.
    pub fn create(tree: &mut Tree, spec: &ActionSpec) -> Self {
        let root = tree.insert(
            Node::collection(normalize_id_short(&spec.id_short))
                .with_semantic_id(semantic(STEP_ACTION)),
        );

        append_string(tree, root, ACTION_TITLE_ID, spec.title.as_str(), semantic(ACTION_TITLE));
        let status = append_string(tree, root, STATUS_ID, "", semantic(ACTION_STATUS));
        let inputs = append_collection(tree, root, INPUT_PARAMETERS_ID, semantic(ACTION_INPUT_PARAMETERS));
        let results =
            append_collection(tree, root, FINAL_RESULT_DATA_ID, semantic(ACTION_FINAL_RESULT_DATA));
        append_collection(tree, root, PRECONDITIONS_ID, semantic(ACTION_PRECONDITIONS));
        append(
            tree,
            root,
            Node::reference(SKILL_REFERENCE_ID, spec.skill_reference.to_reference())
                .with_semantic_id(semantic(ACTION_SKILL_REFERENCE)),
        );
        append_collection(tree, root, EFFECTS_ID, semantic(ACTION_EFFECTS));
        append_string(
            tree,
            root,
            MACHINE_NAME_ID,
            spec.machine_name.trim(),
            semantic(ACTION_MACHINE_NAME),
        );

        for (collection, set, values) in [
            (inputs, ParameterSet::Input, &spec.input_parameters),
            (results, ParameterSet::FinalResult, &spec.final_result_data),
        ] {
            let Some(collection) = collection else { continue };
            let parameters = Parameters::new(collection, set);
            for (key, value) in values {
                if let Err(error) = parameters.set(tree, key, value.clone()) {
                    debug!(%error, "skipping action parameter");
                }
            }
        }

        tree.attach_action(root, status, spec.status);
        Self(root)
    }

    /// Attaches a lifecycle to a parsed action collection, taking the state from its
    /// `Status` property (unknown labels read as `open`).
    pub fn attach(tree: &mut Tree, node: NodeId) -> Option<Self> {
        if !tree.get(node).is_some_and(Node::is_container) {
            return None;
        }
        let status = child(tree, node, STATUS_ID);
        let initial =
            status.and_then(|id| tree.get(id)).and_then(Node::scalar).map(ActionStatus::from_label);
        tree.attach_action(node, status, initial.unwrap_or_default()).then_some(Self(node))
    }

    /// The handle for `node` if it carries an action lifecycle.
    #[must_use]
    pub fn from_node(tree: &Tree, node: NodeId) -> Option<Self> {
        (tree.role(node) == Some(Role::Action)).then_some(Self(node))
    }

    pub(crate) const fn from_node_unchecked(node: NodeId) -> Self {
        Self(node)
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
        scalar(tree, self.0, ACTION_TITLE_ID).unwrap_or_default()
    }

    #[must_use]
    pub fn machine_name(self, tree: &Tree) -> &str {
        scalar(tree, self.0, MACHINE_NAME_ID).unwrap_or_default()
    }

    #[must_use]
    pub fn status(self, tree: &Tree) -> ActionStatus {
        tree.state(self.0).map(ActionStatus::from).unwrap_or_default()
    }

    /// The step whose `Actions` collection holds this action.
    #[must_use]
    pub fn step(self, tree: &Tree) -> Option<Step> {
        tree.owner(self.0).and_then(|step| Step::from_node(tree, step))
    }

    /// Sets the status directly, bypassing the transition table. The owning step
    /// is still offered the new state.
    pub fn set_status(self, tree: &mut Tree, status: ActionStatus) -> bool {
        tree.force_state(self.0, status.into())
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

    #[must_use]
    pub fn input_parameters(self, tree: &Tree) -> Option<Parameters> {
        child(tree, self.0, INPUT_PARAMETERS_ID).map(|id| Parameters::new(id, ParameterSet::Input))
    }

    #[must_use]
    pub fn final_result_data(self, tree: &Tree) -> Option<Parameters> {
        child(tree, self.0, FINAL_RESULT_DATA_ID)
            .map(|id| Parameters::new(id, ParameterSet::FinalResult))
    }

    /// # Errors
    /// [`ProductionError::InvalidKey`](crate::ProductionError::InvalidKey) for a blank key.
    pub fn set_input_parameter(
        self,
        tree: &mut Tree,
        key: &str,
        value: impl Into<ParameterValue>,
    ) -> ProductionResult<()> {
        let parameters = self.ensure_parameters(tree, ParameterSet::Input)?;
        parameters.set(tree, key, value)
    }

    #[must_use]
    pub fn input_parameter<'t>(self, tree: &'t Tree, key: &str) -> Option<&'t str> {
        self.input_parameters(tree)?.get(tree, key)
    }

    /// # Errors
    /// [`ProductionError::InvalidKey`](crate::ProductionError::InvalidKey) for a blank key.
    pub fn set_final_result_value(
        self,
        tree: &mut Tree,
        key: &str,
        value: impl Into<ParameterValue>,
    ) -> ProductionResult<()> {
        let parameters = self.ensure_parameters(tree, ParameterSet::FinalResult)?;
        parameters.set(tree, key, value)
    }

    #[must_use]
    pub fn final_result_value<'t>(self, tree: &'t Tree, key: &str) -> Option<&'t str> {
        self.final_result_data(tree)?.get(tree, key)
    }

    #[must_use]
    pub fn skill_reference(self, tree: &Tree) -> SkillReference {
        child(tree, self.0, SKILL_REFERENCE_ID)
            .and_then(|id| tree.get(id))
            .and_then(Node::reference_value)
            .map(SkillReference::from_reference)
            .unwrap_or_default()
    }

    /// Replaces the skill reference chain, creating the element when missing.
    pub fn link_skill_reference(self, tree: &mut Tree, skill: &SkillReference) -> bool {
        let reference = skill.to_reference();
        match child(tree, self.0, SKILL_REFERENCE_ID) {
            Some(id) => {
                tree.destroy(id);
                let node = Node::reference(SKILL_REFERENCE_ID, reference)
                    .with_semantic_id(semantic(ACTION_SKILL_REFERENCE));
                let position = self.position_after(tree, PRECONDITIONS_ID);
                let id = tree.insert(node);
                tree.insert_child(self.0, position, id)
            },
            None => append(
                tree,
                self.0,
                Node::reference(SKILL_REFERENCE_ID, reference)
                    .with_semantic_id(semantic(ACTION_SKILL_REFERENCE)),
            )
            .is_some(),
        }
    }

    fn position_after(self, tree: &Tree, id_short: &str) -> usize {
        let children = tree.children(self.0);
        children
            .iter()
            .position(|id| tree.get(*id).is_some_and(|node| node.id_short() == id_short))
            .map_or(children.len(), |index| index + 1)
    }

    fn ensure_parameters(self, tree: &mut Tree, set: ParameterSet) -> ProductionResult<Parameters> {
        let (id_short, uri) = match set {
            ParameterSet::Input => (INPUT_PARAMETERS_ID, ACTION_INPUT_PARAMETERS),
            ParameterSet::FinalResult => (FINAL_RESULT_DATA_ID, ACTION_FINAL_RESULT_DATA),
        };
        child(tree, self.0, id_short)
            .or_else(|| append_collection(tree, self.0, id_short, semantic(uri)))
            .map(|id| Parameters::new(id, set))
            .ok_or_else(|| format!("action has no '{id_short}' collection").into())
    }
}

/// Canonical action idShort: `Action` followed by at least three digits.
///
/// Blank input and a bare `Action` become `Action001`; shorter numeric suffixes are
/// zero-padded. Names not starting with `Action` are only trimmed.
#[must_use]
pub fn normalize_id_short(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return format!("{PREFIX}001");
    }
    let Some(suffix) = trimmed
        .get(..PREFIX.len())
        .filter(|head| head.eq_ignore_ascii_case(PREFIX))
        .map(|_| &trimmed[PREFIX.len()..])
    else {
        return trimmed.to_owned();
    };

    if suffix.is_empty() {
        return format!("{PREFIX}001");
    }
    if !suffix.bytes().all(|byte| byte.is_ascii_digit()) {
        return trimmed.to_owned();
    }
    if suffix.len() >= 3 {
        return format!("{PREFIX}{suffix}");
    }
    suffix.parse::<u32>().map_or_else(|_| trimmed.to_owned(), |number| format!("{PREFIX}{number:03}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_short_normalization() {
        assert_eq!(normalize_id_short(""), "Action001");
        assert_eq!(normalize_id_short("   "), "Action001");
        assert_eq!(normalize_id_short("Action"), "Action001");
        assert_eq!(normalize_id_short("action7"), "Action007");
        assert_eq!(normalize_id_short("Action42"), "Action042");
        assert_eq!(normalize_id_short("Action1234"), "Action1234");
        assert_eq!(normalize_id_short(" Drill "), "Drill");
        assert_eq!(normalize_id_short("ActionDrill"), "ActionDrill");
    }
}
