use crate::action::Action;
use crate::elements::{append, append_collection, child, scalar};
use crate::error::{ProductionErrorExt, ProductionResult};
use crate::step::{Step, StepSpec};
use serde_json::Value as Json;
use tracing::{debug, info};
use twin_codec::Canonicalizer;
use twin_domain::config::RepositoryConfig;
use twin_domain::semantics::PRODUCTION_PLAN_KEYS;
use twin_domain::status::{ActionStatus, StepStatus};
use twin_kernel::identifier::submodel_identifier;
use twin_model::{
    DataType, Key, KeyType, ModelingKind, Node, NodeId, Reference, Transition, Tree,
};

pub(crate) const PRODUCTION_PLAN_ID: &str = "ProductionPlan";
pub(crate) const IS_FINISHED_ID: &str = "IsFinished";
pub(crate) const QUANTITY_INFORMATION_ID: &str = "QuantityInformation";
pub(crate) const TOTAL_NUMBER_OF_PIECES_ID: &str = "TotalNumberOfPieces";

const STEP_PREFIX: &str = "Step";

/// A production plan submodel: a finished flag, a piece count and an ordered list of steps.
///
/// The plan owns its [`Tree`]. Steps and actions are [`Copy`] handles into it, so
/// calls that change state go through [`ProductionPlan::tree_mut`] or the
/// idShort-addressed shortcuts below.
#[derive(Debug, Clone)]
pub struct ProductionPlan {
    tree: Tree,
    root: NodeId,
}

impl ProductionPlan {
    /// Creates a new [`ProductionPlanBuilder`].
    pub fn builder() -> ProductionPlanBuilder {
        ProductionPlanBuilder::new()
    }

    /// Rebuilds a plan from its JSON form.
    ///
    /// Top-level collections whose idShort starts with `Step` become steps. Their
    /// and their actions' states are taken from the `Status` labels.
    ///
    /// # Errors
    /// [`ProductionError::Codec`](crate::ProductionError::Codec) when the document has no object root.
    pub fn parse(document: &Json) -> ProductionResult<Self> {
        let (mut tree, root) = twin_codec::read(document).context("Parsing production plan")?;
        let candidates: Vec<_> = tree
            .children(root)
            .iter()
            .copied()
            .filter(|id| tree.get(*id).is_some_and(is_step_node))
            .collect();

        let steps = candidates.into_iter().filter_map(|id| Step::attach(&mut tree, id)).count();
        debug!(steps, "production plan parsed");
        Ok(Self { tree, root })
    }

    /// # Errors
    /// [`ProductionError::Codec`](crate::ProductionError::Codec) for invalid JSON or a non-object root.
    pub fn parse_str(input: &str) -> ProductionResult<Self> {
        let document: Json = serde_json::from_str(input)
            .map_err(|source| twin_codec::CodecError::Json { source, context: None })
            .context("Parsing production plan")?;
        Self::parse(&document)
    }

    #[must_use]
    pub const fn tree(&self) -> &Tree {
        &self.tree
    }

    pub const fn tree_mut(&mut self) -> &mut Tree {
        &mut self.tree
    }

    #[must_use]
    pub const fn root(&self) -> NodeId {
        self.root
    }

    /// The submodel's global identifier.
    #[must_use]
    pub fn identifier(&self) -> &str {
        self.tree
            .get(self.root)
            .and_then(|node| node.identity.as_ref())
            .map_or("", |identity| identity.id.as_str())
    }

    /// Builds a step from `spec` and appends it after the existing elements.
    pub fn append_step(&mut self, spec: &StepSpec) -> Option<Step> {
        self.insert_step(usize::MAX, spec)
    }

    /// Builds a step from `spec` and places it at `index` among the steps (clamped).
    pub fn insert_step(&mut self, index: usize, spec: &StepSpec) -> Option<Step> {
        let steps = self.steps();
        let position = match steps.get(index) {
            Some(step) => self.position_of(step.id()),
            None => usize::MAX,
        };

        let step = Step::create(&mut self.tree, spec);
        if self.tree.insert_child(self.root, position, step.id()) {
            Some(step)
        } else {
            self.tree.destroy(step.id());
            None
        }
    }

    /// Destroys the named step together with its actions.
    pub fn remove_step(&mut self, id_short: &str) -> bool {
        self.step(id_short).is_some_and(|step| self.tree.destroy(step.id()))
    }

    /// Steps in document order.
    #[must_use]
    pub fn steps(&self) -> Vec<Step> {
        self.tree
            .children(self.root)
            .iter()
            .filter_map(|id| Step::from_node(&self.tree, *id))
            .collect()
    }

    /// Case-insensitive lookup by idShort.
    #[must_use]
    pub fn step(&self, id_short: &str) -> Option<Step> {
        let id_short = id_short.trim();
        if id_short.is_empty() {
            return None;
        }
        self.steps().into_iter().find(|step| step.id_short(&self.tree).eq_ignore_ascii_case(id_short))
    }

    #[must_use]
    pub fn steps_by_status(&self, status: StepStatus) -> Vec<Step> {
        self.steps().into_iter().filter(|step| step.status(&self.tree) == status).collect()
    }

    /// Every action, across all steps, that is not `done`.
    #[must_use]
    pub fn pending_actions(&self) -> Vec<Action> {
        self.steps()
            .into_iter()
            .flat_map(|step| step.actions(&self.tree))
            .filter(|action| action.status(&self.tree) != ActionStatus::Done)
            .collect()
    }

    /// `TotalNumberOfPieces`, if present and numeric.
    #[must_use]
    pub fn quantity(&self) -> Option<i64> {
        let quantity = child(&self.tree, self.root, QUANTITY_INFORMATION_ID)?;
        scalar(&self.tree, quantity, TOTAL_NUMBER_OF_PIECES_ID)?.trim().parse().ok()
    }

    pub fn update_quantity(&mut self, total: i64) -> bool {
        let quantity = child(&self.tree, self.root, QUANTITY_INFORMATION_ID).or_else(|| {
            append_collection(&mut self.tree, self.root, QUANTITY_INFORMATION_ID, Reference::empty())
        });
        let Some(quantity) = quantity else {
            return false;
        };
        match child(&self.tree, quantity, TOTAL_NUMBER_OF_PIECES_ID) {
            Some(pieces) => self
                .tree
                .get_mut(pieces)
                .is_some_and(|node| node.set_typed_scalar(DataType::Integer, total.to_string())),
            None => append(
                &mut self.tree,
                quantity,
                Node::property(TOTAL_NUMBER_OF_PIECES_ID, DataType::Integer, total.to_string()),
            )
            .is_some(),
        }
    }

    /// The `IsFinished` flag; anything but a case-insensitive `true` reads as `false`.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        scalar(&self.tree, self.root, IS_FINISHED_ID)
            .is_some_and(|flag| flag.trim().eq_ignore_ascii_case("true"))
    }

    pub fn set_finished(&mut self, finished: bool) -> bool {
        let text = if finished { "true" } else { "false" };
        match child(&self.tree, self.root, IS_FINISHED_ID) {
            Some(flag) => self
                .tree
                .get_mut(flag)
                .is_some_and(|node| node.set_typed_scalar(DataType::Boolean, text)),
            None => {
                let flag = self.tree.insert(Node::property(IS_FINISHED_ID, DataType::Boolean, text));
                self.tree.insert_child(self.root, 0, flag)
            },
        }
    }

    /// `true` once the plan is flagged finished, or every one of its (at least one) steps is done.
    #[must_use]
    pub fn is_completed(&self) -> bool {
        if self.is_finished() {
            return true;
        }
        let steps = self.steps();
        !steps.is_empty() && steps.iter().all(|step| step.status(&self.tree) == StepStatus::Done)
    }

    /// Ends production of the named step; a step that is already done counts as success.
    pub fn complete_step(&mut self, id_short: &str) -> bool {
        let Some(step) = self.step(id_short) else {
            return false;
        };
        step.status(&self.tree) == StepStatus::Done || step.end_production(&mut self.tree)
    }

    pub fn apply_step(&mut self, step: &str, transition: Transition) -> bool {
        self.step(step).is_some_and(|step| step.apply(&mut self.tree, transition))
    }

    pub fn apply_action(&mut self, step: &str, action: &str, transition: Transition) -> bool {
        self.step(step)
            .and_then(|step| step.action(&self.tree, action))
            .is_some_and(|action| action.apply(&mut self.tree, transition))
    }

    plan_shortcuts! {
        steps {
            reset_step => Reset,
            schedule_step => Schedule,
            start_step_production => StartProduction,
            suspend_step => Suspend,
            resume_step => Resume,
            error_step => Error,
            abort_step => Abort,
            return_step_to_created => ReturnToCreated,
            return_step_to_planned => ReturnToPlanned,
            return_step_to_executing => ReturnToExecuting,
            return_step_to_suspended => ReturnToSuspended,
            return_step_to_completed => ReturnToCompleted,
        }
        actions {
            reset_action => Reset,
            schedule_action => Schedule,
            start_action_production => StartProduction,
            suspend_action => Suspend,
            resume_action => Resume,
            complete_action => EndProduction,
            error_action => Error,
            abort_action => Abort,
            return_action_to_created => ReturnToCreated,
            return_action_to_planned => ReturnToPlanned,
            return_action_to_executing => ReturnToExecuting,
            return_action_to_suspended => ReturnToSuspended,
            return_action_to_completed => ReturnToCompleted,
        }
    }

    /// The canonical JSON document of the plan.
    ///
    /// # Errors
    /// [`ProductionError::Codec`](crate::ProductionError::Codec) if canonicalization fails.
    pub fn to_value(&self, canonicalizer: &Canonicalizer) -> ProductionResult<Json> {
        let document = twin_codec::write(&self.tree, self.root).context("Writing production plan")?;
        canonicalizer.canonicalize(document).context("Canonicalizing production plan")
    }

    /// Canonical JSON text with the default rules and indentation.
    ///
    /// # Errors
    /// [`ProductionError::Codec`](crate::ProductionError::Codec) if canonicalization fails.
    pub fn to_json(&self) -> ProductionResult<String> {
        self.to_json_with(&Canonicalizer::default())
    }

    /// # Errors
    /// [`ProductionError::Codec`](crate::ProductionError::Codec) if canonicalization fails.
    pub fn to_json_with(&self, canonicalizer: &Canonicalizer) -> ProductionResult<String> {
        canonicalizer.serialize(&self.tree, self.root).context("Serializing production plan")
    }

    fn position_of(&self, id: NodeId) -> usize {
        self.tree.children(self.root).iter().position(|child| *child == id).unwrap_or(usize::MAX)
    }
}

fn is_step_node(node: &Node) -> bool {
    node.is_container()
        && node
            .id_short()
            .get(..STEP_PREFIX.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(STEP_PREFIX))
}

/// A fluent builder for a fresh [`ProductionPlan`].
///
/// Without an explicit identifier one is generated from the configured submodel
/// prefix and a `NanoID`.
#[must_use = "builders do nothing unless you call .build()"]
#[derive(Debug, Default)]
pub struct ProductionPlanBuilder {
    identifier: Option<String>,
    prefix: Option<String>,
    finished: bool,
    quantity: i64,
    steps: Vec<StepSpec>,
}

impl ProductionPlanBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses `identifier` verbatim as the submodel id.
    pub fn identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = Some(identifier.into());
        self
    }

    /// Takes the identifier prefix from the repository settings.
    pub fn config(mut self, config: &RepositoryConfig) -> Self {
        self.prefix = Some(config.submodel_prefix.clone());
        self
    }

    pub const fn finished(mut self, finished: bool) -> Self {
        self.finished = finished;
        self
    }

    pub const fn quantity(mut self, total: i64) -> Self {
        self.quantity = total;
        self
    }

    pub fn step(mut self, spec: StepSpec) -> Self {
        self.steps.push(spec);
        self
    }

    pub fn build(self) -> ProductionPlan {
        let identifier = self.identifier.unwrap_or_else(|| {
            let prefix = self.prefix.unwrap_or_else(|| RepositoryConfig::default().submodel_prefix);
            submodel_identifier(&prefix)
        });

        let mut tree = Tree::new();
        let semantic_id = Reference::model(
            PRODUCTION_PLAN_KEYS.iter().map(|value| Key::new(KeyType::Submodel, *value)),
        );
        let root = tree.insert(
            Node::submodel(PRODUCTION_PLAN_ID, identifier.as_str(), ModelingKind::Instance)
                .with_semantic_id(semantic_id),
        );
        let mut plan = ProductionPlan { tree, root };
        plan.set_finished(self.finished);
        plan.update_quantity(self.quantity);
        for spec in &self.steps {
            plan.append_step(spec);
        }

        info!(%identifier, steps = self.steps.len(), "production plan created");
        plan
    }
}
