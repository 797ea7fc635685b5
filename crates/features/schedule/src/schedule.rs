use crate::error::{ScheduleErrorExt, ScheduleResult};
use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::Value as Json;
use tracing::{debug, info};
use twin_codec::Canonicalizer;
use twin_domain::config::RepositoryConfig;
use twin_domain::semantics::{
    MACHINE_SCHEDULE, MACHINE_SCHEDULE_HAS_OPEN_TASKS, MACHINE_SCHEDULE_LAST_TIME_UPDATED,
    MACHINE_SCHEDULE_SCHEDULE,
};
use twin_kernel::identifier::submodel_identifier;
use twin_model::{
    DataType, ListSpec, Lookup, ModelType, ModelingKind, Node, NodeId, Reference, Scalar, Tree,
    Value,
};
use twin_production::{Scheduling, SchedulingValues, Step};
use typed_builder::TypedBuilder;

pub(crate) const MACHINE_SCHEDULE_ID: &str = "MachineSchedule";
pub(crate) const LAST_TIME_UPDATED_ID: &str = "LastTimeUpdated";
pub(crate) const HAS_OPEN_TASKS_ID: &str = "HasOpenTasks";
pub(crate) const SCHEDULE_ID: &str = "Schedule";

/// Plain values of a machine schedule, as exchanged with a repository.
#[derive(Debug, Clone, PartialEq, TypedBuilder)]
pub struct MachineScheduleData {
    #[builder(setter(into))]
    pub submodel_identifier: String,
    #[builder(default, setter(strip_option, into))]
    pub last_time_updated: Option<String>,
    #[builder(default)]
    pub has_open_tasks: bool,
    /// Items of the `Schedule` list in their JSON form.
    #[builder(default)]
    pub entries: Vec<Json>,
}

/// The schedule submodel of one machine: when it was last touched, whether
/// work is still open, and an ordered list of scheduling entries.
///
/// Entries are `Scheduling` collections, usually copied from a production
/// step and pointing back at it through `ReferredStep`. There is at most one
/// entry per referred step.
#[derive(Debug, Clone)]
pub struct MachineSchedule {
    tree: Tree,
    root: NodeId,
}

impl MachineSchedule {
    pub fn builder() -> MachineScheduleBuilder {
        MachineScheduleBuilder::new()
    }

    /// Rebuilds a schedule from its JSON form. Missing elements are created on first write.
    ///
    /// # Errors
    /// [`ScheduleError::Codec`](crate::ScheduleError::Codec) when the document has no object root.
    pub fn parse(document: &Json) -> ScheduleResult<Self> {
        let (tree, root) = twin_codec::read(document).context("Parsing machine schedule")?;
        Ok(Self { tree, root })
    }

    #[must_use]
    pub const fn tree(&self) -> &Tree {
        &self.tree
    }

    #[must_use]
    pub const fn root(&self) -> NodeId {
        self.root
    }

    #[must_use]
    pub fn identifier(&self) -> &str {
        self.tree
            .get(self.root)
            .and_then(|node| node.identity.as_ref())
            .map_or("", |identity| identity.id.as_str())
    }

    /// Raw `LastTimeUpdated` text.
    #[must_use]
    pub fn last_time_updated(&self) -> Option<&str> {
        self.tree
            .find(self.root, Lookup::IdShort(LAST_TIME_UPDATED_ID))
            .and_then(|id| self.tree.get(id))
            .and_then(Node::scalar)
    }

    #[must_use]
    pub fn last_updated_at(&self) -> Option<DateTime<Utc>> {
        let raw = self.last_time_updated()?;
        DateTime::parse_from_rfc3339(raw.trim()).ok().map(|at| at.with_timezone(&Utc))
    }

    /// The `HasOpenTasks` flag; anything but a case-insensitive `true` reads as `false`.
    #[must_use]
    pub fn has_open_tasks(&self) -> bool {
        self.tree
            .find(self.root, Lookup::IdShort(HAS_OPEN_TASKS_ID))
            .and_then(|id| self.tree.get(id))
            .and_then(Node::scalar)
            .is_some_and(|flag| flag.trim().eq_ignore_ascii_case("true"))
    }

    /// Scheduling entries in list order.
    #[must_use]
    pub fn schedules(&self) -> Vec<Scheduling> {
        let Some(list) = self.schedule_list() else {
            return Vec::new();
        };
        self.tree
            .children(list)
            .iter()
            .copied()
            .filter(|id| {
                self.tree.get(*id).is_some_and(|node| node.model_type == ModelType::SubmodelElementCollection)
            })
            .map(Scheduling::from_node)
            .collect()
    }

    /// The entry referring to `step_id_short`, compared case-insensitively.
    #[must_use]
    pub fn schedule_for(&self, step_id_short: &str) -> Option<Scheduling> {
        let wanted = step_id_short.trim();
        if wanted.is_empty() {
            return None;
        }
        self.schedules().into_iter().find(|scheduling| {
            scheduling.referred_step(&self.tree).is_some_and(|step| step.eq_ignore_ascii_case(wanted))
        })
    }

    /// Copies the scheduling of `step` (living in `plan`) into the list,
    /// replacing the entry that already refers to the same step.
    pub fn schedule_step(&mut self, plan: &Tree, step: Step) -> Option<Scheduling> {
        let entry = Scheduling::for_step(&mut self.tree, plan, step);
        self.upsert(entry)
    }

    /// Appends an entry that refers to no step.
    pub fn add_schedule(&mut self, values: &SchedulingValues) -> Option<Scheduling> {
        let entry = Scheduling::create(&mut self.tree, values);
        self.upsert(entry)
    }

    /// Destroys `scheduling` if it is an entry of this schedule.
    pub fn remove_schedule(&mut self, scheduling: Scheduling) -> bool {
        let listed = self
            .schedule_list()
            .is_some_and(|list| self.tree.parent(scheduling.id()) == Some(list));
        if !listed || !self.tree.destroy(scheduling.id()) {
            return false;
        }
        self.touch();
        true
    }

    /// Replaces every value with `data`; the open-tasks flag is then
    /// recomputed from the new entries. Returns the number of entries linked.
    ///
    /// The identifier is kept. Nothing changes when an entry is not a JSON object.
    ///
    /// # Errors
    /// [`ScheduleError::Codec`](crate::ScheduleError::Codec) for a non-object entry.
    pub fn apply(&mut self, data: &MachineScheduleData) -> ScheduleResult<usize> {
        let list = self.ensure_schedule_list().ok_or("schedule list could not be created")?;
        let mut staged = Vec::with_capacity(data.entries.len());
        for entry in &data.entries {
            match twin_codec::read_into(&mut self.tree, entry) {
                Ok(id) => staged.push(id),
                Err(error) => {
                    for id in staged {
                        self.tree.destroy(id);
                    }
                    return Err(error).context("Reading schedule entry");
                },
            }
        }

        self.write_property(
            LAST_TIME_UPDATED_ID,
            DataType::DateTime,
            data.last_time_updated.clone(),
            MACHINE_SCHEDULE_LAST_TIME_UPDATED,
        );
        self.write_property(
            HAS_OPEN_TASKS_ID,
            DataType::Boolean,
            Some(data.has_open_tasks.to_string()),
            MACHINE_SCHEDULE_HAS_OPEN_TASKS,
        );
        self.tree.clear(list);

        let mut linked = 0;
        for id in staged {
            if let Some(node) = self.tree.get_mut(id) {
                node.id_short = None;
            }
            if self.tree.add(list, id) {
                linked += 1;
            } else {
                self.tree.destroy(id);
            }
        }
        self.refresh_open_tasks();
        debug!(entries = linked, "machine schedule applied");
        Ok(linked)
    }

    /// Snapshot of the current values.
    ///
    /// # Errors
    /// [`ScheduleError::Codec`](crate::ScheduleError::Codec) if an entry cannot be written.
    pub fn data(&self) -> ScheduleResult<MachineScheduleData> {
        let mut entries = Vec::new();
        if let Some(list) = self.schedule_list() {
            for id in self.tree.children(list) {
                entries.push(twin_codec::write(&self.tree, *id).context("Writing schedule entry")?);
            }
        }
        Ok(MachineScheduleData {
            submodel_identifier: self.identifier().to_owned(),
            last_time_updated: self.last_time_updated().map(str::to_owned),
            has_open_tasks: self.has_open_tasks(),
            entries,
        })
    }

    /// Recomputes `HasOpenTasks`: an entry without a parsable end, or ending
    /// in the future, is open.
    pub fn refresh_open_tasks(&mut self) -> bool {
        let now = Utc::now().naive_utc();
        let open = self
            .schedules()
            .into_iter()
            .any(|scheduling| scheduling.end_date_time(&self.tree).is_none_or(|end| end > now));
        self.write_property(
            HAS_OPEN_TASKS_ID,
            DataType::Boolean,
            Some(open.to_string()),
            MACHINE_SCHEDULE_HAS_OPEN_TASKS,
        );
        open
    }

    /// The canonical JSON document of the schedule.
    ///
    /// # Errors
    /// [`ScheduleError::Codec`](crate::ScheduleError::Codec) if canonicalization fails.
    pub fn to_value(&self, canonicalizer: &Canonicalizer) -> ScheduleResult<Json> {
        let document = twin_codec::write(&self.tree, self.root).context("Writing machine schedule")?;
        canonicalizer.canonicalize(document).context("Canonicalizing machine schedule")
    }

    /// # Errors
    /// [`ScheduleError::Codec`](crate::ScheduleError::Codec) if canonicalization fails.
    pub fn to_json(&self) -> ScheduleResult<String> {
        Canonicalizer::default()
            .serialize(&self.tree, self.root)
            .context("Serializing machine schedule")
    }

    fn schedule_list(&self) -> Option<NodeId> {
        self.tree.find(self.root, Lookup::IdShort(SCHEDULE_ID))
    }

    fn ensure_schedule_list(&mut self) -> Option<NodeId> {
        self.schedule_list().or_else(|| self.tree.append(self.root, schedule_list_node()))
    }

    fn upsert(&mut self, entry: Scheduling) -> Option<Scheduling> {
        let Some(list) = self.ensure_schedule_list() else {
            self.tree.destroy(entry.id());
            return None;
        };
        let referred = entry.referred_step(&self.tree).map(str::to_owned);
        if let Some(existing) = referred.as_deref().and_then(|step| self.schedule_for(step)) {
            self.tree.destroy(existing.id());
            debug!(step = ?referred, "schedule entry replaced");
        }

        if let Some(node) = self.tree.get_mut(entry.id()) {
            node.id_short = None;
        }
        if !self.tree.add(list, entry.id()) {
            self.tree.destroy(entry.id());
            return None;
        }
        self.touch();
        Some(entry)
    }

    fn touch(&mut self) {
        let now = Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true);
        self.write_property(
            LAST_TIME_UPDATED_ID,
            DataType::DateTime,
            Some(now),
            MACHINE_SCHEDULE_LAST_TIME_UPDATED,
        );
        self.refresh_open_tasks();
    }

    /// Sets a top-level property, creating it when missing. `None` clears the value.
    fn write_property(
        &mut self,
        id_short: &str,
        value_type: DataType,
        value: Option<String>,
        semantic_uri: &str,
    ) -> bool {
        let scalar = Value::Scalar(Scalar::Typed { value_type, value });
        match self.tree.find(self.root, Lookup::IdShort(id_short)) {
            Some(id) => self.tree.get_mut(id).is_some_and(|node| {
                if !matches!(node.value, Value::Scalar(Scalar::Typed { .. })) {
                    return false;
                }
                node.value = scalar;
                true
            }),
            None => {
                let mut node = Node::empty_property(id_short, value_type)
                    .with_semantic_id(Reference::external(semantic_uri));
                node.value = scalar;
                self.tree.append(self.root, node).is_some()
            },
        }
    }
}

fn schedule_list_node() -> Node {
    let mut node = Node::list(SCHEDULE_ID, ModelType::SubmodelElementCollection)
        .with_semantic_id(Reference::external(MACHINE_SCHEDULE_SCHEDULE));
    node.value = Value::OrderedList(ListSpec {
        element_type: ModelType::SubmodelElementCollection,
        value_type: None,
        order_relevant: Some(true),
    });
    node
}

/// A fluent builder for an empty [`MachineSchedule`].
#[must_use = "builders do nothing unless you call .build()"]
#[derive(Debug, Default)]
pub struct MachineScheduleBuilder {
    identifier: Option<String>,
    prefix: Option<String>,
}

impl MachineScheduleBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = Some(identifier.into());
        self
    }

    /// Takes the identifier prefix from the repository settings.
    pub fn config(mut self, config: &RepositoryConfig) -> Self {
        self.prefix = Some(config.submodel_prefix.clone());
        self
    }

    pub fn build(self) -> MachineSchedule {
        let identifier = self.identifier.unwrap_or_else(|| {
            let prefix = self.prefix.unwrap_or_else(|| RepositoryConfig::default().submodel_prefix);
            submodel_identifier(&prefix)
        });

        let mut tree = Tree::new();
        let root = tree.insert(
            Node::submodel(MACHINE_SCHEDULE_ID, identifier.as_str(), ModelingKind::Instance)
                .with_semantic_id(Reference::external(MACHINE_SCHEDULE)),
        );
        tree.append(
            root,
            Node::empty_property(LAST_TIME_UPDATED_ID, DataType::DateTime)
                .with_semantic_id(Reference::external(MACHINE_SCHEDULE_LAST_TIME_UPDATED)),
        );
        tree.append(
            root,
            Node::property(HAS_OPEN_TASKS_ID, DataType::Boolean, "false")
                .with_semantic_id(Reference::external(MACHINE_SCHEDULE_HAS_OPEN_TASKS)),
        );
        tree.append(root, schedule_list_node());

        info!(%identifier, "machine schedule created");
        MachineSchedule { tree, root }
    }
}
