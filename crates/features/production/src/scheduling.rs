//! The `Scheduling` collection of a step.
//!
//! Dates are stored as `YYYY-MM-DD hh:mm:ss`, durations as `HH:MM:SS` where the
//! hour field may exceed 24. Values that do not parse read as absent.

use crate::elements::{append, append_collection, append_string, child, scalar, semantic};
use crate::step::Step;
use chrono::{NaiveDateTime, TimeDelta, Timelike, Utc};
use tracing::debug;
use twin_domain::semantics::{
    SCHEDULING_CYCLE_TIME, SCHEDULING_END_DATE_TIME, SCHEDULING_SETUP_TIME,
    SCHEDULING_START_DATE_TIME, STEP_SCHEDULING,
};
use twin_model::{Key, KeyType, Node, NodeId, Reference, ReferenceType, Tree};

pub const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub(crate) const SCHEDULING: &str = "Scheduling";
pub(crate) const INITIAL_SCHEDULING: &str = "InitialScheduling";
pub(crate) const ACTUAL_SCHEDULING: &str = "ActualScheduling";
pub(crate) const REFERRED_STEP: &str = "ReferredStep";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchedulingField {
    StartDateTime,
    EndDateTime,
    SetupTime,
    CycleTime,
}

impl SchedulingField {
    pub const ALL: [Self; 4] =
        [Self::StartDateTime, Self::EndDateTime, Self::SetupTime, Self::CycleTime];

    #[must_use]
    pub const fn id_short(self) -> &'static str {
        match self {
            Self::StartDateTime => "StartDateTime",
            Self::EndDateTime => "EndDateTime",
            Self::SetupTime => "SetupTime",
            Self::CycleTime => "CycleTime",
        }
    }

    const fn semantic_uri(self) -> &'static str {
        match self {
            Self::StartDateTime => SCHEDULING_START_DATE_TIME,
            Self::EndDateTime => SCHEDULING_END_DATE_TIME,
            Self::SetupTime => SCHEDULING_SETUP_TIME,
            Self::CycleTime => SCHEDULING_CYCLE_TIME,
        }
    }
}

/// Raw initial values of a scheduling collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchedulingValues {
    pub start_date_time: String,
    pub end_date_time: String,
    pub setup_time: String,
    pub cycle_time: String,
}

impl SchedulingValues {
    pub fn new(
        start_date_time: impl Into<String>,
        end_date_time: impl Into<String>,
        setup_time: impl Into<String>,
        cycle_time: impl Into<String>,
    ) -> Self {
        Self {
            start_date_time: start_date_time.into(),
            end_date_time: end_date_time.into(),
            setup_time: setup_time.into(),
            cycle_time: cycle_time.into(),
        }
    }

    const fn get(&self, field: SchedulingField) -> &String {
        match field {
            SchedulingField::StartDateTime => &self.start_date_time,
            SchedulingField::EndDateTime => &self.end_date_time,
            SchedulingField::SetupTime => &self.setup_time,
            SchedulingField::CycleTime => &self.cycle_time,
        }
    }
}

/// Handle to a scheduling collection (or one of its `Initial`/`Actual` sub-collections).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Scheduling(NodeId);

impl Scheduling {
    #[must_use]
    pub const fn from_node(node: NodeId) -> Self {
        Self(node)
    }

    #[must_use]
    pub const fn id(self) -> NodeId {
        self.0
    }

    /// Builds a detached `Scheduling` collection with empty `InitialScheduling`
    /// and `ActualScheduling` sub-collections.
    pub fn create(tree: &mut Tree, values: &SchedulingValues) -> Self {
        let root = tree.insert(Node::collection(SCHEDULING).with_semantic_id(semantic(STEP_SCHEDULING)));
        for field in SchedulingField::ALL {
            append_string(tree, root, field.id_short(), values.get(field), semantic(field.semantic_uri()));
        }
        for id_short in [INITIAL_SCHEDULING, ACTUAL_SCHEDULING] {
            if let Some(sub) = append_collection(tree, root, id_short, semantic(STEP_SCHEDULING)) {
                for field in SchedulingField::ALL {
                    append_string(tree, sub, field.id_short(), "", semantic(field.semantic_uri()));
                }
            }
        }
        Self(root)
    }

    /// Builds a detached entry for a machine schedule from `step` in `source`.
    ///
    /// Only values that parse are copied, into both the entry and its
    /// `InitialScheduling`. A `ReferredStep` reference names the step by idShort.
    pub fn for_step(tree: &mut Tree, source: &Tree, step: Step) -> Self {
        let copied = step.scheduling(source).map(|scheduling| scheduling.parsed_values(source));
        let entry = Self::create(tree, &SchedulingValues::default());
        if let Some(values) = copied {
            for field in SchedulingField::ALL {
                if !values.get(field).is_empty() {
                    entry.set_raw(tree, field, values.get(field).as_str());
                }
            }
            entry.record_initial(tree);
        }

        let target = Reference {
            reference_type: ReferenceType::ExternalReference,
            keys: vec![Key::new(KeyType::SubmodelElementCollection, step.id_short(source))],
        };
        append(tree, entry.0, Node::reference(REFERRED_STEP, target));
        entry
    }

    /// idShort of the step a schedule entry refers to.
    #[must_use]
    pub fn referred_step(self, tree: &Tree) -> Option<&str> {
        child(tree, self.0, REFERRED_STEP)
            .and_then(|id| tree.get(id))
            .and_then(Node::reference_value)
            .and_then(|target| target.keys.last())
            .map(|key| key.value.as_str())
    }

    /// Current raw values; missing properties read as empty.
    #[must_use]
    pub fn values(self, tree: &Tree) -> SchedulingValues {
        let raw = |field| self.raw(tree, field).unwrap_or_default();
        SchedulingValues::new(
            raw(SchedulingField::StartDateTime),
            raw(SchedulingField::EndDateTime),
            raw(SchedulingField::SetupTime),
            raw(SchedulingField::CycleTime),
        )
    }

    /// Like [`Scheduling::values`], blanking every value that does not parse.
    fn parsed_values(self, tree: &Tree) -> SchedulingValues {
        SchedulingValues::new(
            self.start_date_time(tree).map(format_date_time).unwrap_or_default(),
            self.end_date_time(tree).map(format_date_time).unwrap_or_default(),
            self.setup_time(tree).map(format_duration).unwrap_or_default(),
            self.cycle_time(tree).map(format_duration).unwrap_or_default(),
        )
    }

    #[must_use]
    pub fn initial(self, tree: &Tree) -> Option<Self> {
        child(tree, self.0, INITIAL_SCHEDULING).map(Self)
    }

    #[must_use]
    pub fn actual(self, tree: &Tree) -> Option<Self> {
        child(tree, self.0, ACTUAL_SCHEDULING).map(Self)
    }

    #[must_use]
    pub fn raw(self, tree: &Tree, field: SchedulingField) -> Option<&str> {
        scalar(tree, self.0, field.id_short())
    }

    /// Overwrites the raw text, creating the property when it is missing.
    pub fn set_raw(self, tree: &mut Tree, field: SchedulingField, value: impl Into<String>) -> bool {
        let value = value.into();
        match child(tree, self.0, field.id_short()) {
            Some(id) => tree.get_mut(id).is_some_and(|node| node.set_scalar(value)),
            None => append(
                tree,
                self.0,
                Node::string_property(field.id_short(), value)
                    .with_semantic_id(semantic(field.semantic_uri())),
            )
            .is_some(),
        }
    }

    #[must_use]
    pub fn start_date_time(self, tree: &Tree) -> Option<NaiveDateTime> {
        self.raw(tree, SchedulingField::StartDateTime).and_then(parse_date_time)
    }

    #[must_use]
    pub fn end_date_time(self, tree: &Tree) -> Option<NaiveDateTime> {
        self.raw(tree, SchedulingField::EndDateTime).and_then(parse_date_time)
    }

    #[must_use]
    pub fn setup_time(self, tree: &Tree) -> Option<TimeDelta> {
        self.raw(tree, SchedulingField::SetupTime).and_then(parse_duration)
    }

    #[must_use]
    pub fn cycle_time(self, tree: &Tree) -> Option<TimeDelta> {
        self.raw(tree, SchedulingField::CycleTime).and_then(parse_duration)
    }

    pub fn set_start_date_time(self, tree: &mut Tree, value: NaiveDateTime) -> bool {
        self.set_raw(tree, SchedulingField::StartDateTime, format_date_time(value))
    }

    pub fn set_end_date_time(self, tree: &mut Tree, value: NaiveDateTime) -> bool {
        self.set_raw(tree, SchedulingField::EndDateTime, format_date_time(value))
    }

    pub fn set_setup_time(self, tree: &mut Tree, value: TimeDelta) -> bool {
        self.set_raw(tree, SchedulingField::SetupTime, format_duration(value))
    }

    pub fn set_cycle_time(self, tree: &mut Tree, value: TimeDelta) -> bool {
        self.set_raw(tree, SchedulingField::CycleTime, format_duration(value))
    }

    pub fn set_start_now(self, tree: &mut Tree) -> bool {
        self.set_start_date_time(tree, Utc::now().naive_utc())
    }

    pub fn set_end_now(self, tree: &mut Tree) -> bool {
        self.set_end_date_time(tree, Utc::now().naive_utc())
    }

    /// Stores `|end - start|` as the cycle time and returns it.
    ///
    /// Nothing changes unless both dates parse.
    pub fn calculate_cycle_time(self, tree: &mut Tree) -> Option<TimeDelta> {
        let start = self.start_date_time(tree)?;
        let end = self.end_date_time(tree)?;
        let cycle = (end - start).abs();
        self.set_cycle_time(tree, cycle);
        Some(cycle)
    }

    /// Rebases both dates onto `anchor`, keeping only their time of day as an offset.
    pub fn normalize_to_absolute_dates(self, tree: &mut Tree, anchor: NaiveDateTime) {
        for field in [SchedulingField::StartDateTime, SchedulingField::EndDateTime] {
            let Some(parsed) = self.raw(tree, field).and_then(parse_date_time) else {
                continue;
            };
            let offset = TimeDelta::seconds(i64::from(parsed.num_seconds_from_midnight()));
            match anchor.checked_add_signed(offset) {
                Some(adjusted) => {
                    self.set_raw(tree, field, format_date_time(adjusted));
                },
                None => debug!(field = field.id_short(), "normalized date out of range"),
            }
        }
    }

    /// Time from `anchor` until the start; zero without a start date.
    #[must_use]
    pub fn duration_until_start(self, tree: &Tree, anchor: NaiveDateTime) -> TimeDelta {
        self.start_date_time(tree).map_or(TimeDelta::zero(), |start| start - anchor)
    }

    #[must_use]
    pub fn allowed_to_start(self, tree: &Tree, anchor: NaiveDateTime) -> bool {
        self.duration_until_start(tree, anchor) <= TimeDelta::zero()
    }

    /// Copies the current values into `InitialScheduling`.
    pub fn record_initial(self, tree: &mut Tree) -> bool {
        let Some(initial) = self.initial(tree) else {
            return false;
        };
        for field in SchedulingField::ALL {
            let value = self.raw(tree, field).unwrap_or_default().to_owned();
            initial.set_raw(tree, field, value);
        }
        true
    }
}

#[must_use]
pub fn parse_date_time(raw: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw.trim(), DATE_TIME_FORMAT).ok()
}

#[must_use]
pub fn format_date_time(value: NaiveDateTime) -> String {
    value.format(DATE_TIME_FORMAT).to_string()
}

/// Parses `HH:MM:SS` (any number of hours) or `D.HH:MM:SS`, optionally negative.
#[must_use]
pub fn parse_duration(raw: &str) -> Option<TimeDelta> {
    let raw = raw.trim();
    let (negative, raw) = raw.strip_prefix('-').map_or((false, raw), |rest| (true, rest));

    let (days, clock) = match raw.split_once('.') {
        Some((days, clock)) if !clock.contains('.') => (days.parse::<i64>().ok()?, clock),
        Some(_) => return None,
        None => (0, raw),
    };

    let mut parts = clock.split(':');
    let (Some(hours), Some(minutes), Some(seconds), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return None;
    };
    let hours: i64 = hours.parse().ok()?;
    let minutes: i64 = minutes.parse().ok()?;
    let seconds: i64 = seconds.parse().ok()?;
    if !(0..60).contains(&minutes) || !(0..60).contains(&seconds) || hours < 0 {
        return None;
    }

    let total = TimeDelta::try_days(days)?
        .checked_add(&TimeDelta::try_hours(hours)?)?
        .checked_add(&TimeDelta::minutes(minutes))?
        .checked_add(&TimeDelta::seconds(seconds))?;
    Some(if negative { -total } else { total })
}

/// Formats as `HH:MM:SS` with total hours; negative durations are written as their absolute value.
#[must_use]
pub fn format_duration(value: TimeDelta) -> String {
    let total = value.abs().num_seconds();
    format!("{:02}:{:02}:{:02}", total / 3600, (total % 3600) / 60, total % 60)
}
