//! # Production Plan
//!
//! Typed views over the production plan submodel: a [`ProductionPlan`] holds
//! [`Step`]s, a step holds [`Action`]s. All of them live as nodes in the plan's
//! [`Tree`](twin_model::Tree); the handles here are cheap `Copy` ids.
//!
//! Action state changes propagate to the owning step through the tree, so a step
//! follows its actions without any back-pointers.
//!
//! ```rust
//! use twin_production::{ActionSpec, ProductionPlan, StepSpec};
//! use twin_domain::status::StepStatus;
//!
//! let mut plan = ProductionPlan::builder()
//!     .identifier("https://example.org/submodels/plan-1")
//!     .quantity(5)
//!     .build();
//! let step = StepSpec::builder()
//!     .id_short("Step001")
//!     .actions(vec![ActionSpec::builder().id_short("Action1").build()])
//!     .build();
//! plan.append_step(&step);
//!
//! assert!(plan.schedule_action("Step001", "Action001"));
//! assert_eq!(plan.steps_by_status(StepStatus::Planned).len(), 1);
//! ```

#[macro_use]
mod macros;

mod action;
mod elements;
mod error;
mod parameters;
mod plan;
mod scheduling;
mod skill;
mod step;

pub use action::{Action, ActionSpec, normalize_id_short};
pub use error::{ProductionError, ProductionErrorExt, ProductionResult};
pub use parameters::{ParameterSet, ParameterValue, Parameters};
pub use plan::{ProductionPlan, ProductionPlanBuilder};
pub use scheduling::{
    DATE_TIME_FORMAT, Scheduling, SchedulingField, SchedulingValues, format_date_time,
    format_duration, parse_date_time, parse_duration,
};
pub use skill::{EMPTY_SKILL, SkillReference};
pub use step::{StateSnapshot, Step, StepSpec};
