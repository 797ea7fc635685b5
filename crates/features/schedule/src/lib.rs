//! # Machine Schedule
//!
//! The schedule submodel of a machine: a `LastTimeUpdated` stamp, a
//! `HasOpenTasks` flag and an ordered `Schedule` list of scheduling entries
//! copied from production steps. [`ScheduleSync`] pushes and pulls it through
//! a [`Repository`](twin_kernel::repository::Repository).
//!
//! ```rust
//! use twin_production::{Step, StepSpec};
//! use twin_model::Tree;
//! use twin_schedule::MachineSchedule;
//!
//! let mut plan = Tree::new();
//! let step = Step::create(&mut plan, &StepSpec::builder().id_short("Step001").build());
//!
//! let mut schedule = MachineSchedule::builder().identifier("urn:example:schedule").build();
//! schedule.schedule_step(&plan, step);
//! schedule.schedule_step(&plan, step);
//!
//! assert_eq!(schedule.schedules().len(), 1);
//! assert!(schedule.has_open_tasks(), "an entry without an end is open");
//! ```

mod error;
mod schedule;
mod sync;

pub use error::{ScheduleError, ScheduleErrorExt, ScheduleResult};
pub use schedule::{MachineSchedule, MachineScheduleBuilder, MachineScheduleData};
pub use sync::ScheduleSync;
