//! Facade crate for the twin toolkit.
//! Re-exports the domain/kernel primitives and the feature crates under one name.
//! Keep this crate thin: it should compose other crates, not implement business logic.
//!
//! ## Usage
//! - Add `twin` (`production` and `schedule` are on by default, `full` adds
//!   `nameplate` and `capability`).
//! - Reach for [`prelude`] in binaries and tests.
//!
//! ```rust
//! use twin::prelude::*;
//!
//! let mut tree = Tree::new();
//! let root = tree.insert(Node::collection("Nameplate"));
//! let json = to_canonical_string(&tree, root, false).unwrap();
//! assert!(json.contains("Nameplate"));
//! ```

pub use twin_codec as codec;
pub use twin_domain as domain;
pub use twin_kernel as kernel;
pub use twin_lifecycle as lifecycle;
pub use twin_model as model;
#[cfg(feature = "capability")]
pub use twin_capability as capability;
#[cfg(feature = "nameplate")]
pub use twin_nameplate as nameplate;
#[cfg(feature = "production")]
pub use twin_production as production;
#[cfg(feature = "schedule")]
pub use twin_schedule as schedule;

/// Commonly used types across the feature crates.
pub mod prelude {
    pub use twin_codec::{Canonicalizer, CodecError, read, read_str, to_canonical_string, write};
    pub use twin_domain::status::{ActionStatus, StepStatus};
    pub use twin_lifecycle::{OrderState, StateMachine, Stateful, Transition};
    pub use twin_model::{DataType, Lookup, Node, NodeId, Reference, Tree};
    #[cfg(feature = "production")]
    pub use twin_production::{Action, ActionSpec, ProductionPlan, Step, StepSpec};
    #[cfg(feature = "schedule")]
    pub use twin_schedule::{MachineSchedule, ScheduleSync};
    #[cfg(feature = "nameplate")]
    pub use twin_nameplate::{Nameplate, NameplateData};
    #[cfg(feature = "capability")]
    pub use twin_capability::{CapabilityContainer, CapabilityDescription, CapabilityTemplate};
}

/// Feature registry for runtime introspection.
pub mod features {
    /// Build-time enabled features (by Cargo feature).
    pub const ENABLED: &[&str] = &[
        "model",
        "lifecycle",
        "codec",
        #[cfg(feature = "production")]
        "production",
        #[cfg(feature = "schedule")]
        "schedule",
        #[cfg(feature = "nameplate")]
        "nameplate",
        #[cfg(feature = "capability")]
        "capability",
    ];

    #[must_use]
    pub fn is_enabled(name: &str) -> bool {
        ENABLED.contains(&name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn core_slices_are_always_enabled() {
        for name in ["model", "lifecycle", "codec"] {
            assert!(features::is_enabled(name), "{name}");
        }
        assert!(!features::is_enabled("server"));
    }

    #[cfg(feature = "production")]
    #[test]
    fn production_slice_is_reachable() {
        let plan = production::ProductionPlan::builder().quantity(1).build();
        assert!(features::is_enabled("production"));
        assert_eq!(plan.quantity(), Some(1));
    }

    #[cfg(feature = "schedule")]
    #[test]
    fn schedule_slice_builds_on_production() {
        let schedule = schedule::MachineSchedule::builder().identifier("urn:twin:schedule").build();
        assert!(features::is_enabled("production"));
        assert!(!schedule.has_open_tasks());
    }

    #[cfg(feature = "capability")]
    #[test]
    fn capability_slice_is_reachable() {
        let description = capability::CapabilityDescription::builder().build();
        assert!(features::is_enabled("capability"));
        assert!(description.capability_names().is_empty());
    }
}
