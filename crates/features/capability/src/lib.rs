//! # Capability Description
//!
//! The offered capabilities of a production island. A [`CapabilityDescription`]
//! holds a capability set with one container per capability; each container
//! carries the capability element, an optional comment, relations with
//! constraints, and a property set of ranges, fixed values and value lists.
//!
//! Containers are built from definitions and read back through `Copy` handles
//! such as [`CapabilityContainer`] and [`PropertyContainer`]. Sections are found
//! by semantic id first and by idShort second, so foreign documents read too.
//!
//! ```rust
//! use twin_capability::{
//!     CapabilityDescription, CapabilityElementDefinition, ContainerDefinition,
//!     PropertyContainerDefinition, PropertyContent, PropertySetDefinition,
//! };
//!
//! let mut description = CapabilityDescription::builder().identifier("urn:example:capabilities").build();
//! let container = description
//!     .add_container(
//!         &ContainerDefinition::builder()
//!             .id_short("DrillContainer")
//!             .capability(CapabilityElementDefinition::builder().id_short("Drill").build())
//!             .property_set(
//!                 PropertySetDefinition::builder()
//!                     .containers(vec![PropertyContainerDefinition::builder()
//!                         .id_short("Diameter")
//!                         .content(PropertyContent::range("DiameterMm", "2", "12"))
//!                         .build()])
//!                     .build(),
//!             )
//!             .build(),
//!     )
//!     .expect("valid definition");
//!
//! assert_eq!(description.capability_names(), ["Drill"]);
//! let tree = description.tree();
//! let diameter = container.property_container(tree, "diameter").expect("property container");
//! assert_eq!(diameter.range(tree).and_then(|range| range.range_bounds()), Some((Some("2"), Some("12"))));
//! ```

mod build;
mod definition;
mod description;
mod error;
mod sections;

pub use definition::{
    CapabilityElementDefinition, CapabilitySetDefinition, CapabilityTemplate, ConstraintContainerDefinition,
    ConstraintSetDefinition, ContainerDefinition, CustomConstraintDefinition, DEFAULT_ID_SHORT,
    PropertyContainerDefinition, PropertyContent, PropertyDefinition, PropertySetDefinition,
    RelationsDefinition, RelationshipDefinition, SectionDefinition, TextDefinition, multiplicity,
};
pub use description::{CapabilityDescription, CapabilityDescriptionBuilder};
pub use error::{CapabilityError, CapabilityErrorExt, CapabilityResult};
pub use sections::{
    CapabilityContainer, ConstraintContainer, ConstraintSet, CustomConstraint, PropertyContainer,
    PropertySet, Relations,
};
