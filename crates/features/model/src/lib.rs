//! # Submodel Node Tree
//!
//! Every submodel element (properties, collections, ordered lists, references,
//! operations) is a [`Node`] stored in a [`Tree`] arena. Parents own their
//! children; a child only records its parent's [`NodeId`].
//!
//! Steps and actions are ordinary nodes with a lifecycle [`Facet`] attached.
//! Transitions applied to an action are propagated to the step that owns it,
//! see [`Tree::apply`].
//!
//! ```rust
//! use twin_model::{DataType, Lookup, Node, Tree};
//!
//! let mut tree = Tree::new();
//! let root = tree.insert(Node::collection("Nameplate"));
//! let serial = tree.insert(Node::property("SerialNumber", DataType::String, "SN-1"));
//!
//! assert!(tree.add(root, serial));
//! assert!(!tree.add(root, serial), "a node has exactly one parent");
//! assert_eq!(tree.find(root, Lookup::IdShort("serialnumber")), Some(serial));
//! ```

mod facet;
mod node;
mod propagation;
mod qualifier;
mod reference;
mod tree;
mod value;

pub use facet::{ActionFacet, Facet, Role, StepFacet};
pub use node::{Identity, ModelType, ModelingKind, Node};
pub use qualifier::{Multiplicity, Qualifier, QualifierKind};
pub use reference::{Key, KeyType, Reference, ReferenceType};
pub use tree::{Lookup, NodeId, Tree};
pub use value::{DataType, LangString, ListSpec, Scalar, Value};

pub use twin_lifecycle::{OrderState, StateMachine, Stateful, Transition};
