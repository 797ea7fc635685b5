//! # Submodel Codec
//!
//! Three stages around the interchange JSON:
//!
//! - [`write`] projects a [`Tree`](twin_model::Tree) verbatim, every field included.
//! - [`Canonicalizer`] rewrites that projection (or any external document) into the
//!   canonical shape expected by reference fixtures.
//! - [`read`] rebuilds a tree from JSON, tolerating unexpected shapes.
//!
//! Serializing, canonicalizing, reading the result back and serializing again yields
//! the same canonical document.
//!
//! ```rust
//! use twin_codec::{read_str, to_canonical_string};
//! use twin_model::{DataType, Node, Tree};
//!
//! let mut tree = Tree::new();
//! let root = tree.insert(Node::collection("Endpoint"));
//! let uri = tree.insert(Node::property("Address", DataType::AnyUri, "http://host:1234/"));
//! tree.add(root, uri);
//!
//! let json = to_canonical_string(&tree, root, false).unwrap();
//! assert!(json.contains(r#""value":"http://host:1234""#));
//! assert!(!json.contains("semanticId"));
//!
//! let (parsed, parsed_root) = read_str(&json).unwrap();
//! assert_eq!(to_canonical_string(&parsed, parsed_root, false).unwrap(), json);
//! ```

mod canonical;
mod error;
mod fields;
mod reader;
mod writer;

pub use canonical::{Canonicalizer, to_canonical_string};
pub use error::{CodecError, CodecErrorExt, CodecResult};
pub use reader::{read, read_into, read_str};
pub use writer::write;
