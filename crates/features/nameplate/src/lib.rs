//! # Nameplate
//!
//! The digital nameplate of a production island: manufacturer identity,
//! product designation, postal address with phone and e-mail contacts, and
//! the order code. Multi-language values are kept as given.
//!
//! ```rust
//! use twin_model::LangString;
//! use twin_nameplate::{Nameplate, NameplateData};
//!
//! let data = NameplateData::builder()
//!     .manufacturer_uri("https://example.org")
//!     .manufacturer_name(vec![LangString::new("de", "Beispiel GmbH")])
//!     .build();
//! let nameplate = Nameplate::builder().identifier("urn:example:nameplate").data(data).build();
//!
//! assert_eq!(nameplate.manufacturer_name("en").as_deref(), Some("Beispiel GmbH"));
//! ```

mod data;
mod error;
mod nameplate;

pub use data::{AddressData, EmailData, NameplateData, PhoneData};
pub use error::{NameplateError, NameplateErrorExt, NameplateResult};
pub use nameplate::{Nameplate, NameplateBuilder};
