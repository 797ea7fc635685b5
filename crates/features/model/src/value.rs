use crate::node::ModelType;
use twin_domain::constants::XS_PREFIX;
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

/// XML-Schema value type tag of a scalar.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumIter, EnumString, IntoStaticStr,
)]
pub enum DataType {
    #[strum(serialize = "xs:anyURI")]
    AnyUri,
    #[strum(serialize = "xs:base64Binary")]
    Base64Binary,
    #[strum(serialize = "xs:boolean")]
    Boolean,
    #[strum(serialize = "xs:byte")]
    Byte,
    #[strum(serialize = "xs:date")]
    Date,
    #[strum(serialize = "xs:dateTime")]
    DateTime,
    #[strum(serialize = "xs:decimal")]
    Decimal,
    #[strum(serialize = "xs:double")]
    Double,
    #[strum(serialize = "xs:duration")]
    Duration,
    #[strum(serialize = "xs:float")]
    Float,
    #[strum(serialize = "xs:gDay")]
    GDay,
    #[strum(serialize = "xs:gMonth")]
    GMonth,
    #[strum(serialize = "xs:gMonthDay")]
    GMonthDay,
    #[strum(serialize = "xs:gYear")]
    GYear,
    #[strum(serialize = "xs:gYearMonth")]
    GYearMonth,
    #[strum(serialize = "xs:hexBinary")]
    HexBinary,
    #[strum(serialize = "xs:int")]
    Int,
    #[strum(serialize = "xs:integer")]
    Integer,
    #[strum(serialize = "xs:long")]
    Long,
    #[strum(serialize = "xs:negativeInteger")]
    NegativeInteger,
    #[strum(serialize = "xs:nonNegativeInteger")]
    NonNegativeInteger,
    #[strum(serialize = "xs:nonPositiveInteger")]
    NonPositiveInteger,
    #[strum(serialize = "xs:positiveInteger")]
    PositiveInteger,
    #[strum(serialize = "xs:short")]
    Short,
    #[default]
    #[strum(serialize = "xs:string")]
    String,
    #[strum(serialize = "xs:time")]
    Time,
    #[strum(serialize = "xs:unsignedByte")]
    UnsignedByte,
    #[strum(serialize = "xs:unsignedInt")]
    UnsignedInt,
    #[strum(serialize = "xs:unsignedLong")]
    UnsignedLong,
    #[strum(serialize = "xs:unsignedShort")]
    UnsignedShort,
}

impl DataType {
    /// Parses a tag with or without the `xs:` prefix.
    #[must_use]
    pub fn parse_lenient(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.starts_with(XS_PREFIX) {
            raw.parse().ok()
        } else {
            format!("{XS_PREFIX}{raw}").parse().ok()
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

/// A localized text entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LangString {
    pub language: String,
    pub text: String,
}

impl LangString {
    pub fn new(language: impl Into<String>, text: impl Into<String>) -> Self {
        Self { language: language.into(), text: text.into() }
    }
}

/// Leaf payload of a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scalar {
    Typed { value_type: DataType, value: Option<String> },
    MultiLanguage(Vec<LangString>),
    /// Closed interval; either bound may be open.
    Range { value_type: DataType, min: Option<String>, max: Option<String> },
}

/// Element kind metadata of an ordered list. The items themselves live in the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListSpec {
    pub element_type: ModelType,
    pub value_type: Option<DataType>,
    pub order_relevant: Option<bool>,
}

/// The closed set of node payloads.
///
/// Children of container variants are owned by the [`Tree`](crate::Tree), not stored here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Scalar(Scalar),
    OrderedList(ListSpec),
    NamedCollection,
    Reference(crate::Reference),
    /// Directed link between two referables.
    Relationship { first: crate::Reference, second: crate::Reference },
    /// No payload at all (capabilities).
    Empty,
}

impl Value {
    #[must_use]
    pub const fn is_container(&self) -> bool {
        matches!(self, Self::OrderedList(_) | Self::NamedCollection)
    }
}
