//! JSON member names of the interchange format.

pub(crate) const ID_SHORT: &str = "idShort";
pub(crate) const ID: &str = "id";
pub(crate) const KIND: &str = "kind";
pub(crate) const CATEGORY: &str = "category";
pub(crate) const DISPLAY_NAME: &str = "displayName";
pub(crate) const DESCRIPTION: &str = "description";
pub(crate) const SEMANTIC_ID: &str = "semanticId";
pub(crate) const SUPPLEMENTAL_SEMANTIC_IDS: &str = "supplementalSemanticIds";
pub(crate) const QUALIFIERS: &str = "qualifiers";
pub(crate) const EMBEDDED_DATA_SPECIFICATIONS: &str = "embeddedDataSpecifications";
pub(crate) const SUBMODEL_ELEMENTS: &str = "submodelElements";
pub(crate) const MODEL_TYPE: &str = "modelType";
pub(crate) const VALUE: &str = "value";
pub(crate) const VALUE_TYPE: &str = "valueType";
pub(crate) const ORDER_RELEVANT: &str = "orderRelevant";
pub(crate) const TYPE_VALUE_LIST_ELEMENT: &str = "typeValueListElement";
pub(crate) const VALUE_TYPE_LIST_ELEMENT: &str = "valueTypeListElement";
pub(crate) const MIN: &str = "min";
pub(crate) const MAX: &str = "max";
pub(crate) const FIRST: &str = "first";
pub(crate) const SECOND: &str = "second";
pub(crate) const TYPE: &str = "type";
pub(crate) const KEYS: &str = "keys";
pub(crate) const LANGUAGE: &str = "language";
pub(crate) const TEXT: &str = "text";

/// Arrays dropped from canonical output when empty.
pub(crate) const OPTIONAL_ARRAYS: [&str; 5] =
    [QUALIFIERS, DESCRIPTION, DISPLAY_NAME, SUPPLEMENTAL_SEMANTIC_IDS, EMBEDDED_DATA_SPECIFICATIONS];
