// Wire labels shared by the status enums.
pub const STATUS_OPEN: &str = "open";
pub const STATUS_PLANNED: &str = "planned";
pub const STATUS_EXECUTING: &str = "executing";
pub const STATUS_SUSPENDED: &str = "suspended";
pub const STATUS_DONE: &str = "done";
pub const STATUS_ABORTED: &str = "aborted";
pub const STATUS_ERROR: &str = "error";

// Canonicalization rule names (config and CLI).
pub const RULE_EMPTY_SEMANTIC_ID: &str = "empty-semantic-id";
pub const RULE_EMPTY_ARRAYS: &str = "empty-arrays";
pub const RULE_EMPTY_ID_SHORT: &str = "empty-id-short";
pub const RULE_ANY_URI_SLASH: &str = "any-uri-slash";
pub const RULE_LANG_STRINGS: &str = "lang-strings";
pub const RULE_LEGACY_KEYS: &str = "legacy-keys";
pub const RULE_LIST_VALUE_TYPE: &str = "list-value-type";

/// Misspelled operation variable key still produced by older serializers.
pub const LEGACY_INOUTPUT_VARIABLES: &str = "inOutputVariables";
pub const INOUTPUT_VARIABLES: &str = "inoutputVariables";
pub const INPUT_VARIABLES: &str = "inputVariables";
pub const OUTPUT_VARIABLES: &str = "outputVariables";

/// Namespace prefix of XML-Schema value type tags.
pub const XS_PREFIX: &str = "xs:";
