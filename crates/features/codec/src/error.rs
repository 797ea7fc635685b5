use std::borrow::Cow;

/// Errors raised while reading, writing or canonicalizing submodel JSON.
#[twin_derive::twin_error(result = CodecResult)]
pub enum CodecError {
    /// The input is not valid JSON, or the output could not be rendered.
    #[error("JSON error{}: {source}", format_context(.context))]
    Json { source: serde_json::Error, context: Option<Cow<'static, str>> },

    /// The legacy operation key survived the rename pass. `message` holds the JSON path.
    #[error("Legacy key 'inOutputVariables' remains at {message}{}", format_context(.context))]
    LegacyKeyRemains { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The document or tree has no usable root.
    #[error("Structure error{}: {message}", format_context(.context))]
    Structure { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Internal codec error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
