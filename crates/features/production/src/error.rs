use std::borrow::Cow;
use twin_codec::CodecError;

#[twin_derive::twin_error(result = ProductionResult)]
pub enum ProductionError {
    /// A parameter key was empty or whitespace.
    #[error("Invalid parameter key{}: {message}", format_context(.context))]
    InvalidKey { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Codec error{}: {source}", format_context(.context))]
    Codec { source: CodecError, context: Option<Cow<'static, str>> },

    #[error("Internal production error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
