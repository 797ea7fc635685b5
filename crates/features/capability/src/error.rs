use std::borrow::Cow;
use twin_codec::CodecError;

#[twin_derive::twin_error(result = CapabilityResult)]
pub enum CapabilityError {
    #[error("Codec error{}: {source}", format_context(.context))]
    Codec { source: CodecError, context: Option<Cow<'static, str>> },

    /// A template or container definition cannot be turned into elements.
    #[error("Invalid capability definition{}: {message}", format_context(.context))]
    Definition { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Internal capability error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
