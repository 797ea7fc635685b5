use std::borrow::Cow;
use twin_codec::CodecError;

#[twin_derive::twin_error(result = NameplateResult)]
pub enum NameplateError {
    #[error("Codec error{}: {source}", format_context(.context))]
    Codec { source: CodecError, context: Option<Cow<'static, str>> },

    #[error("Internal nameplate error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
