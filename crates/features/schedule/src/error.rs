use std::borrow::Cow;
use twin_codec::CodecError;

#[twin_derive::twin_error(result = ScheduleResult)]
pub enum ScheduleError {
    #[error("Codec error{}: {source}", format_context(.context))]
    Codec { source: CodecError, context: Option<Cow<'static, str>> },

    /// The repository refused a call. `message` carries its messages.
    #[error("Repository error{}: {message}", format_context(.context))]
    Remote { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Internal schedule error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
