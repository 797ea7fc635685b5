use std::borrow::Cow;
use twin_derive::twin_error;

#[twin_error]
pub enum ParseError {
    #[error("Number error{}: {source}", format_context(.context))]
    Number { source: std::num::ParseIntError, context: Option<Cow<'static, str>> },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn parse(raw: &str) -> Result<i64, ParseError> {
    raw.parse::<i64>().context("reading quantity")
}

fn main() {
    assert!(parse("12").is_ok());
    let err = parse("twelve").unwrap_err();
    assert!(err.to_string().contains("(reading quantity)"));

    let internal: ParseError = "broken".into();
    assert!(matches!(internal, ParseError::Internal { .. }));
}
