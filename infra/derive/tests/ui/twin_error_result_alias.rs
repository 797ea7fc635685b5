use std::borrow::Cow;
use twin_derive::twin_error;

#[twin_error(result = StoreResult)]
pub enum StoreError {
    #[error("IO error{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },
}

fn open() -> StoreResult<()> {
    Err(std::io::Error::other("missing")).context("opening store")
}

fn main() {
    assert!(open().is_err());
}
