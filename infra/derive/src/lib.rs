#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Procedural macros shared across the workspace.
//!
//! Only one macro lives here today: [`macro@twin_error`], which turns a plain enum
//! into an error type with context support and upstream conversions.

mod error;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// Attribute macro for defining domain-specific error enums.
///
/// # Features
///
/// * **Automatic Derives**: Injects `#[derive(Debug, thiserror::Error)]` unless already present.
/// * **Context Support**: Generates a companion `...Ext` trait that adds `.context()`
///   to any `Result` that can be converted into this error type.
/// * **Standard Conversions**: Implements `From<T>` for variants containing a `source` field,
///   enabling the use of the `?` operator for upstream errors.
/// * **Internal Fallback**: Provides `From<&str>` and `From<String>` implementations
///   if an `Internal` variant is present.
/// * **Result Alias**: `#[twin_error(result = CodecResult)]` additionally emits
///   `pub type CodecResult<T> = std::result::Result<T, CodecError>;`.
///
/// # Requirements
///
/// 1. The macro must be applied to an **enum**.
/// 2. Variants that support context must include a `context: Option<Cow<'static, str>>` field.
/// 3. Variants wrapping external errors must include a `source: T` field or a field marked
///    with `#[source]`/`#[from]` (compatible with `thiserror`).
/// 4. Tuple or unit variants are rejected.
///
/// # Example
///
/// ```rust,ignore
/// use std::borrow::Cow;
/// use twin_derive::twin_error;
///
/// #[twin_error(result = CodecResult)]
/// pub enum CodecError {
///     #[error("JSON error{}: {source}", format_context(.context))]
///     Json { source: serde_json::Error, context: Option<Cow<'static, str>> },
///
///     #[error("Internal codec error{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
///
/// fn parse(raw: &str) -> CodecResult<serde_json::Value> {
///     serde_json::from_str(raw).context("Parsing submodel document")
/// }
/// ```
#[proc_macro_attribute]
pub fn twin_error(args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    error::expand_derive(args.into(), input).into()
}
