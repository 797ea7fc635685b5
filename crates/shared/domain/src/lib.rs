//! # Domain Models
//!
//! Pure domain types with minimal dependencies (`serde`, `bitflags`).
//! Keep it lean: no I/O, no tree logic, just data and simple helpers.

pub mod config;
pub mod constants;
pub mod rules;
pub mod semantics;
pub mod status;
