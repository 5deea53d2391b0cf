//! Field validation before generation.

mod validate;

pub use validate::*;
