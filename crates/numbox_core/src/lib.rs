//! numbox_core - numeric parsing and stepping engine
//!
//! This crate holds the value semantics behind a numeric input field: one
//! [`Strategy`] per machine representation, wrapped in the closed
//! [`NumberStrategy`] enum so a field can switch representation at runtime.

mod culture;
mod error;
mod kind;
mod number;
mod numeric;
mod strategy;

pub use culture::Culture;
pub use error::LookupError;
pub use kind::NumberKind;
pub use number::{Number, RawNumber};
pub use numeric::Numeric;
pub use strategy::{Declared, NumberStrategy, Strategy};

// Re-export the arbitrary precision types used by `Number`
pub use num_bigint::BigInt;
pub use rust_decimal::Decimal;
