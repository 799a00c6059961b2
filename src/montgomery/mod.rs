//! Montgomery modular arithmetic
//!
//! A [`Context`] binds a fixed odd modulus and the Montgomery constants
//! derived from it (`k0`, `R mod m`, `R^2 mod m`). The free functions in
//! [`ops`] and [`exp`] take a `&mut Context` alongside the limb arrays
//! they operate on, the same shape the reference engine's
//! `mont`-parameter functions have.

mod context;
pub mod exp;
pub mod ops;

pub use context::Context;
