//! Crate-wide error taxonomy
//!
//! The core's only error signal is a negative return value. This is the
//! Rust analogue: a flat, `Debug`-only enum with no `Display` or
//! `std::error::Error` impl, mirroring the style of the per-module error
//! enums elsewhere in this crate (e.g. `prime::generate`'s error paths).
//!
//! Variants map directly onto a familiar negative-errno taxonomy:
//! - `InvalidArgument` — `EINVAL`
//! - `RangeError` — `ERANGE`
//! - `AllocationFailure` — `ENOMEM`
//! - `Busy` — `EBUSY`
//! - `RngFailure` — `EACCES`

/// Errors produced by the limb-array kernel, the Montgomery engine, and
/// the primality subsystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A null-equivalent misuse: zero or even modulus passed where an odd
    /// modulus is required, a zero divisor, or another caller-side
    /// contract violation.
    InvalidArgument,

    /// An output buffer's capacity is insufficient for the result.
    RangeError,

    /// A scratch allocation could not be satisfied.
    AllocationFailure,

    /// A rejection-sampling loop exhausted its try budget.
    Busy,

    /// The caller-supplied random byte source failed.
    RngFailure,
}

/// Convenience alias used throughout the crate.
pub type Result<T> = core::result::Result<T, Error>;
