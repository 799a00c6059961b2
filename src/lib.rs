//! Arbitrary-precision unsigned integer arithmetic for cryptographic
//! workloads: RSA key generation and private-key operations, modular
//! exponentiation, primality testing, and the supporting modular
//! arithmetic.
//!
//! The crate is organized bottom-up, each layer built only on the ones
//! below it:
//!
//! - [`limb`]
//!   Machine-word primitives: add/sub-with-carry, a wide multiply and
//!   narrowing divide, leading/trailing-zero counts, and the
//!   constant-time mask selectors every higher layer's branch-free code
//!   is built from.
//!
//! - [`array`]
//!   The limb-array kernel: schoolbook add/sub/multiply/square, Knuth
//!   Algorithm D division, logical shifts, comparison, and a
//!   constant-time variant of the trimming/inspection helpers for
//!   secret-length operands.
//!
//! - [`scratch`]
//!   A LIFO bump arena for the temporary limb buffers the kernel and the
//!   Montgomery layer need, so hot paths don't allocate per call.
//!
//! - [`montgomery`]
//!   Montgomery modular arithmetic: context setup (`k0`, `R`, `R²`),
//!   the add/sub/neg/halve/double/triple/mul/square family, and
//!   variable-time and constant-time exponentiation (plain binary and
//!   fixed-window, the latter with a scrambled precomputed table).
//!
//! - [`prime`]
//!   The known-small-primes table, a trial-division sieve built on it,
//!   Miller–Rabin witness testing, and probable-prime generation
//!   (unconstrained, Diffie–Hellman-constrained, and safe-prime).
//!
//! - [`random`]
//!   The `RandBytes` callback contract primality and prime generation
//!   draw randomness through, plus rejection-sampled range generation.
//!
//! - [`int`]
//!   A sign-tracking variable-width integer built on the unsigned
//!   kernel, for callers that need ordinary signed arithmetic rather
//!   than raw limb arrays.
//!
//! - `rng` / `os`
//!   The crate's only source of entropy: a ChaCha20-based CSPRNG seeded
//!   from OS-provided randomness, backing the default `RandBytes`
//!   implementation ([`random::SystemRandom`]).
//!
//! # Design goals
//!
//! - No global mutable state; every `Context`, `Scratch`, and `Int` is
//!   owned by one logical call site at a time.
//! - Constant-time discipline wherever secret material (exponents,
//!   private factors, witnesses) is on the data path — no branch or
//!   memory index derived from a secret value.
//! - A single, flat error taxonomy ([`error::Error`]) rather than one
//!   type per failure mode.
//!
//! This crate is not a general-purpose bignum library: string/radix
//! conversion beyond a minimal big-endian and hex codec, RSA padding,
//! and key serialization are explicitly out of scope (see [`int`] for
//! the codec that does exist).

mod os;
mod rng;

pub mod array;
pub mod error;
pub mod int;
pub mod limb;
pub mod montgomery;
pub mod prime;
pub mod random;
pub mod scratch;
