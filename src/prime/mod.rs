//! Primality: the known-small-primes table, the trial-division sieve
//! built on it, Miller–Rabin witness testing, and probable-prime
//! generation on top of both.

mod generate;
mod miller_rabin;
mod sieve;
mod table;

pub use generate::{probable_prime, probable_prime_dh, safe_prime};
pub use miller_rabin::{checks_for_bits, is_prime};
pub use sieve::{is_small_prime, trial_division_factor};
pub use table::KNOWN_PRIMES;
