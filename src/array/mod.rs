//! Limb-array kernel
//!
//! Multi-precision integers are represented here as little-endian
//! slices of [`Limb`](crate::limb::Limb): `a[0]` is the least
//! significant limb. Every operation takes explicit lengths rather than
//! relying on a sentinel, mirroring the pointer-plus-length contracts
//! this kernel is built from. Output slices are capacities ("room"):
//! callers must size them for the operation's worst case and a
//! returned length tells them how much of it holds a meaningful
//! result.
//!
//! Submodules group operations the way the reference kernel does: one
//! file per operation family rather than one flat module.

mod add;
mod cmp;
mod consttime;
mod div;
mod mul;
mod shift;
mod sub;

pub use add::{add, add_eq, inc};
pub use cmp::cmp;
pub use consttime::{ct_bit_size, ct_is_zero, ct_limbs};
pub use div::{div, div_limb, divmod, rem};
pub use mul::{mul, mul_acc, sqr};
pub use shift::{lshift, rshift};
pub use sub::{dec, sub, sub_eq};

use crate::limb::Limb;

/// Trims trailing zero limbs and returns the significant length.
/// `limbs(&[]) == 0`.
pub fn limbs(a: &[Limb]) -> usize {
    let mut n = a.len();
    while n > 0 && a[n - 1] == 0 {
        n -= 1;
    }
    n
}

/// Highest set bit position, i.e. `limbs(a) * LIMB_BITS - nlz(a[top])`.
/// Zero for an all-zero slice.
pub fn bits(a: &[Limb]) -> u32 {
    let n = limbs(a);
    if n == 0 {
        return 0;
    }
    n as u32 * crate::limb::LIMB_BITS - crate::limb::nlz(a[n - 1])
}

/// `true` iff every limb of `a` is zero. Branches on slice length only,
/// not on limb values; for a variant that never short-circuits across
/// limb boundaries either, see [`ct_is_zero`].
pub fn is_zero(a: &[Limb]) -> bool {
    a.iter().all(|&x| x == 0)
}
