//! Subtraction: equal-length vectorized core plus the ragged-length and
//! subtract-a-single-limb wrappers. Both `sub` and `dec` trim their
//! result and return its significant length, unlike `add`/`inc` which
//! return a carry — this mirrors the asymmetry in the reference kernel
//! (subtraction within this crate is only ever used where the minuend
//! is not smaller than the subtrahend, so there is no borrow to report
//! to the caller, only a possibly-shorter result).

use super::limbs;
use crate::limb::{sub_cb, Limb};

/// `r[:n] = a[:n] - b[:n]`, returns the borrow out.
pub(crate) fn sub_vectorized(r: &mut [Limb], a: &[Limb], b: &[Limb]) -> Limb {
    debug_assert_eq!(r.len(), a.len());
    debug_assert_eq!(r.len(), b.len());
    let mut borrow = 0;
    for i in 0..r.len() {
        let (d, bo) = sub_cb(a[i], b[i], borrow);
        r[i] = d;
        borrow = bo;
    }
    borrow
}

/// `r[:n] = a[:n] - b[:n]`, returns the borrow out. A thin public wrapper
/// around the equal-length core, for callers (the Montgomery layer) that
/// need the raw borrow rather than a trimmed, assumed-nonnegative result.
pub fn sub_eq(r: &mut [Limb], a: &[Limb], b: &[Limb]) -> Limb {
    sub_vectorized(r, a, b)
}

/// `r[] = a[] - b[]`, requires `asize >= bsize` and (as the caller's
/// responsibility) `a >= b` as multi-precision values — an underflow
/// out of the top limb is not representable and is left as whatever
/// two's-complement wraparound the borrow chain produces. Returns the
/// significant length of the result (trailing zero limbs removed).
///
/// Panics if `r` is shorter than `asize`.
pub fn sub(r: &mut [Limb], a: &[Limb], b: &[Limb]) -> usize {
    debug_assert!(a.len() >= b.len());
    assert!(r.len() >= a.len());

    let bsize = b.len();
    let asize = a.len();

    let mut borrow = sub_vectorized(&mut r[..bsize], &a[..bsize], b);
    for i in bsize..asize {
        let (d, bo) = sub_cb(a[i], 0, borrow);
        r[i] = d;
        borrow = bo;
    }

    limbs(&r[..asize])
}

/// `r[] = a[] - w`, a single-limb decrement. Requires `a >= w` (as a
/// multi-precision value). Returns the new significant length.
pub fn dec(r: &mut [Limb], a: &[Limb], w: Limb) -> usize {
    assert!(r.len() >= a.len());
    debug_assert!(a.len() > 1 || a.first().copied().unwrap_or(0) >= w);

    let mut borrow = w;
    let mut i = 0;
    while i < a.len() && borrow != 0 {
        let (d, bo) = sub_cb(a[i], 0, borrow);
        r[i] = d;
        borrow = bo;
        i += 1;
    }
    if !core::ptr::eq(r.as_ptr(), a.as_ptr()) {
        r[i..a.len()].copy_from_slice(&a[i..]);
    }

    limbs(&r[..a.len()])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sub_equal_length_no_borrow() {
        let a = [5 as Limb, 7, 9];
        let b = [4 as Limb, 5, 6];
        let mut r = [0 as Limb; 3];
        let n = sub(&mut r, &a, &b);
        assert_eq!(n, 3);
        assert_eq!(&r[..n], &[1, 2, 3]);
    }

    #[test]
    fn sub_to_zero_trims_length() {
        let a = [5 as Limb, 0, 0];
        let b = [5 as Limb];
        let mut r = [0xff as Limb; 3];
        let n = sub(&mut r, &a, &b);
        assert_eq!(n, 0);
    }

    #[test]
    fn sub_ragged_with_borrow_chain() {
        let a = [0 as Limb, 1];
        let b = [1 as Limb];
        let mut r = [0 as Limb; 2];
        let n = sub(&mut r, &a, &b);
        assert_eq!(n, 1);
        assert_eq!(r[0], Limb::MAX);
    }

    #[test]
    fn dec_basic() {
        let a = [0 as Limb, 1, 5];
        let mut r = [0 as Limb; 3];
        let n = dec(&mut r, &a, 1);
        assert_eq!(n, 3);
        assert_eq!(r, [Limb::MAX, 0, 5]);
    }
}
