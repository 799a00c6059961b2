//! Addition: equal-length vectorized core plus the ragged-length and
//! add-a-single-limb wrappers built on top of it.

use crate::limb::{add_cc, Limb};

/// `r[:n] = a[:n] + b[:n]`, returns the carry out. The three slices
/// must all have length `n`; `r` may alias `a` or `b`.
pub(crate) fn add_vectorized(r: &mut [Limb], a: &[Limb], b: &[Limb]) -> Limb {
    debug_assert_eq!(r.len(), a.len());
    debug_assert_eq!(r.len(), b.len());
    let mut carry = 0;
    for i in 0..r.len() {
        let (s, c) = add_cc(a[i], b[i], carry);
        r[i] = s;
        carry = c;
    }
    carry
}

/// `r[] = a[] + b[]`, requires `asize >= bsize`. `r` must have room for
/// at least `asize` limbs; if it has room for `asize + 1` and the
/// addition carries out of the top limb, that carry is stored as an
/// extra limb. Returns the carry out (0 or 1) regardless of whether it
/// fit in `r`.
///
/// Panics if `r` is shorter than `asize`.
pub fn add(r: &mut [Limb], a: &[Limb], b: &[Limb]) -> Limb {
    debug_assert!(a.len() >= b.len());
    assert!(r.len() >= a.len());

    let bsize = b.len();
    let asize = a.len();

    let mut carry = add_vectorized(&mut r[..bsize], &a[..bsize], b);

    for i in bsize..asize {
        let (s, c) = add_cc(a[i], 0, carry);
        r[i] = s;
        carry = c;
    }
    for limb in &mut r[asize..] {
        *limb = 0;
    }
    if carry != 0 && r.len() > asize {
        r[asize] = carry;
    }

    carry
}

/// `r[:n] = a[:n] + b[:n]`, returns the carry out. A thin public wrapper
/// around the equal-length core, for callers (the Montgomery layer) that
/// need the raw carry rather than a ragged-length combine that folds it
/// into an extra limb.
pub fn add_eq(r: &mut [Limb], a: &[Limb], b: &[Limb]) -> Limb {
    add_vectorized(r, a, b)
}

/// `r[] = a[] + w`, a single-limb increment. `r` must have room for at
/// least `a.len()` limbs, plus one more to capture a carry out of the
/// top limb. Returns the carry out.
pub fn inc(r: &mut [Limb], a: &[Limb], w: Limb) -> Limb {
    assert!(r.len() >= a.len());

    let mut carry = w;
    let mut i = 0;
    while i < a.len() && carry != 0 {
        let (s, c) = add_cc(a[i], 0, carry);
        r[i] = s;
        carry = c;
        i += 1;
    }
    if !core::ptr::eq(r.as_ptr(), a.as_ptr()) {
        r[i..a.len()].copy_from_slice(&a[i..]);
    }
    if carry != 0 && r.len() > a.len() {
        r[a.len()] = carry;
    }

    carry
}
