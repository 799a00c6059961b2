//! Division: normalized schoolbook long division (Knuth's Algorithm D),
//! folding every divisor length into one general path rather than
//! special-casing divisors of one or two limbs behind a reciprocal (see
//! the n-by-2 division note in the design ledger).

use super::limbs;
use crate::error::{Error, Result};
use crate::limb::{add_cc, div_2by1, mul_ww, nlz, sub_cb, Limb};
use crate::scratch::Scratch;

/// `(remainder, quotient_size)` for `x[:size] / d`. `q`, if given, must
/// have room for `size` limbs. `d` must be nonzero.
pub fn div_limb(q: Option<&mut [Limb]>, x: &[Limb], d: Limb) -> (Limb, usize) {
    debug_assert!(d != 0);
    let mut r: Limb = 0;
    match q {
        Some(q) => {
            for i in (0..x.len()).rev() {
                let (qq, rr) = div_2by1(r, x[i], d);
                q[i] = qq;
                r = rr;
            }
            (r, limbs(&q[..x.len()]))
        }
        None => {
            for i in (0..x.len()).rev() {
                let (_, rr) = div_2by1(r, x[i], d);
                r = rr;
            }
            (r, 0)
        }
    }
}

/// `r[] -= a[] * m`, returns the borrow out of the top limb.
fn sub_mul(r: &mut [Limb], a: &[Limb], m: Limb) -> Limb {
    let mut borrow: Limb = 0;
    for i in 0..a.len() {
        let (hi, lo) = mul_ww(a[i], m);
        let (d, bo) = sub_cb(r[i], lo, borrow);
        r[i] = d;
        borrow = hi + bo as Limb;
    }
    borrow
}

/// `a[] += b[]` in place, returns the carry out.
fn add_assign(a: &mut [Limb], b: &[Limb]) -> Limb {
    let mut carry: Limb = 0;
    for i in 0..a.len() {
        let (s, c) = add_cc(a[i], b[i], carry);
        a[i] = s;
        carry = c;
    }
    carry
}

/// In-place `x[:xsize] = x[:xsize] / y[:ysize]` (into `q`, if given)
/// with `x[:xsize]` replaced by the remainder on return.
///
/// `x` must have room for `xsize + 1` limbs — normalization may need
/// one extra limb at the top — and `y` is temporarily normalized
/// (shifted left) and shifted back down before returning. `q`, if
/// given, must have room for `xsize - ysize + 1` limbs.
///
/// Returns `(remainder_size, quotient_size)`. The caller is expected to
/// have already handled `xsize < ysize` (the whole of `x` is the
/// remainder, no division needed) — that case returns
/// `Error::RangeError` here rather than silently doing the wrong thing.
pub fn div(
    mut q: Option<&mut [Limb]>,
    x: &mut [Limb],
    xsize: usize,
    y: &mut [Limb],
    ysize: usize,
) -> Result<(usize, usize)> {
    if ysize == 0 {
        return Err(Error::InvalidArgument);
    }
    if xsize < ysize {
        return Err(Error::RangeError);
    }
    if let Some(ref q) = q {
        if q.len() < xsize - ysize + 1 {
            return Err(Error::RangeError);
        }
    }
    if x.len() < xsize + 1 {
        return Err(Error::RangeError);
    }

    if ysize == 1 {
        let (r, qn) = div_limb(q.as_deref_mut(), &x[..xsize], y[0]);
        x[0] = r;
        return Ok((if r == 0 { 0 } else { 1 }, qn));
    }

    let qsz = xsize - ysize + 1;
    let shift = nlz(y[ysize - 1]);

    // x[xsize] is pre-zeroed room for a carry out of the top limb when
    // normalizing; the shift amount is always < LIMB_BITS (it is the
    // leading-zero count of a single limb), so normalizing never needs
    // more than this one extra limb, and the division loop below always
    // runs from the original `xsize` down regardless of whether that
    // slot ended up occupied.
    x[xsize] = 0;
    if shift != 0 {
        super::lshift(x, xsize, shift);
        super::lshift(y, ysize, shift);
    }

    if let Some(ref mut q) = q {
        for limb in q[..qsz].iter_mut() {
            *limb = 0;
        }
    }

    let yy = y[ysize - 1];
    let y2 = y[ysize - 2];
    for i in (ysize..=xsize).rev() {
        debug_assert!(x[i] <= yy);

        // Initial quotient-digit estimate from the top two limbs of the
        // remainder divided by y's top limb; `rem_overflowed` tracks the
        // case where x[i] == yy forces qd to its maximal value B-1 and
        // the matching remainder no longer fits in one limb — when that
        // happens the refinement loop below can never fire (an
        // overflowed remainder is larger than any single-limb product
        // could be), so it's skipped outright rather than modeled with
        // a second remainder limb.
        let (mut qd, mut rem, rem_overflowed) = if x[i] == yy {
            let (sum, carry) = x[i - 1].overflowing_add(yy);
            (Limb::MAX, sum, carry)
        } else {
            let (qq, rr) = div_2by1(x[i], x[i - 1], yy);
            (qq, rr, false)
        };

        if !rem_overflowed {
            let (mut prod_hi, mut prod_lo) = mul_ww(qd, y2);
            loop {
                let xxx = x[i - 2];
                if prod_hi < rem || (prod_hi == rem && prod_lo <= xxx) {
                    break;
                }
                qd -= 1;
                let (new_rem, carry) = rem.overflowing_add(yy);
                rem = new_rem;
                if carry {
                    break;
                }
                if prod_lo < y2 {
                    prod_hi -= 1;
                }
                prod_lo = prod_lo.wrapping_sub(y2);
            }
        }

        if qd > 0 {
            let borrow = sub_mul(&mut x[i - ysize..i], &y[..ysize], qd);
            let (new_top, underflow) = x[i].overflowing_sub(borrow);
            x[i] = new_top;
            if underflow {
                let carry = add_assign(&mut x[i - ysize..i], &y[..ysize]);
                x[i] = x[i].wrapping_add(carry);
                qd -= 1;
            }
        }

        if let Some(ref mut q) = q {
            q[i - ysize] = qd;
        }
    }

    let remsize = if shift != 0 {
        let n = super::rshift(x, xsize + 1, shift);
        super::rshift(y, ysize, shift);
        n
    } else {
        limbs(&x[..xsize + 1])
    };

    let qn = match q {
        Some(q) => limbs(&q[..qsz]),
        None => 0,
    };

    Ok((remsize, qn))
}

/// `x[:xsize] %= y[:ysize]`, in place. Convenience wrapper around
/// [`div`] with no quotient buffer.
pub fn rem(x: &mut [Limb], xsize: usize, y: &mut [Limb], ysize: usize) -> Result<usize> {
    let (r, _) = div(None, x, xsize, y, ysize)?;
    Ok(r)
}

/// Non-mutating `(quotient, remainder)`, computed over scratch borrowed
/// from `scratch`; `a` and `b` are left untouched. `a` and `b` need not
/// be the same length as each other.
pub fn divmod(scratch: &mut Scratch, a: &[Limb], b: &[Limb]) -> Result<(Vec<Limb>, Vec<Limb>)> {
    let asize = limbs(a);
    let bsize = limbs(b);
    if bsize == 0 {
        return Err(Error::InvalidArgument);
    }
    if asize < bsize {
        return Ok((Vec::new(), a[..asize].to_vec()));
    }

    let xmark = scratch.get(asize + 1);
    let ymark = scratch.get(bsize);
    scratch.slice_mut(&xmark)[..asize].copy_from_slice(&a[..asize]);
    scratch.slice_mut(&xmark)[asize] = 0;
    scratch.slice_mut(&ymark)[..bsize].copy_from_slice(&b[..bsize]);

    let qsz = asize - bsize + 1;
    let mut q = vec![0 as Limb; qsz];
    let (rsize, qn) = {
        let (x, y) = scratch.two_slices_mut(&xmark, &ymark);
        div(Some(&mut q), x, asize, y, bsize)?
    };
    q.truncate(qn);
    let r = scratch.slice_mut(&xmark)[..rsize].to_vec();

    scratch.put(ymark);
    scratch.put(xmark);

    Ok((q, r))
}

#[cfg(test)]
fn check_divmod(a: &[Limb], b: &[Limb], q: &[Limb], r: &[Limb]) {
    let bn = limbs(b);
    let qn = limbs(q);
    let mut prod = vec![0 as Limb; qn + bn + 1];
    if qn > 0 {
        super::mul(&mut prod[..qn + bn], &q[..qn], &b[..bn]);
    }
    let rn = limbs(r);
    let width = prod.len().max(rn + 1);
    let mut prodbuf = vec![0 as Limb; width];
    prodbuf[..prod.len()].copy_from_slice(&prod);
    let mut rbuf = vec![0 as Limb; width];
    rbuf[..rn].copy_from_slice(&r[..rn]);
    let carry = {
        let mut carry: Limb = 0;
        for i in 0..width {
            let (s, c) = add_cc(prodbuf[i], rbuf[i], carry);
            prodbuf[i] = s;
            carry = c;
        }
        carry
    };
    assert_eq!(carry, 0);
    let n = limbs(&prodbuf);
    assert_eq!(&prodbuf[..n], &a[..limbs(a)]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scratch::Scratch;

    #[test]
    fn div_limb_basic() {
        let x = [100 as Limb];
        let mut q = [0 as Limb; 1];
        let (r, qn) = div_limb(Some(&mut q), &x, 7);
        assert_eq!(r, 2);
        assert_eq!(qn, 1);
        assert_eq!(q[0], 14);
    }

    #[test]
    fn divmod_small() {
        let mut scratch = Scratch::new(64);
        let a = [100 as Limb];
        let b = [7 as Limb];
        let (q, r) = divmod(&mut scratch, &a, &b).unwrap();
        assert_eq!(q, vec![14]);
        assert_eq!(r, vec![2]);
        check_divmod(&a, &b, &q, &r);
    }

    #[test]
    fn divmod_multi_limb() {
        let mut scratch = Scratch::new(64);
        // a = 2^128 - 1, b = 2^64 + 3
        let a = [Limb::MAX, Limb::MAX];
        let b = [3 as Limb, 1];
        let (q, r) = divmod(&mut scratch, &a, &b).unwrap();
        check_divmod(&a, &b, &q, &r);
    }

    #[test]
    fn divmod_exact_division() {
        let mut scratch = Scratch::new(64);
        let a = [0 as Limb, 6]; // 6 * 2^W
        let b = [2 as Limb];
        let (q, r) = divmod(&mut scratch, &a, &b).unwrap();
        assert_eq!(r, Vec::<Limb>::new());
        check_divmod(&a, &b, &q, &r);
    }

    #[test]
    fn divmod_dividend_smaller_than_divisor() {
        let mut scratch = Scratch::new(64);
        let a = [3 as Limb];
        let b = [0 as Limb, 1];
        let (q, r) = divmod(&mut scratch, &a, &b).unwrap();
        assert!(q.is_empty());
        assert_eq!(r, vec![3]);
    }

    #[test]
    fn div_zero_divisor_is_invalid() {
        let mut scratch = Scratch::new(64);
        let a = [1 as Limb];
        let b: [Limb; 0] = [];
        assert_eq!(divmod(&mut scratch, &a, &b), Err(Error::InvalidArgument));
    }

    #[test]
    fn divmod_three_limb_divisor() {
        let mut scratch = Scratch::new(64);
        let a = [1 as Limb, 2, 3, 4];
        let b = [5 as Limb, 6, 1];
        let (q, r) = divmod(&mut scratch, &a, &b).unwrap();
        check_divmod(&a, &b, &q, &r);
    }
}
