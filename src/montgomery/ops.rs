//! Montgomery-domain arithmetic: reduction, encode/decode, and the
//! add/sub/neg/halve/double/triple/mul/square family, all operating on
//! values already reduced mod a [`Context`]'s modulus.

use crate::array;
use crate::limb::{add_cc, is_zero_mask, masked_copy, mul_ww, Limb};

use super::Context;

/// `dst = take` where `mask` is all-ones, `dst` unchanged where `mask` is
/// zero. Used throughout this module for the conditional-subtract
/// pattern instead of a data-dependent branch.
fn conditional_replace(dst: &mut [Limb], take: &[Limb], mask: Limb) {
    let orig = dst.to_vec();
    masked_copy(dst, take, &orig, mask);
}

/// CIOS Montgomery reduction. `product` holds a value of up to `2 *
/// msize` significant limbs plus one guard limb for carry overflow (so
/// `product.len() >= 2 * msize + 1`); on return `r` holds `product *
/// R^-1 mod m`.
///
/// This is the portable reduction every other operation in this module
/// is built from — there is no separate assembly-backed fast path (see
/// the design ledger's open-question resolution on that point).
pub(crate) fn reduce(r: &mut [Limb], product: &mut [Limb], ctx: &Context) {
    let msize = ctx.modsize();
    debug_assert_eq!(r.len(), msize);
    debug_assert!(product.len() >= 2 * msize + 1);
    let m = ctx.modulus();
    let k0 = ctx.k0();

    for i in 0..msize {
        let u = product[i].wrapping_mul(k0);
        let mut carry: Limb = 0;
        for j in 0..msize {
            let (hi, lo) = mul_ww(m[j], u);
            let (s1, c1) = add_cc(product[i + j], lo, 0);
            let (s2, c2) = add_cc(s1, carry, 0);
            product[i + j] = s2;
            carry = hi.wrapping_add(c1).wrapping_add(c2);
        }
        let mut k = i + msize;
        while carry != 0 {
            let (s, c) = add_cc(product[k], carry, 0);
            product[k] = s;
            carry = c;
            k += 1;
        }
    }

    let guard = product[2 * msize];
    let hi = product[msize..2 * msize].to_vec();
    let mut buffer = vec![0 as Limb; msize];
    let borrow = array::sub_eq(&mut buffer, &hi, m);

    // Subtract the modulus once whenever the carry chain overflowed past
    // the top limb (`guard != 0`, which always implies the true value
    // exceeds any single modsize-limb quantity) or the plain subtraction
    // didn't borrow (`hi >= m` already, with no guard involved). Both
    // legs are expressed as masks so the choice never branches on either
    // secret-dependent quantity.
    let guard_set = !is_zero_mask(guard);
    let hi_at_least_m = is_zero_mask(borrow);
    let take_buffer = guard_set | hi_at_least_m;

    r.copy_from_slice(&hi);
    conditional_replace(r, &buffer, take_buffer);
}

fn reduce_product(r: &mut [Limb], product: &mut Vec<Limb>, ctx: &Context) {
    let msize = ctx.modsize();
    product.resize(2 * msize + 1, 0);
    reduce(r, product, ctx);
}

/// Montgomery-encodes a plain, already-reduced value `a` (`a < m`) into
/// `r = a * R mod m`.
pub fn encode(r: &mut [Limb], a: &[Limb], ctx: &Context) {
    let msize = ctx.modsize();
    let mut product = vec![0 as Limb; 2 * msize + 1];
    array::mul(&mut product[..2 * msize], a, ctx.rr());
    reduce_product(r, &mut product, ctx);
}

/// Decodes a Montgomery-domain value `a` back to its plain residue.
pub fn decode(r: &mut [Limb], a: &[Limb], ctx: &Context) {
    let msize = ctx.modsize();
    let mut product = vec![0 as Limb; 2 * msize + 1];
    product[..msize].copy_from_slice(a);
    reduce_product(r, &mut product, ctx);
}

/// `r = a + b` in Montgomery domain (both already `< m`).
pub fn add(r: &mut [Limb], a: &[Limb], b: &[Limb], ctx: &Context) {
    let msize = ctx.modsize();
    let carry = array::add_eq(r, a, b);
    let mut buffer = vec![0 as Limb; msize];
    let borrow = array::sub_eq(&mut buffer, r, ctx.modulus());
    let extension = carry.wrapping_sub(borrow);
    conditional_replace(r, &buffer, is_zero_mask(extension));
}

/// `r = a - b` in Montgomery domain.
pub fn sub(r: &mut [Limb], a: &[Limb], b: &[Limb], ctx: &Context) {
    let msize = ctx.modsize();
    let borrow = array::sub_eq(r, a, b);
    let mut buffer = vec![0 as Limb; msize];
    array::add_eq(&mut buffer, r, ctx.modulus());
    conditional_replace(r, &buffer, !is_zero_mask(borrow));
}

/// `r = -a mod m` in Montgomery domain.
pub fn neg(r: &mut [Limb], a: &[Limb], ctx: &Context) {
    let msize = ctx.modsize();
    let bo1 = array::sub_eq(r, ctx.modulus(), a);
    let mut buffer = vec![0 as Limb; msize];
    let bo2 = array::sub_eq(&mut buffer, r, ctx.modulus());
    let extension = bo1.wrapping_sub(bo2);
    conditional_replace(r, &buffer, is_zero_mask(extension));
}

/// `r = a / 2 mod m` in Montgomery domain: if `a` is even this is a
/// plain shift, otherwise `(a + m) / 2`, using a masked copy of `m`
/// instead of a branch to pick between the two.
pub fn halve(r: &mut [Limb], a: &[Limb], ctx: &Context) {
    let msize = ctx.modsize();
    let mask = (0 as Limb).wrapping_sub(a[0] & 1);
    let masked_modulus: Vec<Limb> = ctx.modulus().iter().map(|&m| m & mask).collect();
    let mut buffer = vec![0 as Limb; msize + 1];
    let carry = array::add_eq(&mut buffer[..msize], &masked_modulus, a);
    buffer[msize] = carry;
    let n = array::rshift(&mut buffer, msize + 1, 1);
    r.fill(0);
    r[..n.min(msize)].copy_from_slice(&buffer[..n.min(msize)]);
}

/// `r = 2*a mod m` in Montgomery domain.
pub fn double(r: &mut [Limb], a: &[Limb], ctx: &Context) {
    add(r, a, a, ctx);
}

/// `r = 3*a mod m` in Montgomery domain.
pub fn triple(r: &mut [Limb], a: &[Limb], ctx: &Context) {
    let msize = ctx.modsize();
    let mut buffer = vec![0 as Limb; msize];
    add(&mut buffer, a, a, ctx);
    add(r, a, &buffer, ctx);
}

/// `r = a * b mod m`, in Montgomery domain: `a`, `b` are Montgomery
/// residues and so is the result.
pub fn mul(r: &mut [Limb], a: &[Limb], b: &[Limb], ctx: &Context) {
    let msize = ctx.modsize();
    let mut product = vec![0 as Limb; 2 * msize + 1];
    array::mul(&mut product[..2 * msize], a, b);
    reduce_product(r, &mut product, ctx);
}

/// `r = a^2 mod m`, in Montgomery domain.
pub fn square(r: &mut [Limb], a: &[Limb], ctx: &Context) {
    let msize = ctx.modsize();
    let mut product = vec![0 as Limb; 2 * msize + 1];
    array::sqr(&mut product[..2 * msize], a);
    reduce_product(r, &mut product, ctx);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::montgomery::Context;

    fn ctx13() -> Context {
        Context::new(&[13 as Limb]).unwrap()
    }

    #[test]
    fn encode_decode_roundtrip() {
        let ctx = ctx13();
        let a = [7 as Limb];
        let mut enc = [0 as Limb];
        encode(&mut enc, &a, &ctx);
        let mut dec = [0 as Limb];
        decode(&mut dec, &enc, &ctx);
        assert_eq!(dec, a);
    }

    #[test]
    fn mul_matches_plain_arithmetic() {
        let ctx = ctx13();
        let a = [4 as Limb];
        let b = [5 as Limb];
        let mut ea = [0 as Limb];
        let mut eb = [0 as Limb];
        encode(&mut ea, &a, &ctx);
        encode(&mut eb, &b, &ctx);
        let mut ep = [0 as Limb];
        mul(&mut ep, &ea, &eb, &ctx);
        let mut plain = [0 as Limb];
        decode(&mut plain, &ep, &ctx);
        assert_eq!(plain[0], (4 * 5) % 13);
    }

    #[test]
    fn add_matches_plain_arithmetic() {
        let ctx = ctx13();
        let a = [10 as Limb];
        let b = [8 as Limb];
        let mut ea = [0 as Limb];
        let mut eb = [0 as Limb];
        encode(&mut ea, &a, &ctx);
        encode(&mut eb, &b, &ctx);
        let mut esum = [0 as Limb];
        add(&mut esum, &ea, &eb, &ctx);
        let mut plain = [0 as Limb];
        decode(&mut plain, &esum, &ctx);
        assert_eq!(plain[0], (10 + 8) % 13);
    }

    #[test]
    fn square_matches_mul_with_self() {
        let ctx = ctx13();
        let a = [6 as Limb];
        let mut ea = [0 as Limb];
        encode(&mut ea, &a, &ctx);
        let mut by_sq = [0 as Limb];
        square(&mut by_sq, &ea, &ctx);
        let mut by_mul = [0 as Limb];
        mul(&mut by_mul, &ea, &ea, &ctx);
        assert_eq!(by_sq, by_mul);
    }
}
