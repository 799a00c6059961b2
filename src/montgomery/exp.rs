//! Montgomery exponentiation: plain binary square-and-multiply (two
//! variants, one variable-time and one constant-time), plus fixed-window
//! variants that trade a precomputed table for fewer multiplies.
//!
//! Every variant here operates entirely in Montgomery domain: callers
//! [`super::ops::encode`] the base in, and decode the result back out.

use crate::array;
use crate::limb::{is_zero_mask, Limb, LIMB_BITS};

use super::ops;
use super::Context;

fn zero_extend(a: &[Limb], msize: usize) -> Vec<Limb> {
    let mut v = vec![0 as Limb; msize];
    v[..a.len().min(msize)].copy_from_slice(&a[..a.len().min(msize)]);
    v
}

/// Iterates the bits of `e[..esize]` from the most significant set bit
/// down to bit 0, skipping the leading zero bits of the top limb —
/// appropriate when the exponent's own bit length may be revealed (the
/// variable-time path).
fn bits_msb_skip_leading(e: &[Limb], esize: usize) -> Vec<bool> {
    if esize == 0 {
        return Vec::new();
    }
    let mut out = Vec::new();
    let top = e[esize - 1];
    let start = crate::limb::nlz(top);
    for n in start..LIMB_BITS {
        out.push((top >> (LIMB_BITS - 1 - n)) & 1 == 1);
    }
    for i in (0..esize - 1).rev() {
        let word = e[i];
        for n in 0..LIMB_BITS {
            out.push((word >> (LIMB_BITS - 1 - n)) & 1 == 1);
        }
    }
    out
}

/// Same iteration but over every bit of every limb up to `ebits`, never
/// skipping a leading zero — the shape needed when the exponent itself
/// is secret and even its bit length must not leak through the number of
/// loop iterations.
fn bits_msb_all(e: &[Limb], ebits: u32) -> Vec<bool> {
    let mut out = Vec::with_capacity(ebits as usize);
    for n in (0..ebits).rev() {
        let limb_idx = (n / LIMB_BITS) as usize;
        let bit_idx = n % LIMB_BITS;
        let bit = e.get(limb_idx).copied().unwrap_or(0);
        out.push((bit >> bit_idx) & 1 == 1);
    }
    out
}

/// Variable-time binary square-and-multiply: `y = base^exponent mod m`,
/// all in Montgomery domain. Skips the leading zero bits of the
/// exponent's top limb, so wall-clock time depends on the exponent's bit
/// length and Hamming weight — only appropriate for public exponents
/// (e.g. RSA's `e`).
pub fn exp_vartime(ctx: &Context, base: &[Limb], exponent: &[Limb]) -> Vec<Limb> {
    let msize = ctx.modsize();
    let esize = array::limbs(exponent);
    if esize == 0 {
        return ctx.r().to_vec();
    }
    if array::is_zero(base) {
        return vec![0 as Limb; msize];
    }

    let base = zero_extend(base, msize);
    let bits = bits_msb_skip_leading(exponent, esize);

    let mut y = base.clone();
    let mut tmp = vec![0 as Limb; msize];
    for (i, &bit) in bits.iter().enumerate() {
        if i > 0 {
            ops::square(&mut tmp, &y, ctx);
            std::mem::swap(&mut y, &mut tmp);
        }
        if bit {
            ops::mul(&mut tmp, &y, &base, ctx);
            std::mem::swap(&mut y, &mut tmp);
        }
    }
    y
}

/// Constant-time binary square-and-multiply over exactly `ebits` bits
/// (the caller's public bound on the exponent's bit length, typically
/// the modulus size): every iteration squares, then unconditionally
/// multiplies by a masked select of `{1, base}` so the sequence of
/// Montgomery operations performed never depends on the exponent's bits.
pub fn exp_consttime(ctx: &Context, base: &[Limb], exponent: &[Limb], ebits: u32) -> Vec<Limb> {
    let msize = ctx.modsize();
    if ebits == 0 {
        return ctx.r().to_vec();
    }
    if array::is_zero(base) {
        return vec![0 as Limb; msize];
    }

    let base = zero_extend(base, msize);
    let one = ctx.r().to_vec();
    let bits = bits_msb_all(exponent, ebits);

    let mut y = one.clone();
    let mut tmp = vec![0 as Limb; msize];
    for &bit in &bits {
        ops::square(&mut tmp, &y, ctx);
        std::mem::swap(&mut y, &mut tmp);

        let mask = if bit { Limb::MAX } else { 0 };
        let mut factor = vec![0 as Limb; msize];
        crate::limb::masked_copy(&mut factor, &base, &one, mask);
        ops::mul(&mut tmp, &y, &factor, ctx);
        std::mem::swap(&mut y, &mut tmp);
    }
    y
}

/// Window size for a given public exponent bit length, capped at 6 (the
/// table never needs more; the cap exists for parity with the
/// reference's defensive `min` against its cache-line constant).
fn window_size(ebits: u32) -> u32 {
    let w = if ebits > 4096 {
        6
    } else if ebits > 2666 {
        5
    } else if ebits > 717 {
        4
    } else if ebits > 178 {
        3
    } else if ebits > 41 {
        2
    } else {
        1
    };
    w.min(6)
}

fn extract_window(e: &[Limb], bitpos: u32, w: u32) -> usize {
    let mut val: usize = 0;
    for i in 0..w {
        let pos = bitpos + i;
        let limb_idx = (pos / LIMB_BITS) as usize;
        let bit_idx = pos % LIMB_BITS;
        let bit = e.get(limb_idx).copied().unwrap_or(0);
        let b = (bit >> bit_idx) & 1;
        val |= (b as usize) << i;
    }
    val
}

fn build_table(base: &[Limb], width: usize, ctx: &Context) -> Vec<Vec<Limb>> {
    let msize = ctx.modsize();
    let mut table = Vec::with_capacity(width);
    table.push(ctx.r().to_vec());
    if width > 1 {
        table.push(base.to_vec());
    }
    for _ in 2..width {
        let mut next = vec![0 as Limb; msize];
        ops::mul(&mut next, table.last().unwrap(), base, ctx);
        table.push(next);
    }
    table
}

/// Fixed-window exponentiation, variable-time: builds a table of
/// `base^0 .. base^(2^w - 1)` and walks the exponent `w` bits at a time,
/// squaring `w` times and multiplying by the indexed table entry per
/// window. Only appropriate for a public exponent.
pub fn exp_window_vartime(ctx: &Context, base: &[Limb], exponent: &[Limb], ebits: u32) -> Vec<Limb> {
    let msize = ctx.modsize();
    let esize = array::limbs(exponent);
    if esize == 0 {
        return ctx.r().to_vec();
    }
    if array::is_zero(base) {
        return vec![0 as Limb; msize];
    }

    let base = zero_extend(base, msize);
    let w = window_size(ebits);
    let width = 1usize << w;
    let table = build_table(&base, width, ctx);

    let total_bits = ((ebits + w - 1) / w) * w;
    let mut y: Option<Vec<Limb>> = None;
    let mut bit = total_bits;
    while bit >= w {
        bit -= w;
        let idx = extract_window(exponent, bit, w);
        match &mut y {
            None => {
                y = Some(table[idx].clone());
            }
            Some(yy) => {
                let mut tmp = vec![0 as Limb; msize];
                for _ in 0..w {
                    ops::square(&mut tmp, yy, ctx);
                    std::mem::swap(yy, &mut tmp);
                }
                ops::mul(&mut tmp, yy, &table[idx], ctx);
                *yy = tmp;
            }
        }
    }
    y.unwrap_or_else(|| ctx.r().to_vec())
}

/// `tbl[j * width + idx] = val[j]` for every limb position `j` — the
/// "scrambled" layout where one table entry's limbs are interleaved
/// across the buffer with stride `width`, so a position-independent
/// lookup can read every entry at a limb position with a single
/// sequential sweep.
fn scramble_put(tbl: &mut [Limb], idx: usize, val: &[Limb], width: usize) {
    for (j, &v) in val.iter().enumerate() {
        tbl[j * width + idx] = v;
    }
}

/// Reads entry `idx` back out of a table laid out by [`scramble_put`]
/// without ever indexing by `idx` directly: every entry at each limb
/// position is read and OR-masked by `is_zero_mask(n ^ idx)`, so the
/// memory access pattern is identical no matter which entry is wanted.
fn scramble_get_sscm(tbl: &[Limb], idx: usize, width: usize, msize: usize) -> Vec<Limb> {
    let mut out = vec![0 as Limb; msize];
    for j in 0..msize {
        let mut acc: Limb = 0;
        for n in 0..width {
            let mask = is_zero_mask((n ^ idx) as Limb);
            acc |= tbl[j * width + n] & mask;
        }
        out[j] = acc;
    }
    out
}

/// Constant-time fixed-window exponentiation: same precomputed table as
/// [`exp_window_vartime`], but stored scrambled and read back with
/// [`scramble_get_sscm`] so that table lookups — the one place a
/// naive windowed implementation would index memory by a secret value —
/// touch every entry regardless of which one is selected. `ebits` must
/// be a public bound on the exponent's bit length; the loop always runs
/// `ceil(ebits / w)` iterations regardless of the exponent's actual
/// value.
pub fn exp_window_consttime(
    ctx: &Context,
    base: &[Limb],
    exponent: &[Limb],
    ebits: u32,
) -> Vec<Limb> {
    let msize = ctx.modsize();
    if ebits == 0 {
        return ctx.r().to_vec();
    }
    if array::is_zero(base) {
        return vec![0 as Limb; msize];
    }

    let base = zero_extend(base, msize);
    let w = window_size(ebits);
    let width = 1usize << w;
    let table = build_table(&base, width, ctx);

    let mut scrambled = vec![0 as Limb; msize * width];
    for (idx, entry) in table.iter().enumerate() {
        scramble_put(&mut scrambled, idx, entry, width);
    }

    let total_bits = ((ebits + w - 1) / w) * w;
    let mut bit = total_bits;
    let first_idx = {
        bit -= w;
        extract_window(exponent, bit, w)
    };
    let mut y = scramble_get_sscm(&scrambled, first_idx, width, msize);

    while bit >= w {
        bit -= w;
        let idx = extract_window(exponent, bit, w);
        let mut tmp = vec![0 as Limb; msize];
        for _ in 0..w {
            ops::square(&mut tmp, &y, ctx);
            std::mem::swap(&mut y, &mut tmp);
        }
        let factor = scramble_get_sscm(&scrambled, idx, width, msize);
        ops::mul(&mut tmp, &y, &factor, ctx);
        y = tmp;
    }
    y
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::montgomery::Context;

    fn pow_mod(base: u64, exp: u64, m: u64) -> u64 {
        let mut result = 1u64 % m;
        let mut b = base % m;
        let mut e = exp;
        while e > 0 {
            if e & 1 == 1 {
                result = (result * b) % m;
            }
            b = (b * b) % m;
            e >>= 1;
        }
        result
    }

    #[test]
    fn vartime_matches_naive_pow_mod() {
        let ctx = Context::new(&[23 as Limb]).unwrap();
        let base = [5 as Limb];
        let exponent = [13 as Limb];
        let mut enc = [0 as Limb];
        ops::encode(&mut enc, &base, &ctx);
        let result = exp_vartime(&ctx, &enc, &exponent);
        let mut plain = [0 as Limb];
        ops::decode(&mut plain, &result, &ctx);
        assert_eq!(plain[0], pow_mod(5, 13, 23));
    }

    #[test]
    fn consttime_matches_vartime() {
        let ctx = Context::new(&[97 as Limb]).unwrap();
        let base = [11 as Limb];
        let exponent = [41 as Limb];
        let mut enc = [0 as Limb];
        ops::encode(&mut enc, &base, &ctx);
        let vt = exp_vartime(&ctx, &enc, &exponent);
        let ct = exp_consttime(&ctx, &enc, &exponent, array::bits(&exponent).max(1));
        assert_eq!(vt, ct);
    }

    #[test]
    fn window_matches_binary() {
        let ctx = Context::new(&[101 as Limb]).unwrap();
        let base = [7 as Limb];
        let exponent = [37 as Limb];
        let mut enc = [0 as Limb];
        ops::encode(&mut enc, &base, &ctx);
        let binary = exp_vartime(&ctx, &enc, &exponent);
        let ebits = array::bits(&exponent).max(1);
        let windowed = exp_window_vartime(&ctx, &enc, &exponent, ebits);
        assert_eq!(binary, windowed);
    }

    #[test]
    fn window_consttime_matches_window_vartime() {
        let ctx = Context::new(&[103 as Limb]).unwrap();
        let base = [9 as Limb];
        let exponent = [55 as Limb];
        let mut enc = [0 as Limb];
        ops::encode(&mut enc, &base, &ctx);
        let ebits = array::bits(&exponent).max(1);
        let vt = exp_window_vartime(&ctx, &enc, &exponent, ebits);
        let ct = exp_window_consttime(&ctx, &enc, &exponent, ebits);
        assert_eq!(vt, ct);
    }

    #[test]
    fn zero_exponent_returns_one() {
        let ctx = Context::new(&[13 as Limb]).unwrap();
        let base = [7 as Limb];
        let mut enc = [0 as Limb];
        ops::encode(&mut enc, &base, &ctx);
        let result = exp_vartime(&ctx, &enc, &[]);
        assert_eq!(result, ctx.r());
    }
}
