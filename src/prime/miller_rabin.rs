//! Miller–Rabin primality testing.

use crate::array;
use crate::error::Result;
use crate::limb::Limb;
use crate::montgomery::{ops, Context};
use crate::random::RandBytes;

use super::sieve;

/// Number of Miller–Rabin rounds recommended for a candidate of the
/// given bit length, decreasing as the candidate grows (a larger
/// candidate makes a false witness exponentially less likely per
/// round). Thresholds and round counts match the reference schedule
/// exactly.
pub fn checks_for_bits(bits: u32) -> u32 {
    const SCHEDULE: [(u32, u32); 8] = [
        (3747, 3),
        (1345, 4),
        (476, 5),
        (400, 6),
        (347, 7),
        (308, 8),
        (55, 27),
        (6, 34),
    ];
    for &(threshold, checks) in &SCHEDULE {
        if bits > threshold {
            return checks;
        }
    }
    34
}

/// Trailing zero bits of a multi-limb value, i.e. the `k` in `a = 2^k *
/// odd`. `a` is never all-zero at any call site here (`a - 1` for `a >
/// 1`).
fn trailing_zero_bits(a: &[Limb]) -> u32 {
    let mut k = 0u32;
    for &limb in a {
        if limb == 0 {
            k += crate::limb::LIMB_BITS;
        } else {
            k += crate::limb::ntz(limb);
            break;
        }
    }
    k
}

/// `true` if `y` (a Montgomery residue) equals `one` or `neg_one`,
/// comparing by significant length first the way every other compare
/// in this crate does.
fn matches(y: &[Limb], other: &[Limb]) -> bool {
    let yn = array::limbs(y);
    let on = array::limbs(other);
    array::cmp(&y[..yn], &other[..on]) == 0
}

/// One witness round: `y` enters as `witness^q mod n` (Montgomery
/// domain) and is repeatedly squared up to `k - 1` more times, looking
/// for `1` (composite, unless already the first check and `y == n-1`)
/// or `n - 1` (probably prime). Falling off the end without ever
/// hitting `n - 1` means composite.
fn witness_round(mut y: Vec<Limb>, one: &[Limb], neg_one: &[Limb], k: u32, ctx: &Context) -> bool {
    if matches(&y, one) || matches(&y, neg_one) {
        return true;
    }
    for _ in 1..k {
        let mut sq = vec![0 as Limb; ctx.modsize()];
        ops::square(&mut sq, &y, ctx);
        y = sq;
        if matches(&y, one) {
            return false;
        }
        if matches(&y, neg_one) {
            return true;
        }
    }
    false
}

/// Full Miller–Rabin primality test. `checks == 0` derives the round
/// count from [`checks_for_bits`]; `do_trial_division` additionally
/// sieves against [`super::table::KNOWN_PRIMES`] before running any
/// Montgomery exponentiation, which is both a cheap pre-filter and, for
/// a candidate that happens to land in [`super::table::KNOWN_PRIMES`]
/// itself, a complete proof on its own.
pub fn is_prime<R: RandBytes>(
    a: &[Limb],
    checks: u32,
    do_trial_division: bool,
    rng: &mut R,
) -> Result<bool> {
    let asize = array::limbs(a);
    if asize == 0 {
        return Ok(false);
    }
    if a[0] & 1 == 0 {
        return Ok(asize == 1 && a[0] == 2);
    }
    if asize == 1 && a[0] <= 1 {
        return Ok(false);
    }

    let bits = array::bits(&a[..asize]);
    if bits <= 31 && sieve::is_small_prime(a[0] as u32) {
        return Ok(true);
    }

    if do_trial_division && sieve::trial_division_factor(&a[..asize]) {
        return Ok(false);
    }

    // a - 1 = 2^k * q
    let mut a1 = vec![0 as Limb; asize];
    let a1n = array::dec(&mut a1, &a[..asize], 1);
    a1.truncate(a1n.max(1));

    let k = trailing_zero_bits(&a1);
    let mut q = a1.clone();
    let qn = array::rshift(&mut q, a1.len(), k);
    q.truncate(qn);

    let checks = if checks == 0 {
        checks_for_bits(bits)
    } else {
        checks
    };

    let ctx = Context::new(&a[..asize])?;
    let one = ctx.r().to_vec();
    let mut neg_one = vec![0 as Limb; ctx.modsize()];
    let mut a1_padded = vec![0 as Limb; ctx.modsize()];
    a1_padded[..a1.len()].copy_from_slice(&a1);
    ops::encode(&mut neg_one, &a1_padded, &ctx);

    let lower = [1 as Limb];
    for _ in 0..checks {
        let witness = crate::random::random_in_range(&lower, &a1, rng, 1000)?;
        let mut w_padded = vec![0 as Limb; ctx.modsize()];
        w_padded[..witness.len()].copy_from_slice(&witness);
        let mut w_mont = vec![0 as Limb; ctx.modsize()];
        ops::encode(&mut w_mont, &w_padded, &ctx);

        let ebits = array::bits(&q).max(1);
        let y = crate::montgomery::exp::exp_consttime(&ctx, &w_mont, &q, ebits);

        if !witness_round(y, &one, &neg_one, k, &ctx) {
            return Ok(false);
        }
    }
    Ok(true)
}
