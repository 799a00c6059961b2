//! Probable-prime generation: an unconstrained search over random
//! odd candidates sieved against [`super::table::KNOWN_PRIMES`] via
//! incremental residue tracking, a Diffie–Hellman-constrained variant
//! that additionally holds `r` to a fixed residue class, and a safe-prime
//! wrapper that also demands `(p-1)/2` be prime.

use crate::array;
use crate::error::{Error, Result};
use crate::limb::{Limb, LIMB_BITS};
use crate::random::RandBytes;

use super::table::KNOWN_PRIMES;
use super::{miller_rabin, sieve};

fn set_bit(r: &mut [Limb], bit: u32) {
    let idx = (bit / LIMB_BITS) as usize;
    let off = bit % LIMB_BITS;
    r[idx] |= (1 as Limb) << off;
}

fn limb_from_le_bytes(b: &[u8]) -> Limb {
    let mut buf = [0u8; core::mem::size_of::<Limb>()];
    buf.copy_from_slice(b);
    Limb::from_le_bytes(buf)
}

/// Draws a random `bits`-bit candidate with the top two bits and the low
/// bit forced set (so the product of two such values always has the
/// expected bit length, and the candidate is always odd), plus bit 1 set
/// when `safe` so that `(r-1)/2` is odd too.
fn random_candidate<R: RandBytes>(bits: u32, safe: bool, rng: &mut R) -> Result<Vec<Limb>> {
    if bits < 3 {
        return Err(Error::InvalidArgument);
    }
    let nlimbs = ((bits + LIMB_BITS - 1) / LIMB_BITS) as usize;
    let limb_bytes = (LIMB_BITS / 8) as usize;
    let mut bytes = vec![0u8; nlimbs * limb_bytes];
    rng.fill(&mut bytes).map_err(|_| Error::RngFailure)?;

    let mut r = vec![0 as Limb; nlimbs];
    for (i, chunk) in bytes.chunks(limb_bytes).enumerate() {
        r[i] = limb_from_le_bytes(chunk);
    }

    let top_bits = bits % LIMB_BITS;
    if top_bits != 0 {
        let mask: Limb = ((1 as Limb) << top_bits) - 1;
        r[nlimbs - 1] &= mask;
    }

    set_bit(&mut r, bits - 1);
    set_bit(&mut r, bits - 2);
    r[0] |= 1;
    if safe {
        r[0] |= 1 << 1;
    }
    Ok(r)
}

fn low_value(r: &[Limb]) -> u64 {
    r[0] as u64
}

/// Residue-vector delta-stepping search (spec §4.7's "inner loop"):
/// starting from `r`, walks a delta forward by 2 (or 4 when `safe`,
/// keeping `(r+delta-1)/2` an integer away from every small prime too)
/// until `r + delta` is free of every known small-prime factor, or the
/// step budget in `delta_max` is exhausted, in which case the caller
/// regenerates `r` from scratch. Returns `None` either on that exhaustion
/// or when the final value's bit length drifted away from `bits`
/// (possible only if `delta` overflowed into a new top limb).
fn sieve_and_step(r: Vec<Limb>, bits: u32, safe: bool) -> Option<Vec<Limb>> {
    let mut mods = vec![0 as Limb; KNOWN_PRIMES.len()];
    for (i, &p) in KNOWN_PRIMES.iter().enumerate() {
        let (rem, _) = array::div_limb(None, &r, p as Limb);
        mods[i] = rem;
    }

    let max_prime = *KNOWN_PRIMES.last().unwrap() as Limb;
    let delta_max: Limb = Limb::MAX - max_prime;
    let threshold: Limb = if safe { 1 } else { 0 };
    let step: Limb = if safe { 4 } else { 2 };
    let base = low_value(&r);

    let mut delta: Limb = 0;
    loop {
        let mut advanced = false;
        for (i, &p) in KNOWN_PRIMES.iter().enumerate() {
            if bits <= 31 {
                let square = (p as u64) * (p as u64);
                if square > base + delta as u64 {
                    break;
                }
            }
            let m = (mods[i] + delta) % (p as Limb);
            if m <= threshold {
                delta += step;
                if delta > delta_max {
                    return None;
                }
                advanced = true;
                break;
            }
        }
        if !advanced {
            break;
        }
    }

    let mut candidate = vec![0 as Limb; r.len() + 1];
    array::inc(&mut candidate, &r, delta);
    let n = array::limbs(&candidate);
    candidate.truncate(n);
    if array::bits(&candidate) != bits {
        return None;
    }
    Some(candidate)
}

/// Unconstrained probable-prime search: regenerates a fresh random
/// candidate whenever the sieve step exhausts its delta budget, and
/// runs a full Miller–Rabin test (trial division already folded into
/// the sieve step, so `do_trial_division = false`) on every candidate
/// that survives it.
pub fn probable_prime<R: RandBytes>(bits: u32, safe: bool, rng: &mut R) -> Result<Vec<Limb>> {
    loop {
        let r = random_candidate(bits, safe, rng)?;
        let Some(candidate) = sieve_and_step(r, bits, safe) else {
            continue;
        };
        if miller_rabin::is_prime(&candidate, 0, false, rng)? {
            return Ok(candidate);
        }
    }
}

fn mp_add(a: &[Limb], b: &[Limb]) -> Vec<Limb> {
    let (big, small) = if a.len() >= b.len() { (a, b) } else { (b, a) };
    let mut r = vec![0 as Limb; big.len() + 1];
    array::add(&mut r, big, small);
    let n = array::limbs(&r);
    r.truncate(n);
    r
}

fn mp_sub(a: &[Limb], b: &[Limb]) -> Vec<Limb> {
    let mut r = vec![0 as Limb; a.len().max(1)];
    let n = array::sub(&mut r, a, b);
    r.truncate(n);
    r
}

fn mp_mod(a: &[Limb], m: &[Limb]) -> Result<Vec<Limb>> {
    let asize = array::limbs(a);
    let msize = array::limbs(m);
    if msize == 0 {
        return Err(Error::InvalidArgument);
    }
    if asize < msize {
        return Ok(a[..asize].to_vec());
    }
    let mut x = vec![0 as Limb; asize + 1];
    x[..asize].copy_from_slice(&a[..asize]);
    let mut y = m[..msize].to_vec();
    let rsize = array::rem(&mut x, asize, &mut y, msize)?;
    x.truncate(rsize);
    Ok(x)
}

/// Diffie–Hellman-constrained probable-prime search: holds every
/// candidate to `r ≡ rem (mod add)` (defaulting to `r ≡ 1`, or `r ≡ 3`
/// when `safe` and `rem` is absent) by constructing the first candidate
/// directly from that congruence and then stepping by whole multiples of
/// `add` rather than drawing fresh random values, matching the reference
/// generator's constant-residue-class walk.
pub fn probable_prime_dh<R: RandBytes>(
    bits: u32,
    safe: bool,
    add: &[Limb],
    rem: Option<&[Limb]>,
    rng: &mut R,
) -> Result<Vec<Limb>> {
    if bits < 3 {
        return Err(Error::InvalidArgument);
    }
    let addsize = array::limbs(add);
    if addsize == 0 {
        return Err(Error::InvalidArgument);
    }
    let add = &add[..addsize];

    let target_rem: Vec<Limb> = match rem.map(|r| (r, array::limbs(r))) {
        Some((r, n)) if n > 0 => r[..n].to_vec(),
        _ => vec![(if safe { 3 } else { 1 }) as Limb],
    };

    const MAX_STEPS: u32 = 1 << 16;

    loop {
        let raw = random_candidate(bits, false, rng)?;
        let rawsize = array::limbs(&raw);
        let rmod = mp_mod(&raw[..rawsize], add)?;
        let base = if array::cmp(&raw[..rawsize], &rmod) >= 0 {
            mp_sub(&raw[..rawsize], &rmod)
        } else {
            raw[..rawsize].to_vec()
        };
        let mut candidate = mp_add(&base, &target_rem);

        let mut found = None;
        for _ in 0..MAX_STEPS {
            let csize = array::limbs(&candidate);
            if array::bits(&candidate[..csize]) == bits
                && !sieve::trial_division_factor(&candidate[..csize])
                && miller_rabin::is_prime(&candidate[..csize], 0, false, rng)?
            {
                found = Some(candidate[..csize].to_vec());
                break;
            }
            candidate = mp_add(&candidate, add);
        }
        if let Some(p) = found {
            return Ok(p);
        }
    }
}

/// Safe-prime search: generates probable primes with the low-order bit
/// pattern that forces `(p-1)/2` to be odd, then additionally
/// Miller–Rabin-tests `(p-1)/2` itself, restarting the whole search on
/// failure rather than trying to patch up a near-miss candidate.
pub fn safe_prime<R: RandBytes>(bits: u32, rng: &mut R) -> Result<Vec<Limb>> {
    loop {
        let p = probable_prime(bits, true, rng)?;
        let mut p1 = vec![0 as Limb; p.len()];
        let n = array::dec(&mut p1, &p, 1);
        p1.truncate(n.max(1));
        let half_len = array::rshift(&mut p1, p1.len(), 1);
        p1.truncate(half_len);
        if miller_rabin::is_prime(&p1, 0, true, rng)? {
            return Ok(p);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::SystemRandom;

    #[test]
    fn probable_prime_has_requested_bit_length_and_is_prime() {
        let mut rng = SystemRandom::new();
        let p = probable_prime(64, false, &mut rng).unwrap();
        assert_eq!(array::bits(&p), 64);
        assert!(p[0] & 1 == 1);
        assert!(miller_rabin::is_prime(&p, 0, true, &mut rng).unwrap());
    }

    #[test]
    fn safe_prime_and_sophie_germain_pair_are_both_prime() {
        let mut rng = SystemRandom::new();
        let p = safe_prime(48, &mut rng).unwrap();
        assert!(miller_rabin::is_prime(&p, 0, true, &mut rng).unwrap());

        let mut p1 = vec![0 as Limb; p.len()];
        let n = array::dec(&mut p1, &p, 1);
        p1.truncate(n.max(1));
        let half_len = array::rshift(&mut p1, p1.len(), 1);
        p1.truncate(half_len);
        assert!(miller_rabin::is_prime(&p1, 0, true, &mut rng).unwrap());
    }

    #[test]
    fn probable_prime_dh_respects_congruence() {
        let mut rng = SystemRandom::new();
        let add = [2 as Limb];
        let rem = [1 as Limb];
        let p = probable_prime_dh(48, false, &add, Some(&rem), &mut rng).unwrap();
        assert!(miller_rabin::is_prime(&p, 0, true, &mut rng).unwrap());
        assert_eq!(p[0] & 1, 1);
    }
}
