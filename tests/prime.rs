//! Integration tests for the known-primes table, the trial-division
//! sieve, Miller-Rabin, and probable-prime generation.

use bignum::limb::Limb;
use bignum::prime::{self, KNOWN_PRIMES};
use bignum::random::SystemRandom;

#[test]
fn every_known_prime_is_reported_prime() {
    let mut rng = SystemRandom::new();
    for &p in KNOWN_PRIMES.iter().take(64) {
        let limbs = [p as Limb];
        assert!(prime::is_prime(&limbs, 0, true, &mut rng).unwrap(), "{p} misreported composite");
    }
}

#[test]
fn product_of_two_known_primes_is_composite() {
    let mut rng = SystemRandom::new();
    let p = KNOWN_PRIMES[10] as u64;
    let q = KNOWN_PRIMES[20] as u64;
    let product = p * q;
    let limbs = [product as Limb];
    assert!(!prime::is_prime(&limbs, 0, true, &mut rng).unwrap());
}

#[test]
fn trial_division_factor_catches_small_composites() {
    let n = [(KNOWN_PRIMES[5] as u64 * KNOWN_PRIMES[7] as u64) as Limb];
    assert!(prime::trial_division_factor(&n));
}

#[test]
fn trial_division_factor_passes_a_large_prime() {
    // 2^61 - 1, a Mersenne prime well beyond the known-primes table.
    let n = [(1u64 << 61) - 1];
    assert!(!prime::trial_division_factor(&n));
}

#[test]
fn generated_probable_prime_is_odd_and_right_sized() {
    let mut rng = SystemRandom::new();
    let p = prime::probable_prime(128, false, &mut rng).unwrap();
    assert_eq!(bignum::array::bits(&p), 128);
    assert_eq!(p[0] & 1, 1);
    assert!(prime::is_prime(&p, 0, true, &mut rng).unwrap());
}

#[test]
fn generated_safe_prime_has_prime_sophie_germain_half() {
    let mut rng = SystemRandom::new();
    let p = prime::safe_prime(64, &mut rng).unwrap();

    let mut half = vec![0 as Limb; p.len()];
    let n = bignum::array::dec(&mut half, &p, 1);
    let half_len = bignum::array::rshift(&mut half, n.max(1), 1);
    half.truncate(half_len);

    assert!(prime::is_prime(&half, 0, true, &mut rng).unwrap());
}

#[test]
fn checks_for_bits_is_non_increasing_as_bits_grow() {
    let samples = [128, 256, 512, 1024, 2048, 3072, 4096];
    let mut prev = u32::MAX;
    for &bits in &samples {
        let checks = prime::checks_for_bits(bits);
        assert!(checks <= prev, "schedule should never demand more checks for larger bit sizes");
        prev = checks;
    }
}
