//! Integration tests for the sign-tracking variable-width integer,
//! exercising multi-limb values the unit tests in `src/int.rs` don't
//! reach for.

use bignum::int::{Int, Sign};
use bignum::limb::Limb;
use bignum::scratch::Scratch;

fn big(limbs: &[Limb]) -> Int {
    Int::from_parts(Sign::NonNegative, limbs.to_vec())
}

#[test]
fn multi_limb_add_carries_across_limbs() {
    let a = big(&[Limb::MAX, Limb::MAX]);
    let b = Int::from_limb(1);
    let sum = a.add(&b);
    assert_eq!(sum.magnitude(), &[0, 0, 1]);
}

#[test]
fn multi_limb_mul_matches_divmod_round_trip() {
    let mut scratch = Scratch::new(64);
    let a = big(&[0x1122_3344_5566_7788u64 as Limb, 0xAABB_CCDD]);
    let b = Int::from_limb(0x9999);

    let product = a.mul(&b);
    let (q, r) = product.div_rem(&b, &mut scratch).unwrap();

    assert_eq!(q, a);
    assert!(r.is_zero());
}

#[test]
fn negative_divided_by_negative_is_positive_quotient() {
    let mut scratch = Scratch::new(16);
    let a = Int::from_limb(100).negate();
    let b = Int::from_limb(7).negate();
    let (q, r) = a.div_rem(&b, &mut scratch).unwrap();
    assert!(!q.is_negative());
    assert_eq!(q, Int::from_limb(14));
    assert!(r.is_negative());
    assert_eq!(r, Int::from_limb(2).negate());
}

#[test]
fn hex_round_trips_a_large_magnitude() {
    let a = big(&[0x0123_4567_89AB_CDEFu64 as Limb, 0xFEDC_BA98_7654_3210u64 as Limb]);
    let hex = a.to_hex();
    assert_eq!(Int::from_hex(&hex).unwrap(), a);
}

#[test]
fn display_matches_to_hex() {
    let a = Int::from_limb(255).negate();
    assert_eq!(format!("{a}"), a.to_hex());
}
