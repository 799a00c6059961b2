//! Constant-time variants of the trimming/inspection helpers in
//! [`super`], for callers walking secret-length operands (a Montgomery
//! modulus's bit length is public, but an exponent's significant length
//! during blinding, or an intermediate value during a reduction, is
//! not).

use crate::limb::{ct_nlz, is_zero_mask, Limb, LIMB_BITS};

/// All-ones if every limb of `a` is zero, all-zeros otherwise. Reads
/// every limb regardless of where the first nonzero one appears.
pub fn ct_is_zero(a: &[Limb]) -> Limb {
    let mut acc: Limb = 0;
    for &x in a {
        acc |= x;
    }
    is_zero_mask(acc)
}

/// Significant length of `a`, computed without branching on individual
/// limb values — every limb is visited and the running "still all
/// zero from the top" mask is applied uniformly rather than stopping
/// at the first nonzero limb.
pub fn ct_limbs(a: &[Limb]) -> usize {
    let mut still_zero: Limb = Limb::MAX;
    let mut len = a.len();
    for i in (0..a.len()).rev() {
        still_zero &= is_zero_mask(a[i]);
        len -= (1 & still_zero) as usize;
    }
    len
}

/// Highest set bit position of `a`, visiting every limb position rather
/// than indexing at [`ct_limbs`]'s derived length — that length is
/// itself data-dependent, so using it as an index would leak exactly
/// the secret this function exists to hide. Instead every limb is
/// tested for "is this the highest nonzero one", and its candidate bit
/// size is masked into the result only when it is.
pub fn ct_bit_size(a: &[Limb]) -> u32 {
    let mut still_zero: Limb = Limb::MAX;
    let mut acc: u32 = 0;
    for i in (0..a.len()).rev() {
        let limb_is_zero = is_zero_mask(a[i]);
        let is_top = still_zero & !limb_is_zero;
        let candidate = (i as u32 + 1) * LIMB_BITS - ct_nlz(a[i]);
        acc |= (candidate as Limb & is_top) as u32;
        still_zero &= limb_is_zero;
    }
    acc
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ct_is_zero_matches_is_zero() {
        assert_eq!(ct_is_zero(&[0 as Limb, 0, 0]), Limb::MAX);
        assert_eq!(ct_is_zero(&[0 as Limb, 1, 0]), 0);
        let empty: [Limb; 0] = [];
        assert_eq!(ct_is_zero(&empty), Limb::MAX);
    }

    #[test]
    fn ct_limbs_matches_limbs() {
        assert_eq!(ct_limbs(&[1 as Limb, 0, 0]), 1);
        assert_eq!(ct_limbs(&[0 as Limb, 0, 0]), 0);
        assert_eq!(ct_limbs(&[1 as Limb, 2, 3]), 3);
        assert_eq!(ct_limbs(&[1 as Limb, 0, 3]), 3);
    }

    #[test]
    fn ct_bit_size_matches_bits() {
        assert_eq!(ct_bit_size(&[0 as Limb]), 0);
        assert_eq!(ct_bit_size(&[1 as Limb]), 1);
        assert_eq!(ct_bit_size(&[0 as Limb, 5]), crate::limb::LIMB_BITS + 3);
    }
}
