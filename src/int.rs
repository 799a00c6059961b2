//! Sign-tracking variable-width integer (`Int`)
//!
//! A thin discriminated wrapper over the limb-array kernel: a sign tag
//! plus a magnitude, always trimmed so the invariants the kernel relies
//! on (`magnitude` empty iff zero, top limb nonzero otherwise) hold
//! without a separate normalization pass at every call site. All secret
//! and performance-critical work — the things this crate actually exists
//! for — happens in [`crate::array`] and [`crate::montgomery`] on the
//! magnitude directly; this type only exists to feed unsigned magnitudes
//! into those routines from ordinary signed arithmetic.

use std::fmt;

use crate::array;
use crate::error::{Error, Result};
use crate::limb::{Limb, LIMB_BITS};
use crate::scratch::Scratch;

/// The sign of an [`Int`]. Zero is always [`Sign::NonNegative`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    NonNegative,
    Negative,
}

impl Sign {
    fn flip(self) -> Sign {
        match self {
            Sign::NonNegative => Sign::Negative,
            Sign::Negative => Sign::NonNegative,
        }
    }
}

/// An owned, arbitrary-width signed integer: a [`Sign`] plus a trimmed
/// magnitude (`Vec<Limb>`, little-endian, no trailing zero limb).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Int {
    sign: Sign,
    magnitude: Vec<Limb>,
}

impl Int {
    /// The value zero, canonically non-negative with an empty magnitude.
    pub fn zero() -> Self {
        Int {
            sign: Sign::NonNegative,
            magnitude: Vec::new(),
        }
    }

    /// Builds an `Int` from a single machine-word value.
    pub fn from_limb(v: Limb) -> Self {
        Int::normalize(Sign::NonNegative, vec![v])
    }

    /// Builds an `Int` directly from a sign and an unsigned magnitude
    /// (little-endian limbs, need not be pre-trimmed).
    pub fn from_parts(sign: Sign, magnitude: Vec<Limb>) -> Self {
        Int::normalize(sign, magnitude)
    }

    fn normalize(sign: Sign, mut magnitude: Vec<Limb>) -> Self {
        let n = array::limbs(&magnitude);
        magnitude.truncate(n);
        let sign = if magnitude.is_empty() {
            Sign::NonNegative
        } else {
            sign
        };
        Int { sign, magnitude }
    }

    /// `true` for the canonical zero value.
    pub fn is_zero(&self) -> bool {
        self.magnitude.is_empty()
    }

    /// `true` for any value strictly less than zero.
    pub fn is_negative(&self) -> bool {
        matches!(self.sign, Sign::Negative) && !self.is_zero()
    }

    pub fn sign(&self) -> Sign {
        self.sign
    }

    /// The unsigned magnitude, little-endian, trimmed.
    pub fn magnitude(&self) -> &[Limb] {
        &self.magnitude
    }

    pub fn negate(&self) -> Int {
        if self.is_zero() {
            self.clone()
        } else {
            Int {
                sign: self.sign.flip(),
                magnitude: self.magnitude.clone(),
            }
        }
    }

    /// Same-sign unsigned add preserving sign; mixed-sign unsigned
    /// compare-then-subtract, with the result taking the sign of
    /// whichever operand's magnitude was larger (per spec §4.9).
    pub fn add(&self, other: &Int) -> Int {
        if self.sign == other.sign {
            let (big, small) = if self.magnitude.len() >= other.magnitude.len() {
                (&self.magnitude, &other.magnitude)
            } else {
                (&other.magnitude, &self.magnitude)
            };
            let mut r = vec![0 as Limb; big.len() + 1];
            array::add(&mut r, big, small);
            Int::normalize(self.sign, r)
        } else {
            let c = array::cmp(&self.magnitude, &other.magnitude);
            if c == 0 {
                return Int::zero();
            }
            let (bigger, bigger_sign, smaller) = if c > 0 {
                (&self.magnitude, self.sign, &other.magnitude)
            } else {
                (&other.magnitude, other.sign, &self.magnitude)
            };
            let mut r = vec![0 as Limb; bigger.len()];
            let n = array::sub(&mut r, bigger, smaller);
            r.truncate(n);
            Int::normalize(bigger_sign, r)
        }
    }

    pub fn sub(&self, other: &Int) -> Int {
        self.add(&other.negate())
    }

    /// Sign is the XOR of the operands' signs; magnitude via the
    /// schoolbook kernel multiply.
    pub fn mul(&self, other: &Int) -> Int {
        if self.is_zero() || other.is_zero() {
            return Int::zero();
        }
        let mut r = vec![0 as Limb; self.magnitude.len() + other.magnitude.len()];
        array::mul(&mut r, &self.magnitude, &other.magnitude);
        let sign = if self.sign == other.sign {
            Sign::NonNegative
        } else {
            Sign::Negative
        };
        Int::normalize(sign, r)
    }

    /// `(quotient, remainder)`. Quotient sign is the XOR of the
    /// operands' signs; remainder sign follows the dividend's sign for a
    /// nonzero remainder (C99 semantics) and is canonically non-negative
    /// for a zero remainder. `scratch` backs the kernel's division
    /// working storage.
    pub fn div_rem(&self, other: &Int, scratch: &mut Scratch) -> Result<(Int, Int)> {
        if other.is_zero() {
            return Err(Error::InvalidArgument);
        }
        let (q_mag, r_mag) = array::divmod(scratch, &self.magnitude, &other.magnitude)?;
        let q_sign = if self.sign == other.sign {
            Sign::NonNegative
        } else {
            Sign::Negative
        };
        let q = Int::normalize(q_sign, q_mag);
        let r = Int::normalize(self.sign, r_mag);
        Ok((q, r))
    }

    /// Three-way compare respecting sign: unequal signs decide outright,
    /// equal signs fall back to unsigned magnitude comparison (negated
    /// for two negative operands, since a larger magnitude is a smaller
    /// value there).
    pub fn cmp(&self, other: &Int) -> std::cmp::Ordering {
        use std::cmp::Ordering;
        match (self.is_negative(), other.is_negative()) {
            (false, true) => Ordering::Greater,
            (true, false) => Ordering::Less,
            (false, false) => {
                array_cmp_ordering(array::cmp(&self.magnitude, &other.magnitude))
            }
            (true, true) => {
                array_cmp_ordering(array::cmp(&other.magnitude, &self.magnitude))
            }
        }
    }

    /// Big-endian unsigned byte encoding of the magnitude: `ceil(bits/8)`
    /// bytes with no leading zero byte; zero encodes as a single zero
    /// byte. Sign is not represented — this is the kernel-level octet
    /// codec of spec §6, not the signed hex codec below.
    pub fn to_be_bytes(&self) -> Vec<u8> {
        magnitude_to_be_bytes(&self.magnitude)
    }

    /// Decodes a big-endian unsigned byte sequence into a non-negative
    /// `Int`.
    pub fn from_be_bytes(bytes: &[u8]) -> Int {
        Int::normalize(Sign::NonNegative, magnitude_from_be_bytes(bytes))
    }

    /// Upper-case hex encoding (`0-9A-F`, no `0x` prefix), with a
    /// leading `-` for negative values. Zero encodes as `"0"`.
    pub fn to_hex(&self) -> String {
        let mut s = String::new();
        if self.is_negative() {
            s.push('-');
        }
        if self.is_zero() {
            s.push('0');
            return s;
        }
        for byte in self.to_be_bytes() {
            s.push_str(&format!("{byte:02X}"));
        }
        s
    }

    /// Parses the format produced by [`to_hex`](Int::to_hex): an
    /// optional leading `-`, followed by an even number of upper-case
    /// hex digits.
    pub fn from_hex(s: &str) -> Result<Int> {
        let (sign, digits) = match s.strip_prefix('-') {
            Some(rest) => (Sign::Negative, rest),
            None => (Sign::NonNegative, s),
        };
        if digits.is_empty() || digits.len() % 2 != 0 {
            return Err(Error::InvalidArgument);
        }
        let mut bytes = Vec::with_capacity(digits.len() / 2);
        for pair in digits.as_bytes().chunks(2) {
            let hi = hex_digit(pair[0])?;
            let lo = hex_digit(pair[1])?;
            bytes.push((hi << 4) | lo);
        }
        Ok(Int::normalize(sign, magnitude_from_be_bytes(&bytes)))
    }
}

fn array_cmp_ordering(c: i32) -> std::cmp::Ordering {
    use std::cmp::Ordering;
    match c {
        0 => Ordering::Equal,
        x if x > 0 => Ordering::Greater,
        _ => Ordering::Less,
    }
}

fn hex_digit(c: u8) -> Result<u8> {
    match c {
        b'0'..=b'9' => Ok(c - b'0'),
        b'A'..=b'F' => Ok(c - b'A' + 10),
        _ => Err(Error::InvalidArgument),
    }
}

fn magnitude_to_be_bytes(limbs: &[Limb]) -> Vec<u8> {
    if limbs.is_empty() {
        return vec![0];
    }
    let mut bytes = Vec::with_capacity(limbs.len() * (LIMB_BITS as usize / 8));
    for &limb in limbs.iter().rev() {
        bytes.extend_from_slice(&limb.to_be_bytes());
    }
    let first_nonzero = bytes.iter().position(|&b| b != 0).unwrap_or(bytes.len() - 1);
    bytes[first_nonzero..].to_vec()
}

fn magnitude_from_be_bytes(bytes: &[u8]) -> Vec<Limb> {
    if bytes.iter().all(|&b| b == 0) {
        return Vec::new();
    }
    let limb_bytes = (LIMB_BITS / 8) as usize;
    let nlimbs = bytes.len().div_ceil(limb_bytes);
    let mut padded = vec![0u8; nlimbs * limb_bytes];
    let pad = padded.len() - bytes.len();
    padded[pad..].copy_from_slice(bytes);

    let mut limbs = vec![0 as Limb; nlimbs];
    for (i, chunk) in padded.rchunks(limb_bytes).enumerate() {
        let mut buf = [0u8; core::mem::size_of::<Limb>()];
        buf.copy_from_slice(chunk);
        limbs[i] = Limb::from_be_bytes(buf);
    }
    let n = array::limbs(&limbs);
    limbs.truncate(n);
    limbs
}

impl fmt::Display for Int {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl std::ops::Add for &Int {
    type Output = Int;
    fn add(self, rhs: &Int) -> Int {
        Int::add(self, rhs)
    }
}

impl std::ops::Sub for &Int {
    type Output = Int;
    fn sub(self, rhs: &Int) -> Int {
        Int::sub(self, rhs)
    }
}

impl std::ops::Mul for &Int {
    type Output = Int;
    fn mul(self, rhs: &Int) -> Int {
        Int::mul(self, rhs)
    }
}

impl std::ops::Neg for &Int {
    type Output = Int;
    fn neg(self) -> Int {
        self.negate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_canonical_non_negative() {
        let z = Int::zero();
        assert!(z.is_zero());
        assert!(!z.is_negative());
        assert_eq!(Int::from_limb(0).negate(), z);
    }

    #[test]
    fn same_sign_add() {
        let a = Int::from_limb(5);
        let b = Int::from_limb(7);
        assert_eq!(&a + &b, Int::from_limb(12));
        let na = a.negate();
        let nb = b.negate();
        assert_eq!(&na + &nb, Int::from_limb(12).negate());
    }

    #[test]
    fn mixed_sign_add_takes_winners_sign() {
        let a = Int::from_limb(10);
        let b = Int::from_limb(3).negate();
        assert_eq!(&a + &b, Int::from_limb(7));

        let a = Int::from_limb(3);
        let b = Int::from_limb(10).negate();
        assert_eq!(&a + &b, Int::from_limb(7).negate());
    }

    #[test]
    fn sub_matches_add_of_negation() {
        let a = Int::from_limb(20);
        let b = Int::from_limb(8);
        assert_eq!(a.sub(&b), Int::from_limb(12));
    }

    #[test]
    fn mul_sign_is_xor() {
        let a = Int::from_limb(6);
        let b = Int::from_limb(7).negate();
        assert_eq!(&a * &b, Int::from_limb(42).negate());
        assert_eq!(&b * &b, Int::from_limb(49));
    }

    #[test]
    fn div_rem_c99_remainder_sign() {
        let mut scratch = Scratch::new(16);
        let a = Int::from_limb(7).negate();
        let b = Int::from_limb(2);
        let (q, r) = a.div_rem(&b, &mut scratch).unwrap();
        assert_eq!(q, Int::from_limb(3).negate());
        assert_eq!(r, Int::from_limb(1).negate());
    }

    #[test]
    fn div_rem_zero_remainder_is_non_negative() {
        let mut scratch = Scratch::new(16);
        let a = Int::from_limb(8).negate();
        let b = Int::from_limb(4);
        let (q, r) = a.div_rem(&b, &mut scratch).unwrap();
        assert_eq!(q, Int::from_limb(2).negate());
        assert!(r.is_zero());
        assert!(!r.is_negative());
    }

    #[test]
    fn hex_roundtrip() {
        let a = Int::from_limb(0xDEAD_BEEF).negate();
        let hex = a.to_hex();
        assert_eq!(Int::from_hex(&hex).unwrap(), a);
        assert_eq!(Int::zero().to_hex(), "0");
    }

    #[test]
    fn be_bytes_roundtrip() {
        let a = Int::from_limb(0x1234);
        let bytes = a.to_be_bytes();
        assert_eq!(Int::from_be_bytes(&bytes), a);
        assert_eq!(Int::zero().to_be_bytes(), vec![0]);
    }

    #[test]
    fn cmp_respects_sign() {
        use std::cmp::Ordering;
        let pos = Int::from_limb(5);
        let neg = Int::from_limb(5).negate();
        assert_eq!(pos.cmp(&neg), Ordering::Greater);
        assert_eq!(neg.cmp(&pos), Ordering::Less);
        assert_eq!(
            Int::from_limb(3).negate().cmp(&Int::from_limb(9).negate()),
            Ordering::Greater
        );
    }
}
