//! Unsigned comparison.

use crate::limb::Limb;

/// Unsigned comparison of `a` against `b`: `1` if `a > b`, `0` if
/// `a == b`, `-1` if `a < b`. Compares by length first (callers are
/// expected to have trimmed both operands to their significant length
/// with [`super::limbs`] beforehand), then from the most significant
/// limb down.
pub fn cmp(a: &[Limb], b: &[Limb]) -> i32 {
    if a.len() != b.len() {
        return if a.len() > b.len() { 1 } else { -1 };
    }
    for i in (0..a.len()).rev() {
        if a[i] != b[i] {
            return if a[i] > b[i] { 1 } else { -1 };
        }
    }
    0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cmp_by_length() {
        assert_eq!(cmp(&[1, 2, 3], &[1, 2]), 1);
        assert_eq!(cmp(&[1, 2], &[1, 2, 3]), -1);
    }

    #[test]
    fn cmp_by_value() {
        assert_eq!(cmp(&[5, 1], &[9, 1]), -1);
        assert_eq!(cmp(&[9, 1], &[5, 1]), 1);
        assert_eq!(cmp(&[9, 1], &[9, 1]), 0);
    }

    #[test]
    fn cmp_empty() {
        let empty: [Limb; 0] = [];
        assert_eq!(cmp(&empty, &empty), 0);
    }
}
