//! Montgomery context: modulus, `k0`, and the `R`/`R^2` constants every
//! reduction, encode, and exponentiation call needs.

use crate::array;
use crate::error::{Error, Result};
use crate::limb::Limb;
use crate::scratch::Scratch;

/// `k0 = -m0^-1 mod 2^W` via Hensel lifting: `y` converges to `m0^-1 mod
/// 2^i` one bit at a time, starting from the trivial `m0^-1 mod 2 == 1`
/// (every odd `m0` is its own inverse mod 2).
fn montgomery_factor(m0: Limb) -> Limb {
    let mut x: Limb = 2;
    let mut y: Limb = 1;
    let mut mask: Limb = x.wrapping_mul(2).wrapping_sub(1);
    for _ in 2..=crate::limb::LIMB_BITS {
        let r = m0.wrapping_mul(y);
        if x < (r & mask) {
            y = y.wrapping_add(x);
        }
        mask = mask.wrapping_mul(2).wrapping_add(1);
        x = x.wrapping_shl(1);
    }
    y.wrapping_neg()
}

/// A bound Montgomery modulus: the odd value itself plus the derived
/// constants `k0`, `r = R mod m`, and `rr = R^2 mod m`, where `R =
/// 2^(msize * LIMB_BITS)`.
///
/// All four fields are secret-dependent for an RSA private-key modulus
/// and are wiped on drop.
pub struct Context {
    modulus: Vec<Limb>,
    k0: Limb,
    r: Vec<Limb>,
    rr: Vec<Limb>,
}

impl Context {
    /// Builds a context bound to `modulus`, which must be nonzero and
    /// odd. `modulus` need not be pre-trimmed; trailing zero limbs are
    /// dropped first.
    pub fn new(modulus: &[Limb]) -> Result<Self> {
        let modsize = array::limbs(modulus);
        if modsize == 0 || modulus[0] & 1 == 0 {
            return Err(Error::InvalidArgument);
        }
        let modulus: Vec<Limb> = modulus[..modsize].to_vec();
        let k0 = montgomery_factor(modulus[0]);

        let mut scratch = Scratch::new(4 * modsize + 8);

        // R mod m: a single set bit at limb position `modsize` (i.e.
        // 2^(modsize*W)), reduced by the modulus.
        let rmark = scratch.get(modsize + 2);
        {
            let buf = scratch.slice_mut(&rmark);
            for limb in buf.iter_mut() {
                *limb = 0;
            }
            buf[modsize] = 1;
        }
        let mmark = scratch.get(modsize);
        scratch.slice_mut(&mmark)[..modsize].copy_from_slice(&modulus);
        let rsize = {
            let (x, y) = scratch.two_slices_mut(&rmark, &mmark);
            array::rem(x, modsize + 1, y, modsize)?
        };
        let mut r = scratch.slice_mut(&rmark)[..rsize].to_vec();
        r.resize(modsize, 0);
        scratch.put(mmark);
        scratch.put(rmark);

        // R^2 mod m: square the reduced R, then reduce again.
        let sqmark = scratch.get(2 * modsize + 1);
        {
            let buf = scratch.slice_mut(&sqmark);
            for limb in buf.iter_mut() {
                *limb = 0;
            }
            array::sqr(&mut buf[..2 * modsize], &r);
        }
        let mmark2 = scratch.get(modsize);
        scratch.slice_mut(&mmark2)[..modsize].copy_from_slice(&modulus);
        let rrsize = {
            let (x, y) = scratch.two_slices_mut(&sqmark, &mmark2);
            array::rem(x, 2 * modsize, y, modsize)?
        };
        let mut rr = scratch.slice_mut(&sqmark)[..rrsize].to_vec();
        rr.resize(modsize, 0);
        scratch.put(mmark2);
        scratch.put(sqmark);

        Ok(Context {
            modulus,
            k0,
            r,
            rr,
        })
    }

    /// Number of limbs in the bound modulus.
    pub fn modsize(&self) -> usize {
        self.modulus.len()
    }

    /// The bound modulus.
    pub fn modulus(&self) -> &[Limb] {
        &self.modulus
    }

    /// `-m0^-1 mod 2^W`.
    pub fn k0(&self) -> Limb {
        self.k0
    }

    /// `R mod m`, i.e. the Montgomery encoding of `1`.
    pub fn r(&self) -> &[Limb] {
        &self.r
    }

    /// `R^2 mod m`, the constant used to encode a plain value into
    /// Montgomery form.
    pub fn rr(&self) -> &[Limb] {
        &self.rr
    }
}

impl Drop for Context {
    fn drop(&mut self) {
        self.modulus.fill(0);
        self.r.fill(0);
        self.rr.fill(0);
        self.k0 = 0;
    }
}
