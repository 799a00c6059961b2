//! Randomness sources and range sampling.
//!
//! Everything in this crate that needs random bytes — prime candidate
//! generation, Miller–Rabin witness selection — goes through the
//! [`RandBytes`] trait rather than reaching for the CSPRNG directly, so
//! callers can substitute a deterministic source in tests or swap in a
//! hardware RNG without touching the arithmetic.

use crate::array;
use crate::error::{Error, Result};
use crate::limb::Limb;
use crate::rng::Csprng;

/// A source of cryptographically secure random bytes.
pub trait RandBytes {
    /// Fills `out` completely or fails; a partial fill on error would
    /// silently weaken whatever was built from it, so implementations
    /// must not return `Ok` without having written every byte.
    fn fill(&mut self, out: &mut [u8]) -> Result<()>;
}

/// The default [`RandBytes`] source: the crate's own ChaCha20 CSPRNG,
/// seeded from OS entropy.
pub struct SystemRandom(Csprng);

impl SystemRandom {
    /// Seeds a new generator from the operating system.
    pub fn new() -> Self {
        SystemRandom(Csprng::new())
    }
}

impl Default for SystemRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl RandBytes for SystemRandom {
    fn fill(&mut self, out: &mut [u8]) -> Result<()> {
        self.0.fill_bytes(out);
        Ok(())
    }
}

fn limb_from_le_bytes(b: &[u8]) -> Limb {
    let mut buf = [0u8; core::mem::size_of::<Limb>()];
    buf.copy_from_slice(b);
    Limb::from_le_bytes(buf)
}

/// Draws a uniformly random value strictly between `lo` and `hi`
/// (exclusive on both ends) by rejection sampling: fill a buffer sized
/// to `hi`'s bit length with random bytes, mask the top bits down to
/// that length, and retry until the result lands in range or `max_tries`
/// is exhausted.
pub fn random_in_range<R: RandBytes>(
    lo: &[Limb],
    hi: &[Limb],
    rng: &mut R,
    max_tries: u32,
) -> Result<Vec<Limb>> {
    let hisize = array::limbs(hi);
    if hisize == 0 {
        return Err(Error::InvalidArgument);
    }
    let losize = array::limbs(lo);
    let bits = array::bits(&hi[..hisize]);
    let top_bits = bits % crate::limb::LIMB_BITS;
    let top_mask: Limb = if top_bits == 0 {
        Limb::MAX
    } else {
        ((1 as Limb) << top_bits) - 1
    };

    let limb_bytes = (crate::limb::LIMB_BITS / 8) as usize;
    let mut bytes = vec![0u8; hisize * limb_bytes];
    let mut buf = vec![0 as Limb; hisize];

    for _ in 0..max_tries {
        rng.fill(&mut bytes).map_err(|_| Error::RngFailure)?;
        for (i, chunk) in bytes.chunks(limb_bytes).enumerate() {
            buf[i] = limb_from_le_bytes(chunk);
        }
        buf[hisize - 1] &= top_mask;

        let n = array::limbs(&buf);
        if array::cmp(&buf[..n], &lo[..losize]) > 0 && array::cmp(&buf[..n], &hi[..hisize]) < 0 {
            return Ok(buf[..n].to_vec());
        }
    }
    Err(Error::Busy)
}
