//! Scratch arena for temporary limb buffers
//!
//! Multi-precision routines need working storage whose size depends on
//! their operands — a Montgomery reduction needs room for a double-wide
//! product, a division needs a normalized copy of its divisor — and
//! allocating that per call would put an allocator on every hot path.
//! [`Scratch`] is a small bump arena of limb chunks: [`Scratch::get`]
//! hands out a [`Mark`] describing a region, [`Scratch::put`] releases
//! it, and the two are expected to nest (LIFO), the same discipline the
//! reference optimizer pool uses.
//!
//! This is the one place in the kernel that allocates on the heap; the
//! array and Montgomery layers above it never call `Vec::new` directly
//! for working storage, only through here.

use crate::limb::Limb;

/// A region of scratch storage handed out by [`Scratch::get`]. Opaque:
/// callers pass it back to [`Scratch::slice_mut`] or [`Scratch::put`],
/// never index into it directly.
#[derive(Debug, Clone, Copy)]
pub struct Mark {
    chunk: usize,
    offset: usize,
    len: usize,
}

impl Mark {
    /// Number of limbs this mark covers.
    pub fn len(&self) -> usize {
        self.len
    }

    /// `true` if this mark covers no limbs.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

struct Chunk {
    limbs: Vec<Limb>,
    used: usize,
}

impl Chunk {
    fn new(room: usize) -> Self {
        Chunk {
            limbs: vec![0 as Limb; room],
            used: 0,
        }
    }

    fn room(&self) -> usize {
        self.limbs.len() - self.used
    }
}

/// A growable pool of limb chunks handed out in LIFO order.
///
/// `Scratch::new(n)` allocates a single chunk of `n` limbs up front;
/// further [`get`](Scratch::get) calls that outgrow the current chunks
/// append a fresh chunk sized `requested + total_capacity / 2`, the
/// same growth rule the reference pool uses to amortize repeated
/// allocation inside long-running exponentiation loops.
pub struct Scratch {
    chunks: Vec<Chunk>,
}

impl Scratch {
    /// Creates a pool with one chunk of `room` limbs already reserved.
    pub fn new(room: usize) -> Self {
        Scratch {
            chunks: vec![Chunk::new(room.max(1))],
        }
    }

    fn total_capacity(&self) -> usize {
        self.chunks.iter().map(|c| c.limbs.len()).sum()
    }

    /// Reserves `n` limbs and returns a [`Mark`] describing them. The
    /// returned region's contents are unspecified (not zeroed);
    /// callers write what they need before reading it back.
    pub fn get(&mut self, n: usize) -> Mark {
        if let Some((idx, chunk)) = self
            .chunks
            .iter_mut()
            .enumerate()
            .find(|(_, c)| c.room() >= n)
        {
            let offset = chunk.used;
            chunk.used += n;
            return Mark {
                chunk: idx,
                offset,
                len: n,
            };
        }

        let growth = n + self.total_capacity() / 2;
        self.chunks.push(Chunk::new(growth));
        let idx = self.chunks.len() - 1;
        let chunk = &mut self.chunks[idx];
        chunk.used = n;
        Mark {
            chunk: idx,
            offset: 0,
            len: n,
        }
    }

    /// Releases a region obtained from [`get`](Scratch::get). Callers
    /// must release marks in the reverse order they were obtained, the
    /// same LIFO discipline the reference pool assumes — releasing out
    /// of order leaves the skipped region's space stranded until the
    /// whole chunk resets, but does not corrupt anything.
    pub fn put(&mut self, mark: Mark) {
        let chunk = &mut self.chunks[mark.chunk];
        if mark.offset + mark.len == chunk.used {
            chunk.used = mark.offset;
        }
    }

    /// Materializes a mark as a mutable limb slice.
    pub fn slice_mut(&mut self, mark: &Mark) -> &mut [Limb] {
        let chunk = &mut self.chunks[mark.chunk];
        &mut chunk.limbs[mark.offset..mark.offset + mark.len]
    }

    /// Materializes two marks as disjoint mutable limb slices, in the
    /// order given. Panics if the two marks overlap (same chunk, same
    /// offset range) — a caller obtaining two live marks from `get`
    /// never gets overlapping regions, so this only fires on a misuse
    /// of a `Mark` after it was `put` back.
    pub fn two_slices_mut(&mut self, a: &Mark, b: &Mark) -> (&mut [Limb], &mut [Limb]) {
        if a.chunk != b.chunk {
            let (lo, hi) = if a.chunk < b.chunk {
                (a.chunk, b.chunk)
            } else {
                (b.chunk, a.chunk)
            };
            let (left, right) = self.chunks.split_at_mut(hi);
            let (lo_chunk, hi_chunk) = (&mut left[lo], &mut right[0]);
            let (a_chunk, b_chunk) = if a.chunk < b.chunk {
                (lo_chunk, hi_chunk)
            } else {
                (hi_chunk, lo_chunk)
            };
            (
                &mut a_chunk.limbs[a.offset..a.offset + a.len],
                &mut b_chunk.limbs[b.offset..b.offset + b.len],
            )
        } else {
            assert!(
                a.offset + a.len <= b.offset || b.offset + b.len <= a.offset,
                "overlapping scratch marks"
            );
            let chunk = &mut self.chunks[a.chunk].limbs;
            if a.offset < b.offset {
                let (left, right) = chunk.split_at_mut(b.offset);
                (
                    &mut left[a.offset..a.offset + a.len],
                    &mut right[..b.len],
                )
            } else {
                let (left, right) = chunk.split_at_mut(a.offset);
                (&mut right[..a.len], &mut left[b.offset..b.offset + b.len])
            }
        }
    }

    /// Marks every chunk unused without releasing the underlying
    /// allocations, for callers that want to reuse one pool across many
    /// unrelated operations instead of constructing a fresh one.
    pub fn reset(&mut self) {
        for chunk in &mut self.chunks {
            chunk.used = 0;
        }
    }
}
