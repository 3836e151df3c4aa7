//! Block metadata codec.
//!
//! This is the only module allowed to interpret raw arena bytes as block
//! metadata. Everything here mirrors the C original's macros one-for-one:
//!
//! ```text
//!      31                     3  2  1  0
//!      -----------------------------------
//!     | s  s  s  s  ... s  s  s  0  0  a/f
//!      -----------------------------------
//! ```
//!
//! `s` is the block size (always a multiple of 8, so the low three bits are
//! free); `a/f` is the allocation bit. Header and footer hold the same
//! encoded word. `bp` throughout this crate names the byte offset of a
//! block's *payload* — the same convention the original's `bp` pointer
//! follows — never the offset of its header.

use crate::config::{DSIZE, WSIZE};
use crate::mem::Heap;

const ALLOC_BIT: u32 = 0x1;
const SIZE_MASK: u32 = !0x7;

/// Packs a block size and allocation bit into a header/footer word.
/// `size` is truncated to a multiple of 8; `alloc` is truncated to one bit.
#[inline]
pub(crate) fn pack(size: u32, alloc: u32) -> u32 {
    (size & SIZE_MASK) | (alloc & ALLOC_BIT)
}

#[inline]
pub(crate) fn size_of_word(word: u32) -> u32 {
    word & SIZE_MASK
}

#[inline]
pub(crate) fn alloc_of_word(word: u32) -> u32 {
    word & ALLOC_BIT
}

/// Offset of `bp`'s header: `HDRP(bp) = bp - WSIZE`.
#[inline]
pub(crate) fn header_off(bp: u32) -> u32 {
    bp - WSIZE
}

impl Heap {
    /// `GET(HDRP(bp))`.
    pub(crate) fn header_word(&self, bp: u32) -> u32 {
        self.read_word(header_off(bp))
    }

    /// `FTRP(bp) = bp + GET_SIZE(HDRP(bp)) - DSIZE`.
    pub(crate) fn footer_off(&self, bp: u32) -> u32 {
        bp + size_of_word(self.header_word(bp)) - DSIZE
    }

    /// `GET_SIZE(HDRP(bp))`.
    pub(crate) fn block_size(&self, bp: u32) -> u32 {
        size_of_word(self.header_word(bp))
    }

    /// `GET_ALLOC(HDRP(bp))`.
    pub(crate) fn is_alloc(&self, bp: u32) -> bool {
        alloc_of_word(self.header_word(bp)) == 1
    }

    /// `NEXT_BLKP(bp) = bp + GET_SIZE(HDRP(bp))`.
    pub(crate) fn next_block_off(&self, bp: u32) -> u32 {
        bp + self.block_size(bp)
    }

    /// `PREV_BLKP(bp) = bp - GET_SIZE(bp - DSIZE)`: reads the previous
    /// block's footer, which sits exactly one double-word below `bp`.
    pub(crate) fn prev_block_off(&self, bp: u32) -> u32 {
        bp - size_of_word(self.read_word(bp - DSIZE))
    }

    /// Writes `pack(size, alloc)` to both header and footer of the block at
    /// `bp`, sized `size`. The one write site every placement/coalesce
    /// operation funnels through.
    pub(crate) fn set_block(&mut self, bp: u32, size: u32, alloc: u32) {
        let word = pack(size, alloc);
        self.write_word(header_off(bp), word);
        self.write_word(bp + size - DSIZE, word);
    }
}
