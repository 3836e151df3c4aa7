//! The implicit-list allocator variant.
//!
//! Free blocks carry no list of their own — every search walks the entire
//! physical block chain via `next_block_off`, filtering on the allocation
//! bit. Simpler bookkeeping than the explicit variant, at the cost of an
//! O(heap) search in the worst case.

use std::ptr::NonNull;

use crate::block;
use crate::coalesce::coalesce_implicit;
use crate::config::{CHUNKSIZE, DSIZE, MIN_BLOCK_SIZE, WSIZE};
use crate::diagnostics::BlockInfo;
use crate::error::InitError;
use crate::mem::Heap;
use crate::place::place_implicit;
use crate::policy::Fit;

/// A first/next/best-fit allocator over an implicit (physically-walked)
/// free list.
pub struct ImplicitAllocator {
    heap: Heap,
    /// Payload offset of the prologue block; the scan start for every
    /// physical walk, and the anchor `printBlocks` walks from.
    heap_listp: u32,
    /// Next-fit cursor: the block physically after the last one allocated.
    /// Always a valid block offset (possibly the epilogue, size 0).
    current: u32,
    /// Active placement policy, consulted on every `malloc`.
    pub fit: Fit,
}

impl ImplicitAllocator {
    /// Initializes a fresh heap of `capacity` bytes: lays down the
    /// pad/prologue/epilogue sentinels, then extends by one chunk so the
    /// first `malloc` has somewhere to place into.
    pub fn init(capacity: usize) -> Result<Self, InitError> {
        let mut heap = Heap::new(capacity);
        let base = heap.sbrk(4 * WSIZE)?;

        heap.write_word(base, 0); // padding
        heap.write_word(base + WSIZE, block::pack(DSIZE, 1)); // prologue header
        heap.write_word(base + 2 * WSIZE, block::pack(DSIZE, 1)); // prologue footer
        heap.write_word(base + 3 * WSIZE, block::pack(0, 1)); // epilogue header

        let heap_listp = base + 2 * WSIZE;
        // NEXT_BLKP(heap_listp) lands exactly on the not-yet-extended
        // epilogue, which becomes the first real free block once
        // extend_heap below overwrites it.
        let current = heap.next_block_off(heap_listp);

        let mut this = ImplicitAllocator {
            heap,
            heap_listp,
            current,
            fit: Fit::default(),
        };
        this.extend_heap(CHUNKSIZE / WSIZE)
            .ok_or(InitError(crate::error::MemError))?;
        Ok(this)
    }

    /// Total bytes currently committed to the heap (for diagnostics/tests).
    pub fn heap_bytes(&self) -> usize {
        self.heap.size()
    }

    /// Recovers the block offset of a payload pointer previously handed out
    /// by this allocator, for diagnostics and tests.
    pub fn offset_of(&self, ptr: NonNull<u8>) -> u32 {
        self.heap.offset_of(ptr)
    }

    fn normalize(size: usize) -> u32 {
        if size as u32 <= DSIZE {
            MIN_BLOCK_SIZE
        } else {
            DSIZE * ((size as u32 + DSIZE + (DSIZE - 1)) / DSIZE)
        }
    }

    pub fn malloc(&mut self, size: usize) -> Option<NonNull<u8>> {
        if size == 0 {
            tracing::debug!("malloc(0) -> null");
            return None;
        }
        let asize = Self::normalize(size);

        let bp = match self.find_fit(asize) {
            Some(bp) => bp,
            None => {
                let extend_words = asize.max(CHUNKSIZE) / WSIZE;
                match self.extend_heap(extend_words) {
                    Some(bp) => bp,
                    None => {
                        tracing::error!(size, asize, "malloc: out of memory");
                        return None;
                    }
                }
            }
        };

        place_implicit(&mut self.heap, bp, asize);
        self.current = self.heap.next_block_off(bp);
        tracing::debug!(size, asize, bp, "malloc placed block");
        Some(self.heap.payload_ptr(bp))
    }

    pub fn free(&mut self, ptr: Option<NonNull<u8>>) {
        let Some(ptr) = ptr else {
            return;
        };
        let bp = self.heap.offset_of(ptr);
        if !self.heap.is_alloc(bp) {
            tracing::warn!(bp, "free: double free ignored");
            return;
        }
        let size = self.heap.block_size(bp);
        self.heap.set_block(bp, size, 0);
        let merged = coalesce_implicit(&mut self.heap, &mut self.current, bp);
        tracing::debug!(bp, merged, "free coalesced block");
    }

    pub fn realloc(&mut self, ptr: Option<NonNull<u8>>, size: usize) -> Option<NonNull<u8>> {
        let Some(old_ptr) = ptr else {
            return self.malloc(size);
        };
        if size == 0 {
            self.free(Some(old_ptr));
            return None;
        }

        let old_bp = self.heap.offset_of(old_ptr);
        let old_block_size = self.heap.block_size(old_bp);
        if old_block_size >= size as u32 + WSIZE + WSIZE {
            return Some(old_ptr);
        }

        let new_ptr = self.malloc(size)?;
        let new_bp = self.heap.offset_of(new_ptr);
        let old_payload_capacity = old_block_size - 2 * WSIZE;
        let copy_len = (size as u32).min(old_payload_capacity);
        self.heap.copy_bytes(old_bp, new_bp, copy_len);
        self.free(Some(old_ptr));
        Some(new_ptr)
    }

    fn find_fit(&self, asize: u32) -> Option<u32> {
        match self.fit {
            Fit::FirstFit => self.first_fit(asize),
            Fit::NextFit => self.next_fit(asize),
            Fit::BestFit => self.best_fit(asize),
        }
    }

    fn first_fit(&self, asize: u32) -> Option<u32> {
        let mut bp = self.heap_listp;
        while self.heap.block_size(bp) > 0 {
            if !self.heap.is_alloc(bp) && asize <= self.heap.block_size(bp) {
                return Some(bp);
            }
            bp = self.heap.next_block_off(bp);
        }
        None
    }

    fn next_fit(&self, asize: u32) -> Option<u32> {
        let mut bp = self.current;
        while self.heap.block_size(bp) > 0 {
            if !self.heap.is_alloc(bp) && asize <= self.heap.block_size(bp) {
                return Some(bp);
            }
            bp = self.heap.next_block_off(bp);
        }
        let mut bp = self.heap_listp;
        while bp != self.current {
            if !self.heap.is_alloc(bp) && asize <= self.heap.block_size(bp) {
                return Some(bp);
            }
            bp = self.heap.next_block_off(bp);
        }
        None
    }

    fn best_fit(&self, asize: u32) -> Option<u32> {
        let mut best: Option<(u32, u32)> = None;
        let mut bp = self.heap_listp;
        while self.heap.block_size(bp) > 0 {
            let sz = self.heap.block_size(bp);
            if !self.heap.is_alloc(bp) && asize <= sz {
                if !matches!(best, Some((_, bsz)) if sz >= bsz) {
                    best = Some((bp, sz));
                }
            }
            bp = self.heap.next_block_off(bp);
        }
        best.map(|(bp, _)| bp)
    }

    fn extend_heap(&mut self, words: u32) -> Option<u32> {
        let words = if words % 2 != 0 { words + 1 } else { words };
        let size = words * WSIZE;

        let bp = self.heap.sbrk(size).ok()?;
        self.heap.set_block(bp, size, 0);
        let epilogue = self.heap.next_block_off(bp);
        self.heap.write_word(block::header_off(epilogue), block::pack(0, 1));

        let merged = coalesce_implicit(&mut self.heap, &mut self.current, bp);
        tracing::debug!(bytes = size, "extend_heap grew the arena");
        Some(merged)
    }

    /// Structured walk of every block, prologue to epilogue, for tests and
    /// diagnostics. Read-only.
    pub fn blocks(&self) -> Vec<BlockInfo> {
        let mut out = Vec::new();
        let mut bp = self.heap_listp;
        while self.heap.block_size(bp) > 0 {
            out.push(BlockInfo {
                offset: bp,
                size: self.heap.block_size(bp),
                allocated: self.heap.is_alloc(bp),
            });
            bp = self.heap.next_block_off(bp);
        }
        out
    }

    /// Logs the same walk `blocks()` returns, at `info` level.
    pub fn print_blocks(&self) {
        tracing::info!("---- implicit heap blocks ----");
        for b in self.blocks() {
            tracing::info!(offset = b.offset, size = b.size, allocated = b.allocated, "block");
        }
    }
}
