//! The explicit-list allocator variant.
//!
//! Free blocks are threaded into a doubly linked list via [`FreeList`], so a
//! search only ever walks free blocks instead of every block in the heap.
//! The price is extra bookkeeping on every split, consume, and coalesce —
//! see [`crate::place`] and [`crate::coalesce`].

use std::ptr::NonNull;

use crate::block;
use crate::coalesce::coalesce_explicit;
use crate::config::{CHUNKSIZE, DSIZE, MIN_BLOCK_SIZE, WSIZE};
use crate::diagnostics::BlockInfo;
use crate::error::InitError;
use crate::freelist::{FreeList, NULL_OFF};
use crate::mem::Heap;
use crate::place::place_explicit;
use crate::policy::Fit;

/// A first/next/best-fit allocator over an explicit (linked) free list.
pub struct ExplicitAllocator {
    heap: Heap,
    heap_listp: u32,
    free_list: FreeList,
    /// Next-fit cursor. Unlike the implicit variant this always names a
    /// live free block (or `NULL_OFF` if the list is empty) — there is no
    /// physical fallback walk once the end of the free list is reached.
    current: u32,
    pub fit: Fit,
}

impl ExplicitAllocator {
    pub fn init(capacity: usize) -> Result<Self, InitError> {
        let mut heap = Heap::new(capacity);
        let base = heap.sbrk(4 * WSIZE)?;

        heap.write_word(base, 0);
        heap.write_word(base + WSIZE, block::pack(DSIZE, 1));
        heap.write_word(base + 2 * WSIZE, block::pack(DSIZE, 1));
        heap.write_word(base + 3 * WSIZE, block::pack(0, 1));

        let heap_listp = base + 2 * WSIZE;

        let mut this = ExplicitAllocator {
            heap,
            heap_listp,
            free_list: FreeList::new(),
            current: NULL_OFF,
            fit: Fit::default(),
        };
        this.extend_heap(CHUNKSIZE / WSIZE)
            .ok_or(InitError(crate::error::MemError))?;
        Ok(this)
    }

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

        // Must be captured before place_explicit, which may overwrite bp's
        // own succ link when splitting it.
        let next_cursor = self.heap.succ(bp);
        place_explicit(&mut self.heap, &mut self.free_list, bp, asize);
        self.current = if next_cursor != NULL_OFF {
            next_cursor
        } else {
            self.free_list.first
        };

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
        self.free_list.insert_in_front(&mut self.heap, bp);
        let merged = coalesce_explicit(&mut self.heap, &mut self.free_list, &mut self.current, bp);
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
        self.free_list
            .iter(&self.heap)
            .find(|&bp| asize <= self.heap.block_size(bp))
    }

    fn next_fit(&self, asize: u32) -> Option<u32> {
        if self.free_list.is_empty() {
            return None;
        }
        let mut bp = self.current;
        if bp == NULL_OFF {
            bp = self.free_list.first;
        }
        let start = bp;
        loop {
            if asize <= self.heap.block_size(bp) {
                return Some(bp);
            }
            let next = self.heap.succ(bp);
            bp = if next != NULL_OFF {
                next
            } else {
                self.free_list.first
            };
            if bp == start {
                return None;
            }
        }
    }

    fn best_fit(&self, asize: u32) -> Option<u32> {
        self.free_list
            .iter(&self.heap)
            .filter(|&bp| asize <= self.heap.block_size(bp))
            .min_by_key(|&bp| self.heap.block_size(bp))
    }

    fn extend_heap(&mut self, words: u32) -> Option<u32> {
        let words = if words % 2 != 0 { words + 1 } else { words };
        let size = words * WSIZE;

        let bp = self.heap.sbrk(size).ok()?;
        self.heap.set_block(bp, size, 0);
        let epilogue = self.heap.next_block_off(bp);
        self.heap.write_word(block::header_off(epilogue), block::pack(0, 1));

        self.free_list.insert_in_front(&mut self.heap, bp);
        let merged = coalesce_explicit(&mut self.heap, &mut self.free_list, &mut self.current, bp);
        tracing::debug!(bytes = size, "extend_heap grew the arena");
        Some(merged)
    }

    /// Structured walk of every physical block, prologue to epilogue.
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

    /// The free list's members in head-to-tail order, for tests and
    /// diagnostics.
    pub fn free_list(&self) -> Vec<u32> {
        self.free_list.iter(&self.heap).collect()
    }

    pub fn print_blocks(&self) {
        tracing::info!("---- explicit heap blocks ----");
        for b in self.blocks() {
            tracing::info!(offset = b.offset, size = b.size, allocated = b.allocated, "block");
        }
    }

    pub fn print_free_list(&self) {
        tracing::info!("---- explicit free list ----");
        for bp in self.free_list() {
            tracing::info!(offset = bp, size = self.heap.block_size(bp), "free block");
        }
    }
}
