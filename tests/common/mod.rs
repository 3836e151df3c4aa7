//! Structural invariant checks shared across the end-to-end scenario tests
//! (spec §8: "Structural invariants").

use rallocator::BlockInfo;

/// No two physically adjacent blocks are both free (every free/alloc
/// sequence a coalescing allocator ever produces must merge these).
pub fn no_adjacent_free_blocks(blocks: &[BlockInfo]) {
    for pair in blocks.windows(2) {
        assert!(
            !(!pair[0].allocated && !pair[1].allocated),
            "adjacent free blocks at {} and {} were not coalesced",
            pair[0].offset,
            pair[1].offset
        );
    }
}

/// Walking the block chain visits a contiguous prefix of the heap: each
/// block starts exactly where the previous one ended.
pub fn blocks_are_contiguous(blocks: &[BlockInfo]) {
    for pair in blocks.windows(2) {
        assert_eq!(
            pair[0].offset + pair[0].size,
            pair[1].offset,
            "gap between block {} and block {}",
            pair[0].offset,
            pair[1].offset
        );
    }
}

/// The explicit free list's membership must equal the set of physically
/// free blocks reported by `blocks()`.
pub fn free_list_matches_free_blocks(blocks: &[BlockInfo], free_list: &[u32]) {
    let mut physically_free: Vec<u32> = blocks
        .iter()
        .filter(|b| !b.allocated)
        .map(|b| b.offset)
        .collect();
    let mut listed = free_list.to_vec();
    physically_free.sort_unstable();
    listed.sort_unstable();
    assert_eq!(
        physically_free, listed,
        "free list membership diverges from physically free blocks"
    );
}

pub fn total_free_bytes(blocks: &[BlockInfo]) -> u64 {
    blocks
        .iter()
        .filter(|b| !b.allocated)
        .map(|b| b.size as u64)
        .sum()
}
