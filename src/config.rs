//! Compile-time constants shared by both allocator variants.
//!
//! Mirrors the `#define`s at the top of the original C allocator: word size,
//! double-word alignment, minimum block size, and the heap-extension chunk
//! size. Kept as plain `const`s rather than a runtime configuration type —
//! none of these are meant to vary per instance, only the arena capacity is
//! (see [`crate::mem::Heap::new`]).

/// Size of a header/footer word, and of a free-list link, in bytes.
pub const WSIZE: u32 = 4;

/// Double-word alignment boundary. All block sizes are multiples of this.
pub const DSIZE: u32 = 8;

/// Smallest possible block: enough room for header, footer, and (in the
/// explicit variant) both free-list link words.
pub const MIN_BLOCK_SIZE: u32 = 2 * DSIZE;

/// Default heap-growth increment, in bytes, requested from the simulated
/// heap primitive when no free block satisfies a request.
pub const CHUNKSIZE: u32 = 1 << 12;

/// Default capacity of the simulated arena when a caller doesn't pick one.
pub const DEFAULT_MAX_HEAP_BYTES: usize = 1 << 24;
