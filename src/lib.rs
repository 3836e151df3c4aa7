//! # rallocator - a simulated user-space dynamic storage allocator
//!
//! This crate provides two drop-in implementations of `malloc`/`free`/
//! `realloc` over a simulated heap, each built on one of the two classic
//! free-block bookkeeping strategies:
//!
//! ```text
//!   rallocator
//!   ├── config      - shared constants (word size, chunk size, ...)
//!   ├── error       - MemError / InitError
//!   ├── mem         - the simulated sbrk-style heap arena
//!   ├── block       - header/footer codec
//!   ├── freelist    - explicit variant's doubly linked free list
//!   ├── policy      - Fit: FirstFit / NextFit / BestFit
//!   ├── place       - split-or-consume on allocation
//!   ├── coalesce    - merge-with-neighbors on free
//!   ├── implicit    - ImplicitAllocator: physical-walk free search
//!   ├── explicit    - ExplicitAllocator: linked-list free search
//!   └── diagnostics - read-only block/free-list introspection
//! ```
//!
//! ## Overview
//!
//! Both allocators manage one contiguous, fixed-capacity simulated heap.
//! Every block — free or allocated — carries a boundary-tag header and
//! footer (`size << 3 | alloc_bit`), which is what makes coalescing with
//! either physical neighbor an O(1) operation regardless of variant. The
//! implicit variant finds a free block by walking every block in the heap;
//! the explicit variant threads free blocks into their own doubly linked
//! list so a search only ever visits free blocks.
//!
//! ## Quick start
//!
//! ```rust
//! use rallocator::{ImplicitAllocator, Fit};
//!
//! let mut a = ImplicitAllocator::init(1 << 16).unwrap();
//! a.fit = Fit::BestFit;
//!
//! let p = a.malloc(64).unwrap();
//! let p = a.realloc(Some(p), 256).unwrap();
//! a.free(Some(p));
//! ```
//!
//! ## Safety
//!
//! The public allocation surface (`malloc`/`free`/`realloc`) hands out and
//! consumes `NonNull<u8>` pointers into the simulated arena. Callers must
//! not dereference a pointer after it has been passed to `free`, nor read
//! or write past the size that was requested for it — the same contract
//! `malloc(3)` carries. Everything below that surface (header/footer codec,
//! free-list linkage, offset/pointer conversion) is implemented without
//! `unsafe`, by construction: blocks are always addressed as `u32` byte
//! offsets into a `Box<[u8]>` that never reallocates, and pointers are
//! handed out via safe, bounds-checked slice indexing.

mod block;
mod coalesce;
mod config;
mod diagnostics;
mod error;
pub mod explicit;
mod freelist;
pub mod implicit;
mod mem;
mod place;
mod policy;

pub use config::DEFAULT_MAX_HEAP_BYTES;
pub use diagnostics::BlockInfo;
pub use error::{InitError, MemError};
pub use explicit::ExplicitAllocator;
pub use implicit::ImplicitAllocator;
pub use policy::Fit;
