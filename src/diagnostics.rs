//! Read-only block/free-list introspection shared by both allocator façades.

/// One physical block as reported by [`crate::implicit::ImplicitAllocator::blocks`]
/// or [`crate::explicit::ExplicitAllocator::blocks`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockInfo {
    /// Payload offset (`bp`), not the header offset.
    pub offset: u32,
    /// Total block size in bytes, header and footer included.
    pub size: u32,
    pub allocated: bool,
}
