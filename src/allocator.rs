use core::alloc::Layout;
use core::ptr::NonNull;

use crate::error::GrowVecError;

/// A pluggable allocation capability.
///
/// `GrowVec` calls the allocator by reference and never owns it. Implementors
/// return raw byte buffers; the vector layers element typing on top via
/// [`Layout::array`]. All three operations are fallible and errors propagate
/// to the caller of the triggering vector operation unchanged.
pub trait Allocator {
    /// Allocates a fresh buffer for `layout`.
    ///
    /// # Errors
    ///
    /// Returns `GrowVecError::AllocationFailed` (or an implementor-specific
    /// error) if the memory cannot be provided.
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, GrowVecError>;

    /// Resizes a buffer previously obtained from this allocator.
    ///
    /// The returned pointer may differ from `ptr`; on success the old pointer
    /// must no longer be used. On failure the old buffer stays valid.
    ///
    /// # Errors
    ///
    /// Returns `GrowVecError::AllocationFailed` if the memory cannot be
    /// provided.
    fn reallocate(
        &self,
        ptr: NonNull<u8>,
        old_layout: Layout,
        new_layout: Layout,
    ) -> Result<NonNull<u8>, GrowVecError>;

    /// Releases a buffer previously obtained from this allocator.
    ///
    /// # Errors
    ///
    /// Implementor-specific; the global allocator never fails here.
    fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) -> Result<(), GrowVecError>;
}

/// The default allocator, backed by the global allocation facilities of the
/// `alloc` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct Global;

impl Allocator for Global {
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, GrowVecError> {
        // Zero-size layouts never reach the allocator: zero-sized element
        // types are rejected at construction and capacity has a floor of 1.
        let ptr = unsafe { alloc::alloc::alloc(layout) };
        NonNull::new(ptr).ok_or(GrowVecError::AllocationFailed {
            bytes: layout.size(),
        })
    }

    fn reallocate(
        &self,
        ptr: NonNull<u8>,
        old_layout: Layout,
        new_layout: Layout,
    ) -> Result<NonNull<u8>, GrowVecError> {
        // SAFETY: `ptr` was allocated by this allocator with `old_layout`,
        // and `new_layout.size()` is nonzero (capacity floor of 1, non-ZST).
        let ptr = unsafe { alloc::alloc::realloc(ptr.as_ptr(), old_layout, new_layout.size()) };
        NonNull::new(ptr).ok_or(GrowVecError::AllocationFailed {
            bytes: new_layout.size(),
        })
    }

    fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) -> Result<(), GrowVecError> {
        // SAFETY: `ptr` was allocated by this allocator with `layout`.
        unsafe { alloc::alloc::dealloc(ptr.as_ptr(), layout) };
        Ok(())
    }
}

/// Returns the process-wide default allocator instance.
#[must_use]
pub fn default_allocator() -> &'static Global {
    static DEFAULT: Global = Global;
    &DEFAULT
}
