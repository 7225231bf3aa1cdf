// Copyright (C) Microsoft Corporation. All rights reserved.

//! Aligned storage for native state structures.
//!
//! Several libsodium state structures (BLAKE2b, AES-256-GCM) declare a
//! mandatory alignment that a plain `Vec<u8>` does not guarantee. The types in
//! this module allocate through [`std::alloc`] with an explicit [`Layout`] so
//! the alignment is guaranteed by the allocator, and wipe the block before
//! releasing it.

use std::alloc;
use std::alloc::Layout;
use std::marker::PhantomData;
use std::mem;
use std::ptr::NonNull;

use super::*;

/// Heap block with a guaranteed alignment, zeroed on allocation and wiped on
/// drop.
pub(crate) struct AlignedBuf {
    ptr: NonNull<u8>,
    layout: Layout,
}

// SAFETY: AlignedBuf exclusively owns its allocation; nothing else aliases it.
#[allow(unsafe_code)]
unsafe impl Send for AlignedBuf {}

impl AlignedBuf {
    /// Allocates `size` zeroed bytes aligned to `align`.
    ///
    /// # Errors
    ///
    /// Returns [`SodiumError::AllocationFailed`] when `align` is not a power of
    /// two or the rounded size overflows.
    #[allow(unsafe_code)]
    pub(crate) fn zeroed(size: usize, align: usize) -> Result<Self, SodiumError> {
        let layout = Layout::from_size_align(size.max(1), align)
            .map_err(|_| SodiumError::AllocationFailed)?;
        // SAFETY: the layout has a non-zero size.
        let raw = unsafe { alloc::alloc_zeroed(layout) };
        let Some(ptr) = NonNull::new(raw) else {
            alloc::handle_alloc_error(layout);
        };
        Ok(Self { ptr, layout })
    }

    /// Size of the block in bytes.
    pub(crate) fn len(&self) -> usize {
        self.layout.size()
    }

    /// Alignment of the block in bytes.
    #[allow(dead_code)]
    pub(crate) fn align(&self) -> usize {
        self.layout.align()
    }

    pub(crate) fn as_ptr(&self) -> *const u8 {
        self.ptr.as_ptr()
    }

    pub(crate) fn as_mut_ptr(&mut self) -> *mut u8 {
        self.ptr.as_ptr()
    }
}

impl Drop for AlignedBuf {
    #[allow(unsafe_code)]
    fn drop(&mut self) {
        // SAFETY: ptr was returned by alloc_zeroed with this exact layout and is
        // valid for layout.size() bytes until dealloc below.
        unsafe {
            libsodium_sys::sodium_memzero(self.ptr.as_ptr().cast(), self.layout.size());
            alloc::dealloc(self.ptr.as_ptr(), self.layout);
        }
    }
}

/// Typed, aligned storage for an opaque native state structure `T`.
///
/// The block is at least `size_of::<T>()` bytes and at least as large as the
/// size libsodium reports at runtime, and is aligned to the stricter of
/// `align_of::<T>()` and the alignment libsodium documents for the state.
pub(crate) struct NativeState<T> {
    buf: AlignedBuf,
    _state: PhantomData<T>,
}

impl<T> NativeState<T> {
    /// Allocates zeroed storage for `T`.
    ///
    /// # Arguments
    ///
    /// * `native_size` - state size reported by libsodium (`*_statebytes()`)
    /// * `align` - alignment the native header declares for the state
    pub(crate) fn new(native_size: usize, align: usize) -> Result<Self, SodiumError> {
        let size = native_size.max(mem::size_of::<T>());
        let align = align.max(mem::align_of::<T>());
        Ok(Self {
            buf: AlignedBuf::zeroed(size, align)?,
            _state: PhantomData,
        })
    }

    pub(crate) fn as_ptr(&self) -> *const T {
        self.buf.as_ptr().cast()
    }

    pub(crate) fn as_mut_ptr(&mut self) -> *mut T {
        self.buf.as_mut_ptr().cast()
    }

    #[allow(dead_code)]
    pub(crate) fn len(&self) -> usize {
        self.buf.len()
    }
}
