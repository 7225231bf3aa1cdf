// Copyright (C) Microsoft Corporation. All rights reserved.

//! Marshalling between Rust slices and libsodium's pointer/length arguments.
//!
//! libsodium accepts a null pointer for any zero-length input, so empty
//! slices are always passed as null rather than as the dangling pointer Rust
//! uses for empty slices.

use std::ffi::c_char;
use std::ffi::c_int;
use std::ffi::CStr;
use std::ptr;

use super::*;

/// Returns a pointer to the first byte of `buf`, or null when `buf` is empty.
pub(crate) fn ptr(buf: &[u8]) -> *const u8 {
    if buf.is_empty() {
        ptr::null()
    } else {
        buf.as_ptr()
    }
}

/// Mutable counterpart of [`ptr`].
pub(crate) fn ptr_mut(buf: &mut [u8]) -> *mut u8 {
    if buf.is_empty() {
        ptr::null_mut()
    } else {
        buf.as_mut_ptr()
    }
}

/// Returns the optional slice's pointer and length, or null and zero.
pub(crate) fn opt_ptr(buf: Option<&[u8]>) -> (*const u8, usize) {
    match buf {
        Some(buf) => (ptr(buf), buf.len()),
        None => (ptr::null(), 0),
    }
}

/// Length of `buf` as libsodium's `unsigned long long`.
pub(crate) fn len_u64(buf: &[u8]) -> u64 {
    buf.len() as u64
}

/// Translates a native return code, logging and reporting any non-zero value
/// as a failure of `op`.
pub(crate) fn check_rc(rc: c_int, op: &'static str) -> Result<(), SodiumError> {
    if rc != 0 {
        tracing::error!(op, rc, "native call failed");
        return Err(SodiumError::NativeFailure(op));
    }
    Ok(())
}

/// Translates the return code of a verifying native call.
///
/// Any non-zero value means the tag, signature or password did not verify.
pub(crate) fn check_verify(rc: c_int) -> Result<(), SodiumError> {
    if rc != 0 {
        return Err(SodiumError::VerificationFailed);
    }
    Ok(())
}

/// Copies a library-owned, NUL-terminated string.
#[allow(unsafe_code)]
pub(crate) fn static_str(s: *const c_char) -> String {
    if s.is_null() {
        return String::new();
    }
    // SAFETY: libsodium returns pointers to static NUL-terminated strings that
    // live for the duration of the process.
    unsafe { CStr::from_ptr(s) }.to_string_lossy().into_owned()
}

/// Writes `len` bytes into `output` with `f`, or returns `len` when `output`
/// is `None`.
///
/// `output` must hold at least `len` bytes. This is the shared shape of every
/// "optional output buffer" operation in the crate.
pub(crate) fn with_output<F>(
    output: Option<&mut [u8]>,
    len: usize,
    role: &'static str,
    f: F,
) -> Result<usize, SodiumError>
where
    F: FnOnce(&mut [u8]) -> Result<(), SodiumError>,
{
    let Some(output) = output else {
        return Ok(len);
    };
    check_len_min(output.len(), len, role)?;
    f(&mut output[..len])?;
    Ok(len)
}

/// Like [`with_output`], but wipes the output region when `f` fails so a
/// rejected message never leaves plaintext behind.
pub(crate) fn with_opened_output<F>(
    output: Option<&mut [u8]>,
    len: usize,
    f: F,
) -> Result<usize, SodiumError>
where
    F: FnOnce(&mut [u8]) -> Result<(), SodiumError>,
{
    let Some(output) = output else {
        return Ok(len);
    };
    check_len_min(output.len(), len, "plaintext output")?;
    let output = &mut output[..len];
    if let Err(err) = f(output) {
        crate::memzero(output);
        return Err(err);
    }
    Ok(len)
}
