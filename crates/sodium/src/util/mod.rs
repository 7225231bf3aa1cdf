// Copyright (C) Microsoft Corporation. All rights reserved.

//! Constant-time helpers backed by libsodium.

use super::*;

/// Compares two buffers in constant time.
///
/// Buffers of different lengths compare unequal without inspecting their
/// contents; the comparison time depends only on the length.
#[allow(unsafe_code)]
pub fn memcmp(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    if a.is_empty() {
        return true;
    }
    // SAFETY: both pointers are valid for a.len() bytes.
    unsafe { libsodium_sys::sodium_memcmp(a.as_ptr().cast(), b.as_ptr().cast(), a.len()) == 0 }
}

/// Returns `true` when every byte of `buf` is zero, in constant time.
#[allow(unsafe_code)]
pub fn is_zero(buf: &[u8]) -> bool {
    // SAFETY: pointer (or null for empty input) and length describe `buf`.
    unsafe { libsodium_sys::sodium_is_zero(support::ptr(buf), buf.len()) == 1 }
}

/// Increments `nonce` as a little-endian number in constant time.
///
/// Useful for deriving a sequence of unique nonces under one key.
#[allow(unsafe_code)]
pub fn increment(nonce: &mut [u8]) {
    // SAFETY: pointer (or null for empty input) and length describe `nonce`.
    unsafe { libsodium_sys::sodium_increment(support::ptr_mut(nonce), nonce.len()) }
}

/// Overwrites `buf` with zeros in a way the compiler cannot elide.
#[allow(unsafe_code)]
pub fn memzero(buf: &mut [u8]) {
    if buf.is_empty() {
        return;
    }
    // SAFETY: pointer and length describe `buf`.
    unsafe { libsodium_sys::sodium_memzero(buf.as_mut_ptr().cast(), buf.len()) }
}

#[cfg(test)]
mod tests {
    use test_with_tracing::test;

    use super::*;

    #[test]
    fn test_memcmp() {
        assert!(memcmp(b"abcd", b"abcd"));
        assert!(!memcmp(b"abcd", b"abce"));
        assert!(!memcmp(b"abcd", b"abc"));
        assert!(memcmp(b"", b""));
    }

    #[test]
    fn test_is_zero() {
        assert!(is_zero(&[0u8; 24]));
        assert!(!is_zero(&[0, 0, 1]));
        assert!(is_zero(&[]));
    }

    #[test]
    fn test_increment_carries() {
        let mut nonce = [0xffu8, 0xff, 0x00, 0x00];
        increment(&mut nonce);
        assert_eq!(nonce, [0x00, 0x00, 0x01, 0x00]);

        let mut wrap = [0xffu8; 4];
        increment(&mut wrap);
        assert_eq!(wrap, [0u8; 4]);
    }

    #[test]
    fn test_memzero() {
        let mut secret = [0x42u8; 32];
        memzero(&mut secret);
        assert_eq!(secret, [0u8; 32]);
    }
}
