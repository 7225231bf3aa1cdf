// Copyright (C) Microsoft Corporation. All rights reserved.

//! Authenticated encryption with associated data.
//!
//! # Supported Algorithms
//!
//! - **ChaCha20-Poly1305 (IETF)**: 96-bit nonce, portable
//! - **XChaCha20-Poly1305 (IETF)**: 192-bit nonce, safe to pick at random
//! - **AES-256-GCM**: 96-bit nonce, only on CPUs with AES and carry-less
//!   multiplication instructions, with an optional precomputed key schedule
//!
//! All three share one marshalling path ([`AeadFns`]) parameterized by the
//! libsodium entry points of each algorithm.

mod aes256gcm;
mod chacha20poly1305;
mod xchacha20poly1305;

use std::ffi::c_int;
use std::ptr;

pub use aes256gcm::*;
pub use chacha20poly1305::*;
pub use xchacha20poly1305::*;

use super::*;

/// Key size shared by every AEAD algorithm in this module.
pub const AEAD_KEYBYTES: usize = 32;

define_secret_key!(
    /// 256-bit AEAD key, usable with any algorithm in this module.
    pub AeadKey,
    AEAD_KEYBYTES,
    keygen: libsodium_sys::crypto_aead_xchacha20poly1305_ietf_keygen,
    as_array
);

type EncryptFn<K> = unsafe extern "C" fn(
    c: *mut u8,
    clen_p: *mut u64,
    m: *const u8,
    mlen: u64,
    ad: *const u8,
    adlen: u64,
    nsec: *const u8,
    npub: *const u8,
    k: *const K,
) -> c_int;

type DecryptFn<K> = unsafe extern "C" fn(
    m: *mut u8,
    mlen_p: *mut u64,
    nsec: *mut u8,
    c: *const u8,
    clen: u64,
    ad: *const u8,
    adlen: u64,
    npub: *const u8,
    k: *const K,
) -> c_int;

type EncryptDetachedFn<K> = unsafe extern "C" fn(
    c: *mut u8,
    mac: *mut u8,
    maclen_p: *mut u64,
    m: *const u8,
    mlen: u64,
    ad: *const u8,
    adlen: u64,
    nsec: *const u8,
    npub: *const u8,
    k: *const K,
) -> c_int;

type DecryptDetachedFn<K> = unsafe extern "C" fn(
    m: *mut u8,
    nsec: *mut u8,
    c: *const u8,
    clen: u64,
    mac: *const u8,
    ad: *const u8,
    adlen: u64,
    npub: *const u8,
    k: *const K,
) -> c_int;

/// libsodium entry points and sizes of one AEAD construction.
///
/// `K` is what the construction is keyed with: raw key bytes (`u8`) or a
/// precomputed native state.
pub(crate) struct AeadFns<K> {
    pub(crate) name: &'static str,
    pub(crate) nonce_size: usize,
    pub(crate) tag_size: usize,
    pub(crate) message_max: u64,
    pub(crate) encrypt: EncryptFn<K>,
    pub(crate) decrypt: DecryptFn<K>,
    pub(crate) encrypt_detached: EncryptDetachedFn<K>,
    pub(crate) decrypt_detached: DecryptDetachedFn<K>,
}

impl<K> AeadFns<K> {
    fn check_message(&self, len: usize) -> Result<(), SodiumError> {
        let max = usize::try_from(self.message_max).unwrap_or(usize::MAX);
        support::check_len_max(len, max, "message")
    }

    /// Combined encryption.
    ///
    /// # Safety
    ///
    /// `key` must point to a valid key (or key state) for this construction
    /// and remain valid for the duration of the call.
    #[allow(unsafe_code)]
    pub(crate) unsafe fn seal(
        &self,
        key: *const K,
        nonce: &[u8],
        aad: Option<&[u8]>,
        plaintext: &[u8],
        ciphertext: Option<&mut [u8]>,
    ) -> Result<usize, SodiumError> {
        support::check_size(nonce, self.nonce_size, "nonce")?;
        self.check_message(plaintext.len())?;
        let len = plaintext.len() + self.tag_size;
        support::with_output(ciphertext, len, "ciphertext output", |out| {
            init()?;
            let (ad, adlen) = support::opt_ptr(aad);
            let mut clen = 0u64;
            // SAFETY: `out` holds plaintext.len() + tag_size bytes, every
            // input pointer is valid for its length, and the caller vouches
            // for `key`.
            let rc = unsafe {
                (self.encrypt)(
                    out.as_mut_ptr(),
                    &mut clen,
                    support::ptr(plaintext),
                    support::len_u64(plaintext),
                    ad,
                    adlen as u64,
                    ptr::null(),
                    nonce.as_ptr(),
                    key,
                )
            };
            support::check_rc(rc, self.name)
        })
    }

    /// Combined decryption. Wipes `plaintext` when verification fails.
    ///
    /// # Safety
    ///
    /// See [`seal`](Self::seal).
    #[allow(unsafe_code)]
    pub(crate) unsafe fn open(
        &self,
        key: *const K,
        nonce: &[u8],
        aad: Option<&[u8]>,
        ciphertext: &[u8],
        plaintext: Option<&mut [u8]>,
    ) -> Result<usize, SodiumError> {
        support::check_size(nonce, self.nonce_size, "nonce")?;
        support::check_size_min(ciphertext, self.tag_size, "ciphertext")?;
        let len = ciphertext.len() - self.tag_size;
        support::with_opened_output(plaintext, len, |out| {
            init()?;
            let (ad, adlen) = support::opt_ptr(aad);
            let mut mlen = 0u64;
            // SAFETY: `out` holds ciphertext.len() - tag_size bytes, every
            // input pointer is valid for its length, and the caller vouches
            // for `key`.
            let rc = unsafe {
                (self.decrypt)(
                    support::ptr_mut(out),
                    &mut mlen,
                    ptr::null_mut(),
                    ciphertext.as_ptr(),
                    support::len_u64(ciphertext),
                    ad,
                    adlen as u64,
                    nonce.as_ptr(),
                    key,
                )
            };
            support::check_verify(rc)
        })
    }

    /// Detached encryption.
    ///
    /// # Safety
    ///
    /// See [`seal`](Self::seal).
    #[allow(unsafe_code)]
    pub(crate) unsafe fn seal_detached(
        &self,
        key: *const K,
        nonce: &[u8],
        aad: Option<&[u8]>,
        plaintext: &[u8],
        ciphertext: &mut [u8],
        tag: &mut [u8],
    ) -> Result<(), SodiumError> {
        support::check_size(nonce, self.nonce_size, "nonce")?;
        support::check_size(tag, self.tag_size, "tag")?;
        support::check_size(ciphertext, plaintext.len(), "ciphertext output")?;
        self.check_message(plaintext.len())?;
        init()?;
        let (ad, adlen) = support::opt_ptr(aad);
        let mut taglen = 0u64;
        // SAFETY: ciphertext and plaintext have equal lengths, tag holds
        // tag_size bytes, and the caller vouches for `key`.
        let rc = unsafe {
            (self.encrypt_detached)(
                support::ptr_mut(ciphertext),
                tag.as_mut_ptr(),
                &mut taglen,
                support::ptr(plaintext),
                support::len_u64(plaintext),
                ad,
                adlen as u64,
                ptr::null(),
                nonce.as_ptr(),
                key,
            )
        };
        support::check_rc(rc, self.name)
    }

    /// Detached decryption. Wipes `plaintext` when verification fails.
    ///
    /// # Safety
    ///
    /// See [`seal`](Self::seal).
    #[allow(unsafe_code)]
    pub(crate) unsafe fn open_detached(
        &self,
        key: *const K,
        nonce: &[u8],
        aad: Option<&[u8]>,
        ciphertext: &[u8],
        tag: &[u8],
        plaintext: &mut [u8],
    ) -> Result<(), SodiumError> {
        support::check_size(nonce, self.nonce_size, "nonce")?;
        support::check_size(tag, self.tag_size, "tag")?;
        support::check_size(plaintext, ciphertext.len(), "plaintext output")?;
        support::with_opened_output(Some(plaintext), ciphertext.len(), |out| {
            init()?;
            let (ad, adlen) = support::opt_ptr(aad);
            // SAFETY: `out` and ciphertext have equal lengths, tag holds
            // tag_size bytes, and the caller vouches for `key`.
            let rc = unsafe {
                (self.decrypt_detached)(
                    support::ptr_mut(out),
                    ptr::null_mut(),
                    support::ptr(ciphertext),
                    support::len_u64(ciphertext),
                    tag.as_ptr(),
                    ad,
                    adlen as u64,
                    nonce.as_ptr(),
                    key,
                )
            };
            support::check_verify(rc)
        })
        .map(|_| ())
    }
}

/// Implements [`AeadOp`] for a cipher holding an [`AeadKey`] in `self.key`
/// and keyed through the given [`AeadFns`] table.
macro_rules! impl_aead_op {
    ($name:ty, $fns:expr) => {
        impl AeadOp for $name {
            fn nonce_size(&self) -> usize {
                $fns.nonce_size
            }

            fn tag_size(&self) -> usize {
                $fns.tag_size
            }

            #[allow(unsafe_code)]
            fn seal(
                &self,
                nonce: &[u8],
                aad: Option<&[u8]>,
                plaintext: &[u8],
                ciphertext: Option<&mut [u8]>,
            ) -> Result<usize, SodiumError> {
                self.ready()?;
                // SAFETY: the key is borrowed from self for the whole call.
                unsafe { $fns.seal(self.key_ptr(), nonce, aad, plaintext, ciphertext) }
            }

            #[allow(unsafe_code)]
            fn open(
                &self,
                nonce: &[u8],
                aad: Option<&[u8]>,
                ciphertext: &[u8],
                plaintext: Option<&mut [u8]>,
            ) -> Result<usize, SodiumError> {
                self.ready()?;
                // SAFETY: the key is borrowed from self for the whole call.
                unsafe { $fns.open(self.key_ptr(), nonce, aad, ciphertext, plaintext) }
            }

            #[allow(unsafe_code)]
            fn seal_detached(
                &self,
                nonce: &[u8],
                aad: Option<&[u8]>,
                plaintext: &[u8],
                ciphertext: &mut [u8],
                tag: &mut [u8],
            ) -> Result<(), SodiumError> {
                self.ready()?;
                // SAFETY: the key is borrowed from self for the whole call.
                unsafe { $fns.seal_detached(self.key_ptr(), nonce, aad, plaintext, ciphertext, tag) }
            }

            #[allow(unsafe_code)]
            fn open_detached(
                &self,
                nonce: &[u8],
                aad: Option<&[u8]>,
                ciphertext: &[u8],
                tag: &[u8],
                plaintext: &mut [u8],
            ) -> Result<(), SodiumError> {
                self.ready()?;
                // SAFETY: the key is borrowed from self for the whole call.
                unsafe { $fns.open_detached(self.key_ptr(), nonce, aad, ciphertext, tag, plaintext) }
            }
        }
    };
}

pub(crate) use impl_aead_op;

#[cfg(test)]
mod tests;
