// Copyright (C) Microsoft Corporation. All rights reserved.

//! BLAKE2b generic hashing.
//!
//! [`Blake2b`] is a builder describing one hash configuration: digest length,
//! optional key, optional salt and personalization. The same value computes
//! one-shot digests through [`HashOp`] and starts streaming computations
//! through [`HashStreamingOp`]; both produce identical digests.

mod context;

use std::ptr;

pub use context::*;
use zeroize::Zeroizing;

use super::*;

/// Smallest supported digest length.
pub const GENERICHASH_BYTES_MIN: usize = 16;
/// Largest supported digest length.
pub const GENERICHASH_BYTES_MAX: usize = 64;
/// Recommended digest length.
pub const GENERICHASH_BYTES: usize = 32;
/// Smallest supported key length.
pub const GENERICHASH_KEYBYTES_MIN: usize = 16;
/// Largest supported key length.
pub const GENERICHASH_KEYBYTES_MAX: usize = 64;
/// Recommended key length.
pub const GENERICHASH_KEYBYTES: usize = 32;
/// Salt length.
pub const GENERICHASH_SALTBYTES: usize = 16;
/// Personalization length.
pub const GENERICHASH_PERSONALBYTES: usize = 16;

const BLAKE2B_BLOCK_SIZE: usize = 128;

define_secret_key!(
    /// Key for keyed BLAKE2b hashing, of the recommended length.
    pub GenericHashKey,
    GENERICHASH_KEYBYTES,
    keygen: libsodium_sys::crypto_generichash_keygen
);

/// BLAKE2b hash configuration.
#[derive(Clone)]
pub struct Blake2b {
    out_len: usize,
    key: Option<Zeroizing<Vec<u8>>>,
    salt: Option<[u8; GENERICHASH_SALTBYTES]>,
    personal: Option<[u8; GENERICHASH_PERSONALBYTES]>,
}

impl Blake2b {
    /// Unkeyed BLAKE2b producing `out_len` bytes.
    ///
    /// # Errors
    ///
    /// Returns [`SodiumError::InvalidSize`] unless `out_len` is within
    /// [`GENERICHASH_BYTES_MIN`]`..=`[`GENERICHASH_BYTES_MAX`].
    pub fn new(out_len: usize) -> Result<Self, SodiumError> {
        support::check_len_in_range(
            out_len,
            GENERICHASH_BYTES_MIN,
            GENERICHASH_BYTES_MAX,
            "digest",
        )?;
        Ok(Self {
            out_len,
            key: None,
            salt: None,
            personal: None,
        })
    }

    /// Turns the configuration into a keyed hash (a MAC).
    pub fn with_key(mut self, key: &[u8]) -> Result<Self, SodiumError> {
        support::check_size_in_range(
            key,
            GENERICHASH_KEYBYTES_MIN,
            GENERICHASH_KEYBYTES_MAX,
            "key",
        )?;
        self.key = Some(Zeroizing::new(key.to_vec()));
        Ok(self)
    }

    /// Adds a salt and a personalization string, both exactly 16 bytes.
    pub fn with_salt_personal(mut self, salt: &[u8], personal: &[u8]) -> Result<Self, SodiumError> {
        support::check_size(salt, GENERICHASH_SALTBYTES, "salt")?;
        support::check_size(personal, GENERICHASH_PERSONALBYTES, "personal")?;
        let mut s = [0u8; GENERICHASH_SALTBYTES];
        s.copy_from_slice(salt);
        let mut p = [0u8; GENERICHASH_PERSONALBYTES];
        p.copy_from_slice(personal);
        self.salt = Some(s);
        self.personal = Some(p);
        Ok(self)
    }

    /// Digest length in bytes.
    pub fn output_size(&self) -> usize {
        self.out_len
    }

    /// Returns libsodium's name for the generic hash primitive.
    #[allow(unsafe_code)]
    pub fn primitive() -> String {
        // SAFETY: returns a pointer to a static string.
        support::static_str(unsafe { libsodium_sys::crypto_generichash_primitive() })
    }

    fn key_parts(&self) -> (*const u8, usize) {
        support::opt_ptr(self.key.as_deref().map(Vec::as_slice))
    }

    fn salt_ptr(&self) -> *const u8 {
        self.salt.as_ref().map_or(ptr::null(), |s| s.as_ptr())
    }

    fn personal_ptr(&self) -> *const u8 {
        self.personal.as_ref().map_or(ptr::null(), |p| p.as_ptr())
    }
}

impl Default for Blake2b {
    fn default() -> Self {
        Self {
            out_len: GENERICHASH_BYTES,
            key: None,
            salt: None,
            personal: None,
        }
    }
}

impl std::fmt::Debug for Blake2b {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Blake2b")
            .field("out_len", &self.out_len)
            .field("keyed", &self.key.is_some())
            .field("salt", &self.salt)
            .field("personal", &self.personal)
            .finish()
    }
}

impl HashOp for Blake2b {
    #[allow(unsafe_code)]
    fn hash(&self, data: &[u8], output: Option<&mut [u8]>) -> Result<usize, SodiumError> {
        support::with_output(output, self.out_len, "digest output", |out| {
            init()?;
            let (key, key_len) = self.key_parts();
            // SAFETY: `out` holds out_len bytes, the key pointer is null or
            // valid for key_len bytes, salt and personal are null or 16 bytes.
            let rc = unsafe {
                libsodium_sys::crypto_generichash_blake2b_salt_personal(
                    out.as_mut_ptr(),
                    out.len(),
                    support::ptr(data),
                    support::len_u64(data),
                    key,
                    key_len,
                    self.salt_ptr(),
                    self.personal_ptr(),
                )
            };
            support::check_rc(rc, "crypto_generichash_blake2b")
        })
    }
}

impl HashStreamingOp for Blake2b {
    type Context = Blake2bContext;

    fn hash_init(self) -> Result<Self::Context, SodiumError> {
        Blake2bContext::new(self)
    }
}
