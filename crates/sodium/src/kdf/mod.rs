// Copyright (C) Microsoft Corporation. All rights reserved.

//! Subkey derivation from a master key.
//!
//! Each subkey is identified by a 64-bit id and an 8-byte context string.
//! Different ids or contexts under the same master key yield independent
//! subkeys. The construction is BLAKE2b keyed with the master key, with the
//! id as salt and the context as personalization.

use std::ffi::c_char;

use super::*;

/// Master key size.
pub const KDF_KEYBYTES: usize = 32;
/// Context size.
pub const KDF_CONTEXTBYTES: usize = 8;
/// Smallest subkey length.
pub const KDF_BYTES_MIN: usize = 16;
/// Largest subkey length.
pub const KDF_BYTES_MAX: usize = 64;

define_secret_key!(
    /// KDF master key.
    pub KdfKey,
    KDF_KEYBYTES,
    keygen: libsodium_sys::crypto_kdf_keygen,
    as_array
);

/// Derivation parameters for one subkey.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KdfAlgo {
    subkey_id: u64,
    context: [u8; KDF_CONTEXTBYTES],
}

impl KdfAlgo {
    /// Creates derivation parameters.
    ///
    /// # Errors
    ///
    /// Returns [`SodiumError::InvalidSize`] unless `context` is exactly
    /// [`KDF_CONTEXTBYTES`] long.
    pub fn new(subkey_id: u64, context: &[u8]) -> Result<Self, SodiumError> {
        support::check_size(context, KDF_CONTEXTBYTES, "context")?;
        let mut ctx = [0u8; KDF_CONTEXTBYTES];
        ctx.copy_from_slice(context);
        Ok(Self {
            subkey_id,
            context: ctx,
        })
    }

    /// Subkey identifier.
    pub fn subkey_id(&self) -> u64 {
        self.subkey_id
    }

    /// Context string.
    pub fn context(&self) -> &[u8] {
        &self.context
    }
}

impl DeriveOp for KdfAlgo {
    type Key = KdfKey;
    type DerivedKey = DerivedKey;

    #[allow(unsafe_code)]
    fn derive(&self, key: &KdfKey, derived_len: usize) -> Result<DerivedKey, SodiumError> {
        support::check_len_in_range(derived_len, KDF_BYTES_MIN, KDF_BYTES_MAX, "subkey")?;
        init()?;
        let mut subkey = vec![0u8; derived_len];
        // SAFETY: the subkey buffer holds derived_len bytes, the context is 8
        // bytes and the key is a 32-byte array.
        let rc = unsafe {
            libsodium_sys::crypto_kdf_derive_from_key(
                subkey.as_mut_ptr(),
                subkey.len(),
                self.subkey_id,
                self.context.as_ptr().cast::<c_char>(),
                key.as_array().as_ptr(),
            )
        };
        // Wrap first so the buffer is wiped on the error path too.
        let subkey = DerivedKey::new(subkey);
        support::check_rc(rc, "crypto_kdf_derive_from_key")?;
        Ok(subkey)
    }
}

/// Convenience entry point for one-off derivations.
pub struct Kdf;

impl Kdf {
    /// Derives a `len`-byte subkey of `key` for `subkey_id` and `context`.
    pub fn derive(
        key: &KdfKey,
        subkey_id: u64,
        context: &[u8],
        len: usize,
    ) -> Result<DerivedKey, SodiumError> {
        KdfAlgo::new(subkey_id, context)?.derive(key, len)
    }

    /// Returns libsodium's name for the KDF primitive.
    #[allow(unsafe_code)]
    pub fn primitive() -> String {
        // SAFETY: returns a pointer to a static string.
        support::static_str(unsafe { libsodium_sys::crypto_kdf_primitive() })
    }
}

#[cfg(test)]
mod tests;
