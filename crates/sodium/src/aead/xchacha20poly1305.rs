// Copyright (C) Microsoft Corporation. All rights reserved.

//! XChaCha20-Poly1305: ChaCha20-Poly1305 with a 192-bit nonce.

use super::*;

/// Nonce size of XChaCha20-Poly1305 (IETF).
pub const XCHACHA20POLY1305_IETF_NPUBBYTES: usize = 24;
/// Tag size of XChaCha20-Poly1305 (IETF).
pub const XCHACHA20POLY1305_IETF_ABYTES: usize = 16;

static FNS: AeadFns<u8> = AeadFns {
    name: "crypto_aead_xchacha20poly1305_ietf",
    nonce_size: XCHACHA20POLY1305_IETF_NPUBBYTES,
    tag_size: XCHACHA20POLY1305_IETF_ABYTES,
    message_max: u64::MAX - XCHACHA20POLY1305_IETF_ABYTES as u64,
    encrypt: libsodium_sys::crypto_aead_xchacha20poly1305_ietf_encrypt,
    decrypt: libsodium_sys::crypto_aead_xchacha20poly1305_ietf_decrypt,
    encrypt_detached: libsodium_sys::crypto_aead_xchacha20poly1305_ietf_encrypt_detached,
    decrypt_detached: libsodium_sys::crypto_aead_xchacha20poly1305_ietf_decrypt_detached,
};

/// XChaCha20-Poly1305 (IETF) keyed with an [`AeadKey`].
///
/// The nonce is long enough to be generated with [`Rng::rand_vec`] for every
/// message.
pub struct XChaCha20Poly1305Ietf {
    key: AeadKey,
}

impl XChaCha20Poly1305Ietf {
    /// Creates a cipher bound to `key`.
    pub fn new(key: AeadKey) -> Self {
        Self { key }
    }

    fn ready(&self) -> Result<(), SodiumError> {
        Ok(())
    }

    fn key_ptr(&self) -> *const u8 {
        self.key.as_array().as_ptr()
    }
}

impl_aead_op!(XChaCha20Poly1305Ietf, FNS);
