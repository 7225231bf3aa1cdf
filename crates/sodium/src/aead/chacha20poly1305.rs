// Copyright (C) Microsoft Corporation. All rights reserved.

//! ChaCha20-Poly1305 as specified in RFC 8439.

use super::*;

/// Nonce size of ChaCha20-Poly1305 (IETF).
pub const CHACHA20POLY1305_IETF_NPUBBYTES: usize = 12;
/// Tag size of ChaCha20-Poly1305 (IETF).
pub const CHACHA20POLY1305_IETF_ABYTES: usize = 16;

static FNS: AeadFns<u8> = AeadFns {
    name: "crypto_aead_chacha20poly1305_ietf",
    nonce_size: CHACHA20POLY1305_IETF_NPUBBYTES,
    tag_size: CHACHA20POLY1305_IETF_ABYTES,
    message_max: 64 * ((1u64 << 32) - 1),
    encrypt: libsodium_sys::crypto_aead_chacha20poly1305_ietf_encrypt,
    decrypt: libsodium_sys::crypto_aead_chacha20poly1305_ietf_decrypt,
    encrypt_detached: libsodium_sys::crypto_aead_chacha20poly1305_ietf_encrypt_detached,
    decrypt_detached: libsodium_sys::crypto_aead_chacha20poly1305_ietf_decrypt_detached,
};

/// ChaCha20-Poly1305 (IETF) keyed with an [`AeadKey`].
///
/// The 96-bit nonce is too short to be chosen at random for a large number
/// of messages; use a counter or [`XChaCha20Poly1305Ietf`] instead.
pub struct ChaCha20Poly1305Ietf {
    key: AeadKey,
}

impl ChaCha20Poly1305Ietf {
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

impl_aead_op!(ChaCha20Poly1305Ietf, FNS);
