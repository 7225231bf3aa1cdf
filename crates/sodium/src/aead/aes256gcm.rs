// Copyright (C) Microsoft Corporation. All rights reserved.

//! AES-256-GCM.
//!
//! libsodium only provides a hardware implementation of AES-256-GCM. Every
//! operation checks [`aes256gcm_is_available`] first and returns
//! [`SodiumError::Unsupported`] on CPUs without the required instructions.
//!
//! Expanding the AES key schedule is comparatively expensive, so
//! [`Aes256Gcm::precompute`] performs it once and returns an
//! [`Aes256GcmPrecomputed`] context for encrypting many messages.

use libsodium_sys::crypto_aead_aes256gcm_state;

use super::*;

/// Nonce size of AES-256-GCM.
pub const AES256GCM_NPUBBYTES: usize = 12;
/// Tag size of AES-256-GCM.
pub const AES256GCM_ABYTES: usize = 16;
/// Alignment libsodium requires for the precomputed state.
const AES256GCM_STATE_ALIGN: usize = 16;
const AES256GCM_MESSAGE_MAX: u64 = 16 * ((1u64 << 32) - 2);

static FNS: AeadFns<u8> = AeadFns {
    name: "crypto_aead_aes256gcm",
    nonce_size: AES256GCM_NPUBBYTES,
    tag_size: AES256GCM_ABYTES,
    message_max: AES256GCM_MESSAGE_MAX,
    encrypt: libsodium_sys::crypto_aead_aes256gcm_encrypt,
    decrypt: libsodium_sys::crypto_aead_aes256gcm_decrypt,
    encrypt_detached: libsodium_sys::crypto_aead_aes256gcm_encrypt_detached,
    decrypt_detached: libsodium_sys::crypto_aead_aes256gcm_decrypt_detached,
};

static FNS_AFTERNM: AeadFns<crypto_aead_aes256gcm_state> = AeadFns {
    name: "crypto_aead_aes256gcm_afternm",
    nonce_size: AES256GCM_NPUBBYTES,
    tag_size: AES256GCM_ABYTES,
    message_max: AES256GCM_MESSAGE_MAX,
    encrypt: libsodium_sys::crypto_aead_aes256gcm_encrypt_afternm,
    decrypt: libsodium_sys::crypto_aead_aes256gcm_decrypt_afternm,
    encrypt_detached: libsodium_sys::crypto_aead_aes256gcm_encrypt_detached_afternm,
    decrypt_detached: libsodium_sys::crypto_aead_aes256gcm_decrypt_detached_afternm,
};

fn ensure_available() -> Result<(), SodiumError> {
    if !aes256gcm_is_available()? {
        return Err(SodiumError::Unsupported("AES-256-GCM"));
    }
    Ok(())
}

/// AES-256-GCM keyed with an [`AeadKey`].
pub struct Aes256Gcm {
    key: AeadKey,
}

impl Aes256Gcm {
    /// Creates a cipher bound to `key`.
    ///
    /// Construction always succeeds; availability is checked per operation.
    pub fn new(key: AeadKey) -> Self {
        Self { key }
    }

    /// Expands the key schedule once for repeated use.
    ///
    /// # Errors
    ///
    /// - [`SodiumError::Unsupported`] if AES-256-GCM is unavailable
    /// - [`SodiumError::AllocationFailed`] if the aligned state cannot be laid out
    #[allow(unsafe_code)]
    pub fn precompute(&self) -> Result<Aes256GcmPrecomputed, SodiumError> {
        ensure_available()?;
        // SAFETY: pure size query.
        let state_size = unsafe { libsodium_sys::crypto_aead_aes256gcm_statebytes() };
        let mut state = NativeState::<crypto_aead_aes256gcm_state>::new(
            state_size,
            AES256GCM_STATE_ALIGN,
        )?;
        // SAFETY: the state is allocated with the size and alignment libsodium
        // requires, and the key holds AEAD_KEYBYTES bytes.
        let rc = unsafe {
            libsodium_sys::crypto_aead_aes256gcm_beforenm(state.as_mut_ptr(), self.key_ptr())
        };
        support::check_rc(rc, "crypto_aead_aes256gcm_beforenm")?;
        Ok(Aes256GcmPrecomputed { state })
    }

    fn ready(&self) -> Result<(), SodiumError> {
        ensure_available()
    }

    fn key_ptr(&self) -> *const u8 {
        self.key.as_array().as_ptr()
    }
}

impl_aead_op!(Aes256Gcm, FNS);

/// AES-256-GCM with a precomputed key schedule.
///
/// Produces exactly the same ciphertexts as the [`Aes256Gcm`] it was derived
/// from. The expanded key lives in 16-byte aligned memory that is wiped on
/// drop.
pub struct Aes256GcmPrecomputed {
    state: NativeState<crypto_aead_aes256gcm_state>,
}

// SAFETY: after beforenm the state is only read by the afternm functions, so
// sharing references across threads cannot race.
#[allow(unsafe_code)]
unsafe impl Sync for Aes256GcmPrecomputed {}

impl Aes256GcmPrecomputed {
    fn ready(&self) -> Result<(), SodiumError> {
        Ok(())
    }

    fn key_ptr(&self) -> *const crypto_aead_aes256gcm_state {
        self.state.as_ptr()
    }
}

impl_aead_op!(Aes256GcmPrecomputed, FNS_AFTERNM);
