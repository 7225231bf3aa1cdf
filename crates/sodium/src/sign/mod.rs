// Copyright (C) Microsoft Corporation. All rights reserved.

//! Ed25519 signatures.
//!
//! # Calling forms
//!
//! - Detached: [`Ed25519Algo`] implements [`SignOp`] and [`VerifyOp`]
//! - Combined: [`sign_attached`] prepends the signature to the message,
//!   [`open_attached`] verifies and strips it
//! - Streaming: [`Ed25519phAlgo`] signs a message fed in chunks (Ed25519ph,
//!   pre-hashed with SHA-512). Its signatures are not interchangeable with
//!   plain Ed25519 signatures.

mod ed25519ph;
mod keys;

use std::ptr;

pub use ed25519ph::*;
pub use keys::*;

use super::*;

/// Signature size.
pub const SIGN_BYTES: usize = 64;
/// Public key size.
pub const SIGN_PUBLICKEYBYTES: usize = 32;
/// Secret key size (seed followed by public key).
pub const SIGN_SECRETKEYBYTES: usize = 64;
/// Seed size.
pub const SIGN_SEEDBYTES: usize = 32;

/// Ed25519 detached signatures.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Ed25519Algo;

impl Ed25519Algo {
    /// Returns libsodium's name for the signature primitive.
    #[allow(unsafe_code)]
    pub fn primitive() -> String {
        // SAFETY: returns a pointer to a static string.
        support::static_str(unsafe { libsodium_sys::crypto_sign_primitive() })
    }
}

impl SignOp for Ed25519Algo {
    type Key = SigningKey;

    #[allow(unsafe_code)]
    fn sign(
        &self,
        key: &SigningKey,
        data: &[u8],
        signature: Option<&mut [u8]>,
    ) -> Result<usize, SodiumError> {
        support::with_output(signature, SIGN_BYTES, "signature output", |out| {
            init()?;
            // SAFETY: `out` holds SIGN_BYTES, the key is a 64-byte array and
            // data pointer and length describe `data`. The length output is
            // optional.
            let rc = unsafe {
                libsodium_sys::crypto_sign_detached(
                    out.as_mut_ptr(),
                    ptr::null_mut(),
                    support::ptr(data),
                    support::len_u64(data),
                    key.as_array().as_ptr(),
                )
            };
            support::check_rc(rc, "crypto_sign_detached")
        })
    }
}

impl VerifyOp for Ed25519Algo {
    type Key = VerifyingKey;

    #[allow(unsafe_code)]
    fn verify(&self, key: &VerifyingKey, data: &[u8], signature: &[u8]) -> Result<(), SodiumError> {
        support::check_size(signature, SIGN_BYTES, "signature")?;
        init()?;
        // SAFETY: the signature was validated, the key is a 32-byte array and
        // data pointer and length describe `data`.
        let rc = unsafe {
            libsodium_sys::crypto_sign_verify_detached(
                signature.as_ptr(),
                support::ptr(data),
                support::len_u64(data),
                key.as_array().as_ptr(),
            )
        };
        support::check_verify(rc)
    }
}

/// Signs `message` and writes the signature followed by the message.
///
/// Pass `None` as `signed` to query the output size, which is
/// [`SIGN_BYTES`] more than the message.
#[allow(unsafe_code)]
pub fn sign_attached(
    key: &SigningKey,
    message: &[u8],
    signed: Option<&mut [u8]>,
) -> Result<usize, SodiumError> {
    let len = message.len() + SIGN_BYTES;
    support::with_output(signed, len, "signed message output", |out| {
        init()?;
        // SAFETY: `out` holds message + SIGN_BYTES bytes and the key is a
        // 64-byte array. The length output is optional.
        let rc = unsafe {
            libsodium_sys::crypto_sign(
                out.as_mut_ptr(),
                ptr::null_mut(),
                support::ptr(message),
                support::len_u64(message),
                key.as_array().as_ptr(),
            )
        };
        support::check_rc(rc, "crypto_sign")
    })
}

/// Verifies a signed message and writes the message without its signature.
///
/// # Errors
///
/// - [`SodiumError::InvalidSize`] if `signed` is shorter than a signature
/// - [`SodiumError::VerificationFailed`] if the signature does not verify;
///   the output region is wiped
#[allow(unsafe_code)]
pub fn open_attached(
    key: &VerifyingKey,
    signed: &[u8],
    message: Option<&mut [u8]>,
) -> Result<usize, SodiumError> {
    support::check_size_min(signed, SIGN_BYTES, "signed message")?;
    let len = signed.len() - SIGN_BYTES;
    support::with_opened_output(message, len, |out| {
        init()?;
        // SAFETY: `out` holds signed.len() - SIGN_BYTES bytes (null when
        // empty) and the key is a 32-byte array. The length output is
        // optional.
        let rc = unsafe {
            libsodium_sys::crypto_sign_open(
                support::ptr_mut(out),
                ptr::null_mut(),
                signed.as_ptr(),
                support::len_u64(signed),
                key.as_array().as_ptr(),
            )
        };
        support::check_verify(rc)
    })
}

/// [`sign_attached`] returning an owned buffer.
pub fn sign_attached_vec(key: &SigningKey, message: &[u8]) -> Result<Vec<u8>, SodiumError> {
    let mut signed = vec![0u8; message.len() + SIGN_BYTES];
    sign_attached(key, message, Some(&mut signed))?;
    Ok(signed)
}

/// [`open_attached`] returning an owned buffer.
pub fn open_attached_vec(key: &VerifyingKey, signed: &[u8]) -> Result<Vec<u8>, SodiumError> {
    let len = open_attached(key, signed, None)?;
    let mut message = vec![0u8; len];
    open_attached(key, signed, Some(&mut message))?;
    Ok(message)
}

#[cfg(test)]
mod tests;
