// Copyright (C) Microsoft Corporation. All rights reserved.

//! Authenticated encryption with associated data.
//!
//! Implementors hold their key (or precomputed key state), so the same trait
//! covers both plain and precomputed ciphers.

use super::*;

/// Authenticated encryption with associated data.
///
/// # Forms
///
/// - Combined: the tag is appended to the ciphertext
///   (`ciphertext.len() == plaintext.len() + tag_size()`).
/// - Detached: ciphertext and tag are separate buffers
///   (`ciphertext.len() == plaintext.len()`).
///
/// # Errors
///
/// All methods validate nonce, tag and buffer sizes before calling into
/// libsodium and return [`SodiumError::InvalidSize`] on mismatch. Open
/// operations return [`SodiumError::VerificationFailed`] when the tag does not
/// authenticate the ciphertext, nonce and associated data, and wipe any
/// output region they were given.
pub trait AeadOp {
    /// Nonce size in bytes.
    fn nonce_size(&self) -> usize;

    /// Authentication tag size in bytes.
    fn tag_size(&self) -> usize;

    /// Encrypts and authenticates `plaintext`, appending the tag.
    ///
    /// # Arguments
    ///
    /// * `nonce` - Unique per message for this key
    /// * `aad` - Optional associated data that is authenticated but not encrypted
    /// * `plaintext` - Data to encrypt
    /// * `ciphertext` - Output buffer, or `None` to query the required size
    ///
    /// # Returns
    ///
    /// The number of bytes written (or required).
    fn seal(
        &self,
        nonce: &[u8],
        aad: Option<&[u8]>,
        plaintext: &[u8],
        ciphertext: Option<&mut [u8]>,
    ) -> Result<usize, SodiumError>;

    /// Verifies and decrypts a combined ciphertext.
    ///
    /// # Returns
    ///
    /// The number of plaintext bytes written (or required).
    fn open(
        &self,
        nonce: &[u8],
        aad: Option<&[u8]>,
        ciphertext: &[u8],
        plaintext: Option<&mut [u8]>,
    ) -> Result<usize, SodiumError>;

    /// Encrypts `plaintext` into `ciphertext` and writes the tag to `tag`.
    ///
    /// `ciphertext` must be exactly as long as `plaintext`, `tag` exactly
    /// [`tag_size`](Self::tag_size) bytes.
    fn seal_detached(
        &self,
        nonce: &[u8],
        aad: Option<&[u8]>,
        plaintext: &[u8],
        ciphertext: &mut [u8],
        tag: &mut [u8],
    ) -> Result<(), SodiumError>;

    /// Verifies `tag` and decrypts `ciphertext` into `plaintext`.
    fn open_detached(
        &self,
        nonce: &[u8],
        aad: Option<&[u8]>,
        ciphertext: &[u8],
        tag: &[u8],
        plaintext: &mut [u8],
    ) -> Result<(), SodiumError>;

    /// Combined seal returning an owned buffer.
    fn seal_vec(
        &self,
        nonce: &[u8],
        aad: Option<&[u8]>,
        plaintext: &[u8],
    ) -> Result<Vec<u8>, SodiumError> {
        let len = self.seal(nonce, aad, plaintext, None)?;
        let mut ciphertext = vec![0u8; len];
        self.seal(nonce, aad, plaintext, Some(&mut ciphertext))?;
        Ok(ciphertext)
    }

    /// Combined open returning an owned buffer.
    fn open_vec(
        &self,
        nonce: &[u8],
        aad: Option<&[u8]>,
        ciphertext: &[u8],
    ) -> Result<Vec<u8>, SodiumError> {
        let len = self.open(nonce, aad, ciphertext, None)?;
        let mut plaintext = vec![0u8; len];
        self.open(nonce, aad, ciphertext, Some(&mut plaintext))?;
        Ok(plaintext)
    }

    /// Detached seal returning `(ciphertext, tag)`.
    fn seal_detached_vec(
        &self,
        nonce: &[u8],
        aad: Option<&[u8]>,
        plaintext: &[u8],
    ) -> Result<(Vec<u8>, Vec<u8>), SodiumError> {
        let mut ciphertext = vec![0u8; plaintext.len()];
        let mut tag = vec![0u8; self.tag_size()];
        self.seal_detached(nonce, aad, plaintext, &mut ciphertext, &mut tag)?;
        Ok((ciphertext, tag))
    }

    /// Detached open returning the plaintext.
    fn open_detached_vec(
        &self,
        nonce: &[u8],
        aad: Option<&[u8]>,
        ciphertext: &[u8],
        tag: &[u8],
    ) -> Result<Vec<u8>, SodiumError> {
        let mut plaintext = vec![0u8; ciphertext.len()];
        self.open_detached(nonce, aad, ciphertext, tag, &mut plaintext)?;
        Ok(plaintext)
    }
}
