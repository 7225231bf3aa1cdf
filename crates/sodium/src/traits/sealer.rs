// Copyright (C) Microsoft Corporation. All rights reserved.

//! Authenticated encryption wrapper.
//!
//! The wrapper accepts the nonce as an `Option` so callers that thread an
//! optional nonce through their own APIs get [`SodiumError::MissingInput`]
//! instead of having to invent a placeholder.

use super::*;

/// Authenticated encryption wrapper over [`AeadOp`] and [`BoxOp`].
pub struct Sealer;

impl Sealer {
    /// Encrypts with an AEAD cipher in combined mode.
    ///
    /// # Errors
    ///
    /// - [`SodiumError::MissingInput`] if `nonce` is `None`
    /// - any error of [`AeadOp::seal`]
    pub fn seal<Algo: AeadOp>(
        algo: &Algo,
        nonce: Option<&[u8]>,
        aad: Option<&[u8]>,
        plaintext: &[u8],
        ciphertext: Option<&mut [u8]>,
    ) -> Result<usize, SodiumError> {
        let nonce = support::require(nonce, "nonce")?;
        algo.seal(nonce, aad, plaintext, ciphertext)
    }

    /// Decrypts with an AEAD cipher in combined mode.
    pub fn open<Algo: AeadOp>(
        algo: &Algo,
        nonce: Option<&[u8]>,
        aad: Option<&[u8]>,
        ciphertext: &[u8],
        plaintext: Option<&mut [u8]>,
    ) -> Result<usize, SodiumError> {
        let nonce = support::require(nonce, "nonce")?;
        algo.open(nonce, aad, ciphertext, plaintext)
    }

    /// [`Self::seal`] returning an owned buffer.
    pub fn seal_vec<Algo: AeadOp>(
        algo: &Algo,
        nonce: Option<&[u8]>,
        aad: Option<&[u8]>,
        plaintext: &[u8],
    ) -> Result<Vec<u8>, SodiumError> {
        let nonce = support::require(nonce, "nonce")?;
        algo.seal_vec(nonce, aad, plaintext)
    }

    /// [`Self::open`] returning an owned buffer.
    pub fn open_vec<Algo: AeadOp>(
        algo: &Algo,
        nonce: Option<&[u8]>,
        aad: Option<&[u8]>,
        ciphertext: &[u8],
    ) -> Result<Vec<u8>, SodiumError> {
        let nonce = support::require(nonce, "nonce")?;
        algo.open_vec(nonce, aad, ciphertext)
    }

    /// Encrypts with a box-style cipher (no associated data).
    pub fn seal_box<Algo: BoxOp>(
        algo: &Algo,
        nonce: Option<&[u8]>,
        plaintext: &[u8],
        ciphertext: Option<&mut [u8]>,
    ) -> Result<usize, SodiumError> {
        let nonce = support::require(nonce, "nonce")?;
        algo.seal(nonce, plaintext, ciphertext)
    }

    /// Decrypts with a box-style cipher.
    pub fn open_box<Algo: BoxOp>(
        algo: &Algo,
        nonce: Option<&[u8]>,
        ciphertext: &[u8],
        plaintext: Option<&mut [u8]>,
    ) -> Result<usize, SodiumError> {
        let nonce = support::require(nonce, "nonce")?;
        algo.open(nonce, ciphertext, plaintext)
    }
}
