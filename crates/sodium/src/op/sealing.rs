// Copyright (C) Microsoft Corporation. All rights reserved.

//! Authenticated encryption without associated data.

use super::*;

/// Authenticated encryption in the box/secretbox style: no associated data,
/// combined and detached forms.
///
/// Implemented by [`SecretBox`], [`CryptoBox`] and [`PrecomputedBox`], so a
/// keypair box and its precomputed counterpart are interchangeable.
pub trait BoxOp {
    /// Nonce size in bytes.
    fn nonce_size(&self) -> usize;

    /// Authentication tag size in bytes.
    fn mac_size(&self) -> usize;

    /// Encrypts and authenticates `plaintext` in libsodium's "easy" layout:
    /// the tag followed by the ciphertext.
    ///
    /// Pass `None` as `ciphertext` to query the required size.
    fn seal(
        &self,
        nonce: &[u8],
        plaintext: &[u8],
        ciphertext: Option<&mut [u8]>,
    ) -> Result<usize, SodiumError>;

    /// Verifies and decrypts a combined ciphertext.
    fn open(
        &self,
        nonce: &[u8],
        ciphertext: &[u8],
        plaintext: Option<&mut [u8]>,
    ) -> Result<usize, SodiumError>;

    /// Encrypts into `ciphertext` (same length as `plaintext`) and writes the
    /// tag into `mac`.
    fn seal_detached(
        &self,
        nonce: &[u8],
        plaintext: &[u8],
        ciphertext: &mut [u8],
        mac: &mut [u8],
    ) -> Result<(), SodiumError>;

    /// Verifies `mac` and decrypts `ciphertext` into `plaintext`.
    fn open_detached(
        &self,
        nonce: &[u8],
        ciphertext: &[u8],
        mac: &[u8],
        plaintext: &mut [u8],
    ) -> Result<(), SodiumError>;

    /// Combined seal returning an owned buffer.
    fn seal_vec(&self, nonce: &[u8], plaintext: &[u8]) -> Result<Vec<u8>, SodiumError> {
        let len = self.seal(nonce, plaintext, None)?;
        let mut ciphertext = vec![0u8; len];
        self.seal(nonce, plaintext, Some(&mut ciphertext))?;
        Ok(ciphertext)
    }

    /// Combined open returning an owned buffer.
    fn open_vec(&self, nonce: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>, SodiumError> {
        let len = self.open(nonce, ciphertext, None)?;
        let mut plaintext = vec![0u8; len];
        self.open(nonce, ciphertext, Some(&mut plaintext))?;
        Ok(plaintext)
    }

    /// Detached seal returning `(ciphertext, mac)`.
    fn seal_detached_vec(
        &self,
        nonce: &[u8],
        plaintext: &[u8],
    ) -> Result<(Vec<u8>, Vec<u8>), SodiumError> {
        let mut ciphertext = vec![0u8; plaintext.len()];
        let mut mac = vec![0u8; self.mac_size()];
        self.seal_detached(nonce, plaintext, &mut ciphertext, &mut mac)?;
        Ok((ciphertext, mac))
    }

    /// Detached open returning the plaintext.
    fn open_detached_vec(
        &self,
        nonce: &[u8],
        ciphertext: &[u8],
        mac: &[u8],
    ) -> Result<Vec<u8>, SodiumError> {
        let mut plaintext = vec![0u8; ciphertext.len()];
        self.open_detached(nonce, ciphertext, mac, &mut plaintext)?;
        Ok(plaintext)
    }
}
