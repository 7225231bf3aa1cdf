// Copyright (C) Microsoft Corporation. All rights reserved.

//! Traits for digital signature operations.

use super::*;

/// Single-operation signature creation.
pub trait SignOp {
    /// Key used to sign.
    type Key: SecretKey;

    /// Signs `data` with `key`.
    ///
    /// # Arguments
    ///
    /// * `key` - Signing key
    /// * `data` - Message to sign
    /// * `signature` - Output buffer, or `None` to query the signature size
    ///
    /// # Returns
    ///
    /// The number of bytes written, or the signature size if `signature` is `None`.
    fn sign(
        &self,
        key: &Self::Key,
        data: &[u8],
        signature: Option<&mut [u8]>,
    ) -> Result<usize, SodiumError>;

    /// Signs `data` into an owned buffer.
    fn sign_vec(&self, key: &Self::Key, data: &[u8]) -> Result<Vec<u8>, SodiumError> {
        let len = self.sign(key, data, None)?;
        let mut signature = vec![0u8; len];
        let written = self.sign(key, data, Some(&mut signature))?;
        signature.truncate(written);
        Ok(signature)
    }
}

/// Single-operation signature verification.
pub trait VerifyOp {
    /// Key used to verify.
    type Key: PublicKey;

    /// Verifies `signature` over `data`.
    ///
    /// # Errors
    ///
    /// - [`SodiumError::InvalidSize`] if the signature has the wrong size
    /// - [`SodiumError::VerificationFailed`] if the signature does not verify
    fn verify(&self, key: &Self::Key, data: &[u8], signature: &[u8]) -> Result<(), SodiumError>;
}

/// Streaming signature creation.
pub trait SignStreamingOp: Sized {
    /// Key used to sign.
    type Key: SecretKey;

    /// The context type for streaming signing.
    type Context: SignStreamingOpContext<Algo = Self>;

    /// Starts an incremental signature over a message fed in chunks.
    fn sign_init(self, key: Self::Key) -> Result<Self::Context, SodiumError>;
}

/// An in-progress streaming signature.
pub trait SignStreamingOpContext: Sized {
    /// The algorithm that created this context.
    type Algo: SignStreamingOp<Context = Self>;

    /// Feeds a chunk of the message.
    fn update(&mut self, data: &[u8]) -> Result<(), SodiumError>;

    /// Signature size in bytes.
    fn signature_size(&self) -> usize;

    /// Produces the signature, consuming the context.
    fn finish(self, signature: &mut [u8]) -> Result<usize, SodiumError>;

    /// Produces the signature into an owned buffer.
    fn finish_vec(self) -> Result<Vec<u8>, SodiumError> {
        let mut signature = vec![0u8; self.signature_size()];
        let written = self.finish(&mut signature)?;
        signature.truncate(written);
        Ok(signature)
    }
}

/// Streaming signature verification.
pub trait VerifyStreamingOp: Sized {
    /// Key used to verify.
    type Key: PublicKey;

    /// The context type for streaming verification.
    type Context: VerifyStreamingOpContext<Algo = Self>;

    /// Starts an incremental verification over a message fed in chunks.
    fn verify_init(self, key: Self::Key) -> Result<Self::Context, SodiumError>;
}

/// An in-progress streaming verification.
pub trait VerifyStreamingOpContext: Sized {
    /// The algorithm that created this context.
    type Algo: VerifyStreamingOp<Context = Self>;

    /// Feeds a chunk of the message.
    fn update(&mut self, data: &[u8]) -> Result<(), SodiumError>;

    /// Verifies `signature` over everything fed so far, consuming the context.
    fn finish(self, signature: &[u8]) -> Result<(), SodiumError>;
}
