// Copyright (C) Microsoft Corporation. All rights reserved.

//! Traits for message authentication codes.

use super::*;

/// Single-operation MAC computation and verification.
///
/// Implementors hold their key.
pub trait MacOp {
    /// Tag size in bytes.
    fn tag_size(&self) -> usize;

    /// Computes the tag of `data`.
    ///
    /// # Arguments
    ///
    /// * `data` - Message to authenticate
    /// * `tag` - Output buffer, or `None` to query the tag size
    fn mac(&self, data: &[u8], tag: Option<&mut [u8]>) -> Result<usize, SodiumError>;

    /// Verifies `tag` against `data` in constant time.
    ///
    /// # Errors
    ///
    /// - [`SodiumError::InvalidSize`] if `tag` is not [`tag_size`](Self::tag_size) bytes
    /// - [`SodiumError::VerificationFailed`] if the tag does not match
    fn verify(&self, data: &[u8], tag: &[u8]) -> Result<(), SodiumError>;

    /// Computes the tag of `data` into an owned buffer.
    fn mac_vec(&self, data: &[u8]) -> Result<Vec<u8>, SodiumError> {
        let len = self.mac(data, None)?;
        let mut tag = vec![0u8; len];
        self.mac(data, Some(&mut tag))?;
        Ok(tag)
    }
}

/// Streaming MAC computation.
pub trait MacStreamingOp {
    /// The context type for streaming MAC operations.
    type Context: MacOpContext;

    /// Starts an incremental MAC computation.
    fn mac_init(&self) -> Result<Self::Context, SodiumError>;
}

/// An in-progress streaming MAC.
///
/// A MAC context is a keyed streaming hash: it is fed and finalized through
/// [`HashOpContext`], and can additionally verify an expected tag.
pub trait MacOpContext: HashOpContext {
    /// Finalizes the computation and compares the result with `tag` in
    /// constant time.
    ///
    /// # Errors
    ///
    /// - [`SodiumError::InvalidSize`] if `tag` is not [`output_size`](HashOpContext::output_size) bytes
    /// - [`SodiumError::VerificationFailed`] if the tag does not match
    fn finish_verify(self, tag: &[u8]) -> Result<(), SodiumError> {
        support::check_size(tag, self.output_size(), "mac")?;
        let computed = self.finish_vec()?;
        if !crate::memcmp(&computed, tag) {
            return Err(SodiumError::VerificationFailed);
        }
        Ok(())
    }
}
