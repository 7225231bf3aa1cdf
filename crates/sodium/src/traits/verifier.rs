// Copyright (C) Microsoft Corporation. All rights reserved.

//! Signature verification wrapper.

use super::*;

/// Signature verification wrapper.
pub struct Verifier;

impl Verifier {
    /// Verifies `signature` over `data`.
    ///
    /// # Errors
    ///
    /// - [`SodiumError::InvalidSize`] if the signature has the wrong size
    /// - [`SodiumError::VerificationFailed`] if the signature does not verify
    pub fn verify<Algo: VerifyOp>(
        algo: &Algo,
        key: &Algo::Key,
        data: &[u8],
        signature: &[u8],
    ) -> Result<(), SodiumError> {
        algo.verify(key, data, signature)
    }

    /// Initializes a streaming verification context.
    pub fn verify_init<Algo: VerifyStreamingOp>(
        algo: Algo,
        key: Algo::Key,
    ) -> Result<Algo::Context, SodiumError> {
        algo.verify_init(key)
    }
}
