// Copyright (C) Microsoft Corporation. All rights reserved.

//! Signature operation wrapper.

use super::*;

/// Signature creation wrapper.
pub struct Signer;

impl Signer {
    /// Performs single-operation signing.
    ///
    /// # Arguments
    ///
    /// * `algo` - The signing algorithm
    /// * `key` - The secret key to sign with
    /// * `data` - Input data to sign
    /// * `signature` - Output buffer, or `None` to query the signature size
    pub fn sign<Algo: SignOp>(
        algo: &Algo,
        key: &Algo::Key,
        data: &[u8],
        signature: Option<&mut [u8]>,
    ) -> Result<usize, SodiumError> {
        algo.sign(key, data, signature)
    }

    /// Performs single-operation signing into an owned buffer.
    pub fn sign_vec<Algo: SignOp>(
        algo: &Algo,
        key: &Algo::Key,
        data: &[u8],
    ) -> Result<Vec<u8>, SodiumError> {
        let sig_len = Self::sign(algo, key, data, None)?;
        let mut signature = vec![0u8; sig_len];
        Self::sign(algo, key, data, Some(&mut signature))?;
        Ok(signature)
    }

    /// Initializes a streaming signing context.
    pub fn sign_init<Algo: SignStreamingOp>(
        algo: Algo,
        key: Algo::Key,
    ) -> Result<Algo::Context, SodiumError> {
        algo.sign_init(key)
    }
}
