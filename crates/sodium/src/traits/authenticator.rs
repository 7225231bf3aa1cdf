// Copyright (C) Microsoft Corporation. All rights reserved.

//! MAC operation wrapper.

use super::*;

/// Message authentication wrapper.
pub struct Authenticator;

impl Authenticator {
    /// Computes the tag of `data`.
    pub fn mac<Algo: MacOp>(
        algo: &Algo,
        data: &[u8],
        tag: Option<&mut [u8]>,
    ) -> Result<usize, SodiumError> {
        algo.mac(data, tag)
    }

    /// Computes the tag of `data` into an owned buffer.
    pub fn mac_vec<Algo: MacOp>(algo: &Algo, data: &[u8]) -> Result<Vec<u8>, SodiumError> {
        algo.mac_vec(data)
    }

    /// Verifies `tag` over `data` in constant time.
    pub fn verify<Algo: MacOp>(algo: &Algo, data: &[u8], tag: &[u8]) -> Result<(), SodiumError> {
        algo.verify(data, tag)
    }

    /// Initializes a streaming MAC context.
    pub fn mac_init<Algo: MacStreamingOp>(algo: &Algo) -> Result<Algo::Context, SodiumError> {
        algo.mac_init()
    }
}
