// Copyright (C) Microsoft Corporation. All rights reserved.

//! Hash operation wrapper.

use super::*;

const READ_CHUNK: usize = 8192;

/// Hash operation wrapper.
pub struct Hasher;

impl Hasher {
    /// Performs single-operation hashing.
    ///
    /// # Arguments
    ///
    /// * `algo` - The hashing algorithm
    /// * `data` - Input data to hash
    /// * `output` - Output buffer, or `None` to query the digest size
    pub fn hash<Algo: HashOp>(
        algo: &Algo,
        data: &[u8],
        output: Option<&mut [u8]>,
    ) -> Result<usize, SodiumError> {
        algo.hash(data, output)
    }

    /// Performs single-operation hashing and returns the digest as a vector.
    pub fn hash_vec<Algo: HashOp>(algo: &Algo, data: &[u8]) -> Result<Vec<u8>, SodiumError> {
        let hash_size = Self::hash(algo, data, None)?;
        let mut digest = vec![0u8; hash_size];
        let written = Self::hash(algo, data, Some(&mut digest))?;
        digest.truncate(written);
        Ok(digest)
    }

    /// Initializes a streaming hash context.
    pub fn hash_init<Algo: HashStreamingOp>(algo: Algo) -> Result<Algo::Context, SodiumError> {
        algo.hash_init()
    }

    /// Hashes everything `reader` yields through a streaming context.
    ///
    /// Interrupted reads are retried.
    ///
    /// # Errors
    ///
    /// - [`SodiumError::ReadFailed`] carrying the reader's error kind
    /// - any error of the context's `update` or `finish`, unchanged
    pub fn hash_reader<Algo, R>(algo: Algo, mut reader: R) -> Result<Vec<u8>, SodiumError>
    where
        Algo: HashStreamingOp,
        R: std::io::Read,
    {
        let mut ctx = algo.hash_init()?;
        let mut buf = zeroize::Zeroizing::new([0u8; READ_CHUNK]);
        loop {
            let n = match reader.read(&mut buf[..]) {
                Ok(0) => break,
                Ok(n) => n,
                Err(err) if err.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(err) => {
                    tracing::error!(error = %err, "hash input read failed");
                    return Err(SodiumError::ReadFailed(err.kind()));
                }
            };
            ctx.update(&buf[..n])?;
        }
        ctx.finish_vec()
    }
}
