// Copyright (C) Microsoft Corporation. All rights reserved.

//! Traits for cryptographic hash operations.
//!
//! The module provides two levels of hashing APIs:
//!
//! - **Single-operation**: [`HashOp`] computes a digest over a complete message.
//! - **Streaming**: [`HashStreamingOp`] and [`HashOpContext`] process data in
//!   chunks and produce the same digest as the single-operation form over the
//!   concatenation of every chunk.
//!
//! Streaming contexts also implement [`std::io::Write`], so they can be fed by
//! [`std::io::copy`] or any other writer-based API.

use super::*;

/// Trait for single-operation hashing.
///
/// # Design Pattern
///
/// The trait uses an optional output buffer pattern:
/// - When `output` is `None`: returns the digest size
/// - When `output` is `Some`: computes the digest into the buffer
pub trait HashOp {
    /// Computes the digest of `data`.
    ///
    /// # Arguments
    ///
    /// * `data` - The input data to hash
    /// * `output` - Output buffer for the digest, or `None` to query its size
    ///
    /// # Returns
    ///
    /// The number of bytes written, or the digest size if `output` is `None`.
    ///
    /// # Errors
    ///
    /// Returns [`SodiumError::InvalidSize`] if the output buffer is too small.
    fn hash(&self, data: &[u8], output: Option<&mut [u8]>) -> Result<usize, SodiumError>;

    /// Computes the digest of `data` into an owned buffer.
    fn hash_vec(&self, data: &[u8]) -> Result<Vec<u8>, SodiumError> {
        let len = self.hash(data, None)?;
        let mut digest = vec![0u8; len];
        self.hash(data, Some(&mut digest))?;
        Ok(digest)
    }
}

/// Trait for streaming hash operations.
///
/// # Lifecycle
///
/// 1. Initialize: call [`hash_init`](Self::hash_init) to create a context
/// 2. Update: call [`update`](HashOpContext::update) repeatedly with data chunks
/// 3. Finalize: call [`finish`](HashOpContext::finish), which consumes the context
pub trait HashStreamingOp: Sized {
    /// The context type for streaming hash operations.
    type Context: HashOpContext<Algo = Self>;

    /// Creates a streaming context configured by this algorithm value.
    ///
    /// # Errors
    ///
    /// Fails when the state cannot be allocated or libsodium rejects the
    /// configuration.
    fn hash_init(self) -> Result<Self::Context, SodiumError>;
}

/// An in-progress streaming hash.
///
/// # Thread Safety
///
/// Contexts are `Send` but not `Sync`: a context may move between threads,
/// but concurrent writers must serialize access themselves.
pub trait HashOpContext: Sized {
    /// The algorithm that created this context.
    type Algo: HashStreamingOp<Context = Self>;

    /// Feeds `data` into the running computation.
    fn update(&mut self, data: &[u8]) -> Result<(), SodiumError>;

    /// Finalizes the computation and writes the digest into `output`.
    ///
    /// Consumes the context; no further updates are possible.
    ///
    /// # Returns
    ///
    /// The number of bytes written, always [`output_size`](Self::output_size).
    ///
    /// # Errors
    ///
    /// Returns [`SodiumError::InvalidSize`] if `output` is shorter than the
    /// digest.
    fn finish(self, output: &mut [u8]) -> Result<usize, SodiumError>;

    /// Finalizes the computation into an owned buffer.
    fn finish_vec(self) -> Result<Vec<u8>, SodiumError> {
        self.finish_append(Vec::new())
    }

    /// Finalizes the computation and appends the digest to `prefix`.
    fn finish_append(self, mut prefix: Vec<u8>) -> Result<Vec<u8>, SodiumError> {
        let start = prefix.len();
        prefix.resize(start + self.output_size(), 0);
        let written = self.finish(&mut prefix[start..])?;
        prefix.truncate(start + written);
        Ok(prefix)
    }

    /// Digest size in bytes.
    fn output_size(&self) -> usize;

    /// Block size of the underlying compression function in bytes.
    fn block_size(&self) -> usize;

    /// Returns the algorithm configuration of this context.
    fn algo(&self) -> &Self::Algo;
}

/// Implements [`std::io::Write`] for a [`HashOpContext`].
///
/// `write` always consumes the whole buffer; `flush` does nothing.
macro_rules! impl_write_for_context {
    ($name:ty) => {
        impl std::io::Write for $name {
            fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
                $crate::HashOpContext::update(self, buf).map_err(std::io::Error::other)?;
                Ok(buf.len())
            }

            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }
    };
}

pub(crate) use impl_write_for_context;
