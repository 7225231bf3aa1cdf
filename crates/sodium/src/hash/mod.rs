// Copyright (C) Microsoft Corporation. All rights reserved.

//! SHA-2 hashing.
//!
//! # Supported Algorithms
//!
//! - **SHA-256**: 32-byte digest, 64-byte blocks
//! - **SHA-512**: 64-byte digest, 128-byte blocks
//!
//! Both are unkeyed and need no configuration, so the algorithm types are
//! unit structs usable directly as [`HashOp`] or [`HashStreamingOp`].

use libsodium_sys::crypto_hash_sha256_state;
use libsodium_sys::crypto_hash_sha512_state;

use super::*;

/// SHA-256 digest size.
pub const SHA256_BYTES: usize = 32;
/// SHA-512 digest size.
pub const SHA512_BYTES: usize = 64;

/// Implements one-shot and streaming hashing for a SHA-2 variant.
macro_rules! define_sha {
    (
        $(#[$meta:meta])*
        $algo:ident,
        $ctx:ident,
        $state:ty,
        name: $name:literal,
        bytes: $bytes:expr,
        block: $block:expr,
        hash: $hash:path,
        statebytes: $statebytes:path,
        init: $init:path,
        update: $update:path,
        finalize: $final:path $(,)?
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
        pub struct $algo;

        impl HashOp for $algo {
            #[allow(unsafe_code)]
            fn hash(&self, data: &[u8], output: Option<&mut [u8]>) -> Result<usize, SodiumError> {
                support::with_output(output, $bytes, "digest output", |out| {
                    init()?;
                    // SAFETY: `out` holds the digest size; data pointer and
                    // length describe `data`.
                    let rc = unsafe {
                        $hash(out.as_mut_ptr(), support::ptr(data), support::len_u64(data))
                    };
                    support::check_rc(rc, $name)
                })
            }
        }

        impl HashStreamingOp for $algo {
            type Context = $ctx;

            #[allow(unsafe_code)]
            fn hash_init(self) -> Result<Self::Context, SodiumError> {
                init()?;
                // SAFETY: pure size query.
                let state_size = unsafe { $statebytes() };
                let mut state = NativeState::<$state>::new(state_size, 1)?;
                // SAFETY: the state is large enough and aligned for `$state`.
                let rc = unsafe { $init(state.as_mut_ptr()) };
                support::check_rc(rc, concat!($name, "_init"))?;
                Ok($ctx { algo: self, state })
            }
        }

        #[doc = concat!("Streaming [`", stringify!($algo), "`] computation.")]
        pub struct $ctx {
            algo: $algo,
            state: NativeState<$state>,
        }

        impl HashOpContext for $ctx {
            type Algo = $algo;

            #[allow(unsafe_code)]
            fn update(&mut self, data: &[u8]) -> Result<(), SodiumError> {
                // SAFETY: the state was initialized by `hash_init`; data
                // pointer and length describe `data`.
                let rc = unsafe {
                    $update(
                        self.state.as_mut_ptr(),
                        support::ptr(data),
                        support::len_u64(data),
                    )
                };
                support::check_rc(rc, concat!($name, "_update"))
            }

            #[allow(unsafe_code)]
            fn finish(mut self, output: &mut [u8]) -> Result<usize, SodiumError> {
                support::check_len_min(output.len(), $bytes, "digest output")?;
                // SAFETY: the state was initialized by `hash_init` and
                // `output` holds at least the digest size.
                let rc = unsafe { $final(self.state.as_mut_ptr(), output.as_mut_ptr()) };
                support::check_rc(rc, concat!($name, "_final"))?;
                Ok($bytes)
            }

            fn output_size(&self) -> usize {
                $bytes
            }

            fn block_size(&self) -> usize {
                $block
            }

            fn algo(&self) -> &Self::Algo {
                &self.algo
            }
        }

        impl_write_for_context!($ctx);
    };
}

define_sha!(
    /// SHA-256.
    Sha256,
    Sha256Context,
    crypto_hash_sha256_state,
    name: "crypto_hash_sha256",
    bytes: SHA256_BYTES,
    block: 64,
    hash: libsodium_sys::crypto_hash_sha256,
    statebytes: libsodium_sys::crypto_hash_sha256_statebytes,
    init: libsodium_sys::crypto_hash_sha256_init,
    update: libsodium_sys::crypto_hash_sha256_update,
    finalize: libsodium_sys::crypto_hash_sha256_final,
);

define_sha!(
    /// SHA-512, libsodium's default `crypto_hash`.
    Sha512,
    Sha512Context,
    crypto_hash_sha512_state,
    name: "crypto_hash_sha512",
    bytes: SHA512_BYTES,
    block: 128,
    hash: libsodium_sys::crypto_hash_sha512,
    statebytes: libsodium_sys::crypto_hash_sha512_statebytes,
    init: libsodium_sys::crypto_hash_sha512_init,
    update: libsodium_sys::crypto_hash_sha512_update,
    finalize: libsodium_sys::crypto_hash_sha512_final,
);

#[cfg(test)]
mod tests;
