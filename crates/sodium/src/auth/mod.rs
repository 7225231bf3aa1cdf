// Copyright (C) Microsoft Corporation. All rights reserved.

//! HMAC message authentication.
//!
//! # Supported Algorithms
//!
//! - **HMAC-SHA-256**: 32-byte tag
//! - **HMAC-SHA-512**: 64-byte tag
//! - **HMAC-SHA-512/256**: HMAC-SHA-512 truncated to 32 bytes, libsodium's
//!   default `crypto_auth`
//!
//! One-shot [`MacOp`] operations require a key of exactly [`AUTH_KEYBYTES`].
//! Streaming computations follow plain HMAC semantics and accept a key of any
//! length, so an algorithm value built with `from_key_bytes` and a key of
//! another length can only be used through [`MacStreamingOp`].

use libsodium_sys::crypto_auth_hmacsha256_state;
use libsodium_sys::crypto_auth_hmacsha512256_state;
use libsodium_sys::crypto_auth_hmacsha512_state;
use zeroize::Zeroizing;

use super::*;

/// Key size of the one-shot HMAC functions.
pub const AUTH_KEYBYTES: usize = 32;
/// HMAC-SHA-256 tag size.
pub const AUTH_HMACSHA256_BYTES: usize = 32;
/// HMAC-SHA-512 tag size.
pub const AUTH_HMACSHA512_BYTES: usize = 64;
/// HMAC-SHA-512/256 tag size.
pub const AUTH_HMACSHA512256_BYTES: usize = 32;

define_secret_key!(
    /// HMAC key for one-shot authentication.
    pub AuthKey,
    AUTH_KEYBYTES,
    keygen: libsodium_sys::crypto_auth_keygen
);

/// Returns libsodium's name for the default `crypto_auth` construction.
#[allow(unsafe_code)]
pub fn auth_primitive() -> String {
    // SAFETY: returns a pointer to a static string.
    support::static_str(unsafe { libsodium_sys::crypto_auth_primitive() })
}

/// Defines an HMAC algorithm type, its streaming context and their trait
/// implementations.
macro_rules! define_hmac {
    (
        $(#[$meta:meta])*
        $algo:ident,
        $ctx:ident,
        $state:ty,
        name: $name:literal,
        bytes: $bytes:expr,
        block: $block:expr,
        auth: $auth:path,
        verify: $verify:path,
        statebytes: $statebytes:path,
        init: $init:path,
        update: $update:path,
        finalize: $final:path $(,)?
    ) => {
        $(#[$meta])*
        #[derive(Clone)]
        pub struct $algo {
            key: Zeroizing<Vec<u8>>,
        }

        impl $algo {
            /// Creates an authenticator bound to `key`.
            pub fn new(key: &AuthKey) -> Self {
                Self {
                    key: Zeroizing::new(key.as_bytes().to_vec()),
                }
            }

            /// Creates an authenticator with a key of any length.
            ///
            /// Keys that are not [`AUTH_KEYBYTES`] long are only accepted by
            /// the streaming interface.
            pub fn from_key_bytes(key: &[u8]) -> Self {
                Self {
                    key: Zeroizing::new(key.to_vec()),
                }
            }

            fn one_shot_key(&self) -> Result<&[u8], SodiumError> {
                support::check_size(&self.key, AUTH_KEYBYTES, "key")?;
                Ok(self.key.as_slice())
            }
        }

        impl std::fmt::Debug for $algo {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.debug_struct(stringify!($algo)).finish_non_exhaustive()
            }
        }

        impl MacOp for $algo {
            fn tag_size(&self) -> usize {
                $bytes
            }

            #[allow(unsafe_code)]
            fn mac(&self, data: &[u8], tag: Option<&mut [u8]>) -> Result<usize, SodiumError> {
                let key = self.one_shot_key()?;
                support::with_output(tag, $bytes, "mac output", |out| {
                    init()?;
                    // SAFETY: `out` holds the tag size, the key is
                    // AUTH_KEYBYTES long and data pointer and length describe
                    // `data`.
                    let rc = unsafe {
                        $auth(
                            out.as_mut_ptr(),
                            support::ptr(data),
                            support::len_u64(data),
                            key.as_ptr(),
                        )
                    };
                    support::check_rc(rc, $name)
                })
            }

            #[allow(unsafe_code)]
            fn verify(&self, data: &[u8], tag: &[u8]) -> Result<(), SodiumError> {
                support::check_size(tag, $bytes, "mac")?;
                let key = self.one_shot_key()?;
                init()?;
                // SAFETY: the tag is the tag size, the key is AUTH_KEYBYTES
                // long and data pointer and length describe `data`.
                let rc = unsafe {
                    $verify(
                        tag.as_ptr(),
                        support::ptr(data),
                        support::len_u64(data),
                        key.as_ptr(),
                    )
                };
                support::check_verify(rc)
            }
        }

        impl HashStreamingOp for $algo {
            type Context = $ctx;

            #[allow(unsafe_code)]
            fn hash_init(self) -> Result<$ctx, SodiumError> {
                init()?;
                // SAFETY: pure size query.
                let state_size = unsafe { $statebytes() };
                let mut state = NativeState::<$state>::new(state_size, 1)?;
                // SAFETY: the state is large enough and aligned for `$state`;
                // the key pointer is null or valid for its length.
                let rc = unsafe {
                    $init(state.as_mut_ptr(), support::ptr(&self.key), self.key.len())
                };
                support::check_rc(rc, concat!($name, "_init"))?;
                Ok($ctx { algo: self, state })
            }
        }

        impl MacStreamingOp for $algo {
            type Context = $ctx;

            fn mac_init(&self) -> Result<$ctx, SodiumError> {
                self.clone().hash_init()
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
                support::check_len_min(output.len(), $bytes, "mac output")?;
                // SAFETY: the state was initialized by `hash_init` and
                // `output` holds at least the tag size.
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

        impl MacOpContext for $ctx {}

        impl_write_for_context!($ctx);
    };
}

define_hmac!(
    /// HMAC-SHA-256.
    HmacSha256,
    HmacSha256Context,
    crypto_auth_hmacsha256_state,
    name: "crypto_auth_hmacsha256",
    bytes: AUTH_HMACSHA256_BYTES,
    block: 64,
    auth: libsodium_sys::crypto_auth_hmacsha256,
    verify: libsodium_sys::crypto_auth_hmacsha256_verify,
    statebytes: libsodium_sys::crypto_auth_hmacsha256_statebytes,
    init: libsodium_sys::crypto_auth_hmacsha256_init,
    update: libsodium_sys::crypto_auth_hmacsha256_update,
    finalize: libsodium_sys::crypto_auth_hmacsha256_final,
);

define_hmac!(
    /// HMAC-SHA-512.
    HmacSha512,
    HmacSha512Context,
    crypto_auth_hmacsha512_state,
    name: "crypto_auth_hmacsha512",
    bytes: AUTH_HMACSHA512_BYTES,
    block: 128,
    auth: libsodium_sys::crypto_auth_hmacsha512,
    verify: libsodium_sys::crypto_auth_hmacsha512_verify,
    statebytes: libsodium_sys::crypto_auth_hmacsha512_statebytes,
    init: libsodium_sys::crypto_auth_hmacsha512_init,
    update: libsodium_sys::crypto_auth_hmacsha512_update,
    finalize: libsodium_sys::crypto_auth_hmacsha512_final,
);

define_hmac!(
    /// HMAC-SHA-512 truncated to 256 bits.
    HmacSha512256,
    HmacSha512256Context,
    crypto_auth_hmacsha512256_state,
    name: "crypto_auth_hmacsha512256",
    bytes: AUTH_HMACSHA512256_BYTES,
    block: 128,
    auth: libsodium_sys::crypto_auth_hmacsha512256,
    verify: libsodium_sys::crypto_auth_hmacsha512256_verify,
    statebytes: libsodium_sys::crypto_auth_hmacsha512256_statebytes,
    init: libsodium_sys::crypto_auth_hmacsha512256_init,
    update: libsodium_sys::crypto_auth_hmacsha512256_update,
    finalize: libsodium_sys::crypto_auth_hmacsha512256_final,
);

#[cfg(test)]
mod tests;
