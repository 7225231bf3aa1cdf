// Copyright (C) Microsoft Corporation. All rights reserved.

//! Idiomatic Rust bindings over the libsodium cryptographic library.
//!
//! Every primitive in this crate delegates to libsodium. The crate itself only
//! validates buffer sizes, marshals buffers across the FFI boundary and turns
//! native return codes into [`SodiumError`] values. It provides:
//!
//! - **AEAD**: ChaCha20-Poly1305 (IETF), XChaCha20-Poly1305 (IETF), AES-256-GCM
//! - **Box**: Curve25519 public-key authenticated encryption, precomputed and sealed variants
//! - **SecretBox**: XSalsa20-Poly1305 secret-key authenticated encryption
//! - **Generic hash**: BLAKE2b with optional key, salt and personalization
//! - **Hash**: SHA-256 and SHA-512
//! - **Auth**: HMAC-SHA-256, HMAC-SHA-512 and HMAC-SHA-512/256
//! - **Stream**: Salsa20 and ChaCha20 family stream ciphers
//! - **KDF**: BLAKE2b based subkey derivation
//! - **Password hashing**: Argon2id and Argon2i
//! - **Sign**: Ed25519 (attached, detached and pre-hashed streaming)
//! - **Scalar multiplication**: X25519
//! - **RNG**: libsodium's random byte generator
//!
//! # Calling convention
//!
//! Operations that write into a caller-provided buffer accept an
//! `Option<&mut [u8]>`. Passing `None` returns the required buffer size,
//! passing `Some(buffer)` performs the operation and returns the number of
//! bytes written. Every operation has a `_vec` counterpart returning an owned
//! buffer.
//!
//! # Initialization
//!
//! The library is initialized lazily on first use. [`init`] may be called
//! explicitly to surface initialization failures early.

mod aead;
mod auth;
mod box_;
mod generichash;
mod hash;
mod kdf;
mod lifecycle;
mod pwhash;
mod rand;
mod scalarmult;
mod secretbox;
mod sign;
mod stream;
mod support;
mod util;

mod op;
mod traits;

pub use aead::*;
pub use auth::*;
pub use box_::*;
pub use generichash::*;
pub use hash::*;
pub use kdf::*;
pub use lifecycle::*;
pub use op::*;
pub use pwhash::*;
pub use rand::*;
pub use scalarmult::*;
pub use secretbox::*;
pub use sign::*;
pub use stream::*;
pub use support::SizeBound;
use support::NativeState;
use thiserror::Error;
pub use traits::*;
pub use util::*;

/// Error type shared by every operation in this crate.
///
/// Variants fall into three classes:
///
/// - Programmer errors ([`InvalidSize`](Self::InvalidSize),
///   [`MissingInput`](Self::MissingInput), [`OutOfRange`](Self::OutOfRange),
///   [`InvalidPadding`](Self::InvalidPadding),
///   [`AlreadyInitialized`](Self::AlreadyInitialized)): a buffer or parameter
///   does not satisfy the algorithm's constraints, or a call came too late.
///   These are detected before any native call is made.
/// - [`VerificationFailed`](Self::VerificationFailed): an authentication tag,
///   signature or password did not verify. Callers are expected to branch on it.
/// - Native failures ([`NativeFailure`](Self::NativeFailure),
///   [`Unsupported`](Self::Unsupported), [`AllocationFailed`](Self::AllocationFailed),
///   [`InitFailed`](Self::InitFailed)): libsodium could not complete the request.
/// - [`ReadFailed`](Self::ReadFailed): a caller-supplied reader failed while
///   streaming input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SodiumError {
    /// A buffer has the wrong size for its role.
    #[error("invalid {role} size: expected {expected}, got {actual}")]
    InvalidSize {
        /// What the buffer is used for (e.g. "key", "nonce", "mac").
        role: &'static str,
        /// The size the algorithm requires.
        expected: SizeBound,
        /// The size that was supplied.
        actual: usize,
    },

    /// A required input was not provided.
    #[error("{0} is required")]
    MissingInput(&'static str),

    /// An integer parameter exceeds what the algorithm accepts.
    #[error("{role} out of range: {value} exceeds {max}")]
    OutOfRange {
        /// What the value is used for (e.g. "initial counter").
        role: &'static str,
        /// The value that was supplied.
        value: u64,
        /// The largest accepted value.
        max: u64,
    },

    /// A NaCl-style padded buffer does not start with the required zero bytes.
    #[error("{0} is not zero-padded")]
    InvalidPadding(&'static str),

    /// A setting that must precede library initialization was applied after it.
    #[error("{0} must be configured before the library is initialized")]
    AlreadyInitialized(&'static str),

    /// Authentication tag, signature or password verification failed.
    #[error("verification failed")]
    VerificationFailed,

    /// A native call reported failure.
    #[error("{0} failed")]
    NativeFailure(&'static str),

    /// The requested algorithm is not available on this machine.
    #[error("{0} is not supported on this platform")]
    Unsupported(&'static str),

    /// An aligned state buffer could not be laid out.
    #[error("aligned allocation failed")]
    AllocationFailed,

    /// `sodium_init` reported failure.
    #[error("libsodium initialization failed with code {0}")]
    InitFailed(i32),

    /// Reading streamed input failed.
    #[error("input read failed: {0}")]
    ReadFailed(std::io::ErrorKind),
}

impl SodiumError {
    /// Returns `true` for errors caused by invalid arguments rather than by
    /// the data being processed or the native library.
    pub fn is_programmer_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidSize { .. }
                | Self::MissingInput(_)
                | Self::OutOfRange { .. }
                | Self::InvalidPadding(_)
                | Self::AlreadyInitialized(_)
        )
    }
}

/// Emits one crate-internal accessor of a fixed-size key newtype.
macro_rules! key_helper {
    ($name:ident, $size:expr, as_array) => {
        impl $name {
            pub(crate) fn as_array(&self) -> &[u8; $size] {
                &self.0
            }
        }
    };
    ($name:ident, $size:expr, as_mut_array) => {
        impl $name {
            pub(crate) fn as_mut_array(&mut self) -> &mut [u8; $size] {
                &mut self.0
            }
        }
    };
    ($name:ident, $size:expr, zeroed) => {
        impl $name {
            pub(crate) fn zeroed() -> Self {
                Self([0u8; $size])
            }
        }
    };
}

/// Defines a fixed-size secret key newtype.
///
/// The generated type is wiped on drop, never prints its bytes, and can be
/// imported from a byte slice of exactly the declared size. After the size:
///
/// - `keygen: path` adds `generate()` backed by that libsodium key generator
/// - `random` adds `generate()` backed by [`Rng::rand_bytes`]
/// - trailing idents name the [`key_helper!`] accessors the crate needs
macro_rules! define_secret_key {
    ($(#[$meta:meta])* $vis:vis $name:ident, $size:expr, keygen: $keygen:path $(, $helper:ident)*) => {
        $crate::define_secret_key!($(#[$meta])* $vis $name, $size $(, $helper)*);

        impl $name {
            /// Generates a fresh key with libsodium's key generator for the
            /// primitive.
            #[allow(unsafe_code)]
            pub fn generate() -> Result<Self, $crate::SodiumError> {
                $crate::init()?;
                let mut key = Self([0u8; $size]);
                // SAFETY: the generator writes exactly SIZE bytes.
                unsafe { $keygen(key.0.as_mut_ptr()) };
                Ok(key)
            }
        }
    };
    ($(#[$meta:meta])* $vis:vis $name:ident, $size:expr, random $(, $helper:ident)*) => {
        $crate::define_secret_key!($(#[$meta])* $vis $name, $size $(, $helper)*);

        impl $name {
            /// Generates a fresh key from libsodium's random source.
            pub fn generate() -> Result<Self, $crate::SodiumError> {
                let mut key = Self([0u8; $size]);
                $crate::Rng::rand_bytes(&mut key.0)?;
                Ok(key)
            }
        }
    };
    ($(#[$meta:meta])* $vis:vis $name:ident, $size:expr $(, $helper:ident)*) => {
        $(#[$meta])*
        #[derive(Clone, zeroize::Zeroize, zeroize::ZeroizeOnDrop)]
        $vis struct $name([u8; $size]);

        impl $name {
            /// Key size in bytes.
            pub const SIZE: usize = $size;

            /// Imports a key from a byte slice of exactly [`Self::SIZE`] bytes.
            pub fn from_bytes(bytes: &[u8]) -> Result<Self, $crate::SodiumError> {
                $crate::support::check_size(bytes, $size, "key")?;
                let mut key = Self([0u8; $size]);
                key.0.copy_from_slice(bytes);
                Ok(key)
            }

            /// Returns the raw key bytes.
            pub fn as_bytes(&self) -> &[u8] {
                &self.0
            }
        }

        $($crate::key_helper!($name, $size, $helper);)*

        impl $crate::Key for $name {
            fn size(&self) -> usize {
                $size
            }
        }

        impl $crate::SecretKey for $name {}

        impl std::fmt::Debug for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.debug_struct(stringify!($name)).finish_non_exhaustive()
            }
        }
    };
}

/// Defines a fixed-size public key newtype, with the listed [`key_helper!`]
/// accessors.
macro_rules! define_public_key {
    ($(#[$meta:meta])* $vis:vis $name:ident, $size:expr $(, $helper:ident)*) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        $vis struct $name([u8; $size]);

        impl $name {
            /// Key size in bytes.
            pub const SIZE: usize = $size;

            /// Imports a key from a byte slice of exactly [`Self::SIZE`] bytes.
            pub fn from_bytes(bytes: &[u8]) -> Result<Self, $crate::SodiumError> {
                $crate::support::check_size(bytes, $size, "public key")?;
                let mut key = [0u8; $size];
                key.copy_from_slice(bytes);
                Ok(Self(key))
            }

            /// Returns the raw key bytes.
            pub fn as_bytes(&self) -> &[u8] {
                &self.0
            }
        }

        $($crate::key_helper!($name, $size, $helper);)*

        impl $crate::Key for $name {
            fn size(&self) -> usize {
                $size
            }
        }

        impl $crate::PublicKey for $name {}
    };
}

pub(crate) use define_public_key;
pub(crate) use define_secret_key;
pub(crate) use key_helper;
