// Copyright (C) Microsoft Corporation. All rights reserved.

//! Password hashing with Argon2.
//!
//! Password hashing is deliberately slow and memory hungry. Every operation
//! here blocks the calling thread for the configured cost and cannot be
//! cancelled; run it on a worker thread when latency matters.
//!
//! # Supported Algorithms
//!
//! - **Argon2id v1.3** (default)
//! - **Argon2i v1.3**

use std::ffi::c_char;
use std::ffi::c_int;
use std::ffi::CStr;
use std::ffi::CString;

use super::*;

/// Salt size.
pub const PWHASH_SALTBYTES: usize = 16;
/// Smallest derived key length.
pub const PWHASH_BYTES_MIN: usize = 16;
/// Largest derived key length.
pub const PWHASH_BYTES_MAX: u64 = u32::MAX as u64;
/// Size of the buffer holding an encoded hash string, terminator included.
pub const PWHASH_STRBYTES: usize = 128;
/// Smallest accepted memory limit in bytes.
pub const PWHASH_MEMLIMIT_MIN: usize = 8192;
/// Largest accepted operations limit.
pub const PWHASH_OPSLIMIT_MAX: u64 = u32::MAX as u64;

const ALG_ARGON2I13: c_int = 1;
const ALG_ARGON2ID13: c_int = 2;

/// Argon2 variant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PwHashAlgorithm {
    /// Argon2id version 1.3.
    #[default]
    Argon2id13,
    /// Argon2i version 1.3.
    Argon2i13,
}

type StrFn = unsafe extern "C" fn(
    out: *mut c_char,
    passwd: *const c_char,
    passwdlen: u64,
    opslimit: u64,
    memlimit: usize,
) -> c_int;
type NeedsRehashFn =
    unsafe extern "C" fn(str_: *const c_char, opslimit: u64, memlimit: usize) -> c_int;

impl PwHashAlgorithm {
    /// Smallest operations limit the variant accepts.
    pub fn opslimit_min(&self) -> u64 {
        match self {
            Self::Argon2id13 => 1,
            Self::Argon2i13 => 3,
        }
    }

    fn id(&self) -> c_int {
        match self {
            Self::Argon2id13 => ALG_ARGON2ID13,
            Self::Argon2i13 => ALG_ARGON2I13,
        }
    }

    fn str_fn(&self) -> StrFn {
        match self {
            Self::Argon2id13 => libsodium_sys::crypto_pwhash_argon2id_str,
            Self::Argon2i13 => libsodium_sys::crypto_pwhash_argon2i_str,
        }
    }

    fn needs_rehash_fn(&self) -> NeedsRehashFn {
        match self {
            Self::Argon2id13 => libsodium_sys::crypto_pwhash_argon2id_str_needs_rehash,
            Self::Argon2i13 => libsodium_sys::crypto_pwhash_argon2i_str_needs_rehash,
        }
    }
}

/// Password hashing parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PwHash {
    algorithm: PwHashAlgorithm,
    opslimit: u64,
    memlimit: usize,
}

impl PwHash {
    /// Creates a configuration with explicit cost parameters.
    ///
    /// # Errors
    ///
    /// - [`SodiumError::InvalidSize`] if `opslimit` is below the variant's
    ///   minimum or `memlimit` is below [`PWHASH_MEMLIMIT_MIN`]
    /// - [`SodiumError::OutOfRange`] if `opslimit` exceeds [`PWHASH_OPSLIMIT_MAX`]
    pub fn new(
        algorithm: PwHashAlgorithm,
        opslimit: u64,
        memlimit: usize,
    ) -> Result<Self, SodiumError> {
        support::check_int_max(opslimit, PWHASH_OPSLIMIT_MAX, "opslimit")?;
        // Bounded by u32::MAX above, so the conversion is lossless.
        support::check_len_min(opslimit as usize, algorithm.opslimit_min() as usize, "opslimit")?;
        support::check_len_min(memlimit, PWHASH_MEMLIMIT_MIN, "memlimit")?;
        Ok(Self {
            algorithm,
            opslimit,
            memlimit,
        })
    }

    /// Interactive cost of the default variant (Argon2id: 2 passes, 64 MiB).
    pub fn interactive() -> Self {
        Self::interactive_for(PwHashAlgorithm::default())
    }

    /// Moderate cost of the default variant (Argon2id: 3 passes, 256 MiB).
    pub fn moderate() -> Self {
        Self::moderate_for(PwHashAlgorithm::default())
    }

    /// Sensitive cost of the default variant (Argon2id: 4 passes, 1 GiB).
    pub fn sensitive() -> Self {
        Self::sensitive_for(PwHashAlgorithm::default())
    }

    /// Interactive cost of `algorithm`.
    pub fn interactive_for(algorithm: PwHashAlgorithm) -> Self {
        match algorithm {
            PwHashAlgorithm::Argon2id13 => Self::preset(algorithm, 2, 64 << 20),
            PwHashAlgorithm::Argon2i13 => Self::preset(algorithm, 4, 32 << 20),
        }
    }

    /// Moderate cost of `algorithm`.
    pub fn moderate_for(algorithm: PwHashAlgorithm) -> Self {
        match algorithm {
            PwHashAlgorithm::Argon2id13 => Self::preset(algorithm, 3, 256 << 20),
            PwHashAlgorithm::Argon2i13 => Self::preset(algorithm, 6, 128 << 20),
        }
    }

    /// Sensitive cost of `algorithm`.
    pub fn sensitive_for(algorithm: PwHashAlgorithm) -> Self {
        match algorithm {
            PwHashAlgorithm::Argon2id13 => Self::preset(algorithm, 4, 1 << 30),
            PwHashAlgorithm::Argon2i13 => Self::preset(algorithm, 8, 512 << 20),
        }
    }

    fn preset(algorithm: PwHashAlgorithm, opslimit: u64, memlimit: usize) -> Self {
        Self {
            algorithm,
            opslimit,
            memlimit,
        }
    }

    /// Argon2 variant.
    pub fn algorithm(&self) -> PwHashAlgorithm {
        self.algorithm
    }

    /// Number of passes over memory.
    pub fn opslimit(&self) -> u64 {
        self.opslimit
    }

    /// Memory cost in bytes.
    pub fn memlimit(&self) -> usize {
        self.memlimit
    }

    /// Derives `len` bytes of key material from `password` and `salt`.
    ///
    /// The same password, salt and parameters always produce the same key.
    ///
    /// # Errors
    ///
    /// - [`SodiumError::InvalidSize`] if `salt` is not [`PWHASH_SALTBYTES`]
    ///   or `len` is below [`PWHASH_BYTES_MIN`]
    /// - [`SodiumError::NativeFailure`] if the computation fails, typically
    ///   because `memlimit` bytes could not be allocated
    #[allow(unsafe_code)]
    pub fn derive_key(
        &self,
        password: &[u8],
        salt: &[u8],
        len: usize,
    ) -> Result<DerivedKey, SodiumError> {
        support::check_size(salt, PWHASH_SALTBYTES, "salt")?;
        support::check_len_min(len, PWHASH_BYTES_MIN, "derived key")?;
        support::check_int_max(len as u64, PWHASH_BYTES_MAX, "derived key length")?;
        init()?;
        let mut out = vec![0u8; len];
        // SAFETY: `out` holds len bytes, the salt was validated and the
        // password pointer is null or valid for its length.
        let rc = unsafe {
            libsodium_sys::crypto_pwhash(
                out.as_mut_ptr(),
                out.len() as u64,
                support::ptr(password).cast::<c_char>(),
                support::len_u64(password),
                salt.as_ptr(),
                self.opslimit,
                self.memlimit,
                self.algorithm.id(),
            )
        };
        let key = DerivedKey::new(out);
        support::check_rc(rc, "crypto_pwhash")?;
        Ok(key)
    }

    /// Hashes `password` with a random salt into a self-describing ASCII
    /// string suitable for storage.
    ///
    /// # Errors
    ///
    /// Returns [`SodiumError::NativeFailure`] if the computation fails.
    #[allow(unsafe_code)]
    pub fn hash_str(&self, password: &[u8]) -> Result<String, SodiumError> {
        init()?;
        let mut out = [0u8; PWHASH_STRBYTES];
        // SAFETY: `out` holds STRBYTES bytes and the password pointer is null
        // or valid for its length.
        let rc = unsafe {
            (self.algorithm.str_fn())(
                out.as_mut_ptr().cast::<c_char>(),
                support::ptr(password).cast::<c_char>(),
                support::len_u64(password),
                self.opslimit,
                self.memlimit,
            )
        };
        support::check_rc(rc, "crypto_pwhash_str")?;
        CStr::from_bytes_until_nul(&out)
            .ok()
            .and_then(|s| s.to_str().ok())
            .map(str::to_owned)
            .ok_or(SodiumError::NativeFailure("crypto_pwhash_str"))
    }

    /// Checks `password` against a string produced by [`hash_str`](Self::hash_str).
    ///
    /// The parameters stored in `encoded` are used, not those of `self`, so
    /// any supported Argon2 string verifies.
    ///
    /// # Errors
    ///
    /// Returns [`SodiumError::VerificationFailed`] if the password does not
    /// match or `encoded` is not a valid hash string. libsodium reports an
    /// allocation failure during verification with the same return code, so
    /// it also surfaces as `VerificationFailed`.
    #[allow(unsafe_code)]
    pub fn verify_str(encoded: &str, password: &[u8]) -> Result<(), SodiumError> {
        let encoded = encoded_cstring(encoded).ok_or(SodiumError::VerificationFailed)?;
        init()?;
        // SAFETY: `encoded` is NUL-terminated and the password pointer is
        // null or valid for its length.
        let rc = unsafe {
            libsodium_sys::crypto_pwhash_str_verify(
                encoded.as_ptr(),
                support::ptr(password).cast::<c_char>(),
                support::len_u64(password),
            )
        };
        support::check_verify(rc)
    }

    /// Returns `true` when `encoded` was not produced with exactly this
    /// configuration and should be replaced after the next successful
    /// verification.
    ///
    /// Strings that cannot be parsed, or that use another variant, always
    /// need rehashing.
    #[allow(unsafe_code)]
    pub fn needs_rehash(&self, encoded: &str) -> Result<bool, SodiumError> {
        let Some(encoded) = encoded_cstring(encoded) else {
            return Ok(true);
        };
        init()?;
        // SAFETY: `encoded` is NUL-terminated.
        let rc = unsafe {
            (self.algorithm.needs_rehash_fn())(encoded.as_ptr(), self.opslimit, self.memlimit)
        };
        Ok(rc != 0)
    }

    /// Returns libsodium's name for the default password hashing primitive.
    #[allow(unsafe_code)]
    pub fn primitive() -> String {
        // SAFETY: returns a pointer to a static string.
        support::static_str(unsafe { libsodium_sys::crypto_pwhash_primitive() })
    }
}

impl Default for PwHash {
    fn default() -> Self {
        Self::interactive()
    }
}

/// Encoded strings never exceed STRBYTES - 1 characters nor contain NUL.
fn encoded_cstring(encoded: &str) -> Option<CString> {
    if encoded.len() >= PWHASH_STRBYTES {
        return None;
    }
    CString::new(encoded).ok()
}
