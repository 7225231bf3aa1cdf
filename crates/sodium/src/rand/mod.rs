// Copyright (C) Microsoft Corporation. All rights reserved.

//! Random number generation backed by libsodium's `randombytes` API.
//!
//! libsodium uses the operating system's CSPRNG (`getrandom`, `arc4random`,
//! `RtlGenRandom`) and is safe to call from multiple threads.

use std::ffi::c_void;

use super::*;

/// libsodium random number generator.
pub struct Rng;

/// Random source libsodium draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RngImplementation {
    /// Reads the operating system's CSPRNG on every request. The default.
    Sysrandom,
    /// ChaCha20 generator seeded from the operating system's CSPRNG.
    Internal,
}

impl RngImplementation {
    /// Name libsodium reports for the implementation.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Sysrandom => "sysrandom",
            Self::Internal => "internal",
        }
    }
}

/// Seed size for [`Rng::deterministic`].
pub const RANDOMBYTES_SEEDBYTES: usize = 32;

impl Rng {
    /// Fills `buf` with cryptographically secure random bytes.
    ///
    /// # Errors
    ///
    /// Fails only when the library cannot be initialized.
    #[allow(unsafe_code)]
    pub fn rand_bytes(buf: &mut [u8]) -> Result<(), SodiumError> {
        init()?;
        if buf.is_empty() {
            return Ok(());
        }
        // SAFETY: pointer and length describe `buf`.
        unsafe { libsodium_sys::randombytes_buf(buf.as_mut_ptr().cast::<c_void>(), buf.len()) };
        Ok(())
    }

    /// Returns `len` random bytes.
    pub fn rand_vec(len: usize) -> Result<Vec<u8>, SodiumError> {
        let mut buf = vec![0u8; len];
        Self::rand_bytes(&mut buf)?;
        Ok(buf)
    }

    /// Returns a random `u32` in `0..=u32::MAX`.
    #[allow(unsafe_code)]
    pub fn random_u32() -> Result<u32, SodiumError> {
        init()?;
        // SAFETY: no arguments; the library is initialized.
        Ok(unsafe { libsodium_sys::randombytes_random() })
    }

    /// Returns a uniformly distributed value in `0..upper_bound`, without
    /// modulo bias. Returns 0 when `upper_bound < 2`.
    #[allow(unsafe_code)]
    pub fn uniform(upper_bound: u32) -> Result<u32, SodiumError> {
        init()?;
        // SAFETY: no pointers involved; the library is initialized.
        Ok(unsafe { libsodium_sys::randombytes_uniform(upper_bound) })
    }

    /// Fills `buf` with bytes that are indistinguishable from random but
    /// fully determined by `seed`.
    ///
    /// # Errors
    ///
    /// Returns [`SodiumError::InvalidSize`] if `seed` is not
    /// [`RANDOMBYTES_SEEDBYTES`] bytes.
    #[allow(unsafe_code)]
    pub fn deterministic(buf: &mut [u8], seed: &[u8]) -> Result<(), SodiumError> {
        support::check_size(seed, RANDOMBYTES_SEEDBYTES, "seed")?;
        init()?;
        if buf.is_empty() {
            return Ok(());
        }
        // SAFETY: buf is valid for buf.len() bytes, seed for SEEDBYTES bytes.
        unsafe {
            libsodium_sys::randombytes_buf_deterministic(
                buf.as_mut_ptr().cast::<c_void>(),
                buf.len(),
                seed.as_ptr(),
            )
        };
        Ok(())
    }

    /// Reseeds the generator. Only meaningful for custom implementations;
    /// harmless otherwise.
    #[allow(unsafe_code)]
    pub fn stir() -> Result<(), SodiumError> {
        init()?;
        // SAFETY: no arguments; the library is initialized.
        unsafe { libsodium_sys::randombytes_stir() };
        Ok(())
    }

    /// Releases resources held by the random source, such as an open
    /// `/dev/urandom` descriptor. Later calls reopen them as needed.
    ///
    /// # Errors
    ///
    /// Returns [`SodiumError::NativeFailure`] if the source had nothing to
    /// release or could not release it.
    #[allow(unsafe_code)]
    pub fn close() -> Result<(), SodiumError> {
        init()?;
        // SAFETY: no arguments; the library is initialized.
        let rc = unsafe { libsodium_sys::randombytes_close() };
        support::check_rc(rc, "randombytes_close")
    }

    /// Selects the random source and initializes the library with it.
    ///
    /// Must be called before anything else in this crate, since every
    /// operation initializes the library on first use.
    ///
    /// # Errors
    ///
    /// - [`SodiumError::AlreadyInitialized`] if the library was already
    ///   initialized
    /// - [`SodiumError::InitFailed`] if initialization fails
    #[allow(unsafe_code)]
    pub fn set_implementation(implementation: RngImplementation) -> Result<(), SodiumError> {
        init_with("random implementation", || {
            // SAFETY: both tables are static and outlive the process; libsodium
            // only reads through the pointer.
            let rc = unsafe {
                match implementation {
                    RngImplementation::Sysrandom => libsodium_sys::randombytes_set_implementation(
                        std::ptr::addr_of!(libsodium_sys::randombytes_sysrandom_implementation),
                    ),
                    RngImplementation::Internal => libsodium_sys::randombytes_set_implementation(
                        std::ptr::addr_of!(libsodium_sys::randombytes_internal_implementation),
                    ),
                }
            };
            tracing::debug!(implementation = implementation.name(), "random source selected");
            support::check_rc(rc, "randombytes_set_implementation")
        })
    }

    /// Returns the name of the active random source, e.g. `"sysrandom"`.
    #[allow(unsafe_code)]
    pub fn implementation_name() -> Result<String, SodiumError> {
        init()?;
        // SAFETY: returns a pointer to a static string.
        Ok(support::static_str(unsafe {
            libsodium_sys::randombytes_implementation_name()
        }))
    }
}
