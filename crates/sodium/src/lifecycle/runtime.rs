// Copyright (C) Microsoft Corporation. All rights reserved.

//! CPU feature detection as seen by libsodium's runtime dispatcher.

use super::*;

/// CPU features libsodium detected at initialization.
///
/// Flags that do not apply to the target architecture are always `false`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CpuFeatures {
    /// ARM NEON.
    pub neon: bool,
    /// x86 SSE2.
    pub sse2: bool,
    /// x86 SSE3.
    pub sse3: bool,
    /// x86 SSSE3.
    pub ssse3: bool,
    /// x86 SSE4.1.
    pub sse41: bool,
    /// x86 AVX.
    pub avx: bool,
    /// x86 AVX2.
    pub avx2: bool,
    /// x86 AVX-512 Foundation.
    pub avx512f: bool,
    /// Carry-less multiplication (PCLMULQDQ).
    pub pclmul: bool,
    /// AES-NI instructions.
    pub aesni: bool,
    /// RDRAND hardware random number generator.
    pub rdrand: bool,
}

impl CpuFeatures {
    /// Queries libsodium for the features of the current CPU.
    ///
    /// # Errors
    ///
    /// Fails only when the library cannot be initialized; feature detection
    /// happens inside `sodium_init`.
    #[allow(unsafe_code)]
    pub fn detect() -> Result<Self, SodiumError> {
        init()?;

        #[allow(unused_mut)]
        let mut features = Self::default();

        cfg_if::cfg_if! {
            if #[cfg(any(target_arch = "x86", target_arch = "x86_64"))] {
                // SAFETY: read-only queries of flags set by sodium_init.
                unsafe {
                    features.sse2 = libsodium_sys::sodium_runtime_has_sse2() != 0;
                    features.sse3 = libsodium_sys::sodium_runtime_has_sse3() != 0;
                    features.ssse3 = libsodium_sys::sodium_runtime_has_ssse3() != 0;
                    features.sse41 = libsodium_sys::sodium_runtime_has_sse41() != 0;
                    features.avx = libsodium_sys::sodium_runtime_has_avx() != 0;
                    features.avx2 = libsodium_sys::sodium_runtime_has_avx2() != 0;
                    features.avx512f = libsodium_sys::sodium_runtime_has_avx512f() != 0;
                    features.pclmul = libsodium_sys::sodium_runtime_has_pclmul() != 0;
                    features.aesni = libsodium_sys::sodium_runtime_has_aesni() != 0;
                    features.rdrand = libsodium_sys::sodium_runtime_has_rdrand() != 0;
                }
            } else if #[cfg(any(target_arch = "arm", target_arch = "aarch64"))] {
                // SAFETY: read-only query of a flag set by sodium_init.
                features.neon = unsafe { libsodium_sys::sodium_runtime_has_neon() } != 0;
            }
        }

        Ok(features)
    }
}

/// Returns `true` when the hardware-accelerated AES-256-GCM implementation
/// can be used on this machine.
///
/// libsodium only ships AES-256-GCM when the CPU supports the required
/// instructions; every [`Aes256Gcm`] operation checks this first.
#[allow(unsafe_code)]
pub fn aes256gcm_is_available() -> Result<bool, SodiumError> {
    init()?;
    // SAFETY: read-only query after initialization.
    Ok(unsafe { libsodium_sys::crypto_aead_aes256gcm_is_available() } == 1)
}
