// Copyright (C) Microsoft Corporation. All rights reserved.

//! X25519 scalar multiplication.
//!
//! A raw building block for key agreement. The output of [`scalarmult`] is
//! not uniformly distributed and should be hashed (for instance with
//! [`Blake2b`]) together with both public keys before use as a key.

use zeroize::Zeroizing;

use super::*;

/// Scalar size.
pub const SCALARMULT_SCALARBYTES: usize = 32;
/// Point and result size.
pub const SCALARMULT_BYTES: usize = 32;

/// Multiplies the base point by the secret scalar `n`, giving the matching
/// public key.
#[allow(unsafe_code)]
pub fn scalarmult_base(n: &[u8]) -> Result<[u8; SCALARMULT_BYTES], SodiumError> {
    support::check_size(n, SCALARMULT_SCALARBYTES, "scalar")?;
    init()?;
    let mut q = [0u8; SCALARMULT_BYTES];
    // SAFETY: 32-byte output and validated 32-byte scalar.
    let rc = unsafe { libsodium_sys::crypto_scalarmult_base(q.as_mut_ptr(), n.as_ptr()) };
    support::check_rc(rc, "crypto_scalarmult_base")?;
    Ok(q)
}

/// Multiplies the point `p` by the secret scalar `n`, giving the shared
/// secret of a key agreement.
///
/// # Errors
///
/// Returns [`SodiumError::NativeFailure`] when `p` is a low-order point and
/// the result would be all zeros.
#[allow(unsafe_code)]
pub fn scalarmult(n: &[u8], p: &[u8]) -> Result<Zeroizing<[u8; SCALARMULT_BYTES]>, SodiumError> {
    support::check_size(n, SCALARMULT_SCALARBYTES, "scalar")?;
    support::check_size(p, SCALARMULT_BYTES, "point")?;
    init()?;
    let mut q = Zeroizing::new([0u8; SCALARMULT_BYTES]);
    // SAFETY: 32-byte output, validated 32-byte scalar and point.
    let rc = unsafe { libsodium_sys::crypto_scalarmult(q.as_mut_ptr(), n.as_ptr(), p.as_ptr()) };
    support::check_rc(rc, "crypto_scalarmult")?;
    Ok(q)
}

/// Returns libsodium's name for the scalar multiplication primitive.
#[allow(unsafe_code)]
pub fn scalarmult_primitive() -> String {
    // SAFETY: returns a pointer to a static string.
    support::static_str(unsafe { libsodium_sys::crypto_scalarmult_primitive() })
}
