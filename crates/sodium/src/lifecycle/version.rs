// Copyright (C) Microsoft Corporation. All rights reserved.

use super::*;

/// Returns libsodium's version string, e.g. `"1.0.20"`.
#[allow(unsafe_code)]
pub fn version_string() -> String {
    // SAFETY: returns a pointer to a static string; safe before sodium_init.
    support::static_str(unsafe { libsodium_sys::sodium_version_string() })
}

/// Returns the major component of the library ABI version.
#[allow(unsafe_code)]
pub fn library_version_major() -> i32 {
    // SAFETY: pure query with no arguments.
    unsafe { libsodium_sys::sodium_library_version_major() }
}

/// Returns the minor component of the library ABI version.
#[allow(unsafe_code)]
pub fn library_version_minor() -> i32 {
    // SAFETY: pure query with no arguments.
    unsafe { libsodium_sys::sodium_library_version_minor() }
}

/// Returns `true` when libsodium was built in minimal mode, which omits
/// several primitives (XChaCha20 box, Salsa20 variants, scrypt).
#[allow(unsafe_code)]
pub fn library_minimal() -> bool {
    // SAFETY: pure query with no arguments.
    unsafe { libsodium_sys::sodium_library_minimal() != 0 }
}
