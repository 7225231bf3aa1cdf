// Copyright (C) Microsoft Corporation. All rights reserved.

//! Library initialization and read-only introspection.
//!
//! libsodium must be initialized once per process before any primitive is
//! used. [`init`] performs that step exactly once no matter how many threads
//! race on it, and every operation in this crate calls it before touching the
//! native library, so explicit initialization is optional.

mod runtime;
mod version;

use std::sync::OnceLock;

pub use runtime::*;
pub use version::*;

use super::*;

static INIT: OnceLock<Result<(), SodiumError>> = OnceLock::new();

/// Initializes libsodium.
///
/// The first call runs `sodium_init`; concurrent first callers wait for it to
/// complete. Later calls return the cached outcome without touching the native
/// library. There is no matching teardown.
///
/// # Errors
///
/// Returns [`SodiumError::InitFailed`] when libsodium could not initialize,
/// for instance because no entropy source is available.
pub fn init() -> Result<(), SodiumError> {
    INIT.get_or_init(initialize).clone()
}

/// Applies `configure` and then initializes the library, provided nothing in
/// this process has initialized it through this crate yet.
///
/// The initialization outcome is cached as usual; a `configure` error is
/// returned to the caller only.
///
/// # Errors
///
/// - [`SodiumError::AlreadyInitialized`] naming `setting` when initialization
///   already happened
/// - the error of `configure`, or that of initialization
pub(crate) fn init_with<F>(setting: &'static str, configure: F) -> Result<(), SodiumError>
where
    F: FnOnce() -> Result<(), SodiumError>,
{
    let mut configured = None;
    let outcome = INIT
        .get_or_init(|| {
            configured = Some(configure());
            initialize()
        })
        .clone();
    match configured {
        Some(result) => result.and(outcome),
        None => {
            tracing::warn!(setting, "library already initialized");
            Err(SodiumError::AlreadyInitialized(setting))
        }
    }
}

#[allow(unsafe_code)]
fn initialize() -> Result<(), SodiumError> {
    // SAFETY: sodium_init is thread-safe and idempotent.
    let rc = unsafe { libsodium_sys::sodium_init() };
    if rc < 0 {
        tracing::error!(rc, "sodium_init failed");
        return Err(SodiumError::InitFailed(rc));
    }
    tracing::debug!(version = %version_string(), "libsodium initialized");
    Ok(())
}
