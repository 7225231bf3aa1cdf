// Copyright (C) Microsoft Corporation. All rights reserved.

//! Trait for key derivation operations.

use super::*;

/// Derives keying material from a master key.
///
/// The algorithm value carries the derivation parameters (context, subkey
/// identifier); the master key is passed per call.
pub trait DeriveOp {
    /// Master key type.
    type Key: SecretKey;

    /// Derived key type.
    type DerivedKey: SecretKey;

    /// Derives `derived_len` bytes from `key`.
    ///
    /// # Errors
    ///
    /// Returns [`SodiumError::InvalidSize`] if `derived_len` is outside the
    /// algorithm's supported range.
    fn derive(&self, key: &Self::Key, derived_len: usize) -> Result<Self::DerivedKey, SodiumError>;
}
