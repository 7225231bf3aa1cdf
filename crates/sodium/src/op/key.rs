// Copyright (C) Microsoft Corporation. All rights reserved.

//! Key marker traits.

/// Common behavior of every typed key.
pub trait Key {
    /// Key size in bytes.
    fn size(&self) -> usize;

    /// Key size in bits.
    fn bits(&self) -> usize {
        self.size() * 8
    }
}

/// A key that must be kept secret. Implementors are wiped on drop.
pub trait SecretKey: Key {}

/// A key that may be shared freely.
pub trait PublicKey: Key {}

/// Secret keying material of caller-chosen length, wiped on drop.
///
/// Produced by key derivation and password hashing.
#[derive(Clone, zeroize::Zeroize, zeroize::ZeroizeOnDrop)]
pub struct DerivedKey(Vec<u8>);

impl DerivedKey {
    pub(crate) fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    /// Returns the derived bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl Key for DerivedKey {
    fn size(&self) -> usize {
        self.0.len()
    }
}

impl SecretKey for DerivedKey {}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DerivedKey")
            .field("len", &self.0.len())
            .finish_non_exhaustive()
    }
}
