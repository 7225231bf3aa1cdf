// Copyright (C) Microsoft Corporation. All rights reserved.

//! Core operation traits.
//!
//! Every primitive family implements one of these traits, so the calling
//! convention is identical across algorithms:
//!
//! - [`key`]: key markers shared by every typed key
//! - [`aead`]: authenticated encryption with associated data
//! - [`sealing`]: authenticated encryption without associated data (box, secretbox)
//! - [`hashing`]: one-shot and streaming hashes
//! - [`mac`]: one-shot and streaming message authentication codes
//! - [`signing`]: signature creation and verification
//! - [`derivation`]: subkey derivation
//!
//! # Buffer Patterns
//!
//! Operations producing variable-size output accept an optional buffer:
//! - `None`: query the required buffer size
//! - `Some(buffer)`: perform the operation and return the bytes written
//!
//! Streaming contexts are consumed by `finish`, so a finished context can
//! never be updated or finished again.
mod aead;
mod derivation;
mod hashing;
mod key;
mod mac;
mod sealing;
mod signing;

pub use aead::*;
pub use derivation::*;
pub use hashing::*;
pub use key::*;
pub use mac::*;
pub use sealing::*;
pub use signing::*;

use super::*;

#[cfg(test)]
pub(crate) mod tests;
