// Copyright (C) Microsoft Corporation. All rights reserved.

//! High-level operation wrappers.
//!
//! Each wrapper is a unit struct of static functions generic over the
//! operation traits in [`op`](crate::op), so code that does not care which
//! algorithm it is given can be written once:
//!
//! - [`hasher`]: one-shot and streaming hashing
//! - [`sealer`]: authenticated encryption (AEAD and box style)
//! - [`authenticator`]: message authentication codes
//! - [`signer`]: signature creation
//! - [`verifier`]: signature verification
//!
//! # Buffer Management
//!
//! All operations support two buffer patterns:
//! - Pass `None` to query required buffer size
//! - Pass `Some(buffer)` to perform the actual operation
mod authenticator;
mod hasher;
mod sealer;
mod signer;
mod verifier;

pub use authenticator::*;
pub use hasher::*;
pub use sealer::*;
pub use signer::*;
pub use verifier::*;

use super::*;
