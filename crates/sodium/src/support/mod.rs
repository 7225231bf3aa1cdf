// Copyright (C) Microsoft Corporation. All rights reserved.

//! Plumbing shared by every primitive family.
//!
//! - [`check`]: length and range validation performed before any native call
//! - [`bridge`]: slice to pointer/length marshalling and return code translation
//! - [`aligned`]: alignment-guaranteed storage for native state structures

mod aligned;
mod bridge;
mod check;

pub(crate) use aligned::*;
pub(crate) use bridge::*;
pub use check::SizeBound;
pub(crate) use check::*;

use super::*;

#[cfg(test)]
mod tests;
