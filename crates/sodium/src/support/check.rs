// Copyright (C) Microsoft Corporation. All rights reserved.

//! Buffer length validation.
//!
//! Every check names the role of the buffer being validated so the resulting
//! [`SodiumError::InvalidSize`] tells the caller which argument was wrong and
//! what size was expected. Checks never touch the native library.

use std::fmt;

use super::*;

/// The size constraint a buffer failed to satisfy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeBound {
    /// Exactly this many bytes.
    Exact(usize),
    /// At least this many bytes.
    AtLeast(usize),
    /// At most this many bytes.
    AtMost(usize),
    /// Between the two bounds, inclusive.
    Range(usize, usize),
}

impl fmt::Display for SizeBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(n) => write!(f, "{n}"),
            Self::AtLeast(n) => write!(f, "at least {n}"),
            Self::AtMost(n) => write!(f, "at most {n}"),
            Self::Range(min, max) => write!(f, "{min}..={max}"),
        }
    }
}

fn invalid(role: &'static str, expected: SizeBound, actual: usize) -> SodiumError {
    SodiumError::InvalidSize {
        role,
        expected,
        actual,
    }
}

/// Fails unless `buf` is exactly `expected` bytes long.
pub(crate) fn check_size(buf: &[u8], expected: usize, role: &'static str) -> Result<(), SodiumError> {
    if buf.len() != expected {
        return Err(invalid(role, SizeBound::Exact(expected), buf.len()));
    }
    Ok(())
}

/// Fails unless `buf` is at least `min` bytes long.
pub(crate) fn check_size_min(buf: &[u8], min: usize, role: &'static str) -> Result<(), SodiumError> {
    check_len_min(buf.len(), min, role)
}

/// Fails unless `buf` is at least `min` bytes long and its first `zeros`
/// bytes are zero.
pub(crate) fn check_zero_padded(
    buf: &[u8],
    min: usize,
    zeros: usize,
    role: &'static str,
) -> Result<(), SodiumError> {
    check_size_min(buf, min.max(zeros), role)?;
    if buf[..zeros].iter().any(|&b| b != 0) {
        return Err(SodiumError::InvalidPadding(role));
    }
    Ok(())
}

/// Fails unless `len` is at least `min`.
pub(crate) fn check_len_min(len: usize, min: usize, role: &'static str) -> Result<(), SodiumError> {
    if len < min {
        return Err(invalid(role, SizeBound::AtLeast(min), len));
    }
    Ok(())
}

/// Fails unless `len` is at most `max`.
pub(crate) fn check_len_max(len: usize, max: usize, role: &'static str) -> Result<(), SodiumError> {
    if len > max {
        return Err(invalid(role, SizeBound::AtMost(max), len));
    }
    Ok(())
}

/// Fails unless `buf` is between `min` and `max` bytes long, inclusive.
pub(crate) fn check_size_in_range(
    buf: &[u8],
    min: usize,
    max: usize,
    role: &'static str,
) -> Result<(), SodiumError> {
    check_len_in_range(buf.len(), min, max, role)
}

/// Fails unless the requested length `len` is between `min` and `max`, inclusive.
pub(crate) fn check_len_in_range(
    len: usize,
    min: usize,
    max: usize,
    role: &'static str,
) -> Result<(), SodiumError> {
    if len < min || len > max {
        return Err(invalid(role, SizeBound::Range(min, max), len));
    }
    Ok(())
}

/// Fails unless `value` does not exceed `max`.
pub(crate) fn check_int_max(value: u64, max: u64, role: &'static str) -> Result<(), SodiumError> {
    if value > max {
        return Err(SodiumError::OutOfRange { role, value, max });
    }
    Ok(())
}

/// Returns the inner value, or [`SodiumError::MissingInput`] when absent.
pub(crate) fn require<T>(value: Option<T>, role: &'static str) -> Result<T, SodiumError> {
    value.ok_or(SodiumError::MissingInput(role))
}
