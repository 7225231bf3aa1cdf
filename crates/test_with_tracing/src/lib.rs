// Copyright (C) Microsoft Corporation. All rights reserved.

//! Test attribute that routes `tracing` and `log` output into the test harness.
//!
//! Tests annotated with [`test`] install a subscriber on first use. The
//! filter comes from `RUST_LOG` when set; otherwise the `sodium` crate logs at
//! `TRACE` and everything else at `DEBUG`.

// Test-only support crate; `expect` is allowed here but `unwrap` is not.
#![allow(clippy::expect_used)]

#[cfg(test)]
extern crate self as test_with_tracing;

pub use test_with_tracing_macro::test;
use tracing::metadata::LevelFilter;
use tracing_subscriber::filter::Targets;
use tracing_subscriber::prelude::*;

/// Default filter applied when `RUST_LOG` is unset.
fn default_targets() -> Targets {
    Targets::new()
        .with_target("sodium", LevelFilter::TRACE)
        .with_default(LevelFilter::DEBUG)
}

#[doc(hidden)]
/// Installs the test subscriber once per process.
pub fn init() {
    static ONCE: std::sync::Once = std::sync::Once::new();

    ONCE.call_once(|| {
        let targets = match std::env::var("RUST_LOG") {
            Ok(var) => var
                .parse()
                .expect("RUST_LOG is not a valid target filter"),
            Err(_) => default_targets(),
        };
        // Keep any subscriber the harness installed first.
        tracing_subscriber::fmt()
            .compact()
            .with_ansi(false)
            .with_test_writer()
            .with_max_level(LevelFilter::TRACE)
            .with_thread_names(true)
            .finish()
            .with(targets)
            .try_init()
            .ok();
    });
}
