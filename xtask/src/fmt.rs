// Copyright (C) Microsoft Corporation. All rights reserved.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Xtask to check Rust and TOML formatting

use clap::Parser;
use xshell::cmd;

use crate::common;
use crate::Xtask;
use crate::XtaskCtx;

/// Xtask to check Rust and TOML formatting
#[derive(Parser)]
#[clap(about = "Run formatting checks")]
pub struct Fmt {
    /// Rewrite files instead of reporting differences
    #[clap(long)]
    pub fix: bool,

    /// Skip TOML formatting
    #[clap(long)]
    pub skip_toml: bool,

    /// Override toolchain to use for formatting
    #[clap(long)]
    pub toolchain: Option<String>,
}

impl Xtask for Fmt {
    fn run(self, _ctx: XtaskCtx) -> anyhow::Result<()> {
        log::trace!("running fmt");
        let sh = xshell::Shell::new()?;
        let toolchain = common::toolchain_arg(&sh, self.toolchain);
        let check = (!self.fix).then_some("--check");

        cmd!(sh, "cargo {toolchain...} fmt --all -- {check...}")
            .quiet()
            .run()?;

        if !self.skip_toml {
            log::trace!("running taplo fmt");
            cmd!(sh, "taplo fmt {check...}").quiet().run()?;
        }

        log::trace!("done fmt");
        Ok(())
    }
}
