// Copyright (C) Microsoft Corporation. All rights reserved.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Xtask to run clippy across the workspace

use clap::Parser;
use xshell::cmd;

use crate::common;
use crate::Xtask;
use crate::XtaskCtx;

/// Xtask to run clippy across the workspace
#[derive(Parser)]
#[clap(about = "Run clippy with warnings denied")]
pub struct Clippy {
    /// Apply suggested fixes
    #[clap(long)]
    pub fix: bool,
}

impl Xtask for Clippy {
    fn run(self, _ctx: XtaskCtx) -> anyhow::Result<()> {
        log::trace!("running clippy");

        let sh = xshell::Shell::new()?;
        let toolchain = common::toolchain_arg(&sh, None);
        let fix = self
            .fix
            .then_some(["--fix", "--allow-dirty", "--allow-staged"])
            .into_iter()
            .flatten();

        cmd!(
            sh,
            "cargo {toolchain...} clippy --workspace --all-targets {fix...} -- -D warnings"
        )
        .quiet()
        .run()?;

        log::trace!("done clippy");
        Ok(())
    }
}
