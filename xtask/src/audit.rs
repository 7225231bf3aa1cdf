// Copyright (C) Microsoft Corporation. All rights reserved.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Xtask to audit dependencies for published advisories

use clap::Parser;
use xshell::cmd;

use crate::common;
use crate::Xtask;
use crate::XtaskCtx;

/// Xtask to audit dependencies for published advisories
#[derive(Parser)]
#[clap(about = "Audit dependencies with cargo-audit")]
pub struct Audit {
    /// Advisory IDs to ignore
    #[clap(long)]
    pub ignore: Vec<String>,
}

impl Xtask for Audit {
    fn run(self, _ctx: XtaskCtx) -> anyhow::Result<()> {
        log::trace!("running audit");

        let sh = xshell::Shell::new()?;
        let toolchain = &common::toolchain_arg(&sh, None);

        cmd!(sh, "cargo {toolchain...} audit --version").quiet().run()?;

        let ignore = self
            .ignore
            .iter()
            .flat_map(|id| ["--ignore", id.as_str()])
            .collect::<Vec<_>>();
        cmd!(sh, "cargo {toolchain...} audit --deny warnings {ignore...}")
            .quiet()
            .run()?;

        log::trace!("done audit");
        Ok(())
    }
}
