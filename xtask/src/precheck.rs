// Copyright (C) Microsoft Corporation. All rights reserved.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Xtask to run every check CI runs

use clap::Parser;

use crate::audit;
use crate::clippy;
use crate::copyright;
use crate::fmt;
use crate::nextest;
use crate::Xtask;
use crate::XtaskCtx;

/// Xtask to run every check CI runs
#[derive(Parser)]
#[clap(about = "Run copyright, fmt, clippy, tests and audit")]
pub struct Precheck {
    /// Skip TOML formatting
    #[clap(long)]
    pub skip_toml: bool,

    /// Skip the dependency audit
    #[clap(long)]
    pub skip_audit: bool,
}

impl Xtask for Precheck {
    fn run(self, ctx: XtaskCtx) -> anyhow::Result<()> {
        log::trace!("running precheck");

        copyright::Copyright { fix: false }.run(ctx.clone())?;

        fmt::Fmt {
            fix: false,
            skip_toml: self.skip_toml,
            toolchain: None,
        }
        .run(ctx.clone())?;

        clippy::Clippy { fix: false }.run(ctx.clone())?;

        nextest::Nextest {
            package: None,
            filterset: None,
            proptest_cases: None,
        }
        .run(ctx.clone())?;

        if !self.skip_audit {
            audit::Audit { ignore: Vec::new() }.run(ctx)?;
        }

        log::trace!("done precheck");
        Ok(())
    }
}
