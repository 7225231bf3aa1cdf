// Copyright (C) Microsoft Corporation. All rights reserved.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Xtask to run nextest

use clap::Parser;
use xshell::cmd;
use xshell::Shell;

use crate::common;
use crate::Xtask;
use crate::XtaskCtx;

/// Xtask to run nextest
#[derive(Parser)]
#[clap(about = "Run nextest")]
pub struct Nextest {
    /// Package to test instead of the whole workspace
    #[clap(long)]
    pub package: Option<String>,

    /// Test filterset (see https://nexte.st/docs/filtersets)
    #[clap(long, short = 'E')]
    pub filterset: Option<String>,

    /// Number of cases each property test generates
    #[clap(long)]
    pub proptest_cases: Option<u32>,
}

impl Xtask for Nextest {
    fn run(self, _ctx: XtaskCtx) -> anyhow::Result<()> {
        log::trace!("running nextest");

        let sh = Shell::new()?;
        let toolchain = &common::toolchain_arg(&sh, None);

        cmd!(sh, "cargo {toolchain...} nextest --version")
            .quiet()
            .run()?;

        let mut args = Vec::new();
        match &self.package {
            Some(package) => args.extend(["--package".to_string(), package.clone()]),
            None => args.push("--workspace".to_string()),
        }
        if let Some(filterset) = self.filterset {
            args.extend(["--filterset".to_string(), filterset]);
        }

        let _cases = self
            .proptest_cases
            .map(|cases| sh.push_env("PROPTEST_CASES", cases.to_string()));

        cmd!(
            sh,
            "cargo {toolchain...} nextest run --no-fail-fast {args...}"
        )
        .quiet()
        .run()?;

        log::trace!("done nextest");
        Ok(())
    }
}
