// Copyright (C) Microsoft Corporation. All rights reserved.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Common helper functions

use std::collections::BTreeSet;
use std::path::Path;
use std::path::PathBuf;

use xshell::cmd;
use xshell::Shell;

/// Directories whose contents are not owned by this repository.
const FOREIGN_DIRS: &[&str] = &["examples", "target"];

/// Return files tracked by git, including untracked files that are not
/// ignored, minus deleted files and anything under [`FOREIGN_DIRS`].
pub fn git_ls_files() -> anyhow::Result<Vec<PathBuf>> {
    let sh = Shell::new()?;

    let list = |args: &[&str]| -> anyhow::Result<BTreeSet<PathBuf>> {
        let output = cmd!(sh, "git ls-files {args...}").output()?.stdout;
        Ok(String::from_utf8_lossy(&output)
            .lines()
            .filter(|line| !line.is_empty())
            .map(PathBuf::from)
            .collect())
    };

    let mut files = list(&[])?;
    files.extend(list(&["--others", "--exclude-standard"])?);
    let deleted = list(&["--deleted"])?;

    Ok(files
        .difference(&deleted)
        .filter(|path| is_owned(path))
        .cloned()
        .collect())
}

/// Returns `false` for paths under a directory this repo does not own.
pub fn is_owned(path: &Path) -> bool {
    path.components()
        .next()
        .and_then(|first| first.as_os_str().to_str())
        .map_or(true, |first| !FOREIGN_DIRS.contains(&first))
}

/// Returns `+toolchain` when `RUST_TOOLCHAIN` (or `explicit`) names one.
pub fn toolchain_arg(sh: &Shell, explicit: Option<String>) -> Option<String> {
    explicit
        .or_else(|| sh.var("RUST_TOOLCHAIN").ok())
        .map(|s| format!("+{s}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn foreign_dirs_are_skipped() {
        assert!(!is_owned(Path::new("examples/foo/src/lib.rs")));
        assert!(!is_owned(Path::new("target/debug/build.rs")));
        assert!(is_owned(Path::new("crates/sodium/src/lib.rs")));
        assert!(is_owned(Path::new("Cargo.toml")));
    }
}
