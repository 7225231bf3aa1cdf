// Copyright (C) Microsoft Corporation. All rights reserved.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Xtask to check that every source file carries the copyright header

use std::path::Path;

use clap::Parser;

use crate::common;
use crate::Xtask;
use crate::XtaskCtx;

const HEADER_TEXT: &str = "Copyright (C) Microsoft Corporation. All rights reserved.";

/// Number of leading lines searched for the header.
const HEADER_WINDOW: usize = 3;

/// Xtask to check that every source file carries the copyright header
#[derive(Parser)]
#[clap(about = "Check copyright headers")]
pub struct Copyright {
    /// Insert or normalize missing headers
    #[clap(long)]
    pub fix: bool,
}

impl Xtask for Copyright {
    fn run(self, _ctx: XtaskCtx) -> anyhow::Result<()> {
        log::trace!("running copyright");

        let mut missing = Vec::new();
        for path in common::git_ls_files()? {
            let Some(prefix) = comment_prefix(&path) else {
                continue;
            };
            let content = std::fs::read_to_string(&path)?;
            if has_header(&content) {
                continue;
            }
            if self.fix {
                log::info!("adding copyright header to {}", path.display());
                std::fs::write(&path, with_header(&content, prefix))?;
            } else {
                log::error!("copyright header not found in {}", path.display());
                missing.push(path);
            }
        }

        if !missing.is_empty() {
            anyhow::bail!("{} file(s) lack a copyright header", missing.len());
        }

        log::trace!("done copyright");
        Ok(())
    }
}

fn comment_prefix(path: &Path) -> Option<&'static str> {
    match path.extension()?.to_str()? {
        "rs" => Some("//"),
        "toml" | "sh" | "py" => Some("#"),
        _ => None,
    }
}

fn has_header(content: &str) -> bool {
    content
        .lines()
        .take(HEADER_WINDOW)
        .any(|line| line.contains(HEADER_TEXT))
}

/// Replaces a stale Microsoft copyright line within the header window, or
/// prepends a fresh header when there is none.
fn with_header(content: &str, prefix: &str) -> String {
    let header = format!("{prefix} {HEADER_TEXT}");
    let mut offset = 0;
    for line in content.split_inclusive('\n').take(HEADER_WINDOW) {
        let body = line.trim_end_matches(['\r', '\n']);
        if contains_word(body, "copyright") && contains_word(body, "microsoft") {
            let ending = &line[body.len()..];
            return format!(
                "{}{header}{ending}{}",
                &content[..offset],
                &content[offset + line.len()..]
            );
        }
        offset += line.len();
    }
    format!("{header}\n{content}")
}

fn contains_word(line: &str, word: &str) -> bool {
    line.split(|ch: char| !ch.is_alphanumeric())
        .any(|token| token.eq_ignore_ascii_case(word))
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;

    #[test]
    fn stale_header_is_replaced() {
        let updated = with_header("// Copyright 2024 Microsoft\n// notes\nfn main() {}\n", "//");
        assert_eq!(updated, format!("// {HEADER_TEXT}\n// notes\nfn main() {{}}\n"));
    }

    #[test]
    fn missing_header_is_prepended() {
        let updated = with_header("[package]\n", "#");
        assert_eq!(updated, format!("# {HEADER_TEXT}\n[package]\n"));
        assert!(has_header(&updated));
    }

    #[test]
    fn crlf_endings_are_preserved() {
        let updated = with_header("// copyright microsoft\r\nfn main() {}\r\n", "//");
        assert_eq!(updated, format!("// {HEADER_TEXT}\r\nfn main() {{}}\r\n"));
    }

    #[test]
    fn only_known_extensions_are_checked() {
        assert_eq!(comment_prefix(Path::new("src/lib.rs")), Some("//"));
        assert_eq!(comment_prefix(Path::new("Cargo.toml")), Some("#"));
        assert_eq!(comment_prefix(Path::new("README.md")), None);
        assert_eq!(comment_prefix(Path::new("LICENSE")), None);
    }
}
