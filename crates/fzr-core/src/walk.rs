//! Directory enumeration collaborator.
//!
//! Produces the relative name list a [`CandidateStore`](crate::CandidateStore)
//! is loaded with. The walk is serial and sorted by path so discovery order
//! is deterministic across runs; the core treats each name as an opaque
//! searchable string and never re-interprets path semantics.

use std::path::Path;

use ignore::WalkBuilder;

use crate::error::{Error, Result};

/// Whether the candidate pool is built from file names or directory names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkMode {
    Files,
    Directories,
}

/// Recursively collect relative path names under `base_path`.
///
/// Ignore rules (`.gitignore`, `.ignore`) are honored and `.git` trees are
/// skipped. Unreadable entries are logged and skipped, matching the usual
/// walker behavior; only a missing base path is an error.
pub fn collect_names(base_path: &Path, mode: WalkMode) -> Result<Vec<String>> {
    if !base_path.is_dir() {
        return Err(Error::InvalidPath(base_path.to_path_buf()));
    }

    let walker = WalkBuilder::new(base_path)
        .hidden(false)
        .git_ignore(true)
        .git_exclude(true)
        .git_global(true)
        .ignore(true)
        .follow_links(false)
        .sort_by_file_path(|a, b| a.cmp(b))
        .build();

    let mut names = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(error) => {
                tracing::warn!(?error, "skipping unreadable entry");
                continue;
            }
        };

        let path = entry.path();
        if path == base_path || is_git_path(path) {
            continue;
        }

        let is_dir = entry.file_type().is_some_and(|ft| ft.is_dir());
        let wanted = match mode {
            WalkMode::Files => !is_dir,
            WalkMode::Directories => is_dir,
        };
        if !wanted {
            continue;
        }

        if let Ok(relative) = path.strip_prefix(base_path)
            && let Some(name) = relative.to_str()
        {
            names.push(name.to_string());
        }
    }

    tracing::debug!(
        base_path = %base_path.display(),
        ?mode,
        count = names.len(),
        "directory walk completed"
    );
    Ok(names)
}

#[inline]
fn is_git_path(path: &Path) -> bool {
    path.components().any(|c| c.as_os_str() == ".git")
}
