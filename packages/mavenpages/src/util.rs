//! Core utilities for mavenpages
//!
//! This module provides the pieces shared by every generation step:
//! - Error types and handling
//! - Tree walking
//! - Idempotent and atomic file writes
//! - Path containment checks

use serde::Serialize;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;
use walkdir::WalkDir;

use crate::config::ConfigError;

/// Errors raised while maintaining the repository
#[derive(Error, Debug)]
pub enum RepoError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Task not found: {0}")]
    TaskNotFound(String),

    #[error("Path error: {path} - {msg}")]
    PathViolation { path: PathBuf, msg: String },

    #[error("Preflight check failed, not a repository root (missing: {})", format_missing(.missing))]
    Preflight { missing: Vec<PathBuf> },

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Template error: {0}")]
    Template(#[from] tera::Error),

    #[error("Directory traversal failed: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

fn format_missing(missing: &[PathBuf]) -> String {
    missing
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

impl RepoError {
    /// Shorthand for a [`RepoError::PathViolation`]
    pub fn path_violation(path: impl Into<PathBuf>, msg: impl Into<String>) -> Self {
        Self::PathViolation {
            path: path.into(),
            msg: msg.into(),
        }
    }
}

/// Result type alias for convenience
pub type RepoResult<T> = std::result::Result<T, RepoError>;

/// Outcome counts of one generation pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GenerationReport {
    /// Files created or rewritten
    pub written: usize,
    /// Files left untouched because they already existed or were up to date
    pub unchanged: usize,
    /// Items skipped because of an isolated failure
    pub failed: usize,
}

impl GenerationReport {
    /// Fold another report into this one
    pub fn absorb(&mut self, other: GenerationReport) {
        self.written += other.written;
        self.unchanged += other.unchanged;
        self.failed += other.failed;
    }
}

/// Whether `path` ends in `.<extension>` (ASCII case-insensitive)
pub fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(extension))
}

/// Every regular file beneath `root`, in deterministic order
pub fn walk_files(root: &Path) -> RepoResult<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root).follow_links(false).sort_by_file_name() {
        let entry = entry?;
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

/// Every directory strictly beneath `root`, in deterministic order
pub fn walk_dirs(root: &Path) -> RepoResult<Vec<PathBuf>> {
    let mut dirs = Vec::new();
    for entry in WalkDir::new(root)
        .min_depth(1)
        .follow_links(false)
        .sort_by_file_name()
    {
        let entry = entry?;
        if entry.file_type().is_dir() {
            dirs.push(entry.into_path());
        }
    }
    Ok(dirs)
}

/// Atomic file write utility - write to a hidden sibling then rename
pub fn atomic_write<P: AsRef<Path>, D: AsRef<[u8]>>(path: P, data: D) -> RepoResult<()> {
    let path = path.as_ref();
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| RepoError::path_violation(path, "path has no file name"))?;
    let temp_path = path.with_file_name(format!(".{file_name}.tmp"));

    let mut file = fs_err::File::create(&temp_path)?;
    file.write_all(data.as_ref())?;
    file.sync_all()?;
    drop(file);

    fs_err::rename(&temp_path, path)?;
    Ok(())
}

/// Write `content` to `path` only when it differs from what is on disk.
///
/// A missing file compares as empty. Returns whether a write happened.
pub fn write_if_changed(path: &Path, content: &[u8]) -> RepoResult<bool> {
    let existing = match fs_err::read(path) {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == io::ErrorKind::NotFound => Vec::new(),
        Err(err) => return Err(err.into()),
    };

    if existing == content {
        debug!(path = %path.display(), "content unchanged, skipping write");
        return Ok(false);
    }

    atomic_write(path, content)?;
    Ok(true)
}

/// Check if a path lies inside another one.
///
/// Both paths are canonicalized, so symlinks and `..` are resolved and the
/// comparison is per component (`/srv/root2` is not inside `/srv/root`).
pub fn is_subdirectory<P1: AsRef<Path>, P2: AsRef<Path>>(child: P1, parent: P2) -> RepoResult<bool> {
    let child = fs_err::canonicalize(child.as_ref())?;
    let parent = fs_err::canonicalize(parent.as_ref())?;
    Ok(child.starts_with(parent))
}
