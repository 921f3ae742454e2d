//! Artifact coordinates derived from the directory tree.
//!
//! A Maven-style repository stores `group/…/artifact/version/` directories.
//! An artifact directory is any directory that directly holds a package
//! archive; its path below the root spells out the coordinate.

use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::util::{has_extension, is_subdirectory, walk_files, RepoError, RepoResult};

/// (group, artifact, version) triple identifying a package
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArtifactCoordinate {
    /// Group path segments, outermost first
    pub group: Vec<String>,
    pub artifact: String,
    pub version: String,
}

impl ArtifactCoordinate {
    /// Build a coordinate from the path segments below the root.
    ///
    /// The last segment is the version, the one before it the artifact id,
    /// everything else the group. At least three segments are required.
    pub fn from_segments(mut segments: Vec<String>) -> Option<Self> {
        if segments.len() < 3 {
            return None;
        }
        let version = segments.pop()?;
        let artifact = segments.pop()?;
        Some(Self {
            group: segments,
            artifact,
            version,
        })
    }

    /// Dotted group id, e.g. `com.example`
    pub fn group_id(&self) -> String {
        self.group.join(".")
    }

    /// `<artifact>-<version>.<extension>`
    pub fn file_name(&self, extension: &str) -> String {
        format!("{}-{}.{}", self.artifact, self.version, extension)
    }
}

impl fmt::Display for ArtifactCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group_id(), self.artifact, self.version)
    }
}

/// Finds artifact directories and resolves their coordinates
pub struct CoordinateResolver<'a> {
    root: &'a Path,
    package_extension: &'a str,
}

impl<'a> CoordinateResolver<'a> {
    pub fn new(root: &'a Path, package_extension: &'a str) -> Self {
        Self {
            root,
            package_extension,
        }
    }

    /// Distinct absolute parent directories of every package archive below the root
    pub fn find_artifact_directories(&self) -> RepoResult<BTreeSet<PathBuf>> {
        let root = fs_err::canonicalize(self.root)?;
        let directories: BTreeSet<PathBuf> = walk_files(&root)?
            .into_iter()
            .filter(|file| has_extension(file, self.package_extension))
            .filter_map(|file| file.parent().map(Path::to_path_buf))
            .collect();

        debug!(root = %root.display(), count = directories.len(), "artifact directories discovered");
        Ok(directories)
    }

    /// Derive the coordinate of `dir`.
    ///
    /// Fails with [`RepoError::PathViolation`] when the directory is outside
    /// the root, holds no package archive, or sits fewer than three levels
    /// below the root. Segment names are used verbatim.
    pub fn resolve(&self, dir: &Path) -> RepoResult<ArtifactCoordinate> {
        if !dir.is_dir() {
            return Err(RepoError::path_violation(dir, "not a directory"));
        }
        if !is_subdirectory(dir, self.root)? {
            return Err(RepoError::path_violation(dir, "directory is outside the repository root"));
        }
        if !self.contains_package(dir)? {
            return Err(RepoError::path_violation(
                dir,
                format!("directory contains no .{} file", self.package_extension),
            ));
        }

        let root = fs_err::canonicalize(self.root)?;
        let dir = fs_err::canonicalize(dir)?;
        let relative = dir
            .strip_prefix(&root)
            .map_err(|_| RepoError::path_violation(&dir, "directory is outside the repository root"))?;

        let segments = relative
            .components()
            .map(|component| {
                component
                    .as_os_str()
                    .to_str()
                    .map(str::to_string)
                    .ok_or_else(|| RepoError::path_violation(&dir, "path segment is not valid UTF-8"))
            })
            .collect::<RepoResult<Vec<_>>>()?;

        ArtifactCoordinate::from_segments(segments).ok_or_else(|| {
            RepoError::path_violation(
                &dir,
                "expected at least <group>/<artifact>/<version> below the repository root",
            )
        })
    }

    fn contains_package(&self, dir: &Path) -> RepoResult<bool> {
        for entry in fs_err::read_dir(dir)? {
            let entry = entry?;
            if entry.file_type()?.is_file() && has_extension(&entry.path(), self.package_extension) {
                return Ok(true);
            }
        }
        Ok(false)
    }
}
