//! Inverse operations for the generated metadata.
//!
//! Checksums and indices can always be regenerated, so removing them is safe.
//! Descriptors cannot: once the archives are published, deleting their
//! descriptors breaks every consumer just like deleting the archives would,
//! so descriptor cleanup refuses to act.

use std::path::Path;
use tracing::{debug, info, warn};

use crate::checksum::Algorithm;
use crate::util::{has_extension, walk_files, RepoResult};

/// Delete every checksum sidecar (any of the four algorithm extensions) below `root`
pub fn clean_checksums(root: &Path) -> RepoResult<usize> {
    remove_matching(root, "checksum", |path| {
        Algorithm::ALL
            .iter()
            .any(|algorithm| has_extension(path, algorithm.extension()))
    })
}

/// Delete every index document below `root`, matching the name case-insensitively
pub fn clean_indices(root: &Path, index_file_name: &str) -> RepoResult<usize> {
    remove_matching(root, "index", |path| {
        path.file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.eq_ignore_ascii_case(index_file_name))
    })
}

/// Deliberately does nothing but warn
pub fn clean_descriptors(root: &Path) -> RepoResult<usize> {
    warn!(
        root = %root.display(),
        "refusing to remove descriptors: deleting them is as destructive as deleting the published archives; remove them by hand if you really mean it"
    );
    Ok(0)
}

fn remove_matching(root: &Path, kind: &str, matches: impl Fn(&Path) -> bool) -> RepoResult<usize> {
    let mut removed = 0;
    for file in walk_files(root)?.into_iter().filter(|f| matches(f)) {
        fs_err::remove_file(&file)?;
        debug!(path = %file.display(), kind, "removed");
        removed += 1;
    }
    info!(root = %root.display(), kind, removed, "cleanup complete");
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_clean_checksums() -> RepoResult<()> {
        let temp_dir = tempdir()?;
        let root = temp_dir.path();
        fs::create_dir_all(root.join("a/b"))?;
        for name in ["lib.jar", "lib.jar.md5", "lib.jar.sha1", "a/b/lib.pom.sha256", "a/b/lib.pom.SHA512", "notes.sha"] {
            fs::write(root.join(name), b"x")?;
        }

        assert_eq!(clean_checksums(root)?, 4);
        assert!(root.join("lib.jar").exists());
        assert!(root.join("notes.sha").exists());
        assert!(!root.join("a/b/lib.pom.sha256").exists());
        Ok(())
    }

    #[test]
    fn test_clean_indices_case_insensitive() -> RepoResult<()> {
        let temp_dir = tempdir()?;
        let root = temp_dir.path();
        fs::create_dir_all(root.join("sub"))?;
        fs::write(root.join("index.html"), b"x")?;
        fs::write(root.join("sub/INDEX.HTML"), b"x")?;
        fs::write(root.join("sub/index.html.bak"), b"x")?;

        assert_eq!(clean_indices(root, "index.html")?, 2);
        assert!(root.join("sub/index.html.bak").exists());
        Ok(())
    }

    #[test]
    fn test_clean_descriptors_is_noop() -> RepoResult<()> {
        let temp_dir = tempdir()?;
        let pom = temp_dir.path().join("lib-1.0.pom");
        fs::write(&pom, b"<project/>")?;

        assert_eq!(clean_descriptors(temp_dir.path())?, 0);
        assert_eq!(fs::read(&pom)?, b"<project/>");
        Ok(())
    }
}
