//! Repository-root sanity check run before any mutating task.

use tracing::debug;

use crate::layout::RepoLayout;
use crate::util::{RepoError, RepoResult};

/// Fail unless every marker path of the layout exists
pub fn check(layout: &RepoLayout) -> RepoResult<()> {
    let missing: Vec<_> = layout
        .marker_paths()
        .into_iter()
        .filter(|marker| !marker.exists())
        .collect();

    if !missing.is_empty() {
        return Err(RepoError::Preflight { missing });
    }

    debug!(root = %layout.root().display(), "preflight check passed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RepoConfig;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_reports_every_missing_marker() {
        let temp_dir = tempdir().unwrap();
        let root = temp_dir.path();
        fs::create_dir(root.join("docs")).unwrap();
        fs::write(root.join("README.md"), b"# repo").unwrap();

        let layout = RepoLayout::new(root.to_path_buf(), RepoConfig::default());
        match check(&layout) {
            Err(RepoError::Preflight { missing }) => {
                assert_eq!(
                    missing,
                    vec![root.join("docs/CNAME"), root.join("LICENSE"), root.join(".gitignore")]
                );
            }
            other => panic!("expected preflight failure, got {other:?}"),
        }
    }

    #[test]
    fn test_passes_on_complete_repository() {
        let temp_dir = tempdir().unwrap();
        let root = temp_dir.path();
        fs::create_dir(root.join("docs")).unwrap();
        for marker in ["docs/CNAME", "README.md", "LICENSE", ".gitignore"] {
            fs::write(root.join(marker), b"").unwrap();
        }

        let layout = RepoLayout::new(root.to_path_buf(), RepoConfig::default());
        assert!(check(&layout).is_ok());
    }
}
