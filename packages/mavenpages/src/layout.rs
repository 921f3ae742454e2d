use std::path::{Path, PathBuf};

use crate::config::RepoConfig;
use crate::coordinate::ArtifactCoordinate;

/// Where things live inside a maintained repository
#[derive(Debug, Clone)]
pub struct RepoLayout {
    root: PathBuf,
    config: RepoConfig,
}

impl RepoLayout {
    pub fn new(root: PathBuf, config: RepoConfig) -> Self {
        Self { root, config }
    }

    /// Repository root: /repo/
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &RepoConfig {
        &self.config
    }

    /// Published tree: /repo/docs/
    pub fn content_root(&self) -> PathBuf {
        self.root.join(&self.config.content_root)
    }

    /// Paths that must exist before anything is mutated
    pub fn marker_paths(&self) -> Vec<PathBuf> {
        let content_root = self.content_root();
        let mut markers = vec![
            content_root.clone(),
            content_root.join(&self.config.preflight.canonical_name_file),
        ];
        markers.extend(
            self.config
                .preflight
                .metadata_files
                .iter()
                .map(|name| self.root.join(name)),
        );
        markers
    }

    /// Names never listed in a directory index
    pub fn reserved_names(&self) -> Vec<String> {
        let index = &self.config.index;
        vec![
            index.file_name.clone(),
            index.template_name.clone(),
            index.stylesheet_name.clone(),
            index.script_name.clone(),
            self.config.preflight.canonical_name_file.clone(),
            self.config.preflight.robots_file.clone(),
        ]
    }

    /// Descriptor for an artifact directory: /repo/docs/com/example/lib/1.0/lib-1.0.pom
    pub fn descriptor_path(&self, dir: &Path, coordinate: &ArtifactCoordinate) -> PathBuf {
        dir.join(coordinate.file_name(&self.config.descriptor_extension))
    }

    /// Index document of a directory: /repo/docs/com/index.html
    pub fn index_path(&self, dir: &Path) -> PathBuf {
        dir.join(&self.config.index.file_name)
    }

    /// Optional user-supplied page template: /repo/docs/index.template.html
    pub fn index_template_path(&self) -> PathBuf {
        self.content_root().join(&self.config.index.template_name)
    }

    /// Custom descriptor template, if configured
    pub fn descriptor_template_path(&self) -> Option<PathBuf> {
        self.config
            .descriptor_template
            .as_ref()
            .map(|path| self.root.join(path))
    }
}
