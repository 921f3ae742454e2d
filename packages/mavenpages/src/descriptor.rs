//! Descriptor synthesis
//!
//! Writes a `<artifact>-<version>.pom` next to every package archive that
//! lacks one. Existing descriptors are never touched. A directory whose
//! coordinate cannot be resolved is logged and skipped; the rest of the run
//! carries on.

use std::path::Path;
use tera::Context;
use tracing::{debug, error, info};

use crate::coordinate::{ArtifactCoordinate, CoordinateResolver};
use crate::layout::RepoLayout;
use crate::util::{atomic_write, GenerationReport, RepoResult};

/// Renders descriptors from a template with `group_id`, `artifact_id` and
/// `version` placeholders
pub struct DescriptorSynthesizer<'a> {
    layout: &'a RepoLayout,
    template: String,
}

impl<'a> DescriptorSynthesizer<'a> {
    pub fn new(layout: &'a RepoLayout, template: impl Into<String>) -> Self {
        Self {
            layout,
            template: template.into(),
        }
    }

    /// Render the descriptor for one coordinate. Values are substituted verbatim.
    pub fn render(&self, coordinate: &ArtifactCoordinate) -> RepoResult<String> {
        let mut context = Context::new();
        context.insert("group_id", &coordinate.group_id());
        context.insert("artifact_id", &coordinate.artifact);
        context.insert("version", &coordinate.version);
        Ok(tera::Tera::one_off(&self.template, &context, false)?)
    }

    /// Write every missing descriptor under the content root
    pub fn synthesize(&self) -> RepoResult<GenerationReport> {
        let content_root = self.layout.content_root();
        let resolver =
            CoordinateResolver::new(&content_root, &self.layout.config().package_extension);

        let mut report = GenerationReport::default();
        for dir in resolver.find_artifact_directories()? {
            let coordinate = match resolver.resolve(&dir) {
                Ok(coordinate) => coordinate,
                Err(err) => {
                    error!(dir = %dir.display(), error = %err, "skipping directory, cannot resolve coordinate");
                    report.failed += 1;
                    continue;
                }
            };

            if self.synthesize_one(&dir, &coordinate)? {
                report.written += 1;
            } else {
                report.unchanged += 1;
            }
        }

        info!(
            written = report.written,
            unchanged = report.unchanged,
            failed = report.failed,
            "descriptor synthesis complete"
        );
        Ok(report)
    }

    /// Write the descriptor of one directory if it does not exist yet
    pub fn synthesize_one(&self, dir: &Path, coordinate: &ArtifactCoordinate) -> RepoResult<bool> {
        let path = self.layout.descriptor_path(dir, coordinate);
        if path.exists() {
            debug!(path = %path.display(), "descriptor already present");
            return Ok(false);
        }

        atomic_write(&path, self.render(coordinate)?)?;
        info!(path = %path.display(), %coordinate, "descriptor written");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RepoConfig;
    use crate::constants::DEFAULT_DESCRIPTOR_TEMPLATE;

    fn coordinate() -> ArtifactCoordinate {
        ArtifactCoordinate {
            group: vec!["com".into(), "example".into()],
            artifact: "widgets".into(),
            version: "2.0".into(),
        }
    }

    #[test]
    fn test_render_default_template() {
        let layout = RepoLayout::new("/repo".into(), RepoConfig::default());
        let synthesizer = DescriptorSynthesizer::new(&layout, DEFAULT_DESCRIPTOR_TEMPLATE);
        let rendered = synthesizer.render(&coordinate()).unwrap();

        assert!(rendered.contains("<groupId>com.example</groupId>"));
        assert!(rendered.contains("<artifactId>widgets</artifactId>"));
        assert!(rendered.contains("<version>2.0</version>"));
        assert!(!rendered.contains("{{"));
    }

    #[test]
    fn test_render_is_verbatim() {
        let layout = RepoLayout::new("/repo".into(), RepoConfig::default());
        let synthesizer = DescriptorSynthesizer::new(&layout, "{{ artifact_id }}|{{ version }}");
        let mut coordinate = coordinate();
        coordinate.artifact = "a&b".into();
        coordinate.version = "<1>".into();

        assert_eq!(synthesizer.render(&coordinate).unwrap(), "a&b|<1>");
    }
}
