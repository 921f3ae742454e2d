//! Directory index rendering
//!
//! Every directory of the published tree, the content root included, gets an
//! `index.html` listing its direct children: directories first, then files,
//! each group in byte-wise name order. Indices are re-rendered on every run
//! but only written when the rendered bytes differ from what is on disk, so
//! unchanged directories keep their modification times.

use std::cmp::Ordering;
use std::path::{Component, Path, PathBuf};
use tera::Context;
use tracing::{debug, info};

use crate::constants::{
    DEFAULT_DIRECTORY_ENTRY_TEMPLATE, DEFAULT_FILE_ENTRY_TEMPLATE, DEFAULT_INDEX_PAGE_TEMPLATE,
};
use crate::layout::RepoLayout;
use crate::util::{walk_dirs, write_if_changed, GenerationReport, RepoError, RepoResult};

/// Kind of a listed child
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum EntryKind {
    Directory,
    File,
}

/// One child of a listed directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub kind: EntryKind,
    pub name: String,
    /// Size in bytes; always 0 for directories
    pub size: u64,
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.kind
            .cmp(&other.kind)
            .then_with(|| self.name.cmp(&other.name))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Page and entry templates used for rendering
#[derive(Debug, Clone)]
pub struct IndexTemplates {
    pub page: String,
    pub directory_entry: String,
    pub file_entry: String,
}

impl Default for IndexTemplates {
    fn default() -> Self {
        Self {
            page: DEFAULT_INDEX_PAGE_TEMPLATE.to_string(),
            directory_entry: DEFAULT_DIRECTORY_ENTRY_TEMPLATE.to_string(),
            file_entry: DEFAULT_FILE_ENTRY_TEMPLATE.to_string(),
        }
    }
}

impl IndexTemplates {
    /// Built-in templates, with the page replaced by the content root's
    /// template file when one exists
    pub fn for_layout(layout: &RepoLayout) -> RepoResult<Self> {
        let mut templates = Self::default();
        let custom_page = layout.index_template_path();
        if custom_page.is_file() {
            debug!(path = %custom_page.display(), "using custom index page template");
            templates.page = fs_err::read_to_string(&custom_page)?;
        }
        Ok(templates)
    }
}

/// Renders `index.html` documents below a root directory
pub struct IndexRenderer {
    root: PathBuf,
    index_file_name: String,
    reserved: Vec<String>,
    templates: IndexTemplates,
}

impl IndexRenderer {
    pub fn new(
        root: PathBuf,
        index_file_name: String,
        reserved: Vec<String>,
        templates: IndexTemplates,
    ) -> Self {
        Self {
            root,
            index_file_name,
            reserved,
            templates,
        }
    }

    /// Renderer for a repository's content root
    pub fn for_layout(layout: &RepoLayout) -> RepoResult<Self> {
        Ok(Self::new(
            layout.content_root(),
            layout.config().index.file_name.clone(),
            layout.reserved_names(),
            IndexTemplates::for_layout(layout)?,
        ))
    }

    /// Logical path of `dir`: `/` for the root, otherwise `/a/b/`
    pub fn logical_path(&self, dir: &Path) -> RepoResult<String> {
        let relative = dir
            .strip_prefix(&self.root)
            .map_err(|_| RepoError::path_violation(dir, "directory is outside the content root"))?;

        let mut path = String::from("/");
        for component in relative.components() {
            match component {
                Component::Normal(segment) => {
                    let segment = segment.to_str().ok_or_else(|| {
                        RepoError::path_violation(dir, "path segment is not valid UTF-8")
                    })?;
                    path.push_str(segment);
                    path.push('/');
                }
                Component::CurDir => {}
                _ => return Err(RepoError::path_violation(dir, "unexpected path component")),
            }
        }
        Ok(path)
    }

    /// Direct children of `dir`, reserved names excluded, in listing order
    pub fn list_entries(&self, dir: &Path) -> RepoResult<Vec<Entry>> {
        let mut entries = Vec::new();
        for child in fs_err::read_dir(dir)? {
            let child = child?;
            let Some(name) = child.file_name().to_str().map(str::to_string) else {
                debug!(path = %child.path().display(), "skipping non UTF-8 name");
                continue;
            };
            if self.reserved.iter().any(|reserved| *reserved == name) {
                continue;
            }

            let file_type = child.file_type()?;
            let entry = if file_type.is_dir() {
                Entry {
                    kind: EntryKind::Directory,
                    name,
                    size: 0,
                }
            } else if file_type.is_file() {
                Entry {
                    kind: EntryKind::File,
                    name,
                    size: child.metadata()?.len(),
                }
            } else {
                continue;
            };
            entries.push(entry);
        }
        entries.sort();
        Ok(entries)
    }

    fn render_entry(&self, entry: &Entry) -> RepoResult<String> {
        let mut context = Context::new();
        context.insert("name", &entry.name);
        context.insert("size", &entry.size);
        let template = match entry.kind {
            EntryKind::Directory => &self.templates.directory_entry,
            EntryKind::File => &self.templates.file_entry,
        };
        Ok(tera::Tera::one_off(template, &context, false)?)
    }

    /// Render the index document of `dir` without touching the disk
    pub fn render(&self, dir: &Path) -> RepoResult<String> {
        let path = self.logical_path(dir)?;
        let entries = self
            .list_entries(dir)?
            .iter()
            .map(|entry| self.render_entry(entry))
            .collect::<RepoResult<String>>()?;

        let mut context = Context::new();
        context.insert("path", &path);
        context.insert("entries", &entries);
        Ok(tera::Tera::one_off(&self.templates.page, &context, false)?)
    }

    /// Render and store the index of `dir`; returns whether the file changed
    pub fn render_one(&self, dir: &Path) -> RepoResult<bool> {
        let rendered = self.render(dir)?;
        let index_path = dir.join(&self.index_file_name);
        let written = write_if_changed(&index_path, rendered.as_bytes())?;
        if written {
            info!(path = %index_path.display(), "index updated");
        }
        Ok(written)
    }

    /// Render the root and every directory beneath it
    pub fn render_all(&self) -> RepoResult<GenerationReport> {
        let mut report = GenerationReport::default();
        let mut dirs = vec![self.root.clone()];
        dirs.extend(walk_dirs(&self.root)?);

        for dir in dirs {
            if self.render_one(&dir)? {
                report.written += 1;
            } else {
                report.unchanged += 1;
            }
        }

        info!(
            written = report.written,
            unchanged = report.unchanged,
            "index rendering complete"
        );
        Ok(report)
    }
}
