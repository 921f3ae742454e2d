//! Checksum sidecar generation
//!
//! Every tracked file (package archives, descriptors, metadata documents)
//! gets one `<file>.<algorithm>` sidecar per configured algorithm holding the
//! lowercase hex digest of its bytes, with no trailing newline.
//!
//! Sidecars are append-only: once one exists it is never recomputed, even if
//! the file it describes changes afterwards.

use serde::{Deserialize, Serialize};
use sha1::Sha1;
use sha2::{Digest, Sha256, Sha512};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, info};

use crate::util::{has_extension, walk_files, write_if_changed, GenerationReport, RepoError, RepoResult};

/// Supported digest algorithms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    Md5,
    Sha1,
    Sha256,
    Sha512,
}

impl Algorithm {
    /// All algorithms, in the order sidecars are written
    pub const ALL: [Algorithm; 4] = [Self::Md5, Self::Sha1, Self::Sha256, Self::Sha512];

    /// Sidecar extension, also the algorithm's configuration name
    pub fn extension(self) -> &'static str {
        match self {
            Self::Md5 => "md5",
            Self::Sha1 => "sha1",
            Self::Sha256 => "sha256",
            Self::Sha512 => "sha512",
        }
    }

    /// Lowercase hex digest of `data`
    pub fn digest_hex(self, data: &[u8]) -> String {
        match self {
            Self::Md5 => format!("{:x}", md5::compute(data)),
            Self::Sha1 => hex::encode(Sha1::digest(data)),
            Self::Sha256 => hex::encode(Sha256::digest(data)),
            Self::Sha512 => hex::encode(Sha512::digest(data)),
        }
    }

    /// Path of the sidecar for `file`: the file name with `.<algorithm>` appended
    pub fn sidecar_path(self, file: &Path) -> PathBuf {
        let mut name = file.as_os_str().to_os_string();
        name.push(".");
        name.push(self.extension());
        PathBuf::from(name)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for Algorithm {
    type Err = RepoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|algorithm| algorithm.extension().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| RepoError::InvalidArgument(format!("unknown checksum algorithm '{s}'")))
    }
}

/// Writes missing checksum sidecars beneath a root directory
pub struct ChecksumGenerator<'a> {
    root: &'a Path,
    tracked_extensions: Vec<&'a str>,
    algorithms: &'a [Algorithm],
}

impl<'a> ChecksumGenerator<'a> {
    /// Create a generator for the files under `root`
    pub fn new(root: &'a Path, tracked_extensions: &[&'a str], algorithms: &'a [Algorithm]) -> Self {
        Self {
            root,
            tracked_extensions: tracked_extensions.to_vec(),
            algorithms,
        }
    }

    fn is_tracked(&self, path: &Path) -> bool {
        self.tracked_extensions
            .iter()
            .any(|extension| has_extension(path, extension))
    }

    /// Generate every missing sidecar under the root
    pub fn generate(&self) -> RepoResult<GenerationReport> {
        let mut report = GenerationReport::default();

        for file in walk_files(self.root)?.into_iter().filter(|f| self.is_tracked(f)) {
            report.absorb(self.generate_for_file(&file)?);
        }

        info!(
            root = %self.root.display(),
            written = report.written,
            unchanged = report.unchanged,
            "checksum generation complete"
        );
        Ok(report)
    }

    /// Generate the missing sidecars of a single file.
    ///
    /// The file is read at most once, and only if some sidecar is missing.
    pub fn generate_for_file(&self, file: &Path) -> RepoResult<GenerationReport> {
        let mut report = GenerationReport::default();
        let mut content: Option<Vec<u8>> = None;

        for &algorithm in self.algorithms {
            let sidecar = algorithm.sidecar_path(file);
            if sidecar.exists() {
                debug!(path = %sidecar.display(), "checksum already present");
                report.unchanged += 1;
                continue;
            }

            if content.is_none() {
                content = Some(fs_err::read(file)?);
            }
            let digest = algorithm.digest_hex(content.as_deref().unwrap_or_default());
            write_if_changed(&sidecar, digest.as_bytes())?;
            info!(path = %sidecar.display(), %algorithm, "checksum written");
            report.written += 1;
        }

        Ok(report)
    }
}
