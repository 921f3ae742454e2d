//! mavenpages
//!
//! Maintains the static metadata overlay of a Maven-style repository served
//! as plain files: descriptors for artifact directories, checksum sidecars
//! for tracked files, and a browsable `index.html` in every directory. Every
//! step is idempotent and safe to re-run.

#![warn(missing_docs)]
#![warn(clippy::all)]

// Configuration and layout
pub mod config;
pub mod constants;
pub mod layout;
pub mod util;

// Generation pipeline
pub mod checksum;
pub mod coordinate;
pub mod descriptor;
pub mod index;

// Inverse operations
pub mod cleanup;

// Orchestration
pub mod cli;
pub mod logging;
pub mod preflight;
pub mod tasks;

// Re-exports for convenience
pub use checksum::{Algorithm, ChecksumGenerator};
pub use config::RepoConfig;
pub use coordinate::{ArtifactCoordinate, CoordinateResolver};
pub use descriptor::DescriptorSynthesizer;
pub use index::IndexRenderer;
pub use layout::RepoLayout;
pub use tasks::TaskRegistry;
pub use util::{GenerationReport, RepoError, RepoResult};

/// Tool version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
