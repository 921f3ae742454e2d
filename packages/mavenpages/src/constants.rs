//! Global constants for mavenpages
//!
//! Default names, extensions and templates used when no configuration file
//! overrides them.

// ============================================================================
// Repository Layout
// ============================================================================

/// Configuration file looked up at the repository root
pub const CONFIG_FILE_NAME: &str = "mavenpages.toml";

/// Published directory, relative to the repository root
pub const DEFAULT_CONTENT_ROOT: &str = "docs";

/// Canonical-name marker inside the content root (GitHub Pages custom domain)
pub const DEFAULT_CANONICAL_NAME_FILE: &str = "CNAME";

/// Robots-exclusion file inside the content root
pub const DEFAULT_ROBOTS_FILE: &str = "robots.txt";

/// Top-level files that identify the repository root
pub const DEFAULT_METADATA_FILES: &[&str] = &["README.md", "LICENSE", ".gitignore"];

// ============================================================================
// Tracked Extensions
// ============================================================================

/// Binary package archive
pub const DEFAULT_PACKAGE_EXTENSION: &str = "jar";

/// Descriptor (manifest) written next to each package
pub const DEFAULT_DESCRIPTOR_EXTENSION: &str = "pom";

/// Repository metadata documents
pub const DEFAULT_METADATA_EXTENSION: &str = "xml";

// ============================================================================
// Index Documents
// ============================================================================

/// Directory listing written to every directory
pub const DEFAULT_INDEX_FILE_NAME: &str = "index.html";

/// Optional page template in the content root
pub const DEFAULT_INDEX_TEMPLATE_NAME: &str = "index.template.html";

/// Stylesheet referenced by the listing page
pub const DEFAULT_INDEX_STYLESHEET_NAME: &str = "index.css";

/// Script referenced by the listing page
pub const DEFAULT_INDEX_SCRIPT_NAME: &str = "index.js";

// ============================================================================
// Templates
// ============================================================================

/// Descriptor written for every artifact-version directory that lacks one
pub const DEFAULT_DESCRIPTOR_TEMPLATE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<project xmlns="http://maven.apache.org/POM/4.0.0"
         xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"
         xsi:schemaLocation="http://maven.apache.org/POM/4.0.0 http://maven.apache.org/xsd/maven-4.0.0.xsd">
  <modelVersion>4.0.0</modelVersion>
  <groupId>{{ group_id }}</groupId>
  <artifactId>{{ artifact_id }}</artifactId>
  <version>{{ version }}</version>
</project>
"#;

/// Listing page; `path` is the logical path, `entries` the rendered children
pub const DEFAULT_INDEX_PAGE_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>Index of {{ path }}</title>
  <link rel="stylesheet" href="/index.css">
  <script src="/index.js" defer></script>
</head>
<body>
  <h1>Index of {{ path }}</h1>
  <ul class="listing">
{% if path != "/" %}    <li class="parent"><a href="../">../</a></li>
{% endif %}{{ entries }}  </ul>
</body>
</html>
"#;

/// Listing entry for a child directory
pub const DEFAULT_DIRECTORY_ENTRY_TEMPLATE: &str =
    "    <li class=\"directory\"><span class=\"marker\">&#128193;</span> <a href=\"{{ name }}/\">{{ name }}/</a></li>\n";

/// Listing entry for a child file
pub const DEFAULT_FILE_ENTRY_TEMPLATE: &str =
    "    <li class=\"file\"><span class=\"marker\">&#128196;</span> <a href=\"{{ name }}\">{{ name }}</a> <span class=\"size\">{{ size }} bytes</span></li>\n";
