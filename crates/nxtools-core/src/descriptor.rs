//! Maven artifact descriptors read from `pom.xml`.

use std::path::{Path, PathBuf};

use roxmltree::{Document, Node};

use crate::error::{NxError, Result};

pub const DESCRIPTOR_FILE: &str = "pom.xml";
pub const BUILD_OUTPUT_DIR: &str = "target";

/// Suffix of a plain library build output.
pub const LIBRARY_SUFFIX: &str = ".jar";
/// Suffix of a packaged distribution archive.
pub const DISTRIBUTION_SUFFIX: &str = "-bin.tar.gz";
/// Suffix of a Nexus plugin bundle.
pub const PLUGIN_BUNDLE_SUFFIX: &str = "-bundle.zip";

/// Identity and build output location of one Maven module
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactDescriptor {
    pub version: String,
    /// `{artifactId}-{version}`
    pub name: String,
    /// `{directory}/target/{name}{suffix}`
    pub output_path: PathBuf,
}

impl ArtifactDescriptor {
    /// Read the descriptor of the module in `directory`.
    ///
    /// The version is the project's own `<version>`, or the `<parent>`
    /// version when the project inherits it.
    pub fn read(directory: &Path, suffix: &str) -> Result<Self> {
        let pom = directory.join(DESCRIPTOR_FILE);
        if !pom.is_file() {
            return Err(NxError::DescriptorMissing { path: pom });
        }

        let content = std::fs::read_to_string(&pom).map_err(|e| NxError::DescriptorInvalid {
            path: pom.clone(),
            reason: e.to_string(),
        })?;

        let (artifact_id, version) =
            parse_coordinates(&content).map_err(|reason| NxError::DescriptorInvalid {
                path: pom.clone(),
                reason,
            })?;

        Ok(Self::from_coordinates(directory, &artifact_id, &version, suffix))
    }

    /// Read with the default library suffix.
    pub fn read_library(directory: &Path) -> Result<Self> {
        Self::read(directory, LIBRARY_SUFFIX)
    }

    pub fn from_coordinates(
        directory: &Path,
        artifact_id: &str,
        version: &str,
        suffix: &str,
    ) -> Self {
        let name = format!("{artifact_id}-{version}");
        let output_path = directory
            .join(BUILD_OUTPUT_DIR)
            .join(format!("{name}{suffix}"));
        Self {
            version: version.to_string(),
            name,
            output_path,
        }
    }
}

/// Extract `(artifactId, version)` from POM content.
fn parse_coordinates(content: &str) -> std::result::Result<(String, String), String> {
    let doc = Document::parse(content).map_err(|e| format!("malformed XML: {e}"))?;

    let root = doc.root_element();
    if !root.has_tag_name("project") {
        return Err(format!(
            "root element is <{}>, expected <project>",
            root.tag_name().name()
        ));
    }

    let artifact_id =
        child_text(root, "artifactId").ok_or_else(|| "no <artifactId> declared".to_string())?;

    let version = child_text(root, "version")
        .or_else(|| {
            root.children()
                .find(|n| n.has_tag_name("parent"))
                .and_then(|parent| child_text(parent, "version"))
        })
        .ok_or_else(|| "no <version> declared and no <parent><version> to inherit".to_string())?;

    Ok((artifact_id, version))
}

/// Trimmed text of the first direct child named `name`; empty text counts as absent.
fn child_text(node: Node<'_, '_>, name: &str) -> Option<String> {
    node.children()
        .find(|n| n.has_tag_name(name))
        .and_then(|n| n.text())
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}
