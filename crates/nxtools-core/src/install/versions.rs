//! Stale version marker substitution in external reference files.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{NxError, Result};
use crate::fs::write_atomic;

/// Replace every occurrence of each stale marker with `version`, marker by marker.
///
/// Works on raw bytes, so reference files need not be valid UTF-8.
pub fn replace_markers(contents: &[u8], stale_versions: &[String], version: &str) -> Vec<u8> {
    stale_versions
        .iter()
        .filter(|marker| !marker.is_empty())
        .fold(contents.to_vec(), |acc, marker| {
            replace_bytes(&acc, marker.as_bytes(), version.as_bytes())
        })
}

fn replace_bytes(haystack: &[u8], needle: &[u8], replacement: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(haystack.len());
    let mut rest = haystack;
    while let Some(pos) = rest.windows(needle.len()).position(|w| w == needle) {
        out.extend_from_slice(&rest[..pos]);
        out.extend_from_slice(replacement);
        rest = &rest[pos + needle.len()..];
    }
    out.extend_from_slice(rest);
    out
}

/// Rewrite each reference file with stale markers replaced by `version`.
///
/// Returns the files whose contents changed.
pub fn adjust_versions(
    files: &[PathBuf],
    stale_versions: &[String],
    version: &str,
) -> Result<Vec<PathBuf>> {
    let mut changed = Vec::new();
    for file in files {
        info!("Adjusting version to {} for {}...", version, file.display());
        if adjust_file(file, stale_versions, version)? {
            changed.push(file.clone());
        } else {
            debug!("no stale versions in {}", file.display());
        }
    }
    Ok(changed)
}

fn adjust_file(path: &Path, stale_versions: &[String], version: &str) -> Result<bool> {
    let failed = |source| NxError::AdjustVersionFailed {
        path: path.to_path_buf(),
        source,
    };

    let contents = std::fs::read(path).map_err(failed)?;
    let updated = replace_markers(&contents, stale_versions, version);
    if updated == contents {
        return Ok(false);
    }
    write_atomic(path, &updated).map_err(failed)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn markers(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn replaces_every_occurrence() {
        let script = b"CP=$XAVEN/lib/api-1.0-SNAPSHOT.jar:$XAVEN/lib/events-1.0-SNAPSHOT.jar\n";
        let out = replace_markers(script, &markers(&["1.0-SNAPSHOT"]), "2.0");
        assert_eq!(out, b"CP=$XAVEN/lib/api-2.0.jar:$XAVEN/lib/events-2.0.jar\n");
    }

    #[test]
    fn replaces_each_marker_in_turn() {
        let stale = markers(&["0.9", "1.0-SNAPSHOT"]);
        let out = replace_markers(b"a 0.9 b 1.0-SNAPSHOT", &stale, "2.0");
        assert_eq!(out, b"a 2.0 b 2.0");
    }

    #[test]
    fn empty_markers_are_ignored() {
        let out = replace_markers(b"abc", &markers(&[""]), "2.0");
        assert_eq!(out, b"abc");
    }

    #[test]
    fn adjust_rewrites_files_in_place() {
        let temp = TempDir::new().unwrap();
        let xvn = temp.path().join("xvn");
        let debug = temp.path().join("xvnDebug");
        std::fs::write(&xvn, "exec maven-1.0-SNAPSHOT/bin/mvn \"$@\"\n").unwrap();
        std::fs::write(&debug, "nothing to see\n").unwrap();

        let changed = adjust_versions(
            &[xvn.clone(), debug.clone()],
            &markers(&["1.0-SNAPSHOT"]),
            "2.0",
        )
        .unwrap();

        assert_eq!(changed, vec![xvn.clone()]);
        let contents = std::fs::read_to_string(&xvn).unwrap();
        assert!(contents.contains("maven-2.0"));
        assert!(!contents.contains("1.0-SNAPSHOT"));
        assert_eq!(std::fs::read_to_string(&debug).unwrap(), "nothing to see\n");
    }

    #[test]
    fn adjust_keeps_non_utf8_bytes() {
        let temp = TempDir::new().unwrap();
        let xvn = temp.path().join("xvn");
        std::fs::write(&xvn, b"# caf\xe9\n\xff 1.0-SNAPSHOT\n").unwrap();

        let changed = adjust_versions(&[xvn.clone()], &markers(&["1.0-SNAPSHOT"]), "2.0").unwrap();

        assert_eq!(changed, vec![xvn.clone()]);
        assert_eq!(std::fs::read(&xvn).unwrap(), b"# caf\xe9\n\xff 2.0\n");
    }

    #[test]
    fn missing_reference_file_is_fatal() {
        let temp = TempDir::new().unwrap();
        let err = adjust_versions(
            &[temp.path().join("missing")],
            &markers(&["1.0-SNAPSHOT"]),
            "2.0",
        )
        .unwrap_err();
        assert_eq!(err.exit_code(), 8);
    }
}
