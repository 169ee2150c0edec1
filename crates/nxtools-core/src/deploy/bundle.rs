//! Plugin bundle extraction
//!
//! Bundles are zip archives produced by the plugin build. They are unpacked
//! straight into the Nexus plugin repository.

use std::fs::File;
use std::path::{Path, PathBuf};

use crate::error::{NxError, Result};

/// Extract the zip archive at `archive` into `dest`.
///
/// Entries whose paths would escape `dest` are skipped. Returns the paths
/// of the extracted files.
pub fn extract_bundle(archive: &Path, dest: &Path) -> Result<Vec<PathBuf>> {
    let failed = |reason: String| NxError::ExtractFailed {
        archive: archive.to_path_buf(),
        dest: dest.to_path_buf(),
        reason,
    };

    let file = File::open(archive).map_err(|e| failed(e.to_string()))?;
    let mut zip = zip::ZipArchive::new(file).map_err(|e| failed(e.to_string()))?;

    std::fs::create_dir_all(dest)
        .map_err(|e| failed(format!("failed to create {}: {e}", dest.display())))?;

    let mut extracted = Vec::new();
    for i in 0..zip.len() {
        let mut entry = zip
            .by_index(i)
            .map_err(|e| failed(format!("failed to read entry {i}: {e}")))?;

        let outpath = match entry.enclosed_name() {
            Some(path) => dest.join(path),
            None => continue,
        };

        if entry.is_dir() {
            std::fs::create_dir_all(&outpath)
                .map_err(|e| failed(format!("failed to create {}: {e}", outpath.display())))?;
            continue;
        }

        if let Some(parent) = outpath.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| failed(format!("failed to create {}: {e}", parent.display())))?;
        }

        let mut outfile = File::create(&outpath)
            .map_err(|e| failed(format!("failed to create {}: {e}", outpath.display())))?;
        std::io::copy(&mut entry, &mut outfile)
            .map_err(|e| failed(format!("failed to write {}: {e}", outpath.display())))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if let Some(mode) = entry.unix_mode() {
                std::fs::set_permissions(&outpath, std::fs::Permissions::from_mode(mode)).ok();
            }
        }

        extracted.push(outpath);
    }

    Ok(extracted)
}
