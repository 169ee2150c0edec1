//! YAML parser with helpful error messages

use std::path::Path;

use super::schema::ConfigFile;
use crate::error::{NxError, Result};

/// Parse the configuration file at `path`
pub fn parse_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).map_err(|e| NxError::ConfigInvalid {
        path: path.to_path_buf(),
        reason: format!("failed to read: {e}"),
    })?;

    parse_config_str(&content).map_err(|reason| NxError::ConfigInvalid {
        path: path.to_path_buf(),
        reason,
    })
}

/// Parse configuration content from a string
///
/// An empty document is a valid, empty configuration.
pub fn parse_config_str(content: &str) -> std::result::Result<ConfigFile, String> {
    if content.trim().is_empty() {
        return Ok(ConfigFile::default());
    }

    let config: ConfigFile =
        serde_yaml::from_str(content).map_err(|e| enhance_yaml_error(e, content))?;

    config.validate()?;

    Ok(config)
}

/// Enhance YAML parsing errors with the offending lines
fn enhance_yaml_error(error: serde_yaml::Error, content: &str) -> String {
    match error.location() {
        Some(location) => {
            let line_num = location.line();
            let context = get_line_context(content, line_num);
            format!(
                "YAML parsing error at line {}:\n{}\n\nError: {}",
                line_num, context, error
            )
        }
        None => format!("YAML parsing error: {error}"),
    }
}

/// Get context lines around an error
fn get_line_context(content: &str, line_num: usize) -> String {
    let lines: Vec<&str> = content.lines().collect();
    let start = line_num.saturating_sub(2).min(lines.len());
    let end = (line_num + 1).min(lines.len());

    lines[start..end]
        .iter()
        .enumerate()
        .map(|(i, line)| {
            let num = start + i + 1;
            let marker = if num == line_num { ">>>" } else { "   " };
            format!("{} {:4} | {}", marker, num, line)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
