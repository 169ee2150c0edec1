//! Error types and the failure-site exit code table.
//!
//! Every fatal condition carries the [`FailureSite`] it happened at. Scripts
//! driving `nxtools` branch on the process exit code, so the mapping in
//! [`FailureSite::exit_code`] is part of the public contract and must not be
//! renumbered.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, NxError>;

/// Where in a run a failure happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureSite {
    /// `pom.xml` is missing from a module directory.
    MissingDescriptor,
    /// `pom.xml` exists but lacks an artifact id or any version.
    InvalidDescriptor,
    /// The configuration file exists but cannot be read or parsed.
    InvalidConfig,
    /// Maven failed during `install`.
    InstallBuild,
    /// Maven failed during `deploy`.
    DeployBuild,
    /// An old install or plugin directory could not be removed.
    Remove,
    /// A distribution unpack step or plugin bundle extraction failed.
    Unpack,
    /// A library artifact could not be copied into the extension directory.
    CopyLibrary,
    /// A version reference file could not be rewritten.
    AdjustVersion,
    /// The service wrapper failed to start (or restart) Nexus.
    StartService,
    /// The service wrapper failed to stop Nexus.
    StopService,
}

impl FailureSite {
    pub fn exit_code(self) -> u8 {
        match self {
            FailureSite::MissingDescriptor => 1,
            FailureSite::DeployBuild => 1,
            FailureSite::Remove => 2,
            FailureSite::Unpack => 3,
            FailureSite::StartService => 4,
            FailureSite::StopService => 5,
            FailureSite::InvalidDescriptor => 6,
            FailureSite::CopyLibrary => 7,
            FailureSite::AdjustVersion => 8,
            FailureSite::InvalidConfig => 9,
            // -1 as seen by the invoking shell
            FailureSite::InstallBuild => 255,
        }
    }
}

/// Main error type for nxtools operations
#[derive(Error, Debug)]
pub enum NxError {
    #[error("Cannot read POM: '{}'", .path.display())]
    DescriptorMissing { path: PathBuf },

    #[error("Invalid POM '{}': {reason}", .path.display())]
    DescriptorInvalid { path: PathBuf, reason: String },

    #[error("Invalid configuration file '{}': {reason}", .path.display())]
    ConfigInvalid { path: PathBuf, reason: String },

    #[error("Command failed ({}): {command}", describe_status(.status))]
    CommandFailed {
        site: FailureSite,
        command: String,
        status: Option<i32>,
    },

    #[error("Empty command configured")]
    EmptyCommand { site: FailureSite },

    #[error("Failed to launch command: {command}")]
    CommandSpawn {
        site: FailureSite,
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to remove '{}'", .path.display())]
    RemoveFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to extract '{}' into '{}': {reason}", .archive.display(), .dest.display())]
    ExtractFailed {
        archive: PathBuf,
        dest: PathBuf,
        reason: String,
    },

    #[error("Failed to copy '{}' to '{}'", .from.display(), .to.display())]
    CopyFailed {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to adjust versions in '{}'", .path.display())]
    AdjustVersionFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl NxError {
    pub fn site(&self) -> FailureSite {
        match self {
            NxError::DescriptorMissing { .. } => FailureSite::MissingDescriptor,
            NxError::DescriptorInvalid { .. } => FailureSite::InvalidDescriptor,
            NxError::ConfigInvalid { .. } => FailureSite::InvalidConfig,
            NxError::CommandFailed { site, .. }
            | NxError::CommandSpawn { site, .. }
            | NxError::EmptyCommand { site } => *site,
            NxError::RemoveFailed { .. } => FailureSite::Remove,
            NxError::ExtractFailed { .. } => FailureSite::Unpack,
            NxError::CopyFailed { .. } => FailureSite::CopyLibrary,
            NxError::AdjustVersionFailed { .. } => FailureSite::AdjustVersion,
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.site().exit_code()
    }
}

fn describe_status(status: &Option<i32>) -> String {
    match status {
        Some(code) => format!("exit status {code}"),
        None => "terminated by signal".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_match_script_contract() {
        assert_eq!(FailureSite::MissingDescriptor.exit_code(), 1);
        assert_eq!(FailureSite::InstallBuild.exit_code(), 255);
        assert_eq!(FailureSite::Remove.exit_code(), 2);
        assert_eq!(FailureSite::Unpack.exit_code(), 3);
        assert_eq!(FailureSite::StartService.exit_code(), 4);
        assert_eq!(FailureSite::StopService.exit_code(), 5);
        assert_eq!(FailureSite::DeployBuild.exit_code(), 1);
    }

    #[test]
    fn command_failure_uses_its_site() {
        let err = NxError::CommandFailed {
            site: FailureSite::StopService,
            command: "nexus stop".to_string(),
            status: Some(1),
        };
        assert_eq!(err.exit_code(), 5);
        assert_eq!(err.to_string(), "Command failed (exit status 1): nexus stop");
    }

    #[test]
    fn extraction_failure_is_an_unpack_failure() {
        let err = NxError::ExtractFailed {
            archive: PathBuf::from("a.zip"),
            dest: PathBuf::from("out"),
            reason: "bad header".to_string(),
        };
        assert_eq!(err.site(), FailureSite::Unpack);
    }
}
