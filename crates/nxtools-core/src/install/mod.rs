//! Xaven distribution install: rebuild, unpack, stage libraries, fix versions.

pub mod orchestrator;
pub mod plan;
pub mod versions;

pub use orchestrator::{InstallReport, Installer};
pub use plan::{InstallPlan, InstallTarget};
pub use versions::{adjust_versions, replace_markers};
