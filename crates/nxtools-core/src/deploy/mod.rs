//! Nexus plugin deployment: build, stop Nexus, replace plugin bundles, start Nexus.

pub mod bundle;
pub mod executor;

pub use bundle::extract_bundle;
pub use executor::{DeployReport, PluginDeployer};
