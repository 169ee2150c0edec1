//! nxtools Core Library
//!
//! Deployment and installation helpers for the Nexus repository manager and
//! the Xaven distribution: configuration resolution, Maven descriptor
//! reading, staged installs and plugin deployment.

pub mod config;
pub mod context;
pub mod deploy;
pub mod descriptor;
pub mod error;
pub mod fs;
pub mod install;
pub mod process;
pub mod service;

pub use error::{FailureSite, NxError, Result};

