//! Extra files installed alongside wifi.
//!
//! Extras are auxiliary files, such as shell completion scripts, that live
//! outside the package payload and are copied into system directories.
//!
//! # Flow
//!
//! The CLI builds an [`ExtrasRegistry`] and hands it to [`install`] or
//! [`uninstall`]. Both walk the registry in order and normalize each
//! declaration before acting on it. Install stops at the first copy or
//! mode failure; uninstall always processes every entry.
//!
//! # Submodules
//!
//! - [`normalize`] - declaration shapes to canonical entries
//! - [`registry`] - the ordered target/declaration table
//! - [`install`] - install executor
//! - [`uninstall`] - uninstall executor
//! - [`status`] - read-only listing
//! - [`fs`] - filesystem seam

pub mod fs;
pub mod install;
pub mod normalize;
pub mod registry;
pub mod status;
pub mod uninstall;
mod types;

pub use install::{InstallOptions, InstallRecord, InstallReport, install, install_with};
pub use registry::{ExtrasRegistry, RegistryError, TargetDir};
pub use status::{EntryStatus, status};
pub use types::*;
pub use uninstall::{UninstallRecord, UninstallReport, uninstall, uninstall_with};
