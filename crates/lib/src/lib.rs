//! wifi-lib: installing the extra files that ship with wifi
//!
//! This crate provides the extras subsystem used by the `wifi` CLI:
//! - `ExtrasRegistry`: which files go into which system directories
//! - `ExtraDeclaration`: the authoring forms of a single extra file
//! - `install` / `uninstall`: the executors that copy and remove them
//! - `config`: locating the registry and the directory sources live in

pub mod config;
pub mod consts;
pub mod extras;
pub mod platform;
