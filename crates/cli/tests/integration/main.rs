//! CLI integration tests for the extras commands.

mod common;
mod install_tests;
mod list_tests;
mod uninstall_tests;
