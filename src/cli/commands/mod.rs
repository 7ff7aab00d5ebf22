//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! Commands are dispatched via [`CommandDispatcher`], which resolves
//! settings once and hands every command the same [`Engine`](crate::engine::Engine).

pub mod completions;
pub mod core_version;
pub mod deps;
pub mod dispatcher;
pub mod info;
pub mod install;
pub mod list;
pub mod registered;
pub mod uninstall;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};
