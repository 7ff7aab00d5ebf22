//! sst-elements - Install, build and register SST simulator elements.
//!
//! Elements are listed in a catalog, cloned from their repositories, built
//! with CMake in dependency order and recorded with the simulator's
//! registration tool.
//!
//! # Modules
//!
//! - [`build`] - CMake configure and build steps
//! - [`catalog`] - Catalog loading and lookup
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Settings from environment and settings file
//! - [`engine`] - Install and uninstall orchestration
//! - [`error`] - Error types and result aliases
//! - [`fetch`] - HTTP and git fetchers
//! - [`info`] - READMEs, element tests and the core version
//! - [`registry`] - Registration database queries
//! - [`resolver`] - Dependency resolution into build plans
//! - [`shell`] - Subprocess execution
//! - [`ui`] - Status lines, spinners, and terminal output
//!
//! # Example
//!
//! ```
//! use sst_elements::catalog::Catalog;
//! use sst_elements::resolver::parse_manifest;
//!
//! let catalog = Catalog::parse(
//!     r#"{"hermes": {"url": "https://github.com/sst/hermes", "dep": ["thornhill"]}}"#,
//!     None,
//! )
//! .unwrap();
//! assert!(catalog.contains("hermes"));
//! assert_eq!(parse_manifest("thornhill miranda\n"), vec!["thornhill", "miranda"]);
//! ```

pub mod build;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod fetch;
pub mod info;
pub mod registry;
pub mod resolver;
pub mod shell;
pub mod ui;

pub use error::{ElementsError, Result};
