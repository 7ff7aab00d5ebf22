//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;

use crate::build::BuildGenerator;

/// sst-elements - Install and manage SST simulator elements.
#[derive(Debug, Parser)]
#[command(name = "sst-elements")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Stream tool output and show every step
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only print results and errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Clone, build and register an element with its dependencies
    Install(InstallArgs),

    /// Remove an element's checkout and registration
    Uninstall(UninstallArgs),

    /// List every element in the catalog
    List(ListArgs),

    /// List registered elements, or check one
    Registered(RegisteredArgs),

    /// Show an element's README
    Info(ElementArgs),

    /// Show an element's declared dependencies
    Deps(ElementArgs),

    /// List the test scripts of a registered element
    Tests(ElementArgs),

    /// Print the simulator core version
    CoreVersion,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `install` command.
#[derive(Debug, Clone, clap::Args)]
pub struct InstallArgs {
    /// Element to install
    pub element: String,

    /// Re-clone elements that are already present
    #[arg(short, long)]
    pub force: bool,

    /// Branch to clone for the requested element
    #[arg(short, long)]
    pub branch: Option<String>,

    /// Commit to reset the requested element to
    #[arg(short, long, value_name = "SHA")]
    pub commit: Option<String>,

    /// Build system CMake generates
    #[arg(short, long, value_enum, default_value_t = BuildGenerator::Makefile)]
    pub generator: BuildGenerator,

    /// Parallel build jobs
    #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u16).range(1..))]
    pub jobs: u16,

    /// Write tool output to element-logs/<ELEMENT>.out and .err
    #[arg(long)]
    pub logs: bool,

    /// Stop at the first element that fails to build
    #[arg(long)]
    pub fail_fast: bool,
}

/// Arguments for the `uninstall` command.
#[derive(Debug, Clone, clap::Args)]
pub struct UninstallArgs {
    /// Element to remove
    pub element: String,

    /// Also remove registered elements that depend on it
    #[arg(long)]
    pub clean: bool,

    /// Keep removing the rest when a directory is missing
    #[arg(long)]
    pub keep_going: bool,
}

/// Arguments for the `list` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ListArgs {
    /// Show a table with registration status
    #[arg(short, long)]
    pub status: bool,
}

/// Arguments for the `registered` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct RegisteredArgs {
    /// Element to check; exits 1 when it is not registered
    pub element: Option<String>,
}

/// A single element argument.
#[derive(Debug, Clone, clap::Args)]
pub struct ElementArgs {
    /// Element name
    pub element: String,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn install_defaults() {
        let cli = Cli::try_parse_from(["sst-elements", "install", "hermes"]).unwrap();
        let Commands::Install(args) = cli.command else {
            panic!("expected install");
        };
        assert_eq!(args.element, "hermes");
        assert!(!args.force);
        assert_eq!(args.generator, BuildGenerator::Makefile);
        assert_eq!(args.jobs, 1);
        assert!(!args.logs);
    }

    #[test]
    fn install_with_all_flags() {
        let cli = Cli::try_parse_from([
            "sst-elements",
            "install",
            "hermes",
            "-f",
            "-b",
            "devel",
            "-c",
            "abc1234",
            "-g",
            "ninja",
            "-j",
            "8",
            "--logs",
        ])
        .unwrap();
        let Commands::Install(args) = cli.command else {
            panic!("expected install");
        };
        assert!(args.force);
        assert_eq!(args.branch.as_deref(), Some("devel"));
        assert_eq!(args.commit.as_deref(), Some("abc1234"));
        assert_eq!(args.generator, BuildGenerator::Ninja);
        assert_eq!(args.jobs, 8);
        assert!(args.logs);
    }

    #[test]
    fn zero_jobs_rejected() {
        assert!(Cli::try_parse_from(["sst-elements", "install", "hermes", "-j", "0"]).is_err());
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["sst-elements", "list", "--quiet"]).unwrap();
        assert!(cli.quiet);
        assert!(matches!(cli.command, Commands::List(_)));
    }

    #[test]
    fn uninstall_clean() {
        let cli = Cli::try_parse_from(["sst-elements", "uninstall", "thornhill", "--clean"]).unwrap();
        let Commands::Uninstall(args) = cli.command else {
            panic!("expected uninstall");
        };
        assert!(args.clean);
        assert!(!args.keep_going);
    }

    #[test]
    fn subcommand_is_required() {
        assert!(Cli::try_parse_from(["sst-elements"]).is_err());
    }
}
