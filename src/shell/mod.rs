//! Subprocess execution.

pub mod command;
pub mod platform;

pub use command::{
    display_command, execute, execute_quiet, CommandOptions, CommandResult, OutputRouting,
    OutputTarget,
};
pub use platform::is_ci;
