//! Command-line interface module.

mod args;
pub mod check;
pub mod common;
pub mod init;
pub mod render;
pub mod serve;

pub use args::{Cli, Commands, TargetArgs, TextKind};
