//! Terminal front-end for the CareSync client.

pub mod args;
pub mod commands;

pub use args::{parse_args, Command};
pub use commands::run;
