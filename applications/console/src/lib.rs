//! KFT operator console.
//!
//! Drives the admin and merchant portals from the command line with a
//! file-backed session.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
mod output;

pub use commands::Console;
pub use error::{ConsoleError, Result};
