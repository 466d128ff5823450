//! sfdotenv — a dotenv loader with shell-style variable expansion and an
//! authenticated-encryption envelope.
//!
//! The core pipeline lives under [`core`]: bytes flow through the envelope
//! codec (passthrough or decrypt), the parser, and the post-processor
//! before landing in the caller's process environment. [`load`] is the
//! single entry point most callers need.
#[cfg(feature = "cli")]
pub mod cli;
#[cfg(feature = "cli")]
pub mod commands;
pub mod core;
pub mod utils;

pub use crate::core::{load, LoadError, LoadOptions, LoadedEnv};
