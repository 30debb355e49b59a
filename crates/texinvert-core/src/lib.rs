//! texinvert core library
//!
//! This crate provides the error type, batch/report types and logging
//! helpers shared by the texinvert library and CLI.

pub mod error;
pub mod logging;
pub mod types;

pub use error::{Error, Result, ResultExt};
pub use types::*;
