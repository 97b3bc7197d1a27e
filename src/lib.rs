// src/lib.rs

#[macro_use]
mod macros;
#[macro_use]
pub mod logging;

pub mod config;
pub mod core;
pub mod error;
pub mod specs;
pub mod store;

pub mod file;
pub mod goalies;
pub mod progress;
pub mod runner;
pub mod schedule;
pub mod source;
pub mod status;

#[cfg(feature = "cli")]
pub mod cli;

pub use error::{OpsError, Result};
