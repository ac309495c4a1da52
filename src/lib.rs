//! prj
//!
//! Discovers git repositories under tracked parent folders and keeps a
//! queryable metadata record for each: tech stack, inferred type, activity
//! status, commit summary, contributors, deployment signals, reference docs
//! and TODO counts.
pub mod cli;
pub mod config;
pub mod detectors;
pub mod discovery;
pub mod error;
pub mod git;
pub mod logging;
pub mod output;
pub mod project;
pub mod query;
pub mod scan;
pub mod store;
pub mod utils;

pub use error::{Error, Result};
pub use project::{Project, Status};
