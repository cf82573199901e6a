//! Stamp out a new entity from a boilerplate template tree.
//!
//! Every case variant of the template's singular and plural names is
//! rewritten in file paths and file contents, then the renamed copies are
//! written next to the template.

pub mod config;
pub mod core;
pub mod fs;
pub mod names;
pub mod pipeline;
pub mod refactor;
pub mod validate;

pub use crate::core::{BoilerError, Result};
