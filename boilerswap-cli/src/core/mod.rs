pub mod error;
pub mod output;

pub use error::{BoilerError, Result};
pub use output::{OutputFormat, OutputWriter};
