//! Core types and errors shared by the packager and the CLI.

mod errors;
mod types;

pub use errors::*;
pub use types::*;
