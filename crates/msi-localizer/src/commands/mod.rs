//! CLI command implementations.

mod common;
mod package;

pub use common::load_config;
pub use package::{PackageArgs, run_package};
