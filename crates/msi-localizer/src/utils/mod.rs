//! Utility functions shared across the CLI.

pub mod ui;
