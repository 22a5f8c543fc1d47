//! Packager error types using miette for Rust-style diagnostics.
//!
//! Every failure aborts the run. Each diagnostic names the check that failed
//! and, where it helps, what to do about it.

use miette::Diagnostic;
use msi_localizer_config::ConfigError;
use std::path::PathBuf;
use thiserror::Error;

/// Error when the base-culture installer package is not in the build directory.
#[derive(Debug, Diagnostic, Error)]
#[error("base installer package not found: {}", expected_path.display())]
#[diagnostic(
    code(msi_localizer::layout::base_missing),
    help("Build the '{culture}' installer first; its package is copied to create the master package")
)]
pub struct BasePackageMissingError {
    /// The path where the package was expected.
    pub expected_path: PathBuf,
    /// The base culture directory name.
    pub culture: String,
}

/// Error when the master package is absent right after copying it.
#[derive(Debug, Diagnostic, Error)]
#[error("master package not found after copy: {}", target.display())]
#[diagnostic(
    code(msi_localizer::layout::copy_failed),
    help("The copy of the base package into the master directory was expected to have succeeded")
)]
pub struct CopyVerificationError {
    /// The copy target.
    pub target: PathBuf,
}

/// Error when the anchor root lacks its marker directory.
#[derive(Debug, Diagnostic, Error)]
#[error("anchor root {} has no '{marker}' directory", root.display())]
#[diagnostic(
    code(msi_localizer::anchor::marker_missing),
    help("Pass --root (or set MSI_LOCALIZER_ROOT) to the directory that contains '{marker}'")
)]
pub struct AnchorMarkerMissingError {
    /// The directory that was resolved as the root.
    pub root: PathBuf,
    /// The marker subdirectory that was expected.
    pub marker: String,
}

/// Error when the executable sits fewer than `depth` levels below the filesystem root.
#[derive(Debug, Diagnostic, Error)]
#[error("cannot ascend {depth} level(s) from {}", path.display())]
#[diagnostic(
    code(msi_localizer::anchor::too_shallow),
    help("Lower anchor_depth in localize.toml or pass --root")
)]
pub struct AnchorDepthError {
    /// The path ascended from.
    pub path: PathBuf,
    /// The configured depth.
    pub depth: usize,
}

/// Error when the transform tool could not be started.
#[derive(Debug, Diagnostic, Error)]
#[error("failed to launch transform tool {} for '{culture}'", program.display())]
#[diagnostic(
    code(msi_localizer::transform::launch),
    help("Check --tool or tool_path in localize.toml")
)]
pub struct ToolLaunchError {
    /// The program that was spawned.
    pub program: PathBuf,
    /// The culture being applied.
    pub culture: String,
    /// The spawn error.
    #[source]
    pub source: std::io::Error,
}

/// Error when the transform tool exits unsuccessfully.
#[derive(Debug, Diagnostic, Error)]
#[error("transform tool failed for '{culture}' ({code}): {}", describe_exit(*exit_code))]
#[diagnostic(
    code(msi_localizer::transform::failed),
    help("Later locales were not applied; the master package keeps every transform applied before this one")
)]
pub struct TransformFailedError {
    /// The culture being applied.
    pub culture: String,
    /// Its LCID.
    pub code: u32,
    /// The tool's exit code, `None` when it was killed by a signal.
    pub exit_code: Option<i32>,
}

fn describe_exit(exit_code: Option<i32>) -> String {
    match exit_code {
        Some(code) => format!("exit code {code}"),
        None => "terminated by signal".to_string(),
    }
}

/// Failure of a single transform invocation.
#[derive(Debug, Diagnostic, Error)]
pub enum TransformError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Launch(#[from] ToolLaunchError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Failed(#[from] TransformFailedError),
}

/// Main error type for the packager.
#[derive(Debug, Diagnostic, Error)]
pub enum CliError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    BasePackageMissing(#[from] BasePackageMissingError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    CopyVerification(#[from] CopyVerificationError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    AnchorMarkerMissing(#[from] AnchorMarkerMissingError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    AnchorDepth(#[from] AnchorDepthError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Transform(#[from] TransformError),

    #[error("configuration error: {0}")]
    #[diagnostic(code(msi_localizer::config))]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    #[diagnostic(code(msi_localizer::io))]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    #[diagnostic(code(msi_localizer::other))]
    Other(String),
}

impl CliError {
    /// Returns the culture whose transform failed, if that is what went wrong.
    pub fn failed_culture(&self) -> Option<&str> {
        match self {
            CliError::Transform(TransformError::Failed(e)) => Some(e.culture.as_str()),
            CliError::Transform(TransformError::Launch(e)) => Some(e.culture.as_str()),
            _ => None,
        }
    }
}
