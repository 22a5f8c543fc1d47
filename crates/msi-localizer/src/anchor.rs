//! Locating the anchor root the transform tool path is resolved against.

use crate::core::{AnchorDepthError, AnchorMarkerMissingError, CliError};
use std::path::{Path, PathBuf};

/// Where the anchor root comes from, in order of precedence.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RootSource {
    /// `--root` or `MSI_LOCALIZER_ROOT`.
    Explicit(PathBuf),
    /// `anchor_root` in `localize.toml`.
    Configured(PathBuf),
    /// Derived from the installed executable.
    Executable(PathBuf),
}

impl RootSource {
    /// Pick the highest-precedence source available.
    pub fn select(
        explicit: Option<PathBuf>,
        configured: Option<PathBuf>,
    ) -> Result<Self, CliError> {
        if let Some(path) = explicit {
            return Ok(Self::Explicit(path));
        }
        if let Some(path) = configured {
            return Ok(Self::Configured(path));
        }
        Ok(Self::Executable(std::env::current_exe()?))
    }
}

/// Resolve the anchor root and check that it holds `marker`.
///
/// An executable source is ascended `depth` levels; explicit and configured
/// roots are used as given. The returned root is canonical.
pub fn resolve_anchor(
    source: &RootSource,
    depth: usize,
    marker: &str,
) -> Result<PathBuf, CliError> {
    let root = match source {
        RootSource::Explicit(path) | RootSource::Configured(path) => path.clone(),
        RootSource::Executable(exe) => ascend(exe, depth)?,
    };
    let root = std::path::absolute(&root)?;

    if !root.join(marker).is_dir() {
        return Err(AnchorMarkerMissingError {
            root,
            marker: marker.to_string(),
        }
        .into());
    }

    let root = fs_err::canonicalize(&root)?;
    tracing::debug!(root = %root.display(), ?source, "resolved anchor root");
    Ok(root)
}

fn ascend(path: &Path, depth: usize) -> Result<PathBuf, AnchorDepthError> {
    path.ancestors()
        .nth(depth)
        .filter(|ancestor| !ancestor.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .ok_or_else(|| AnchorDepthError {
            path: path.to_path_buf(),
            depth,
        })
}
