use crate::core::CliError;
use msi_localizer_config::{LocaleEntry, PackagingConfig};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Locations of the base and master packages inside a build directory.
///
/// ```text
/// <build_dir>/<base_culture>/<package_name>     input
/// <build_dir>/<master_dir_name>/<package_name>  output
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BuildLayout {
    /// Absolute build output directory.
    pub build_dir: PathBuf,
    /// Name of the base culture directory (e.g. "en-us").
    pub base_culture: String,
    /// Name of the master directory (e.g. "Master").
    pub master_dir_name: String,
    /// File name of the installer package.
    pub package_name: String,
}

impl BuildLayout {
    /// Create a layout for `build_dir`, made absolute against the current directory.
    pub fn new(build_dir: &Path, config: &PackagingConfig) -> Result<Self, CliError> {
        Ok(Self {
            build_dir: std::path::absolute(build_dir)?,
            base_culture: config.base_culture.clone(),
            master_dir_name: config.master_dir_name.clone(),
            package_name: config.package_name.clone(),
        })
    }

    pub fn base_dir(&self) -> PathBuf {
        self.build_dir.join(&self.base_culture)
    }

    pub fn master_dir(&self) -> PathBuf {
        self.build_dir.join(&self.master_dir_name)
    }

    pub fn base_package(&self) -> PathBuf {
        self.base_dir().join(&self.package_name)
    }

    pub fn master_package(&self) -> PathBuf {
        self.master_dir().join(&self.package_name)
    }
}

/// Result of a complete packaging run.
#[derive(Clone, Debug)]
pub struct PackageSummary {
    /// The localized master package.
    pub master_package: PathBuf,
    /// Locales applied, in invocation order.
    pub applied: Vec<LocaleEntry>,
    /// Wall time of the whole run.
    pub duration: Duration,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_paths() {
        let config = PackagingConfig::default();
        let layout = BuildLayout::new(Path::new("/out/installer"), &config).unwrap();

        assert_eq!(layout.base_dir(), PathBuf::from("/out/installer/en-us"));
        assert_eq!(layout.master_dir(), PathBuf::from("/out/installer/Master"));
        assert_eq!(
            layout.base_package(),
            PathBuf::from("/out/installer/en-us/UnrealDatasmithMaxExporter.msi")
        );
        assert_eq!(
            layout.master_package(),
            PathBuf::from("/out/installer/Master/UnrealDatasmithMaxExporter.msi")
        );
    }

    #[test]
    fn test_layout_relative_build_dir_is_absolute() {
        let config = PackagingConfig::default();
        let layout = BuildLayout::new(Path::new("installer"), &config).unwrap();

        assert!(layout.build_dir.is_absolute());
        assert!(layout.build_dir.ends_with("installer"));
    }
}
