//! Configuration for `msi-localizer`.
//!
//! Every value the packager needs besides the build directory lives in
//! [`PackagingConfig`]. The defaults reproduce the Datasmith 3ds Max exporter
//! installer layout; a `localize.toml` file can override any of them.

mod locale;

pub use locale::{LocaleEntry, MAX_LCID, default_locales, parse_culture_name};

use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;
use unic_langid::LanguageIdentifierError;

/// File name looked up when no explicit configuration path is given.
pub const CONFIG_FILE_NAME: &str = "localize.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file not found.
    #[error("configuration file not found: {}", path.display())]
    NotFound {
        /// The path that was expected to hold the configuration.
        path: PathBuf,
    },
    /// Failed to read configuration file.
    #[error("Failed to read configuration file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse configuration file.
    #[error("Failed to parse configuration file: {0}")]
    ParseError(#[from] toml::de::Error),
    /// A culture name is not a language identifier.
    #[error("Invalid culture name '{name}'")]
    InvalidCultureName {
        /// The invalid culture name.
        name: String,
        /// The parsing error produced by `unic-langid`.
        #[source]
        source: LanguageIdentifierError,
    },
    /// A culture name parses but uses a shape the transform tool cannot take.
    #[error("Culture name '{name}' is not supported: {reason}")]
    UnsupportedCultureName {
        /// The culture name.
        name: String,
        /// Explanation of why it is not supported.
        reason: String,
    },
    /// A culture code is outside the LCID range.
    #[error("Culture '{name}' has invalid LCID {code}")]
    InvalidCultureCode { name: String, code: u32 },
    /// The same culture is listed twice.
    #[error("Culture '{name}' is listed more than once")]
    DuplicateCulture { name: String },
    /// The same LCID is listed twice.
    #[error("LCID {code} is listed more than once")]
    DuplicateCultureCode { code: u32 },
    /// No locale to localize into.
    #[error("The locale list is empty")]
    EmptyLocales,
    /// Any other inconsistent setting.
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Packaging settings.
///
/// Keys missing from `localize.toml` keep their default value.
#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PackagingConfig {
    /// File name of the installer package inside each culture directory.
    pub package_name: String,
    /// Culture directory holding the package the master copy is made from.
    pub base_culture: String,
    /// Name of the directory, sibling of the culture directories, receiving the master package.
    pub master_dir_name: String,
    /// Explicit anchor root. Takes precedence over deriving it from the executable location.
    /// A relative path is resolved against the directory of the configuration file.
    pub anchor_root: Option<PathBuf>,
    /// Number of ancestors between the installed executable and the anchor root.
    pub anchor_depth: usize,
    /// Subdirectory that must exist under the anchor root.
    pub anchor_marker: String,
    /// Transform tool, relative to the anchor root unless absolute.
    pub tool_path: PathBuf,
    /// Cultures to embed, in invocation order.
    pub locales: Vec<LocaleEntry>,
}

impl Default for PackagingConfig {
    fn default() -> Self {
        Self {
            package_name: "UnrealDatasmithMaxExporter.msi".to_string(),
            base_culture: "en-us".to_string(),
            master_dir_name: "Master".to_string(),
            anchor_root: None,
            anchor_depth: 4,
            anchor_marker: "Engine".to_string(),
            tool_path: PathBuf::from("Engine/Extras/Installers/Localization/AddLanguage.bat"),
            locales: default_locales(),
        }
    }
}

impl PackagingConfig {
    /// Reads the configuration from a path.
    pub fn read_from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::NotFound {
                path: path.to_path_buf(),
            });
        }

        let content = fs_err::read_to_string(path)?;
        let mut config: PackagingConfig = toml::from_str(&content)?;

        // a relative anchor_root is relative to the file that names it
        if let Some(root) = &config.anchor_root
            && root.is_relative()
            && let Some(dir) = path.parent()
        {
            config.anchor_root = Some(dir.join(root));
        }

        Ok(config)
    }

    /// Reads `localize.toml` from `dir` if it exists.
    pub fn discover(dir: &Path) -> Result<Option<Self>, ConfigError> {
        let path = dir.join(CONFIG_FILE_NAME);
        if !path.is_file() {
            return Ok(None);
        }
        Self::read_from_path(path).map(Some)
    }

    /// Resolves the transform tool against the anchor root.
    pub fn resolve_tool(&self, root: &Path) -> PathBuf {
        root.join(&self.tool_path)
    }

    /// Checks that the settings describe a layout the packager can work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_file_name("package_name", &self.package_name)?;
        ensure_file_name("master_dir_name", &self.master_dir_name)?;
        ensure_file_name("base_culture", &self.base_culture)?;

        if self.master_dir_name.eq_ignore_ascii_case(&self.base_culture) {
            return Err(ConfigError::Invalid(format!(
                "master_dir_name '{}' must differ from base_culture",
                self.master_dir_name
            )));
        }

        if self.anchor_depth == 0 {
            return Err(ConfigError::Invalid(
                "anchor_depth must be at least 1".to_string(),
            ));
        }

        if self.anchor_marker.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "anchor_marker must not be empty".to_string(),
            ));
        }

        if self.locales.is_empty() {
            return Err(ConfigError::EmptyLocales);
        }

        let mut names = HashSet::new();
        let mut codes = HashSet::new();

        for entry in &self.locales {
            entry.language_identifier()?;

            if entry.culture_code == 0 || entry.culture_code > MAX_LCID {
                return Err(ConfigError::InvalidCultureCode {
                    name: entry.culture_name.clone(),
                    code: entry.culture_code,
                });
            }

            if entry.culture_name.eq_ignore_ascii_case(&self.base_culture) {
                return Err(ConfigError::Invalid(format!(
                    "locale '{}' is the base culture",
                    entry.culture_name
                )));
            }

            if !names.insert(entry.culture_name.to_ascii_lowercase()) {
                return Err(ConfigError::DuplicateCulture {
                    name: entry.culture_name.clone(),
                });
            }

            if !codes.insert(entry.culture_code) {
                return Err(ConfigError::DuplicateCultureCode {
                    code: entry.culture_code,
                });
            }
        }

        Ok(())
    }
}

fn ensure_file_name(field: &str, value: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Invalid(format!("{field} must not be empty")));
    }

    if value.contains(['/', '\\']) || value == "." || value == ".." {
        return Err(ConfigError::Invalid(format!(
            "{field} '{value}' must be a single path component"
        )));
    }

    Ok(())
}
