use crate::core::CliError;
use msi_localizer_config::PackagingConfig;
use std::path::Path;

/// Load the packaging configuration.
///
/// An explicit path must exist. Without one, `localize.toml` in the current
/// directory is used when present, and the built-in defaults otherwise.
pub fn load_config(explicit: Option<&Path>) -> Result<PackagingConfig, CliError> {
    let config = match explicit {
        Some(path) => PackagingConfig::read_from_path(path)?,
        None => PackagingConfig::discover(&std::env::current_dir()?)?.unwrap_or_default(),
    };

    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use msi_localizer_config::ConfigError;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_explicit_config_must_exist() {
        let temp = TempDir::new().unwrap();
        let result = load_config(Some(&temp.path().join("missing.toml")));
        assert!(matches!(
            result,
            Err(CliError::Config(ConfigError::NotFound { .. }))
        ));
    }

    #[test]
    fn test_explicit_config_is_validated() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("localize.toml");
        fs::write(&path, "locales = []\n").unwrap();

        let result = load_config(Some(&path));
        assert!(matches!(
            result,
            Err(CliError::Config(ConfigError::EmptyLocales))
        ));
    }

    #[test]
    fn test_explicit_config_overrides_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("custom.toml");
        fs::write(&path, "master_dir_name = \"Multilingual\"\n").unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.master_dir_name, "Multilingual");
        assert_eq!(config.locales.len(), 7);
    }
}
