//! Cultures embedded into the master package.

use serde::Deserialize;
use std::fmt;
use unic_langid::LanguageIdentifier;

use crate::ConfigError;

/// Highest value a Windows language code identifier can take.
pub const MAX_LCID: u32 = 0xFFFF;

/// Cultures localized by default, in invocation order.
const DEFAULT_LOCALES: &[(&str, u32)] = &[
    ("de-de", 1031),
    ("ko-kr", 1042),
    ("es-es", 1034),
    ("fr-fr", 1036),
    ("ja-jp", 1041),
    ("pt-pt", 2070),
    ("zh-cn", 2052),
];

/// A culture name paired with its Windows LCID.
///
/// In `localize.toml` an entry is written as `{ name = "de-de", lcid = 1031 }`.
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct LocaleEntry {
    /// Culture name handed verbatim to the transform tool (e.g. "de-de").
    #[serde(rename = "name")]
    pub culture_name: String,
    /// Windows language code identifier (e.g. 1031).
    #[serde(rename = "lcid")]
    pub culture_code: u32,
}

impl LocaleEntry {
    pub fn new(culture_name: impl Into<String>, culture_code: u32) -> Self {
        Self {
            culture_name: culture_name.into(),
            culture_code,
        }
    }

    /// Parses the culture name as a BCP 47 language identifier.
    pub fn language_identifier(&self) -> Result<LanguageIdentifier, ConfigError> {
        parse_culture_name(&self.culture_name)
    }
}

impl fmt::Display for LocaleEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.culture_name, self.culture_code)
    }
}

/// Returns the built-in locale table.
pub fn default_locales() -> Vec<LocaleEntry> {
    DEFAULT_LOCALES
        .iter()
        .map(|(name, code)| LocaleEntry::new(*name, *code))
        .collect()
}

/// Parses a culture name, rejecting identifiers the transform tool cannot take.
pub fn parse_culture_name(name: &str) -> Result<LanguageIdentifier, ConfigError> {
    let lang = name
        .parse::<LanguageIdentifier>()
        .map_err(|source| ConfigError::InvalidCultureName {
            name: name.to_string(),
            source,
        })?;

    if lang.variants().next().is_some() {
        return Err(ConfigError::UnsupportedCultureName {
            name: name.to_string(),
            reason: "variants are not supported".to_string(),
        });
    }

    if lang.region.is_none() {
        return Err(ConfigError::UnsupportedCultureName {
            name: name.to_string(),
            reason: "a region subtag is required (e.g. 'de-de')".to_string(),
        });
    }

    Ok(lang)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_default_locales_order() {
        let names: Vec<String> = default_locales()
            .into_iter()
            .map(|entry| entry.culture_name)
            .collect();

        assert_eq!(
            names,
            vec!["de-de", "ko-kr", "es-es", "fr-fr", "ja-jp", "pt-pt", "zh-cn"]
        );
    }

    #[test]
    fn test_default_locales_codes() {
        let codes: Vec<u32> = default_locales()
            .into_iter()
            .map(|entry| entry.culture_code)
            .collect();

        assert_eq!(codes, vec![1031, 1042, 1034, 1036, 1041, 2070, 2052]);
    }

    #[test]
    fn test_display() {
        assert_eq!(LocaleEntry::new("fr-fr", 1036).to_string(), "fr-fr (1036)");
    }

    #[rstest]
    #[case("de-de")]
    #[case("pt-pt")]
    #[case("zh-cn")]
    #[case("en-US")]
    fn test_parse_culture_name_accepts(#[case] name: &str) {
        assert!(parse_culture_name(name).is_ok());
    }

    #[test]
    fn test_parse_culture_name_invalid() {
        let result = parse_culture_name("invalid-lang!");
        assert!(matches!(
            result,
            Err(ConfigError::InvalidCultureName { name, .. }) if name == "invalid-lang!"
        ));
    }

    #[rstest]
    #[case("de")]
    #[case("de-de-1901")]
    fn test_parse_culture_name_unsupported(#[case] name: &str) {
        let result = parse_culture_name(name);
        assert!(matches!(
            result,
            Err(ConfigError::UnsupportedCultureName { .. })
        ));
    }
}
