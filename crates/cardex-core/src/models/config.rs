//! Configuration structures for the extraction pipeline.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{CardexError, Result};

/// Main configuration for the cardex pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardexConfig {
    /// Text normalization configuration.
    pub normalize: NormalizeConfig,

    /// Field extraction configuration.
    pub extraction: ExtractionConfig,
}

/// Text normalization configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizeConfig {
    /// Minimum cleaned length for voter and generic card lines.
    pub min_line_len: usize,

    /// Minimum cleaned length for national-ID lines.
    pub national_min_line_len: usize,

    /// Stray glyphs removed from every fragment.
    pub artifact_chars: String,
}

impl Default for NormalizeConfig {
    fn default() -> Self {
        Self {
            min_line_len: 2,
            national_min_line_len: 3,
            artifact_chars: "|".to_string(),
        }
    }
}

/// Canonical expansion for an organization printed in abbreviated form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrgAlias {
    /// Uppercase marker looked for in the organization line.
    pub marker: String,

    /// Full name substituted when the marker is present.
    pub canonical: String,
}

/// Field extraction configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Organization name expansions.
    pub org_aliases: Vec<OrgAlias>,

    /// Number of leading lines searched for the organization name.
    pub org_scan_lines: usize,

    /// Lines after the government header searched for the holder name.
    pub national_name_window: usize,

    /// Lines captured after a voter-card address label.
    pub voter_address_lines: usize,

    /// A card address line with more digits than this ends the address.
    pub phone_digit_threshold: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            org_aliases: vec![OrgAlias {
                marker: "RAJALAKSHMI".to_string(),
                canonical: "RAJALAKSHMI ENGINEERING COLLEGE".to_string(),
            }],
            org_scan_lines: 6,
            national_name_window: 3,
            voter_address_lines: 3,
            phone_digit_threshold: 6,
        }
    }
}

impl CardexConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Reject settings that would make every line disappear or every scan empty.
    pub fn validate(&self) -> Result<()> {
        if self.normalize.min_line_len == 0 || self.normalize.national_min_line_len == 0 {
            return Err(CardexError::Config(
                "minimum line length must be at least 1".to_string(),
            ));
        }
        if self.extraction.org_scan_lines == 0 {
            return Err(CardexError::Config(
                "org_scan_lines must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: CardexConfig =
            serde_json::from_str(r#"{"extraction": {"voter_address_lines": 4}}"#).unwrap();

        assert_eq!(config.extraction.voter_address_lines, 4);
        assert_eq!(config.extraction.org_scan_lines, 6);
        assert_eq!(config.normalize.min_line_len, 2);
        assert_eq!(config.extraction.org_aliases.len(), 1);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = CardexConfig::default();
        config.normalize.artifact_chars = "|~".to_string();
        config.save(&path).unwrap();

        let loaded = CardexConfig::from_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_validate_rejects_zero_length() {
        let mut config = CardexConfig::default();
        config.normalize.min_line_len = 0;
        assert!(matches!(config.validate(), Err(CardexError::Config(_))));
    }
}
