//! Null value handling for data loading

use serde::{Serialize, Deserialize};

/// Null value configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NullConfig {
    /// Patterns to treat as null
    pub patterns: Vec<String>,

    /// Whether to trim whitespace before checking
    pub trim_whitespace: bool,

    /// Case sensitive matching
    pub case_sensitive: bool,
}

impl Default for NullConfig {
    fn default() -> Self {
        Self {
            patterns: vec![
                String::new(),      // Empty string
                "NA".to_string(),
                "N/A".to_string(),
                "NaN".to_string(),
                "null".to_string(),
                "None".to_string(),
            ],
            trim_whitespace: true,
            case_sensitive: false,
        }
    }
}

impl NullConfig {
    /// Check if a value should be treated as null
    pub fn is_null(&self, value: &str) -> bool {
        let test_value = if self.trim_whitespace {
            value.trim()
        } else {
            value
        };

        self.patterns.iter().any(|pattern| {
            if self.case_sensitive {
                test_value == pattern
            } else {
                test_value.eq_ignore_ascii_case(pattern)
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_patterns_match_common_markers() {
        let config = NullConfig::default();
        for marker in ["", "  ", "NA", "n/a", "nan", "NULL", "none"] {
            assert!(config.is_null(marker), "{marker:?} should be null");
        }
        assert!(!config.is_null("0"));
        assert!(!config.is_null("-"));
    }

    #[test]
    fn case_sensitive_matching() {
        let config = NullConfig {
            patterns: vec!["NA".to_string()],
            trim_whitespace: false,
            case_sensitive: true,
        };
        assert!(config.is_null("NA"));
        assert!(!config.is_null("na"));
        assert!(!config.is_null(" NA"));
    }
}
