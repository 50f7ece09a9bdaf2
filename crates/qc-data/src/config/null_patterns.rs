//! Null cell recognition for local ingestion

use serde::{Serialize, Deserialize};

/// Cell texts that mean "no value"
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NullPatterns {
    /// Patterns to treat as null
    pub patterns: Vec<String>,

    /// Whether to trim whitespace before checking
    pub trim_whitespace: bool,

    /// Case sensitive matching
    pub case_sensitive: bool,
}

impl Default for NullPatterns {
    fn default() -> Self {
        Self {
            patterns: ["", "-", "N/A", "null", "None"]
                .iter()
                .map(|p| p.to_string())
                .collect(),
            trim_whitespace: true,
            case_sensitive: false,
        }
    }
}

impl NullPatterns {
    /// Only empty cells are null
    pub fn empty_only() -> Self {
        Self {
            patterns: vec![String::new()],
            ..Self::default()
        }
    }

    /// Check if a cell should be read as null
    pub fn is_null(&self, cell: &str) -> bool {
        let cell = if self.trim_whitespace { cell.trim() } else { cell };

        self.patterns.iter().any(|pattern| {
            if self.case_sensitive {
                cell == pattern
            } else {
                cell.eq_ignore_ascii_case(pattern)
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_patterns() {
        let nulls = NullPatterns::default();
        assert!(nulls.is_null(""));
        assert!(nulls.is_null("  n/a "));
        assert!(nulls.is_null("NULL"));
        assert!(!nulls.is_null("0"));
    }

    #[test]
    fn test_empty_only() {
        let nulls = NullPatterns::empty_only();
        assert!(nulls.is_null("   "));
        assert!(!nulls.is_null("N/A"));
    }
}
