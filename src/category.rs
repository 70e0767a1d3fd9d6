//! @ai:module:intent Define marker categories and their severities
//! @ai:module:layer domain
//! @ai:module:public_api Severity, MarkerCategory, default_categories
//! @ai:module:stateless true

use serde::{Deserialize, Serialize};
use std::fmt;

/// @ai:intent Severity attached to every finding of a category
#[derive(
    Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    #[default]
    Warning,
    Info,
}

impl Severity {
    /// @ai:intent Numeric severity used by the Language Server Protocol
    /// @ai:example (Error) -> 1
    /// @ai:example (Info) -> 3
    /// @ai:effects pure
    pub fn lsp_code(&self) -> u8 {
        match self {
            Severity::Error => 1,
            Severity::Warning => 2,
            Severity::Info => 3,
        }
    }

    /// @ai:effects pure
    pub fn name(&self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// @ai:intent A group of keywords sharing one code and severity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MarkerCategory {
    pub code: String,
    pub keywords: Vec<String>,
    pub severity: Severity,
}

impl MarkerCategory {
    /// @ai:intent Create a category from a code, keywords and severity
    pub fn new<I, S>(code: impl Into<String>, keywords: I, severity: Severity) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            code: code.into(),
            keywords: keywords.into_iter().map(Into::into).collect(),
            severity,
        }
    }

    /// @ai:intent Check whether a keyword belongs to this category, ignoring case
    /// @ai:effects pure
    pub fn contains(&self, keyword: &str) -> bool {
        self.keywords.iter().any(|k| k.eq_ignore_ascii_case(keyword))
    }
}

/// @ai:intent Built-in categories, highest priority first
/// @ai:post codes are CM01, CM02, CM03 in that order
/// @ai:effects pure
pub fn default_categories() -> Vec<MarkerCategory> {
    vec![
        MarkerCategory::new("CM01", ["NEXT", "WORK"], Severity::Error),
        MarkerCategory::new("CM02", ["TODO", "FIXME", "XXX"], Severity::Warning),
        MarkerCategory::new("CM03", ["PLAN", "INFO", "DEV", "IMPROVE"], Severity::Info),
    ]
}
