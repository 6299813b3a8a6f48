//! Verdict types returned to the interface layer.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::signals::CompositionSignals;

/// Ordered strength categories, weakest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StrengthLabel {
    #[serde(rename = "Very Weak")]
    VeryWeak,
    Weak,
    Moderate,
    Average,
    Strong,
    #[serde(rename = "Very Strong")]
    VeryStrong,
}

impl StrengthLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            StrengthLabel::VeryWeak => "Very Weak",
            StrengthLabel::Weak => "Weak",
            StrengthLabel::Moderate => "Moderate",
            StrengthLabel::Average => "Average",
            StrengthLabel::Strong => "Strong",
            StrengthLabel::VeryStrong => "Very Strong",
        }
    }
}

impl fmt::Display for StrengthLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Composition facts echoed back for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Details {
    #[serde(rename = "Uppercase")]
    pub uppercase: bool,
    #[serde(rename = "Lowercase")]
    pub lowercase: bool,
    #[serde(rename = "Digits")]
    pub digits: bool,
    #[serde(rename = "Symbols")]
    pub symbols: usize,
    #[serde(rename = "Length")]
    pub length: usize,
}

impl From<&CompositionSignals> for Details {
    fn from(s: &CompositionSignals) -> Self {
        Self {
            uppercase: s.has_upper,
            lowercase: s.has_lower,
            digits: s.has_digit,
            symbols: s.symbol_count,
            length: s.length,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    /// 1 to 10.
    pub rating: u8,
    #[serde(rename = "strength")]
    pub label: StrengthLabel,
    #[serde(rename = "circle_color")]
    pub color: String,
    pub remark: String,
    pub details: Details,
    pub suggestion: String,
}
