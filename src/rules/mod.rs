//! Strength rules
//!
//! The ladder is an ordered list of rules. Each rule looks at the same
//! [`RuleInput`] and either claims the password or passes. The first rule
//! that claims it decides the verdict; when none does, [`fallback`] applies.
//!
//! Rule conditions overlap on purpose, so the order of [`LADDER`] is part of
//! the observable behavior.

mod breach;
mod complexity;
mod length;

pub use breach::breach_rule;
pub use complexity::{lacks_complexity_rule, strong_rule, very_strong_rule};
pub use length::{too_short_rule, very_short_rule};

use crate::config::Palette;
use crate::signals::CompositionSignals;
use crate::verdict::StrengthLabel;

/// Everything a rule may look at.
#[derive(Debug, Clone, Copy)]
pub struct RuleInput<'a> {
    pub signals: &'a CompositionSignals,
    /// Names of wordlists containing the password. At most one entry.
    pub breaches: &'a [String],
}

/// Color family of an outcome, resolved against a [`Palette`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Danger,
    Weak,
    Warning,
    Average,
    Success,
    Excellent,
}

impl Tone {
    pub fn color<'p>(&self, palette: &'p Palette) -> &'p str {
        match self {
            Tone::Danger => &palette.danger,
            Tone::Weak => &palette.weak,
            Tone::Warning => &palette.warning,
            Tone::Average => &palette.average,
            Tone::Success => &palette.success,
            Tone::Excellent => &palette.excellent,
        }
    }
}

/// Verdict fields fixed by a rule, before details and color are attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub rating: u8,
    pub label: StrengthLabel,
    pub tone: Tone,
    pub remark: String,
    pub suggestion: &'static str,
}

/// Result type for rule functions.
/// - `Some(outcome)` - Rule applies, evaluation stops
/// - `None` - Rule does not apply, try the next one
pub type RuleResult = Option<Outcome>;

pub type Rule = fn(&RuleInput<'_>) -> RuleResult;

/// Rules in evaluation order.
pub const LADDER: &[(&str, Rule)] = &[
    ("breach", breach_rule),
    ("very_short", very_short_rule),
    ("too_short", too_short_rule),
    ("lacks_complexity", lacks_complexity_rule),
    ("strong", strong_rule),
    ("very_strong", very_strong_rule),
];

/// Outcome when no rule in the ladder applies.
pub fn fallback() -> Outcome {
    Outcome {
        rating: 4,
        label: StrengthLabel::Average,
        tone: Tone::Average,
        remark: "Password could be stronger".to_string(),
        suggestion: "Add more character variety (uppercase, numbers, symbols) and increase length.",
    }
}

/// Runs the ladder and returns the deciding rule's name with its outcome.
pub fn classify(input: &RuleInput<'_>) -> (&'static str, Outcome) {
    LADDER
        .iter()
        .find_map(|(name, rule)| rule(input).map(|outcome| (*name, outcome)))
        .unwrap_or_else(|| ("fallback", fallback()))
}
