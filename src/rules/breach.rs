//! Breach rule - the password was found in a wordlist.

use super::{Outcome, RuleInput, RuleResult, Tone};
use crate::verdict::StrengthLabel;

/// Claims any password that a wordlist contains, regardless of composition.
pub fn breach_rule(input: &RuleInput<'_>) -> RuleResult {
    if input.breaches.is_empty() {
        return None;
    }
    Some(Outcome {
        rating: 1,
        label: StrengthLabel::VeryWeak,
        tone: Tone::Danger,
        remark: format!("⚠️ Found in wordlists ({})", input.breaches.join(", ")),
        suggestion: "Password found in known data breaches; change immediately.",
    })
}
