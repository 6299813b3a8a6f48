//! Length rules - passwords of ten characters or fewer.

use super::{Outcome, RuleInput, RuleResult, Tone};
use crate::verdict::StrengthLabel;

const VERY_SHORT_BELOW: usize = 6;
const SHORT_UP_TO: usize = 10;

/// Fewer than 6 characters.
pub fn very_short_rule(input: &RuleInput<'_>) -> RuleResult {
    if input.signals.length >= VERY_SHORT_BELOW {
        return None;
    }
    Some(Outcome {
        rating: 1,
        label: StrengthLabel::VeryWeak,
        tone: Tone::Danger,
        remark: "Password is too short".to_string(),
        suggestion: "Increase password length to at least 6 characters.",
    })
}

/// 6 to 10 characters.
pub fn too_short_rule(input: &RuleInput<'_>) -> RuleResult {
    let length = input.signals.length;
    if !(VERY_SHORT_BELOW..=SHORT_UP_TO).contains(&length) {
        return None;
    }
    Some(Outcome {
        rating: 2,
        label: StrengthLabel::Weak,
        tone: Tone::Weak,
        remark: "Password is too short".to_string(),
        suggestion: "Increase password length to at least 12 characters and add complexity.",
    })
}
