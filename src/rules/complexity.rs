//! Complexity rules - passwords longer than ten characters.

use super::{Outcome, RuleInput, RuleResult, Tone};
use crate::verdict::StrengthLabel;

/// 11 to 25 characters missing uppercase or symbols.
pub fn lacks_complexity_rule(input: &RuleInput<'_>) -> RuleResult {
    let s = input.signals;
    if !(11..=25).contains(&s.length) || (s.has_upper && s.symbol_count > 0) {
        return None;
    }
    Some(Outcome {
        rating: 5,
        label: StrengthLabel::Moderate,
        tone: Tone::Warning,
        remark: "Password lacks complexity".to_string(),
        suggestion: "Add uppercase letters and special symbols to increase strength.",
    })
}

/// 18 to 25 characters with uppercase, a symbol and at least 3 digits.
pub fn strong_rule(input: &RuleInput<'_>) -> RuleResult {
    let s = input.signals;
    let applies = (18..=25).contains(&s.length)
        && s.has_upper
        && s.symbol_count >= 1
        && s.digit_count >= 3;
    if !applies {
        return None;
    }
    Some(Outcome {
        rating: 8,
        label: StrengthLabel::Strong,
        tone: Tone::Success,
        remark: "Strong password with good complexity".to_string(),
        suggestion: "Excellent password! Consider making it longer for even better security.",
    })
}

/// 22+ characters with 3 symbols, 2 uppercase and 3 digits.
pub fn very_strong_rule(input: &RuleInput<'_>) -> RuleResult {
    let s = input.signals;
    let applies =
        s.length >= 22 && s.symbol_count >= 3 && s.upper_count >= 2 && s.digit_count >= 3;
    if !applies {
        return None;
    }
    Some(Outcome {
        rating: 10,
        label: StrengthLabel::VeryStrong,
        tone: Tone::Excellent,
        remark: "Excellent password security!".to_string(),
        suggestion: "Perfect! This password meets all security criteria.",
    })
}
