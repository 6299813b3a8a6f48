//! Composition signals - character class facts about one password.

/// Characters counted as symbols.
pub const SYMBOLS: &[char] = &[
    '!', '@', '#', '$', '%', '^', '&', '*', '(', ')', ',', '.', '?', '"', ':', '{', '}', '|',
    '<', '>',
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CompositionSignals {
    /// Number of chars, not bytes.
    pub length: usize,
    pub has_upper: bool,
    pub has_lower: bool,
    pub has_digit: bool,
    pub upper_count: usize,
    pub digit_count: usize,
    pub symbol_count: usize,
}

impl CompositionSignals {
    pub fn from_password(password: &str) -> Self {
        let mut signals = Self::default();

        for c in password.chars() {
            signals.length += 1;
            if c.is_uppercase() {
                signals.upper_count += 1;
            }
            if c.is_lowercase() {
                signals.has_lower = true;
            }
            // Any script's digits, not only ASCII ones
            if c.is_numeric() {
                signals.digit_count += 1;
            }
            if SYMBOLS.contains(&c) {
                signals.symbol_count += 1;
            }
        }

        signals.has_upper = signals.upper_count > 0;
        signals.has_digit = signals.digit_count > 0;
        signals
    }
}
