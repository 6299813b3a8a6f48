//! Password strength verdicts with breach wordlist lookup
//!
//! A password is first looked up, line by line, in the configured breach
//! wordlists, then classified by an ordered ladder of composition rules into
//! a [`Verdict`] (rating, label, color, remark, suggestion, details).
//!
//! # Features
//!
//! - `async` (default): Enables blocking-pool evaluation with cancellation support
//! - `tracing`: Enables logging via tracing crate
//!
//! # Environment Variables
//!
//! - `PWD_WORDLIST_PATHS`: Wordlist files or directories, separated like `PATH`
//!   (default: `wordlists/wordlists/{rockyou.txt,SecLists,Weakpass.txt}`)
//! - `PWD_MAX_SOURCE_BYTES`: Skip wordlist files larger than this
//! - `PWD_INDEX_WORDLISTS`: Load wordlists into memory once at startup
//! - `PWD_RESPONSE_DELAY_MS`: Pause applied by `evaluate_tx`
//!
//! # Example
//!
//! ```rust,no_run
//! use pwd_breach_check::PasswordChecker;
//! use secrecy::SecretString;
//!
//! // Build once at startup
//! let checker = PasswordChecker::from_env().expect("Invalid configuration");
//!
//! let password = SecretString::new("MyP@ssw0rd!".to_string().into());
//! let verdict = checker.evaluate(&password);
//!
//! println!("Rating: {}", verdict.rating);
//! println!("Strength: {}", verdict.label);
//! println!("Remark: {}", verdict.remark);
//! ```

// Internal modules
mod config;
mod evaluator;
mod rules;
mod signals;
mod verdict;
mod wordlist;

// Public API
pub use config::{CheckerConfig, ConfigError, Palette};
pub use evaluator::PasswordChecker;
pub use signals::{CompositionSignals, SYMBOLS};
pub use verdict::{Details, StrengthLabel, Verdict};
pub use wordlist::{IndexedSource, PathSource, WordlistError, WordlistMatcher, WordlistSource};
