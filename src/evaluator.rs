//! Password checker - main evaluation logic.

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};

#[cfg(feature = "async")]
use tokio::sync::mpsc;

#[cfg(feature = "async")]
use tokio_util::sync::CancellationToken;

use crate::config::{CheckerConfig, ConfigError};
use crate::rules::{RuleInput, classify};
use crate::signals::CompositionSignals;
use crate::verdict::{Details, Verdict};
use crate::wordlist::{WordlistMatcher, WordlistSource};

/// Evaluates passwords against the configured wordlists and the rule ladder.
///
/// Cloning is cheap; clones share the same sources.
#[derive(Debug, Clone)]
pub struct PasswordChecker {
    config: Arc<CheckerConfig>,
    matcher: WordlistMatcher,
}

impl PasswordChecker {
    pub fn new(config: CheckerConfig) -> Self {
        let matcher = WordlistMatcher::from_config(&config);
        Self::with_matcher(config, matcher)
    }

    /// Uses `matcher` instead of the sources named in `config.wordlist_paths`.
    pub fn with_matcher(config: CheckerConfig, matcher: WordlistMatcher) -> Self {
        Self {
            config: Arc::new(config),
            matcher,
        }
    }

    /// Builds a checker from `PWD_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self::new(CheckerConfig::from_env()?))
    }

    pub fn config(&self) -> &CheckerConfig {
        &self.config
    }

    /// Configured wordlist sources, in scan order.
    pub fn sources(&self) -> impl Iterator<Item = &dyn WordlistSource> {
        self.matcher.sources()
    }

    /// Evaluates password strength and returns the verdict.
    ///
    /// Never fails: unreadable wordlists are skipped and every string,
    /// including the empty one, gets a verdict.
    pub fn evaluate(&self, password: &SecretString) -> Verdict {
        let pwd = password.expose_secret();
        self.verdict(pwd, &self.matcher.check(pwd))
    }

    fn verdict(&self, pwd: &str, breaches: &[String]) -> Verdict {
        let signals = CompositionSignals::from_password(pwd);

        let (_rule, outcome) = classify(&RuleInput {
            signals: &signals,
            breaches,
        });

        #[cfg(feature = "tracing")]
        tracing::debug!("Password classified by rule {} (rating {})", _rule, outcome.rating);

        Verdict {
            rating: outcome.rating,
            label: outcome.label,
            color: outcome.tone.color(&self.config.palette).to_string(),
            remark: outcome.remark,
            details: Details::from(&signals),
            suggestion: outcome.suggestion.to_string(),
        }
    }

    /// Plain-string variant of [`evaluate`](Self::evaluate).
    pub fn evaluate_password(&self, password: &str) -> Verdict {
        self.evaluate(&SecretString::new(password.into()))
    }

    /// Runs [`evaluate`](Self::evaluate) on the blocking pool.
    ///
    /// Returns `None` if `token` is cancelled before the scan completes or
    /// the blocking task dies. The background scan checks `token` before
    /// each wordlist source and stops there; a source already being read is
    /// finished first.
    #[cfg(feature = "async")]
    pub async fn evaluate_async(
        &self,
        password: &SecretString,
        token: CancellationToken,
    ) -> Option<Verdict> {
        if token.is_cancelled() {
            return None;
        }

        let checker = self.clone();
        let owned = SecretString::new(password.expose_secret().into());
        let scan_token = token.clone();
        let handle = tokio::task::spawn_blocking(move || {
            let pwd = owned.expose_secret();
            let breaches = checker
                .matcher
                .check_while(pwd, || !scan_token.is_cancelled())?;
            Some(checker.verdict(pwd, &breaches))
        });

        tokio::select! {
            _ = token.cancelled() => {
                #[cfg(feature = "tracing")]
                tracing::info!("Password evaluation cancelled");
                None
            }
            joined = handle => match joined {
                Ok(verdict) => verdict,
                Err(_e) => {
                    #[cfg(feature = "tracing")]
                    tracing::error!("Password evaluation task failed: {}", _e);
                    None
                }
            },
        }
    }

    /// Waits the configured response delay, evaluates, and sends the verdict.
    ///
    /// Nothing is sent if `token` is cancelled first.
    #[cfg(feature = "async")]
    pub async fn evaluate_tx(
        &self,
        password: &SecretString,
        token: CancellationToken,
        tx: mpsc::Sender<Verdict>,
    ) {
        #[cfg(feature = "tracing")]
        tracing::info!("evaluation is about to start...");

        let delay = self.config.response_delay;
        if !delay.is_zero() {
            tokio::select! {
                _ = token.cancelled() => return,
                _ = tokio::time::sleep(delay) => {}
            }
        }

        let Some(verdict) = self.evaluate_async(password, token).await else {
            return;
        };

        if let Err(_e) = tx.send(verdict).await {
            #[cfg(feature = "tracing")]
            tracing::error!("Failed to send password verdict: {}", _e);
        }
    }
}

impl Default for PasswordChecker {
    fn default() -> Self {
        Self::new(CheckerConfig::default())
    }
}
