//! Spam classifier
//!
//! Runs the keyword, pattern and heuristic checks in order and stops at the
//! first one that reports spam.

use tracing::debug;

use crate::error::Result;
use crate::rules::RuleSet;
use crate::signals;
use crate::types::{EmailText, SpamSample};

/// A top-level check over the configured rules and the message text
type Check = fn(&RuleSet, &EmailText<'_>) -> bool;

const CHECKS: &[(&str, Check)] = &[
    ("KEYWORD", keyword_check),
    ("PATTERN", pattern_check),
    ("HEURISTIC", heuristic_check),
];

fn keyword_check(rules: &RuleSet, text: &EmailText<'_>) -> bool {
    rules.matches_keyword(text)
}

fn pattern_check(rules: &RuleSet, text: &EmailText<'_>) -> bool {
    rules.matches_pattern(text)
}

fn heuristic_check(_rules: &RuleSet, text: &EmailText<'_>) -> bool {
    match signals::first_firing(text) {
        Some(signal) => {
            debug!("Heuristic signal {} fired", signal);
            true
        }
        None => false,
    }
}

/// Spam classifier owning its rule tables
#[derive(Debug, Clone, Default)]
pub struct SpamClassifier {
    rules: RuleSet,
}

impl SpamClassifier {
    /// Classifier with the built-in keyword and pattern tables
    pub fn new() -> Self {
        Self::default()
    }

    /// Classifier with an explicit rule set
    pub fn with_rules(rules: RuleSet) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Returns true when the message looks like spam
    pub fn classify(&self, subject: &str, body: &str) -> bool {
        self.classify_text(&EmailText::new(subject, body))
    }

    pub fn classify_text(&self, text: &EmailText<'_>) -> bool {
        for (name, check) in CHECKS {
            if check(&self.rules, text) {
                debug!("Spam check {} matched", name);
                return true;
            }
        }
        false
    }

    /// Append keyword phrases to the rule table
    pub fn add_keywords<I>(&mut self, keywords: I)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        self.rules.add_keywords(keywords);
    }

    /// Append patterns to the rule table, stopping at the first invalid one
    pub fn add_patterns<I>(&mut self, patterns: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        self.rules.add_patterns(patterns)
    }
}

/// Canned phishing message that the default classifier flags as spam
pub fn sample_spam_fixture() -> SpamSample {
    SpamSample {
        subject: "URGENT: Your Account Security Alert! 🔒".to_string(),
        body: "
IMPORTANT NOTICE: Your account has been compromised!

Dear valued customer,

We have detected UNUSUAL ACTIVITY on your account. Your account will be SUSPENDED unless you verify your identity immediately.

CLICK HERE to verify your account: https://bit.ly/verify-now

This is a LIMITED TIME OFFER to secure your account. We have detected multiple failed login attempts from:
- IP: 192.168.1.1
- Location: Unknown
- Time: 2024-03-20 15:30:00

To prevent account suspension, please verify your details NOW!

Best regards,
Security Team
"
        .to_string(),
    }
}
