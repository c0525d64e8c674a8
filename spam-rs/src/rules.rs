//! Keyword and pattern rule tables
//!
//! A [`RuleSet`] starts from the built-in tables (or empty) and only ever grows.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::info;

use crate::error::{Result, SpamError};
use crate::types::EmailText;

/// Built-in keyword phrases, matched case-insensitively as substrings
pub const DEFAULT_KEYWORDS: &[&str] = &[
    "viagra",
    "lottery",
    "winner",
    "inheritance",
    "prince",
    "urgent",
    "account suspended",
    "verify account",
    "unusual activity",
    "congratulations",
    "claim prize",
    "million dollars",
    "bank transfer",
    "bitcoin",
    "crypto",
    "investment opportunity",
    "urgent action required",
    "account compromised",
    "security alert",
    "verify your identity",
    "unclaimed funds",
    "inheritance money",
    "lottery prize",
    "claim now",
    "limited time offer",
    "exclusive offer",
    "special promotion",
    "account verification",
    "password expired",
    "account locked",
    "unusual login attempt",
    "suspicious activity",
    "verify your account",
    "confirm your identity",
    "account security",
    "unusual sign-in",
    "verify your email",
    "confirm your email",
    "account access",
    "unusual activity detected",
    "account status",
    "verify your details",
];

/// Built-in patterns, matched against the original-case subject and body
pub const DEFAULT_PATTERNS: &[&str] = &[
    // Excessive capitalization
    r"\b[A-Z]{2,}\b",
    // Long numbers
    r"\b\d{6,}\b",
    // Repeated exclamation marks
    r"[!]{2,}",
    // Email addresses
    r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}",
    // Currency amounts
    r"\b(?:USD|EUR|GBP|BTC|ETH)\s*\d+[.,]\d{2}",
    // Spelled-out large numbers
    r"\b\d{1,3}(?:,\d{3})*(?:\.\d{2})?\s*(?:million|billion|trillion)\b",
    // URL shorteners
    r"https?://(?:www\.)?(?:bit\.ly|goo\.gl|tinyurl\.com)/\w+",
    // Urgency words
    r"\b(?:urgent|important|action required|verify|confirm|security|alert)\b",
    // Prize words
    r"\b(?:winner|prize|lottery|inheritance|unclaimed|funds)\b",
    // Account words
    r"\b(?:account|password|security|verify|confirm)\b",
];

static DEFAULT_REGEXES: Lazy<Vec<Regex>> = Lazy::new(|| {
    DEFAULT_PATTERNS
        .iter()
        .map(|p| Regex::new(p).expect("built-in spam pattern must compile"))
        .collect()
});

/// Ordered keyword and pattern tables
#[derive(Debug, Clone)]
pub struct RuleSet {
    /// Lower-cased keyword phrases
    keywords: Vec<String>,
    patterns: Vec<Regex>,
}

impl RuleSet {
    /// Rule set with no keywords and no patterns
    pub fn empty() -> Self {
        Self {
            keywords: Vec::new(),
            patterns: Vec::new(),
        }
    }

    /// Build a rule set from explicit tables
    pub fn new<K, P>(keywords: K, patterns: P) -> Result<Self>
    where
        K: IntoIterator,
        K::Item: AsRef<str>,
        P: IntoIterator,
        P::Item: AsRef<str>,
    {
        let mut rules = Self::empty();
        rules.add_keywords(keywords);
        rules.add_patterns(patterns)?;
        Ok(rules)
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn patterns(&self) -> &[Regex] {
        &self.patterns
    }

    /// Append keyword phrases. Duplicates are kept.
    pub fn add_keywords<I>(&mut self, keywords: I)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let before = self.keywords.len();
        self.keywords
            .extend(keywords.into_iter().map(|k| k.as_ref().to_lowercase()));
        info!(
            "Added {} spam keywords ({} total)",
            self.keywords.len() - before,
            self.keywords.len()
        );
    }

    /// Append patterns in order.
    ///
    /// Stops at the first pattern that fails to compile: patterns before it
    /// stay in the table, it and everything after it are not added.
    pub fn add_patterns<I>(&mut self, patterns: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        for pattern in patterns {
            let pattern = pattern.as_ref();
            let regex = Regex::new(pattern).map_err(|source| SpamError::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            })?;
            self.patterns.push(regex);
            info!("Added spam pattern {} ({} total)", pattern, self.patterns.len());
        }
        Ok(())
    }

    /// Any keyword occurs in the lower-cased subject or body
    pub fn matches_keyword(&self, text: &EmailText<'_>) -> bool {
        let subject = text.subject.to_lowercase();
        let body = text.body.to_lowercase();

        self.keywords
            .iter()
            .any(|k| subject.contains(k.as_str()) || body.contains(k.as_str()))
    }

    /// Any pattern matches the subject or body as given
    pub fn matches_pattern(&self, text: &EmailText<'_>) -> bool {
        self.patterns
            .iter()
            .any(|re| re.is_match(text.subject) || re.is_match(text.body))
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self {
            keywords: DEFAULT_KEYWORDS.iter().map(|k| k.to_string()).collect(),
            patterns: DEFAULT_REGEXES.clone(),
        }
    }
}
