//! spam-rs: rule-based spam classifier for email text
//!
//! Decides whether a subject/body pair is spam by checking, in order:
//!
//! 1. keyword phrases (case-insensitive substrings)
//! 2. regular-expression patterns (matched as written)
//! 3. heuristic signals such as exclamation or URL counts
//!
//! The first check that fires makes the verdict spam. There is no scoring.
//!
//! # Example
//!
//! ```
//! use spam_rs::{sample_spam_fixture, SpamClassifier};
//!
//! let mut classifier = SpamClassifier::new();
//! assert!(!classifier.classify("Quarterly report", "Please find attached the Q3 numbers."));
//!
//! classifier.add_keywords(["foo-scam"]);
//! assert!(classifier.classify("foo-scam deal", ""));
//!
//! let sample = sample_spam_fixture();
//! assert!(classifier.classify(&sample.subject, &sample.body));
//! ```

pub mod classifier;
pub mod error;
pub mod rules;
pub mod signals;
pub mod types;

pub use classifier::{sample_spam_fixture, SpamClassifier};
pub use error::{Result, SpamError};
pub use rules::RuleSet;
pub use types::{EmailText, SpamSample};
