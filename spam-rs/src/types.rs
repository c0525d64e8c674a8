//! Spam types and data structures

use serde::{Deserialize, Serialize};

/// Subject and body of one message, borrowed for a single evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmailText<'a> {
    pub subject: &'a str,
    pub body: &'a str,
}

impl<'a> EmailText<'a> {
    pub fn new(subject: &'a str, body: &'a str) -> Self {
        Self { subject, body }
    }
}

/// A canned message used as a positive control
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpamSample {
    pub subject: String,
    pub body: String,
}

impl SpamSample {
    /// Borrow the sample as classifier input
    pub fn as_text(&self) -> EmailText<'_> {
        EmailText::new(&self.subject, &self.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_json_shape() {
        let sample = SpamSample {
            subject: "Claim now".to_string(),
            body: "Reply today".to_string(),
        };

        let json = serde_json::to_value(&sample).unwrap();
        assert_eq!(json, serde_json::json!({"subject": "Claim now", "body": "Reply today"}));

        let parsed: SpamSample = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, sample);
        assert_eq!(parsed.as_text(), EmailText::new("Claim now", "Reply today"));
    }
}
