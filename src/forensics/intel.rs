//! Regex intelligence extraction from scammer messages.
//!
//! Independent of the reply pipeline: the HTTP layer runs it on the inbound
//! text and stores the result alongside the interaction.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:\+91[\-\s]?|\b)[6-9]\d{9}\b").expect("valid phone regex"));
static UPI_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b[a-zA-Z0-9.\-_]{2,256}@[a-zA-Z]{2,64}\b").expect("valid upi regex")
});
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b[a-zA-Z0-9._%+\-]+@[a-zA-Z0-9.\-]+\.[a-zA-Z]{2,}\b").expect("valid email regex")
});
static LINK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"https?://[^\s<>"']+"#).expect("valid link regex"));
static AMOUNT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:₹|\b(?:rs\.?|inr))\s?(\d[\d,]*(?:\.\d{1,2})?)").expect("valid amount regex")
});

const SCAM_KEYWORDS: &[&str] = &[
    "urgent",
    "verify",
    "blocked",
    "suspended",
    "kyc",
    "otp",
    "refund",
    "lottery",
    "prize",
    "arrest",
    "customs",
    "courier",
    "anydesk",
    "teamviewer",
];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Intelligence {
    pub phone_numbers: Vec<String>,
    pub upi_ids: Vec<String>,
    pub emails: Vec<String>,
    pub links: Vec<String>,
    pub amounts: Vec<String>,
    pub keywords: Vec<String>,
}

impl Intelligence {
    pub fn is_empty(&self) -> bool {
        self.phone_numbers.is_empty()
            && self.upi_ids.is_empty()
            && self.emails.is_empty()
            && self.links.is_empty()
            && self.amounts.is_empty()
            && self.keywords.is_empty()
    }
}

fn push_unique(list: &mut Vec<String>, value: String) {
    if !list.contains(&value) {
        list.push(value);
    }
}

fn normalize_phone(raw: &str) -> String {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    // Keep the 10-digit subscriber number
    digits[digits.len().saturating_sub(10)..].to_string()
}

pub fn extract(text: &str) -> Intelligence {
    let mut intel = Intelligence::default();

    for m in PHONE_RE.find_iter(text) {
        push_unique(&mut intel.phone_numbers, normalize_phone(m.as_str()));
    }

    for m in EMAIL_RE.find_iter(text) {
        push_unique(&mut intel.emails, m.as_str().to_lowercase());
    }

    // UPI handles have no dot after the '@'; anything with a domain is an email
    for m in UPI_RE.find_iter(text) {
        let candidate = m.as_str();
        let is_email_prefix = intel
            .emails
            .iter()
            .any(|email| email.starts_with(&candidate.to_lowercase()));
        if !is_email_prefix {
            push_unique(&mut intel.upi_ids, candidate.to_string());
        }
    }

    for m in LINK_RE.find_iter(text) {
        let link = m.as_str().trim_end_matches(['.', ',', ')', '!', '?']);
        push_unique(&mut intel.links, link.to_string());
    }

    for caps in AMOUNT_RE.captures_iter(text) {
        if let Some(amount) = caps.get(1) {
            push_unique(&mut intel.amounts, amount.as_str().replace(',', ""));
        }
    }

    let lowered = text.to_lowercase();
    for keyword in SCAM_KEYWORDS {
        if lowered.contains(keyword) {
            intel.keywords.push(keyword.to_string());
        }
    }

    intel
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_phone_numbers() {
        let intel = extract("Call me on +91 9876543210 or 8123456789 now");
        assert_eq!(intel.phone_numbers, vec!["9876543210", "8123456789"]);
    }

    #[test]
    fn test_upi_vs_email() {
        let intel = extract("Send to fraudster@ybl or mail refunds@bank-help.com");
        assert_eq!(intel.upi_ids, vec!["fraudster@ybl"]);
        assert_eq!(intel.emails, vec!["refunds@bank-help.com"]);
    }

    #[test]
    fn test_links_amounts_keywords() {
        let intel = extract(
            "URGENT: your KYC is blocked. Pay Rs. 5,000 at https://sbi-kyc.example/update. Share OTP.",
        );
        assert_eq!(intel.links, vec!["https://sbi-kyc.example/update"]);
        assert_eq!(intel.amounts, vec!["5000"]);
        assert_eq!(intel.keywords, vec!["urgent", "blocked", "kyc", "otp"]);
    }

    #[test]
    fn test_rupee_symbol() {
        assert_eq!(extract("₹499 only").amounts, vec!["499"]);
    }

    #[test]
    fn test_clean_text_is_empty() {
        assert!(extract("Namaste, how are you?").is_empty());
    }
}
