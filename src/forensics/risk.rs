// src/forensics/risk.rs
// Keyword risk score for an inbound message

pub const BASELINE_RISK: u8 = 45;
pub const PAYMENT_RISK: u8 = 98;
pub const HANDOVER_RISK: u8 = 100;

const PAYMENT_MARKERS: [&str; 2] = ["pay", "upi"];

/// Payment talk pushes a message to high risk; a handover is the maximum.
pub fn score(user_text: &str, handed_over: bool) -> u8 {
    if handed_over {
        return HANDOVER_RISK;
    }

    let lowered = user_text.to_lowercase();
    if PAYMENT_MARKERS.iter().any(|m| lowered.contains(m)) {
        PAYMENT_RISK
    } else {
        BASELINE_RISK
    }
}

/// High enough to hand out payment bait
pub fn is_payment_risk(score: u8) -> bool {
    score >= PAYMENT_RISK
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scores() {
        assert_eq!(score("Hello sir", false), BASELINE_RISK);
        assert_eq!(score("Please PAY the fine", false), PAYMENT_RISK);
        assert_eq!(score("send to my UPI", false), PAYMENT_RISK);
        assert_eq!(score("Hello sir", true), HANDOVER_RISK);
    }

    #[test]
    fn test_bait_threshold() {
        assert!(is_payment_risk(PAYMENT_RISK));
        assert!(is_payment_risk(HANDOVER_RISK));
        assert!(!is_payment_risk(BASELINE_RISK));
    }
}
