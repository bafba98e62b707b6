// src/forensics/bait.rs
// Bait handed to scammers who ask for money: a fake payment receipt and a
// download link that reports back when opened

use chrono::{DateTime, Utc};
use rand::seq::IndexedRandom;
use rand::Rng;
use serde::Serialize;

/// File names offered as bait downloads
pub const BAIT_FILES: [&str; 4] = [
    "SBI_KYC_Update_v2.apk",
    "Refund_Form_2026.pdf",
    "Video_Proof_Leaked.mp4",
    "Claim_Bonus_Reward.html",
];

/// Page served for every bait file
pub const BAIT_PAGE_HTML: &str =
    "<html><h1>System Error: IP Logged... Just kidding, you are caught!</h1></html>";

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PaymentBait {
    pub kind: &'static str,
    pub status: &'static str,
    pub txn_id: String,
    pub bank_ref: String,
    pub amount: String,
    pub paid_to: &'static str,
    pub message: &'static str,
    pub paid_on: DateTime<Utc>,
}

/// Receipt in the shape of a UPI "Payment Successful" screen
pub fn fake_payment<R: Rng + ?Sized>(rng: &mut R, amount: &str) -> PaymentBait {
    PaymentBait {
        kind: "payment_receipt",
        status: "Payment Successful",
        txn_id: format!("T{}", rng.random_range(230_000_000_000u64..=239_999_999_999)),
        bank_ref: rng.random_range(100_000_000_000u64..=999_999_999_999).to_string(),
        amount: amount.to_string(),
        paid_to: "Scammer Account",
        message: "Payment from Victim",
        paid_on: Utc::now(),
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TrackingLink {
    pub file_name: &'static str,
    pub url: String,
}

pub fn is_bait_file(name: &str) -> bool {
    BAIT_FILES.contains(&name)
}

/// Random bait file under `link_base`
pub fn tracking_link<R: Rng + ?Sized>(rng: &mut R, link_base: &str) -> TrackingLink {
    let file_name = *BAIT_FILES.choose(rng).unwrap_or(&BAIT_FILES[0]);
    TrackingLink {
        file_name,
        url: format!("{}/{}", link_base.trim_end_matches('/'), file_name),
    }
}

/// Everything attached to a reply once payment talk is detected
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct BaitPayload {
    #[serde(flatten)]
    pub receipt: PaymentBait,
    pub tracking_link: TrackingLink,
}

#[derive(Debug, Clone)]
pub struct BaitGenerator {
    amount: String,
    link_base: String,
}

impl BaitGenerator {
    pub fn new(amount: impl Into<String>, link_base: impl Into<String>) -> Self {
        Self {
            amount: amount.into(),
            link_base: link_base.into(),
        }
    }

    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> BaitPayload {
        BaitPayload {
            receipt: fake_payment(rng, &self.amount),
            tracking_link: tracking_link(rng, &self.link_base),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_identifier_shapes() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let bait = fake_payment(&mut rng, "5000");
            assert_eq!(bait.txn_id.len(), 13);
            assert!(bait.txn_id.starts_with("T23"));
            assert_eq!(bait.bank_ref.len(), 12);
            assert!(bait.bank_ref.chars().all(|c| c.is_ascii_digit()));
            assert_eq!(bait.amount, "5000");
        }
    }

    #[test]
    fn test_serializes_for_response() {
        let bait = fake_payment(&mut rand::rng(), "1999");
        let value = serde_json::to_value(&bait).unwrap();
        assert_eq!(value["kind"], "payment_receipt");
        assert_eq!(value["amount"], "1999");
        assert!(value["paid_on"].is_string());
    }

    #[test]
    fn test_tracking_link_uses_known_file() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..50 {
            let link = tracking_link(&mut rng, "https://bait.example/assets/");
            assert!(is_bait_file(link.file_name));
            assert_eq!(link.url, format!("https://bait.example/assets/{}", link.file_name));
        }
        assert!(!is_bait_file("../secrets.txt"));
    }

    #[test]
    fn test_payload_flattens_receipt() {
        let generator = BaitGenerator::new("2500", "/assets");
        let value = serde_json::to_value(generator.generate(&mut rand::rng())).unwrap();
        assert_eq!(value["status"], "Payment Successful");
        assert_eq!(value["amount"], "2500");
        assert!(value["tracking_link"]["url"].as_str().unwrap().starts_with("/assets/"));
    }
}
