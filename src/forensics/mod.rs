// src/forensics/mod.rs
// Collaborators around the reply pipeline: risk scoring, intelligence
// extraction, payment bait, interaction logging and compliance reporting.

pub mod bait;
pub mod intel;
pub mod report;
pub mod risk;
pub mod store;

pub use bait::{fake_payment, tracking_link, BaitGenerator, BaitPayload, PaymentBait, TrackingLink};
pub use intel::{extract, Intelligence};
pub use report::{ComplianceReport, ComplianceReporter};
pub use store::{InteractionRecord, InteractionStore, NewInteraction};
