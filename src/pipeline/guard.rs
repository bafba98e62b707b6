// src/pipeline/guard.rs
// Handover guard: suspicion keywords end automated replies immediately

/// Fixed reply sent instead of a persona reply once a trigger is seen
pub const HANDOVER_ALERT: &str =
    "⚠️ [SYSTEM HANDOVER]: Risk Threshold Breached. Call transferred to Human Operator.";

#[derive(Debug, Clone)]
pub struct HandoverGuard {
    // Stored lowercased
    triggers: Vec<String>,
}

impl HandoverGuard {
    /// Blank keywords are dropped; they would match every message.
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let triggers = keywords
            .into_iter()
            .map(|k| k.as_ref().trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();
        Self { triggers }
    }

    /// First trigger contained in `text`, compared case-insensitively
    pub fn matched_trigger(&self, text: &str) -> Option<&str> {
        let lowered = text.to_lowercase();
        self.triggers
            .iter()
            .find(|trigger| lowered.contains(trigger.as_str()))
            .map(|t| t.as_str())
    }

    pub fn should_hand_over(&self, text: &str) -> bool {
        self.matched_trigger(text).is_some()
    }
}
