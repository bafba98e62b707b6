// src/prompt/builder.rs

use serde::{Deserialize, Serialize};

use crate::persona::PersonaId;

/// One message of caller-owned conversation history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub sender: String,
    pub text: String,
}

impl ConversationTurn {
    pub fn new(sender: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            sender: sender.into(),
            text: text.into(),
        }
    }
}

/// The prompt for one request. Built once and shared read-only by every
/// provider attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssembledPrompt {
    pub persona: PersonaId,
    /// Persona instructions on their own, for providers with a system role
    pub system: String,
    /// History, new message and reply instruction
    pub body: String,
}

impl AssembledPrompt {
    /// Single flattened text for providers that take one blob
    pub fn blob(&self) -> String {
        format!("{}\n\n{}", self.system, self.body)
    }
}

/// Renders the last `window` turns (all of them when `None`), one
/// `"{sender}: {text}"` line per turn.
pub fn build_conversation_context(history: &[ConversationTurn], window: Option<usize>) -> String {
    let start_idx = match window {
        Some(n) => history.len().saturating_sub(n),
        None => 0,
    };

    history[start_idx..]
        .iter()
        .map(|turn| format!("{}: {}", turn.sender, turn.text))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Builds the full prompt: persona, history, new message, reply instruction
pub fn build_prompt(
    persona: PersonaId,
    history: &[ConversationTurn],
    window: Option<usize>,
    user_text: &str,
) -> AssembledPrompt {
    let profile = persona.profile();
    let mut body = String::new();

    // 1. Conversation so far
    let context = build_conversation_context(history, window);
    if !context.is_empty() {
        body.push_str("CONVERSATION SO FAR:\n");
        body.push_str(&context);
        body.push_str("\n\n");
    }

    // 2. The new inbound message
    body.push_str(&format!("Scammer: {}\n\n", user_text));

    // 3. Stay in character
    body.push_str(&format!(
        "Reply as {} ({}). Reply in under 30 words. Sound 100% human. ",
        profile.display_name, profile.role
    ));
    body.push_str("Include disfluencies (umm, uh, acha, thoda wait) to sound real. ");
    body.push_str("Never admit you are an AI.");

    AssembledPrompt {
        persona,
        system: profile.system_prompt.trim().to_string(),
        body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history() -> Vec<ConversationTurn> {
        vec![
            ConversationTurn::new("scammer", "Your account is blocked"),
            ConversationTurn::new("user", "Hai Ram, kaise?"),
            ConversationTurn::new("scammer", "Share OTP now"),
        ]
    }

    #[test]
    fn test_context_renders_every_turn_by_default() {
        let context = build_conversation_context(&history(), None);
        assert_eq!(
            context,
            "scammer: Your account is blocked\nuser: Hai Ram, kaise?\nscammer: Share OTP now"
        );
    }

    #[test]
    fn test_context_window_keeps_suffix() {
        let context = build_conversation_context(&history(), Some(2));
        assert_eq!(context, "user: Hai Ram, kaise?\nscammer: Share OTP now");

        let oversized = build_conversation_context(&history(), Some(10));
        assert_eq!(oversized.lines().count(), 3);
    }

    #[test]
    fn test_prompt_order() {
        let prompt = build_prompt(PersonaId::Savitri, &history(), None, "Pay 5000 now");
        let blob = prompt.blob();

        let persona_at = blob.find("Savitri Devi").unwrap();
        let history_at = blob.find("scammer: Your account is blocked").unwrap();
        let message_at = blob.find("Scammer: Pay 5000 now").unwrap();
        let instruction_at = blob.find("Reply as Savitri Devi").unwrap();

        assert!(persona_at < history_at);
        assert!(history_at < message_at);
        assert!(message_at < instruction_at);
    }

    #[test]
    fn test_empty_history_has_no_context_section() {
        let prompt = build_prompt(PersonaId::Rahul, &[], None, "Hello sir");
        assert!(!prompt.body.contains("CONVERSATION SO FAR"));
        assert!(prompt.body.starts_with("Scammer: Hello sir"));
        assert_eq!(prompt.system, PersonaId::Rahul.prompt().trim());
    }
}
