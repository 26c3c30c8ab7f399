use shared::model::{ChatMessage, ChatRole, Persona};
use std::collections::HashMap;
use tracing::{info, warn};

use crate::app::GenerationRequest;

const ASSISTANT_INSTRUCTION: &str = "You are Nexus, a friendly and knowledgeable AI learning \
assistant. Your goal is to help users with their studies. Be encouraging, clear, and concise. \
Format your answers with markdown for readability.";

const TUTOR_INSTRUCTION: &str = "You are a world-class AI Tutor. Your purpose is to guide \
students to a deeper understanding of topics using the Socratic method. Do not simply give \
answers. Instead, ask probing questions, break down complex concepts into smaller pieces, use \
analogies, and frequently check for understanding. Your tone should be patient, encouraging, \
and highly educational. Lead the student to their own discovery. Format your dialogue with \
markdown.";

/// Oldest turns are dropped once a conversation grows past this.
pub const MAX_HISTORY: usize = 100;

pub fn system_instruction(persona: Persona) -> &'static str {
    match persona {
        Persona::Assistant => ASSISTANT_INSTRUCTION,
        Persona::Tutor => TUTOR_INSTRUCTION,
    }
}

/// Conversation state for one persona.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatSession {
    persona: Persona,
    history: Vec<ChatMessage>,
}

impl ChatSession {
    fn new(persona: Persona) -> Self {
        Self {
            persona,
            history: Vec::new(),
        }
    }

    pub fn persona(&self) -> Persona {
        self.persona
    }

    pub fn system_instruction(&self) -> &'static str {
        system_instruction(self.persona)
    }

    pub fn history(&self) -> &[ChatMessage] {
        &self.history
    }

    fn push(&mut self, role: ChatRole, content: String) {
        self.history.push(ChatMessage { role, content });
        if self.history.len() > MAX_HISTORY {
            let excess = self.history.len() - MAX_HISTORY;
            self.history.drain(..excess);
        }
    }
}

/// One lazily created conversation per persona, reused for the lifetime of the
/// registry.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: HashMap<Persona, ChatSession>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the persona's session, creating it on first use.
    pub fn session(&mut self, persona: Persona) -> &mut ChatSession {
        self.sessions.entry(persona).or_insert_with(|| {
            info!("Creating {} chat session", persona.as_str());
            ChatSession::new(persona)
        })
    }

    pub fn get(&self, persona: Persona) -> Option<&ChatSession> {
        self.sessions.get(&persona)
    }

    /// Append a user message and build the request for the AI client.
    pub fn send(&mut self, persona: Persona, message: &str) -> GenerationRequest {
        let session = self.session(persona);
        session.push(ChatRole::User, message.to_string());

        GenerationRequest::Chat {
            persona,
            system_instruction: session.system_instruction().to_string(),
            history: session.history().to_vec(),
        }
    }

    /// Append the model's answer. Returns `false` when the persona has no
    /// conversation to answer.
    pub fn record_reply(&mut self, persona: Persona, reply: &str) -> bool {
        match self.sessions.get_mut(&persona) {
            Some(session) => {
                session.push(ChatRole::Model, reply.to_string());
                true
            }
            None => {
                warn!("Dropping reply for {}: no chat session", persona.as_str());
                false
            }
        }
    }

    /// Drop the persona's conversation; the next use starts a fresh one.
    pub fn reset(&mut self, persona: Persona) -> bool {
        self.sessions.remove(&persona).is_some()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sessions_created_lazily() {
        let mut registry = SessionRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.get(Persona::Tutor).is_none());

        registry.session(Persona::Tutor);
        assert_eq!(registry.len(), 1);
        assert!(registry.get(Persona::Assistant).is_none());
    }

    #[test]
    fn test_session_is_reused() {
        let mut registry = SessionRegistry::new();
        registry.send(Persona::Assistant, "hello");
        registry.send(Persona::Assistant, "what is photosynthesis?");

        assert_eq!(registry.len(), 1);
        let session = registry.get(Persona::Assistant).unwrap();
        assert_eq!(session.history().len(), 2);
        assert_eq!(session.history()[1].content, "what is photosynthesis?");
    }

    #[test]
    fn test_personas_are_isolated() {
        let mut registry = SessionRegistry::new();
        registry.send(Persona::Assistant, "hi");
        registry.send(Persona::Tutor, "teach me");
        registry.record_reply(Persona::Tutor, "What do you already know?");

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get(Persona::Assistant).unwrap().history().len(), 1);
        let tutor = registry.get(Persona::Tutor).unwrap();
        assert_eq!(tutor.history().len(), 2);
        assert_eq!(tutor.history()[1].role, ChatRole::Model);
    }

    #[test]
    fn test_send_builds_chat_request() {
        let mut registry = SessionRegistry::new();
        match registry.send(Persona::Tutor, "why do leaves fall?") {
            GenerationRequest::Chat {
                persona,
                system_instruction,
                history,
            } => {
                assert_eq!(persona, Persona::Tutor);
                assert!(system_instruction.contains("Socratic"));
                assert_eq!(history.len(), 1);
                assert_eq!(history[0].role, ChatRole::User);
            }
            other => panic!("unexpected request: {other:?}"),
        }
    }

    #[test]
    fn test_reply_needs_a_session() {
        let mut registry = SessionRegistry::new();
        assert!(!registry.record_reply(Persona::Assistant, "Hello!"));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_reply_is_sent_with_next_message() {
        let mut registry = SessionRegistry::new();
        registry.send(Persona::Tutor, "why is the sky blue?");
        assert!(registry.record_reply(Persona::Tutor, "What do you know about light?"));

        match registry.send(Persona::Tutor, "and sunsets?") {
            GenerationRequest::Chat { history, .. } => {
                let roles: Vec<ChatRole> = history.iter().map(|m| m.role).collect();
                assert_eq!(roles, vec![ChatRole::User, ChatRole::Model, ChatRole::User]);
            }
            other => panic!("unexpected request: {other:?}"),
        }
    }

    #[test]
    fn test_history_is_bounded() {
        let mut registry = SessionRegistry::new();
        for i in 0..MAX_HISTORY + 5 {
            registry.send(Persona::Assistant, &format!("message {i}"));
        }

        let history = registry.get(Persona::Assistant).unwrap().history();
        assert_eq!(history.len(), MAX_HISTORY);
        assert_eq!(history[0].content, "message 5");
        assert_eq!(
            history[MAX_HISTORY - 1].content,
            format!("message {}", MAX_HISTORY + 4)
        );
    }

    #[test]
    fn test_reset_starts_fresh() {
        let mut registry = SessionRegistry::new();
        registry.send(Persona::Assistant, "hi");
        assert!(registry.reset(Persona::Assistant));
        assert!(!registry.reset(Persona::Assistant));
        assert!(registry.session(Persona::Assistant).history().is_empty());
    }
}
