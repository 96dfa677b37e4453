//! Document chat with in-process sessions

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, info};
use uuid::Uuid;

use super::error::{HandlerError, require_non_empty};
use super::types::ChatReply;
use crate::providers::{GenerationConfig, GenerationProvider, GenerationRequest, Message};

const TEMPERATURE: f32 = 0.8;
const MAX_OUTPUT_TOKENS: u32 = 150;

struct ChatSession {
    system_instruction: String,
    history: Vec<Message>,
    last_used: u64,
}

#[derive(Default)]
struct SessionStore {
    sessions: HashMap<String, ChatSession>,
    clock: u64,
}

impl SessionStore {
    fn tick(&mut self) -> u64 {
        self.clock += 1;
        self.clock
    }

    fn evict_lru(&mut self) {
        let oldest = self
            .sessions
            .iter()
            .min_by_key(|(_, session)| session.last_used)
            .map(|(id, _)| id.clone());

        if let Some(id) = oldest {
            debug!(session_id = %id, "Evicting chat session");
            self.sessions.remove(&id);
        }
    }
}

/// Multi-turn chat about an uploaded document
pub struct ChatHandler {
    generator: Arc<dyn GenerationProvider>,
    store: Mutex<SessionStore>,
    max_sessions: usize,
}

impl ChatHandler {
    pub fn new(generator: Arc<dyn GenerationProvider>, max_sessions: usize) -> Self {
        Self {
            generator,
            store: Mutex::new(SessionStore::default()),
            max_sessions: max_sessions.max(1),
        }
    }

    pub fn session_count(&self) -> usize {
        self.lock().sessions.len()
    }

    /// Answer `message` within the session, creating it when unknown.
    ///
    /// History only grows when generation succeeds.
    pub async fn handle(
        &self,
        message: &str,
        document_text: Option<&str>,
        session_id: Option<&str>,
    ) -> Result<ChatReply, HandlerError> {
        require_non_empty(message, "Message is required")?;

        let session_id = session_id
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_owned)
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        let (system_instruction, mut contents) = self.snapshot(&session_id, document_text);
        contents.push(Message::user(message));

        let request = GenerationRequest::conversation(
            Some(system_instruction),
            contents,
            GenerationConfig::default()
                .with_temperature(TEMPERATURE)
                .with_max_output_tokens(MAX_OUTPUT_TOKENS),
        );

        let text = self.generator.generate(request).await?;
        if text.trim().is_empty() {
            return Err(HandlerError::GenerationFailed(
                "no chat response generated".to_string(),
            ));
        }

        self.record_turn(&session_id, message, &text);
        info!(session_id = %session_id, "Chat reply generated");

        Ok(ChatReply { text, session_id })
    }

    /// Copy the session's prompt and history, creating the session if needed
    fn snapshot(&self, session_id: &str, document_text: Option<&str>) -> (String, Vec<Message>) {
        let mut store = self.lock();
        let now = store.tick();

        if !store.sessions.contains_key(session_id) {
            if store.sessions.len() >= self.max_sessions {
                store.evict_lru();
            }
            store.sessions.insert(
                session_id.to_string(),
                ChatSession {
                    system_instruction: build_chat_instruction(document_text),
                    history: Vec::new(),
                    last_used: now,
                },
            );
        }

        match store.sessions.get_mut(session_id) {
            Some(session) => {
                session.last_used = now;
                (session.system_instruction.clone(), session.history.clone())
            }
            None => (build_chat_instruction(document_text), Vec::new()),
        }
    }

    fn record_turn(&self, session_id: &str, message: &str, reply: &str) {
        let mut store = self.lock();
        let now = store.tick();

        // The session may have been evicted while the provider call was in flight
        if let Some(session) = store.sessions.get_mut(session_id) {
            session.history.push(Message::user(message));
            session.history.push(Message::model(reply));
            session.last_used = now;
        }
    }

    fn lock(&self) -> MutexGuard<'_, SessionStore> {
        self.store
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

pub fn build_chat_instruction(document_text: Option<&str>) -> String {
    let document = document_text
        .filter(|text| !text.trim().is_empty())
        .unwrap_or("No document content provided.");

    format!(
        "You are a helpful but friendly document assistant. The user has uploaded a document \
         and can ask questions about it or discuss general topics. Here is the document content:\n\n\
         {document}\n\n\
         Please provide a helpful response. If the question relates to the document, answer based on \
         its content while maintaining general knowledge accuracy. For non-document questions, \
         provide a helpful general response to the user's questions. Keep responses concise (2-5 sentences)."
    )
}
