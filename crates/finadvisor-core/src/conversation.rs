//! UI-agnostic conversation state
//!
//! The store owns every mutation of the chat: the append-only message list,
//! the draft the user is typing, and the busy flag that gates submissions
//! while a reply is pending.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Greeting seeded into a fresh conversation so an empty chat still shows
/// how to start.
pub const GREETING: &str = "Hello! I'm your AI Financial Advisor. I can help you with taxes, loans, investments, financial planning, and more. What financial question can I help you with today?";

/// A chat message. Immutable once appended.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: u64,
    pub content: String,
    pub sender: Sender,
    pub timestamp: DateTime<Local>,
}

/// Who authored a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sender {
    User,
    Assistant,
}

/// Convert a character index to a byte index for UTF-8 safe string operations
fn char_to_byte_index(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

/// The conversation state machine.
///
/// Two states: idle (`busy == false`) and awaiting a reply (`busy == true`).
/// `submit` moves idle -> awaiting and hands back the submitted text so the
/// caller can schedule the reply; `complete` moves awaiting -> idle. At most
/// one reply is in flight because `submit` rejects while busy.
pub struct Conversation {
    messages: Vec<Message>,
    draft: String,
    busy: bool,
    next_id: u64,
}

impl Conversation {
    pub fn new() -> Self {
        let mut conversation = Self {
            messages: Vec::new(),
            draft: String::new(),
            busy: false,
            next_id: 1,
        };
        conversation.push(Sender::Assistant, GREETING.to_string());
        conversation
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn draft_char_count(&self) -> usize {
        self.draft.chars().count()
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Whether a submit would be accepted: non-blank draft and no reply
    /// pending. Drives the send control's enabled state.
    pub fn can_submit(&self) -> bool {
        !self.busy && !self.draft.trim().is_empty()
    }

    // Draft editing. Indices are character positions; the store does the
    // byte math so callers only track a cursor.

    pub fn insert_char(&mut self, char_idx: usize, c: char) {
        let byte_pos = char_to_byte_index(&self.draft, char_idx);
        self.draft.insert(byte_pos, c);
    }

    pub fn remove_char(&mut self, char_idx: usize) {
        if char_idx < self.draft.chars().count() {
            let byte_pos = char_to_byte_index(&self.draft, char_idx);
            self.draft.remove(byte_pos);
        }
    }

    /// Accept the draft as a user message. Returns the submitted text for
    /// reply scheduling, or `None` (no state change) when the draft is
    /// blank or a reply is already pending.
    pub fn submit(&mut self) -> Option<String> {
        if !self.can_submit() {
            return None;
        }
        let content = std::mem::take(&mut self.draft);
        self.push(Sender::User, content.clone());
        self.busy = true;
        Some(content)
    }

    /// Append the advisor's reply and return to idle. Every accepted submit
    /// leads here exactly once; there is no cancellation path.
    pub fn complete(&mut self, response: String) {
        self.push(Sender::Assistant, response);
        self.busy = false;
    }

    fn push(&mut self, sender: Sender, content: String) {
        let id = self.next_id;
        self.next_id += 1;
        self.messages.push(Message {
            id,
            content,
            sender,
            timestamp: Local::now(),
        });
    }
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}
