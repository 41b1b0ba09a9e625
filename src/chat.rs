use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use rand::Rng;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

use crate::error::{DashboardError, Result};

pub const DEFAULT_REPLY_DELAY: Duration = Duration::from_millis(700);

pub const REPLIES: [&str; 6] = [
    "I'm here to help! Try asking about your SGPA or marks.",
    "You can view your growth chart after login.",
    "For privacy, your data is only visible to you.",
    "Contact harshadnikam@example.com for more support.",
    "Try refreshing the page if you face any issues.",
    "You can log out anytime using the logout button.",
];

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    User,
    Assistant,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct ChatEntry {
    pub origin: Origin,
    pub text: String,
    pub at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Clone)]
pub struct ChatView {
    pub open: bool,
    pub messages: Vec<ChatEntry>,
}

/// Canned-reply chat box. The reply never depends on what was typed.
pub struct ChatWidget {
    replies: Arc<Vec<String>>,
    log: Arc<Mutex<Vec<ChatEntry>>>,
    delay: Duration,
    open: bool,
}

impl ChatWidget {
    /// Every submission gets a reply, so the reply list must not be empty.
    pub fn new(replies: Vec<String>, delay: Duration) -> Result<Self> {
        if replies.is_empty() {
            return Err(DashboardError::EmptyReplies);
        }
        Ok(Self::build(replies, delay))
    }

    pub fn with_delay(delay: Duration) -> Self {
        Self::build(REPLIES.iter().map(|r| r.to_string()).collect(), delay)
    }

    fn build(replies: Vec<String>, delay: Duration) -> Self {
        ChatWidget {
            replies: Arc::new(replies),
            log: Arc::new(Mutex::new(Vec::new())),
            delay,
            open: false,
        }
    }

    pub fn replies(&self) -> &[String] {
        &self.replies
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn handle_key(&mut self, key: &str) {
        if key == "Escape" {
            self.close();
        }
    }

    pub fn messages(&self) -> Vec<ChatEntry> {
        self.log.lock().clone()
    }

    /// Appends the user's message and schedules an assistant reply. Blank
    /// input is ignored and schedules nothing. Must be called inside a tokio
    /// runtime.
    pub fn submit(&self, text: &str) -> Option<JoinHandle<()>> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        self.log.lock().push(ChatEntry {
            origin: Origin::User,
            text: text.to_string(),
            at: Utc::now(),
        });

        let log = Arc::clone(&self.log);
        let replies = Arc::clone(&self.replies);
        let delay = self.delay;

        Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let pick = rand::thread_rng().gen_range(0..replies.len());
            log.lock().push(ChatEntry {
                origin: Origin::Assistant,
                text: replies[pick].clone(),
                at: Utc::now(),
            });
        }))
    }

    pub fn view(&self) -> ChatView {
        ChatView {
            open: self.open,
            messages: self.messages(),
        }
    }
}

impl Default for ChatWidget {
    fn default() -> Self {
        Self::with_delay(DEFAULT_REPLY_DELAY)
    }
}
