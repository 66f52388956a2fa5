use std::sync::Arc;

use std::fmt::Display;

use chrono::{DateTime, TimeZone, Utc};
use tracing::{info, warn};

use crate::client::ClassroomApi;
use crate::error::AppError;
use crate::filters;
use crate::forms::Validate;
use crate::models::{Contact, Conversation, Message, NewMessageRequest};
use crate::services::Written;

/// Conversation list plus the currently open thread, from one user's point of view.
pub struct MessagingService {
    api: Arc<dyn ClassroomApi>,
    user_id: String,
    conversations: Vec<Conversation>,
    active_contact: Option<String>,
    thread: Vec<Message>,
}

impl MessagingService {
    pub fn new(api: Arc<dyn ClassroomApi>, user_id: impl Into<String>) -> Self {
        Self {
            api,
            user_id: user_id.into(),
            conversations: Vec::new(),
            active_contact: None,
            thread: Vec::new(),
        }
    }

    pub async fn refresh_conversations(&mut self) -> Result<&[Conversation], AppError> {
        match self.api.list_conversations().await {
            Ok(conversations) => {
                info!("Loaded {} conversations", conversations.len());
                self.conversations = conversations;
                Ok(&self.conversations)
            }
            Err(e) => {
                warn!("Failed to load conversations: {}", e);
                Err(e)
            }
        }
    }

    pub fn conversations(&self) -> &[Conversation] {
        &self.conversations
    }

    pub fn filtered(&self, term: &str) -> Vec<&Conversation> {
        filters::filter_conversations(&self.conversations, term)
    }

    /// First listed contact; a student has exactly one, their teacher.
    pub fn default_contact(&self) -> Option<&Contact> {
        self.conversations.first().map(|c| &c.contact)
    }

    pub fn active_contact(&self) -> Option<&str> {
        self.active_contact.as_deref()
    }

    pub fn thread(&self) -> &[Message] {
        &self.thread
    }

    pub fn is_sent(&self, message: &Message) -> bool {
        message.sender_id == self.user_id
    }

    pub async fn open(&mut self, contact_id: &str) -> Result<&[Message], AppError> {
        let mut messages = self.api.list_messages(contact_id).await.map_err(|e| {
            warn!("Failed to load messages with {}: {}", contact_id, e);
            e
        })?;
        messages.sort_by(|a, b| a.sent_at.cmp(&b.sent_at));

        self.active_contact = Some(contact_id.to_string());
        self.thread = messages;
        Ok(&self.thread)
    }

    /// Send to the open contact, then re-fetch the thread and the conversation list.
    /// Once the server has the message the send is `Ok`, whatever the re-fetches do.
    pub async fn send(&mut self, content: &str) -> Result<Written<Message>, AppError> {
        let recipient_id = self
            .active_contact
            .clone()
            .ok_or_else(|| AppError::Validation("No conversation selected".to_string()))?;

        let request = NewMessageRequest {
            recipient_id: recipient_id.clone(),
            content: content.trim().to_string(),
        };
        request.validate()?;

        let sent = self.api.send_message(&request).await.map_err(|e| {
            warn!("Failed to send message to {}: {}", recipient_id, e);
            e
        })?;

        info!("Sent message {} to {}", sent.id, recipient_id);
        let thread_ok = self.open(&recipient_id).await.is_ok();
        let conversations_ok = self.refresh_conversations().await.is_ok();
        Ok(Written {
            value: sent,
            refreshed: thread_ok && conversations_ok,
        })
    }
}

/// Most recent message exchanged between `a` and `b`.
pub fn latest_message<'a>(messages: &'a [Message], a: &str, b: &str) -> Option<&'a Message> {
    messages
        .iter()
        .filter(|m| m.is_between(a, b))
        .max_by(|x, y| x.sent_at.cmp(&y.sent_at))
}

pub fn summarize_conversation(
    contact: Contact,
    messages: &[Message],
    user_id: &str,
) -> Conversation {
    let last_message = latest_message(messages, user_id, &contact.id).cloned();
    Conversation {
        contact,
        last_message,
    }
}

/// Short label for a message time: clock time within a day, weekday within a week, else the
/// date. The age is measured in absolute time; the label is rendered in `tz`, normally `Local`.
pub fn message_time_label<Tz>(sent_at: DateTime<Utc>, now: DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let hours = (now - sent_at).num_minutes() as f64 / 60.0;
    let local = sent_at.with_timezone(tz);
    if hours < 24.0 {
        local.format("%H:%M").to_string()
    } else if hours < 168.0 {
        local.format("%a %H:%M").to_string()
    } else {
        local.format("%b %-d").to_string()
    }
}
