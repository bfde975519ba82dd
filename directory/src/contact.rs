// directory/src/contact.rs

//! Admin inbox for contact-form messages. Messages live in process memory
//! only and are seeded with demo content; nothing is sent to the backend.

use chrono::{Duration, Utc};
use models::{ContactMessage, DirectoryError, DirectoryResult, MessageStatus, RecordId};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::filter::contains_ignore_case;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    pub total: usize,
    pub new: usize,
    pub read: usize,
    pub replied: usize,
    pub archived: usize,
}

#[derive(Debug, Clone, Default)]
pub struct ContactInbox {
    messages: Vec<ContactMessage>,
}

impl ContactInbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_demo_messages() -> Self {
        let now = Utc::now();
        let demo = |minutes_ago: i64, name: &str, email: &str, subject: &str, body: &str, status| ContactMessage {
            id: RecordId::from(Uuid::new_v4()),
            name: name.to_string(),
            email: email.to_string(),
            subject: subject.to_string(),
            message: body.to_string(),
            created_at: now - Duration::minutes(minutes_ago),
            status,
        };
        Self {
            messages: vec![
                demo(
                    15,
                    "Priya Sharma",
                    "priya.sharma@example.com",
                    "Listing correction",
                    "The phone number shown for City General Hospital is out of date.",
                    MessageStatus::New,
                ),
                demo(
                    180,
                    "Arjun Nair",
                    "arjun.nair@example.com",
                    "Add our clinic",
                    "We would like our pediatric clinic in Kochi to be listed.",
                    MessageStatus::New,
                ),
                demo(
                    60 * 26,
                    "Sara Thomas",
                    "sara.thomas@example.com",
                    "Lab timings",
                    "Does Precision Diagnostics open on Sundays?",
                    MessageStatus::Read,
                ),
                demo(
                    60 * 72,
                    "Vikram Singh",
                    "vikram.singh@example.com",
                    "Thank you",
                    "Found a cardiologist near me within minutes. Great service.",
                    MessageStatus::Replied,
                ),
            ],
        }
    }

    /// Records a message submitted through the public contact form.
    pub fn submit(&mut self, name: &str, email: &str, subject: &str, message: &str) -> ContactMessage {
        let received = ContactMessage {
            id: RecordId::from(Uuid::new_v4()),
            name: name.trim().to_string(),
            email: email.trim().to_string(),
            subject: subject.trim().to_string(),
            message: message.trim().to_string(),
            created_at: Utc::now(),
            status: MessageStatus::New,
        };
        self.messages.push(received.clone());
        received
    }

    /// Messages matching `status` and `term` (name, email, subject or body),
    /// newest first.
    pub fn list(&self, status: Option<MessageStatus>, term: Option<&str>) -> Vec<&ContactMessage> {
        let term = term.map(str::trim).filter(|t| !t.is_empty());
        let mut visible: Vec<&ContactMessage> = self
            .messages
            .iter()
            .filter(|m| status.is_none_or(|s| m.status == s))
            .filter(|m| {
                term.is_none_or(|t| {
                    [&m.name, &m.email, &m.subject, &m.message]
                        .iter()
                        .any(|field| contains_ignore_case(field, t))
                })
            })
            .collect();
        visible.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        visible
    }

    /// Returns the message, marking a new one as read.
    pub fn open(&mut self, id: &RecordId) -> DirectoryResult<ContactMessage> {
        let message = self.find_mut(id)?;
        if message.status == MessageStatus::New {
            message.status = MessageStatus::Read;
        }
        Ok(message.clone())
    }

    pub fn mark_replied(&mut self, id: &RecordId) -> DirectoryResult<ContactMessage> {
        self.set_status(id, MessageStatus::Replied)
    }

    pub fn archive(&mut self, id: &RecordId) -> DirectoryResult<ContactMessage> {
        self.set_status(id, MessageStatus::Archived)
    }

    pub fn delete(&mut self, id: &RecordId) -> DirectoryResult<()> {
        let before = self.messages.len();
        self.messages.retain(|m| &m.id != id);
        if self.messages.len() == before {
            return Err(not_found(id));
        }
        info!(%id, "deleted contact message");
        Ok(())
    }

    pub fn counts(&self) -> StatusCounts {
        let mut counts = StatusCounts {
            total: self.messages.len(),
            ..Default::default()
        };
        for message in &self.messages {
            match message.status {
                MessageStatus::New => counts.new += 1,
                MessageStatus::Read => counts.read += 1,
                MessageStatus::Replied => counts.replied += 1,
                MessageStatus::Archived => counts.archived += 1,
            }
        }
        counts
    }

    fn set_status(&mut self, id: &RecordId, status: MessageStatus) -> DirectoryResult<ContactMessage> {
        let message = self.find_mut(id)?;
        message.status = status;
        info!(%id, ?status, "contact message status changed");
        Ok(message.clone())
    }

    fn find_mut(&mut self, id: &RecordId) -> DirectoryResult<&mut ContactMessage> {
        self.messages
            .iter_mut()
            .find(|m| &m.id == id)
            .ok_or_else(|| not_found(id))
    }
}

fn not_found(id: &RecordId) -> DirectoryError {
    DirectoryError::NotFound(format!("contact message {id}"))
}
