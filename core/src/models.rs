use serde::{Deserialize, Serialize};

/// Contact name used when the backup file carries none.
pub const UNKNOWN_CONTACT: &str = "(Unknown)";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageRecord {
    /// Assigned by the store on insert.
    pub id: Option<i64>,
    pub address: String,
    pub date: i64,
    pub date_sent: i64,
    #[serde(rename = "type")]
    pub message_type: i64,
    pub body: String,
    pub contact_name: String,
    pub readable_date: String,
    pub protocol: String,
    pub subject: String,
    pub toa: String,
    pub sc_toa: String,
    pub service_center: String,
    pub read: String,
    pub status: String,
    pub locked: String,
    pub sub_id: String,
}

impl Default for MessageRecord {
    fn default() -> Self {
        MessageRecord {
            id: None,
            address: String::new(),
            date: 0,
            date_sent: 0,
            message_type: 0,
            body: String::new(),
            contact_name: UNKNOWN_CONTACT.to_string(),
            readable_date: String::new(),
            protocol: String::new(),
            subject: String::new(),
            toa: String::new(),
            sc_toa: String::new(),
            service_center: String::new(),
            read: "0".to_string(),
            status: String::new(),
            locked: "0".to_string(),
            sub_id: String::new(),
        }
    }
}

impl MessageRecord {
    pub fn identity_key(&self) -> IdentityKey {
        IdentityKey {
            address: self.address.clone(),
            date: self.date,
            body: self.body.clone(),
        }
    }

    pub fn direction(&self) -> Direction {
        Direction::from_type(self.message_type)
    }

    pub fn has_known_contact(&self) -> bool {
        self.contact_name != UNKNOWN_CONTACT
    }

    /// Contact name, or the address when the contact is unknown.
    pub fn display_label(&self) -> &str {
        if self.has_known_contact() {
            &self.contact_name
        } else {
            &self.address
        }
    }
}

/// Deduplication identity: two records with equal keys are the same message.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct IdentityKey {
    pub address: String,
    pub date: i64,
    pub body: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Received,
    Sent,
    Unspecified,
}

impl Direction {
    pub fn from_type(message_type: i64) -> Self {
        match message_type {
            1 => Direction::Received,
            2 => Direction::Sent,
            _ => Direction::Unspecified,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    pub address: String,
    pub label: String,
    /// Chronological, ties kept in input order.
    pub messages: Vec<MessageRecord>,
    pub last_message: MessageRecord,
}

impl Conversation {
    pub fn message_count(&self) -> usize {
        self.messages.len()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationSummary {
    pub address: String,
    pub label: String,
    pub message_count: i64,
    pub last_message: MessageRecord,
    pub preview: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    pub message: MessageRecord,
    pub label: String,
    /// Byte ranges of the query inside `message.body`.
    pub body_matches: Vec<(usize, usize)>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageContext {
    pub conversation: Conversation,
    pub position: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchiveStats {
    pub messages: i64,
    pub conversations: i64,
    pub received: i64,
    pub sent: i64,
    pub first_date: Option<i64>,
    pub last_date: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileOutcome {
    pub name: String,
    pub sha256: String,
    pub parsed: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileFailure {
    pub file_name: String,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportReport {
    pub import_id: String,
    pub added_count: i64,
    pub total_count: i64,
    pub files: Vec<FileOutcome>,
    pub failures: Vec<FileFailure>,
}

impl ImportReport {
    pub fn summary(&self) -> String {
        if self.added_count == 0 && self.failures.is_empty() {
            return format!("No new messages ({} total)", self.total_count);
        }
        format!(
            "{} files failed, {} messages added ({} total)",
            self.failures.len(),
            self.added_count,
            self.total_count
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ImportProgress {
    Processing {
        current: usize,
        total: usize,
        file_name: String,
    },
    Saving {
        new_records: usize,
    },
    Idle,
}
