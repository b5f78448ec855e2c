use std::collections::HashMap;

use crate::models::{Conversation, MessageRecord};

/// Conversations keyed by address, in order of first appearance.
#[derive(Debug, Clone, Default)]
pub struct ConversationIndex {
    conversations: Vec<Conversation>,
    by_address: HashMap<String, usize>,
}

impl ConversationIndex {
    pub fn get(&self, address: &str) -> Option<&Conversation> {
        self.by_address
            .get(address)
            .map(|idx| &self.conversations[*idx])
    }

    pub fn into_conversation(self, address: &str) -> Option<Conversation> {
        let idx = *self.by_address.get(address)?;
        self.conversations.into_iter().nth(idx)
    }

    pub fn len(&self) -> usize {
        self.conversations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conversations.is_empty()
    }

    /// Most recent conversation first. Equal dates keep first-appearance order.
    pub fn into_recent_first(self) -> Vec<Conversation> {
        let mut list = self.conversations;
        list.sort_by(|a, b| b.last_message.date.cmp(&a.last_message.date));
        list
    }
}

/// Groups records by address.
///
/// The label is the contact name on the newest message that has one, falling
/// back to the address. The last message is the one with the greatest date;
/// on equal dates the earlier record in `records` is kept.
pub fn index_conversations(records: &[MessageRecord]) -> ConversationIndex {
    let mut index = ConversationIndex::default();
    for record in records {
        let existing = index.by_address.get(&record.address).copied();
        match existing {
            Some(idx) => {
                let conversation = &mut index.conversations[idx];
                if record.date > conversation.last_message.date {
                    conversation.last_message = record.clone();
                }
                conversation.messages.push(record.clone());
            }
            None => {
                index
                    .by_address
                    .insert(record.address.clone(), index.conversations.len());
                index.conversations.push(Conversation {
                    address: record.address.clone(),
                    label: record.address.clone(),
                    messages: vec![record.clone()],
                    last_message: record.clone(),
                });
            }
        }
    }
    for conversation in &mut index.conversations {
        // stable: equal dates stay in input order
        conversation.messages.sort_by_key(|message| message.date);
        if let Some(named) = conversation
            .messages
            .iter()
            .rev()
            .find(|message| message.has_known_contact())
        {
            conversation.label = named.contact_name.clone();
        }
    }
    index
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UNKNOWN_CONTACT;

    fn record(address: &str, date: i64, body: &str, contact: &str) -> MessageRecord {
        MessageRecord {
            address: address.to_string(),
            date,
            body: body.to_string(),
            contact_name: contact.to_string(),
            ..MessageRecord::default()
        }
    }

    #[test]
    fn groups_by_address_with_last_message() {
        let records = vec![
            record("33612345678", 200, "hey", "Alice"),
            record("33612345678", 100, "hi", "Alice"),
            record("36180", 150, "code 1234", UNKNOWN_CONTACT),
        ];
        let index = index_conversations(&records);
        assert_eq!(index.len(), 2);
        let alice = index.get("33612345678").expect("alice");
        assert_eq!(alice.label, "Alice");
        assert_eq!(alice.last_message.date, 200);
        assert_eq!(alice.messages[0].date, 100);
        assert_eq!(alice.messages[1].date, 200);
        assert_eq!(index.get("36180").expect("short code").label, "36180");
    }

    #[test]
    fn recent_first_ordering() {
        let records = vec![
            record("a", 10, "x", "A"),
            record("b", 30, "x", "B"),
            record("c", 20, "x", "C"),
        ];
        let list = index_conversations(&records).into_recent_first();
        let order: Vec<&str> = list.iter().map(|c| c.address.as_str()).collect();
        assert_eq!(order, vec!["b", "c", "a"]);
    }

    #[test]
    fn equal_dates_keep_input_order() {
        let records = vec![
            record("a", 10, "first", "A"),
            record("a", 10, "second", "A"),
            record("a", 5, "older", "A"),
        ];
        let index = index_conversations(&records);
        let conversation = index.get("a").expect("a");
        assert_eq!(conversation.last_message.body, "first");
        let bodies: Vec<&str> = conversation.messages.iter().map(|m| m.body.as_str()).collect();
        assert_eq!(bodies, vec!["older", "first", "second"]);
    }

    #[test]
    fn label_follows_newest_known_contact() {
        let records = vec![
            record("a", 10, "x", UNKNOWN_CONTACT),
            record("a", 1, "y", "Bob"),
            record("a", 5, "z", "Robert"),
        ];
        let index = index_conversations(&records);
        let conversation = index.get("a").expect("a");
        assert_eq!(conversation.label, "Robert");
        assert_eq!(conversation.last_message.contact_name, UNKNOWN_CONTACT);
    }

    #[test]
    fn label_ignores_store_order() {
        let bob = record("a", 1, "earlier", "Bob");
        let robert = record("a", 9, "later", "Robert");
        let newest_first = vec![robert.clone(), bob.clone()];
        let oldest_first = vec![bob, robert];
        assert_eq!(index_conversations(&newest_first).get("a").expect("a").label, "Robert");
        assert_eq!(index_conversations(&oldest_first).get("a").expect("a").label, "Robert");
    }

    #[test]
    fn empty_input_has_no_conversations() {
        assert!(index_conversations(&[]).is_empty());
    }
}
