use crate::conversations::index_conversations;
use crate::error::CoreError;
use crate::models::{
    ArchiveStats, Conversation, ConversationSummary, Direction, MessageContext, MessageRecord,
    SearchHit,
};
use crate::search::{match_ranges, search_records};
use crate::store::MessageStore;

const PREVIEW_CHARS: usize = 50;

pub fn list_conversations<S: MessageStore>(
    store: &S,
) -> Result<Vec<ConversationSummary>, CoreError> {
    let records = store.get_all()?;
    let summaries = index_conversations(&records)
        .into_recent_first()
        .into_iter()
        .map(|conversation| ConversationSummary {
            preview: preview(&conversation.last_message.body),
            message_count: conversation.message_count() as i64,
            address: conversation.address,
            label: conversation.label,
            last_message: conversation.last_message,
        })
        .collect();
    Ok(summaries)
}

pub fn find_conversation<S: MessageStore>(
    store: &S,
    address: &str,
) -> Result<Option<Conversation>, CoreError> {
    let records = store.get_all()?;
    Ok(index_conversations(&records).into_conversation(address))
}

/// Messages exchanged with `address`, oldest first.
pub fn list_messages<S: MessageStore>(
    store: &S,
    address: &str,
) -> Result<Vec<MessageRecord>, CoreError> {
    Ok(find_conversation(store, address)?
        .map(|conversation| conversation.messages)
        .unwrap_or_default())
}

pub fn search_messages<S: MessageStore>(
    store: &S,
    query: &str,
) -> Result<Vec<SearchHit>, CoreError> {
    let records = store.get_all()?;
    let hits = search_records(&records, query)
        .into_iter()
        .map(|message| SearchHit {
            label: message.display_label().to_string(),
            body_matches: match_ranges(&message.body, query),
            message,
        })
        .collect();
    Ok(hits)
}

/// The conversation holding `message_id` and the message's position in it.
pub fn message_in_context<S: MessageStore>(
    store: &S,
    message_id: i64,
) -> Result<MessageContext, CoreError> {
    let records = store.get_all()?;
    let address = records
        .iter()
        .find(|record| record.id == Some(message_id))
        .map(|record| record.address.clone())
        .ok_or_else(|| CoreError::InvalidArgument(format!("unknown message id: {}", message_id)))?;
    let conversation = index_conversations(&records)
        .into_conversation(&address)
        .ok_or_else(|| CoreError::InvalidArgument(format!("no conversation for {}", address)))?;
    let position = conversation
        .messages
        .iter()
        .position(|message| message.id == Some(message_id))
        .ok_or_else(|| CoreError::InvalidArgument(format!("unknown message id: {}", message_id)))?;
    Ok(MessageContext {
        conversation,
        position,
    })
}

pub fn archive_stats<S: MessageStore>(store: &S) -> Result<ArchiveStats, CoreError> {
    let records = store.get_all()?;
    let mut stats = ArchiveStats {
        messages: records.len() as i64,
        conversations: index_conversations(&records).len() as i64,
        ..ArchiveStats::default()
    };
    for record in &records {
        match record.direction() {
            Direction::Received => stats.received += 1,
            Direction::Sent => stats.sent += 1,
            Direction::Unspecified => {}
        }
        stats.first_date = Some(stats.first_date.map_or(record.date, |d| d.min(record.date)));
        stats.last_date = Some(stats.last_date.map_or(record.date, |d| d.max(record.date)));
    }
    Ok(stats)
}

fn preview(body: &str) -> String {
    let mut chars = body.chars();
    let head: String = chars.by_ref().take(PREVIEW_CHARS).collect();
    if chars.next().is_some() {
        format!("{}...", head)
    } else {
        head
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_truncates_long_bodies() {
        assert_eq!(preview("short"), "short");
        let long = "é".repeat(60);
        let cut = preview(&long);
        assert!(cut.ends_with("..."));
        assert_eq!(cut.chars().count(), 53);
        assert_eq!(preview(&"a".repeat(50)), "a".repeat(50));
    }
}
