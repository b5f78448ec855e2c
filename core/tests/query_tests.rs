use sms_archive_core::db::open_in_memory;
use sms_archive_core::models::{MessageRecord, UNKNOWN_CONTACT};
use sms_archive_core::query::{
    archive_stats, list_conversations, list_messages, message_in_context, search_messages,
};
use sms_archive_core::{ArchiveDb, CoreError, MessageStore};

fn record(address: &str, date: i64, kind: i64, body: &str, contact: &str) -> MessageRecord {
    MessageRecord {
        address: address.to_string(),
        date,
        message_type: kind,
        body: body.to_string(),
        contact_name: contact.to_string(),
        ..MessageRecord::default()
    }
}

fn setup_db() -> ArchiveDb {
    let mut archive = open_in_memory().expect("memory db");
    archive
        .bulk_append(&[
            record("33612345678", 1, 1, "hello world", "Alice"),
            record("33612345678", 3, 2, "search me", "Alice"),
            record("36180", 2, 1, "Votre code est 1234", UNKNOWN_CONTACT),
            record("33612345678", 2, 1, "another note", "Alice"),
            record("0700000001", 5, 3, &"long ".repeat(20), "Bob"),
        ])
        .expect("seed");
    archive
}

#[test]
fn conversations_are_newest_first() {
    let archive = setup_db();
    let conversations = list_conversations(&archive).expect("list");
    let order: Vec<&str> = conversations.iter().map(|c| c.address.as_str()).collect();
    assert_eq!(order, vec!["0700000001", "33612345678", "36180"]);
    assert_eq!(conversations[1].message_count, 3);
    assert_eq!(conversations[1].preview, "search me");
    assert_eq!(conversations[2].label, "36180");
    assert!(conversations[0].preview.ends_with("..."));
}

#[test]
fn list_messages_is_chronological() {
    let archive = setup_db();
    let messages = list_messages(&archive, "33612345678").expect("messages");
    let dates: Vec<i64> = messages.iter().map(|m| m.date).collect();
    assert_eq!(dates, vec![1, 2, 3]);
    assert!(list_messages(&archive, "nobody").expect("empty").is_empty());
}

#[test]
fn search_returns_hits_newest_first_with_ranges() {
    let archive = setup_db();
    let hits = search_messages(&archive, "NOTE").expect("search");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].message.body, "another note");
    assert_eq!(hits[0].body_matches, vec![(8, 12)]);
    assert_eq!(hits[0].label, "Alice");

    let by_name = search_messages(&archive, "alice").expect("search");
    let dates: Vec<i64> = by_name.iter().map(|h| h.message.date).collect();
    assert_eq!(dates, vec![3, 2, 1]);
    assert!(by_name[0].body_matches.is_empty());
}

#[test]
fn empty_search_returns_nothing() {
    let archive = setup_db();
    assert!(search_messages(&archive, "").expect("search").is_empty());
    assert!(search_messages(&archive, "  ").expect("search").is_empty());
}

#[test]
fn message_in_context_locates_position() {
    let archive = setup_db();
    let target = archive
        .get_all()
        .expect("all")
        .into_iter()
        .find(|m| m.body == "another note")
        .and_then(|m| m.id)
        .expect("id");
    let context = message_in_context(&archive, target).expect("context");
    assert_eq!(context.conversation.address, "33612345678");
    assert_eq!(context.position, 1);
    assert_eq!(context.conversation.messages[context.position].id, Some(target));

    let err = message_in_context(&archive, 9_999).unwrap_err();
    assert!(matches!(err, CoreError::InvalidArgument(_)));
}

#[test]
fn stats_count_directions_and_range() {
    let archive = setup_db();
    let stats = archive_stats(&archive).expect("stats");
    assert_eq!(stats.messages, 5);
    assert_eq!(stats.conversations, 3);
    assert_eq!(stats.received, 3);
    assert_eq!(stats.sent, 1);
    assert_eq!(stats.first_date, Some(1));
    assert_eq!(stats.last_date, Some(5));
}

#[test]
fn stats_on_empty_archive() {
    let archive = open_in_memory().expect("memory db");
    let stats = archive_stats(&archive).expect("stats");
    assert_eq!(stats.messages, 0);
    assert_eq!(stats.first_date, None);
}
