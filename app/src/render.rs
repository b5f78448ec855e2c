use std::fmt::Write;

use chrono::DateTime;
use sms_archive_core::models::{
    ArchiveStats, ConversationSummary, Direction, ImportProgress, MessageContext, MessageRecord,
    SearchHit,
};

pub fn display_date(message: &MessageRecord) -> String {
    if !message.readable_date.is_empty() {
        return message.readable_date.clone();
    }
    DateTime::from_timestamp_millis(message.date)
        .map(|ts| ts.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| message.date.to_string())
}

pub fn progress_line(progress: &ImportProgress) -> Option<String> {
    match progress {
        ImportProgress::Processing {
            current,
            total,
            file_name,
        } => Some(format!("file {}/{}: {}", current, total, file_name)),
        ImportProgress::Saving { new_records } => {
            Some(format!("saving {} new messages", new_records))
        }
        ImportProgress::Idle => None,
    }
}

pub fn conversations(list: &[ConversationSummary]) -> String {
    let mut out = format!("Conversations ({})\n", list.len());
    for conversation in list {
        let plural = if conversation.message_count > 1 { "s" } else { "" };
        let _ = writeln!(
            out,
            "{}  [{}]  {} message{}  {}\n    {}",
            conversation.label,
            conversation.address,
            conversation.message_count,
            plural,
            display_date(&conversation.last_message),
            conversation.preview
        );
    }
    out
}

/// Chronological thread; `highlight` marks one position with `*`.
pub fn messages(label: &str, list: &[MessageRecord], highlight: Option<usize>) -> String {
    let mut out = format!("{}\n", label);
    for (idx, message) in list.iter().enumerate() {
        let arrow = match message.direction() {
            Direction::Received => "<",
            Direction::Sent => ">",
            Direction::Unspecified => "-",
        };
        let marker = if highlight == Some(idx) { "*" } else { " " };
        let _ = writeln!(
            out,
            "{}{} #{} {}  {}",
            marker,
            arrow,
            message.id.unwrap_or_default(),
            display_date(message),
            message.body
        );
    }
    out
}

pub fn context(ctx: &MessageContext) -> String {
    messages(
        &ctx.conversation.label,
        &ctx.conversation.messages,
        Some(ctx.position),
    )
}

pub fn search_hits(query: &str, hits: &[SearchHit]) -> String {
    if hits.is_empty() {
        return format!("No results for \"{}\"\n", query);
    }
    let mut out = format!("Results ({})\n", hits.len());
    for hit in hits {
        let _ = writeln!(
            out,
            "#{} {}  {}\n    {}",
            hit.message.id.unwrap_or_default(),
            hit.label,
            display_date(&hit.message),
            highlight(&hit.message.body, &hit.body_matches)
        );
    }
    out
}

pub fn stats(stats: &ArchiveStats) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "messages:      {}", stats.messages);
    let _ = writeln!(out, "conversations: {}", stats.conversations);
    let _ = writeln!(out, "received:      {}", stats.received);
    let _ = writeln!(out, "sent:          {}", stats.sent);
    if let (Some(first), Some(last)) = (stats.first_date, stats.last_date) {
        let _ = writeln!(out, "range:         {} .. {}", first, last);
    }
    out
}

fn highlight(text: &str, ranges: &[(usize, usize)]) -> String {
    let mut out = String::with_capacity(text.len() + ranges.len() * 4);
    let mut cursor = 0;
    for &(start, end) in ranges {
        if start < cursor || end > text.len() {
            continue;
        }
        out.push_str(&text[cursor..start]);
        out.push_str("**");
        out.push_str(&text[start..end]);
        out.push_str("**");
        cursor = end;
    }
    out.push_str(&text[cursor..]);
    out
}
