use crate::models::MessageRecord;

/// Case-insensitive substring search over body and contact name, newest first.
///
/// A blank query matches nothing. The query is not trimmed for matching.
pub fn search_records(records: &[MessageRecord], query: &str) -> Vec<MessageRecord> {
    if query.trim().is_empty() {
        return Vec::new();
    }
    let needle = query.to_lowercase();
    let mut hits: Vec<MessageRecord> = records
        .iter()
        .filter(|record| {
            record.body.to_lowercase().contains(&needle)
                || record.contact_name.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect();
    hits.sort_by(|a, b| b.date.cmp(&a.date));
    hits
}

/// Non-overlapping byte ranges of `query` in `text`, ignoring case.
pub fn match_ranges(text: &str, query: &str) -> Vec<(usize, usize)> {
    let needle = query.to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }
    let mut ranges = Vec::new();
    let mut cursor = 0;
    for (start, _) in text.char_indices() {
        if start < cursor {
            continue;
        }
        let mut folded = String::new();
        for (offset, ch) in text[start..].char_indices() {
            folded.extend(ch.to_lowercase());
            if folded.len() >= needle.len() {
                if folded == needle {
                    let end = start + offset + ch.len_utf8();
                    ranges.push((start, end));
                    cursor = end;
                }
                break;
            }
            if !needle.starts_with(&folded) {
                break;
            }
        }
    }
    ranges
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(date: i64, body: &str, contact: &str) -> MessageRecord {
        MessageRecord {
            address: "1".to_string(),
            date,
            body: body.to_string(),
            contact_name: contact.to_string(),
            ..MessageRecord::default()
        }
    }

    #[test]
    fn blank_query_matches_nothing() {
        let records = vec![record(1, "hello", "Alice")];
        assert!(search_records(&records, "").is_empty());
        assert!(search_records(&records, "   ").is_empty());
    }

    #[test]
    fn matches_body_or_contact_ignoring_case() {
        let records = vec![
            record(1, "Dinner tonight?", "Bob"),
            record(3, "ok", "Alice"),
            record(2, "see ALICE later", "Carol"),
            record(4, "nothing here", "Dave"),
        ];
        let hits = search_records(&records, "alice");
        let dates: Vec<i64> = hits.iter().map(|h| h.date).collect();
        assert_eq!(dates, vec![3, 2]);
        assert_eq!(search_records(&records, "DINNER").len(), 1);
    }

    #[test]
    fn query_whitespace_is_significant() {
        let records = vec![record(1, "hello", "A"), record(2, "say hello", "B")];
        let hits = search_records(&records, " hello");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].date, 2);
    }

    #[test]
    fn ranges_cover_each_occurrence() {
        assert_eq!(match_ranges("Hello hello", "hello"), vec![(0, 5), (6, 11)]);
        assert_eq!(match_ranges("aaaa", "aa"), vec![(0, 2), (2, 4)]);
        assert_eq!(match_ranges("Été été", "ÉTÉ"), vec![(0, 5), (6, 11)]);
        assert!(match_ranges("abc", "").is_empty());
        assert!(match_ranges("abc", "abcd").is_empty());
    }
}
