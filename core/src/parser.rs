use roxmltree::{Document, Node, ParsingOptions};

use crate::error::ParseError;
use crate::models::{MessageRecord, UNKNOWN_CONTACT};

const ROOT_ELEMENT: &str = "smses";
const MESSAGE_ELEMENT: &str = "sms";

/// Parses one backup document into message records, in document order.
///
/// Addresses are returned as written in the file; normalization is the
/// importer's decision. A well-formed document without an `<smses>` root yields
/// no records.
pub fn parse_backup(xml: &str) -> Result<Vec<MessageRecord>, ParseError> {
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    let doc = Document::parse_with_options(xml, options)?;
    let root = doc.root_element();
    if root.tag_name().name() != ROOT_ELEMENT {
        return Ok(Vec::new());
    }
    let records = root
        .children()
        .filter(|node| node.is_element() && node.tag_name().name() == MESSAGE_ELEMENT)
        .map(|node| record_from_element(&node))
        .collect();
    Ok(records)
}

fn record_from_element(node: &Node) -> MessageRecord {
    MessageRecord {
        id: None,
        address: text_attr(node, "address", ""),
        date: int_attr(node, "date"),
        date_sent: int_attr(node, "date_sent"),
        message_type: int_attr(node, "type"),
        body: text_attr(node, "body", ""),
        contact_name: text_attr(node, "contact_name", UNKNOWN_CONTACT),
        readable_date: text_attr(node, "readable_date", ""),
        protocol: text_attr(node, "protocol", ""),
        subject: text_attr(node, "subject", ""),
        toa: text_attr(node, "toa", ""),
        sc_toa: text_attr(node, "sc_toa", ""),
        service_center: text_attr(node, "service_center", ""),
        read: text_attr(node, "read", "0"),
        status: text_attr(node, "status", ""),
        locked: text_attr(node, "locked", "0"),
        sub_id: text_attr(node, "sub_id", ""),
    }
}

// Values are trimmed; an absent or blank attribute takes the default.
fn text_attr(node: &Node, name: &str, default: &str) -> String {
    match node.attribute(name).map(str::trim) {
        Some(value) if !value.is_empty() => value.to_string(),
        _ => default.to_string(),
    }
}

fn int_attr(node: &Node, name: &str) -> i64 {
    node.attribute(name)
        .and_then(|value| value.trim().parse::<i64>().ok())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_MESSAGES: &str = r#"<?xml version='1.0' encoding='UTF-8' standalone='yes' ?>
<?xml-stylesheet type="text/xsl" href="sms.xsl"?>
<smses count="2">
  <sms protocol="0" address="612345678" date="100" type="2" subject="null" body="hi" toa="null" sc_toa="null" service_center="null" read="1" status="-1" locked="0" date_sent="0" sub_id="1" readable_date="1 janv. 1970 01:00:00" contact_name="Alice" />
  <sms address="0612345678" date="200" type="1" body="hey &amp; you" />
</smses>"#;

    #[test]
    fn parses_every_message_element() {
        let records = parse_backup(TWO_MESSAGES).expect("parse");
        assert_eq!(records.len(), 2);
        let first = &records[0];
        assert_eq!(first.address, "612345678");
        assert_eq!(first.date, 100);
        assert_eq!(first.message_type, 2);
        assert_eq!(first.body, "hi");
        assert_eq!(first.contact_name, "Alice");
        assert_eq!(first.readable_date, "1 janv. 1970 01:00:00");
        assert_eq!(first.read, "1");
        assert_eq!(first.status, "-1");
        assert_eq!(first.sub_id, "1");
        assert_eq!(first.id, None);
        assert_eq!(records[1].body, "hey & you");
    }

    #[test]
    fn missing_fields_take_defaults() {
        let records = parse_backup(TWO_MESSAGES).expect("parse");
        let second = &records[1];
        assert_eq!(second.contact_name, UNKNOWN_CONTACT);
        assert_eq!(second.date_sent, 0);
        assert_eq!(second.read, "0");
        assert_eq!(second.locked, "0");
        assert_eq!(second.protocol, "");
        assert_eq!(second.readable_date, "");
    }

    #[test]
    fn non_numeric_dates_become_zero() {
        let xml = r#"<smses><sms address="1" date="soon" date_sent="" type="x" /></smses>"#;
        let records = parse_backup(xml).expect("parse");
        assert_eq!(records[0].date, 0);
        assert_eq!(records[0].date_sent, 0);
        assert_eq!(records[0].message_type, 0);
        assert_eq!(records[0].body, "");
    }

    #[test]
    fn single_message_matches_multi_message_form() {
        let single = r#"<smses><sms address="612345678" date="100" type="2" body="hi" /></smses>"#;
        let many = r#"<smses><sms address="612345678" date="100" type="2" body="hi" /><sms address="1" date="5" /></smses>"#;
        let one = parse_backup(single).expect("single");
        let both = parse_backup(many).expect("many");
        assert_eq!(one.len(), 1);
        assert_eq!(one[0], both[0]);
    }

    #[test]
    fn document_without_collection_is_empty() {
        assert!(parse_backup("<calls><call number=\"1\"/></calls>").expect("parse").is_empty());
        assert!(parse_backup("<smses count=\"0\"></smses>").expect("parse").is_empty());
    }

    #[test]
    fn malformed_xml_is_an_error() {
        let err = parse_backup("<smses><sms address=\"1\"></smses>").unwrap_err();
        assert!(matches!(err, ParseError::Malformed { .. }));
        assert!(parse_backup("not xml at all").is_err());
        assert!(parse_backup("").is_err());
    }
}
