use std::collections::HashSet;

use crate::models::{IdentityKey, MessageRecord};

/// Collapses records sharing an identity key, keeping the first occurrence in
/// its original position.
pub fn dedupe_batch(records: Vec<MessageRecord>) -> Vec<MessageRecord> {
    let mut seen: HashSet<IdentityKey> = HashSet::with_capacity(records.len());
    records
        .into_iter()
        .filter(|record| seen.insert(record.identity_key()))
        .collect()
}

/// Keeps candidates whose identity key is not already stored.
pub fn filter_new(
    candidates: Vec<MessageRecord>,
    existing_keys: &HashSet<IdentityKey>,
) -> Vec<MessageRecord> {
    candidates
        .into_iter()
        .filter(|record| !existing_keys.contains(&record.identity_key()))
        .collect()
}

pub fn identity_keys<'a, I>(records: I) -> HashSet<IdentityKey>
where
    I: IntoIterator<Item = &'a MessageRecord>,
{
    records.into_iter().map(MessageRecord::identity_key).collect()
}
