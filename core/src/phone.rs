/// Canonical form of a counterpart address.
///
/// Whitespace, hyphens and periods are stripped. A nine digit number starting
/// with 6 or 7 is a French mobile written without its country code and gets the
/// `33` prefix. Anything else (short codes, sender ids, landlines, numbers that
/// already carry a prefix) is returned cleaned but otherwise untouched.
pub fn normalize_address(raw: &str) -> String {
    let cleaned: String = raw
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-' && *c != '.')
        .collect();
    if is_bare_french_mobile(&cleaned) {
        return format!("33{}", cleaned);
    }
    cleaned
}

fn is_bare_french_mobile(value: &str) -> bool {
    value.len() == 9
        && value.chars().all(|c| c.is_ascii_digit())
        && matches!(value.as_bytes()[0], b'6' | b'7')
}
