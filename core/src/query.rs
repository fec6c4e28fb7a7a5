//! Minimal query-string handling for handoff URLs.
//!
//! Only what the handoff needs: read one parameter, drop one parameter while
//! leaving every other pair byte-for-byte intact, and append one parameter.

/// Split a URL or path into (everything before `?`, query without `?`, fragment with `#`).
pub fn split_url(url: &str) -> (&str, &str, &str) {
    let (before_fragment, fragment) = match url.find('#') {
        Some(idx) => url.split_at(idx),
        None => (url, ""),
    };
    match before_fragment.split_once('?') {
        Some((base, query)) => (base, query, fragment),
        None => (before_fragment, "", fragment),
    }
}

/// Decode one form-encoded component (`+` is a space, then percent-decoding).
fn decode_component(raw: &str) -> Option<String> {
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced).ok().map(|s| s.into_owned())
}

/// Parse a query string into decoded key/value pairs, in order.
///
/// Pairs whose encoding is invalid are skipped.
pub fn parse_query(query: &str) -> Vec<(String, String)> {
    query
        .trim_start_matches('?')
        .split('&')
        .filter(|s| !s.is_empty())
        .filter_map(|pair| {
            let mut parts = pair.splitn(2, '=');
            let key = parts.next()?;
            let value = parts.next().unwrap_or("");
            Some((decode_component(key)?, decode_component(value)?))
        })
        .collect()
}

/// First value for `name` in the query string.
pub fn get_param(query: &str, name: &str) -> Option<String> {
    parse_query(query)
        .into_iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value)
}

/// Remove every occurrence of `name`, keeping the other pairs exactly as written.
pub fn remove_param(query: &str, name: &str) -> String {
    query
        .trim_start_matches('?')
        .split('&')
        .filter(|pair| !pair.is_empty())
        .filter(|pair| {
            let key = pair.split('=').next().unwrap_or("");
            decode_component(key).as_deref() != Some(name)
        })
        .collect::<Vec<_>>()
        .join("&")
}

/// Append `name=value` to a URL, percent-encoding the value.
pub fn append_param(url: &str, name: &str, value: &str) -> String {
    let (base, query, fragment) = split_url(url);
    let pair = format!("{}={}", urlencoding::encode(name), urlencoding::encode(value));
    if query.is_empty() {
        format!("{base}?{pair}{fragment}")
    } else {
        format!("{base}?{query}&{pair}{fragment}")
    }
}
