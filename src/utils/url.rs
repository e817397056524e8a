//! URL encoding/decoding utilities

use std::collections::HashMap;

/// Strictly decodes a percent-encoded string
///
/// # Arguments
/// * `input` - The URL-encoded string to decode
///
/// # Returns
/// * `Some` with the decoded input
/// * `None` if a `%` is not followed by two hex digits, or the decoded bytes
///   are not valid UTF-8
///
/// # Examples
/// ```
/// use proxyforge::utils::url::url_decode;
///
/// assert_eq!(url_decode("Hello%20World%21").as_deref(), Some("Hello World!"));
/// assert_eq!(url_decode("%ZZ"), None);
/// ```
pub fn url_decode(input: &str) -> Option<String> {
    let bytes = input.as_bytes();
    let well_formed = bytes.iter().enumerate().all(|(i, b)| {
        *b != b'%'
            || bytes
                .get(i + 1..i + 3)
                .is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit))
    });
    if !well_formed {
        return None;
    }

    urlencoding::decode(input).ok().map(|cow| cow.into_owned())
}

/// Parses the query segment of a URI into a map.
///
/// Everything after the first `?` is split on `&`, and every pair on its first
/// `=`. Pairs with an empty key or value are dropped. Keys and values are
/// percent-decoded; a pair that fails to decode makes the whole query
/// invalid and yields `None`. A repeated key keeps its last value.
///
/// # Examples
/// ```
/// use proxyforge::utils::url::parse_query_params;
///
/// let params = parse_query_params("?a=1&b=2&noeq").unwrap();
/// assert_eq!(params.len(), 2);
/// assert_eq!(params["a"], "1");
/// ```
pub fn parse_query_params(url: &str) -> Option<HashMap<String, String>> {
    let mut params = HashMap::new();
    let Some((_, query)) = url.split_once('?') else {
        return Some(params);
    };

    for pair in query.split('&') {
        let Some((key, value)) = pair.split_once('=') else {
            continue;
        };
        if key.is_empty() || value.is_empty() {
            continue;
        }
        params.insert(url_decode(key)?, url_decode(value)?);
    }

    Some(params)
}
