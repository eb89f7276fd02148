use std::borrow::Cow;

const MAX_API_ERROR_CHARS: usize = 200;

/// Token prefixes that identify a key on their own.
const PREFIX_PATTERNS: [&str; 3] = ["sk-", "hf_", "AIza"];

/// Markers followed by a secret value. `key=` covers the flight API's query
/// string, which reqwest echoes back inside transport errors.
const MARKER_PATTERNS: [&str; 6] = [
    "Authorization: Bearer ",
    "authorization: bearer ",
    "api_key=",
    "key=",
    "\"api_key\":\"",
    "\"key\":\"",
];

fn is_secret_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | ':' | '+' | '/' | '=')
}

fn redact_after(scrubbed: &mut String, marker: &str, keep_marker: bool) {
    let mut search_from = 0;
    while let Some(rel) = scrubbed[search_from..].find(marker) {
        let start = search_from + rel;
        let value_start = start + marker.len();
        let value_end = scrubbed[value_start..]
            .char_indices()
            .find(|(_, c)| !is_secret_char(*c))
            .map_or(scrubbed.len(), |(i, _)| value_start + i);

        if value_end == value_start {
            search_from = value_start;
            continue;
        }

        let replace_from = if keep_marker { value_start } else { start };
        scrubbed.replace_range(replace_from..value_end, "[REDACTED]");
        search_from = replace_from + "[REDACTED]".len();
    }
}

/// Redact key-looking tokens from provider and lookup error text.
pub fn scrub_secret_patterns(input: &str) -> Cow<'_, str> {
    let needs_scrubbing = PREFIX_PATTERNS
        .iter()
        .chain(MARKER_PATTERNS.iter())
        .any(|pattern| input.contains(pattern));
    if !needs_scrubbing {
        return Cow::Borrowed(input);
    }

    let mut scrubbed = input.to_string();
    for prefix in PREFIX_PATTERNS {
        redact_after(&mut scrubbed, prefix, false);
    }
    for marker in MARKER_PATTERNS {
        redact_after(&mut scrubbed, marker, true);
    }
    Cow::Owned(scrubbed)
}

/// Sanitize API error text by scrubbing secrets and truncating length.
pub fn sanitize_api_error(input: &str) -> String {
    let scrubbed = scrub_secret_patterns(input);

    if scrubbed.chars().count() <= MAX_API_ERROR_CHARS {
        return scrubbed.into_owned();
    }

    let truncated: String = scrubbed.chars().take(MAX_API_ERROR_CHARS).collect();
    format!("{truncated}...")
}
