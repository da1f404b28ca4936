use std::borrow::Cow;

const MAX_API_ERROR_CHARS: usize = 200;

const SECRET_MARKERS: [&str; 12] = [
    "x-api-key: ",
    "X-API-Key: ",
    "Authorization: Bearer ",
    "api_key=",
    "access_token=",
    "client_secret=",
    "\"api_key\":\"",
    "\"apiKey\":\"",
    "\"access_token\":\"",
    "\"refresh_token\":\"",
    "\"client_secret\":\"",
    "\"token\":\"",
];

fn is_secret_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | ':' | '+' | '/' | '=')
}

/// Replace the value following every occurrence of `marker` with `[REDACTED]`.
fn redact_after(scrubbed: &mut String, marker: &str) {
    let mut search_from = 0;
    while let Some(rel) = scrubbed[search_from..].find(marker) {
        let value_start = search_from + rel + marker.len();
        let value_end = scrubbed[value_start..]
            .char_indices()
            .find(|(_, c)| !is_secret_char(*c))
            .map_or(scrubbed.len(), |(i, _)| value_start + i);

        if value_end == value_start {
            search_from = value_start;
            continue;
        }

        scrubbed.replace_range(value_start..value_end, "[REDACTED]");
        search_from = value_start + "[REDACTED]".len();
    }
}

/// Redact API keys, tokens and client secrets from backend error bodies.
pub fn scrub_secret_patterns(input: &str) -> Cow<'_, str> {
    if !SECRET_MARKERS.iter().any(|marker| input.contains(marker)) {
        return Cow::Borrowed(input);
    }

    let mut scrubbed = input.to_string();
    for marker in SECRET_MARKERS {
        redact_after(&mut scrubbed, marker);
    }
    Cow::Owned(scrubbed)
}

/// Scrub secrets and truncate to a printable length.
pub fn sanitize_api_error(input: &str) -> String {
    let scrubbed = scrub_secret_patterns(input.trim());

    if scrubbed.chars().count() <= MAX_API_ERROR_CHARS {
        return scrubbed.into_owned();
    }

    let end = scrubbed
        .char_indices()
        .nth(MAX_API_ERROR_CHARS)
        .map_or(scrubbed.len(), |(i, _)| i);
    format!("{}...", &scrubbed[..end])
}
