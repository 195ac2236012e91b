const MAX_VISIBLE_CHARS: usize = 100;

/// Credential markers that may appear in pasted document text or upstream
/// error bodies. Everything after a marker up to the next delimiter is masked.
const SECRET_MARKERS: [&str; 6] = [
    "Bearer ",
    "api-key=",
    "api-key: ",
    "Ocp-Apim-Subscription-Key: ",
    "AccountKey=",
    "sig=",
];

/// Shortens user or document text to a log-safe preview.
pub fn sanitize_for_log(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return "[EMPTY]".to_string();
    }

    let preview = match trimmed.char_indices().nth(MAX_VISIBLE_CHARS) {
        Some((idx, _)) => format!(
            "{}... ({} chars total)",
            &trimmed[..idx],
            trimmed.chars().count()
        ),
        None => trimmed.to_string(),
    };

    SECRET_MARKERS
        .iter()
        .fold(preview, |acc, marker| mask_after(&acc, marker))
}

fn mask_after(text: &str, marker: &str) -> String {
    let mut masked = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(idx) = rest.find(marker) {
        let value_start = idx + marker.len();
        masked.push_str(&rest[..value_start]);
        masked.push_str("[REDACTED]");

        let value_len = rest[value_start..]
            .find(|c: char| c.is_whitespace() || matches!(c, '&' | '"' | '\'' | ';'))
            .unwrap_or(rest.len() - value_start);
        rest = &rest[value_start + value_len..];
    }

    masked.push_str(rest);
    masked
}
