use chrono::{DateTime, ParseError, SecondsFormat, Utc};

/// Converts a RFC-2822 date (as found in `pubDate`) to ISO-8601 in UTC.
/// `Tue, 01 Jan 2019 12:00:00 +0000` becomes `2019-01-01T12:00:00.000Z`
pub fn rfc2822_to_iso(buf: &str) -> Result<String, ParseError> {
    let date_time = DateTime::parse_from_rfc2822(buf.trim())?;
    let utc = date_time.with_timezone(&Utc);
    Ok(utc.to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// Builds an url-safe name out of a title, e.g. `Ábaco de 2024!` becomes `abaco-de-2024`
pub fn slug_from_title(title: &str) -> String {
    let title = unidecode::unidecode(title);
    let alpha_chars: String = title.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '-' })
        .collect();

    let mut slug = String::new();
    let mut prev_char = None;

    for c in alpha_chars.chars() {
        if c != '-' || prev_char != Some('-') {
            slug.push(c);
        }
        prev_char = Some(c);
    }

    slug.trim_matches('-').to_string()
}
