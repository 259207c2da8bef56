// src/core/sanitize.rs

pub fn normalize_entities(s: &str) -> String {
    s.replace("&nbsp;", " ").replace("&amp;", "&")
}

pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// Lowercase, non-alphanumerics collapsed to single '-', trimmed.
/// "Montréal, QC" → "montr-al-qc"
pub fn slugify(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut last_dash = false;
    for ch in s.chars() {
        if ch.is_ascii_alphanumeric() {
            out.push(ch.to_ascii_lowercase());
            last_dash = false;
        } else if !last_dash {
            out.push('-');
            last_dash = true;
        }
    }
    out.trim_matches('-').to_string()
}

/// "K1A 0B1" or "K1A-0B1" out of free-form address text, if present.
pub fn find_postal_code(text: &str) -> Option<String> {
    let b = text.as_bytes();
    let is_alpha = |c: u8| c.is_ascii_alphabetic();
    let is_digit = |c: u8| c.is_ascii_digit();
    for i in 0..b.len().saturating_sub(6) {
        if is_alpha(b[i]) && is_digit(b[i + 1]) && is_alpha(b[i + 2]) {
            let sep = b[i + 3];
            if sep == b' ' || sep == b'-' {
                if is_digit(b[i + 4]) && is_alpha(b[i + 5]) && is_digit(b[i + 6]) {
                    return Some(format!(
                        "{} {}",
                        text[i..i + 3].to_ascii_uppercase(),
                        text[i + 4..i + 7].to_ascii_uppercase()
                    ));
                }
            }
        }
    }
    None
}
