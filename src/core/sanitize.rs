// src/core/sanitize.rs

/// Collapse runs of whitespace into one space and trim the ends.
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

/// Case-insensitive "TBD" anywhere in the cell.
pub fn contains_tbd(cell: &str) -> bool {
    cell.to_ascii_uppercase().contains("TBD")
}

/// Trailing run of ASCII digits ("Chicago2" → "2", "12" → "12", "x" → "").
pub fn trailing_digits(token: &str) -> &str {
    let start = token
        .char_indices()
        .rev()
        .take_while(|(_, c)| c.is_ascii_digit())
        .last()
        .map(|(i, _)| i)
        .unwrap_or(token.len());
    &token[start..]
}

/// Leading run of ASCII digits ("1Detroit" → "1", "x" → "").
pub fn leading_digits(token: &str) -> &str {
    let end = token
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map(|(i, _)| i)
        .unwrap_or(token.len());
    &token[..end]
}

/// Team-name comparison used when pairing lineup rows with a game:
/// whitespace-normalized, ASCII case-insensitive.
pub fn same_team(a: &str, b: &str) -> bool {
    let (a, b) = (normalize_ws(a), normalize_ws(b));
    !a.is_empty() && a.eq_ignore_ascii_case(&b)
}
