//! Search-match highlighting for table cells.

const START: &str = "\u{1b}[1;33m";
const END: &str = "\u{1b}[0m";

/// Byte ranges of non-overlapping, ASCII case-insensitive matches of `query`.
#[must_use]
pub fn match_ranges(text: &str, query: &str) -> Vec<(usize, usize)> {
    let needle = query.trim().as_bytes();
    if needle.is_empty() {
        return Vec::new();
    }

    let hay = text.as_bytes();
    let mut ranges = Vec::new();
    let mut start = 0;
    while start + needle.len() <= hay.len() {
        let end = start + needle.len();
        if text.is_char_boundary(start)
            && text.is_char_boundary(end)
            && hay[start..end].eq_ignore_ascii_case(needle)
        {
            ranges.push((start, end));
            start = end;
        } else {
            start += 1;
        }
    }
    ranges
}

/// `text` with every match of `query` wrapped in bold yellow, or `None` when
/// nothing matches.
#[must_use]
pub fn highlight(text: &str, query: &str) -> Option<String> {
    let ranges = match_ranges(text, query);
    if ranges.is_empty() {
        return None;
    }

    let mut out = String::with_capacity(text.len() + ranges.len() * (START.len() + END.len()));
    let mut cursor = 0;
    for (start, end) in ranges {
        out.push_str(&text[cursor..start]);
        out.push_str(START);
        out.push_str(&text[start..end]);
        out.push_str(END);
        cursor = end;
    }
    out.push_str(&text[cursor..]);
    Some(out)
}
