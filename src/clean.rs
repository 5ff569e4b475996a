use once_cell::sync::Lazy;
use regex::Regex;

static MARKDOWN_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^#+\s+").unwrap());
// Table-of-contents dot leaders and the trailing page number: "Introduction ..... 3".
static DOT_LEADER_PAGE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*\.+\s*\d+\s*$").unwrap());
static SECTION_NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+(?:\.\d+)*\.?\s+").unwrap());

/// Turns a raw heading line into display text.
///
/// Leading markdown markers and trailing dot leaders with page numbers are
/// removed until neither applies any more, so the result is a fixed point:
/// `normalize(&normalize(x)) == normalize(x)`.
pub fn normalize(raw: &str) -> String {
    normalize_with(raw, false)
}

/// [`normalize`], optionally also dropping a leading section number such as
/// "1." or "2.3.1" so only the heading words remain.
pub fn normalize_with(raw: &str, strip_section_numbers: bool) -> String {
    let mut current = raw.trim().to_string();
    loop {
        let next = {
            let mut text = MARKDOWN_MARKER.replace(&current, "").into_owned();
            if strip_section_numbers {
                text = SECTION_NUMBER.replace(&text, "").into_owned();
            }
            DOT_LEADER_PAGE.replace(&text, "").trim().to_string()
        };
        if next == current {
            return current;
        }
        current = next;
    }
}
