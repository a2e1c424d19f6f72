use regex::Regex;
use std::sync::LazyLock;
use tracing::warn;

static WHITESPACES_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[\s\x00]+").unwrap());
static NON_ALPHANUMERICS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\W_]+").unwrap());

/// Clean one string field from the feed so it fits in a TSV cell.
///
/// 1. Absent or the literal `"null"` becomes absent.
/// 2. HTML entities (`&lt;`, `&amp;`, `&#8217;`, ...) are decoded.
/// 3. Every run of whitespace and NUL characters becomes one space.
///
/// An empty result is reported as absent, so an empty-but-present string never
/// leaves this function. So is a result that decoded to `"null"`, which keeps
/// a second pass from dropping what the first one kept.
///
/// ```
/// use tweetfmt::domain::model::normalize;
///
/// assert_eq!(normalize(Some("A \r\n\tB\0C&gt;D")).as_deref(), Some("A B C>D"));
/// assert_eq!(normalize(Some("null")), None);
/// ```
pub fn normalize(raw: Option<&str>) -> Option<String> {
    let raw = raw?;
    if raw == "null" {
        return None;
    }
    let decoded = html_escape::decode_html_entities(raw);
    let collapsed = WHITESPACES_RE.replace_all(&decoded, " ");
    if collapsed.is_empty() || collapsed == "null" {
        None
    } else {
        Some(collapsed.into_owned())
    }
}

/// [`normalize`] for input whose encoding hasn't been checked yet.
///
/// Bytes that aren't UTF-8 can't be decoded; they become absent with a
/// warning. The warning never carries the bytes themselves.
pub fn normalize_bytes(raw: Option<&[u8]>) -> Option<String> {
    let raw = raw?;
    match std::str::from_utf8(raw) {
        Ok(text) => normalize(Some(text)),
        Err(err) => {
            warn!(
                len = raw.len(),
                valid_up_to = err.valid_up_to(),
                "field is not valid text, dropping it: {}",
                err
            );
            None
        }
    }
}

/// Strip everything but letters and digits, e.g. `Mexico City` to `MexicoCity`.
pub fn strip_non_alphanumerics(s: &str) -> String {
    NON_ALPHANUMERICS_RE.replace_all(s, "").into_owned()
}
