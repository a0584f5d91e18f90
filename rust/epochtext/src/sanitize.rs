use std::borrow::Cow;

/// Removes every line-feed and carriage-return character from the input,
/// regardless of position (including mid-token). No other characters are
/// altered, and already-clean strings are returned without allocation.
///
/// Raw values arriving from record streams occasionally carry stray line
/// breaks injected by upstream transports; they never carry meaning inside
/// a timestamp, so they are stripped before any tokenization happens.
pub(crate) fn strip_line_breaks(s: &str) -> Cow<'_, str> {
    if s.contains(['\n', '\r']) {
        Cow::Owned(s.chars().filter(|&c| c != '\n' && c != '\r').collect())
    } else {
        Cow::Borrowed(s)
    }
}
