//! Shared layout utilities.

/// Computes the `[start, end)` slice of a list of `len` rows that keeps
/// `cursor` visible within `available` rows.
///
/// The window is centred on the cursor and pulled back when it would run past
/// the end of the list, so the last page is always full.
///
/// # Example
///
/// ```
/// use movielist::ui::helpers::visible_window;
///
/// assert_eq!(visible_window(100, 50, 10), (45, 55));
/// assert_eq!(visible_window(100, 98, 10), (90, 100));
/// assert_eq!(visible_window(3, 2, 10), (0, 3));
/// ```
#[must_use]
pub fn visible_window(len: usize, cursor: usize, available: usize) -> (usize, usize) {
    if available == 0 || len == 0 {
        return (0, 0);
    }

    let mut start = cursor.saturating_sub(available / 2);
    let end = (start + available).min(len);

    if end - start < available && len >= available {
        start = end.saturating_sub(available);
    }

    (start, end)
}

/// Shortens `text` to at most `max` characters, ending in `...` when cut.
///
/// Operates on characters, never splitting a multi-byte code point.
#[must_use]
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    if max <= 3 {
        return text.chars().take(max).collect();
    }
    let kept: String = text.chars().take(max - 3).collect();
    format!("{kept}...")
}
