use crate::model::WordSpan;

/// Picks the title from the first page's words: every word set in the largest
/// font (within `tolerance`), joined in extraction order.
///
/// Returns an empty string when there are no words; the caller supplies a
/// fallback in that case.
pub fn infer_title(words: &[WordSpan], tolerance: f64) -> String {
    let max_size = words
        .iter()
        .map(|w| w.size)
        .filter(|size| size.is_finite())
        .fold(f64::NEG_INFINITY, f64::max);

    if !max_size.is_finite() {
        return String::new();
    }

    let joined = words
        .iter()
        .filter(|w| (w.size - max_size).abs() < tolerance)
        .map(|w| w.text.as_str())
        .collect::<Vec<_>>()
        .join(" ");

    joined.split_whitespace().collect::<Vec<_>>().join(" ")
}
