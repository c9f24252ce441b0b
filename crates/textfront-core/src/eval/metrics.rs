//! Error-rate metrics.

/// Levenshtein distance between two token sequences (unit costs).
pub fn edit_distance<T: PartialEq>(a: &[T], b: &[T]) -> usize {
    if b.is_empty() {
        return a.len();
    }
    let mut d: Vec<usize> = (0..=b.len()).collect();
    for (i, x) in a.iter().enumerate() {
        let mut prev = d[0];
        d[0] = i + 1;
        for (j, y) in b.iter().enumerate() {
            let tmp = d[j + 1];
            d[j + 1] = if x == y {
                prev
            } else {
                (prev + 1).min(d[j] + 1).min(tmp + 1)
            };
            prev = tmp;
        }
    }
    d[b.len()]
}

/// Edit distance divided by the reference length.
///
/// An empty reference scores 0.0 against an empty hypothesis, 1.0 otherwise.
fn error_rate<T: PartialEq>(reference: &[T], hypothesis: &[T]) -> f64 {
    if reference.is_empty() {
        return if hypothesis.is_empty() { 0.0 } else { 1.0 };
    }
    edit_distance(reference, hypothesis) as f64 / reference.len() as f64
}

/// Word error rate over whitespace-separated words.
pub fn word_error_rate(reference: &str, hypothesis: &str) -> f64 {
    let reference: Vec<&str> = reference.split_whitespace().collect();
    let hypothesis: Vec<&str> = hypothesis.split_whitespace().collect();
    error_rate(&reference, &hypothesis)
}

/// Character error rate over Unicode scalar values.
pub fn char_error_rate(reference: &str, hypothesis: &str) -> f64 {
    let reference: Vec<char> = reference.chars().collect();
    let hypothesis: Vec<char> = hypothesis.chars().collect();
    error_rate(&reference, &hypothesis)
}
