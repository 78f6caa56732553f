//! "Did you mean?" hints for unmatched phrases.
//!
//! Purely diagnostic: the hint is appended to a no-match error and is
//! never used to pick a definition.

/// Levenshtein distance over chars, two rows at a time.
pub(crate) fn edit_distance(a: &str, b: &str) -> usize {
    let b_len = b.chars().count();
    if a.is_empty() {
        return b_len;
    }
    if b.is_empty() {
        return a.chars().count();
    }

    let mut prev: Vec<usize> = (0..=b_len).collect();
    let mut curr: Vec<usize> = vec![0; b_len + 1];

    for (i, a_char) in a.chars().enumerate() {
        curr[0] = i + 1;
        for (j, b_char) in b.chars().enumerate() {
            let cost = usize::from(a_char != b_char);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b_len]
}

/// Edits tolerated for a phrase of `len` chars.
///
/// Phrases are several words long, so the allowance grows with length
/// but stays small enough that unrelated phrases sharing "to be" are not
/// suggested.
fn threshold(len: usize) -> usize {
    match len {
        0 => 0,
        1..=5 => 1,
        6..=12 => 2,
        n => (n / 5).min(4),
    }
}

/// The registered phrase closest to `phrase`, if it is close enough.
///
/// An exact (case-sensitive) hit yields `None`: the phrase exists and the
/// mismatch lies elsewhere. Comparison is case-insensitive otherwise; ties
/// go to the earliest candidate.
pub(crate) fn suggest_phrase<'a>(
    phrase: &str,
    candidates: impl IntoIterator<Item = &'a str>,
) -> Option<&'a str> {
    let needle = phrase.to_lowercase();
    let limit = threshold(needle.chars().count());
    let mut best: Option<(&'a str, usize)> = None;

    for candidate in candidates {
        if candidate == phrase {
            return None;
        }
        let distance = edit_distance(&needle, &candidate.to_lowercase());
        if distance <= limit && best.map_or(true, |(_, d)| distance < d) {
            best = Some((candidate, distance));
        }
    }

    best.map(|(candidate, _)| candidate)
}
