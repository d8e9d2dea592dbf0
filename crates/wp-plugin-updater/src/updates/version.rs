//! Version string ordering.
//!
//! Plugin versions in the wild are rarely strict semver (`2.1`, `1.0.0-beta2`, `3.4.1.7`). Plain releases
//! that are strict semver on both sides are compared with `semver`. Everything else, pre-releases included,
//! goes through a segment-wise comparison in the style of PHP's `version_compare`, except that missing
//! trailing numeric segments count as zero, so `1.0` and `1.0.0` are equal.

use semver::Version;
use std::cmp::Ordering;

/// True if `candidate` is strictly newer than `installed`.
pub fn is_newer(candidate: &str, installed: &str) -> bool {
    compare(candidate, installed) == Ordering::Greater
}

/// Compare two version strings.
pub fn compare(a: &str, b: &str) -> Ordering {
    let a = strip_v(a.trim());
    let b = strip_v(b.trim());

    // Semver orders pre-release tags as text (`beta10 < beta2`, `dev > alpha`), so those take the
    // segment path. Build metadata does not take part in precedence.
    if let (Ok(a), Ok(b)) = (Version::parse(a), Version::parse(b))
        && a.pre.is_empty()
        && b.pre.is_empty()
    {
        return (a.major, a.minor, a.patch).cmp(&(b.major, b.minor, b.patch));
    }

    compare_segments(&segments(a), &segments(b))
}

fn strip_v(version: &str) -> &str {
    match version.strip_prefix(|c: char| c == 'v' || c == 'V') {
        Some(rest) if rest.starts_with(|c: char| c.is_ascii_digit()) => rest,
        _ => version,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Segment<'a> {
    /// Digits with leading zeros removed
    Number(&'a str),
    Word(&'a str),
}

/// Split on `.`, `-`, `_` and `+`, and wherever digits meet non-digits (`1.0rc1` is `1`, `0`, `rc`, `1`).
fn segments(version: &str) -> Vec<Segment<'_>> {
    let mut out = Vec::new();
    let mut start = None;
    let mut in_digits = false;

    for (i, c) in version.char_indices() {
        if matches!(c, '.' | '-' | '_' | '+') {
            if let Some(s) = start.take() {
                out.push(segment(&version[s..i]));
            }
            continue;
        }
        let is_digit = c.is_ascii_digit();
        match start {
            Some(s) if is_digit != in_digits => {
                out.push(segment(&version[s..i]));
                start = Some(i);
            }
            Some(_) => {}
            None => start = Some(i),
        }
        in_digits = is_digit;
    }
    if let Some(s) = start {
        out.push(segment(&version[s..]));
    }
    out
}

fn segment(token: &str) -> Segment<'_> {
    if token.bytes().all(|b| b.is_ascii_digit()) {
        let trimmed = token.trim_start_matches('0');
        Segment::Number(if trimmed.is_empty() { "0" } else { trimmed })
    } else {
        Segment::Word(token)
    }
}

/// Rank of pre/post-release words. Plain numbers sit at the release rank.
fn word_rank(word: &str) -> Option<u8> {
    match word.to_ascii_lowercase().as_str() {
        "dev" => Some(1),
        "alpha" | "a" => Some(2),
        "beta" | "b" => Some(3),
        "rc" | "c" => Some(4),
        "#" => Some(RELEASE_RANK),
        "pl" | "p" => Some(6),
        _ => None,
    }
}

const RELEASE_RANK: u8 = 5;

fn compare_segments(a: &[Segment<'_>], b: &[Segment<'_>]) -> Ordering {
    let len = a.len().max(b.len());
    for i in 0..len {
        let ordering = match (a.get(i), b.get(i)) {
            (Some(x), Some(y)) => compare_segment(*x, *y),
            (Some(x), None) => compare_to_missing(*x),
            (None, Some(y)) => compare_to_missing(*y).reverse(),
            (None, None) => Ordering::Equal,
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    Ordering::Equal
}

fn compare_segment(a: Segment<'_>, b: Segment<'_>) -> Ordering {
    match (a, b) {
        (Segment::Number(x), Segment::Number(y)) => x.len().cmp(&y.len()).then_with(|| x.cmp(y)),
        (Segment::Number(_), Segment::Word(w)) => compare_rank(Some(RELEASE_RANK), word_rank(w)),
        (Segment::Word(w), Segment::Number(_)) => compare_rank(word_rank(w), Some(RELEASE_RANK)),
        (Segment::Word(x), Segment::Word(y)) => match (word_rank(x), word_rank(y)) {
            // Two unknown words: plain string ordering
            (None, None) => x.to_ascii_lowercase().cmp(&y.to_ascii_lowercase()),
            (rx, ry) => compare_rank(rx, ry),
        },
    }
}

/// A segment against nothing: numbers against zero, words against a release.
fn compare_to_missing(segment: Segment<'_>) -> Ordering {
    match segment {
        Segment::Number(n) if n == "0" => Ordering::Equal,
        Segment::Number(_) => Ordering::Greater,
        Segment::Word(w) => compare_rank(word_rank(w), Some(RELEASE_RANK)),
    }
}

/// Unknown words rank below every known one.
fn compare_rank(a: Option<u8>, b: Option<u8>) -> Ordering {
    a.unwrap_or(0).cmp(&b.unwrap_or(0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segments_split_on_separators_and_digit_boundaries() {
        assert_eq!(
            segments("1.0rc1"),
            vec![
                Segment::Number("1"),
                Segment::Number("0"),
                Segment::Word("rc"),
                Segment::Number("1")
            ]
        );
        assert_eq!(
            segments("2.01-beta_3"),
            vec![
                Segment::Number("2"),
                Segment::Number("1"),
                Segment::Word("beta"),
                Segment::Number("3")
            ]
        );
        assert!(segments("").is_empty());
        assert_eq!(segments("..1.."), vec![Segment::Number("1")]);
    }

    #[test]
    fn test_strip_v_only_before_digits() {
        assert_eq!(strip_v("v1.2.3"), "1.2.3");
        assert_eq!(strip_v("V2"), "2");
        assert_eq!(strip_v("very"), "very");
    }
}
