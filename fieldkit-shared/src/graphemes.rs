//! User-perceived character segmentation.
//!
//! Clusters are the extended grapheme clusters of UAX #29 with two
//! adjustments that matter for input length limits:
//!
//! * a skin tone modifier directly following another skin tone modifier
//!   starts a new cluster instead of extending the previous one
//! * the escaped non-breaking space entity `&nbsp;` is a single cluster
//!
//! Clusters always cover the whole input in order, so any run of
//! consecutive clusters is a contiguous slice of the original string.
use std::ops::RangeInclusive;

use unicode_segmentation::UnicodeSegmentation;

const NBSP_ENTITY: &str = "&nbsp;";
const SKIN_TONE_MODIFIERS: RangeInclusive<char> = '\u{1F3FB}'..='\u{1F3FF}';

fn is_skin_tone_modifier(c: char) -> bool {
    SKIN_TONE_MODIFIERS.contains(&c)
}

/// Returns every cluster together with its byte offset into `text`.
pub fn cluster_indices(text: &str) -> Vec<(usize, &str)> {
    let mut clusters = Vec::new();
    let mut consumed = 0;

    for (offset, grapheme) in text.grapheme_indices(true) {
        let end = offset + grapheme.len();
        if end <= consumed {
            continue;
        }

        if offset < consumed {
            // Extend chars glued to the trailing `;` of an entity
            clusters.push((consumed, &text[consumed..end]));
        } else if text[offset..].starts_with(NBSP_ENTITY) {
            consumed = offset + NBSP_ENTITY.len();
            clusters.push((offset, &text[offset..consumed]));
            continue;
        } else {
            split_modifier_runs(offset, grapheme, &mut clusters);
        }

        consumed = end;
    }

    clusters
}

fn split_modifier_runs<'a>(offset: usize, grapheme: &'a str, out: &mut Vec<(usize, &'a str)>) {
    let mut start = 0;
    let mut prev_is_modifier = false;
    for (idx, c) in grapheme.char_indices() {
        let is_modifier = is_skin_tone_modifier(c);
        if is_modifier && prev_is_modifier {
            out.push((offset + start, &grapheme[start..idx]));
            start = idx;
        }
        prev_is_modifier = is_modifier;
    }
    out.push((offset + start, &grapheme[start..]));
}

pub fn segment(text: &str) -> Vec<&str> {
    cluster_indices(text).into_iter().map(|(_, cluster)| cluster).collect()
}

pub fn length(text: &str) -> usize {
    cluster_indices(text).len()
}

/// Cluster length of raw bytes. Bytes that are not valid UTF-8 cannot be
/// segmented and count as zero clusters.
pub fn length_utf8(bytes: &[u8]) -> usize {
    match std::str::from_utf8(bytes) {
        Ok(text) => length(text),
        Err(err) => {
            log::debug!(error:? = err, len = bytes.len(); "Unable to segment input");
            0
        }
    }
}

/// Slices `text` by cluster index, `end` exclusive. Out of range indices are
/// clamped and an empty or inverted range yields an empty string.
pub fn substring(text: &str, start: usize, end: usize) -> &str {
    let clusters = cluster_indices(text);
    let end = end.min(clusters.len());
    if start >= end {
        return "";
    }

    let from = clusters[start].0;
    let to = clusters.get(end).map_or(text.len(), |(offset, _)| *offset);

    &text[from..to]
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use test_case::test_case;

    use super::*;

    #[rstest]
    #[case("", 0)]
    #[case("hello", 5)]
    #[case("hello world", 11)]
    #[case("\u{dc}n\u{ef}c\u{f6}d\u{e9}", 7)]
    #[case("Привет", 6)]
    fn bmp_without_combining_marks_counts_chars(#[case] input: &str, #[case] expected: usize) {
        assert_eq!(length(input), expected);
        assert_eq!(length(input), input.chars().count());
    }

    #[rstest]
    #[case("e\u{301}", 1)]
    #[case("y\u{306}es", 3)]
    #[case("cafe\u{301}s", 5)]
    #[case("a\u{301}\u{302}", 1)]
    fn combining_marks_stay_with_base(#[case] input: &str, #[case] expected: usize) {
        assert_eq!(length(input), expected);
    }

    #[test_case("😀", 1; "astral plane emoji")]
    #[test_case("😀😀", 2; "two astral emoji")]
    #[test_case("🇨🇿🇩🇪", 2; "two flags")]
    #[test_case("❤\u{fe0f}", 1; "variation selector")]
    #[test_case("👍🏼", 1; "skin tone modifier")]
    #[test_case("👍🏻🏼", 2; "second modifier is not merged")]
    #[test_case("🏻🏼", 2; "lone modifiers do not merge")]
    #[test_case("👨\u{200d}👩\u{200d}👧\u{200d}👦", 1; "zwj family")]
    #[test_case("a👨\u{200d}👩\u{200d}👧b", 3; "zwj family between letters")]
    #[test_case("👩🏽\u{200d}💻", 1; "zwj sequence with modifier")]
    fn emoji_sequences(input: &str, expected: usize) {
        assert_eq!(length(input), expected);
    }

    #[test_case("&nbsp;", 1; "entity alone")]
    #[test_case("a&nbsp;b", 3; "entity between letters")]
    #[test_case("&nbsp;&nbsp;", 2; "two entities")]
    #[test_case("&nbsp", 5; "incomplete entity")]
    fn nbsp_entity_is_one_cluster(input: &str, expected: usize) {
        assert_eq!(length(input), expected);
    }

    #[test]
    fn segment_returns_clusters_in_order() {
        assert_eq!(segment("a👍🏼e\u{301}🇨🇿"), vec!["a", "👍🏼", "e\u{301}", "🇨🇿"]);
        assert_eq!(segment("👍🏻🏼"), vec!["👍🏻", "🏼"]);
        assert!(segment("").is_empty());
    }

    #[test]
    fn cluster_indices_report_byte_offsets() {
        let input = "ab&nbsp;😀";
        let offsets: Vec<usize> = cluster_indices(input).iter().map(|(o, _)| *o).collect();

        assert_eq!(offsets, vec![0, 1, 2, 8]);
    }

    #[test]
    fn combining_mark_after_entity_is_kept() {
        let input = "&nbsp;\u{301}x";

        assert_eq!(segment(input), vec!["&nbsp;", "\u{301}", "x"]);
        assert_eq!(substring(input, 0, length(input)), input);
    }

    #[rstest]
    #[case("hello", 1, 3, "el")]
    #[case("👍🏼ok", 0, 1, "👍🏼")]
    #[case("👍🏼ok", 1, 3, "ok")]
    #[case("abc", 1, 99, "bc")]
    #[case("abc", 5, 9, "")]
    #[case("abc", 2, 1, "")]
    #[case("", 0, 5, "")]
    #[case("a&nbsp;b", 1, 2, "&nbsp;")]
    fn substring_by_cluster(
        #[case] input: &str,
        #[case] start: usize,
        #[case] end: usize,
        #[case] expected: &str,
    ) {
        assert_eq!(substring(input, start, end), expected);
    }

    #[rstest]
    #[case("")]
    #[case("plain ascii")]
    #[case("y\u{306}es 👍🏼 🇨🇿 👨\u{200d}👩\u{200d}👧")]
    #[case("🏻🏼&nbsp;&nbsp")]
    fn full_substring_is_identity(#[case] input: &str) {
        assert_eq!(substring(input, 0, length(input)), input);
    }

    #[rstest]
    #[case("cafe\u{301}s", 4, "cafe\u{301}")]
    #[case("ok👍🏼", 3, "ok👍🏼")]
    #[case("xx👨\u{200d}👩\u{200d}👧", 3, "xx👨\u{200d}👩\u{200d}👧")]
    #[case("🇨🇿🇩🇪", 1, "🇨🇿")]
    fn truncation_never_splits_a_cluster(
        #[case] input: &str,
        #[case] limit: usize,
        #[case] expected: &str,
    ) {
        let truncated = substring(input, 0, limit);

        assert_eq!(truncated, expected);
        assert!(!truncated.ends_with('\u{200d}'));
        assert_eq!(length(truncated), limit);
    }

    #[test]
    fn invalid_utf8_has_zero_length() {
        assert_eq!(length_utf8(&[0xff, 0xfe, 0x41]), 0);
        assert_eq!(length_utf8("e\u{301}x".as_bytes()), 2);
        assert_eq!(length_utf8(&[]), 0);
    }
}
