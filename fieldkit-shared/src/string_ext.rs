use std::ops::Range;

use crate::graphemes;

pub trait StrExt {
    fn cluster_len(&self) -> usize;
    fn cluster_slice(&self, range: Range<usize>) -> &str;
}

impl StrExt for str {
    fn cluster_len(&self) -> usize {
        graphemes::length(self)
    }

    fn cluster_slice(&self, range: Range<usize>) -> &str {
        graphemes::substring(self, range.start, range.end)
    }
}

pub trait StringExt {
    /// Keeps at most `limit` clusters. Returns true if anything was cut off.
    fn truncate_clusters(&mut self, limit: usize) -> bool;
}

impl StringExt for String {
    fn truncate_clusters(&mut self, limit: usize) -> bool {
        let cut_at = graphemes::cluster_indices(self).get(limit).map(|(offset, _)| *offset);
        match cut_at {
            Some(offset) => {
                self.truncate(offset);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test_case("abcdef", 5, "abcde", true; "ascii over limit")]
    #[test_case("abcde", 5, "abcde", false; "ascii at limit")]
    #[test_case("", 3, "", false; "empty")]
    #[test_case("ab👍🏼cd", 3, "ab👍🏼", true; "keeps whole emoji")]
    #[test_case("e\u{301}e\u{301}", 1, "e\u{301}", true; "keeps combining mark")]
    #[test_case("abc", 0, "", true; "zero limit")]
    fn truncate_clusters(input: &str, limit: usize, expected: &str, expected_cut: bool) {
        let mut value = input.to_owned();

        let cut = value.truncate_clusters(limit);

        assert_eq!(value, expected);
        assert_eq!(cut, expected_cut);
    }

    #[test]
    fn str_helpers_delegate_to_segmenter() {
        assert_eq!("y\u{306}es".cluster_len(), 3);
        assert_eq!("🇨🇿🇩🇪🇦🇹".cluster_slice(1..2), "🇩🇪");
    }
}
