//! Byte offset to line/column conversion for diagnostics.

/// Start offsets of every line in a source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    line_starts: Vec<usize>,
    len: usize,
}

impl LineIndex {
    #[must_use]
    pub fn new(src: &str) -> Self {
        let line_starts = std::iter::once(0)
            .chain(src.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        Self {
            line_starts,
            len: src.len(),
        }
    }

    /// 1-based line and column of `offset`. Columns count bytes.
    ///
    /// Offsets past the end are clamped to the end of the text.
    #[must_use]
    pub fn line_col(&self, offset: usize) -> (usize, usize) {
        let offset = offset.min(self.len);
        let line = self.line_starts.partition_point(|&start| start <= offset);
        let start = line
            .checked_sub(1)
            .and_then(|i| self.line_starts.get(i))
            .copied()
            .unwrap_or(0);
        (line.max(1), offset - start + 1)
    }

    /// Number of lines, counting a trailing empty line.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, (1, 1))]
    #[case(3, (1, 4))]
    #[case(4, (2, 1))]
    #[case(6, (2, 3))]
    #[case(100, (3, 1))]
    fn offsets_map_to_lines(#[case] offset: usize, #[case] expected: (usize, usize)) {
        let index = LineIndex::new("abc\nde\n");
        assert_eq!(index.line_col(offset), expected);
    }

    #[test]
    fn counts_lines() {
        assert_eq!(LineIndex::new("").line_count(), 1);
        assert_eq!(LineIndex::new("a\nb").line_count(), 2);
    }
}
