// Spreadsheet column positions.

use log::debug;

use crate::config::CardSortErrors;

/// Converts a spreadsheet column label to a zero-based column index.
///
/// The labels follow the usual spreadsheet numbering: A=0, ..., Z=25, AA=26, AL=37.
/// Lower case letters are accepted.
pub fn column_index(label: &str) -> Result<usize, CardSortErrors> {
    let invalid = || CardSortErrors::InvalidColumnLabel(label.to_string());
    if label.is_empty() {
        return Err(invalid());
    }
    let mut res: usize = 0;
    for c in label.chars() {
        if !c.is_ascii_alphabetic() {
            return Err(invalid());
        }
        let digit = (c.to_ascii_uppercase() as usize) - ('A' as usize) + 1;
        res = res
            .checked_mul(26)
            .and_then(|x| x.checked_add(digit))
            .ok_or_else(invalid)?;
    }
    Ok(res - 1)
}

/// The spreadsheet label of a zero-based column index.
pub fn column_label(index: usize) -> String {
    let mut chars: Vec<char> = Vec::new();
    let mut n = index + 1;
    while n > 0 {
        let rem = (n - 1) % 26;
        chars.push((b'A' + rem as u8) as char);
        n = (n - 1) / 26;
    }
    chars.iter().rev().collect()
}

/// A contiguous range of columns, `start` included and `end` excluded.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub struct ColumnSpan {
    pub start: usize,
    pub end: usize,
}

impl ColumnSpan {
    /// The span covering the columns `first` to `last`, both included.
    pub fn new(first: usize, last: usize) -> Result<ColumnSpan, CardSortErrors> {
        if last < first {
            return Err(CardSortErrors::InvertedColumnSpan { first, last });
        }
        Ok(ColumnSpan {
            start: first,
            end: last + 1,
        })
    }

    /// The span covering the columns labelled `first` to `last`, both included.
    pub fn from_labels(first: &str, last: &str) -> Result<ColumnSpan, CardSortErrors> {
        ColumnSpan::new(column_index(first)?, column_index(last)?)
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn positions(&self) -> std::ops::Range<usize> {
        self.start..self.end.max(self.start)
    }

    fn clamp_to_width(&self, width: usize) -> ColumnSpan {
        ColumnSpan {
            start: self.start,
            end: self.end.min(width),
        }
    }
}

impl std::fmt::Display for ColumnSpan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            write!(f, "{} (empty)", column_label(self.start))
        } else {
            write!(
                f,
                "{}:{}",
                column_label(self.start),
                column_label(self.end - 1)
            )
        }
    }
}

/// Where the contents and the names of the groups are found in a participant row.
///
/// The two spans are read pairwise: the n-th contents column goes with the n-th
/// name column.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub struct ColumnLayout {
    pub groups: ColumnSpan,
    pub names: ColumnSpan,
}

/// The result of fitting a layout into a sheet.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub struct ClampedLayout {
    pub layout: ColumnLayout,
    /// True if at least one of the spans went past the available width.
    pub clamped: bool,
}

impl ColumnLayout {
    pub fn new(groups: ColumnSpan, names: ColumnSpan) -> ColumnLayout {
        ColumnLayout { groups, names }
    }

    /// The layout of the card sort export this tool was first written for:
    /// contents in AL to YB, names in YC to YQ.
    pub fn default_layout() -> ColumnLayout {
        ColumnLayout {
            groups: ColumnSpan {
                start: 37,
                end: 652,
            },
            names: ColumnSpan {
                start: 652,
                end: 667,
            },
        }
    }

    /// The number of candidate groups: the shorter of the two spans.
    pub fn pair_count(&self) -> usize {
        self.groups.len().min(self.names.len())
    }

    pub fn is_balanced(&self) -> bool {
        self.groups.len() == self.names.len()
    }

    /// Narrows both spans so that they fit in a sheet with `width` columns.
    ///
    /// The caller is expected to report when `clamped` is set.
    pub fn clamp_to_width(&self, width: usize) -> ClampedLayout {
        let layout = ColumnLayout {
            groups: self.groups.clamp_to_width(width),
            names: self.names.clamp_to_width(width),
        };
        let clamped = layout != *self;
        debug!(
            "clamp_to_width: width: {:?} layout: {:?} clamped: {:?}",
            width, layout, clamped
        );
        ClampedLayout { layout, clamped }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_index_single_letters() {
        assert_eq!(column_index("A"), Ok(0));
        assert_eq!(column_index("Z"), Ok(25));
        assert_eq!(column_index("t"), Ok(19));
    }

    #[test]
    fn column_index_multiple_letters() {
        assert_eq!(column_index("AA"), Ok(26));
        assert_eq!(column_index("AL"), Ok(37));
        assert_eq!(column_index("YB"), Ok(651));
        assert_eq!(column_index("YC"), Ok(652));
        assert_eq!(column_index("YQ"), Ok(666));
        assert_eq!(column_index("AAA"), Ok(702));
    }

    #[test]
    fn column_index_rejects_bad_labels() {
        assert!(column_index("").is_err());
        assert!(column_index("A1").is_err());
        assert!(column_index("É").is_err());
        assert!(column_index(&"Z".repeat(40)).is_err());
    }

    #[test]
    fn column_label_inverts_column_index() {
        for label in ["A", "Z", "AA", "AL", "AZ", "BA", "YB", "ZZ", "AAA"] {
            assert_eq!(column_label(column_index(label).unwrap()), label);
        }
    }

    #[test]
    fn span_from_labels() {
        let span = ColumnSpan::from_labels("YC", "YQ").unwrap();
        assert_eq!(span.len(), 15);
        assert_eq!(span.to_string(), "YC:YQ");
        assert_eq!(
            ColumnSpan::from_labels("C", "A"),
            Err(CardSortErrors::InvertedColumnSpan { first: 2, last: 0 })
        );
    }

    #[test]
    fn default_layout_matches_labels() {
        let layout = ColumnLayout::new(
            ColumnSpan::from_labels("AL", "YB").unwrap(),
            ColumnSpan::from_labels("YC", "YQ").unwrap(),
        );
        assert_eq!(layout, ColumnLayout::default_layout());
        assert_eq!(layout.pair_count(), 15);
        assert!(!layout.is_balanced());
    }

    #[test]
    fn clamp_to_width_narrows_spans() {
        let layout = ColumnLayout::new(
            ColumnSpan::from_labels("B", "D").unwrap(),
            ColumnSpan::from_labels("E", "G").unwrap(),
        );
        let same = layout.clamp_to_width(10);
        assert!(!same.clamped);
        assert_eq!(same.layout, layout);

        let narrowed = layout.clamp_to_width(6);
        assert!(narrowed.clamped);
        assert_eq!(narrowed.layout.groups.len(), 3);
        assert_eq!(narrowed.layout.names.len(), 2);
        assert_eq!(narrowed.layout.pair_count(), 2);

        let gone = layout.clamp_to_width(3);
        assert!(gone.layout.names.is_empty());
        assert_eq!(gone.layout.pair_count(), 0);
        assert_eq!(gone.layout.names.positions().count(), 0);
    }
}
