use std::path::Path;

/// A cell of a sheet. Blank cells are `None`.
pub type Cell = Option<String>;

/// The content of a worksheet, the header included.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct SheetGrid {
    pub rows: Vec<Vec<Cell>>,
}

impl SheetGrid {
    /// The number of columns of the widest row.
    pub fn width(&self) -> usize {
        self.rows.iter().map(|r| r.len()).max().unwrap_or(0)
    }

    /// The participant rows, with their position among the rows that follow the header
    /// (starting at 1). The `metadata_rows` rows after the header are skipped.
    pub fn participant_rows(
        &self,
        metadata_rows: usize,
    ) -> impl Iterator<Item = (usize, &[Cell])> + '_ {
        self.rows
            .iter()
            .skip(1)
            .enumerate()
            .skip(metadata_rows)
            .map(|(idx, row)| (idx + 1, row.as_slice()))
    }
}

/// Blank text is an absent value.
pub fn text_cell(s: &str) -> Cell {
    if s.trim().is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

pub fn simplify_file_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or(path)
        .to_string()
}

/// Builds the identifiers of the participants from their row position. With several
/// input files, the name of the file is added to keep them distinct.
pub fn make_default_id(path: &str, with_file_name: bool) -> impl Fn(usize) -> String {
    let simplified_file_name = simplify_file_name(path);
    move |lineno| {
        if with_file_name {
            format!("{}-{}", simplified_file_name, lineno)
        } else {
            format!("{}", lineno)
        }
    }
}

pub fn last_column_label(width: usize) -> String {
    if width == 0 {
        "none".to_string()
    } else {
        card_sorting::column_label(width - 1)
    }
}
