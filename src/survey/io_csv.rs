// Primitives for reading CSV files.

use log::debug;
use snafu::prelude::*;

use crate::survey::io_common::{text_cell, Cell, SheetGrid};
use crate::survey::*;

pub fn read_csv_grid(path: &str) -> BSurveyResult<SheetGrid> {
    // The header is a regular row here: the participants are located by position.
    let rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .context(CsvOpenSnafu { path })?;

    let mut rows: Vec<Vec<Cell>> = Vec::new();
    for (idx, line_r) in rdr.into_records().enumerate() {
        let lineno = idx + 1;
        let line = line_r.context(CsvLineParseSnafu { lineno })?;
        let cells: Vec<Cell> = line.iter().map(text_cell).collect();
        debug!("read_csv_grid: lineno: {:?} cells: {:?}", lineno, cells.len());
        rows.push(cells);
    }
    Ok(SheetGrid { rows })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn ragged_rows_and_quoted_commas() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "id,group 1,group 2,name 1").unwrap();
        writeln!(f, "1,\"Grades, Holds\"").unwrap();
        writeln!(f, "2,,Fees,  ,extra").unwrap();
        let path = f.path().display().to_string();

        let grid = read_csv_grid(&path).unwrap();
        assert_eq!(grid.rows.len(), 3);
        assert_eq!(grid.width(), 5);
        assert_eq!(grid.rows[1][1].as_deref(), Some("Grades, Holds"));
        assert_eq!(grid.rows[1].len(), 2);
        assert_eq!(grid.rows[2][1], None);
        assert_eq!(grid.rows[2][3], None);
    }
}
