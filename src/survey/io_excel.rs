// Reading Excel workbooks.

use calamine::{open_workbook, DataType, Range, Reader, Xlsx};
use log::{debug, warn};
use snafu::prelude::*;

use crate::survey::io_common::{text_cell, Cell, SheetGrid};
use crate::survey::*;

pub fn read_excel_grid(path: &str, cfs: &FileSource) -> BSurveyResult<SheetGrid> {
    let wrange = get_range(path, cfs)?;
    // The range only covers the used cells: put them back at their position in the sheet.
    let (row_offset, col_offset) = wrange
        .start()
        .map(|(r, c)| (r as usize, c as usize))
        .unwrap_or((0, 0));
    debug!(
        "read_excel_grid: path: {:?} size: {:?} start: {:?}",
        path,
        wrange.get_size(),
        (row_offset, col_offset)
    );

    let mut rows: Vec<Vec<Cell>> = vec![Vec::new(); row_offset];
    for (idx, row) in wrange.rows().enumerate() {
        let mut cells: Vec<Cell> = vec![None; col_offset];
        for (col, elt) in row.iter().enumerate() {
            cells.push(read_cell(elt, idx + row_offset, col + col_offset));
        }
        rows.push(cells);
    }
    if rows.is_empty() {
        return Err(Box::new(SurveyError::EmptyExcel {
            path: path.to_string(),
        }));
    }
    Ok(SheetGrid { rows })
}

// Error cells (#DIV/0!, #N/A, ...) are blank.
fn read_cell(cell: &DataType, row: usize, col: usize) -> Cell {
    match cell {
        DataType::String(s) => text_cell(s),
        DataType::Empty => None,
        DataType::Int(i) => Some(i.to_string()),
        DataType::Float(f) | DataType::DateTime(f) => Some(format_float(*f)),
        DataType::Bool(b) => Some(b.to_string()),
        DataType::Error(e) => {
            warn!(
                "Error cell {}{} ({:?}), read as blank",
                card_sorting::column_label(col),
                row + 1,
                e
            );
            None
        }
    }
}

// Whole numbers are written without a decimal part.
fn format_float(f: f64) -> String {
    if f.fract() == 0.0 && f.abs() < 1e15 {
        format!("{}", f as i64)
    } else {
        f.to_string()
    }
}

fn get_range(path: &str, cfs: &FileSource) -> BSurveyResult<Range<DataType>> {
    let worksheet_name_o = cfs.excel_worksheet_name.clone();
    debug!(
        "get_range: path: {:?} worksheet: {:?}",
        &path, &worksheet_name_o
    );
    let mut workbook: Xlsx<_> = open_workbook(path).context(OpeningExcelSnafu { path })?;

    // A worksheet name was provided, use it.
    if let Some(worksheet_name) = worksheet_name_o {
        let wrange = workbook
            .worksheet_range(&worksheet_name)
            .context(MissingWorksheetSnafu {
                path,
                name: worksheet_name.clone(),
            })?
            .context(OpeningExcelSnafu { path })?;

        Ok(wrange)
    } else {
        let all_worksheets = workbook.worksheets();
        match all_worksheets.as_slice() {
            [] => Err(Box::new(SurveyError::EmptyExcel {
                path: path.to_string(),
            })),
            [(worksheet_name, wrange)] => {
                debug!(
                    "get_range: path: {:?} worksheet: {:?}",
                    &path, &worksheet_name
                );
                Ok(wrange.clone())
            }
            l => Err(Box::new(SurveyError::AmbiguousWorksheet {
                path: path.to_string(),
                count: l.len(),
            })),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::CellErrorType;

    fn fixture(name: &str) -> String {
        format!("{}/testdata/{}", env!("CARGO_MANIFEST_DIR"), name)
    }

    #[test]
    fn cells_as_text() {
        assert_eq!(read_cell(&DataType::String("a, b".to_string()), 0, 0), Some("a, b".to_string()));
        assert_eq!(read_cell(&DataType::String(" ".to_string()), 0, 0), None);
        assert_eq!(read_cell(&DataType::Empty, 0, 0), None);
        assert_eq!(read_cell(&DataType::Float(3.0), 0, 0), Some("3".to_string()));
        assert_eq!(read_cell(&DataType::Float(2.5), 0, 0), Some("2.5".to_string()));
        assert_eq!(read_cell(&DataType::Int(7), 0, 0), Some("7".to_string()));
        assert_eq!(read_cell(&DataType::Bool(true), 0, 0), Some("true".to_string()));
    }

    #[test]
    fn error_cells_are_blank() {
        assert_eq!(read_cell(&DataType::Error(CellErrorType::Div0), 2, 1), None);
        assert_eq!(read_cell(&DataType::Error(CellErrorType::NA), 4, 3), None);
    }

    #[test]
    fn cells_keep_their_sheet_position() {
        // The used range of this sheet starts at B2 and has error cells in E4 and D5.
        let path = fixture("offset.xlsx");
        let cfs = FileSource::new("xlsx", &path);
        let grid = read_excel_grid(&path, &cfs).unwrap();
        assert_eq!(grid.rows.len(), 5);
        assert!(grid.rows[0].is_empty());
        assert_eq!(grid.width(), 5);
        assert_eq!(grid.rows[1][0], None);
        assert_eq!(grid.rows[1][1].as_deref(), Some("id"));
        assert_eq!(grid.rows[3][2].as_deref(), Some("A, B"));
        assert_eq!(grid.rows[3][3].as_deref(), Some("Letters"));
        assert_eq!(grid.rows[3][4], None);
        assert_eq!(grid.rows[4][3], None);
        assert_eq!(grid.rows[4][4].as_deref(), Some("3"));
    }

    #[test]
    fn worksheet_selection() {
        let path = fixture("two_sheets.xlsx");
        let mut cfs = FileSource::new("xlsx", &path);
        assert!(matches!(
            read_excel_grid(&path, &cfs).map_err(|e| *e),
            Err(SurveyError::AmbiguousWorksheet { count: 2, .. })
        ));

        cfs.excel_worksheet_name = Some("Second".to_string());
        let grid = read_excel_grid(&path, &cfs).unwrap();
        assert_eq!(grid.rows[0][0].as_deref(), Some("second"));
        assert_eq!(grid.rows[0][1].as_deref(), Some("2.5"));

        cfs.excel_worksheet_name = Some("Missing".to_string());
        assert!(matches!(
            read_excel_grid(&path, &cfs).map_err(|e| *e),
            Err(SurveyError::MissingWorksheet { .. })
        ));
    }

    #[test]
    fn missing_workbook() {
        let cfs = FileSource::new("xlsx", "/nonexistent/responses.xlsx");
        let res = read_excel_grid(&cfs.file_path, &cfs);
        assert!(matches!(res.map_err(|e| *e), Err(SurveyError::OpeningExcel { .. })));
    }
}
