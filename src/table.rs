//! Table accumulation and Markdown table emission
//!
//! Cells are collected while the table is open and the whole table is
//! emitted when `</table>` closes. The first collected row becomes the header
//! row and fixes the separator width; later rows are written as they are,
//! even when their column count differs.

/// Cell delimiter used between columns
const CELL_SEPARATOR: &str = " | ";

/// Separator cell written under each header column
const SEPARATOR_CELL: &str = "---";

/// Rows and cells of the table currently being read
#[derive(Debug, Default)]
pub struct TableAccumulator {
    active: bool,
    rows: Vec<Vec<String>>,
    current_row: Vec<String>,
}

impl TableAccumulator {
    /// Create an inactive accumulator
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a table, dropping any rows left from a previous one
    pub fn open(&mut self) {
        self.active = true;
        self.rows.clear();
    }

    /// Whether a table is open
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Start a new row
    pub fn start_row(&mut self) {
        if self.active {
            self.current_row.clear();
        }
    }

    /// Add a cell to the current row
    pub fn push_cell(&mut self, cell: String) {
        if self.active {
            self.current_row.push(cell);
        }
    }

    /// Finish the current row; rows without cells are dropped
    pub fn end_row(&mut self) {
        if self.active && !self.current_row.is_empty() {
            self.rows.push(std::mem::take(&mut self.current_row));
        }
    }

    /// Rows finished so far
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Close the table and return its Markdown lines
    ///
    /// Returns no lines when the table is not open or collected no rows.
    pub fn close(&mut self) -> Vec<String> {
        if !self.active {
            return Vec::new();
        }
        let lines = render_rows(&self.rows);
        self.active = false;
        self.rows.clear();
        self.current_row.clear();
        lines
    }
}

/// Render collected rows as a Markdown table
///
/// # Examples
///
/// ```
/// use editmd_converter::table::render_rows;
///
/// let rows = vec![
///     vec!["A".to_string(), "B".to_string()],
///     vec!["1".to_string(), "2".to_string()],
/// ];
/// assert_eq!(render_rows(&rows), ["| A | B |", "| --- | --- |", "| 1 | 2 |"]);
/// ```
pub fn render_rows(rows: &[Vec<String>]) -> Vec<String> {
    let Some((header, body)) = rows.split_first() else {
        return Vec::new();
    };

    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(format_row(header.as_slice()));
    lines.push(format_row(vec![SEPARATOR_CELL; header.len()].as_slice()));
    lines.extend(body.iter().map(|row| format_row(row.as_slice())));
    lines
}

fn format_row<S: AsRef<str>>(cells: &[S]) -> String {
    let joined = cells
        .iter()
        .map(|cell| cell.as_ref())
        .collect::<Vec<&str>>()
        .join(CELL_SEPARATOR);
    format!("| {} |", joined)
}
