/// A single spreadsheet cell after loading. Numeric-looking text stays text
/// until a reduction asks for a number via [`parse_numeric_cell`].
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Number(f64),
    Text(String),
}

static EMPTY_CELL: Cell = Cell::Empty;

impl Cell {
    /// Textual rendering used for the query and URL columns. Whole numbers
    /// drop the trailing `.0` so a cell holding `42.0` reads as `"42"`.
    pub fn as_text(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Text(s) => s.clone(),
            Cell::Number(n) => {
                if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
                    format!("{}", *n as i64)
                } else {
                    n.to_string()
                }
            }
        }
    }
}

/// A rectangular dataset: ordered column names plus rows of cells.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl Dataset {
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Cell lookup that treats anything outside the loaded rectangle as empty.
    pub fn cell(&self, row: usize, col: usize) -> &Cell {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .unwrap_or(&EMPTY_CELL)
    }
}

/// Numeric coercion for loosely typed cells. The reduction decides what a
/// `None` means: sums treat it as 0, averages leave it out of the denominator.
pub fn parse_numeric_cell(cell: &Cell) -> Option<f64> {
    match cell {
        Cell::Number(n) if n.is_finite() => Some(*n),
        Cell::Number(_) => None,
        Cell::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        Cell::Empty => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_numeric_cell_coerces_text_and_rejects_garbage() {
        assert_eq!(parse_numeric_cell(&Cell::Number(3.5)), Some(3.5));
        assert_eq!(parse_numeric_cell(&Cell::Text(" 12 ".into())), Some(12.0));
        assert_eq!(parse_numeric_cell(&Cell::Text("12,5".into())), None);
        assert_eq!(parse_numeric_cell(&Cell::Text("n/a".into())), None);
        assert_eq!(parse_numeric_cell(&Cell::Empty), None);
        assert_eq!(parse_numeric_cell(&Cell::Number(f64::NAN)), None);
    }

    #[test]
    fn as_text_renders_whole_numbers_without_fraction() {
        assert_eq!(Cell::Number(42.0).as_text(), "42");
        assert_eq!(Cell::Number(3.25).as_text(), "3.25");
        assert_eq!(Cell::Text("shop shoes".into()).as_text(), "shop shoes");
        assert_eq!(Cell::Empty.as_text(), "");
    }

    #[test]
    fn cell_lookup_outside_rectangle_is_empty() {
        let dataset = Dataset {
            columns: vec!["Query".into()],
            rows: vec![vec![Cell::Text("a".into())]],
        };
        assert_eq!(dataset.cell(0, 0), &Cell::Text("a".into()));
        assert_eq!(dataset.cell(0, 5), &Cell::Empty);
        assert_eq!(dataset.cell(9, 0), &Cell::Empty);
    }
}
