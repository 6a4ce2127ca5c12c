//! Label-addressed extraction of table rows from a parsed page

use scraper::{ElementRef, Html, Selector};
use std::collections::HashMap;
use tracing::{debug, warn};

use super::listing::ChangeDirection;
use super::numeric::clean_number;
use super::shape::{FieldKind, FieldSpec, PageShape};

#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(Option<f64>),
    Signed {
        magnitude: Option<f64>,
        direction: ChangeDirection,
    },
}

impl Cell {
    fn from_text(kind: FieldKind, text: &str) -> Self {
        match kind {
            FieldKind::Text => Cell::Text(text.to_string()),
            FieldKind::Number => Cell::Number(clean_number(text)),
            FieldKind::Signed => Cell::Signed {
                magnitude: clean_number(text),
                direction: ChangeDirection::from_change_text(text),
            },
        }
    }
}

/// One table row, keyed by the field keys of its [`PageShape`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    cells: HashMap<&'static str, Cell>,
}

impl Row {
    pub fn from_cells<I>(cells: I) -> Self
    where
        I: IntoIterator<Item = (&'static str, Cell)>,
    {
        Self {
            cells: cells.into_iter().collect(),
        }
    }

    pub fn text(&self, key: &str) -> Option<&str> {
        match self.cells.get(key) {
            Some(Cell::Text(text)) => Some(text),
            _ => None,
        }
    }

    pub fn number(&self, key: &str) -> Option<f64> {
        match self.cells.get(key) {
            Some(Cell::Number(value)) => *value,
            Some(Cell::Signed { magnitude, .. }) => *magnitude,
            _ => None,
        }
    }

    /// Magnitude and direction of a signed field. A missing cell reads as
    /// an absent magnitude with a negative direction.
    pub fn signed(&self, key: &str) -> (Option<f64>, ChangeDirection) {
        match self.cells.get(key) {
            Some(Cell::Signed {
                magnitude,
                direction,
            }) => (*magnitude, *direction),
            _ => (None, ChangeDirection::Negative),
        }
    }
}

/// Walks the rows of `shape`'s container in `document`.
///
/// Never fails: a missing container yields no rows, and a row missing a
/// required cell is skipped.
pub fn extract_rows(document: &Html, shape: &PageShape) -> Vec<Row> {
    let (container_sel, row_sel) = match (
        Selector::parse(shape.container),
        Selector::parse(shape.rows),
    ) {
        (Ok(c), Ok(r)) => (c, r),
        _ => {
            warn!(shape = shape.name, "Invalid container or row selector");
            return Vec::new();
        }
    };

    let cell_sels: Vec<(&FieldSpec, Selector)> = shape
        .fields
        .iter()
        .filter_map(|field| {
            let css = format!(r#"td[aria-label="{}"]"#, field.label);
            match Selector::parse(&css) {
                Ok(sel) => Some((field, sel)),
                Err(e) => {
                    warn!(shape = shape.name, label = field.label, "Invalid cell selector: {e}");
                    None
                }
            }
        })
        .collect();

    let Some(container) = document.select(&container_sel).next() else {
        debug!(shape = shape.name, "Container not found");
        return Vec::new();
    };

    let rows: Vec<Row> = container
        .select(&row_sel)
        .filter_map(|row| extract_row(row, &cell_sels))
        .collect();
    debug!(shape = shape.name, rows = rows.len(), "Extracted rows");
    rows
}

fn extract_row(row: ElementRef<'_>, cell_sels: &[(&FieldSpec, Selector)]) -> Option<Row> {
    let mut cells = HashMap::with_capacity(cell_sels.len());
    for (field, sel) in cell_sels {
        match row.select(sel).next() {
            Some(cell) => {
                let text = element_text(cell);
                cells.insert(field.key, Cell::from_text(field.kind, &text));
            }
            None if field.required => return None,
            None => {}
        }
    }
    Some(Row { cells })
}

/// Concatenated, trimmed text content of an element.
pub fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}
