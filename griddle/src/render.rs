//! Render resolver: one place that turns a raw field value (or a column's
//! custom renderer) into display and filter text.

use crate::column::{Column, GridRow};
use crate::content::CellContent;

/// Resolve the displayable content of one cell.
///
/// A custom renderer wins outright; otherwise the raw value's canonical
/// text is used, with `Null` resolving to empty content.
pub fn resolve<T: GridRow>(column: &Column<T>, item: &T) -> CellContent {
    if let Some(content) = column.custom_render(item) {
        return content;
    }

    match item.value(column.key).canonical_text() {
        Some(text) => CellContent::Text(text),
        None => CellContent::Empty,
    }
}

/// The text a cell contributes to filtering.
///
/// `None` means the cell has rich (styled) content and cannot constrain
/// results; `Some("")` means an empty cell, which only the empty term
/// matches.
pub fn filter_text<T: GridRow>(column: &Column<T>, item: &T) -> Option<String> {
    match resolve(column, item) {
        CellContent::Text(text) => Some(text),
        CellContent::Empty => Some(String::new()),
        CellContent::Styled(_) => None,
    }
}
