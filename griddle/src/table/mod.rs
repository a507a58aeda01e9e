//! Tabular view: records as rows with sortable headers, per-column inline
//! search, and contextual action menus.
//!
//! The view owns its sort configuration and two-tier (live/committed)
//! filter state, derives the visible row set through the sort and filter
//! engines, and paints into a [`termcell::Buffer`]. Geometry is recorded
//! during render so mouse clicks resolve to headers, inputs, rows, and
//! menu entries.
//!
//! # Example
//!
//! ```ignore
//! let table: TableView<Product, PageAction> = TableView::new(columns)
//!     .initial_sort(Field::Name, SortDirection::Ascending)
//!     .row_actions(|p| vec![MenuAction::new("Open", PageAction::Open(p.id))]);
//!
//! table.set_rows(products);
//! table.render(frame, area, &theme);
//! ```

mod events;
mod render;
mod state;

pub use state::{TableId, TableOutput, TableView};
