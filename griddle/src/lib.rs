//! Column-driven data display for terminal UIs.
//!
//! griddle provides a generic, reusable table / card-list component pair
//! with client-side sorting and per-column text filtering, driven entirely
//! by column descriptors. The sort and filter engines are standalone pure
//! functions; the two views compose them identically and differ only in
//! how they collect operations (inline controls vs. modal dialogs) and lay
//! out results.

pub mod cards;
pub mod column;
pub mod content;
pub mod filter;
pub mod menu;
pub mod render;
pub mod sort;
pub mod table;
pub mod theme;
pub mod toast;
pub mod value;

pub use cards::{CardListId, CardListView, CardsOutput, Expansion};
pub use column::{column_by_key, Column, GridRow};
pub use content::{CellContent, Span};
pub use filter::{
    filter_items, filtered_indices, row_matches, DebouncedFilter, FilterState,
    DEFAULT_DEBOUNCE_WINDOW,
};
pub use menu::{MenuAction, OpenMenu};
pub use render::{filter_text, resolve};
pub use sort::{
    initial_sort_config, request_sort, sort_items, sorted_indices, SortConfig, SortDirection,
};
pub use table::{TableId, TableOutput, TableView};
pub use theme::Theme;
pub use toast::{Toast, ToastLevel, Toasts, DEFAULT_TOAST_DURATION};
pub use value::Value;

pub mod prelude {
    pub use crate::cards::{CardListView, CardsOutput, Expansion};
    pub use crate::column::{Column, GridRow};
    pub use crate::content::{CellContent, Span};
    pub use crate::filter::FilterState;
    pub use crate::menu::MenuAction;
    pub use crate::sort::{SortConfig, SortDirection};
    pub use crate::table::{TableOutput, TableView};
    pub use crate::theme::Theme;
    pub use crate::toast::{Toast, Toasts};
    pub use crate::value::Value;
}
