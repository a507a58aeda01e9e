//! Card list view: the same sort/filter/render stack as the tabular view,
//! presented as collapsible cards for narrow layouts.
//!
//! Sort and filter are collected through modal dialogs instead of inline
//! controls (cards have no header row to host them). Either exactly one
//! card is open under manual toggling, or every card is open under the
//! expand-all toggle; the two modes are mutually exclusive.

mod events;
mod filter_dialog;
mod render;
mod sort_dialog;
mod state;

pub use state::{CardListId, CardListView, CardsOutput, Expansion};
