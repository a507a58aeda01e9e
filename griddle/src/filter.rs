//! Filter engine: per-column substring matching plus the live/committed
//! debounce used by the tabular view.

use std::collections::HashMap;
use std::hash::Hash;
use std::time::{Duration, Instant};

use crate::column::{column_by_key, Column, GridRow};
use crate::render::filter_text;

/// Default window for coalescing keystrokes before recomputing the
/// filtered set.
pub const DEFAULT_DEBOUNCE_WINDOW: Duration = Duration::from_millis(300);

/// Mapping from column key to free-text search term. An absent or empty
/// term means "no constraint for that column".
pub type FilterState<K> = HashMap<K, String>;

/// Whether one item survives every active term.
///
/// The term must be a case-insensitive substring of the column's resolved
/// filter text. Columns resolving to rich content never constrain the
/// result; a term for a key with no matching column matches nothing.
pub fn row_matches<T: GridRow>(
    item: &T,
    columns: &[Column<T>],
    filters: &FilterState<T::Key>,
) -> bool {
    filters.iter().all(|(key, term)| {
        if term.is_empty() {
            return true;
        }

        let Some(column) = column_by_key(columns, *key) else {
            log::warn!("filter term for unknown column {key:?}");
            return false;
        };

        match filter_text(column, item) {
            Some(text) => text.to_lowercase().contains(&term.to_lowercase()),
            None => true,
        }
    })
}

/// Indices (into `items`) of the rows surviving `filters`, order preserved.
pub fn filtered_indices<T: GridRow>(
    items: &[T],
    columns: &[Column<T>],
    filters: &FilterState<T::Key>,
) -> Vec<usize> {
    (0..items.len())
        .filter(|&i| row_matches(&items[i], columns, filters))
        .collect()
}

/// Filtered copy of `items`, order preserved.
pub fn filter_items<T: GridRow>(
    items: &[T],
    columns: &[Column<T>],
    filters: &FilterState<T::Key>,
) -> Vec<T> {
    filtered_indices(items, columns, filters)
        .into_iter()
        .map(|i| items[i].clone())
        .collect()
}

/// Two-tier filter state: a live tier updated on every keystroke (drives
/// the visible inputs) and a committed tier that actually filters, updated
/// once the debounce window closes.
///
/// The deadline is plain data checked against a caller-supplied clock, so
/// the owner drives time explicitly and the timer dies with the view.
#[derive(Debug, Clone)]
pub struct DebouncedFilter<K: Copy + Eq + Hash> {
    live: FilterState<K>,
    committed: FilterState<K>,
    deadline: Option<Instant>,
    window: Duration,
}

impl<K: Copy + Eq + Hash> DebouncedFilter<K> {
    pub fn new(window: Duration) -> Self {
        Self {
            live: FilterState::new(),
            committed: FilterState::new(),
            deadline: None,
            window,
        }
    }

    /// Record a keystroke: the live term updates immediately, the commit
    /// deadline re-arms. A later keystroke supersedes an armed commit.
    pub fn set(&mut self, key: K, term: impl Into<String>, now: Instant) {
        self.live.insert(key, term.into());
        self.deadline = Some(now + self.window);
    }

    pub fn live(&self, key: K) -> &str {
        self.live.get(&key).map(String::as_str).unwrap_or("")
    }

    pub fn committed(&self) -> &FilterState<K> {
        &self.committed
    }

    /// Commit the live tier if the debounce window has closed.
    /// Returns whether the committed tier changed.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                self.commit()
            }
            _ => false,
        }
    }

    /// Commit the live tier immediately, disarming any pending deadline.
    pub fn flush(&mut self) -> bool {
        self.deadline = None;
        self.commit()
    }

    /// Reset both tiers atomically. Returns whether the committed tier
    /// changed.
    pub fn clear(&mut self) -> bool {
        self.live.clear();
        self.deadline = None;
        let changed = self.committed.values().any(|t| !t.is_empty());
        self.committed.clear();
        changed
    }

    /// Whether any committed term constrains the result set.
    pub fn is_active(&self) -> bool {
        self.committed.values().any(|t| !t.is_empty())
    }

    fn commit(&mut self) -> bool {
        if self.committed == self.live {
            false
        } else {
            self.committed = self.live.clone();
            true
        }
    }
}

impl<K: Copy + Eq + Hash> Default for DebouncedFilter<K> {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE_WINDOW)
    }
}
