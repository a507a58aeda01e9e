//! Sort engine: initial config resolution, ordering, and sort requests.
//!
//! All functions here are pure; the views own the [`SortConfig`] they
//! persist between calls.

use crate::column::{Column, GridRow};

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

/// The active (column, direction) pair driving ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortConfig<K> {
    pub sort_by: K,
    pub direction: SortDirection,
}

/// Resolve the sort configuration a view starts with.
///
/// A preferred key is honored only when it names a sortable column;
/// otherwise the first sortable column (descriptor order) is used,
/// ascending. With no sortable column there is no sort.
pub fn initial_sort_config<T: GridRow>(
    columns: &[Column<T>],
    preferred: Option<(T::Key, SortDirection)>,
) -> Option<SortConfig<T::Key>> {
    if let Some((key, direction)) = preferred {
        if columns.iter().any(|c| c.key == key && c.sortable) {
            return Some(SortConfig {
                sort_by: key,
                direction,
            });
        }
    }

    columns.iter().find(|c| c.sortable).map(|c| SortConfig {
        sort_by: c.key,
        direction: SortDirection::Ascending,
    })
}

/// Compute the configuration resulting from a request to sort by `key`:
/// the active column flips direction, a new column adopts ascending.
pub fn request_sort<K: Copy + PartialEq>(
    current: Option<&SortConfig<K>>,
    key: K,
) -> SortConfig<K> {
    match current {
        Some(config) if config.sort_by == key => SortConfig {
            sort_by: key,
            direction: config.direction.flipped(),
        },
        _ => SortConfig {
            sort_by: key,
            direction: SortDirection::Ascending,
        },
    }
}

/// Indices of `items` in sorted order.
///
/// The sort is stable: items whose values compare equal keep their input
/// order, in both directions (descending reverses the comparator, not the
/// output).
pub fn sorted_indices<T: GridRow>(items: &[T], config: &SortConfig<T::Key>) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..items.len()).collect();
    indices.sort_by(|&a, &b| {
        let av = items[a].value(config.sort_by);
        let bv = items[b].value(config.sort_by);
        let ordering = av.total_cmp(&bv);
        match config.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
    indices
}

/// Sorted copy of `items` under `config`.
pub fn sort_items<T: GridRow>(items: &[T], config: &SortConfig<T::Key>) -> Vec<T> {
    sorted_indices(items, config)
        .into_iter()
        .map(|i| items[i].clone())
        .collect()
}
