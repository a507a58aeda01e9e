//! Tabular view state.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

use termcell::{Buffer, Event, InputState, Rect};

use crate::column::{Column, GridRow};
use crate::filter::DebouncedFilter;
use crate::menu::{MenuAction, OpenMenu};
use crate::sort::{initial_sort_config, request_sort, sorted_indices, SortConfig, SortDirection};
use crate::theme::Theme;

/// Unique identifier for a TableView instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TableId(usize);

impl TableId {
    fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl std::fmt::Display for TableId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "__table_{}", self.0)
    }
}

/// What an interaction asked the embedding page to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableOutput<A> {
    /// A row-menu entry was activated. `index` points into the row set
    /// passed to [`TableView::set_rows`].
    RowAction { index: usize, action: A },
    /// A view-menu entry was activated.
    ViewAction(A),
    /// The empty-state reload affordance was activated.
    Reload,
}

pub(super) type RowActionsFn<T, A> = Arc<dyn Fn(&T) -> Vec<MenuAction<A>> + Send + Sync>;
pub(super) type ViewActionsFn<A> = Arc<dyn Fn() -> Vec<MenuAction<A>> + Send + Sync>;

/// Hit-test geometry recorded by the renderer.
#[derive(Debug, Clone, Default)]
pub(super) struct TableLayout {
    pub area: Rect,
    pub header_cells: Vec<Rect>,
    pub input_cells: Vec<Rect>,
    pub clear_filters: Option<Rect>,
    pub view_trigger: Option<Rect>,
    pub reload: Option<Rect>,
    /// Per-row menu triggers: (index into rows, rect).
    pub row_triggers: Vec<(usize, Rect)>,
    pub menu_entries: Vec<Rect>,
}

/// Internal state for the tabular view.
pub(super) struct TableInner<T: GridRow, A> {
    pub columns: Vec<Column<T>>,
    pub rows: Vec<T>,
    pub loading: bool,
    pub sort: Option<SortConfig<T::Key>>,
    pub filters: DebouncedFilter<T::Key>,
    /// One inline search input per column.
    pub inputs: Vec<InputState>,
    pub focused_input: Option<usize>,
    pub row_actions: Option<RowActionsFn<T, A>>,
    pub view_actions: Option<ViewActionsFn<A>>,
    pub open_menu: OpenMenu,
    pub menu_cursor: usize,
    /// Vertical scroll offset into the visible row set.
    pub scroll: u16,
    /// Row indices in sorted order.
    pub order: Vec<usize>,
    /// Sorted indices surviving the committed filters.
    pub visible: Vec<usize>,
    /// Whether order/visible need recomputing.
    pub stale: bool,
    pub layout: TableLayout,
}

impl<T: GridRow, A> TableInner<T, A> {
    /// Recompute the sorted and filtered index views if inputs changed.
    pub fn refresh(&mut self) {
        if !self.stale {
            return;
        }

        self.order = match &self.sort {
            Some(config) => sorted_indices(&self.rows, config),
            None => (0..self.rows.len()).collect(),
        };

        let committed = self.filters.committed().clone();
        self.visible = self
            .order
            .iter()
            .copied()
            .filter(|&i| crate::filter::row_matches(&self.rows[i], &self.columns, &committed))
            .collect();

        self.stale = false;
    }

    /// Whether any row currently yields at least one menu action.
    pub fn has_row_actions(&self) -> bool {
        match &self.row_actions {
            Some(f) => self.rows.iter().any(|row| !f(row).is_empty()),
            None => false,
        }
    }

    /// Actions of the currently open menu, if any.
    pub fn open_menu_actions(&self) -> Vec<MenuAction<A>>
    where
        A: Clone,
    {
        match self.open_menu {
            OpenMenu::None => Vec::new(),
            OpenMenu::View => self.view_actions.as_ref().map(|f| f()).unwrap_or_default(),
            OpenMenu::Row(index) => match (&self.row_actions, self.rows.get(index)) {
                (Some(f), Some(row)) => f(row),
                _ => Vec::new(),
            },
        }
    }
}

/// A column-driven table with client-side sort and filter.
///
/// Cheap to clone; clones share state. See the [module docs](self).
pub struct TableView<T: GridRow, A> {
    id: TableId,
    pub(super) inner: Arc<RwLock<TableInner<T, A>>>,
    dirty: Arc<AtomicBool>,
}

impl<T: GridRow, A: Clone> TableView<T, A> {
    pub fn new(columns: Vec<Column<T>>) -> Self {
        let sort = initial_sort_config(&columns, None);
        let inputs = columns.iter().map(|_| InputState::default()).collect();
        Self {
            id: TableId::new(),
            inner: Arc::new(RwLock::new(TableInner {
                columns,
                rows: Vec::new(),
                loading: false,
                sort,
                filters: DebouncedFilter::default(),
                inputs,
                focused_input: None,
                row_actions: None,
                view_actions: None,
                open_menu: OpenMenu::None,
                menu_cursor: 0,
                scroll: 0,
                order: Vec::new(),
                visible: Vec::new(),
                stale: true,
                layout: TableLayout::default(),
            })),
            dirty: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Prefer an initial sort column. Ignored unless `key` names a
    /// sortable column.
    pub fn initial_sort(self, key: T::Key, direction: SortDirection) -> Self {
        if let Ok(mut inner) = self.inner.write() {
            inner.sort = initial_sort_config(&inner.columns, Some((key, direction)));
            inner.stale = true;
        }
        self.touch();
        self
    }

    /// Override the debounce window for inline search.
    pub fn debounce_window(self, window: Duration) -> Self {
        if let Ok(mut inner) = self.inner.write() {
            inner.filters = DebouncedFilter::new(window);
        }
        self
    }

    /// Install the per-row action accessor. Re-evaluated per row; rows
    /// yielding no actions show no menu trigger.
    pub fn row_actions<F>(self, f: F) -> Self
    where
        F: Fn(&T) -> Vec<MenuAction<A>> + Send + Sync + 'static,
    {
        if let Ok(mut inner) = self.inner.write() {
            inner.row_actions = Some(Arc::new(f));
        }
        self.touch();
        self
    }

    /// Install the view-level action accessor.
    pub fn view_actions<F>(self, f: F) -> Self
    where
        F: Fn() -> Vec<MenuAction<A>> + Send + Sync + 'static,
    {
        if let Ok(mut inner) = self.inner.write() {
            inner.view_actions = Some(Arc::new(f));
        }
        self.touch();
        self
    }

    pub fn id(&self) -> TableId {
        self.id
    }

    // -------------------------------------------------------------------
    // Data
    // -------------------------------------------------------------------

    pub fn set_loading(&self, loading: bool) {
        if let Ok(mut inner) = self.inner.write() {
            if inner.loading != loading {
                inner.loading = loading;
                self.touch();
            }
        }
    }

    pub fn is_loading(&self) -> bool {
        self.inner.read().map(|i| i.loading).unwrap_or(false)
    }

    /// Replace the row set. Sort and filter state survive; the open menu
    /// and scroll position reset.
    pub fn set_rows(&self, rows: Vec<T>) {
        if let Ok(mut inner) = self.inner.write() {
            inner.rows = rows;
            inner.open_menu = OpenMenu::None;
            inner.scroll = 0;
            inner.stale = true;
            self.touch();
        }
    }

    pub fn total_count(&self) -> usize {
        self.inner.read().map(|i| i.rows.len()).unwrap_or(0)
    }

    pub fn visible_count(&self) -> usize {
        if let Ok(mut inner) = self.inner.write() {
            inner.refresh();
            inner.visible.len()
        } else {
            0
        }
    }

    /// The rows currently visible, sorted and filtered.
    pub fn visible_rows(&self) -> Vec<T> {
        if let Ok(mut inner) = self.inner.write() {
            inner.refresh();
            inner
                .visible
                .iter()
                .map(|&i| inner.rows[i].clone())
                .collect()
        } else {
            Vec::new()
        }
    }

    // -------------------------------------------------------------------
    // Sort / filter
    // -------------------------------------------------------------------

    pub fn sort_config(&self) -> Option<SortConfig<T::Key>> {
        self.inner.read().ok().and_then(|i| i.sort)
    }

    /// Request a sort by `key`: flips direction on the active column,
    /// adopts ascending on a new one. Ignored for unsortable columns.
    pub fn request_sort(&self, key: T::Key) {
        if let Ok(mut inner) = self.inner.write() {
            if !inner.columns.iter().any(|c| c.key == key && c.sortable) {
                return;
            }
            inner.sort = Some(request_sort(inner.sort.as_ref(), key));
            inner.stale = true;
            self.touch();
        }
    }

    /// The live (per-keystroke) search term for a column.
    pub fn search_term(&self, key: T::Key) -> String {
        self.inner
            .read()
            .map(|i| i.filters.live(key).to_string())
            .unwrap_or_default()
    }

    /// Reset live and committed filter state atomically.
    pub fn clear_filters(&self) {
        if let Ok(mut inner) = self.inner.write() {
            for input in &mut inner.inputs {
                input.clear();
            }
            if inner.filters.clear() {
                inner.stale = true;
            }
            self.touch();
        }
    }

    /// Advance the debounce clock. Returns whether the committed filter
    /// changed (the view needs a repaint).
    pub fn tick(&self, now: Instant) -> bool {
        if let Ok(mut inner) = self.inner.write() {
            if inner.filters.poll(now) {
                inner.stale = true;
                self.touch();
                return true;
            }
        }
        false
    }

    // -------------------------------------------------------------------
    // Render / events (implemented in the sibling modules)
    // -------------------------------------------------------------------

    pub fn render(&self, buf: &mut Buffer, area: Rect, theme: &Theme) {
        if let Ok(mut inner) = self.inner.write() {
            inner.refresh();
            super::render::paint(&mut inner, buf, area, theme);
        }
        self.clear_dirty();
    }

    pub fn handle_event(&self, event: &Event, now: Instant) -> Option<TableOutput<A>> {
        let output = if let Ok(mut inner) = self.inner.write() {
            super::events::handle(&mut inner, event, now)
        } else {
            None
        };
        self.touch();
        output
    }

    // -------------------------------------------------------------------
    // Dirty tracking
    // -------------------------------------------------------------------

    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::SeqCst)
    }

    pub fn clear_dirty(&self) {
        self.dirty.store(false, Ordering::SeqCst);
    }

    fn touch(&self) {
        self.dirty.store(true, Ordering::SeqCst);
    }
}

impl<T: GridRow, A> Clone for TableView<T, A> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            inner: Arc::clone(&self.inner),
            dirty: Arc::clone(&self.dirty),
        }
    }
}
