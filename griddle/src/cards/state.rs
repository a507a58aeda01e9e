//! Card list view state.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use termcell::{Buffer, Event, Rect};

use crate::column::{Column, GridRow};
use crate::filter::{row_matches, FilterState};
use crate::menu::{MenuAction, OpenMenu};
use crate::sort::{initial_sort_config, sorted_indices, SortConfig, SortDirection};
use crate::theme::Theme;

use super::filter_dialog::FilterDialogState;
use super::sort_dialog::SortDialogState;

/// Unique identifier for a CardListView instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CardListId(usize);

impl CardListId {
    fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl std::fmt::Display for CardListId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "__cards_{}", self.0)
    }
}

/// What an interaction asked the embedding page to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardsOutput<A> {
    /// A card-menu entry was activated. `index` points into the row set.
    CardAction { index: usize, action: A },
    /// A caller-supplied action-bar button was activated.
    BarAction(A),
    /// The empty-state reload affordance was activated.
    Reload,
}

/// Which cards are open.
///
/// Manual toggling keeps at most one card open; the expand-all toggle
/// opens every card. The modes are mutually exclusive: toggling a single
/// card while all are open narrows to that card and leaves expand-all off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expansion {
    /// At most one card open, identified by its position in the visible
    /// (sorted, filtered) order.
    Single(Option<usize>),
    /// Every card open.
    All,
}

impl Expansion {
    pub fn is_open(&self, position: usize) -> bool {
        match self {
            Self::All => true,
            Self::Single(open) => *open == Some(position),
        }
    }

    pub fn all_open(&self) -> bool {
        matches!(self, Self::All)
    }

    /// Manually toggle one card.
    pub fn toggle_card(&mut self, position: usize) {
        *self = match *self {
            Self::All => Self::Single(Some(position)),
            Self::Single(Some(open)) if open == position => Self::Single(None),
            Self::Single(_) => Self::Single(Some(position)),
        };
    }

    /// Toggle the expand-all mode.
    pub fn toggle_all(&mut self) {
        *self = match *self {
            Self::All => Self::Single(None),
            Self::Single(_) => Self::All,
        };
    }
}

impl Default for Expansion {
    fn default() -> Self {
        Self::Single(None)
    }
}

pub(super) type CardActionsFn<T, A> = Arc<dyn Fn(&T) -> Vec<MenuAction<A>> + Send + Sync>;
pub(super) type BarActionsFn<A> = Arc<dyn Fn() -> Vec<MenuAction<A>> + Send + Sync>;

/// Built-in action bar buttons, in display order before the caller's.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum BarButton {
    ToggleAll,
    Sort,
    Filter,
    Extra(usize),
}

/// An open modal dialog.
pub(super) enum DialogState<K> {
    Sort(SortDialogState<K>),
    Filter(FilterDialogState<K>),
}

/// Hit-test geometry recorded by the renderer.
#[derive(Debug, Clone, Default)]
pub(super) struct CardsLayout {
    pub bar_buttons: Vec<(BarButton, Rect)>,
    /// Card header lines: (position in visible order, rect).
    pub card_headers: Vec<(usize, Rect)>,
    /// "Actions" buttons inside expanded cards: (index into rows, rect).
    pub card_triggers: Vec<(usize, Rect)>,
    pub menu_entries: Vec<Rect>,
    pub reload: Option<Rect>,
    /// Dialog geometry, when one is open.
    pub dialog_entries: Vec<Rect>,
    pub dialog_inputs: Vec<Rect>,
    pub dialog_apply: Option<Rect>,
    pub dialog_cancel: Option<Rect>,
}

/// Internal state for the card list view.
pub(super) struct CardsInner<T: GridRow, A> {
    pub columns: Vec<Column<T>>,
    pub rows: Vec<T>,
    pub loading: bool,
    pub title_key: T::Key,
    pub sort: Option<SortConfig<T::Key>>,
    /// Committed filter terms; the filter dialog edits a copy.
    pub filters: FilterState<T::Key>,
    pub expansion: Expansion,
    /// Keyboard cursor, a position in the visible order.
    pub cursor: usize,
    pub open_menu: OpenMenu,
    pub menu_cursor: usize,
    pub card_actions: Option<CardActionsFn<T, A>>,
    pub bar_actions: Option<BarActionsFn<A>>,
    pub dialog: Option<DialogState<T::Key>>,
    /// Scroll offset in rendered lines.
    pub scroll: u16,
    pub order: Vec<usize>,
    pub visible: Vec<usize>,
    pub stale: bool,
    pub layout: CardsLayout,
}

impl<T: GridRow, A> CardsInner<T, A> {
    pub fn refresh(&mut self) {
        if !self.stale {
            return;
        }

        self.order = match &self.sort {
            Some(config) => sorted_indices(&self.rows, config),
            None => (0..self.rows.len()).collect(),
        };
        self.visible = self
            .order
            .iter()
            .copied()
            .filter(|&i| row_matches(&self.rows[i], &self.columns, &self.filters))
            .collect();
        self.stale = false;

        // Positions shift when the visible set changes.
        if let Expansion::Single(Some(open)) = self.expansion {
            if open >= self.visible.len() {
                self.expansion = Expansion::Single(None);
            }
        }
        if self.cursor >= self.visible.len() {
            self.cursor = self.visible.len().saturating_sub(1);
        }
    }

    pub fn has_sortable_column(&self) -> bool {
        self.columns.iter().any(|c| c.sortable)
    }

    pub fn open_menu_actions(&self) -> Vec<MenuAction<A>>
    where
        A: Clone,
    {
        match self.open_menu {
            OpenMenu::Row(index) => match (&self.card_actions, self.rows.get(index)) {
                (Some(f), Some(row)) => f(row),
                _ => Vec::new(),
            },
            _ => Vec::new(),
        }
    }

    /// Open the sort dialog. No-op when no column is sortable.
    pub fn open_sort_dialog(&mut self) {
        if !self.has_sortable_column() {
            return;
        }
        let entries: Vec<(T::Key, String)> = self
            .columns
            .iter()
            .filter(|c| c.sortable)
            .map(|c| (c.key, c.header.clone()))
            .collect();
        self.dialog = Some(DialogState::Sort(SortDialogState::new(entries)));
    }

    /// Open the filter dialog, seeded with the committed terms.
    pub fn open_filter_dialog(&mut self) {
        self.dialog = Some(DialogState::Filter(FilterDialogState::new(
            &self.columns,
            &self.filters,
        )));
    }
}

/// Collapsible card list over the shared sort/filter engines.
///
/// Cheap to clone; clones share state. See the [module docs](self).
pub struct CardListView<T: GridRow, A> {
    id: CardListId,
    pub(super) inner: Arc<RwLock<CardsInner<T, A>>>,
    dirty: Arc<AtomicBool>,
}

impl<T: GridRow, A: Clone> CardListView<T, A> {
    /// Create a view. `title_key` names the column whose resolved content
    /// becomes each card's header.
    pub fn new(columns: Vec<Column<T>>, title_key: T::Key) -> Self {
        let sort = initial_sort_config(&columns, None);
        Self {
            id: CardListId::new(),
            inner: Arc::new(RwLock::new(CardsInner {
                columns,
                rows: Vec::new(),
                loading: false,
                title_key,
                sort,
                filters: FilterState::new(),
                expansion: Expansion::default(),
                cursor: 0,
                open_menu: OpenMenu::None,
                menu_cursor: 0,
                card_actions: None,
                bar_actions: None,
                dialog: None,
                scroll: 0,
                order: Vec::new(),
                visible: Vec::new(),
                stale: true,
                layout: CardsLayout::default(),
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

    /// Install the per-card action accessor.
    pub fn card_actions<F>(self, f: F) -> Self
    where
        F: Fn(&T) -> Vec<MenuAction<A>> + Send + Sync + 'static,
    {
        if let Ok(mut inner) = self.inner.write() {
            inner.card_actions = Some(Arc::new(f));
        }
        self.touch();
        self
    }

    /// Install extra action-bar buttons, appended after the built-ins.
    pub fn bar_actions<F>(self, f: F) -> Self
    where
        F: Fn() -> Vec<MenuAction<A>> + Send + Sync + 'static,
    {
        if let Ok(mut inner) = self.inner.write() {
            inner.bar_actions = Some(Arc::new(f));
        }
        self.touch();
        self
    }

    pub fn id(&self) -> CardListId {
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

    // -------------------------------------------------------------------
    // Sort / filter / expansion
    // -------------------------------------------------------------------

    pub fn sort_config(&self) -> Option<SortConfig<T::Key>> {
        self.inner.read().ok().and_then(|i| i.sort)
    }

    /// Commit a sort configuration (the sort dialog's Apply path).
    pub fn set_sort(&self, config: SortConfig<T::Key>) {
        if let Ok(mut inner) = self.inner.write() {
            inner.sort = Some(config);
            inner.stale = true;
            self.touch();
        }
    }

    /// Commit filter terms (the filter dialog's Apply path).
    pub fn set_filters(&self, filters: FilterState<T::Key>) {
        if let Ok(mut inner) = self.inner.write() {
            inner.filters = filters;
            inner.stale = true;
            self.touch();
        }
    }

    pub fn filters(&self) -> FilterState<T::Key> {
        self.inner
            .read()
            .map(|i| i.filters.clone())
            .unwrap_or_default()
    }

    pub fn expansion(&self) -> Expansion {
        self.inner
            .read()
            .map(|i| i.expansion)
            .unwrap_or_default()
    }

    /// Manually toggle the card at `position` (visible order).
    pub fn toggle_card(&self, position: usize) {
        if let Ok(mut inner) = self.inner.write() {
            inner.expansion.toggle_card(position);
            self.touch();
        }
    }

    /// Toggle the expand-all mode.
    pub fn toggle_all(&self) {
        if let Ok(mut inner) = self.inner.write() {
            inner.expansion.toggle_all();
            self.touch();
        }
    }

    // -------------------------------------------------------------------
    // Dialogs
    // -------------------------------------------------------------------

    /// Open the sort dialog. No-op when no column is sortable.
    pub fn open_sort_dialog(&self) {
        if let Ok(mut inner) = self.inner.write() {
            inner.open_sort_dialog();
            self.touch();
        }
    }

    /// Open the filter dialog, seeded with the committed terms.
    pub fn open_filter_dialog(&self) {
        if let Ok(mut inner) = self.inner.write() {
            inner.open_filter_dialog();
            self.touch();
        }
    }

    pub fn dialog_open(&self) -> bool {
        self.inner.read().map(|i| i.dialog.is_some()).unwrap_or(false)
    }

    // -------------------------------------------------------------------
    // Render / events
    // -------------------------------------------------------------------

    pub fn render(&self, buf: &mut Buffer, area: Rect, theme: &Theme) {
        if let Ok(mut inner) = self.inner.write() {
            inner.refresh();
            super::render::paint(&mut inner, buf, area, theme);
        }
        self.clear_dirty();
    }

    pub fn handle_event(&self, event: &Event) -> Option<CardsOutput<A>> {
        let output = if let Ok(mut inner) = self.inner.write() {
            super::events::handle(&mut inner, event)
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

impl<T: GridRow, A> Clone for CardListView<T, A> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            inner: Arc::clone(&self.inner),
            dirty: Arc::clone(&self.dirty),
        }
    }
}
