//! Tabular view event handling.

use std::time::Instant;

use termcell::{Event, InputEdit, Key, MouseButton};

use crate::column::GridRow;
use crate::menu::OpenMenu;
use crate::sort::request_sort;

use super::state::{TableInner, TableOutput};

pub(super) fn handle<T: GridRow, A: Clone>(
    inner: &mut TableInner<T, A>,
    event: &Event,
    now: Instant,
) -> Option<TableOutput<A>> {
    // Interaction is suspended while the data source is pending.
    if inner.loading {
        return None;
    }

    inner.refresh();

    match *event {
        Event::Click {
            x,
            y,
            button: MouseButton::Left,
        } => handle_click(inner, x, y),
        Event::Scroll { delta, .. } => {
            inner.open_menu = OpenMenu::None;
            scroll_by(inner, delta);
            None
        }
        Event::Key { key, modifiers } if modifiers.none() || modifiers.shift => {
            handle_key(inner, key, now)
        }
        _ => None,
    }
}

fn handle_click<T: GridRow, A: Clone>(
    inner: &mut TableInner<T, A>,
    x: u16,
    y: u16,
) -> Option<TableOutput<A>> {
    // An open menu paints over everything else, so its hits win.
    if inner.open_menu.is_open() {
        if let Some(entry) = inner
            .layout
            .menu_entries
            .iter()
            .position(|rect| rect.contains(x, y))
        {
            return activate_menu_entry(inner, entry);
        }
        if let Some(target) = trigger_at(inner, x, y) {
            inner.open_menu = inner.open_menu.toggled(target);
            inner.menu_cursor = 0;
        } else {
            // Outside click closes the menu without side effects.
            inner.open_menu = OpenMenu::None;
        }
        return None;
    }

    if let Some(reload) = inner.layout.reload {
        if reload.contains(x, y) {
            return Some(TableOutput::Reload);
        }
    }

    if let Some(clear) = inner.layout.clear_filters {
        if clear.contains(x, y) {
            clear_filters(inner);
            return None;
        }
    }

    if let Some(target) = trigger_at(inner, x, y) {
        inner.open_menu = inner.open_menu.toggled(target);
        inner.menu_cursor = 0;
        return None;
    }

    if let Some(col) = inner
        .layout
        .header_cells
        .iter()
        .position(|rect| rect.contains(x, y))
    {
        let column = &inner.columns[col];
        if column.sortable {
            inner.sort = Some(request_sort(inner.sort.as_ref(), column.key));
            inner.stale = true;
        }
        return None;
    }

    if let Some(col) = inner
        .layout
        .input_cells
        .iter()
        .position(|rect| rect.contains(x, y))
    {
        inner.focused_input = Some(col);
        return None;
    }

    None
}

fn handle_key<T: GridRow, A: Clone>(
    inner: &mut TableInner<T, A>,
    key: Key,
    now: Instant,
) -> Option<TableOutput<A>> {
    if inner.open_menu.is_open() {
        let actions_len = inner.open_menu_actions().len();
        match key {
            Key::Up => {
                inner.menu_cursor = inner.menu_cursor.saturating_sub(1);
            }
            Key::Down => {
                if actions_len > 0 {
                    inner.menu_cursor = (inner.menu_cursor + 1).min(actions_len - 1);
                }
            }
            Key::Enter => {
                let entry = inner.menu_cursor;
                return activate_menu_entry(inner, entry);
            }
            Key::Escape => {
                inner.open_menu = OpenMenu::None;
            }
            _ => {}
        }
        return None;
    }

    if let Some(col) = inner.focused_input {
        match key {
            Key::Escape => {
                inner.focused_input = None;
            }
            Key::Tab => {
                inner.focused_input = Some((col + 1) % inner.inputs.len());
            }
            Key::BackTab => {
                inner.focused_input =
                    Some((col + inner.inputs.len() - 1) % inner.inputs.len());
            }
            Key::Enter => {
                // Commit without waiting for the debounce window.
                if inner.filters.flush() {
                    inner.stale = true;
                }
            }
            key => {
                if inner.inputs[col].handle_key(key, termcell::Modifiers::new())
                    == InputEdit::Changed
                {
                    let column_key = inner.columns[col].key;
                    let text = inner.inputs[col].text().to_string();
                    inner.filters.set(column_key, text, now);
                }
            }
        }
        return None;
    }

    match key {
        Key::Tab if !inner.inputs.is_empty() => {
            inner.focused_input = Some(0);
        }
        Key::Up => scroll_by(inner, -1),
        Key::Down => scroll_by(inner, 1),
        _ => {}
    }
    None
}

/// The menu trigger (view-level or per-row) under a point, if any.
fn trigger_at<T: GridRow, A>(inner: &TableInner<T, A>, x: u16, y: u16) -> Option<OpenMenu> {
    if let Some(trigger) = inner.layout.view_trigger {
        if trigger.contains(x, y) {
            return Some(OpenMenu::View);
        }
    }
    inner
        .layout
        .row_triggers
        .iter()
        .find(|(_, rect)| rect.contains(x, y))
        .map(|&(index, _)| OpenMenu::Row(index))
}

fn activate_menu_entry<T: GridRow, A: Clone>(
    inner: &mut TableInner<T, A>,
    entry: usize,
) -> Option<TableOutput<A>> {
    let actions = inner.open_menu_actions();
    let action = actions.get(entry)?.action.clone();
    let output = match inner.open_menu {
        OpenMenu::Row(index) => Some(TableOutput::RowAction { index, action }),
        OpenMenu::View => Some(TableOutput::ViewAction(action)),
        OpenMenu::None => None,
    };
    inner.open_menu = OpenMenu::None;
    output
}

fn clear_filters<T: GridRow, A>(inner: &mut TableInner<T, A>) {
    for input in &mut inner.inputs {
        input.clear();
    }
    if inner.filters.clear() {
        inner.stale = true;
    }
}

fn scroll_by<T: GridRow, A>(inner: &mut TableInner<T, A>, delta: i16) {
    let body_height = inner
        .layout
        .area
        .height
        .saturating_sub(super::render::CHROME_ROWS) as usize;
    let max_scroll = inner.visible.len().saturating_sub(body_height) as u16;
    let next = (inner.scroll as i32 + delta as i32).clamp(0, max_scroll as i32);
    inner.scroll = next as u16;
}
