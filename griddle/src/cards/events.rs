//! Card list event handling.

use termcell::{Event, Key, MouseButton};

use crate::column::GridRow;
use crate::menu::OpenMenu;

use super::filter_dialog::FilterOutcome;
use super::sort_dialog::DialogOutcome;
use super::state::{BarButton, CardsInner, CardsOutput, DialogState};

pub(super) fn handle<T: GridRow, A: Clone>(
    inner: &mut CardsInner<T, A>,
    event: &Event,
) -> Option<CardsOutput<A>> {
    if inner.loading {
        return None;
    }

    inner.refresh();

    // An open dialog captures every event.
    if inner.dialog.is_some() {
        handle_dialog(inner, event);
        return None;
    }

    match *event {
        Event::Click {
            x,
            y,
            button: MouseButton::Left,
        } => handle_click(inner, x, y),
        Event::Scroll { delta, .. } => {
            inner.open_menu = OpenMenu::None;
            inner.scroll = (inner.scroll as i32 + delta as i32).max(0) as u16;
            None
        }
        Event::Key { key, modifiers } if modifiers.none() || modifiers.shift => {
            handle_key(inner, key)
        }
        _ => None,
    }
}

fn handle_dialog<T: GridRow, A>(inner: &mut CardsInner<T, A>, event: &Event) {
    let committed = inner.sort;

    enum Applied<K> {
        Nothing,
        Close,
        Sort(crate::sort::SortConfig<K>),
        Filters(crate::filter::FilterState<K>),
    }

    let applied = match (&mut inner.dialog, event) {
        (Some(DialogState::Sort(dialog)), Event::Key { key, .. }) => {
            match dialog.handle_key(*key, committed.as_ref()) {
                DialogOutcome::None => Applied::Nothing,
                DialogOutcome::Close => Applied::Close,
                DialogOutcome::ApplySort(config) => Applied::Sort(config),
            }
        }
        (Some(DialogState::Sort(dialog)), Event::Click { x, y, .. }) => {
            if let Some(entry) = inner
                .layout
                .dialog_entries
                .iter()
                .position(|rect| rect.contains(*x, *y))
            {
                if let Some(&(key, _)) = dialog.entries.get(entry) {
                    dialog.cursor = entry;
                    dialog.select(committed.as_ref(), key);
                }
                Applied::Nothing
            } else if matches!(inner.layout.dialog_apply, Some(rect) if rect.contains(*x, *y)) {
                match dialog.tentative {
                    Some(config) => Applied::Sort(config),
                    None => Applied::Close,
                }
            } else if matches!(inner.layout.dialog_cancel, Some(rect) if rect.contains(*x, *y)) {
                Applied::Close
            } else {
                Applied::Nothing
            }
        }
        (Some(DialogState::Filter(dialog)), Event::Key { key, .. }) => {
            match dialog.handle_key(*key) {
                FilterOutcome::None => Applied::Nothing,
                FilterOutcome::Close => Applied::Close,
                FilterOutcome::Apply(terms) => Applied::Filters(terms),
            }
        }
        (Some(DialogState::Filter(dialog)), Event::Click { x, y, .. }) => {
            if let Some(field) = inner
                .layout
                .dialog_inputs
                .iter()
                .position(|rect| rect.contains(*x, *y))
            {
                dialog.focused = field;
                Applied::Nothing
            } else if matches!(inner.layout.dialog_apply, Some(rect) if rect.contains(*x, *y)) {
                Applied::Filters(dialog.terms())
            } else if matches!(inner.layout.dialog_cancel, Some(rect) if rect.contains(*x, *y)) {
                // The Clear button empties the fields without closing.
                dialog.clear();
                Applied::Nothing
            } else {
                Applied::Nothing
            }
        }
        _ => Applied::Nothing,
    };

    match applied {
        Applied::Nothing => {}
        Applied::Close => inner.dialog = None,
        Applied::Sort(config) => {
            inner.sort = Some(config);
            inner.stale = true;
            inner.dialog = None;
        }
        Applied::Filters(terms) => {
            inner.filters = terms;
            inner.stale = true;
            inner.dialog = None;
        }
    }
}

fn handle_click<T: GridRow, A: Clone>(
    inner: &mut CardsInner<T, A>,
    x: u16,
    y: u16,
) -> Option<CardsOutput<A>> {
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
        if let Some(&(index, _)) = inner
            .layout
            .card_triggers
            .iter()
            .find(|(_, rect)| rect.contains(x, y))
        {
            inner.open_menu = inner.open_menu.toggled(OpenMenu::Row(index));
            inner.menu_cursor = 0;
        } else {
            inner.open_menu = OpenMenu::None;
        }
        return None;
    }

    if let Some(reload) = inner.layout.reload {
        if reload.contains(x, y) {
            return Some(CardsOutput::Reload);
        }
    }

    if let Some(&(button, _)) = inner
        .layout
        .bar_buttons
        .iter()
        .find(|(_, rect)| rect.contains(x, y))
    {
        return handle_bar_button(inner, button);
    }

    if let Some(&(index, _)) = inner
        .layout
        .card_triggers
        .iter()
        .find(|(_, rect)| rect.contains(x, y))
    {
        inner.open_menu = inner.open_menu.toggled(OpenMenu::Row(index));
        inner.menu_cursor = 0;
        return None;
    }

    if let Some(&(position, _)) = inner
        .layout
        .card_headers
        .iter()
        .find(|(_, rect)| rect.contains(x, y))
    {
        inner.cursor = position;
        inner.expansion.toggle_card(position);
        return None;
    }

    None
}

fn handle_bar_button<T: GridRow, A: Clone>(
    inner: &mut CardsInner<T, A>,
    button: BarButton,
) -> Option<CardsOutput<A>> {
    match button {
        BarButton::ToggleAll => {
            inner.expansion.toggle_all();
            None
        }
        BarButton::Sort => {
            inner.open_sort_dialog();
            None
        }
        BarButton::Filter => {
            inner.open_filter_dialog();
            None
        }
        BarButton::Extra(i) => {
            let actions = inner.bar_actions.as_ref().map(|f| f()).unwrap_or_default();
            actions
                .get(i)
                .map(|a| CardsOutput::BarAction(a.action.clone()))
        }
    }
}

fn handle_key<T: GridRow, A: Clone>(
    inner: &mut CardsInner<T, A>,
    key: Key,
) -> Option<CardsOutput<A>> {
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

    match key {
        Key::Up => {
            inner.cursor = inner.cursor.saturating_sub(1);
        }
        Key::Down => {
            if !inner.visible.is_empty() {
                inner.cursor = (inner.cursor + 1).min(inner.visible.len() - 1);
            }
        }
        Key::Enter | Key::Char(' ') => {
            if inner.cursor < inner.visible.len() {
                let position = inner.cursor;
                inner.expansion.toggle_card(position);
            }
        }
        Key::Char('t') => inner.expansion.toggle_all(),
        Key::Char('s') => inner.open_sort_dialog(),
        Key::Char('f') => inner.open_filter_dialog(),
        Key::Char('m') => {
            if let Some(&index) = inner.visible.get(inner.cursor) {
                let has_actions = match (&inner.card_actions, inner.rows.get(index)) {
                    (Some(f), Some(row)) => !f(row).is_empty(),
                    _ => false,
                };
                if has_actions {
                    // The trigger only paints on an expanded card.
                    let position = inner.cursor;
                    if !inner.expansion.is_open(position) {
                        inner.expansion.toggle_card(position);
                    }
                    inner.open_menu = inner.open_menu.toggled(OpenMenu::Row(index));
                    inner.menu_cursor = 0;
                }
            }
        }
        Key::PageUp => {
            inner.scroll = inner.scroll.saturating_sub(5);
        }
        Key::PageDown => {
            inner.scroll = inner.scroll.saturating_add(5);
        }
        _ => {}
    }
    None
}

fn activate_menu_entry<T: GridRow, A: Clone>(
    inner: &mut CardsInner<T, A>,
    entry: usize,
) -> Option<CardsOutput<A>> {
    let actions = inner.open_menu_actions();
    let action = actions.get(entry)?.action.clone();
    let output = match inner.open_menu {
        OpenMenu::Row(index) => Some(CardsOutput::CardAction { index, action }),
        _ => None,
    };
    inner.open_menu = OpenMenu::None;
    output
}
