//! Card list rendering.

use termcell::{display_width, Buffer, Rect, TextStyle};

use crate::column::GridRow;
use crate::content::{CellContent, Span};
use crate::menu::{paint_menu, OpenMenu};
use crate::render::resolve;
use crate::theme::Theme;

use super::state::{BarButton, CardsInner, CardsLayout, DialogState};

/// One line of the flattened card list, used for scrolling.
enum CardLine {
    /// Card header at a position in the visible order.
    Header(usize),
    /// One "Header: value" body line of an expanded card.
    Body { position: usize, column: usize },
    /// The actions button of an expanded card (index into rows).
    Trigger(usize),
    Gap,
}

pub(super) fn paint<T: GridRow, A: Clone>(
    inner: &mut CardsInner<T, A>,
    buf: &mut Buffer,
    area: Rect,
    theme: &Theme,
) {
    inner.layout = CardsLayout::default();

    if area.is_empty() {
        return;
    }

    buf.fill(area, theme.text.to_rgb(), theme.background.to_rgb());

    if inner.loading {
        paint_skeleton(buf, area, theme);
        return;
    }

    if inner.rows.is_empty() {
        paint_empty_state(inner, buf, area, theme);
        return;
    }

    paint_action_bar(inner, buf, area, theme);
    paint_summary(inner, buf, area, theme);
    paint_cards(inner, buf, area, theme);
    paint_open_menu(inner, buf, area, theme);
    paint_dialog(inner, buf, area, theme);
}

fn paint_skeleton(buf: &mut Buffer, area: Rect, theme: &Theme) {
    let base = theme.skeleton_base.to_rgb();
    let highlight = theme.skeleton_highlight.to_rgb();

    // Button placeholders, then card placeholders.
    let mut x = area.x;
    for _ in 0..3 {
        if x + 10 > area.right() {
            break;
        }
        buf.fill(Rect::new(x, area.y, 10, 1), highlight, base);
        x += 12;
    }

    let mut y = area.y + 2;
    for _ in 0..3 {
        if y + 2 > area.bottom() {
            break;
        }
        buf.fill(Rect::new(area.x, y, area.width, 2), highlight, base);
        y += 3;
    }
}

fn paint_empty_state<T: GridRow, A>(
    inner: &mut CardsInner<T, A>,
    buf: &mut Buffer,
    area: Rect,
    theme: &Theme,
) {
    let message = "Nothing to show";
    let reload = "[ Reload ]";

    let mid = area.top() + area.height / 2;
    let msg_x = area.left() + (area.width.saturating_sub(display_width(message) as u16)) / 2;
    buf.put_str(
        msg_x,
        mid.saturating_sub(1),
        message,
        theme.text_muted.to_rgb(),
        theme.background.to_rgb(),
        TextStyle::new(),
    );

    let reload_x = area.left() + (area.width.saturating_sub(display_width(reload) as u16)) / 2;
    let reload_rect = Rect::new(reload_x, mid + 1, display_width(reload) as u16, 1);
    buf.put_str(
        reload_rect.x,
        reload_rect.y,
        reload,
        theme.primary.to_rgb(),
        theme.background.to_rgb(),
        TextStyle {
            underline: true,
            ..TextStyle::new()
        },
    );
    inner.layout.reload = Some(reload_rect);
}

fn paint_action_bar<T: GridRow, A: Clone>(
    inner: &mut CardsInner<T, A>,
    buf: &mut Buffer,
    area: Rect,
    theme: &Theme,
) {
    let row = area.row(0);
    let mut x = row.x;

    let toggle_label = if inner.expansion.all_open() {
        "[Collapse all]"
    } else {
        "[Expand all]"
    };
    let mut buttons: Vec<(BarButton, String)> =
        vec![(BarButton::ToggleAll, toggle_label.to_string())];
    if inner.has_sortable_column() {
        buttons.push((BarButton::Sort, "[Sort]".to_string()));
    }
    buttons.push((BarButton::Filter, "[Filter]".to_string()));
    if let Some(f) = &inner.bar_actions {
        for (i, action) in f().iter().enumerate() {
            buttons.push((BarButton::Extra(i), format!("[{}]", action.label)));
        }
    }

    for (id, label) in buttons {
        let w = display_width(&label) as u16;
        if x + w > row.right() {
            break;
        }
        let rect = Rect::new(x, row.y, w, 1);
        buf.put_str(
            rect.x,
            rect.y,
            &label,
            theme.primary.to_rgb(),
            theme.background.to_rgb(),
            TextStyle::new(),
        );
        inner.layout.bar_buttons.push((id, rect));
        x += w + 1;
    }
}

fn paint_summary<T: GridRow, A>(
    inner: &CardsInner<T, A>,
    buf: &mut Buffer,
    area: Rect,
    theme: &Theme,
) {
    let row = area.row(1);
    let summary = format!("showing {} of {}", inner.visible.len(), inner.rows.len());
    buf.put_str(
        row.x,
        row.y,
        &summary,
        theme.text_muted.to_rgb(),
        theme.background.to_rgb(),
        TextStyle::new(),
    );
}

/// Flatten the visible cards into lines, honoring expansion state.
fn build_lines<T: GridRow, A>(inner: &CardsInner<T, A>) -> Vec<CardLine> {
    let mut lines = Vec::new();
    for (position, &index) in inner.visible.iter().enumerate() {
        lines.push(CardLine::Header(position));
        if inner.expansion.is_open(position) {
            for (col, column) in inner.columns.iter().enumerate() {
                if column.key == inner.title_key {
                    continue;
                }
                lines.push(CardLine::Body { position, column: col });
            }
            let has_actions = match (&inner.card_actions, inner.rows.get(index)) {
                (Some(f), Some(row)) => !f(row).is_empty(),
                _ => false,
            };
            if has_actions {
                lines.push(CardLine::Trigger(index));
            }
        }
        lines.push(CardLine::Gap);
    }
    lines
}

fn paint_cards<T: GridRow, A>(
    inner: &mut CardsInner<T, A>,
    buf: &mut Buffer,
    area: Rect,
    theme: &Theme,
) {
    let body_top = area.top() + 2;
    let body_height = area.bottom().saturating_sub(body_top);
    if body_height == 0 {
        return;
    }

    if inner.visible.is_empty() {
        let message = "No cards match the active filters";
        let y = body_top + body_height / 2;
        let x = area.left() + (area.width.saturating_sub(display_width(message) as u16)) / 2;
        buf.put_str(
            x,
            y,
            message,
            theme.text_muted.to_rgb(),
            theme.background.to_rgb(),
            TextStyle::new(),
        );
        return;
    }

    let lines = build_lines(inner);
    let max_scroll = lines.len().saturating_sub(body_height as usize) as u16;
    if inner.scroll > max_scroll {
        inner.scroll = max_scroll;
    }

    for (slot, line) in lines
        .iter()
        .skip(inner.scroll as usize)
        .take(body_height as usize)
        .enumerate()
    {
        let y = body_top + slot as u16;
        match *line {
            CardLine::Gap => {}
            CardLine::Header(position) => {
                let index = inner.visible[position];
                let item = inner.rows[index].clone();
                let open = inner.expansion.is_open(position);
                let rect = Rect::new(area.x, y, area.width, 1);

                let bg = if position == inner.cursor {
                    theme.surface.lighten(0.06)
                } else {
                    theme.surface
                };
                buf.fill(rect, theme.text.to_rgb(), bg.to_rgb());

                let indicator = if open { "▼ " } else { "▶ " };
                let after = buf.put_str(
                    rect.x + 1,
                    y,
                    indicator,
                    theme.primary.to_rgb(),
                    bg.to_rgb(),
                    TextStyle::new(),
                );

                let title = title_content(inner, &item);
                let title_rect = Rect::new(after, y, rect.right().saturating_sub(after), 1)
                    .shrink(0, 1, 0, 0);
                title.paint(buf, title_rect, theme, bg);

                inner.layout.card_headers.push((position, rect));
            }
            CardLine::Body { position, column } => {
                let index = inner.visible[position];
                let item = inner.rows[index].clone();
                let descriptor = &inner.columns[column];

                let label = format!("{}: ", descriptor.header);
                let after = buf.put_str(
                    area.x + 3,
                    y,
                    &label,
                    theme.text_muted.to_rgb(),
                    theme.background.to_rgb(),
                    TextStyle::new(),
                );
                let value_rect =
                    Rect::new(after, y, area.right().saturating_sub(after), 1).shrink(0, 1, 0, 0);
                resolve(descriptor, &item).paint(buf, value_rect, theme, theme.background);
            }
            CardLine::Trigger(index) => {
                let open = inner.open_menu == OpenMenu::Row(index);
                let label = if open { "[✕ Actions]" } else { "[Actions]" };
                let rect = Rect::new(area.x + 3, y, display_width(label) as u16, 1);
                buf.put_str(
                    rect.x,
                    rect.y,
                    label,
                    if open { theme.error } else { theme.primary }.to_rgb(),
                    theme.background.to_rgb(),
                    TextStyle::new(),
                );
                inner.layout.card_triggers.push((index, rect));
            }
        }
    }
}

/// The card title: the title column's resolved content, or the raw value's
/// canonical text when no descriptor covers the title key.
fn title_content<T: GridRow, A>(inner: &CardsInner<T, A>, item: &T) -> CellContent {
    match inner.columns.iter().find(|c| c.key == inner.title_key) {
        Some(column) => {
            let mut content = resolve(column, item);
            if let CellContent::Text(text) = &content {
                content = CellContent::Styled(vec![Span::styled(
                    text.clone(),
                    termcell::Style::new().bold(),
                )]);
            }
            content
        }
        None => match item.value(inner.title_key).canonical_text() {
            Some(text) => CellContent::Text(text),
            None => CellContent::Empty,
        },
    }
}

fn paint_open_menu<T: GridRow, A: Clone>(
    inner: &mut CardsInner<T, A>,
    buf: &mut Buffer,
    area: Rect,
    theme: &Theme,
) {
    let OpenMenu::Row(index) = inner.open_menu else {
        return;
    };

    let anchor = inner
        .layout
        .card_triggers
        .iter()
        .find(|(i, _)| *i == index)
        .map(|(_, rect)| *rect);

    let Some(anchor) = anchor else {
        inner.open_menu = OpenMenu::None;
        return;
    };

    let actions = inner.open_menu_actions();
    inner.layout.menu_entries =
        paint_menu(buf, anchor, area, &actions, inner.menu_cursor, theme);
}

fn paint_dialog<T: GridRow, A>(
    inner: &mut CardsInner<T, A>,
    buf: &mut Buffer,
    area: Rect,
    theme: &Theme,
) {
    let sort = inner.sort;
    match &inner.dialog {
        None => {}
        Some(DialogState::Sort(dialog)) => {
            let (entries, apply, cancel) = dialog.paint(buf, area, sort.as_ref(), theme);
            inner.layout.dialog_entries = entries;
            inner.layout.dialog_apply = apply;
            inner.layout.dialog_cancel = cancel;
        }
        Some(DialogState::Filter(dialog)) => {
            let (inputs, apply, clear) = dialog.paint(buf, area, theme);
            inner.layout.dialog_inputs = inputs;
            inner.layout.dialog_apply = apply;
            inner.layout.dialog_cancel = clear;
        }
    }
}
