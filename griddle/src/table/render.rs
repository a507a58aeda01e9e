//! Tabular view rendering.

use termcell::{display_width, truncate_to_width, Buffer, Rect, TextStyle};

use crate::column::GridRow;
use crate::menu::{paint_menu, OpenMenu};
use crate::render::resolve;
use crate::sort::SortDirection;
use crate::theme::Theme;

use super::state::{TableInner, TableLayout};

/// Width of the trailing gutter column holding per-row menu triggers.
const GUTTER: u16 = 3;
/// Rows of chrome above the data body: summary, header, search.
pub(super) const CHROME_ROWS: u16 = 3;

pub(super) fn paint<T: GridRow, A: Clone>(
    inner: &mut TableInner<T, A>,
    buf: &mut Buffer,
    area: Rect,
    theme: &Theme,
) {
    inner.layout = TableLayout {
        area,
        ..TableLayout::default()
    };

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

    paint_summary(inner, buf, area, theme);
    let widths = column_widths(inner, area);
    paint_header(inner, buf, area, theme, &widths);
    paint_search_row(inner, buf, area, theme, &widths);
    paint_body(inner, buf, area, theme, &widths);
    paint_open_menu(inner, buf, area, theme);
}

/// Placeholder bands shown while the data source is pending.
fn paint_skeleton(buf: &mut Buffer, area: Rect, theme: &Theme) {
    let base = theme.skeleton_base.to_rgb();
    let highlight = theme.skeleton_highlight.to_rgb();

    let title = area.row(0);
    buf.fill(
        Rect::new(title.x, title.y, (title.width / 3).max(10).min(title.width), 1),
        highlight,
        base,
    );

    let mut y = 2;
    for _ in 0..5 {
        if y >= area.height {
            break;
        }
        buf.fill(Rect::new(area.x, area.y + y, area.width, 1), highlight, base);
        y += 2;
    }
}

fn paint_empty_state<T: GridRow, A>(
    inner: &mut TableInner<T, A>,
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

fn paint_summary<T: GridRow, A: Clone>(
    inner: &mut TableInner<T, A>,
    buf: &mut Buffer,
    area: Rect,
    theme: &Theme,
) {
    let row = area.row(0);
    let summary = format!("showing {} of {}", inner.visible.len(), inner.rows.len());
    buf.put_str(
        row.x,
        row.y,
        &summary,
        theme.text_muted.to_rgb(),
        theme.background.to_rgb(),
        TextStyle::new(),
    );

    // Right-aligned controls: clear-filters, then the view menu trigger.
    let mut right = row.right();

    let has_view_menu = inner
        .view_actions
        .as_ref()
        .map(|f| !f().is_empty())
        .unwrap_or(false);
    if has_view_menu {
        let label = "[⋮]";
        let w = display_width(label) as u16;
        right = right.saturating_sub(w);
        let rect = Rect::new(right, row.y, w, 1);
        buf.put_str(
            rect.x,
            rect.y,
            label,
            theme.primary.to_rgb(),
            theme.background.to_rgb(),
            TextStyle::new(),
        );
        inner.layout.view_trigger = Some(rect);
        right = right.saturating_sub(1);
    }

    let label = "[✕ clear]";
    let w = display_width(label) as u16;
    right = right.saturating_sub(w);
    let rect = Rect::new(right, row.y, w, 1);
    let fg = if inner.filters.is_active() {
        theme.warning
    } else {
        theme.text_muted
    };
    buf.put_str(
        rect.x,
        rect.y,
        label,
        fg.to_rgb(),
        theme.background.to_rgb(),
        TextStyle::new(),
    );
    inner.layout.clear_filters = Some(rect);
}

/// Equal-flex column widths over the area minus the action gutter.
fn column_widths<T: GridRow, A>(inner: &TableInner<T, A>, area: Rect) -> Vec<u16> {
    let gutter = if inner.has_row_actions() { GUTTER } else { 0 };
    let avail = area.width.saturating_sub(gutter);
    let n = inner.columns.len().max(1) as u16;
    let base = avail / n;
    let mut widths = vec![base; n as usize];
    if let Some(last) = widths.last_mut() {
        *last += avail - base * n;
    }
    widths
}

fn paint_header<T: GridRow, A>(
    inner: &mut TableInner<T, A>,
    buf: &mut Buffer,
    area: Rect,
    theme: &Theme,
    widths: &[u16],
) {
    let row = area.row(1);
    if row.is_empty() {
        return;
    }
    buf.fill(row, theme.text.to_rgb(), theme.surface.to_rgb());

    let mut x = row.x;
    for (column, &width) in inner.columns.iter().zip(widths) {
        let cell = Rect::new(x, row.y, width, 1);

        let is_sorted = inner.sort.map(|s| s.sort_by == column.key).unwrap_or(false);
        let mut label = truncate_to_width(&column.header, width.saturating_sub(3) as usize);
        if is_sorted {
            let arrow = match inner.sort.map(|s| s.direction) {
                Some(SortDirection::Ascending) => " ▲",
                _ => " ▼",
            };
            label.push_str(arrow);
        }

        let fg = if is_sorted {
            theme.primary
        } else if column.sortable {
            theme.text
        } else {
            theme.text_muted
        };
        buf.put_str(
            cell.x + 1,
            cell.y,
            &label,
            fg.to_rgb(),
            theme.surface.to_rgb(),
            TextStyle {
                bold: true,
                ..TextStyle::new()
            },
        );

        inner.layout.header_cells.push(cell);
        x += width;
    }
}

fn paint_search_row<T: GridRow, A>(
    inner: &mut TableInner<T, A>,
    buf: &mut Buffer,
    area: Rect,
    theme: &Theme,
    widths: &[u16],
) {
    let row = area.row(2);
    if row.is_empty() {
        return;
    }

    let mut x = row.x;
    for (i, &width) in widths.iter().enumerate() {
        let cell = Rect::new(x, row.y, width, 1);
        let inner_rect = cell.shrink(0, 1, 0, 1);
        buf.fill(inner_rect, theme.text.to_rgb(), theme.surface.to_rgb());

        let focused = inner.focused_input == Some(i);
        let input = &inner.inputs[i];
        if input.is_empty() && !focused {
            buf.put_str(
                inner_rect.x,
                inner_rect.y,
                "Search…",
                theme.text_muted.to_rgb(),
                theme.surface.to_rgb(),
                TextStyle {
                    dim: true,
                    ..TextStyle::new()
                },
            );
        } else {
            let text = truncate_to_width(input.text(), inner_rect.width as usize);
            buf.put_str(
                inner_rect.x,
                inner_rect.y,
                &text,
                theme.text.to_rgb(),
                theme.surface.to_rgb(),
                TextStyle::new(),
            );
            if focused {
                // Cursor cell, clamped to the input box.
                let cursor_x = inner_rect
                    .x
                    .saturating_add(input.cursor() as u16)
                    .min(inner_rect.right().saturating_sub(1));
                if let Some(cell) = buf.get_mut(cursor_x, inner_rect.y) {
                    cell.bg = theme.primary.to_rgb();
                    cell.fg = theme.background.to_rgb();
                }
            }
        }

        inner.layout.input_cells.push(cell);
        x += width;
    }
}

fn paint_body<T: GridRow, A: Clone>(
    inner: &mut TableInner<T, A>,
    buf: &mut Buffer,
    area: Rect,
    theme: &Theme,
    widths: &[u16],
) {
    let body_height = area.height.saturating_sub(CHROME_ROWS);
    if body_height == 0 {
        return;
    }

    if inner.visible.is_empty() {
        let message = "No rows match the active filters";
        let y = area.top() + CHROME_ROWS + body_height / 2;
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

    let gutter = if inner.has_row_actions() { GUTTER } else { 0 };
    let odd_bg = theme.background.lighten(0.03);
    let visible = inner.visible.clone();

    for (slot, &row_index) in visible
        .iter()
        .enumerate()
        .skip(inner.scroll as usize)
        .take(body_height as usize)
    {
        let y = area.top() + CHROME_ROWS + (slot as u16 - inner.scroll);
        let row_rect = Rect::new(area.x, y, area.width, 1);
        let bg = if slot % 2 == 1 {
            odd_bg
        } else {
            theme.background
        };
        buf.fill(row_rect, theme.text.to_rgb(), bg.to_rgb());

        let item = inner.rows[row_index].clone();
        let mut x = row_rect.x;
        for (column, &width) in inner.columns.iter().zip(widths) {
            let cell = Rect::new(x, y, width, 1).shrink(0, 1, 0, 1);
            resolve(column, &item).paint(buf, cell, theme, bg);
            x += width;
        }

        if gutter > 0 {
            let has_actions = inner
                .row_actions
                .as_ref()
                .map(|f| !f(&item).is_empty())
                .unwrap_or(false);
            if has_actions {
                let trigger = Rect::new(area.right().saturating_sub(gutter), y, gutter, 1);
                let open = inner.open_menu == OpenMenu::Row(row_index);
                buf.put_str(
                    trigger.x + 1,
                    trigger.y,
                    if open { "✕" } else { "⋮" },
                    if open { theme.error } else { theme.text_muted }.to_rgb(),
                    bg.to_rgb(),
                    TextStyle::new(),
                );
                inner.layout.row_triggers.push((row_index, trigger));
            }
        }
    }
}

fn paint_open_menu<T: GridRow, A: Clone>(
    inner: &mut TableInner<T, A>,
    buf: &mut Buffer,
    area: Rect,
    theme: &Theme,
) {
    if !inner.open_menu.is_open() {
        return;
    }

    let anchor = match inner.open_menu {
        OpenMenu::View => inner.layout.view_trigger,
        OpenMenu::Row(index) => inner
            .layout
            .row_triggers
            .iter()
            .find(|(i, _)| *i == index)
            .map(|(_, rect)| *rect),
        OpenMenu::None => None,
    };

    let Some(anchor) = anchor else {
        // The trigger scrolled out of view; nothing to anchor to.
        inner.open_menu = OpenMenu::None;
        return;
    };

    let actions = inner.open_menu_actions();
    inner.layout.menu_entries =
        paint_menu(buf, anchor, area, &actions, inner.menu_cursor, theme);
}
