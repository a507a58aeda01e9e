//! Filter dialog: one text input per column, committed only on Apply.
//!
//! Every column is filterable by text here, sortable or not. The Clear
//! button empties all fields without closing; Esc closes and discards
//! edits, leaving the committed terms as they were.

use termcell::{display_width, Buffer, InputState, Key, Modifiers, Rect, TextStyle};

use crate::column::{Column, GridRow};
use crate::filter::FilterState;
use crate::theme::Theme;

/// What a dialog event asked the view to do.
pub(super) enum FilterOutcome<K> {
    None,
    Close,
    Apply(FilterState<K>),
}

pub(super) struct FilterDialogState<K> {
    /// One field per column: (key, header, input).
    pub fields: Vec<(K, String, InputState)>,
    pub focused: usize,
}

impl<K: Copy + Eq + std::hash::Hash> FilterDialogState<K> {
    pub fn new<T>(columns: &[Column<T>], committed: &FilterState<K>) -> Self
    where
        T: GridRow<Key = K>,
    {
        let fields = columns
            .iter()
            .map(|c| {
                let term = committed.get(&c.key).cloned().unwrap_or_default();
                (c.key, c.header.clone(), InputState::new(term))
            })
            .collect();
        Self { fields, focused: 0 }
    }

    /// Collect the current field contents as a filter state.
    pub fn terms(&self) -> FilterState<K> {
        self.fields
            .iter()
            .filter(|(_, _, input)| !input.is_empty())
            .map(|(key, _, input)| (*key, input.text().to_string()))
            .collect()
    }

    pub fn clear(&mut self) {
        for (_, _, input) in &mut self.fields {
            input.clear();
        }
    }

    /// Handle a key press routed to the dialog.
    pub fn handle_key(&mut self, key: Key) -> FilterOutcome<K> {
        match key {
            Key::Escape => FilterOutcome::Close,
            Key::Enter => FilterOutcome::Apply(self.terms()),
            Key::Tab | Key::Down => {
                if !self.fields.is_empty() {
                    self.focused = (self.focused + 1) % self.fields.len();
                }
                FilterOutcome::None
            }
            Key::BackTab | Key::Up => {
                if !self.fields.is_empty() {
                    self.focused = (self.focused + self.fields.len() - 1) % self.fields.len();
                }
                FilterOutcome::None
            }
            key => {
                if let Some((_, _, input)) = self.fields.get_mut(self.focused) {
                    input.handle_key(key, Modifiers::new());
                }
                FilterOutcome::None
            }
        }
    }

    /// Paint the dialog centered in `bounds`. Returns
    /// (input rects, apply rect, clear rect).
    pub fn paint(
        &self,
        buf: &mut Buffer,
        bounds: Rect,
        theme: &Theme,
    ) -> (Vec<Rect>, Option<Rect>, Option<Rect>) {
        let width = 44.min(bounds.width);
        let height = (self.fields.len() as u16 * 2 + 5).min(bounds.height);
        let area = bounds.centered(width, height);

        buf.fill(area, theme.text.to_rgb(), theme.surface.to_rgb());
        buf.put_str(
            area.x + 2,
            area.y,
            "Filter",
            theme.primary.to_rgb(),
            theme.surface.to_rgb(),
            TextStyle {
                bold: true,
                ..TextStyle::new()
            },
        );

        let mut input_rects = Vec::with_capacity(self.fields.len());
        for (i, (_, header, input)) in self.fields.iter().enumerate() {
            let label_y = area.y + 1 + i as u16 * 2;
            let input_y = label_y + 1;
            if input_y >= area.bottom().saturating_sub(1) {
                input_rects.push(Rect::default());
                continue;
            }

            buf.put_str(
                area.x + 2,
                label_y,
                header,
                theme.text_muted.to_rgb(),
                theme.surface.to_rgb(),
                TextStyle::new(),
            );

            let input_rect = Rect::new(area.x + 2, input_y, width.saturating_sub(4), 1);
            let box_bg = theme.surface.lighten(0.05);
            buf.fill(input_rect, theme.text.to_rgb(), box_bg.to_rgb());

            let focused = i == self.focused;
            if input.is_empty() && !focused {
                buf.put_str(
                    input_rect.x,
                    input_rect.y,
                    "Search…",
                    theme.text_muted.to_rgb(),
                    box_bg.to_rgb(),
                    TextStyle {
                        dim: true,
                        ..TextStyle::new()
                    },
                );
            } else {
                let text =
                    termcell::truncate_to_width(input.text(), input_rect.width as usize);
                buf.put_str(
                    input_rect.x,
                    input_rect.y,
                    &text,
                    theme.text.to_rgb(),
                    box_bg.to_rgb(),
                    TextStyle::new(),
                );
                if focused {
                    let cursor_x = input_rect
                        .x
                        .saturating_add(input.cursor() as u16)
                        .min(input_rect.right().saturating_sub(1));
                    if let Some(cell) = buf.get_mut(cursor_x, input_rect.y) {
                        cell.bg = theme.primary.to_rgb();
                        cell.fg = theme.background.to_rgb();
                    }
                }
            }
            input_rects.push(input_rect);
        }

        let apply_label = "[ Apply ]";
        let clear_label = "[ Clear ]";
        let footer_y = area.bottom().saturating_sub(1);
        let apply_rect = Rect::new(area.x + 2, footer_y, display_width(apply_label) as u16, 1);
        buf.put_str(
            apply_rect.x,
            apply_rect.y,
            apply_label,
            theme.success.to_rgb(),
            theme.surface.to_rgb(),
            TextStyle::new(),
        );
        let clear_rect = Rect::new(
            apply_rect.right() + 2,
            footer_y,
            display_width(clear_label) as u16,
            1,
        );
        buf.put_str(
            clear_rect.x,
            clear_rect.y,
            clear_label,
            theme.warning.to_rgb(),
            theme.surface.to_rgb(),
            TextStyle::new(),
        );

        (input_rects, Some(apply_rect), Some(clear_rect))
    }
}
