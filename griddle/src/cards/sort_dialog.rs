//! Sort dialog: pick a sortable column, commit on Apply.
//!
//! The dialog keeps a tentative selection separate from the view's
//! committed config, so closing without Apply leaves the sort untouched.

use termcell::{display_width, Buffer, Key, Rect, TextStyle};

use crate::sort::{SortConfig, SortDirection};
use crate::theme::Theme;

/// What a dialog event asked the view to do.
pub(super) enum DialogOutcome<K> {
    None,
    Close,
    ApplySort(SortConfig<K>),
}

pub(super) struct SortDialogState<K> {
    /// Sortable columns: (key, header).
    pub entries: Vec<(K, String)>,
    pub cursor: usize,
    pub tentative: Option<SortConfig<K>>,
}

impl<K: Copy + PartialEq> SortDialogState<K> {
    pub fn new(entries: Vec<(K, String)>) -> Self {
        Self {
            entries,
            cursor: 0,
            tentative: None,
        }
    }

    /// Select a column in the tentative config. Picking the column that is
    /// already active (tentatively, or committed when nothing tentative
    /// exists yet) toggles its direction.
    pub fn select(&mut self, committed: Option<&SortConfig<K>>, key: K) {
        self.tentative = Some(match (&self.tentative, committed) {
            (Some(t), _) if t.sort_by == key => SortConfig {
                sort_by: key,
                direction: t.direction.flipped(),
            },
            (None, Some(c)) if c.sort_by == key => SortConfig {
                sort_by: key,
                direction: c.direction.flipped(),
            },
            _ => SortConfig {
                sort_by: key,
                direction: SortDirection::Ascending,
            },
        });
    }

    fn header_of(&self, key: K) -> &str {
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, h)| h.as_str())
            .unwrap_or("")
    }

    /// Human-readable description of what Apply will change.
    pub fn preview(&self, committed: Option<&SortConfig<K>>) -> Option<String> {
        match (&self.tentative, committed) {
            (None, None) => None,
            (None, Some(c)) => Some(format!(
                "Currently ordered by {}.",
                self.header_of(c.sort_by)
            )),
            (Some(t), Some(c)) if t.sort_by == c.sort_by => {
                if t.direction != c.direction {
                    Some("Same column, only the direction will change.".to_string())
                } else {
                    Some("The ordering will not change.".to_string())
                }
            }
            (Some(t), _) => Some(format!(
                "Rows will be ordered by {}.",
                self.header_of(t.sort_by)
            )),
        }
    }

    /// The config the dialog shows as active: tentative if present, else
    /// the committed one.
    fn active<'a>(&'a self, committed: Option<&'a SortConfig<K>>) -> Option<&'a SortConfig<K>> {
        self.tentative.as_ref().or(committed)
    }

    /// Handle a key press routed to the dialog.
    pub fn handle_key(&mut self, key: Key, committed: Option<&SortConfig<K>>) -> DialogOutcome<K> {
        match key {
            Key::Up => {
                self.cursor = self.cursor.saturating_sub(1);
                DialogOutcome::None
            }
            Key::Down => {
                if !self.entries.is_empty() {
                    self.cursor = (self.cursor + 1).min(self.entries.len() - 1);
                }
                DialogOutcome::None
            }
            Key::Char(' ') => {
                if let Some(&(entry_key, _)) = self.entries.get(self.cursor) {
                    self.select(committed, entry_key);
                }
                DialogOutcome::None
            }
            Key::Enter => match self.tentative {
                Some(config) => DialogOutcome::ApplySort(config),
                None => DialogOutcome::Close,
            },
            Key::Escape => DialogOutcome::Close,
            _ => DialogOutcome::None,
        }
    }

    /// Paint the dialog centered in `bounds`. Returns
    /// (entry rects, apply rect, cancel rect).
    pub fn paint(
        &self,
        buf: &mut Buffer,
        bounds: Rect,
        committed: Option<&SortConfig<K>>,
        theme: &Theme,
    ) -> (Vec<Rect>, Option<Rect>, Option<Rect>) {
        let width = 44.min(bounds.width);
        let height = (self.entries.len() as u16 + 7).min(bounds.height);
        let area = bounds.centered(width, height);

        buf.fill(area, theme.text.to_rgb(), theme.surface.to_rgb());
        buf.put_str(
            area.x + 2,
            area.y,
            "Sort",
            theme.primary.to_rgb(),
            theme.surface.to_rgb(),
            TextStyle {
                bold: true,
                ..TextStyle::new()
            },
        );
        buf.put_str(
            area.x + 2,
            area.y + 1,
            "Pick the column to order by.",
            theme.text_muted.to_rgb(),
            theme.surface.to_rgb(),
            TextStyle::new(),
        );

        let active = self.active(committed);
        let mut entry_rects = Vec::with_capacity(self.entries.len());
        for (i, (key, header)) in self.entries.iter().enumerate() {
            let row = Rect::new(area.x + 2, area.y + 2 + i as u16, width.saturating_sub(4), 1);
            let is_active = active.map(|a| a.sort_by == *key).unwrap_or(false);
            let is_cursor = i == self.cursor;

            let fg = if is_active { theme.primary } else { theme.text };
            let bg = if is_cursor {
                theme.surface.lighten(0.08)
            } else {
                theme.surface
            };
            buf.fill(row, fg.to_rgb(), bg.to_rgb());

            let mut label = header.clone();
            if is_active {
                label.push_str(match active.map(|a| a.direction) {
                    Some(SortDirection::Descending) => " ▼",
                    _ => " ▲",
                });
            }
            buf.put_str(row.x + 1, row.y, &label, fg.to_rgb(), bg.to_rgb(), TextStyle::new());
            entry_rects.push(row);
        }

        if let Some(preview) = self.preview(committed) {
            buf.put_str(
                area.x + 2,
                area.bottom().saturating_sub(3),
                &termcell::truncate_to_width(&preview, width.saturating_sub(4) as usize),
                theme.text_muted.to_rgb(),
                theme.surface.to_rgb(),
                TextStyle {
                    italic: true,
                    ..TextStyle::new()
                },
            );
        }

        let apply_label = "[ Apply ]";
        let cancel_label = "[ Cancel ]";
        let footer_y = area.bottom().saturating_sub(1);
        let apply_rect = Rect::new(
            area.x + 2,
            footer_y,
            display_width(apply_label) as u16,
            1,
        );
        buf.put_str(
            apply_rect.x,
            apply_rect.y,
            apply_label,
            theme.success.to_rgb(),
            theme.surface.to_rgb(),
            TextStyle::new(),
        );
        let cancel_rect = Rect::new(
            apply_rect.right() + 2,
            footer_y,
            display_width(cancel_label) as u16,
            1,
        );
        buf.put_str(
            cancel_rect.x,
            cancel_rect.y,
            cancel_label,
            theme.text_muted.to_rgb(),
            theme.surface.to_rgb(),
            TextStyle::new(),
        );

        (entry_rects, Some(apply_rect), Some(cancel_rect))
    }
}
