//! Contextual action menus for rows, cards, and the view itself.

use termcell::{display_width, truncate_to_width, Buffer, Rect, TextStyle};

use crate::theme::Theme;

/// One entry of an action menu.
///
/// The `action` payload is whatever the embedding page uses to identify
/// the operation; the views report it back on activation rather than
/// running callbacks themselves.
#[derive(Debug, Clone)]
pub struct MenuAction<A> {
    pub label: String,
    pub icon: Option<char>,
    pub dangerous: bool,
    pub action: A,
}

impl<A> MenuAction<A> {
    pub fn new(label: impl Into<String>, action: A) -> Self {
        Self {
            label: label.into(),
            icon: None,
            dangerous: false,
            action,
        }
    }

    pub fn icon(mut self, icon: char) -> Self {
        self.icon = Some(icon);
        self
    }

    /// Mark the entry as destructive; it renders in the error color.
    pub fn dangerous(mut self) -> Self {
        self.dangerous = true;
        self
    }
}

/// Identity of the currently open menu within one view.
///
/// A single value per view makes the one-menu-open-at-a-time invariant
/// structural: opening any menu overwrites whichever was open before.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OpenMenu {
    #[default]
    None,
    /// The view-level action menu.
    View,
    /// A per-record menu, identified by index into the view's row set.
    Row(usize),
}

impl OpenMenu {
    pub fn is_open(&self) -> bool {
        !matches!(self, Self::None)
    }

    /// Toggle semantics: opening the already-open menu closes it, anything
    /// else replaces it.
    pub fn toggled(self, target: OpenMenu) -> Self {
        if self == target {
            Self::None
        } else {
            target
        }
    }
}

/// Paint an open menu as a popover dropping down from `anchor`, clamped to
/// `bounds`. Returns the rect of each entry for hit testing, in order.
pub fn paint_menu<A>(
    buf: &mut Buffer,
    anchor: Rect,
    bounds: Rect,
    actions: &[MenuAction<A>],
    cursor: usize,
    theme: &Theme,
) -> Vec<Rect> {
    if actions.is_empty() {
        return Vec::new();
    }

    let label_width = actions
        .iter()
        .map(|a| display_width(&a.label) + if a.icon.is_some() { 2 } else { 0 })
        .max()
        .unwrap_or(0) as u16;
    let width = (label_width + 2).min(bounds.width);
    let height = (actions.len() as u16).min(bounds.height);

    let x = anchor
        .left()
        .min(bounds.right().saturating_sub(width))
        .max(bounds.left());
    let below = anchor.bottom();
    let y = if below + height <= bounds.bottom() {
        below
    } else {
        anchor.top().saturating_sub(height).max(bounds.top())
    };

    let area = Rect::new(x, y, width, height);
    buf.fill(area, theme.text.to_rgb(), theme.surface.to_rgb());

    let mut entry_rects = Vec::with_capacity(actions.len());
    for (i, action) in actions.iter().enumerate() {
        let row = area.row(i as u16);
        if row.is_empty() {
            entry_rects.push(Rect::default());
            continue;
        }

        let selected = i == cursor;
        let fg = if action.dangerous {
            theme.error
        } else if selected {
            theme.background
        } else {
            theme.text
        };
        let bg = if selected { theme.primary } else { theme.surface };
        buf.fill(row, fg.to_rgb(), bg.to_rgb());

        let mut label = String::new();
        if let Some(icon) = action.icon {
            label.push(icon);
            label.push(' ');
        }
        label.push_str(&action.label);
        let label = truncate_to_width(&label, row.width.saturating_sub(2) as usize);
        buf.put_str(
            row.left() + 1,
            row.top(),
            &label,
            fg.to_rgb(),
            bg.to_rgb(),
            TextStyle::new(),
        );
        entry_rects.push(row);
    }

    entry_rects
}
