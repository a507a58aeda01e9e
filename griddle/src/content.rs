//! Cell content: what a resolved column value looks like on screen.

use termcell::{display_width, truncate_to_width, Buffer, Color, Rect, Style, TextStyle};

use crate::theme::Theme;

/// A run of text with one style.
#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub text: String,
    pub style: Style,
}

impl Span {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: Style::new(),
        }
    }

    pub fn styled(text: impl Into<String>, style: Style) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }
}

/// The displayable form of one cell.
///
/// `Text` doubles as the cell's filter text. `Styled` content is display-only:
/// the filter engine treats such cells as unconstraining, matching the
/// permissive policy for rich render output.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellContent {
    #[default]
    Empty,
    Text(String),
    Styled(Vec<Span>),
}

impl CellContent {
    /// The plain text of this content, if it has one.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Empty | Self::Styled(_) => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Text(s) => s.is_empty(),
            Self::Styled(spans) => spans.iter().all(|s| s.text.is_empty()),
        }
    }

    /// Terminal column width of the content.
    pub fn width(&self) -> usize {
        match self {
            Self::Empty => 0,
            Self::Text(s) => display_width(s),
            Self::Styled(spans) => spans.iter().map(|s| display_width(&s.text)).sum(),
        }
    }

    /// Paint the content into `rect` over the given background.
    pub fn paint(&self, buf: &mut Buffer, rect: Rect, theme: &Theme, bg: Color) {
        if rect.is_empty() {
            return;
        }
        match self {
            Self::Empty => {}
            Self::Text(text) => {
                let text = truncate_to_width(text, rect.width as usize);
                buf.put_str(
                    rect.x,
                    rect.y,
                    &text,
                    theme.text.to_rgb(),
                    bg.to_rgb(),
                    TextStyle::new(),
                );
            }
            Self::Styled(spans) => {
                let mut x = rect.x;
                for span in spans {
                    if x >= rect.right() {
                        break;
                    }
                    let remaining = (rect.right() - x) as usize;
                    let text = truncate_to_width(&span.text, remaining);
                    let fg = span.style.fg.unwrap_or(theme.text);
                    let span_bg = span.style.bg.unwrap_or(bg);
                    x = buf.put_str(
                        x,
                        rect.y,
                        &text,
                        fg.to_rgb(),
                        span_bg.to_rgb(),
                        span.style.text,
                    );
                }
            }
        }
    }
}

impl From<String> for CellContent {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&str> for CellContent {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<Span> for CellContent {
    fn from(span: Span) -> Self {
        Self::Styled(vec![span])
    }
}

impl From<Vec<Span>> for CellContent {
    fn from(spans: Vec<Span>) -> Self {
        Self::Styled(spans)
    }
}
