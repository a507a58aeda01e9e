use crate::color::Color;

/// Text attribute flags for a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextStyle {
    pub bold: bool,
    pub dim: bool,
    pub italic: bool,
    pub underline: bool,
}

impl TextStyle {
    pub const fn new() -> Self {
        Self {
            bold: false,
            dim: false,
            italic: false,
            underline: false,
        }
    }
}

/// Foreground/background colors plus text attributes.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Style {
    pub fg: Option<Color>,
    pub bg: Option<Color>,
    pub text: TextStyle,
}

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fg(mut self, color: Color) -> Self {
        self.fg = Some(color);
        self
    }

    pub fn bg(mut self, color: Color) -> Self {
        self.bg = Some(color);
        self
    }

    pub fn bold(mut self) -> Self {
        self.text.bold = true;
        self
    }

    pub fn dim(mut self) -> Self {
        self.text.dim = true;
        self
    }

    pub fn italic(mut self) -> Self {
        self.text.italic = true;
        self
    }

    pub fn underline(mut self) -> Self {
        self.text.underline = true;
        self
    }
}
