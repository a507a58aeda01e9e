//! Named colors for the grid views.

use termcell::Color;

/// Color scheme consumed by the views at render time.
#[derive(Debug, Clone)]
pub struct Theme {
    pub primary: Color,
    pub secondary: Color,
    pub background: Color,
    pub surface: Color,
    pub text: Color,
    pub text_muted: Color,
    pub error: Color,
    pub success: Color,
    pub warning: Color,
    pub info: Color,
    /// Base tone for loading-skeleton blocks.
    pub skeleton_base: Color,
    /// Accent tone for loading-skeleton blocks.
    pub skeleton_highlight: Color,
}

impl Theme {
    /// The default dark scheme.
    pub fn dark() -> Self {
        Self {
            primary: Color::oklch(0.6, 0.15, 250.0),
            secondary: Color::oklch(0.7, 0.1, 200.0),
            background: Color::oklch(0.15, 0.02, 250.0),
            surface: Color::oklch(0.2, 0.02, 250.0),
            text: Color::oklch(0.9, 0.02, 250.0),
            text_muted: Color::oklch(0.6, 0.02, 250.0),
            error: Color::oklch(0.6, 0.2, 25.0),
            success: Color::oklch(0.6, 0.15, 145.0),
            warning: Color::oklch(0.7, 0.15, 85.0),
            info: Color::oklch(0.7, 0.1, 230.0),
            skeleton_base: Color::oklch(0.25, 0.02, 250.0),
            skeleton_highlight: Color::oklch(0.35, 0.02, 250.0),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}
