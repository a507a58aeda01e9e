/// A concrete terminal color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// A color specification, resolved to [`Rgb`] at paint time.
///
/// Colors are usually authored in Oklch (perceptually uniform lightness,
/// chroma, hue) and converted to sRGB once per cell write.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Color {
    Oklch { l: f32, c: f32, h: f32 },
    Rgb { r: u8, g: u8, b: u8 },
}

impl Color {
    pub fn oklch(l: f32, c: f32, h: f32) -> Self {
        Self::Oklch { l, c, h }
    }

    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::Rgb { r, g, b }
    }

    /// Increase perceptual lightness by `amount` (clamped to [0, 1]).
    pub fn lighten(self, amount: f32) -> Self {
        let (l, c, h) = self.to_oklch();
        Self::Oklch {
            l: (l + amount).clamp(0.0, 1.0),
            c,
            h,
        }
    }

    /// Decrease perceptual lightness by `amount` (clamped to [0, 1]).
    pub fn darken(self, amount: f32) -> Self {
        let (l, c, h) = self.to_oklch();
        Self::Oklch {
            l: (l - amount).clamp(0.0, 1.0),
            c,
            h,
        }
    }

    fn to_oklch(self) -> (f32, f32, f32) {
        match self {
            Self::Oklch { l, c, h } => (l, c, h),
            Self::Rgb { r, g, b } => {
                use palette::{IntoColor, Oklch, Srgb};
                let srgb = Srgb::new(r, g, b).into_format::<f32>();
                let oklch: Oklch = srgb.into_color();
                (oklch.l, oklch.chroma, oklch.hue.into_positive_degrees())
            }
        }
    }

    pub fn to_rgb(self) -> Rgb {
        match self {
            Self::Rgb { r, g, b } => Rgb::new(r, g, b),
            Self::Oklch { l, c, h } => oklch_to_rgb(l, c, h),
        }
    }
}

fn oklch_to_rgb(l: f32, c: f32, h: f32) -> Rgb {
    use palette::{IntoColor, Oklch, Srgb};

    let oklch = Oklch::new(l, c, h);
    let srgb: Srgb = oklch.into_color();
    let (r, g, b) = srgb.into_format::<u8>().into_components();

    Rgb::new(r, g, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb_roundtrip() {
        let color = Color::rgb(128, 64, 200);
        assert_eq!(color.to_rgb(), Rgb::new(128, 64, 200));
    }

    #[test]
    fn lighten_raises_lightness() {
        let base = Color::oklch(0.3, 0.05, 250.0);
        let lighter = base.lighten(0.2);
        match lighter {
            Color::Oklch { l, .. } => assert!((l - 0.5).abs() < f32::EPSILON),
            _ => panic!("expected oklch"),
        }
    }

    #[test]
    fn darken_clamps_at_zero() {
        let base = Color::oklch(0.1, 0.0, 0.0);
        match base.darken(0.5) {
            Color::Oklch { l, .. } => assert_eq!(l, 0.0),
            _ => panic!("expected oklch"),
        }
    }
}
