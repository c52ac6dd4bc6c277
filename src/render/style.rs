use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// RGBA color in normalized 0..=1 channel values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    /// Opaque color from 8-bit channels.
    #[must_use]
    pub fn from_rgb8(red: u8, green: u8, blue: u8) -> Self {
        Self::rgb(
            f64::from(red) / 255.0,
            f64::from(green) / 255.0,
            f64::from(blue) / 255.0,
        )
    }

    pub fn validate(self) -> ChartResult<()> {
        for (channel, value) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("alpha", self.alpha),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ChartError::InvalidConfig(format!(
                    "color channel `{channel}` must be finite and in [0, 1]"
                )));
            }
        }
        Ok(())
    }

    /// `#rrggbb`, or `rgba(r,g,b,a)` when not fully opaque.
    #[must_use]
    pub fn to_css(self) -> String {
        let channel = |value: f64| (value.clamp(0.0, 1.0) * 255.0).round() as u8;
        let (r, g, b) = (channel(self.red), channel(self.green), channel(self.blue));
        if self.alpha >= 1.0 {
            format!("#{r:02x}{g:02x}{b:02x}")
        } else {
            format!("rgba({r},{g},{b},{})", self.alpha.clamp(0.0, 1.0))
        }
    }
}

/// Colors and text metrics used by markup backends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartStyle {
    /// Series colors, assigned to categories in first-seen order and cycled.
    pub palette: Vec<Color>,
    pub track: Color,
    pub good: Color,
    pub bad: Color,
    pub frame: Color,
    pub guide: Color,
    pub text: Color,
    pub font_size_px: f64,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            palette: vec![
                Color::from_rgb8(0x4e, 0x79, 0xa7),
                Color::from_rgb8(0xf2, 0x8e, 0x2b),
                Color::from_rgb8(0xe1, 0x57, 0x59),
                Color::from_rgb8(0x76, 0xb7, 0xb2),
                Color::from_rgb8(0x59, 0xa1, 0x4f),
                Color::from_rgb8(0xed, 0xc9, 0x48),
                Color::from_rgb8(0xb0, 0x7a, 0xa1),
            ],
            track: Color::from_rgb8(0xe5, 0xe7, 0xeb),
            good: Color::from_rgb8(0x22, 0xc5, 0x5e),
            bad: Color::from_rgb8(0xef, 0x44, 0x44),
            frame: Color::from_rgb8(0x9c, 0xa3, 0xaf),
            guide: Color::rgba(0.0, 0.0, 0.0, 0.2),
            text: Color::from_rgb8(0x37, 0x41, 0x51),
            font_size_px: 10.0,
        }
    }
}

impl ChartStyle {
    pub fn validate(self) -> ChartResult<Self> {
        if self.palette.is_empty() {
            return Err(ChartError::InvalidConfig(
                "style palette must not be empty".to_owned(),
            ));
        }
        for color in self
            .palette
            .iter()
            .chain([&self.track, &self.good, &self.bad, &self.frame, &self.guide, &self.text])
        {
            color.validate()?;
        }
        if !self.font_size_px.is_finite() || self.font_size_px <= 0.0 {
            return Err(ChartError::InvalidConfig(
                "font size must be finite and > 0".to_owned(),
            ));
        }
        Ok(self)
    }

    /// Palette entry for the `index`-th category.
    #[must_use]
    pub fn series_color(&self, index: usize) -> Color {
        self.palette
            .get(index % self.palette.len().max(1))
            .copied()
            .unwrap_or(self.text)
    }
}
