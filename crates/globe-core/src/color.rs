//! Packed RGB colors and the light/dark theme pair.

use serde::{Serialize, Deserialize};
use std::fmt;

/// 24-bit RGB color packed as `0xRRGGBB`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(pub u32);

impl Color {
    pub const BLACK: Color = Color(0x000000);
    pub const WHITE: Color = Color(0xffffff);
    pub const RED: Color = Color(0xff0000);
    pub const GREEN: Color = Color(0x00ff00);
    pub const BLUE: Color = Color(0x0000ff);

    pub fn hex(&self) -> u32 {
        self.0 & 0x00ff_ffff
    }

    /// Linear 0..1 channels for the GPU
    pub fn to_rgb(&self) -> [f32; 3] {
        let c = self.hex();
        [
            ((c >> 16) & 0xff) as f32 / 255.0,
            ((c >> 8) & 0xff) as f32 / 255.0,
            (c & 0xff) as f32 / 255.0,
        ]
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06x}", self.hex())
    }
}

/// Globe theme. Chosen explicitly by the caller; the host's "prefers dark"
/// signal is only an input to [`Theme::from_prefers_dark`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn from_prefers_dark(prefers_dark: bool) -> Self {
        if prefers_dark { Theme::Dark } else { Theme::Light }
    }

    pub fn is_dark(&self) -> bool {
        matches!(self, Theme::Dark)
    }

    pub fn toggled(&self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Color of stars, lines and bands
    pub fn foreground(&self) -> Color {
        match self {
            Theme::Light => Color::BLACK,
            Theme::Dark => Color::WHITE,
        }
    }

    pub fn background(&self) -> Color {
        match self {
            Theme::Light => Color::WHITE,
            Theme::Dark => Color::BLACK,
        }
    }

    /// The far side of the globe fades into this
    pub fn fog(&self) -> Color {
        match self {
            Theme::Light => Color(0xdddddd),
            Theme::Dark => Color(0x222222),
        }
    }

    /// Value of the document-level theme attribute
    pub fn attribute(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.attribute())
    }
}
