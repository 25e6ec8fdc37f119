use palette::{FromColor, Hsl as PaletteHsl, IntoColor, Lab, Srgb};

use crate::error::{PaletteError, Result};

/// Relative luminance at or above which dark text is used.
pub const TEXT_LUMINANCE_THRESHOLD: f64 = 0.5;

pub const DARK_TEXT: &str = "#000000";
pub const LIGHT_TEXT: &str = "#FFFFFF";

/// Core color value used throughout the engine.
/// Wraps sRGB u8 components and provides conversions to HSL and CIELAB.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// HSL triple with hue in degrees `[0, 360)` and saturation/lightness in percent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    pub h: f32,
    pub s: f32,
    pub l: f32,
}

impl Color {
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0 };
    pub const WHITE: Color = Color {
        r: 255,
        g: 255,
        b: 255,
    };

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a hex color string like `#ff8800`, `#FF8800` or `ff8800`.
    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(PaletteError::invalid_format(hex));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16).map_err(|_| PaletteError::invalid_format(hex))
        };
        Ok(Self {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
        })
    }

    /// Serialize to canonical uppercase hex `#RRGGBB`.
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// CSS `rgb(r, g, b)` notation.
    pub fn rgb_string(self) -> String {
        format!("rgb({}, {}, {})", self.r, self.g, self.b)
    }

    /// Convert to `palette::Srgb<u8>`.
    pub fn to_srgb_u8(self) -> Srgb<u8> {
        Srgb::new(self.r, self.g, self.b)
    }

    /// Convert to CIELAB (used for nearest-name matching).
    pub fn to_lab(self) -> Lab {
        let srgb_f32: Srgb<f32> = self.to_srgb_u8().into_format();
        srgb_f32.into_color()
    }

    /// Convert to HSL. Achromatic colors report hue 0.
    pub fn to_hsl(self) -> Hsl {
        let srgb_f32: Srgb<f32> = self.to_srgb_u8().into_format();
        let hsl: PaletteHsl = PaletteHsl::from_color(srgb_f32);
        let mut h = hsl.hue.into_positive_degrees();
        if !h.is_finite() || h >= 360.0 {
            h = 0.0;
        }
        Hsl {
            h,
            s: hsl.saturation * 100.0,
            l: hsl.lightness * 100.0,
        }
    }

    /// Create from HSL. Hue wraps modulo 360; saturation and lightness are
    /// clamped to `[0, 100]`.
    pub fn from_hsl(h: f32, s: f32, l: f32) -> Self {
        let hue = h.rem_euclid(360.0);
        let s = s.clamp(0.0, 100.0) / 100.0;
        let l = l.clamp(0.0, 100.0) / 100.0;
        let srgb_f32: Srgb<f32> = Srgb::from_color(PaletteHsl::new_srgb(hue, s, l));
        Self::from_srgb_f32_clamped(srgb_f32)
    }

    /// Clamp an Srgb<f32> to [0, 1] and convert to Color.
    fn from_srgb_f32_clamped(srgb: Srgb<f32>) -> Self {
        let r = (srgb.red.clamp(0.0, 1.0) * 255.0).round() as u8;
        let g = (srgb.green.clamp(0.0, 1.0) * 255.0).round() as u8;
        let b = (srgb.blue.clamp(0.0, 1.0) * 255.0).round() as u8;
        Self { r, g, b }
    }

    /// Black or white foreground, whichever reads better on this background.
    pub fn text_color(self) -> &'static str {
        if crate::pipeline::contrast::relative_luminance(&self) >= TEXT_LUMINANCE_THRESHOLD {
            DARK_TEXT
        } else {
            LIGHT_TEXT
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl std::str::FromStr for Color {
    type Err = PaletteError;

    fn from_str(s: &str) -> Result<Self> {
        Color::from_hex(s)
    }
}

impl std::fmt::Display for Hsl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "hsl({}, {}%, {}%)",
            self.h.round() as i32 % 360,
            self.s.round() as i32,
            self.l.round() as i32
        )
    }
}

pub fn hex_to_rgb(hex: &str) -> Result<Color> {
    Color::from_hex(hex)
}

pub fn rgb_to_hex(color: Color) -> String {
    color.to_hex()
}

pub fn hex_to_hsl(hex: &str) -> Result<Hsl> {
    Ok(Color::from_hex(hex)?.to_hsl())
}

pub fn hsl_to_hex(h: f32, s: f32, l: f32) -> String {
    Color::from_hsl(h, s, l).to_hex()
}

/// Foreground hex (`#000000` or `#FFFFFF`) for text drawn on `hex`.
pub fn text_color(hex: &str) -> Result<&'static str> {
    Ok(Color::from_hex(hex)?.text_color())
}

/// Shortest angular distance between two hues, in degrees.
pub(crate) fn hue_distance(a: f32, b: f32) -> f32 {
    let d = (a - b).rem_euclid(360.0);
    d.min(360.0 - d)
}
