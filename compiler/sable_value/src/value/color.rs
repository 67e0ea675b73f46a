//! Colours.
//!
//! Stored as RGBA with channels in `0..=255` and alpha in `0..=1`. The HSL
//! view is computed on demand. Channels are kept as floats so that results
//! of colour arithmetic are only rounded when serialized.

use super::names::{COLOR_NAMES, NAMED_COLORS};
use super::number::{format_number, fuzzy_equals, fuzzy_round};

#[derive(Clone, Debug)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
    /// Spelling from the source (`red`, `#FFF`); dropped by every builder.
    pub original: Option<String>,
}

fn clamp(value: f64, max: f64) -> f64 {
    value.clamp(0.0, max)
}

fn hue_to_rgb(m1: f64, m2: f64, h: f64) -> f64 {
    let h = h.rem_euclid(1.0);
    if h * 6.0 < 1.0 {
        m1 + (m2 - m1) * h * 6.0
    } else if h * 2.0 < 1.0 {
        m2
    } else if h * 3.0 < 2.0 {
        m1 + (m2 - m1) * (2.0 / 3.0 - h) * 6.0
    } else {
        m1
    }
}

impl Color {
    pub fn rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Color {
            r,
            g,
            b,
            a,
            original: None,
        }
    }

    pub fn rgb(r: f64, g: f64, b: f64) -> Self {
        Color::rgba(r, g, b, 1.0)
    }

    /// From hue in degrees and saturation/lightness in percent.
    pub fn from_hsla(h: f64, s: f64, l: f64, a: f64) -> Self {
        let h = (h / 360.0).rem_euclid(1.0);
        let s = clamp(s / 100.0, 1.0);
        let l = clamp(l / 100.0, 1.0);
        let m2 = if l <= 0.5 { l * (s + 1.0) } else { l + s - l * s };
        let m1 = l * 2.0 - m2;
        Color::rgba(
            hue_to_rgb(m1, m2, h + 1.0 / 3.0) * 255.0,
            hue_to_rgb(m1, m2, h) * 255.0,
            hue_to_rgb(m1, m2, h - 1.0 / 3.0) * 255.0,
            a,
        )
    }

    /// A CSS colour keyword, matched case-insensitively.
    pub fn from_name(name: &str) -> Option<Self> {
        let lower = name.to_ascii_lowercase();
        if lower == "transparent" {
            return Some(Color::rgba(0.0, 0.0, 0.0, 0.0).with_original(name));
        }
        let index = NAMED_COLORS
            .binary_search_by(|(n, _)| n.cmp(&lower.as_str()))
            .ok()?;
        let [r, g, b] = NAMED_COLORS[index].1;
        Some(Color::rgb(f64::from(r), f64::from(g), f64::from(b)).with_original(name))
    }

    #[must_use]
    pub fn with_original(mut self, original: impl Into<String>) -> Self {
        self.original = Some(original.into());
        self
    }

    /// Hue in degrees, saturation and lightness in percent.
    pub fn hsl(&self) -> (f64, f64, f64) {
        let r = self.r / 255.0;
        let g = self.g / 255.0;
        let b = self.b / 255.0;
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let delta = max - min;
        let l = (max + min) / 2.0;
        if fuzzy_equals(max, min) {
            return (0.0, 0.0, l * 100.0);
        }
        let s = if l < 0.5 {
            delta / (max + min)
        } else {
            delta / (2.0 - max - min)
        };
        let h = if r == max {
            (g - b) / delta + if g < b { 6.0 } else { 0.0 }
        } else if g == max {
            (b - r) / delta + 2.0
        } else {
            (r - g) / delta + 4.0
        };
        (h * 60.0, s * 100.0, l * 100.0)
    }

    #[must_use]
    pub fn with_alpha(&self, a: f64) -> Self {
        Color::rgba(self.r, self.g, self.b, clamp(a, 1.0))
    }

    #[must_use]
    pub fn with_rgb(&self, r: f64, g: f64, b: f64) -> Self {
        Color::rgba(r, g, b, self.a)
    }

    /// A copy with its HSL components replaced.
    #[must_use]
    pub fn with_hsl(&self, h: f64, s: f64, l: f64) -> Self {
        Color::from_hsla(h, s, l, self.a)
    }

    /// Channels clamped and rounded as they will be printed.
    pub fn rounded_channels(&self, precision: u8) -> [u8; 3] {
        [self.r, self.g, self.b].map(|c| fuzzy_round(clamp(c, 255.0), precision) as u8)
    }

    /// The keyword printed for this colour, if any.
    pub fn name(&self, precision: u8) -> Option<&'static str> {
        if self.a < 1.0 {
            return None;
        }
        let [r, g, b] = self.rounded_channels(precision);
        let key = (u32::from(r) << 16) | (u32::from(g) << 8) | u32::from(b);
        COLOR_NAMES
            .binary_search_by_key(&key, |(k, _)| *k)
            .ok()
            .map(|i| COLOR_NAMES[i].1)
    }

    /// `#rrggbb`, ignoring alpha.
    pub fn hex(&self, precision: u8) -> String {
        let [r, g, b] = self.rounded_channels(precision);
        format!("#{r:02x}{g:02x}{b:02x}")
    }

    /// `#AARRGGBB` as used by `ie-hex-str()`.
    pub fn ie_hex(&self, precision: u8) -> String {
        let [r, g, b] = self.rounded_channels(precision);
        let a = fuzzy_round(clamp(self.a, 1.0) * 255.0, precision) as u8;
        format!("#{a:02X}{r:02X}{g:02X}{b:02X}")
    }

    fn rgba_function(&self, precision: u8) -> String {
        let [r, g, b] = self.rounded_channels(precision);
        let a = format_number(clamp(self.a, 1.0), precision);
        format!("rgba({r}, {g}, {b}, {a})")
    }

    /// CSS form: the source spelling when untouched, else the keyword or hex
    /// for opaque colours, else `rgba()`.
    pub fn to_css(&self, precision: u8) -> String {
        if let Some(original) = &self.original {
            return original.clone();
        }
        if self.a >= 1.0 {
            return self
                .name(precision)
                .map_or_else(|| self.hex(precision), str::to_owned);
        }
        self.rgba_function(precision)
    }

    /// Debug form: the source spelling when untouched, else hex or `rgba()`.
    pub fn inspect(&self, precision: u8) -> String {
        if let Some(original) = &self.original {
            return original.clone();
        }
        if self.a >= 1.0 {
            self.hex(precision)
        } else {
            self.rgba_function(precision)
        }
    }
}

impl PartialEq for Color {
    fn eq(&self, other: &Self) -> bool {
        fuzzy_equals(self.r, other.r)
            && fuzzy_equals(self.g, other.g)
            && fuzzy_equals(self.b, other.b)
            && fuzzy_equals(self.a, other.a)
    }
}
