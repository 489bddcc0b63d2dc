// =============================================================================
// color.rs - Color value and color-space conversions
// =============================================================================

use std::fmt;
use std::str::FromStr;

use bigcolor::BigColor;
use serde::{Deserialize, Serialize};

use crate::config;
use crate::error::{PickerError, Result};

/// Couleur RGBA normalisée, chaque composante dans [0, 1]
/// Normalized RGBA color, every component in [0, 1]
///
/// Components are clamped on construction, so every derived representation
/// (HSB, HSL, HWB, CMYK) stays within its valid range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "Components")]
pub struct Color {
    red: f64,
    green: f64,
    blue: f64,
    alpha: f64,
}

/// Stored form of a color; values are clamped when converted back.
#[derive(Deserialize)]
struct Components {
    red: f64,
    green: f64,
    blue: f64,
    #[serde(default = "opaque")]
    alpha: f64,
}

fn opaque() -> f64 {
    1.0
}

impl From<Components> for Color {
    fn from(c: Components) -> Self {
        Color::new(c.red, c.green, c.blue, c.alpha)
    }
}

/// Hue in degrees [0, 360), saturation and brightness in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsb {
    pub hue: f64,
    pub saturation: f64,
    pub brightness: f64,
}

/// Hue in degrees [0, 360), saturation and lightness in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    pub hue: f64,
    pub saturation: f64,
    pub lightness: f64,
}

/// Hue in degrees [0, 360), whiteness and blackness in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hwb {
    pub hue: f64,
    pub whiteness: f64,
    pub blackness: f64,
}

/// Cyan, magenta, yellow and key (black), each in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cmyk {
    pub cyan: f64,
    pub magenta: f64,
    pub yellow: f64,
    pub black: f64,
}

fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

fn to_byte(value: f64) -> u8 {
    (value * 255.0).round() as u8
}

impl Color {
    pub const BLACK: Color = Color { red: 0.0, green: 0.0, blue: 0.0, alpha: 1.0 };
    pub const WHITE: Color = Color { red: 1.0, green: 1.0, blue: 1.0, alpha: 1.0 };

    pub fn new(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red: clamp_unit(red),
            green: clamp_unit(green),
            blue: clamp_unit(blue),
            alpha: clamp_unit(alpha),
        }
    }

    /// Opaque color from normalized components
    pub fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::new(red, green, blue, 1.0)
    }

    /// Opaque color from 8-bit components
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::from_rgba8(r, g, b, 255)
    }

    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::new(
            r as f64 / 255.0,
            g as f64 / 255.0,
            b as f64 / 255.0,
            a as f64 / 255.0,
        )
    }

    /// Parse une couleur hexadécimale
    /// Parses a hex color
    ///
    /// Accepts `RGB`, `RRGGBB` and `RRGGBBAA`, with or without a leading `#`.
    pub fn from_hex(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);
        let invalid = || PickerError::InvalidHex(input.to_string());

        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let byte = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| invalid());

        match digits.len() {
            3 => {
                let nibble = |i: usize| {
                    u8::from_str_radix(&digits[i..i + 1], 16)
                        .map(|n| n * 17)
                        .map_err(|_| invalid())
                };
                Ok(Self::from_rgb8(nibble(0)?, nibble(1)?, nibble(2)?))
            }
            6 => Ok(Self::from_rgb8(byte(0)?, byte(2)?, byte(4)?)),
            8 => Ok(Self::from_rgba8(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
            _ => Err(invalid()),
        }
    }

    pub fn red(&self) -> f64 {
        self.red
    }

    pub fn green(&self) -> f64 {
        self.green
    }

    pub fn blue(&self) -> f64 {
        self.blue
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Composantes RGB sur 8 bits (arrondies)
    /// 8-bit RGB components (rounded)
    pub fn to_rgb8(&self) -> (u8, u8, u8) {
        (to_byte(self.red), to_byte(self.green), to_byte(self.blue))
    }

    pub fn alpha8(&self) -> u8 {
        to_byte(self.alpha)
    }

    fn max_min(&self) -> (f64, f64) {
        let max = self.red.max(self.green).max(self.blue);
        let min = self.red.min(self.green).min(self.blue);
        (max, min)
    }

    fn hue(&self, max: f64, delta: f64) -> f64 {
        if delta == 0.0 {
            return 0.0;
        }
        let (r, g, b) = (self.red, self.green, self.blue);
        let sector = if max == r {
            ((g - b) / delta).rem_euclid(6.0)
        } else if max == g {
            (b - r) / delta + 2.0
        } else {
            (r - g) / delta + 4.0
        };
        (sector * 60.0).rem_euclid(360.0)
    }

    pub fn hsb(&self) -> Hsb {
        let (max, min) = self.max_min();
        let delta = max - min;
        Hsb {
            hue: self.hue(max, delta),
            saturation: if max == 0.0 { 0.0 } else { delta / max },
            brightness: max,
        }
    }

    pub fn hsl(&self) -> Hsl {
        let (max, min) = self.max_min();
        let delta = max - min;
        let lightness = (max + min) / 2.0;
        let saturation = if delta == 0.0 {
            0.0
        } else {
            clamp_unit(delta / (1.0 - (2.0 * lightness - 1.0).abs()))
        };
        Hsl {
            hue: self.hue(max, delta),
            saturation,
            lightness,
        }
    }

    pub fn hwb(&self) -> Hwb {
        let (max, min) = self.max_min();
        Hwb {
            hue: self.hue(max, max - min),
            whiteness: min,
            blackness: 1.0 - max,
        }
    }

    /// Conversion CMYK naïve (sans profil ICC)
    /// Naive CMYK conversion (no ICC profile)
    ///
    /// Pure black has no defined chroma; it maps to `(0, 0, 0, 1)`.
    pub fn cmyk(&self) -> Cmyk {
        let (max, _) = self.max_min();
        if max == 0.0 {
            return Cmyk { cyan: 0.0, magenta: 0.0, yellow: 0.0, black: 1.0 };
        }
        let black = 1.0 - max;
        let ink = |channel: f64| clamp_unit((1.0 - channel - black) / (1.0 - black));
        Cmyk {
            cyan: ink(self.red),
            magenta: ink(self.green),
            yellow: ink(self.blue),
            black,
        }
    }

    pub fn is_grayscale(&self) -> bool {
        let tolerance = config::GRAYSCALE_TOLERANCE;
        (self.red - self.green).abs() < tolerance && (self.green - self.blue).abs() < tolerance
    }

    fn big_color(&self) -> BigColor {
        let (r, g, b) = self.to_rgb8();
        BigColor::from_rgb(r, g, b, 1.0)
    }

    /// WCAG contrast ratio between two colors, in [1, 21]
    pub fn contrast_ratio(&self, other: &Color) -> f32 {
        self.big_color().get_contrast_ratio(&other.big_color())
    }

    /// Texte lisible par-dessus cette couleur (noir ou blanc)
    /// Readable text color on top of this color (black or white)
    pub fn text_color(&self) -> Color {
        if self.contrast_ratio(&Color::WHITE) >= self.contrast_ratio(&Color::BLACK) {
            Color::WHITE
        } else {
            Color::BLACK
        }
    }

    /// "#RRGGBB"
    pub fn hex(&self) -> String {
        let (r, g, b) = self.to_rgb8();
        format!("#{:02X}{:02X}{:02X}", r, g, b)
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hex())
    }
}

impl FromStr for Color {
    type Err = PickerError;

    fn from_str(s: &str) -> Result<Self> {
        Color::from_hex(s)
    }
}

// =============================================================================
// TESTS
// =============================================================================
