// =============================================================================
// format.rs - Textual representations of a color
// =============================================================================

use std::fmt;
use std::str::FromStr;

use crate::color::Color;
use crate::error::{PickerError, Result};

/// Format de sortie sélectionné pour la copie
/// Output format selected for copying
///
/// The numeric id is what gets persisted, the key is what the command line
/// accepts. Neither may change once released.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorFormat {
    // Generic
    Hex,
    HexNoHash,
    Rgb,
    Hsb,
    Cmyk,
    // Web / CSS
    CssRgba,
    CssHsl,
    CssHsla,
    CssHwb,
    CssColor4,
    CssVariable,
    // Apple platforms
    SwiftUiColor,
    SwiftUiHex,
    UiColorSwift,
    NsColorSwift,
    CgColor,
    CiColor,
    UiColorObjC,
    NsColorObjC,
    // Cross-platform
    Flutter,
    FlutterRgbo,
    AndroidKotlin,
    AndroidXml,
    Unity,
    Godot,
    // JavaScript
    JsObject,
    JsArray,
    Tailwind,
    // Design
    RawFloat,
    RawInteger,
    // Other
    JavaAwt,
    QtQml,
    Glsl,
    HexInteger,
}

/// Groups used to organise formats in menus and listings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Generic,
    Web,
    Apple,
    CrossPlatform,
    JavaScript,
    Design,
    Other,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Generic,
        Category::Web,
        Category::Apple,
        Category::CrossPlatform,
        Category::JavaScript,
        Category::Design,
        Category::Other,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            Category::Generic => "Generic",
            Category::Web => "Web / CSS",
            Category::Apple => "Apple Platforms",
            Category::CrossPlatform => "Cross-Platform",
            Category::JavaScript => "JavaScript",
            Category::Design => "Design",
            Category::Other => "Other",
        }
    }

    /// Formats of this category, in display order
    pub fn formats(self) -> impl Iterator<Item = ColorFormat> {
        ColorFormat::ALL.into_iter().filter(move |f| f.category() == self)
    }
}

impl ColorFormat {
    pub const ALL: [ColorFormat; 34] = [
        ColorFormat::Hex,
        ColorFormat::HexNoHash,
        ColorFormat::Rgb,
        ColorFormat::Hsb,
        ColorFormat::Cmyk,
        ColorFormat::CssRgba,
        ColorFormat::CssHsl,
        ColorFormat::CssHsla,
        ColorFormat::CssHwb,
        ColorFormat::CssColor4,
        ColorFormat::CssVariable,
        ColorFormat::SwiftUiColor,
        ColorFormat::SwiftUiHex,
        ColorFormat::UiColorSwift,
        ColorFormat::NsColorSwift,
        ColorFormat::CgColor,
        ColorFormat::CiColor,
        ColorFormat::UiColorObjC,
        ColorFormat::NsColorObjC,
        ColorFormat::Flutter,
        ColorFormat::FlutterRgbo,
        ColorFormat::AndroidKotlin,
        ColorFormat::AndroidXml,
        ColorFormat::Unity,
        ColorFormat::Godot,
        ColorFormat::JsObject,
        ColorFormat::JsArray,
        ColorFormat::Tailwind,
        ColorFormat::RawFloat,
        ColorFormat::RawInteger,
        ColorFormat::JavaAwt,
        ColorFormat::QtQml,
        ColorFormat::Glsl,
        ColorFormat::HexInteger,
    ];

    /// Identifiant persisté / Persisted identifier
    pub fn id(self) -> u8 {
        match self {
            ColorFormat::Hex => 0,
            ColorFormat::HexNoHash => 1,
            ColorFormat::Rgb => 2,
            ColorFormat::Hsb => 3,
            ColorFormat::Cmyk => 4,
            ColorFormat::CssRgba => 10,
            ColorFormat::CssHsl => 11,
            ColorFormat::CssHsla => 12,
            ColorFormat::CssHwb => 13,
            ColorFormat::CssColor4 => 14,
            ColorFormat::CssVariable => 15,
            ColorFormat::SwiftUiColor => 20,
            ColorFormat::SwiftUiHex => 21,
            ColorFormat::UiColorSwift => 22,
            ColorFormat::NsColorSwift => 23,
            ColorFormat::CgColor => 24,
            ColorFormat::CiColor => 25,
            ColorFormat::UiColorObjC => 26,
            ColorFormat::NsColorObjC => 27,
            ColorFormat::Flutter => 30,
            ColorFormat::FlutterRgbo => 31,
            ColorFormat::AndroidKotlin => 32,
            ColorFormat::AndroidXml => 33,
            ColorFormat::Unity => 34,
            ColorFormat::Godot => 35,
            ColorFormat::JsObject => 40,
            ColorFormat::JsArray => 41,
            ColorFormat::Tailwind => 42,
            ColorFormat::RawFloat => 50,
            ColorFormat::RawInteger => 51,
            ColorFormat::JavaAwt => 60,
            ColorFormat::QtQml => 61,
            ColorFormat::Glsl => 62,
            ColorFormat::HexInteger => 63,
        }
    }

    pub fn from_id(id: u8) -> Option<ColorFormat> {
        ColorFormat::ALL.into_iter().find(|f| f.id() == id)
    }

    pub fn key(self) -> &'static str {
        match self {
            ColorFormat::Hex => "hex",
            ColorFormat::HexNoHash => "hex-no-hash",
            ColorFormat::Rgb => "rgb",
            ColorFormat::Hsb => "hsb",
            ColorFormat::Cmyk => "cmyk",
            ColorFormat::CssRgba => "css-rgba",
            ColorFormat::CssHsl => "css-hsl",
            ColorFormat::CssHsla => "css-hsla",
            ColorFormat::CssHwb => "css-hwb",
            ColorFormat::CssColor4 => "css-color4",
            ColorFormat::CssVariable => "css-variable",
            ColorFormat::SwiftUiColor => "swiftui-color",
            ColorFormat::SwiftUiHex => "swiftui-hex",
            ColorFormat::UiColorSwift => "uicolor-swift",
            ColorFormat::NsColorSwift => "nscolor-swift",
            ColorFormat::CgColor => "cgcolor",
            ColorFormat::CiColor => "cicolor",
            ColorFormat::UiColorObjC => "uicolor-objc",
            ColorFormat::NsColorObjC => "nscolor-objc",
            ColorFormat::Flutter => "flutter",
            ColorFormat::FlutterRgbo => "flutter-rgbo",
            ColorFormat::AndroidKotlin => "android-kotlin",
            ColorFormat::AndroidXml => "android-xml",
            ColorFormat::Unity => "unity",
            ColorFormat::Godot => "godot",
            ColorFormat::JsObject => "js-object",
            ColorFormat::JsArray => "js-array",
            ColorFormat::Tailwind => "tailwind",
            ColorFormat::RawFloat => "float",
            ColorFormat::RawInteger => "integer",
            ColorFormat::JavaAwt => "java-awt",
            ColorFormat::QtQml => "qml",
            ColorFormat::Glsl => "glsl",
            ColorFormat::HexInteger => "hex-integer",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            ColorFormat::Hex => "HEX",
            ColorFormat::HexNoHash => "HEX (No #)",
            ColorFormat::Rgb => "RGB",
            ColorFormat::Hsb => "HSB",
            ColorFormat::Cmyk => "CMYK",
            ColorFormat::CssRgba => "CSS RGBA",
            ColorFormat::CssHsl => "CSS HSL",
            ColorFormat::CssHsla => "CSS HSLA",
            ColorFormat::CssHwb => "CSS HWB",
            ColorFormat::CssColor4 => "CSS Color Level 4",
            ColorFormat::CssVariable => "CSS Variable",
            ColorFormat::SwiftUiColor => "SwiftUI Color",
            ColorFormat::SwiftUiHex => "SwiftUI Color (Hex)",
            ColorFormat::UiColorSwift => "UIColor (Swift)",
            ColorFormat::NsColorSwift => "NSColor (Swift)",
            ColorFormat::CgColor => "CGColor",
            ColorFormat::CiColor => "CIColor",
            ColorFormat::UiColorObjC => "UIColor (Objective-C)",
            ColorFormat::NsColorObjC => "NSColor (Objective-C)",
            ColorFormat::Flutter => "Flutter Color",
            ColorFormat::FlutterRgbo => "Flutter RGBO",
            ColorFormat::AndroidKotlin => "Android Kotlin",
            ColorFormat::AndroidXml => "Android XML",
            ColorFormat::Unity => "Unity C#",
            ColorFormat::Godot => "Godot GDScript",
            ColorFormat::JsObject => "JS Object",
            ColorFormat::JsArray => "JS Array",
            ColorFormat::Tailwind => "Tailwind CSS",
            ColorFormat::RawFloat => "Float (0-1)",
            ColorFormat::RawInteger => "Integer (0-255)",
            ColorFormat::JavaAwt => "Java AWT",
            ColorFormat::QtQml => "Qt / QML",
            ColorFormat::Glsl => "GLSL vec4",
            ColorFormat::HexInteger => "Hex Integer",
        }
    }

    pub fn category(self) -> Category {
        match self {
            ColorFormat::Hex
            | ColorFormat::HexNoHash
            | ColorFormat::Rgb
            | ColorFormat::Hsb
            | ColorFormat::Cmyk => Category::Generic,
            ColorFormat::CssRgba
            | ColorFormat::CssHsl
            | ColorFormat::CssHsla
            | ColorFormat::CssHwb
            | ColorFormat::CssColor4
            | ColorFormat::CssVariable => Category::Web,
            ColorFormat::SwiftUiColor
            | ColorFormat::SwiftUiHex
            | ColorFormat::UiColorSwift
            | ColorFormat::NsColorSwift
            | ColorFormat::CgColor
            | ColorFormat::CiColor
            | ColorFormat::UiColorObjC
            | ColorFormat::NsColorObjC => Category::Apple,
            ColorFormat::Flutter
            | ColorFormat::FlutterRgbo
            | ColorFormat::AndroidKotlin
            | ColorFormat::AndroidXml
            | ColorFormat::Unity
            | ColorFormat::Godot => Category::CrossPlatform,
            ColorFormat::JsObject | ColorFormat::JsArray | ColorFormat::Tailwind => {
                Category::JavaScript
            }
            ColorFormat::RawFloat | ColorFormat::RawInteger => Category::Design,
            ColorFormat::JavaAwt | ColorFormat::QtQml | ColorFormat::Glsl | ColorFormat::HexInteger => {
                Category::Other
            }
        }
    }

    /// Convertit une couleur dans ce format
    /// Converts a color to this format's string representation
    pub fn format(self, color: &Color) -> String {
        let (r, g, b) = color.to_rgb8();
        let (fr, fg, fb, fa) = (color.red(), color.green(), color.blue(), color.alpha());

        match self {
            ColorFormat::Hex => format!("#{:02X}{:02X}{:02X}", r, g, b),
            ColorFormat::HexNoHash => format!("{:02X}{:02X}{:02X}", r, g, b),
            ColorFormat::Rgb => format!("rgb({}, {}, {})", r, g, b),
            ColorFormat::Hsb => {
                let hsb = color.hsb();
                format!(
                    "hsb({}, {}%, {}%)",
                    degrees(hsb.hue),
                    percent(hsb.saturation),
                    percent(hsb.brightness)
                )
            }
            ColorFormat::Cmyk => {
                let cmyk = color.cmyk();
                format!(
                    "cmyk({}%, {}%, {}%, {}%)",
                    percent(cmyk.cyan),
                    percent(cmyk.magenta),
                    percent(cmyk.yellow),
                    percent(cmyk.black)
                )
            }
            ColorFormat::CssRgba => format!("rgba({}, {}, {}, {})", r, g, b, short(fa)),
            ColorFormat::CssHsl => {
                let hsl = color.hsl();
                format!(
                    "hsl({}, {}%, {}%)",
                    degrees(hsl.hue),
                    percent(hsl.saturation),
                    percent(hsl.lightness)
                )
            }
            ColorFormat::CssHsla => {
                let hsl = color.hsl();
                format!(
                    "hsla({}, {}%, {}%, {})",
                    degrees(hsl.hue),
                    percent(hsl.saturation),
                    percent(hsl.lightness),
                    short(fa)
                )
            }
            ColorFormat::CssHwb => {
                let hwb = color.hwb();
                format!(
                    "hwb({} {}% {}%)",
                    degrees(hwb.hue),
                    percent(hwb.whiteness),
                    percent(hwb.blackness)
                )
            }
            ColorFormat::CssColor4 => format!("rgb({} {} {} / {})", r, g, b, short(fa)),
            ColorFormat::CssVariable => format!("--color: #{:02X}{:02X}{:02X};", r, g, b),
            ColorFormat::SwiftUiColor => format!(
                "Color(red: {:.2}, green: {:.2}, blue: {:.2}, opacity: {:.2})",
                fr, fg, fb, fa
            ),
            ColorFormat::SwiftUiHex => format!("Color(hex: 0x{:02X}{:02X}{:02X})", r, g, b),
            ColorFormat::CgColor => format!(
                "CGColor(red: {:.2}, green: {:.2}, blue: {:.2}, alpha: {:.2})",
                fr, fg, fb, fa
            ),
            ColorFormat::CiColor => format!(
                "CIColor(red: {:.2}, green: {:.2}, blue: {:.2}, alpha: {:.2})",
                fr, fg, fb, fa
            ),
            ColorFormat::UiColorSwift => {
                if color.is_grayscale() {
                    format!("UIColor(white: {:.2}, alpha: {:.2})", fr, fa)
                } else {
                    format!(
                        "UIColor(red: {:.2}, green: {:.2}, blue: {:.2}, alpha: {:.2})",
                        fr, fg, fb, fa
                    )
                }
            }
            ColorFormat::NsColorSwift => {
                if color.is_grayscale() {
                    format!("NSColor(calibratedWhite: {:.2}, alpha: {:.2})", fr, fa)
                } else {
                    format!(
                        "NSColor(calibratedRed: {:.2}, green: {:.2}, blue: {:.2}, alpha: {:.2})",
                        fr, fg, fb, fa
                    )
                }
            }
            ColorFormat::UiColorObjC => {
                if color.is_grayscale() {
                    format!("[UIColor colorWithWhite:{:.2} alpha:{:.2}]", fr, fa)
                } else {
                    format!(
                        "[UIColor colorWithRed:{:.2} green:{:.2} blue:{:.2} alpha:{:.2}]",
                        fr, fg, fb, fa
                    )
                }
            }
            ColorFormat::NsColorObjC => {
                if color.is_grayscale() {
                    format!("[NSColor colorWithCalibratedWhite:{:.2} alpha:{:.2}]", fr, fa)
                } else {
                    format!(
                        "[NSColor colorWithCalibratedRed:{:.2} green:{:.2} blue:{:.2} alpha:{:.2}]",
                        fr, fg, fb, fa
                    )
                }
            }
            ColorFormat::Flutter => {
                format!("Color(0x{:02X}{:02X}{:02X}{:02X})", color.alpha8(), r, g, b)
            }
            ColorFormat::FlutterRgbo => {
                format!("Color.fromRGBO({}, {}, {}, {})", r, g, b, short(fa))
            }
            ColorFormat::AndroidKotlin => {
                format!("Color.argb({}, {}, {}, {})", color.alpha8(), r, g, b)
            }
            ColorFormat::AndroidXml => format!(
                "<color name=\"color\">#{:02X}{:02X}{:02X}{:02X}</color>",
                color.alpha8(),
                r,
                g,
                b
            ),
            ColorFormat::Unity => {
                format!("new Color({:.2}f, {:.2}f, {:.2}f, {:.2}f)", fr, fg, fb, fa)
            }
            ColorFormat::Godot => format!("Color({:.2}, {:.2}, {:.2}, {:.2})", fr, fg, fb, fa),
            ColorFormat::JsObject => {
                format!("{{ r: {}, g: {}, b: {}, a: {} }}", r, g, b, short(fa))
            }
            ColorFormat::Tailwind => format!("bg-[#{:02X}{:02X}{:02X}]", r, g, b),
            ColorFormat::JavaAwt => {
                format!("new Color({}, {}, {}, {})", r, g, b, color.alpha8())
            }
            ColorFormat::QtQml => format!("Qt.rgba({:.2}, {:.2}, {:.2}, {:.2})", fr, fg, fb, fa),
            ColorFormat::JsArray => format!("[{}, {}, {}, {}]", r, g, b, short(fa)),
            ColorFormat::RawFloat => format!("({:.2}, {:.2}, {:.2}, {:.2})", fr, fg, fb, fa),
            ColorFormat::RawInteger => format!("({}, {}, {})", r, g, b),
            ColorFormat::Glsl => format!("vec4({:.2}, {:.2}, {:.2}, {:.2})", fr, fg, fb, fa),
            ColorFormat::HexInteger => format!("0x{:02X}{:02X}{:02X}", r, g, b),
        }
    }
}

/// Whole degrees in [0, 360)
fn degrees(hue: f64) -> u32 {
    (hue.round() as u32) % 360
}

fn percent(value: f64) -> u32 {
    (value * 100.0).round() as u32
}

/// Two decimals at most, trailing zeros dropped ("1", "0.5", "0.25")
fn short(value: f64) -> String {
    let fixed = format!("{:.2}", value);
    fixed.trim_end_matches('0').trim_end_matches('.').to_string()
}

impl Default for ColorFormat {
    fn default() -> Self {
        ColorFormat::Hex
    }
}

impl fmt::Display for ColorFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for ColorFormat {
    type Err = PickerError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase();
        ColorFormat::ALL
            .into_iter()
            .find(|f| f.key() == wanted)
            .ok_or_else(|| PickerError::UnknownFormat(s.to_string()))
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn is_upper_hex(s: &str) -> bool {
        s.len() == 6 && s.chars().all(|c| c.is_ascii_digit() || ('A'..='F').contains(&c))
    }

    #[test]
    fn test_hex_formats() {
        let color = Color::from_rgb8(255, 87, 51);
        assert_eq!(ColorFormat::Hex.format(&color), "#FF5733");
        assert_eq!(ColorFormat::HexNoHash.format(&color), "FF5733");
        assert_eq!(ColorFormat::HexInteger.format(&color), "0xFF5733");
    }

    #[test]
    fn test_hex_pattern_over_a_grid() {
        for step in 0..=20 {
            let v = step as f64 / 20.0;
            let color = Color::rgb(v, 1.0 - v, (v * 3.0) % 1.0);
            let hex = ColorFormat::Hex.format(&color);
            assert!(hex.starts_with('#'));
            assert!(is_upper_hex(&hex[1..]), "{}", hex);
            assert!(is_upper_hex(&ColorFormat::HexNoHash.format(&color)));
        }
    }

    #[test]
    fn test_every_format_is_non_empty_and_deterministic() {
        let colors = [
            Color::BLACK,
            Color::WHITE,
            Color::rgb(0.5, 0.5, 0.5),
            Color::new(0.2, 0.4, 0.6, 0.5),
        ];
        for format in ColorFormat::ALL {
            for color in &colors {
                let first = format.format(color);
                assert!(!first.is_empty());
                assert_eq!(first, format.format(color));
            }
        }
    }

    #[test]
    fn test_rgb_hsb_cmyk() {
        let red = Color::rgb(1.0, 0.0, 0.0);
        assert_eq!(ColorFormat::Rgb.format(&red), "rgb(255, 0, 0)");
        assert_eq!(ColorFormat::Hsb.format(&red), "hsb(0, 100%, 100%)");
        assert_eq!(ColorFormat::Cmyk.format(&red), "cmyk(0%, 100%, 100%, 0%)");
        assert_eq!(ColorFormat::Cmyk.format(&Color::BLACK), "cmyk(0%, 0%, 0%, 100%)");
        assert_eq!(ColorFormat::Cmyk.format(&Color::WHITE), "cmyk(0%, 0%, 0%, 0%)");
    }

    #[test]
    fn test_hue_never_reaches_360() {
        // Hue 359.9 rounds to 360 and must wrap to 0
        let color = Color::rgb(1.0, 0.0, 0.0017);
        assert_eq!(ColorFormat::Hsb.format(&color), "hsb(0, 100%, 100%)");
    }

    #[test]
    fn test_source_literals() {
        let color = Color::rgb(0.93, 0.47, 0.24);
        assert_eq!(
            ColorFormat::UiColorObjC.format(&color),
            "[UIColor colorWithRed:0.93 green:0.47 blue:0.24 alpha:1.00]"
        );
        assert_eq!(
            ColorFormat::UiColorSwift.format(&color),
            "UIColor(red: 0.93, green: 0.47, blue: 0.24, alpha: 1.00)"
        );
        assert_eq!(
            ColorFormat::NsColorObjC.format(&color),
            "[NSColor colorWithCalibratedRed:0.93 green:0.47 blue:0.24 alpha:1.00]"
        );
        assert_eq!(
            ColorFormat::NsColorSwift.format(&color),
            "NSColor(calibratedRed: 0.93, green: 0.47, blue: 0.24, alpha: 1.00)"
        );
    }

    #[test]
    fn test_grayscale_literals_use_white() {
        let gray = Color::rgb(0.25, 0.25, 0.25);
        assert_eq!(ColorFormat::UiColorObjC.format(&gray), "[UIColor colorWithWhite:0.25 alpha:1.00]");
        assert_eq!(ColorFormat::UiColorSwift.format(&gray), "UIColor(white: 0.25, alpha: 1.00)");
        assert_eq!(
            ColorFormat::NsColorObjC.format(&gray),
            "[NSColor colorWithCalibratedWhite:0.25 alpha:1.00]"
        );
        assert_eq!(
            ColorFormat::NsColorSwift.format(&gray),
            "NSColor(calibratedWhite: 0.25, alpha: 1.00)"
        );
    }

    #[test]
    fn test_web_formats() {
        let color = Color::new(1.0, 0.0, 0.0, 0.5);
        assert_eq!(ColorFormat::CssRgba.format(&color), "rgba(255, 0, 0, 0.5)");
        assert_eq!(ColorFormat::CssHsl.format(&color), "hsl(0, 100%, 50%)");
        assert_eq!(ColorFormat::CssHsla.format(&color), "hsla(0, 100%, 50%, 0.5)");
        assert_eq!(ColorFormat::CssHwb.format(&Color::rgb(0.0, 0.0, 1.0)), "hwb(240 0% 0%)");
        assert_eq!(ColorFormat::JsArray.format(&Color::WHITE), "[255, 255, 255, 1]");
    }

    #[test]
    fn test_other_formats() {
        let color = Color::from_rgb8(255, 87, 51);
        assert_eq!(ColorFormat::Flutter.format(&color), "Color(0xFFFF5733)");
        assert_eq!(ColorFormat::RawInteger.format(&color), "(255, 87, 51)");
        assert_eq!(ColorFormat::Glsl.format(&Color::WHITE), "vec4(1.00, 1.00, 1.00, 1.00)");
        assert_eq!(ColorFormat::RawFloat.format(&Color::BLACK), "(0.00, 0.00, 0.00, 1.00)");
        assert_eq!(ColorFormat::JavaAwt.format(&color), "new Color(255, 87, 51, 255)");
        assert_eq!(ColorFormat::QtQml.format(&color), "Qt.rgba(1.00, 0.34, 0.20, 1.00)");
    }

    #[test]
    fn test_css_level4_and_variable() {
        let color = Color::from_rgb8(255, 87, 51);
        assert_eq!(ColorFormat::CssColor4.format(&color), "rgb(255 87 51 / 1)");
        assert_eq!(
            ColorFormat::CssColor4.format(&Color::new(1.0, 0.0, 0.0, 0.5)),
            "rgb(255 0 0 / 0.5)"
        );
        assert_eq!(ColorFormat::CssVariable.format(&color), "--color: #FF5733;");
    }

    #[test]
    fn test_apple_framework_literals() {
        let color = Color::from_rgb8(255, 87, 51);
        assert_eq!(ColorFormat::SwiftUiHex.format(&color), "Color(hex: 0xFF5733)");
        assert_eq!(
            ColorFormat::CgColor.format(&color),
            "CGColor(red: 1.00, green: 0.34, blue: 0.20, alpha: 1.00)"
        );
        assert_eq!(
            ColorFormat::CiColor.format(&color),
            "CIColor(red: 1.00, green: 0.34, blue: 0.20, alpha: 1.00)"
        );
    }

    #[test]
    fn test_cross_platform_formats() {
        let color = Color::from_rgb8(255, 87, 51);
        assert_eq!(ColorFormat::FlutterRgbo.format(&color), "Color.fromRGBO(255, 87, 51, 1)");
        assert_eq!(ColorFormat::AndroidKotlin.format(&color), "Color.argb(255, 255, 87, 51)");
        assert_eq!(
            ColorFormat::AndroidXml.format(&color),
            "<color name=\"color\">#FFFF5733</color>"
        );
        assert_eq!(ColorFormat::Unity.format(&color), "new Color(1.00f, 0.34f, 0.20f, 1.00f)");
        assert_eq!(ColorFormat::Godot.format(&color), "Color(1.00, 0.34, 0.20, 1.00)");
        assert_eq!(
            ColorFormat::AndroidXml.format(&Color::from_rgba8(0, 0, 0, 128)),
            "<color name=\"color\">#80000000</color>"
        );
    }

    #[test]
    fn test_javascript_formats() {
        let color = Color::from_rgb8(255, 87, 51);
        assert_eq!(ColorFormat::JsObject.format(&color), "{ r: 255, g: 87, b: 51, a: 1 }");
        assert_eq!(ColorFormat::Tailwind.format(&color), "bg-[#FF5733]");
    }

    #[test]
    fn test_ids_and_keys_are_unique() {
        for (i, a) in ColorFormat::ALL.iter().enumerate() {
            for b in &ColorFormat::ALL[i + 1..] {
                assert_ne!(a.id(), b.id());
                assert_ne!(a.key(), b.key());
            }
            assert_eq!(ColorFormat::from_id(a.id()), Some(*a));
            assert_eq!(a.key().parse::<ColorFormat>().unwrap(), *a);
        }
        assert_eq!(ColorFormat::from_id(99), None);
        assert!("bogus".parse::<ColorFormat>().is_err());
    }

    #[test]
    fn test_categories_cover_all_formats() {
        let total: usize = Category::ALL.iter().map(|c| c.formats().count()).sum();
        assert_eq!(total, ColorFormat::ALL.len());
        assert_eq!(Category::Generic.formats().next(), Some(ColorFormat::Hex));
    }
}
