// =============================================================================
// formats.rs - Properties every format must hold
// =============================================================================

use picker_lib::{Color, ColorFormat};

fn sample_colors() -> Vec<Color> {
    let mut colors = vec![Color::BLACK, Color::WHITE, Color::rgb(0.5, 0.5, 0.5)];
    for r in (0..=255).step_by(51) {
        for g in (0..=255).step_by(85) {
            for b in (0..=255).step_by(127) {
                colors.push(Color::from_rgb8(r as u8, g as u8, b as u8));
            }
        }
    }
    colors.push(Color::new(0.2, 0.4, 0.6, 0.5));
    colors
}

#[test]
fn every_format_is_deterministic_and_non_empty() {
    for color in sample_colors() {
        for format in ColorFormat::ALL {
            let first = format.format(&color);
            assert!(!first.is_empty(), "{:?} produced nothing", format);
            assert_eq!(first, format.format(&color));
        }
    }
}

#[test]
fn hex_is_six_uppercase_digits() {
    for color in sample_colors() {
        let hex = ColorFormat::Hex.format(&color);
        let digits = hex.strip_prefix('#').unwrap();
        assert_eq!(digits.len(), 6);
        assert!(digits.chars().all(|c| c.is_ascii_digit() || ('A'..='F').contains(&c)));
        assert_eq!(ColorFormat::HexNoHash.format(&color), digits);
    }
}

#[test]
fn hex_round_trips_8_bit_colors() {
    for color in sample_colors().into_iter().filter(|c| c.alpha() == 1.0) {
        let hex = ColorFormat::Hex.format(&color);
        let parsed: Color = hex.parse().unwrap();
        assert_eq!(parsed.to_rgb8(), color.to_rgb8());
    }
}

#[test]
fn cmyk_extremes() {
    assert_eq!(ColorFormat::Cmyk.format(&Color::BLACK), "cmyk(0%, 0%, 0%, 100%)");
    assert_eq!(ColorFormat::Cmyk.format(&Color::WHITE), "cmyk(0%, 0%, 0%, 0%)");
}

#[test]
fn hsb_of_pure_red() {
    assert_eq!(ColorFormat::Hsb.format(&Color::rgb(1.0, 0.0, 0.0)), "hsb(0, 100%, 100%)");
}

#[test]
fn format_ids_and_keys_round_trip() {
    for format in ColorFormat::ALL {
        assert_eq!(ColorFormat::from_id(format.id()), Some(format));
        assert_eq!(format.key().parse::<ColorFormat>().unwrap(), format);
    }
}
