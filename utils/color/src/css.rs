use core::fmt::Write;

use crate::{Color, Mode, clip_unit};

fn alpha_suffix(alpha: Option<f64>) -> String {
    match alpha {
        Some(alpha) if alpha < 1.0 => format!(" / {alpha}"),
        _ => String::new(),
    }
}

// A NaN or infinite hue carries no information, like a missing one.
fn hue(h: Option<f64>) -> String {
    h.filter(|h| h.is_finite()).map_or_else(|| "none".to_owned(), |h| h.to_string())
}

/// Serializes a color in its own space using CSS syntax.
///
/// RGB-like colors use `color(srgb …)`, `color(display-p3 …)` or
/// `color(rec2020 …)`. Channels are written as-is, so out-of-gamut values
/// survive serialization.
#[must_use]
pub fn format_css(color: &Color) -> String {
    let alpha = alpha_suffix(color.alpha());
    match color {
        Color::Rgb(c) => format!("color(srgb {} {} {}{alpha})", c.r, c.g, c.b),
        Color::P3(c) => format!("color(display-p3 {} {} {}{alpha})", c.r, c.g, c.b),
        Color::Rec2020(c) => format!("color(rec2020 {} {} {}{alpha})", c.r, c.g, c.b),
        Color::Hsl(c) => format!(
            "hsl({} {}% {}%{alpha})",
            hue(c.h),
            c.s * 100.0,
            c.l * 100.0
        ),
        Color::Lab(c) => format!("lab({}% {} {}{alpha})", c.l, c.a, c.b),
        Color::Lch(c) => format!("lch({}% {} {}{alpha})", c.l, c.c, hue(c.h)),
        Color::Oklab(c) => format!("oklab({} {} {}{alpha})", c.l, c.a, c.b),
        Color::Oklch(c) => format!("oklch({} {} {}{alpha})", c.l, c.c, hue(c.h)),
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_byte(value: f64) -> u8 {
    (clip_unit(value) * 255.0).round() as u8
}

fn srgb_bytes(color: &Color) -> [u8; 3] {
    let projected = color.to_mode(Mode::Rgb);
    projected
        .as_rgb()
        .map_or([0; 3], |rgb| [to_byte(rgb.r), to_byte(rgb.g), to_byte(rgb.b)])
}

/// Formats a color as `#rrggbb`, or `#rrggbbaa` when it is translucent.
///
/// The color is projected into sRGB and clipped first.
#[must_use]
pub fn format_hex(color: &Color) -> String {
    let mut hex = String::with_capacity(9);
    hex.push('#');
    for byte in srgb_bytes(color) {
        let _ = write!(hex, "{byte:02x}");
    }
    if let Some(alpha) = color.alpha().filter(|alpha| *alpha < 1.0) {
        let _ = write!(hex, "{:02x}", to_byte(alpha));
    }
    hex
}

/// Formats a color as `rgb(r, g, b)` with integer channels.
///
/// The color is projected into sRGB and clipped. Translucent colors use
/// `rgba(r, g, b, a)` with alpha rounded to two decimals.
#[must_use]
pub fn format_rgb_fast(color: &Color) -> String {
    let [r, g, b] = srgb_bytes(color);
    match color.alpha() {
        Some(alpha) if alpha < 1.0 => {
            let alpha = (clip_unit(alpha) * 100.0).round() / 100.0;
            format!("rgba({r}, {g}, {b}, {alpha})")
        }
        _ => format!("rgb({r}, {g}, {b})"),
    }
}
