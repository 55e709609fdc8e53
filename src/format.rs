//! Serialization of colors back into CSS functional notation.

use colorgate_color::{Color, LchVariant, Rgb, format_css, format_rgb_fast};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::Converter;

/// Rounds to the nearest integer, ties towards positive infinity.
fn js_round(value: f64) -> f64 {
    let rounded = value.round();
    let rounded = if (rounded - value).abs() == 0.5 {
        value.floor() + 1.0
    } else {
        rounded
    };
    // No `-0` in the output.
    rounded + 0.0
}

/// Rounds to two decimals in two stages, so values like `63.999999999999993`
/// come out as `64` instead of carrying float noise.
fn clean(value: f64) -> f64 {
    let fixed = format!("{:.2}", value * 100.0);
    let scaled = fixed.parse::<f64>().unwrap_or(value * 100.0);
    js_round(scaled) / 100.0
}

fn to_percent(value: f64) -> String {
    format!("{}%", clean(100.0 * value))
}

fn channel(value: f64) -> f64 {
    js_round(25500.0 * value) / 100.0
}

/// Formats RGB channels as `rgb(r, g, b)` on the 0 to 255 scale.
///
/// Channels keep up to two decimals and are not clipped. Translucent colors
/// use `rgba(r, g, b, alpha)`.
#[must_use]
pub fn format_rgb(color: &Rgb) -> String {
    let (r, g, b) = (channel(color.r), channel(color.g), channel(color.b));
    match color.alpha {
        Some(alpha) if alpha < 1.0 => format!("rgba({r}, {g}, {b}, {alpha})"),
        _ => format!("rgb({r}, {g}, {b})"),
    }
}

/// Formats a color as `oklch(…)` or `lch(…)`.
///
/// LCH and OKLCH colors keep their own variant; anything else is projected
/// into the working variant of the [`global`](crate::global()) context first,
/// which is OKLCH unless `COLORGATE_COLOR_FN` says otherwise.
#[must_use]
pub fn format_lch(color: &Color) -> String {
    let variant = LchVariant::from_mode(color.mode())
        .unwrap_or_else(|| crate::global().converter().working());
    format_lch_as(variant, color)
}

/// Formats a color in the given cylindrical variant.
///
/// Lightness is written as a percentage of the variant's maximum, chroma and
/// hue as plain numbers. A missing or NaN hue is written as `none`.
#[must_use]
pub fn format_lch_as(variant: LchVariant, color: &Color) -> String {
    let lch = color.to_lch(variant);
    let lightness = to_percent(lch.l / variant.l_max());
    let hue = lch
        .h
        .filter(|h| h.is_finite())
        .map_or_else(|| "none".to_owned(), |h| h.to_string());
    let postfix = match lch.alpha {
        Some(alpha) if alpha < 1.0 => format!(" / {}", to_percent(alpha)),
        _ => String::new(),
    };
    format!("{}({lightness} {} {hue}{postfix})", variant.name(), lch.c)
}

/// How [`crate::format()`] serializes colors.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Formatter {
    /// Clipped integer `rgb(…)` in sRGB.
    #[default]
    FastRgb,
    /// `color(display-p3 …)` with unclamped channels.
    DisplayP3,
}

impl Formatter {
    /// The formatter matching a display's P3 capability.
    #[must_use]
    pub const fn for_support(has_p3: bool) -> Self {
        if has_p3 { Self::DisplayP3 } else { Self::FastRgb }
    }

    /// Serializes `color`.
    ///
    /// # Panics
    ///
    /// Panics if the color's mode is not registered with `converter`.
    #[must_use]
    #[track_caller]
    pub fn format(self, converter: &Converter, color: &Color) -> String {
        match self {
            Self::FastRgb => format_rgb_fast(&Color::Rgb(converter.rgb(color))),
            Self::DisplayP3 => format_css(&Color::P3(converter.p3(color))),
        }
    }
}
