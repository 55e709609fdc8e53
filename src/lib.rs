#![doc = include_str!("../README.md")]
#![allow(clippy::multiple_crate_versions)]

mod config;
mod context;
mod convert;
mod format;
mod gamut;
pub mod logging;
mod parse;
mod registry;
mod visibility;

/// The numerical color library: color types, conversions and CSS syntax.
pub use colorgate_color as color;
#[doc(inline)]
pub use colorgate_color::{
    Color, HexColorError, Lch, LchVariant, Mode, Rgb, clamp_chroma, format_css, format_hex,
    format_rgb_fast, parse_hex,
};

pub use config::{COLOR_FN_VAR, Config, ConfigError, P3_VAR, REC2020_VAR};
pub use context::{CapabilityProbe, RenderingContext, format, global, set_color_support};
pub use convert::{Converter, Space};
pub use format::{Formatter, format_lch, format_lch_as, format_rgb};
pub use gamut::{Gamut, in_gamut, in_p3, in_rec2020, in_rgb};
pub use parse::{build, build_in, build_opaque, parse};
pub use registry::Registry;
pub use visibility::{
    ColorSupport, GetAlpha, IsVisible, OPAQUE, OUT_OF_GAMUT_ALPHA, VisibilityPolicy,
    WIDE_GAMUT_ALPHA, generate_get_alpha, generate_is_visible,
};

/// Converts `color` into sRGB, clamping chroma in the working space of the
/// [`global`] context first.
///
/// # Panics
///
/// Panics if the color's mode is not registered in the standard registry.
#[must_use]
#[track_caller]
pub fn to_rgb(color: &Color) -> Rgb {
    global().converter().to_rgb(color)
}
