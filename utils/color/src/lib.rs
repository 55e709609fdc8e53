//! # Color spaces
//!
//! Numerical color-space library used by the gamut engine. It provides tagged
//! color values for sRGB, Display P3, Rec.2020, HSL, CIE Lab/LCH and
//! OKLab/OKLCH, conversions between all of them through CIE XYZ (D65),
//! chroma clamping into an RGB gamut, and CSS color syntax in both directions.
//!
//! Component values are never clamped on construction. An sRGB channel of
//! `1.2` is meaningful: it says the color lies outside the sRGB gamut.
//!
//! ```
//! use colorgate_color::{Color, Mode};
//!
//! let red = Color::rgb(1.0, 0.0, 0.0);
//! let p3 = red.to_mode(Mode::P3);
//! assert_eq!(p3.mode(), Mode::P3);
//! ```

mod clamp;
pub use clamp::clamp_chroma;
mod css;
pub use css::{format_css, format_hex, format_rgb_fast};
mod hsl;
mod lab;
mod oklch;
mod p3;
mod parse;
pub use parse::{parse_css, parse_hex};
mod rec2020;
mod srgb;

use core::fmt::{self, Display};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Identifies the color space a [`Color`] is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Mode {
    /// Gamma-encoded sRGB.
    Rgb,
    /// Gamma-encoded Display P3.
    P3,
    /// Rec.2020 with its own transfer function.
    Rec2020,
    /// Cylindrical form of sRGB.
    Hsl,
    /// CIE Lab (D50).
    Lab,
    /// Cylindrical CIE Lab (D50).
    Lch,
    /// OKLab.
    Oklab,
    /// Cylindrical OKLab.
    Oklch,
}

impl Mode {
    /// Every mode known to this library.
    pub const ALL: [Self; 8] = [
        Self::Rgb,
        Self::P3,
        Self::Rec2020,
        Self::Hsl,
        Self::Lab,
        Self::Lch,
        Self::Oklab,
        Self::Oklch,
    ];

    /// Short identifier of the mode, e.g. `"oklch"`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Rgb => "rgb",
            Self::P3 => "p3",
            Self::Rec2020 => "rec2020",
            Self::Hsl => "hsl",
            Self::Lab => "lab",
            Self::Lch => "lch",
            Self::Oklab => "oklab",
            Self::Oklch => "oklch",
        }
    }

    /// Whether colors in this mode are stored as `r, g, b` channels.
    #[must_use]
    pub const fn is_rgb_like(self) -> bool {
        matches!(self, Self::Rgb | Self::P3 | Self::Rec2020)
    }
}

impl Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The two cylindrical Lab variants a working color can be expressed in.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum LchVariant {
    /// OKLCH, lightness in `0..=1`.
    #[default]
    Oklch,
    /// CIE LCH, lightness in `0..=100`.
    Lch,
}

impl LchVariant {
    /// The mode colors of this variant carry.
    #[must_use]
    pub const fn mode(self) -> Mode {
        match self {
            Self::Oklch => Mode::Oklch,
            Self::Lch => Mode::Lch,
        }
    }

    /// Function name used in functional notation.
    #[must_use]
    pub const fn name(self) -> &'static str {
        self.mode().name()
    }

    /// Maximum lightness of the variant.
    #[must_use]
    pub const fn l_max(self) -> f64 {
        match self {
            Self::Oklch => 1.0,
            Self::Lch => 100.0,
        }
    }

    /// Reference chroma range, used as the chroma search resolution base.
    #[must_use]
    pub const fn chroma_max(self) -> f64 {
        match self {
            Self::Oklch => 0.4,
            Self::Lch => 150.0,
        }
    }

    /// Wraps LCH components into a color of this variant.
    #[must_use]
    pub const fn color(self, lch: Lch) -> Color {
        match self {
            Self::Oklch => Color::Oklch(lch),
            Self::Lch => Color::Lch(lch),
        }
    }

    /// Returns the variant a mode belongs to, if it is cylindrical Lab.
    #[must_use]
    pub const fn from_mode(mode: Mode) -> Option<Self> {
        match mode {
            Mode::Oklch => Some(Self::Oklch),
            Mode::Lch => Some(Self::Lch),
            _ => None,
        }
    }
}

/// Channels of an RGB-like color (sRGB, Display P3 or Rec.2020).
///
/// Values are nominally in `0.0..=1.0`; anything outside marks the color as
/// out of gamut for its space.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rgb {
    /// Red channel.
    pub r: f64,
    /// Green channel.
    pub g: f64,
    /// Blue channel.
    pub b: f64,
    /// Opacity, `None` means fully opaque.
    pub alpha: Option<f64>,
}

impl Rgb {
    /// Creates opaque RGB channels.
    #[must_use]
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self {
            r,
            g,
            b,
            alpha: None,
        }
    }

    /// Whether every channel lies in the closed interval `[0, 1]`.
    #[must_use]
    pub fn displayable(&self) -> bool {
        [self.r, self.g, self.b]
            .iter()
            .all(|channel| (0.0..=1.0).contains(channel))
    }

    /// Clips each channel into `[0, 1]`. NaN becomes 0.
    #[must_use]
    pub fn clip(self) -> Self {
        Self {
            r: clip_unit(self.r),
            g: clip_unit(self.g),
            b: clip_unit(self.b),
            alpha: self.alpha,
        }
    }

    const fn channels(&self) -> Vec3 {
        [self.r, self.g, self.b]
    }

    const fn from_channels([r, g, b]: Vec3, alpha: Option<f64>) -> Self {
        Self { r, g, b, alpha }
    }
}

/// Hue, saturation and lightness over gamma-encoded sRGB.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Hsl {
    /// Hue in degrees, `None` for achromatic colors.
    pub h: Option<f64>,
    /// Saturation in `0..=1`.
    pub s: f64,
    /// Lightness in `0..=1`.
    pub l: f64,
    /// Opacity, `None` means fully opaque.
    pub alpha: Option<f64>,
}

/// Rectangular Lab components, shared by CIE Lab and OKLab.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Lab {
    /// Lightness.
    pub l: f64,
    /// Green-red axis.
    pub a: f64,
    /// Blue-yellow axis.
    pub b: f64,
    /// Opacity, `None` means fully opaque.
    pub alpha: Option<f64>,
}

/// Cylindrical Lab components, shared by CIE LCH and OKLCH.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Lch {
    /// Lightness, `0..=1` for OKLCH and `0..=100` for CIE LCH.
    pub l: f64,
    /// Chroma, non-negative and unbounded above.
    pub c: f64,
    /// Hue in degrees, `None` for achromatic colors.
    pub h: Option<f64>,
    /// Opacity, `None` means fully opaque.
    pub alpha: Option<f64>,
}

impl Lch {
    /// Creates opaque LCH components.
    #[must_use]
    pub const fn new(l: f64, c: f64, h: Option<f64>) -> Self {
        Self {
            l,
            c,
            h,
            alpha: None,
        }
    }
}

/// A color tagged with the space it is expressed in.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "mode", rename_all = "lowercase"))]
pub enum Color {
    /// sRGB.
    Rgb(Rgb),
    /// Display P3.
    P3(Rgb),
    /// Rec.2020.
    Rec2020(Rgb),
    /// HSL over sRGB.
    Hsl(Hsl),
    /// CIE Lab.
    Lab(Lab),
    /// CIE LCH.
    Lch(Lch),
    /// OKLab.
    Oklab(Lab),
    /// OKLCH.
    Oklch(Lch),
}

impl Default for Color {
    fn default() -> Self {
        Self::rgb(0.0, 0.0, 0.0)
    }
}

/// Errors that can occur when parsing hexadecimal color strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HexColorError {
    /// The string does not have 3, 4, 6 or 8 hexadecimal digits.
    InvalidLength,
    /// A non-hexadecimal character was encountered at the provided index.
    InvalidDigit(usize),
}

impl Display for HexColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLength => f.write_str("expected 3, 4, 6 or 8 hexadecimal digits"),
            Self::InvalidDigit(index) => {
                write!(f, "invalid hexadecimal digit at byte index {index}")
            }
        }
    }
}

impl std::error::Error for HexColorError {}

impl Color {
    /// Opaque sRGB color.
    #[must_use]
    pub const fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self::Rgb(Rgb::new(r, g, b))
    }

    /// Opaque Display P3 color.
    #[must_use]
    pub const fn p3(r: f64, g: f64, b: f64) -> Self {
        Self::P3(Rgb::new(r, g, b))
    }

    /// Opaque Rec.2020 color.
    #[must_use]
    pub const fn rec2020(r: f64, g: f64, b: f64) -> Self {
        Self::Rec2020(Rgb::new(r, g, b))
    }

    /// Opaque CIE LCH color.
    #[must_use]
    pub const fn lch(l: f64, c: f64, h: f64) -> Self {
        Self::Lch(Lch::new(l, c, Some(h)))
    }

    /// Opaque OKLCH color.
    #[must_use]
    pub const fn oklch(l: f64, c: f64, h: f64) -> Self {
        Self::Oklch(Lch::new(l, c, Some(h)))
    }

    /// The space this color is expressed in.
    #[must_use]
    pub const fn mode(&self) -> Mode {
        match self {
            Self::Rgb(_) => Mode::Rgb,
            Self::P3(_) => Mode::P3,
            Self::Rec2020(_) => Mode::Rec2020,
            Self::Hsl(_) => Mode::Hsl,
            Self::Lab(_) => Mode::Lab,
            Self::Lch(_) => Mode::Lch,
            Self::Oklab(_) => Mode::Oklab,
            Self::Oklch(_) => Mode::Oklch,
        }
    }

    /// Alpha channel, `None` when the color is fully opaque.
    #[must_use]
    pub const fn alpha(&self) -> Option<f64> {
        match self {
            Self::Rgb(c) | Self::P3(c) | Self::Rec2020(c) => c.alpha,
            Self::Hsl(c) => c.alpha,
            Self::Lab(c) | Self::Oklab(c) => c.alpha,
            Self::Lch(c) | Self::Oklch(c) => c.alpha,
        }
    }

    /// Opacity in `0..=1`, treating an absent alpha as 1.
    #[must_use]
    pub fn opacity(&self) -> f64 {
        self.alpha().unwrap_or(1.0)
    }

    /// Returns a copy of this color with the provided alpha.
    #[must_use]
    pub const fn with_alpha(mut self, alpha: Option<f64>) -> Self {
        match &mut self {
            Self::Rgb(c) | Self::P3(c) | Self::Rec2020(c) => c.alpha = alpha,
            Self::Hsl(c) => c.alpha = alpha,
            Self::Lab(c) | Self::Oklab(c) => c.alpha = alpha,
            Self::Lch(c) | Self::Oklch(c) => c.alpha = alpha,
        }
        self
    }

    /// RGB channels, if this is an RGB-like color.
    #[must_use]
    pub const fn as_rgb(&self) -> Option<&Rgb> {
        match self {
            Self::Rgb(c) | Self::P3(c) | Self::Rec2020(c) => Some(c),
            _ => None,
        }
    }

    /// LCH components, if this is a cylindrical Lab color.
    #[must_use]
    pub const fn as_lch(&self) -> Option<&Lch> {
        match self {
            Self::Lch(c) | Self::Oklch(c) => Some(c),
            _ => None,
        }
    }

    /// Projects this color into the cylindrical Lab `variant`.
    #[must_use]
    pub fn to_lch(&self, variant: LchVariant) -> Lch {
        match (self, variant) {
            (Self::Oklch(c), LchVariant::Oklch) | (Self::Lch(c), LchVariant::Lch) => *c,
            (Self::Oklab(c), LchVariant::Oklch) | (Self::Lab(c), LchVariant::Lch) => {
                rect_to_polar([c.l, c.a, c.b], c.alpha)
            }
            (_, LchVariant::Oklch) => {
                rect_to_polar(oklch::from_xyz65(self.to_xyz65()), self.alpha())
            }
            (_, LchVariant::Lch) => rect_to_polar(lab::from_xyz65(self.to_xyz65()), self.alpha()),
        }
    }

    /// sRGB channels of this color, unclamped.
    #[must_use]
    pub fn to_srgb(&self) -> Rgb {
        match self {
            Self::Rgb(c) => *c,
            Self::Hsl(c) => Rgb::from_channels(hsl::to_srgb(c), c.alpha),
            _ => Rgb::from_channels(srgb::from_xyz65(self.to_xyz65()), self.alpha()),
        }
    }

    /// Display P3 channels of this color, unclamped.
    #[must_use]
    pub fn to_p3(&self) -> Rgb {
        match self {
            Self::P3(c) => *c,
            _ => Rgb::from_channels(p3::from_xyz65(self.to_xyz65()), self.alpha()),
        }
    }

    /// Rec.2020 channels of this color, unclamped.
    #[must_use]
    pub fn to_rec2020(&self) -> Rgb {
        match self {
            Self::Rec2020(c) => *c,
            _ => Rgb::from_channels(rec2020::from_xyz65(self.to_xyz65()), self.alpha()),
        }
    }

    /// Converts this color into CIE XYZ with a D65 white point.
    #[must_use]
    pub fn to_xyz65(&self) -> Vec3 {
        match self {
            Self::Rgb(c) => srgb::to_xyz65(c.channels()),
            Self::P3(c) => p3::to_xyz65(c.channels()),
            Self::Rec2020(c) => rec2020::to_xyz65(c.channels()),
            Self::Hsl(c) => srgb::to_xyz65(hsl::to_srgb(c)),
            Self::Lab(c) => lab::to_xyz65([c.l, c.a, c.b]),
            Self::Lch(c) => lab::to_xyz65(polar_to_rect(c)),
            Self::Oklab(c) => oklch::to_xyz65([c.l, c.a, c.b]),
            Self::Oklch(c) => oklch::to_xyz65(polar_to_rect(c)),
        }
    }

    /// Builds a color in `mode` from CIE XYZ (D65) coordinates.
    #[must_use]
    pub fn from_xyz65(mode: Mode, xyz: Vec3, alpha: Option<f64>) -> Self {
        match mode {
            Mode::Rgb => Self::Rgb(Rgb::from_channels(srgb::from_xyz65(xyz), alpha)),
            Mode::P3 => Self::P3(Rgb::from_channels(p3::from_xyz65(xyz), alpha)),
            Mode::Rec2020 => Self::Rec2020(Rgb::from_channels(rec2020::from_xyz65(xyz), alpha)),
            Mode::Hsl => Self::Hsl(hsl::from_srgb(srgb::from_xyz65(xyz), alpha)),
            Mode::Lab => Self::Lab(rect(lab::from_xyz65(xyz), alpha)),
            Mode::Lch => Self::Lch(rect_to_polar(lab::from_xyz65(xyz), alpha)),
            Mode::Oklab => Self::Oklab(rect(oklch::from_xyz65(xyz), alpha)),
            Mode::Oklch => Self::Oklch(rect_to_polar(oklch::from_xyz65(xyz), alpha)),
        }
    }

    /// Projects this color into `mode`.
    ///
    /// Converting into the color's own mode is the identity, so channel
    /// values stay bit-exact. Nothing is clamped.
    #[must_use]
    pub fn to_mode(&self, mode: Mode) -> Self {
        if self.mode() == mode {
            return *self;
        }
        match (self, mode) {
            // Same underlying Lab, no need to leave the space.
            (Self::Lab(c), Mode::Lch) => Self::Lch(rect_to_polar([c.l, c.a, c.b], c.alpha)),
            (Self::Lch(c), Mode::Lab) => Self::Lab(rect(polar_to_rect(c), c.alpha)),
            (Self::Oklab(c), Mode::Oklch) => Self::Oklch(rect_to_polar([c.l, c.a, c.b], c.alpha)),
            (Self::Oklch(c), Mode::Oklab) => Self::Oklab(rect(polar_to_rect(c), c.alpha)),
            (Self::Hsl(c), Mode::Rgb) => Self::Rgb(Rgb::from_channels(hsl::to_srgb(c), c.alpha)),
            (Self::Rgb(c), Mode::Hsl) => Self::Hsl(hsl::from_srgb(c.channels(), c.alpha)),
            _ => Self::from_xyz65(mode, self.to_xyz65(), self.alpha()),
        }
    }
}

/// Three color coordinates, e.g. CIE XYZ.
pub type Vec3 = [f64; 3];
pub(crate) type Matrix3 = [[f64; 3]; 3];

#[allow(clippy::suboptimal_flops)]
pub(crate) fn multiply(m: &Matrix3, v: Vec3) -> Vec3 {
    [
        m[0][0] * v[0] + m[0][1] * v[1] + m[0][2] * v[2],
        m[1][0] * v[0] + m[1][1] * v[1] + m[1][2] * v[2],
        m[2][0] * v[0] + m[2][1] * v[1] + m[2][2] * v[2],
    ]
}

// Inverse through the adjugate; the forward matrices are well conditioned.
#[allow(clippy::suboptimal_flops, clippy::many_single_char_names)]
pub(crate) const fn invert(m: Matrix3) -> Matrix3 {
    let [[a, b, c], [d, e, f], [g, h, i]] = m;
    let co_a = e * i - f * h;
    let co_b = f * g - d * i;
    let co_c = d * h - e * g;
    let det = a * co_a + b * co_b + c * co_c;
    [
        [co_a / det, (c * h - b * i) / det, (b * f - c * e) / det],
        [co_b / det, (a * i - c * g) / det, (c * d - a * f) / det],
        [co_c / det, (b * g - a * h) / det, (a * e - b * d) / det],
    ]
}

pub(crate) fn normalize_hue(mut hue: f64) -> f64 {
    hue %= 360.0;
    if hue < 0.0 {
        hue += 360.0;
    }
    hue
}

pub(crate) fn clip_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

const fn rect([l, a, b]: Vec3, alpha: Option<f64>) -> Lab {
    Lab { l, a, b, alpha }
}

// A missing hue is read as 0 degrees.
fn polar_to_rect(lch: &Lch) -> Vec3 {
    let hue = lch.h.filter(|h| h.is_finite()).unwrap_or(0.0).to_radians();
    let (sin, cos) = hue.sin_cos();
    [lch.l, lch.c * cos, lch.c * sin]
}

fn rect_to_polar([l, a, b]: Vec3, alpha: Option<f64>) -> Lch {
    let c = a.hypot(b);
    let h = (c != 0.0).then(|| normalize_hue(b.atan2(a).to_degrees()));
    Lch { l, c, h, alpha }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const EPSILON: f64 = 1e-9;
    const EPSILON_WIDE: f64 = 1e-6;

    fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() <= tol
    }

    fn assert_rgb_close(actual: &Color, expected: [f64; 3], tol: f64) {
        let rgb = actual.as_rgb().expect("rgb-like color");
        for (got, want) in [rgb.r, rgb.g, rgb.b].into_iter().zip(expected) {
            assert!(approx_eq(got, want, tol), "got {rgb:?}, expected {expected:?}");
        }
    }

    #[test]
    fn same_mode_projection_is_identity() {
        let color = Color::rgb(1.0, 1.0, 0.0);
        assert_eq!(color.to_mode(Mode::Rgb), color);

        let out_of_range = Color::p3(1.2, -0.1, 0.5);
        assert_eq!(out_of_range.to_mode(Mode::P3), out_of_range);
    }

    #[test]
    fn white_and_black_survive_every_space() {
        for mode in Mode::ALL {
            let white = Color::rgb(1.0, 1.0, 1.0).to_mode(mode).to_mode(Mode::Rgb);
            assert_rgb_close(&white, [1.0, 1.0, 1.0], EPSILON_WIDE);

            let black = Color::rgb(0.0, 0.0, 0.0).to_mode(mode).to_mode(Mode::Rgb);
            assert_rgb_close(&black, [0.0, 0.0, 0.0], EPSILON_WIDE);
        }
    }

    #[test]
    fn srgb_red_in_p3_matches_reference() {
        // CSS Color 4: color(srgb 1 0 0) == color(display-p3 0.9175 0.2003 0.1386)
        let p3 = Color::rgb(1.0, 0.0, 0.0).to_mode(Mode::P3);
        assert_rgb_close(&p3, [0.917_487_5, 0.200_286_7, 0.138_611_2], 1e-4);
    }

    #[test]
    fn p3_red_is_outside_srgb() {
        let srgb = Color::p3(1.0, 0.0, 0.0).to_mode(Mode::Rgb);
        let rgb = srgb.as_rgb().unwrap();
        assert!(rgb.r > 1.0);
        assert!(rgb.g < 0.0);
        assert!(!rgb.displayable());
    }

    #[test]
    fn srgb_red_in_oklch_matches_reference() {
        let oklch = Color::rgb(1.0, 0.0, 0.0).to_mode(Mode::Oklch);
        let lch = oklch.as_lch().unwrap();
        assert!(approx_eq(lch.l, 0.627_955, 1e-4));
        assert!(approx_eq(lch.c, 0.257_683, 1e-4));
        assert!(approx_eq(lch.h.unwrap(), 29.2339, 1e-2));
    }

    #[test]
    fn srgb_red_in_cie_lch_matches_reference() {
        let lch = Color::rgb(1.0, 0.0, 0.0).to_mode(Mode::Lch);
        let lch = lch.as_lch().unwrap();
        assert!(approx_eq(lch.l, 54.29, 1e-2));
        assert!(approx_eq(lch.c, 106.84, 1e-1));
        assert!(approx_eq(lch.h.unwrap(), 40.85, 1e-1));
    }

    #[test]
    fn achromatic_colors_have_no_hue() {
        let gray = Color::Lab(Lab {
            l: 50.0,
            a: 0.0,
            b: 0.0,
            alpha: None,
        });
        let lch = gray.to_mode(Mode::Lch);
        assert_eq!(lch.as_lch().unwrap().h, None);

        let hsl = Color::rgb(0.5, 0.5, 0.5).to_mode(Mode::Hsl);
        assert!(matches!(hsl, Color::Hsl(Hsl { h: None, .. })));
    }

    #[test]
    fn missing_hue_is_treated_as_zero() {
        let without = Color::Oklch(Lch::new(0.5, 0.0, None)).to_mode(Mode::Rgb);
        let with_nan = Color::Oklch(Lch::new(0.5, 0.0, Some(f64::NAN))).to_mode(Mode::Rgb);
        assert_eq!(without, with_nan);
    }

    #[test]
    fn alpha_is_carried_through_conversions() {
        let color = Color::oklch(0.7, 0.1, 120.0).with_alpha(Some(0.25));
        for mode in Mode::ALL {
            assert_eq!(color.to_mode(mode).alpha(), Some(0.25));
        }
        assert!(approx_eq(color.opacity(), 0.25, EPSILON));
        assert!(approx_eq(Color::rgb(0.0, 0.0, 0.0).opacity(), 1.0, EPSILON));
    }

    #[test]
    fn rec2020_transfer_roundtrip() {
        let color = Color::rec2020(0.3, 0.01, 0.9);
        let back = color.to_mode(Mode::Oklab).to_mode(Mode::Rec2020);
        assert_rgb_close(&back, [0.3, 0.01, 0.9], EPSILON_WIDE);
    }

    #[test]
    fn negative_channels_keep_their_sign() {
        let color = Color::rgb(-0.2, 0.5, 1.3);
        let back = color.to_mode(Mode::P3).to_mode(Mode::Rgb);
        assert_rgb_close(&back, [-0.2, 0.5, 1.3], EPSILON_WIDE);
    }

    #[test]
    fn inverted_matrix_undoes_the_original() {
        let m: Matrix3 = [[2.0, 1.0, 0.5], [0.25, 3.0, 1.0], [0.0, 0.5, 4.0]];
        let v = [0.3, -0.7, 1.9];
        let back = multiply(&invert(m), multiply(&m, v));
        for (a, b) in v.iter().zip(back) {
            assert!(approx_eq(*a, b, EPSILON));
        }
    }

    #[test]
    fn clip_clamps_each_channel() {
        let rgb = Rgb::new(-0.5, 0.5, f64::NAN).clip();
        assert_eq!((rgb.r, rgb.g, rgb.b), (0.0, 0.5, 0.0));
    }

    #[test]
    fn displayable_boundaries_are_inclusive() {
        assert!(Rgb::new(0.0, 1.0, 0.5).displayable());
        assert!(!Rgb::new(1.000_000_1, 0.0, 0.0).displayable());
        assert!(!Rgb::new(0.0, -0.000_000_1, 0.0).displayable());
    }

    proptest! {
        #[test]
        fn rec2020_survives_a_trip_through_p3(
            r in 0.0f64..=1.0,
            g in 0.0f64..=1.0,
            b in 0.0f64..=1.0,
        ) {
            let back = Color::rec2020(r, g, b).to_mode(Mode::P3).to_mode(Mode::Rec2020);
            let rgb = back.as_rgb().unwrap();
            for (got, want) in [rgb.r, rgb.g, rgb.b].into_iter().zip([r, g, b]) {
                prop_assert!(approx_eq(got, want, EPSILON_WIDE), "{rgb:?} != {:?}", [r, g, b]);
            }
        }

        #[test]
        fn oklch_survives_a_trip_through_xyz(
            l in 0.05f64..0.95,
            c in 0.01f64..0.3,
            h in 0.0f64..360.0,
        ) {
            let color = Color::oklch(l, c, h);
            let back = Color::from_xyz65(Mode::Oklch, color.to_xyz65(), None);
            let lch = back.as_lch().unwrap();
            prop_assert!(approx_eq(lch.l, l, EPSILON_WIDE));
            prop_assert!(approx_eq(lch.c, c, EPSILON_WIDE));
            let drift = ((lch.h.unwrap() - h + 540.0) % 360.0 - 180.0).abs();
            prop_assert!(drift < 1e-3, "hue {:?} != {h}", lch.h);
        }
    }
}
