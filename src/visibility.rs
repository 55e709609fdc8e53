//! Display-capability policies: which colors to draw and at what opacity.

use colorgate_color::Color;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Converter, Gamut};

/// Opacity for colors the display can show faithfully.
pub const OPAQUE: f64 = 1.0;
/// Opacity for colors outside sRGB but inside Display P3.
pub const WIDE_GAMUT_ALPHA: f64 = 0.6;
/// Opacity for colors outside every gamut worth distinguishing.
pub const OUT_OF_GAMUT_ALPHA: f64 = 0.4;

/// Which wide gamuts a display declares support for.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ColorSupport {
    /// The display covers Display P3.
    pub p3: bool,
    /// The display covers Rec.2020.
    pub rec2020: bool,
}

impl ColorSupport {
    /// A display with only sRGB coverage.
    pub const SRGB_ONLY: Self = Self::new(false, false);

    /// Creates a capability declaration.
    #[must_use]
    pub const fn new(p3: bool, rec2020: bool) -> Self {
        Self { p3, rec2020 }
    }
}

/// Predicate telling whether a color is renderable on the display.
pub type IsVisible = Box<dyn Fn(&Color) -> bool + Send + Sync>;

/// Opacity hint for drawing a color that may not be reproduced exactly.
pub type GetAlpha = Box<dyn Fn(&Color) -> f64 + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Fallback {
    // No gamut information to degrade against.
    Opaque,
    // Anything outside sRGB gets the same opacity.
    Flat(f64),
    // Outside sRGB but inside P3, versus outside P3.
    Tiered,
}

/// The decision table for one capability declaration, resolved up front.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibilityPolicy {
    converter: Converter,
    visible: Gamut,
    fallback: Fallback,
}

impl VisibilityPolicy {
    /// Resolves the policy for `support` with the standard converter.
    #[must_use]
    pub const fn new(support: ColorSupport) -> Self {
        Self::with_converter(Converter::standard(), support)
    }

    /// Resolves the policy for `support` using `converter`.
    #[must_use]
    pub const fn with_converter(converter: Converter, support: ColorSupport) -> Self {
        let visible = if support.rec2020 {
            Gamut::Rec2020
        } else if support.p3 {
            Gamut::DisplayP3
        } else {
            Gamut::Srgb
        };
        let fallback = match (support.rec2020, support.p3) {
            (true, true) => Fallback::Tiered,
            (true, false) => Fallback::Flat(OUT_OF_GAMUT_ALPHA),
            (false, true) => Fallback::Flat(WIDE_GAMUT_ALPHA),
            (false, false) => Fallback::Opaque,
        };
        Self {
            converter,
            visible,
            fallback,
        }
    }

    /// The widest gamut the display covers.
    #[must_use]
    pub const fn visible_gamut(&self) -> Gamut {
        self.visible
    }

    /// Whether `color` is inside the widest declared gamut.
    #[must_use]
    pub fn is_visible(&self, color: &Color) -> bool {
        self.visible.contains(&self.converter, color)
    }

    /// Opacity to draw `color` with.
    #[must_use]
    pub fn opacity_for(&self, color: &Color) -> f64 {
        match self.fallback {
            Fallback::Opaque => OPAQUE,
            _ if Gamut::Srgb.contains(&self.converter, color) => OPAQUE,
            Fallback::Flat(alpha) => alpha,
            Fallback::Tiered if Gamut::DisplayP3.contains(&self.converter, color) => {
                WIDE_GAMUT_ALPHA
            }
            Fallback::Tiered => OUT_OF_GAMUT_ALPHA,
        }
    }

    /// The visibility predicate as a standalone closure.
    #[must_use]
    pub fn into_is_visible(self) -> IsVisible {
        let Self {
            converter, visible, ..
        } = self;
        Box::new(move |color| visible.contains(&converter, color))
    }

    /// The opacity hint as a standalone closure.
    #[must_use]
    pub fn into_get_alpha(self) -> GetAlpha {
        match self.fallback {
            Fallback::Opaque => Box::new(|_| OPAQUE),
            _ => Box::new(move |color| self.opacity_for(color)),
        }
    }
}

/// Builds the predicate deciding whether a color is renderable.
///
/// | `rec2020` | `p3`  | visible when inside |
/// |-----------|-------|---------------------|
/// | true      | any   | Rec.2020            |
/// | false     | true  | Display P3          |
/// | false     | false | sRGB                |
#[must_use]
pub fn generate_is_visible(p3: bool, rec2020: bool) -> IsVisible {
    VisibilityPolicy::new(ColorSupport::new(p3, rec2020)).into_is_visible()
}

/// Builds the opacity hint for soft degradation of out-of-gamut colors.
///
/// Colors inside sRGB are always opaque. Outside sRGB, a display with both
/// wide gamuts gives 0.6 to P3 colors and 0.4 to the rest; Rec.2020 alone
/// gives 0.4; P3 alone gives 0.6; no wide gamut at all keeps everything
/// opaque.
#[must_use]
pub fn generate_get_alpha(p3: bool, rec2020: bool) -> GetAlpha {
    VisibilityPolicy::new(ColorSupport::new(p3, rec2020)).into_get_alpha()
}
