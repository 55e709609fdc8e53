use colorgate_color::{Color, Rgb};

use crate::{Converter, Space};

/// A display gamut, modeled as the RGB unit cube of its native space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Gamut {
    /// sRGB.
    Srgb,
    /// Display P3.
    DisplayP3,
    /// Rec.2020.
    Rec2020,
}

impl Gamut {
    /// All gamuts, narrowest first.
    pub const ALL: [Self; 3] = [Self::Srgb, Self::DisplayP3, Self::Rec2020];

    /// Native RGB space of the gamut.
    #[must_use]
    pub const fn space(self) -> Space {
        match self {
            Self::Srgb => Space::Srgb,
            Self::DisplayP3 => Space::DisplayP3,
            Self::Rec2020 => Space::Rec2020,
        }
    }

    /// Channels of `color` in this gamut's space.
    #[must_use]
    #[track_caller]
    pub fn channels(self, converter: &Converter, color: &Color) -> Rgb {
        match self {
            Self::Srgb => converter.rgb(color),
            Self::DisplayP3 => converter.p3(color),
            Self::Rec2020 => converter.rec2020(color),
        }
    }

    /// Whether all three channels of `color` lie in `[0, 1]` in this gamut.
    ///
    /// There is no tolerance: exactly 0 and exactly 1 are inside, anything
    /// beyond is outside.
    #[must_use]
    #[track_caller]
    pub fn contains(self, converter: &Converter, color: &Color) -> bool {
        self.channels(converter, color).displayable()
    }

    /// The narrowest gamut containing `color`.
    ///
    /// Each gamut is tested on its own; nesting is not assumed.
    #[must_use]
    pub fn smallest_containing(converter: &Converter, color: &Color) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|gamut| gamut.contains(converter, color))
    }
}

/// Whether `color` can be shown exactly on a display covering `gamut`.
///
/// Uses the converter of the [`global`](crate::global()) context.
#[must_use]
pub fn in_gamut(color: &Color, gamut: Gamut) -> bool {
    gamut.contains(crate::global().converter(), color)
}

/// Whether `color` is inside sRGB.
#[must_use]
pub fn in_rgb(color: &Color) -> bool {
    in_gamut(color, Gamut::Srgb)
}

/// Whether `color` is inside Display P3.
#[must_use]
pub fn in_p3(color: &Color) -> bool {
    in_gamut(color, Gamut::DisplayP3)
}

/// Whether `color` is inside Rec.2020.
#[must_use]
pub fn in_rec2020(color: &Color) -> bool {
    in_gamut(color, Gamut::Rec2020)
}
