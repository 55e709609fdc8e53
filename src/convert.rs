use colorgate_color::{Color, Lch, LchVariant, Mode, Rgb, clamp_chroma};

use crate::Registry;

/// Projection targets of the converter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Space {
    /// sRGB.
    Srgb,
    /// Display P3.
    DisplayP3,
    /// Rec.2020.
    Rec2020,
    /// CIE LCH.
    Lch,
    /// OKLCH.
    Oklch,
}

impl Space {
    /// The color mode projected colors carry.
    #[must_use]
    pub const fn mode(self) -> Mode {
        match self {
            Self::Srgb => Mode::Rgb,
            Self::DisplayP3 => Mode::P3,
            Self::Rec2020 => Mode::Rec2020,
            Self::Lch => Mode::Lch,
            Self::Oklch => Mode::Oklch,
        }
    }
}

/// Converts colors between registered spaces.
///
/// Every call is independent; nothing is cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Converter {
    registry: Registry,
    working: LchVariant,
}

impl Default for Converter {
    fn default() -> Self {
        Self::standard()
    }
}

impl Converter {
    /// Creates a converter over `registry` that clamps chroma and builds
    /// colors in `working`.
    #[must_use]
    pub const fn new(registry: Registry, working: LchVariant) -> Self {
        Self { registry, working }
    }

    /// Every mode registered, OKLCH as the working space.
    #[must_use]
    pub const fn standard() -> Self {
        Self::new(Registry::standard(), LchVariant::Oklch)
    }

    /// Registered modes.
    #[must_use]
    pub const fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Cylindrical space used for chroma clamping and [`Converter::build`].
    #[must_use]
    pub const fn working(&self) -> LchVariant {
        self.working
    }

    /// Builds a color in the working space.
    #[must_use]
    pub const fn build(&self, l: f64, c: f64, h: f64, alpha: f64) -> Color {
        self.working.color(Lch {
            l,
            c,
            h: Some(h),
            alpha: Some(alpha),
        })
    }

    #[track_caller]
    fn check(&self, color: &Color, target: Mode) {
        self.registry.require(color.mode());
        self.registry.require(target);
    }

    /// Projects `color` into `space` without any gamut mapping.
    ///
    /// # Panics
    ///
    /// Panics if either mode is not registered.
    #[must_use]
    #[track_caller]
    pub fn project(&self, color: &Color, space: Space) -> Color {
        self.check(color, space.mode());
        color.to_mode(space.mode())
    }

    /// Converts `color` into `space`.
    ///
    /// RGB targets get chroma clamped in the working space first, so very
    /// saturated colors land on the nearest in-gamut color instead of
    /// producing negative or huge channels.
    ///
    /// # Panics
    ///
    /// Panics if either mode is not registered.
    #[must_use]
    #[track_caller]
    pub fn to_space(&self, color: &Color, space: Space) -> Color {
        let target = space.mode();
        self.check(color, target);
        if target.is_rgb_like() {
            self.registry.require(self.working.mode());
            clamp_chroma(color, self.working, target).to_mode(target)
        } else {
            color.to_mode(target)
        }
    }

    /// Gamut-mapped sRGB channels of `color`.
    #[must_use]
    #[track_caller]
    pub fn to_rgb(&self, color: &Color) -> Rgb {
        self.check(color, Mode::Rgb);
        self.registry.require(self.working.mode());
        clamp_chroma(color, self.working, Mode::Rgb).to_srgb()
    }

    /// sRGB channels of `color`, unclamped.
    #[must_use]
    #[track_caller]
    pub fn rgb(&self, color: &Color) -> Rgb {
        self.check(color, Mode::Rgb);
        color.to_srgb()
    }

    /// Display P3 channels of `color`, unclamped.
    #[must_use]
    #[track_caller]
    pub fn p3(&self, color: &Color) -> Rgb {
        self.check(color, Mode::P3);
        color.to_p3()
    }

    /// Rec.2020 channels of `color`, unclamped.
    #[must_use]
    #[track_caller]
    pub fn rec2020(&self, color: &Color) -> Rgb {
        self.check(color, Mode::Rec2020);
        color.to_rec2020()
    }

    /// CIE LCH components of `color`.
    #[must_use]
    #[track_caller]
    pub fn lch(&self, color: &Color) -> Lch {
        self.check(color, Mode::Lch);
        color.to_lch(LchVariant::Lch)
    }

    /// OKLCH components of `color`.
    #[must_use]
    #[track_caller]
    pub fn oklch(&self, color: &Color) -> Lch {
        self.check(color, Mode::Oklch);
        color.to_lch(LchVariant::Oklch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const EPSILON: f64 = 1e-6;

    fn hue_distance(a: f64, b: f64) -> f64 {
        ((a - b + 540.0) % 360.0 - 180.0).abs()
    }

    #[test]
    fn project_does_not_clamp() {
        let converter = Converter::standard();
        let vivid = Color::p3(0.0, 1.0, 0.0);
        let rgb = converter.project(&vivid, Space::Srgb);
        assert!(!rgb.as_rgb().unwrap().displayable());
    }

    #[test]
    fn to_space_clamps_chroma_for_rgb_targets() {
        let converter = Converter::standard();
        let vivid = Color::oklch(0.7, 0.37, 145.0);
        let rgb = converter.to_space(&vivid, Space::Srgb);

        assert_eq!(rgb.mode(), Mode::Rgb);
        let channels = rgb.as_rgb().unwrap();
        for channel in [channels.r, channels.g, channels.b] {
            assert!((-EPSILON..=1.0 + EPSILON).contains(&channel), "{channels:?}");
        }
    }

    #[test]
    fn to_space_keeps_hue_and_lightness() {
        let converter = Converter::standard();
        let vivid = Color::oklch(0.6, 0.35, 30.0);
        let back = converter.oklch(&converter.to_space(&vivid, Space::DisplayP3));

        assert!((back.l - 0.6).abs() < 1e-4);
        assert!(hue_distance(back.h.unwrap(), 30.0) < 1e-2);
        assert!(back.c < 0.35);
    }

    #[test]
    fn to_rgb_matches_to_space() {
        let converter = Converter::standard();
        let color = Color::lch(60.0, 140.0, 300.0);
        let direct = converter.to_rgb(&color);
        let via_space = converter.to_space(&color, Space::Srgb);
        assert_eq!(Color::Rgb(direct), via_space);
    }

    #[test]
    fn lch_targets_are_not_clamped() {
        let converter = Converter::standard();
        let color = Color::oklch(0.7, 0.4, 150.0);
        assert_eq!(converter.to_space(&color, Space::Oklch), color);
    }

    #[test]
    fn build_uses_the_working_space() {
        let oklch = Converter::standard().build(0.5, 0.1, 20.0, 0.8);
        assert_eq!(oklch.mode(), Mode::Oklch);
        assert_eq!(oklch.alpha(), Some(0.8));

        let lch = Converter::new(Registry::standard(), LchVariant::Lch).build(50.0, 30.0, 20.0, 1.0);
        assert_eq!(lch.mode(), Mode::Lch);
    }

    #[test]
    #[should_panic(expected = "color mode `oklch` is not registered")]
    fn unregistered_source_mode_panics() {
        let converter = Converter::new(Registry::empty().register(Mode::Rgb), LchVariant::Oklch);
        let _ = converter.project(&Color::oklch(0.5, 0.1, 10.0), Space::Srgb);
    }

    #[test]
    #[should_panic(expected = "color mode `p3` is not registered")]
    fn unregistered_target_mode_panics() {
        let registry = Registry::empty().register(Mode::Rgb).register(Mode::Oklch);
        let converter = Converter::new(registry, LchVariant::Oklch);
        let _ = converter.p3(&Color::rgb(1.0, 0.0, 0.0));
    }

    proptest! {
        #[test]
        fn oklch_roundtrips_through_rgb(
            l in 0.0f64..1.0,
            c in 0.0f64..0.4,
            h in 0.0f64..360.0,
        ) {
            let converter = Converter::standard();
            let color = converter.build(l, c, h, 1.0);
            let rgb = converter.project(&color, Space::Srgb);
            let back = converter.oklch(&rgb);

            prop_assert!((back.l - l).abs() < EPSILON, "lightness {l} -> {}", back.l);
            prop_assert!((back.c - c).abs() < EPSILON, "chroma {c} -> {}", back.c);
            if c > 1e-3 {
                let hue = back.h.unwrap_or(0.0);
                prop_assert!(hue_distance(hue, h) < EPSILON, "hue {h} -> {hue}");
            }
        }

        #[test]
        fn cie_lch_roundtrips_through_rgb(
            l in 0.0f64..100.0,
            c in 0.0f64..150.0,
            h in 0.0f64..360.0,
        ) {
            let converter = Converter::new(Registry::standard(), LchVariant::Lch);
            let color = converter.build(l, c, h, 1.0);
            let rgb = converter.project(&color, Space::Srgb);
            let back = converter.lch(&rgb);

            prop_assert!((back.l - l).abs() < EPSILON, "lightness {l} -> {}", back.l);
            prop_assert!((back.c - c).abs() < EPSILON, "chroma {c} -> {}", back.c);
            if c > 1e-3 {
                let hue = back.h.unwrap_or(0.0);
                prop_assert!(hue_distance(hue, h) < EPSILON, "hue {h} -> {hue}");
            }
        }
    }
}
