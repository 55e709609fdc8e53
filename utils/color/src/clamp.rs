use crate::{Color, Lch, LchVariant, Mode};

// The chroma search stops once the interval is narrower than the variant's
// reference chroma range divided by this.
const SEARCH_STEPS: f64 = 8192.0;

fn in_gamut(color: &Color, gamut: Mode) -> bool {
    color
        .to_mode(gamut)
        .as_rgb()
        .is_some_and(crate::Rgb::displayable)
}

/// Maps `color` into `gamut` by reducing chroma in `variant`.
///
/// Lightness and hue are held fixed while chroma is binary-searched. Colors
/// already inside the gamut are returned unchanged. If even the achromatic
/// color at the same lightness is out of gamut, it is channel-clipped
/// instead. The result is expressed in the input color's mode.
///
/// # Panics
///
/// Panics if `gamut` is not an RGB-like mode.
#[must_use]
pub fn clamp_chroma(color: &Color, variant: LchVariant, gamut: Mode) -> Color {
    assert!(
        gamut.is_rgb_like(),
        "chroma can only be clamped into an RGB gamut, got `{gamut}`"
    );
    if in_gamut(color, gamut) {
        return *color;
    }

    let original = color.mode();
    let polar = color.to_lch(variant);

    let mut clamped = Lch { c: 0.0, ..polar };
    if !in_gamut(&variant.color(clamped), gamut) {
        tracing::trace!(lightness = polar.l, "achromatic color outside gamut, clipping");
        let clipped = match variant.color(clamped).to_mode(gamut) {
            Color::Rgb(rgb) => Color::Rgb(rgb.clip()),
            Color::P3(rgb) => Color::P3(rgb.clip()),
            Color::Rec2020(rgb) => Color::Rec2020(rgb.clip()),
            other => other,
        };
        return clipped.to_mode(original);
    }

    let resolution = variant.chroma_max() / SEARCH_STEPS;
    let mut start = 0.0;
    // Infinite chroma would keep the midpoint at infinity forever.
    let mut end = polar.c.min(f64::MAX);
    let mut last_good = 0.0;
    while end - start > resolution {
        clamped.c = (end - start).mul_add(0.5, start);
        if in_gamut(&variant.color(clamped), gamut) {
            last_good = clamped.c;
            start = clamped.c;
        } else {
            end = clamped.c;
        }
    }

    if !in_gamut(&variant.color(clamped), gamut) {
        clamped.c = last_good;
    }
    tracing::trace!(from = polar.c, to = clamped.c, %gamut, "clamped chroma");
    variant.color(clamped).to_mode(original)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn in_gamut_colors_are_untouched() {
        let color = Color::oklch(0.6, 0.05, 200.0);
        assert_eq!(clamp_chroma(&color, LchVariant::Oklch, Mode::Rgb), color);
    }

    #[test]
    fn out_of_gamut_chroma_is_reduced() {
        let color = Color::oklch(0.7, 0.35, 150.0);
        let clamped = clamp_chroma(&color, LchVariant::Oklch, Mode::Rgb);
        let lch = clamped.as_lch().unwrap();

        assert!(lch.c < 0.35);
        assert!(lch.c > 0.1);
        assert!((lch.l - 0.7).abs() < 1e-9);
        assert!((lch.h.unwrap() - 150.0).abs() < 1e-9);
        assert!(in_gamut(&clamped, Mode::Rgb));
    }

    #[test]
    fn wider_gamut_keeps_more_chroma() {
        let color = Color::oklch(0.7, 0.35, 150.0);
        let srgb = clamp_chroma(&color, LchVariant::Oklch, Mode::Rgb);
        let p3 = clamp_chroma(&color, LchVariant::Oklch, Mode::P3);

        assert!(p3.as_lch().unwrap().c > srgb.as_lch().unwrap().c);
    }

    #[test]
    fn result_keeps_the_input_mode() {
        let color = Color::p3(0.0, 1.0, 0.0);
        let clamped = clamp_chroma(&color, LchVariant::Lch, Mode::Rgb);
        assert_eq!(clamped.mode(), Mode::P3);
    }

    #[test]
    fn overly_bright_colors_are_clipped() {
        let color = Color::oklch(1.2, 0.1, 40.0);
        let clamped = clamp_chroma(&color, LchVariant::Oklch, Mode::Rgb);
        let rgb = clamped.to_mode(Mode::Rgb);
        let rgb = rgb.as_rgb().unwrap();

        assert!((rgb.r - 1.0).abs() < 1e-6);
        assert!((rgb.g - 1.0).abs() < 1e-6);
        assert!((rgb.b - 1.0).abs() < 1e-6);
    }

    #[test]
    #[should_panic(expected = "RGB gamut")]
    fn non_rgb_gamut_is_rejected() {
        let _ = clamp_chroma(&Color::oklch(0.5, 0.1, 10.0), LchVariant::Oklch, Mode::Lab);
    }

    #[test]
    fn infinite_chroma_terminates_in_gamut() {
        let color = Color::oklch(0.5, f64::INFINITY, 30.0);
        let clamped = clamp_chroma(&color, LchVariant::Oklch, Mode::Rgb);
        let lch = clamped.as_lch().unwrap();

        assert!(lch.c.is_finite());
        assert!(lch.c > 0.0);
        assert!(in_gamut(&clamped, Mode::Rgb));
    }

    proptest! {
        #[test]
        fn clamped_colors_are_in_gamut(
            l in 0.01f64..0.99,
            c in 0.0f64..0.5,
            h in 0.0f64..360.0,
            gamut in prop::sample::select(vec![Mode::Rgb, Mode::P3, Mode::Rec2020]),
        ) {
            let color = Color::oklch(l, c, h);
            let clamped = clamp_chroma(&color, LchVariant::Oklch, gamut);
            let lch = clamped.as_lch().unwrap();

            prop_assert!(in_gamut(&clamped, gamut), "{clamped:?} outside {gamut}");
            prop_assert!(lch.c <= c);
            prop_assert_eq!(lch.l, l);
        }
    }
}
