use crate::{Hsl, Vec3, normalize_hue};

// https://www.w3.org/TR/css-color-4/#hsl-to-rgb
pub(crate) fn to_srgb(hsl: &Hsl) -> Vec3 {
    let hue = normalize_hue(hsl.h.filter(|h| h.is_finite()).unwrap_or(0.0));
    let amount = hsl.s * hsl.l.min(1.0 - hsl.l);
    let channel = |n: f64| {
        let k = (n + hue / 30.0) % 12.0;
        amount.mul_add(-(k - 3.0).min(9.0 - k).clamp(-1.0, 1.0), hsl.l)
    };
    [channel(0.0), channel(8.0), channel(4.0)]
}

// https://www.w3.org/TR/css-color-4/#rgb-to-hsl
#[allow(clippy::float_cmp)]
pub(crate) fn from_srgb([r, g, b]: Vec3, alpha: Option<f64>) -> Hsl {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (min + max) / 2.0;
    let d = max - min;

    let mut h = None;
    let mut s = 0.0;
    if d != 0.0 {
        s = if l == 0.0 || l == 1.0 {
            0.0
        } else {
            (max - l) / l.min(1.0 - l)
        };
        let sector = if max == r {
            (g - b) / d + if g < b { 6.0 } else { 0.0 }
        } else if max == g {
            (b - r) / d + 2.0
        } else {
            (r - g) / d + 4.0
        };
        h = Some(sector * 60.0);
    }

    if s < 0.0 {
        h = h.map(|hue| hue + 180.0);
        s = s.abs();
    }

    Hsl {
        h: h.map(normalize_hue),
        s,
        l,
        alpha,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primaries_roundtrip() {
        let samples = [
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, 0.0, 1.0],
            [0.2, 0.4, 0.6],
            [0.9, 0.8, 0.1],
        ];
        for rgb in samples {
            let hsl = from_srgb(rgb, None);
            let back = to_srgb(&hsl);
            for (a, b) in rgb.iter().zip(back) {
                assert!((a - b).abs() < 1e-12, "{rgb:?} -> {hsl:?} -> {back:?}");
            }
        }
    }

    #[test]
    fn pure_green_has_hue_120() {
        let hsl = from_srgb([0.0, 1.0, 0.0], None);
        assert_eq!(hsl.h, Some(120.0));
        assert!((hsl.s - 1.0).abs() < 1e-12);
        assert!((hsl.l - 0.5).abs() < 1e-12);
    }
}
