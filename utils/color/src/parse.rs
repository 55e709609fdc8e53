use crate::{Color, HexColorError, Hsl, Lab, Lch, Rgb};

fn parse_prefix(bytes: &[u8]) -> usize {
    if !bytes.is_empty() && bytes[0] == b'#' {
        1
    } else if bytes.len() >= 2 && bytes[0] == b'0' && (bytes[1] == b'x' || bytes[1] == b'X') {
        2
    } else {
        0
    }
}

const fn parse_hex_digit(b: u8, index: usize) -> Result<u8, HexColorError> {
    match b {
        b'0'..=b'9' => Ok(b - b'0'),
        b'a'..=b'f' => Ok(b - b'a' + 10),
        b'A'..=b'F' => Ok(b - b'A' + 10),
        _ => Err(HexColorError::InvalidDigit(index)),
    }
}

/// Parses `#rgb`, `#rgba`, `#rrggbb` or `#rrggbbaa` into sRGB channels.
///
/// The `#` may also be written as `0x` or left out.
///
/// # Errors
///
/// Returns [`HexColorError`] if the digit count is wrong or a character is
/// not hexadecimal.
pub fn parse_hex(s: &str) -> Result<Rgb, HexColorError> {
    let bytes = s.as_bytes();
    let offset = parse_prefix(bytes);
    let digits = bytes
        .iter()
        .enumerate()
        .skip(offset)
        .map(|(index, &b)| parse_hex_digit(b, index))
        .collect::<Result<Vec<_>, _>>()?;

    let channels: Vec<u8> = match digits.len() {
        3 | 4 => digits.iter().map(|d| d * 17).collect(),
        6 | 8 => digits.chunks(2).map(|pair| (pair[0] << 4) | pair[1]).collect(),
        _ => return Err(HexColorError::InvalidLength),
    };

    let unit = |value: u8| f64::from(value) / 255.0;
    Ok(Rgb {
        r: unit(channels[0]),
        g: unit(channels[1]),
        b: unit(channels[2]),
        alpha: channels.get(3).copied().map(unit),
    })
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Token {
    Number(f64),
    Percent(f64),
    None,
}

impl Token {
    fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.eq_ignore_ascii_case("none") {
            return Some(Self::None);
        }
        if let Some(percent) = raw.strip_suffix('%') {
            return finite(percent).map(Self::Percent);
        }
        // Angle units only matter for hues; everything else is a bare number.
        let lower = raw.to_ascii_lowercase();
        let (digits, scale) = [
            ("grad", 0.9),
            ("deg", 1.0),
            ("rad", 180.0 / core::f64::consts::PI),
            ("turn", 360.0),
        ]
        .into_iter()
        .find_map(|(unit, scale)| lower.strip_suffix(unit).map(|d| (d, scale)))
        .unwrap_or((lower.as_str(), 1.0));
        finite(digits).map(|value| Self::Number(value * scale))
    }

    // `reference` is the value 100% stands for.
    fn value(self, reference: f64) -> f64 {
        match self {
            Self::Number(value) => value,
            Self::Percent(value) => value / 100.0 * reference,
            Self::None => 0.0,
        }
    }

    fn hue(self) -> Option<Option<f64>> {
        match self {
            Self::Number(value) => Some(Some(value)),
            Self::None => Some(None),
            Self::Percent(_) => None,
        }
    }

    fn alpha(self) -> f64 {
        self.value(1.0).clamp(0.0, 1.0)
    }
}

fn finite(raw: &str) -> Option<f64> {
    raw.parse::<f64>().ok().filter(|value| value.is_finite())
}

struct Arguments {
    channels: [Token; 3],
    alpha: Option<Token>,
}

impl Arguments {
    fn parse(body: &str, allow_legacy: bool) -> Option<Self> {
        let tokens: Vec<Token>;
        let mut alpha = None;

        if body.contains(',') {
            if !allow_legacy {
                return None;
            }
            tokens = body
                .split(',')
                .map(Token::parse)
                .collect::<Option<Vec<_>>>()?;
            match tokens.len() {
                3 => {}
                4 => alpha = Some(tokens[3]),
                _ => return None,
            }
        } else {
            let (channels, slash) = match body.split_once('/') {
                Some((channels, rest)) => (channels, Some(rest)),
                None => (body, None),
            };
            tokens = channels
                .split_whitespace()
                .map(Token::parse)
                .collect::<Option<Vec<_>>>()?;
            if tokens.len() != 3 {
                return None;
            }
            if let Some(rest) = slash {
                alpha = Some(Token::parse(rest)?);
            }
        }

        Some(Self {
            channels: [tokens[0], tokens[1], tokens[2]],
            alpha,
        })
    }

    fn alpha(&self) -> Option<f64> {
        self.alpha.map(Token::alpha)
    }

    // Bare numbers are in `0..=number_max`, percentages always map onto `0..=1`.
    fn rgb(&self, number_max: f64) -> Rgb {
        let unit = |token: Token| match token {
            Token::Percent(value) => value / 100.0,
            other => other.value(number_max) / number_max,
        };
        let [r, g, b] = self.channels;
        Rgb {
            r: unit(r),
            g: unit(g),
            b: unit(b),
            alpha: self.alpha(),
        }
    }

    fn lab(&self, l_max: f64, ab_max: f64) -> Lab {
        let [l, a, b] = self.channels;
        Lab {
            l: l.value(l_max),
            a: a.value(ab_max),
            b: b.value(ab_max),
            alpha: self.alpha(),
        }
    }

    fn lch(&self, l_max: f64, c_max: f64) -> Option<Lch> {
        let [l, c, h] = self.channels;
        Some(Lch {
            l: l.value(l_max),
            c: c.value(c_max).max(0.0),
            h: h.hue()?,
            alpha: self.alpha(),
        })
    }

    fn hsl(&self) -> Option<Hsl> {
        let [h, s, l] = self.channels;
        Some(Hsl {
            h: h.hue()?,
            s: s.value(100.0) / 100.0,
            l: l.value(100.0) / 100.0,
            alpha: self.alpha(),
        })
    }
}

/// Parses a CSS color: hex, `rgb()`, `hsl()`, `lab()`, `lch()`, `oklab()`,
/// `oklch()` or `color()` with `srgb`, `display-p3`, `rec2020` or a
/// `--lab`/`--lch`/`--oklab`/`--oklch` custom space.
///
/// Returns `None` for anything it does not understand.
#[must_use]
pub fn parse_css(text: &str) -> Option<Color> {
    let text = text.trim();
    if text.starts_with('#') {
        return parse_hex(text).ok().map(Color::Rgb);
    }

    let open = text.find('(')?;
    let body = text.strip_suffix(')')?.get(open + 1..)?;
    let name = text[..open].trim().to_ascii_lowercase();

    match name.as_str() {
        "rgb" | "rgba" => Some(Color::Rgb(Arguments::parse(body, true)?.rgb(255.0))),
        "hsl" | "hsla" => Some(Color::Hsl(Arguments::parse(body, true)?.hsl()?)),
        "lab" => Some(Color::Lab(Arguments::parse(body, false)?.lab(100.0, 125.0))),
        "lch" => Some(Color::Lch(Arguments::parse(body, false)?.lch(100.0, 150.0)?)),
        "oklab" => Some(Color::Oklab(Arguments::parse(body, false)?.lab(1.0, 0.4))),
        "oklch" => Some(Color::Oklch(Arguments::parse(body, false)?.lch(1.0, 0.4)?)),
        "color" => parse_color_function(body),
        _ => None,
    }
}

fn parse_color_function(body: &str) -> Option<Color> {
    let body = body.trim_start();
    let split = body.find(char::is_whitespace)?;
    let (space, rest) = body.split_at(split);
    let arguments = Arguments::parse(rest, false)?;

    match space.to_ascii_lowercase().as_str() {
        "srgb" => Some(Color::Rgb(arguments.rgb(1.0))),
        "display-p3" => Some(Color::P3(arguments.rgb(1.0))),
        "rec2020" => Some(Color::Rec2020(arguments.rgb(1.0))),
        "--lab" => Some(Color::Lab(arguments.lab(100.0, 125.0))),
        "--lch" => Some(Color::Lch(arguments.lch(100.0, 150.0)?)),
        "--oklab" => Some(Color::Oklab(arguments.lab(1.0, 0.4))),
        "--oklch" => Some(Color::Oklch(arguments.lch(1.0, 0.4)?)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() <= EPSILON
    }

    #[test]
    fn hex_parsing_accepts_prefixes() {
        let direct = parse_hex("#1A2B3C").unwrap();
        let prefixed = parse_hex("0x1A2B3C").unwrap();
        let bare = parse_hex("1A2B3C").unwrap();

        assert_eq!(direct, prefixed);
        assert_eq!(direct, bare);
        assert!(approx_eq(direct.r, 26.0 / 255.0));
    }

    #[test]
    fn short_hex_expands_digits() {
        let short = parse_hex("#f80").unwrap();
        let long = parse_hex("#ff8800").unwrap();
        assert_eq!(short, long);

        let with_alpha = parse_hex("#ff000080").unwrap();
        assert!(approx_eq(with_alpha.alpha.unwrap(), 128.0 / 255.0));
    }

    #[test]
    fn hex_reports_errors() {
        assert_eq!(parse_hex("#GGGGGG"), Err(HexColorError::InvalidDigit(1)));
        assert_eq!(parse_hex("#12345"), Err(HexColorError::InvalidLength));
    }

    #[test]
    fn legacy_rgb_syntax() {
        let color = parse_css("rgba(255, 0, 51, 0.5)").unwrap();
        let Color::Rgb(rgb) = color else {
            panic!("expected rgb, got {color:?}");
        };
        assert!(approx_eq(rgb.r, 1.0));
        assert!(approx_eq(rgb.b, 0.2));
        assert_eq!(rgb.alpha, Some(0.5));
    }

    #[test]
    fn modern_rgb_syntax_with_percentages() {
        let color = parse_css("rgb(100% 50% 0% / 25%)").unwrap();
        let rgb = color.as_rgb().unwrap();
        assert!(approx_eq(rgb.r, 1.0));
        assert!(approx_eq(rgb.g, 0.5));
        assert_eq!(rgb.alpha, Some(0.25));
    }

    #[test]
    fn oklch_percent_lightness() {
        let color = parse_css("oklch(60% 0.15 30)").unwrap();
        let Color::Oklch(lch) = color else {
            panic!("expected oklch, got {color:?}");
        };
        assert!(approx_eq(lch.l, 0.6));
        assert!(approx_eq(lch.c, 0.15));
        assert_eq!(lch.h, Some(30.0));
        assert_eq!(lch.alpha, None);
    }

    #[test]
    fn custom_oklch_color_function() {
        let custom = parse_css("color(--oklch 60% 0.15 30)").unwrap();
        let native = parse_css("oklch(60% 0.15 30)").unwrap();
        assert_eq!(custom, native);
    }

    #[test]
    fn lch_hue_none_and_units() {
        let color = parse_css("lch(50% 0 none)").unwrap();
        assert_eq!(color.as_lch().unwrap().h, None);

        let turned = parse_css("lch(50 30 0.5turn)").unwrap();
        assert_eq!(turned.as_lch().unwrap().h, Some(180.0));
        assert!(approx_eq(turned.as_lch().unwrap().l, 50.0));
    }

    #[test]
    fn wide_gamut_color_functions() {
        let p3 = parse_css("color(display-p3 1 0 0 / 0.5)").unwrap();
        assert_eq!(p3, Color::p3(1.0, 0.0, 0.0).with_alpha(Some(0.5)));

        let rec = parse_css("color(rec2020 0 1 0)").unwrap();
        assert_eq!(rec, Color::rec2020(0.0, 1.0, 0.0));
    }

    #[test]
    fn hsl_syntax() {
        let color = parse_css("hsl(120deg 100% 50%)").unwrap();
        let Color::Hsl(hsl) = color else {
            panic!("expected hsl, got {color:?}");
        };
        assert_eq!(hsl.h, Some(120.0));
        assert!(approx_eq(hsl.s, 1.0));
        assert!(approx_eq(hsl.l, 0.5));
    }

    #[test]
    fn garbage_is_rejected() {
        for text in [
            "",
            "oklch(",
            "oklch(0.5 0.1)",
            "oklch(0.5, 0.1, 30)",
            "foo(1 2 3)",
            "rgb(1 2 3 4)",
            "color(unknown 1 2 3)",
            "oklch(NaN 0.1 20)",
            "oklch(0.5 0.1 20%)",
            "#12",
        ] {
            assert_eq!(parse_css(text), None, "{text:?} should not parse");
        }
    }
}
