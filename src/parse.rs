use colorgate_color::{Color, LchVariant, Lch, parse_css};

fn is_word(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

// `#hex` or `name(args)` with no nested parentheses.
fn is_single_value(value: &str) -> bool {
    if let Some(digits) = value.strip_prefix('#') {
        return !digits.is_empty() && digits.chars().all(is_word);
    }
    let Some(open) = value.find('(') else {
        return false;
    };
    let Some(args) = value[open + 1..].strip_suffix(')') else {
        return false;
    };
    open > 0 && value[..open].chars().all(is_word) && !args.is_empty() && !args.contains(')')
}

fn strip_property(value: &str) -> &str {
    let Some((name, rest)) = value.split_once(':') else {
        return value;
    };
    let rest = rest.trim_start();
    let is_property = !name.is_empty() && name.chars().all(|c| is_word(c) || c == '-');
    if is_property && is_single_value(rest) {
        rest
    } else {
        value
    }
}

/// Normalizes loosely pasted CSS before parsing.
///
/// Surrounding whitespace, one trailing `;` and a `property:` prefix are
/// removed, and `oklch(…)` is read as `color(--oklch …)`.
fn normalize(text: &str) -> String {
    let value = text.trim();
    let value = value.strip_suffix(';').map_or(value, str::trim_end);
    let value = strip_property(value);
    match value.strip_prefix("oklch(") {
        Some(rest) => format!("color(--oklch {rest}"),
        None => value.to_owned(),
    }
}

/// Parses color text as typed or pasted by a user.
///
/// Accepts everything [`parse_css`] does, plus a trailing `;` and a CSS
/// property prefix such as `color: oklch(60% 0.15 30);`. Returns `None`
/// when the text is not a color.
#[must_use]
pub fn parse(text: &str) -> Option<Color> {
    let normalized = normalize(text);
    let color = parse_css(&normalized);
    if color.is_none() {
        tracing::trace!(input = text, %normalized, "rejected color text");
    }
    color
}

/// Builds a color in the working space of the [`global`](crate::global())
/// context: OKLCH, or CIE LCH when `COLORGATE_COLOR_FN=lch`.
#[must_use]
pub fn build(l: f64, c: f64, h: f64, alpha: f64) -> Color {
    crate::global().converter().build(l, c, h, alpha)
}

/// Builds an opaque color in the working space, see [`build`].
#[must_use]
pub fn build_opaque(l: f64, c: f64, h: f64) -> Color {
    build(l, c, h, 1.0)
}

/// Builds a color in `variant`.
#[must_use]
pub const fn build_in(variant: LchVariant, l: f64, c: f64, h: f64, alpha: f64) -> Color {
    variant.color(Lch {
        l,
        c,
        h: Some(h),
        alpha: Some(alpha),
    })
}
