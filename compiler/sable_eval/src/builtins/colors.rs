//! Colour functions.
//!
//! Channel arguments clamp rather than fail: `rgb(300, 0, 0)` is red.
//! Amount arguments (`lighten($color, 120%)`) are range checked.

use sable_value::{Color, EvalError, EvalResult, Value};

use super::{Args, BuiltinFn};
use crate::interpreter::Interpreter;

pub(super) const FUNCTIONS: &[(&str, BuiltinFn)] = &[
    ("rgb($red, $green, $blue)", rgb),
    ("rgba($red, $green, $blue, $alpha)", rgba),
    ("rgba($color, $alpha)", rgba_color),
    ("hsl($hue, $saturation, $lightness)", hsl),
    ("hsla($hue, $saturation, $lightness, $alpha)", hsla),
    ("red($color)", red),
    ("green($color)", green),
    ("blue($color)", blue),
    ("hue($color)", hue),
    ("saturation($color)", saturation),
    ("lightness($color)", lightness),
    ("alpha($color)", alpha),
    ("opacity($color)", opacity),
    ("mix($color1, $color2, $weight: 50%)", mix),
    ("adjust-hue($color, $degrees)", adjust_hue),
    ("lighten($color, $amount)", lighten),
    ("darken($color, $amount)", darken),
    ("saturate($amount)", saturate_filter),
    ("saturate($color, $amount)", saturate),
    ("desaturate($color, $amount)", desaturate),
    ("grayscale($color)", grayscale),
    ("complement($color)", complement),
    ("invert($color, $weight: 100%)", invert),
    ("opacify($color, $amount)", opacify),
    ("fade-in($color, $amount)", opacify),
    ("transparentize($color, $amount)", transparentize),
    ("fade-out($color, $amount)", transparentize),
    (
        "adjust-color($color, $red: null, $green: null, $blue: null, $hue: null, $saturation: null, $lightness: null, $alpha: null)",
        adjust_color,
    ),
    (
        "scale-color($color, $red: null, $green: null, $blue: null, $saturation: null, $lightness: null, $alpha: null)",
        scale_color,
    ),
    (
        "change-color($color, $red: null, $green: null, $blue: null, $hue: null, $saturation: null, $lightness: null, $alpha: null)",
        change_color,
    ),
    ("ie-hex-str($color)", ie_hex_str),
];

// Argument helpers

/// A channel, `0..=255` or a percentage of 255.
fn rgb_channel(args: &Args<'_>, index: usize) -> EvalResult<f64> {
    let n = args.number(index)?;
    let value = if n.has_unit("%") {
        n.value * 255.0 / 100.0
    } else {
        n.value
    };
    Ok(value.clamp(0.0, 255.0))
}

/// An alpha value, `0..=1` or a percentage.
fn alpha_channel(args: &Args<'_>, index: usize) -> EvalResult<f64> {
    let n = args.number(index)?;
    let value = if n.has_unit("%") { n.value / 100.0 } else { n.value };
    Ok(value.clamp(0.0, 1.0))
}

fn percent_channel(args: &Args<'_>, index: usize) -> EvalResult<f64> {
    Ok(args.number(index)?.value.clamp(0.0, 100.0))
}

/// The Sass `mix()` blend: `weight` percent of `c1`.
pub(crate) fn mix_colors(c1: &Color, c2: &Color, weight: f64) -> Color {
    let p = weight / 100.0;
    let w = 2.0 * p - 1.0;
    let a = c1.a - c2.a;
    let combined = if sable_value::fuzzy_equals(w * a, -1.0) {
        w
    } else {
        (w + a) / (1.0 + w * a)
    };
    let w1 = (combined + 1.0) / 2.0;
    let w2 = 1.0 - w1;
    Color::rgba(
        c1.r * w1 + c2.r * w2,
        c1.g * w1 + c2.g * w2,
        c1.b * w1 + c2.b * w2,
        c1.a * p + c2.a * (1.0 - p),
    )
}

/// A unitless number as a value: `red()` and friends.
fn channel_value(value: u8) -> Value {
    Value::unitless(f64::from(value))
}

/// `name(arg)` left for the browser, as for the CSS filter functions.
fn css_function(interp: &Interpreter<'_>, name: &str, arg: &Value) -> EvalResult {
    Ok(Value::unquoted(format!(
        "{name}({})",
        arg.to_css(interp.precision())?
    )))
}

// Constructors

fn rgb(_: &mut Interpreter<'_>, args: &Args<'_>) -> EvalResult {
    Ok(Value::Color(Color::rgb(
        rgb_channel(args, 0)?,
        rgb_channel(args, 1)?,
        rgb_channel(args, 2)?,
    )))
}

fn rgba(_: &mut Interpreter<'_>, args: &Args<'_>) -> EvalResult {
    Ok(Value::Color(Color::rgba(
        rgb_channel(args, 0)?,
        rgb_channel(args, 1)?,
        rgb_channel(args, 2)?,
        alpha_channel(args, 3)?,
    )))
}

fn rgba_color(_: &mut Interpreter<'_>, args: &Args<'_>) -> EvalResult {
    let color = args.color(0)?;
    Ok(Value::Color(color.with_alpha(alpha_channel(args, 1)?)))
}

fn hsl(_: &mut Interpreter<'_>, args: &Args<'_>) -> EvalResult {
    Ok(Value::Color(Color::from_hsla(
        args.number(0)?.value,
        percent_channel(args, 1)?,
        percent_channel(args, 2)?,
        1.0,
    )))
}

fn hsla(interp: &mut Interpreter<'_>, args: &Args<'_>) -> EvalResult {
    let alpha = args.number(3)?;
    if alpha.has_unit("%") {
        interp.deprecation(
            args.span,
            format!(
                "Passing a percentage as the alpha value to hsla() will be interpreted differently in future versions of Sass. For now, use {} instead.",
                sable_value::format_number(alpha.value / 100.0, interp.precision())
            ),
        );
    }
    Ok(Value::Color(Color::from_hsla(
        args.number(0)?.value,
        percent_channel(args, 1)?,
        percent_channel(args, 2)?,
        alpha_channel(args, 3)?,
    )))
}

// Channel accessors

fn red(interp: &mut Interpreter<'_>, args: &Args<'_>) -> EvalResult {
    let [r, _, _] = args.color(0)?.rounded_channels(interp.precision());
    Ok(channel_value(r))
}

fn green(interp: &mut Interpreter<'_>, args: &Args<'_>) -> EvalResult {
    let [_, g, _] = args.color(0)?.rounded_channels(interp.precision());
    Ok(channel_value(g))
}

fn blue(interp: &mut Interpreter<'_>, args: &Args<'_>) -> EvalResult {
    let [_, _, b] = args.color(0)?.rounded_channels(interp.precision());
    Ok(channel_value(b))
}

fn hue(_: &mut Interpreter<'_>, args: &Args<'_>) -> EvalResult {
    let (h, _, _) = args.color(0)?.hsl();
    Ok(Value::number(h, "deg"))
}

fn saturation(_: &mut Interpreter<'_>, args: &Args<'_>) -> EvalResult {
    let (_, s, _) = args.color(0)?.hsl();
    Ok(Value::number(s, "%"))
}

fn lightness(_: &mut Interpreter<'_>, args: &Args<'_>) -> EvalResult {
    let (_, _, l) = args.color(0)?.hsl();
    Ok(Value::number(l, "%"))
}

/// Also accepts the IE filter syntax `alpha(opacity=50)`.
fn alpha(_: &mut Interpreter<'_>, args: &Args<'_>) -> EvalResult {
    if let Value::String(s) = args.get(0) {
        if !s.quoted && s.text.starts_with("opacity=") {
            return Ok(Value::unquoted(format!("alpha({})", s.text)));
        }
    }
    Ok(Value::unitless(args.color(0)?.a))
}

fn opacity(interp: &mut Interpreter<'_>, args: &Args<'_>) -> EvalResult {
    if let Value::Number(_) = args.get(0) {
        return css_function(interp, "opacity", args.get(0));
    }
    Ok(Value::unitless(args.color(0)?.a))
}

// Mixing and HSL adjustments

fn mix(_: &mut Interpreter<'_>, args: &Args<'_>) -> EvalResult {
    let c1 = args.color(0)?;
    let c2 = args.color(1)?;
    let weight = args.ranged(2, 0.0, 100.0, "%")?;
    Ok(Value::Color(mix_colors(c1, c2, weight)))
}

fn adjust_hue(_: &mut Interpreter<'_>, args: &Args<'_>) -> EvalResult {
    let color = args.color(0)?;
    let degrees = args.number(1)?.value;
    let (h, s, l) = color.hsl();
    Ok(Value::Color(color.with_hsl(h + degrees, s, l)))
}

/// Shift lightness (`lightness: true`) or saturation by `delta` percent.
fn shift_hsl(color: &Color, delta: f64, lightness: bool) -> Value {
    let (h, s, l) = color.hsl();
    let color = if lightness {
        color.with_hsl(h, s, (l + delta).clamp(0.0, 100.0))
    } else {
        color.with_hsl(h, (s + delta).clamp(0.0, 100.0), l)
    };
    Value::Color(color)
}

fn lighten(_: &mut Interpreter<'_>, args: &Args<'_>) -> EvalResult {
    let amount = args.ranged(1, 0.0, 100.0, "%")?;
    Ok(shift_hsl(args.color(0)?, amount, true))
}

fn darken(_: &mut Interpreter<'_>, args: &Args<'_>) -> EvalResult {
    let amount = args.ranged(1, 0.0, 100.0, "%")?;
    Ok(shift_hsl(args.color(0)?, -amount, true))
}

/// `saturate(50%)` is the CSS filter.
fn saturate_filter(interp: &mut Interpreter<'_>, args: &Args<'_>) -> EvalResult {
    args.number(0)?;
    css_function(interp, "saturate", args.get(0))
}

fn saturate(_: &mut Interpreter<'_>, args: &Args<'_>) -> EvalResult {
    let amount = args.ranged(1, 0.0, 100.0, "%")?;
    Ok(shift_hsl(args.color(0)?, amount, false))
}

fn desaturate(_: &mut Interpreter<'_>, args: &Args<'_>) -> EvalResult {
    let amount = args.ranged(1, 0.0, 100.0, "%")?;
    Ok(shift_hsl(args.color(0)?, -amount, false))
}

fn grayscale(interp: &mut Interpreter<'_>, args: &Args<'_>) -> EvalResult {
    if let Value::Number(_) = args.get(0) {
        return css_function(interp, "grayscale", args.get(0));
    }
    let color = args.color(0)?;
    let (h, _, l) = color.hsl();
    Ok(Value::Color(color.with_hsl(h, 0.0, l)))
}

fn complement(_: &mut Interpreter<'_>, args: &Args<'_>) -> EvalResult {
    let color = args.color(0)?;
    let (h, s, l) = color.hsl();
    Ok(Value::Color(color.with_hsl(h + 180.0, s, l)))
}

fn invert(interp: &mut Interpreter<'_>, args: &Args<'_>) -> EvalResult {
    if let Value::Number(_) = args.get(0) {
        return css_function(interp, "invert", args.get(0));
    }
    let color = args.color(0)?;
    let weight = args.ranged(1, 0.0, 100.0, "%")?;
    let inverted = Color::rgba(255.0 - color.r, 255.0 - color.g, 255.0 - color.b, color.a);
    Ok(Value::Color(mix_colors(&inverted, color, weight)))
}

// Opacity

fn opacify(_: &mut Interpreter<'_>, args: &Args<'_>) -> EvalResult {
    let color = args.color(0)?;
    let amount = args.ranged(1, 0.0, 1.0, "")?;
    Ok(Value::Color(color.with_alpha(color.a + amount)))
}

fn transparentize(_: &mut Interpreter<'_>, args: &Args<'_>) -> EvalResult {
    let color = args.color(0)?;
    let amount = args.ranged(1, 0.0, 1.0, "")?;
    Ok(Value::Color(color.with_alpha(color.a - amount)))
}

// adjust-color, scale-color, change-color

/// Channel arguments of the three multi-channel functions, as positions
/// in their parameter lists.
struct Channels {
    rgb: [Option<f64>; 3],
    hsl: [Option<f64>; 3],
    alpha: Option<f64>,
}

impl Channels {
    fn has_rgb(&self) -> bool {
        self.rgb.iter().any(Option::is_some)
    }

    fn has_hsl(&self) -> bool {
        self.hsl.iter().any(Option::is_some)
    }

    fn check_exclusive(&self, function: &str) -> EvalResult<()> {
        if self.has_rgb() && self.has_hsl() {
            return Err(EvalError::new(format!(
                "Cannot specify HSL and RGB values for a color at the same time for `{function}'"
            )));
        }
        Ok(())
    }
}

fn adjust_color(_: &mut Interpreter<'_>, args: &Args<'_>) -> EvalResult {
    let color = args.color(0)?;
    let channels = Channels {
        rgb: [
            args.optional_ranged(1, -255.0, 255.0, "")?,
            args.optional_ranged(2, -255.0, 255.0, "")?,
            args.optional_ranged(3, -255.0, 255.0, "")?,
        ],
        hsl: [
            args.optional_ranged(4, f64::MIN, f64::MAX, "deg")?,
            args.optional_ranged(5, -100.0, 100.0, "%")?,
            args.optional_ranged(6, -100.0, 100.0, "%")?,
        ],
        alpha: args.optional_ranged(7, -1.0, 1.0, "")?,
    };
    channels.check_exclusive("adjust-color")?;

    let [dr, dg, db] = channels.rgb.map(|d| d.unwrap_or(0.0));
    let [dh, ds, dl] = channels.hsl.map(|d| d.unwrap_or(0.0));
    let mut result = if channels.has_rgb() {
        color.with_rgb(
            (color.r + dr).clamp(0.0, 255.0),
            (color.g + dg).clamp(0.0, 255.0),
            (color.b + db).clamp(0.0, 255.0),
        )
    } else if channels.has_hsl() {
        let (h, s, l) = color.hsl();
        color.with_hsl(h + dh, (s + ds).clamp(0.0, 100.0), (l + dl).clamp(0.0, 100.0))
    } else {
        color.with_alpha(color.a)
    };
    if let Some(da) = channels.alpha {
        result = result.with_alpha(result.a + da);
    }
    Ok(Value::Color(result))
}

/// Move `value` towards `max` (positive `amount`) or zero by a fraction.
fn scale(value: f64, amount: f64, max: f64) -> f64 {
    if amount > 0.0 {
        value + (max - value) * amount
    } else {
        value + value * amount
    }
}

/// A `scale-color()` amount: a percentage between -100% and 100%, as a
/// fraction.
fn scale_amount(args: &Args<'_>, index: usize) -> EvalResult<Option<f64>> {
    if args.is_null(index) {
        return Ok(None);
    }
    let n = args.number(index)?;
    if !n.has_unit("%") {
        return Err(EvalError::new(format!(
            "${}: Amount {} must be a % (e.g. {}%)",
            args.param(index),
            n.format(sable_value::DEFAULT_PRECISION),
            sable_value::format_number(n.value, sable_value::DEFAULT_PRECISION)
        )));
    }
    Ok(args.optional_ranged(index, -100.0, 100.0, "%")?.map(|v| v / 100.0))
}

fn scale_color(_: &mut Interpreter<'_>, args: &Args<'_>) -> EvalResult {
    let color = args.color(0)?;
    let channels = Channels {
        rgb: [
            scale_amount(args, 1)?,
            scale_amount(args, 2)?,
            scale_amount(args, 3)?,
        ],
        hsl: [None, scale_amount(args, 4)?, scale_amount(args, 5)?],
        alpha: scale_amount(args, 6)?,
    };
    channels.check_exclusive("scale-color")?;

    let [dr, dg, db] = channels.rgb.map(|d| d.unwrap_or(0.0));
    let [_, ds, dl] = channels.hsl.map(|d| d.unwrap_or(0.0));
    let mut result = if channels.has_rgb() {
        color.with_rgb(
            scale(color.r, dr, 255.0),
            scale(color.g, dg, 255.0),
            scale(color.b, db, 255.0),
        )
    } else if channels.has_hsl() {
        let (h, s, l) = color.hsl();
        color.with_hsl(h, scale(s, ds, 100.0), scale(l, dl, 100.0))
    } else {
        color.with_alpha(color.a)
    };
    if let Some(da) = channels.alpha {
        result = result.with_alpha(scale(result.a, da, 1.0));
    }
    Ok(Value::Color(result))
}

fn change_color(_: &mut Interpreter<'_>, args: &Args<'_>) -> EvalResult {
    let color = args.color(0)?;
    let channels = Channels {
        rgb: [
            args.optional_ranged(1, 0.0, 255.0, "")?,
            args.optional_ranged(2, 0.0, 255.0, "")?,
            args.optional_ranged(3, 0.0, 255.0, "")?,
        ],
        hsl: [
            args.optional_ranged(4, f64::MIN, f64::MAX, "deg")?,
            args.optional_ranged(5, 0.0, 100.0, "%")?,
            args.optional_ranged(6, 0.0, 100.0, "%")?,
        ],
        alpha: args.optional_ranged(7, 0.0, 1.0, "")?,
    };
    channels.check_exclusive("change-color")?;

    let mut result = if channels.has_rgb() {
        let [r, g, b] = channels.rgb;
        color.with_rgb(
            r.unwrap_or(color.r),
            g.unwrap_or(color.g),
            b.unwrap_or(color.b),
        )
    } else if channels.has_hsl() {
        let (h, s, l) = color.hsl();
        let [nh, ns, nl] = channels.hsl;
        color.with_hsl(nh.unwrap_or(h), ns.unwrap_or(s), nl.unwrap_or(l))
    } else {
        color.with_alpha(color.a)
    };
    if let Some(a) = channels.alpha {
        result = result.with_alpha(a);
    }
    Ok(Value::Color(result))
}

fn ie_hex_str(interp: &mut Interpreter<'_>, args: &Args<'_>) -> EvalResult {
    Ok(Value::unquoted(args.color(0)?.ie_hex(interp.precision())))
}
