//! Numeric helpers: color channels to hex, paints and shadows to CSS values.
use crate::node::{Color, Effect, Paint};

/// One `[0, 1]` channel as two lowercase hex digits.
///
/// Out-of-range input is clamped; NaN encodes as `00`.
pub fn to_hex2(v: f64) -> String {
    let scaled = (v * 255.0).round();
    let byte = if scaled.is_nan() { 0 } else { scaled.clamp(0.0, 255.0) as u8 };
    format!("{byte:02x}")
}

/// `#rrggbb`, or `#rrggbbaa` when `opacity` is below 1.
pub fn color_to_css(color: &Color, opacity: Option<f64>) -> String {
    let mut out = format!("#{}{}{}", to_hex2(color.r), to_hex2(color.g), to_hex2(color.b));
    if let Some(alpha) = opacity.filter(|a| *a < 1.0) {
        out.push_str(&to_hex2(alpha));
    }
    out
}

/// Top-to-bottom `linear-gradient(...)`; stops keep their list order.
pub fn gradient_to_css(paint: &Paint) -> String {
    let stops = paint
        .gradient_stops
        .iter()
        .map(|stop| {
            let color = color_to_css(&stop.color, stop.color.a);
            format!("{color} {}%", num((stop.position * 100.0).round()))
        })
        .collect::<Vec<_>>();
    let stops = if stops.is_empty() { "transparent".to_string() } else { stops.join(", ") };
    format!("linear-gradient(180deg, {stops})")
}

/// `Xpx Ypx BLURpx SPREADpx color` for a drop shadow.
pub fn shadow_to_css(effect: &Effect) -> String {
    let (x, y) = effect.offset.map(|o| (o.x, o.y)).unwrap_or((0.0, 0.0));
    let blur = effect.radius.unwrap_or(0.0);
    let spread = effect.spread.unwrap_or(0.0);
    let color = effect
        .color
        .as_ref()
        .map(|c| color_to_css(c, c.a))
        .unwrap_or_else(|| "#000000".to_string());
    format!("{}px {}px {}px {}px {color}", num(x), num(y), num(blur), num(spread))
}

pub fn px(n: f64) -> String {
    format!("{}px", num(n))
}

/// Number text without a trailing `.0` and without `-0`.
pub fn num(n: f64) -> String {
    if n == 0.0 { "0".to_string() } else { format!("{n}") }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{EffectKind, GradientStop, Vector};

    #[test]
    fn hex_pads_and_clamps() {
        assert_eq!(to_hex2(0.0), "00");
        assert_eq!(to_hex2(1.0), "ff");
        assert_eq!(to_hex2(0.02), "05");
        assert_eq!(to_hex2(0.5), "80");
        assert_eq!(to_hex2(1.7), "ff");
        assert_eq!(to_hex2(-0.3), "00");
        assert_eq!(to_hex2(f64::NAN), "00");
    }

    #[test]
    fn opaque_colors_have_six_digits() {
        let c = Color::rgb(1.0, 0.0, 0.5);
        assert_eq!(color_to_css(&c, None), "#ff0080");
        assert_eq!(color_to_css(&c, Some(1.0)), "#ff0080");
        assert_eq!(color_to_css(&c, Some(0.5)), "#ff008080");
    }

    #[test]
    fn gradient_keeps_source_order() {
        let paint = Paint::linear_gradient(vec![
            GradientStop { color: Color::rgb(0.0, 0.0, 0.0), position: 1.0 },
            GradientStop { color: Color { a: Some(0.0), ..Color::rgb(1.0, 1.0, 1.0) }, position: 0.254 },
        ]);
        assert_eq!(
            gradient_to_css(&paint),
            "linear-gradient(180deg, #000000 100%, #ffffff00 25%)"
        );
        assert_eq!(
            gradient_to_css(&Paint::linear_gradient(Vec::new())),
            "linear-gradient(180deg, transparent)"
        );
    }

    #[test]
    fn shadow_defaults_missing_parts() {
        let bare = Effect {
            kind: EffectKind::DropShadow,
            visible: None,
            offset: None,
            radius: None,
            spread: None,
            color: None,
        };
        assert_eq!(shadow_to_css(&bare), "0px 0px 0px 0px #000000");

        let mut shadow = Effect::drop_shadow(0.0, 4.0, 8.5, Color { a: Some(0.25), ..Color::rgb(0.0, 0.0, 0.0) });
        shadow.offset = Some(Vector { x: -2.0, y: 4.0 });
        assert_eq!(shadow_to_css(&shadow), "-2px 4px 8.5px 0px #00000040");
    }

    #[test]
    fn pixels_format_like_numbers() {
        assert_eq!(px(8.0), "8px");
        assert_eq!(px(12.5), "12.5px");
        assert_eq!(px(-0.0), "0px");
    }
}
