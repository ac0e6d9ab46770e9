//! Color form-field parsing.
//!
//! Colors arrive as loosely-typed strings: `#RRGGBB` / `#RRGGBBAA` hex or a
//! 3-4 element comma-separated numeric list. Malformed input never aborts a
//! request; the parser yields `None` and the caller substitutes its default
//! visibly at the call site.

use crate::imaging::Rgba;

/// Parse an optional color field.
///
/// - Absent / empty / whitespace-only input → `None`.
/// - `#`-prefixed input must be exactly 6 or 8 hex digits; 6 digits imply an
///   alpha of 255. Anything else → `None`.
/// - Otherwise the input is split on commas: exactly 3 or 4 numeric fields,
///   each parsed as a float and clamped to [0, 255]; 3 fields imply an alpha
///   of 255. Any non-numeric token or other field count → `None`.
pub fn parse_rgba(raw: Option<&str>) -> Option<Rgba> {
    let value = raw?.trim();
    if value.is_empty() {
        return None;
    }

    if let Some(hex) = value.strip_prefix('#') {
        return parse_hex(hex);
    }

    parse_comma_list(value)
}

fn parse_hex(hex: &str) -> Option<Rgba> {
    if hex.len() != 6 && hex.len() != 8 {
        return None;
    }

    let byte_at = |index: usize| -> Option<u8> {
        let pair = hex.get(index * 2..index * 2 + 2)?;
        u8::from_str_radix(pair, 16).ok()
    };

    let r = byte_at(0)?;
    let g = byte_at(1)?;
    let b = byte_at(2)?;
    let a = if hex.len() == 8 { byte_at(3)? } else { 255 };

    Some(Rgba::new(r, g, b, a))
}

fn parse_comma_list(value: &str) -> Option<Rgba> {
    let parts: Vec<&str> = value.split(',').map(str::trim).collect();
    if parts.len() != 3 && parts.len() != 4 {
        return None;
    }

    let mut channels = [255u8; 4];
    for (index, part) in parts.iter().enumerate() {
        let number: f64 = part.parse().ok()?;
        channels[index] = clamp_channel(number);
    }

    Some(Rgba::new(channels[0], channels[1], channels[2], channels[3]))
}

fn clamp_channel(value: f64) -> u8 {
    value.clamp(0.0, 255.0).round() as u8
}

/// Clamp an opacity value to [0, 1].
pub fn clamp_opacity(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}

/// Resolve a color field with an optional opacity override.
///
/// The opacity, when present, is clamped, scaled to [0, 255], and replaces
/// whatever alpha the parsed color carried. Parsing failures fall back to
/// `default` before the override is applied.
pub fn resolve_color(raw: Option<&str>, opacity: Option<f64>, default: Rgba) -> Rgba {
    let color = parse_rgba(raw).unwrap_or(default);
    match opacity {
        Some(value) => color.with_alpha((clamp_opacity(value) * 255.0).round() as u8),
        None => color,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_parse_hex_rrggbb() {
        assert_eq!(
            parse_rgba(Some("#FF0000")),
            Some(Rgba::new(255, 0, 0, 255))
        );
        assert_eq!(
            parse_rgba(Some("#00ff00")),
            Some(Rgba::new(0, 255, 0, 255))
        );
        assert_eq!(
            parse_rgba(Some("#123456")),
            Some(Rgba::new(0x12, 0x34, 0x56, 255))
        );
    }

    #[test]
    fn test_parse_hex_rrggbbaa() {
        assert_eq!(
            parse_rgba(Some("#FF000080")),
            Some(Rgba::new(255, 0, 0, 0x80))
        );
        assert_eq!(
            parse_rgba(Some("#00000000")),
            Some(Rgba::new(0, 0, 0, 0))
        );
    }

    #[rstest]
    #[case("#FFF")]
    #[case("#FF00")]
    #[case("#FF000")]
    #[case("#FF00000")]
    #[case("#FF0000000")]
    #[case("#GGGGGG")]
    #[case("#FF00ZZ")]
    fn test_parse_hex_malformed_is_none(#[case] input: &str) {
        assert_eq!(parse_rgba(Some(input)), None);
    }

    #[test]
    fn test_parse_comma_list() {
        assert_eq!(
            parse_rgba(Some("255,0,0")),
            Some(Rgba::new(255, 0, 0, 255))
        );
        assert_eq!(
            parse_rgba(Some("10, 20, 30, 40")),
            Some(Rgba::new(10, 20, 30, 40))
        );
    }

    #[test]
    fn test_parse_comma_list_clamps() {
        assert_eq!(
            parse_rgba(Some("300,-5,128.4,999")),
            Some(Rgba::new(255, 0, 128, 255))
        );
    }

    #[rstest]
    #[case("1,2")]
    #[case("1,2,3,4,5")]
    #[case("1,2,red")]
    #[case("a,b,c")]
    #[case(",,")]
    fn test_parse_comma_list_malformed_is_none(#[case] input: &str) {
        assert_eq!(parse_rgba(Some(input)), None);
    }

    #[test]
    fn test_parse_absent_or_blank_is_none() {
        assert_eq!(parse_rgba(None), None);
        assert_eq!(parse_rgba(Some("")), None);
        assert_eq!(parse_rgba(Some("   ")), None);
    }

    #[test]
    fn test_parse_trims_surrounding_whitespace() {
        assert_eq!(
            parse_rgba(Some("  #FF0000  ")),
            Some(Rgba::new(255, 0, 0, 255))
        );
    }

    #[test]
    fn test_clamp_opacity_bounds() {
        assert_eq!(clamp_opacity(-0.5), 0.0);
        assert_eq!(clamp_opacity(0.0), 0.0);
        assert_eq!(clamp_opacity(0.5), 0.5);
        assert_eq!(clamp_opacity(1.0), 1.0);
        assert_eq!(clamp_opacity(1.5), 1.0);
    }

    #[test]
    fn test_clamp_opacity_idempotent() {
        for value in [-2.0, -0.1, 0.0, 0.3, 0.99, 1.0, 7.5] {
            assert_eq!(clamp_opacity(clamp_opacity(value)), clamp_opacity(value));
        }
    }

    #[test]
    fn test_clamp_opacity_monotonic() {
        let inputs = [-1.0, 0.0, 0.25, 0.5, 0.75, 1.0, 2.0];
        for pair in inputs.windows(2) {
            assert!(clamp_opacity(pair[0]) <= clamp_opacity(pair[1]));
        }
    }

    #[test]
    fn test_resolve_color_opacity_overrides_hex_alpha() {
        // Hex alpha 0xFF with opacity 0.25 → alpha 64
        let color = resolve_color(Some("#FF0000FF"), Some(0.25), Rgba::white());
        assert_eq!(color, Rgba::new(255, 0, 0, 64));
    }

    #[test]
    fn test_resolve_color_falls_back_to_default() {
        let default = Rgba::new(1, 2, 3, 4);
        assert_eq!(resolve_color(Some("bogus"), None, default), default);
        assert_eq!(resolve_color(None, None, default), default);
    }

    #[test]
    fn test_resolve_color_opacity_applies_to_default() {
        let default = Rgba::white();
        let color = resolve_color(None, Some(0.5), default);
        assert_eq!(color, Rgba::new(255, 255, 255, 128));
    }
}
