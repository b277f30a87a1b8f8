//! Immediate literal parsing and exact-round-trip formatting.

/// Parses one `l(...)` component into its 32-bit pattern.
///
/// Accepts hex (`0x3f800000`), signed decimal integers, decimal and scientific
/// floats, and the `1.#INF00` / `1.#QNAN0` / `-1.#IND00` spellings.
pub fn parse_u32_literal(text: &str) -> Option<u32> {
    let text = text.trim();
    if let Some(hex) = strip_hex_prefix(text) {
        return u32::from_str_radix(hex, 16).ok();
    }
    if let Some(bits) = parse_special_f32(text) {
        return Some(bits);
    }
    if looks_like_float(text) {
        return text.parse::<f32>().ok().map(f32::to_bits);
    }
    let value = text.parse::<i64>().ok()?;
    if value < 0 {
        i32::try_from(value).ok().map(|v| v as u32)
    } else {
        u32::try_from(value).ok()
    }
}

/// Parses one decimal `d(...)` component (trailing `l` optional).
pub fn parse_f64_literal(text: &str) -> Option<f64> {
    let text = text.trim();
    let text = text
        .strip_suffix('l')
        .or_else(|| text.strip_suffix('L'))
        .unwrap_or(text);
    if let Some(bits) = parse_special_f32(text) {
        return Some(f64::from(f32::from_bits(bits)));
    }
    text.parse::<f64>().ok()
}

pub fn is_hex_literal(text: &str) -> bool {
    strip_hex_prefix(text.trim()).is_some()
}

fn strip_hex_prefix(text: &str) -> Option<&str> {
    text.strip_prefix("0x").or_else(|| text.strip_prefix("0X"))
}

fn looks_like_float(text: &str) -> bool {
    text.contains(['.', 'e', 'E']) || text.eq_ignore_ascii_case("inf") || text.eq_ignore_ascii_case("-inf")
}

fn parse_special_f32(text: &str) -> Option<u32> {
    let negative = text.starts_with('-');
    let upper = text.to_ascii_uppercase();
    if upper.contains("#INF") {
        Some(if negative { 0xff80_0000 } else { 0x7f80_0000 })
    } else if upper.contains("#QNAN") || upper.contains("#IND") || upper.trim_start_matches('-') == "NAN" {
        Some(if negative { 0xffc0_0000 } else { 0x7fc0_0000 })
    } else {
        None
    }
}

/// Formats an `f32` bit pattern so that [`parse_u32_literal`] recovers it exactly.
///
/// The decimal exponent picks the precision: exponent 0 prints 8 decimals,
/// exponents -1 through -6 print `8 + |exp|` decimals, anything else uses
/// scientific notation with 9 significant digits. Non-finite values, and any
/// value whose text would not reparse to the same bits, print as `0x%08x`.
pub fn format_f32(bits: u32) -> String {
    let value = f32::from_bits(bits);
    let hex = || format!("0x{bits:08x}");
    if !value.is_finite() {
        return hex();
    }
    let probe = format!("{value:.9e}");
    let Some(exp) = probe.split_once('e').and_then(|(_, e)| e.parse::<i32>().ok()) else {
        return hex();
    };
    let text = match exp {
        0 => format!("{value:.8}"),
        -6..=-1 => format!("{:.*}", (8 - exp) as usize, value),
        _ => format!("{value:.8e}"),
    };
    if parse_u32_literal(&text) == Some(bits) {
        text
    } else {
        hex()
    }
}

/// Formats a double like C's `%.17g`, always with a radix point and an `l` suffix.
///
/// Returns `None` for infinities and NaNs, which have no reliable text form.
pub fn format_f64(value: f64) -> Option<String> {
    if !value.is_finite() {
        return None;
    }
    let probe = format!("{value:.16e}");
    let (mantissa, exp) = probe.split_once('e')?;
    let exp: i32 = exp.parse().ok()?;

    let mut text = if (-4..17).contains(&exp) {
        trim_fraction(format!("{:.*}", (16 - exp) as usize, value))
    } else {
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{}e{sign}{:02}", trim_fraction(mantissa.to_owned()), exp.abs())
    };
    if !text.contains('.') {
        match text.find('e') {
            Some(pos) => text.insert_str(pos, ".0"),
            None => text.push_str(".0"),
        }
    }
    text.push('l');
    Some(text)
}

fn trim_fraction(mut text: String) -> String {
    if text.contains('.') {
        let keep = text.trim_end_matches('0').trim_end_matches('.').len();
        text.truncate(keep);
    }
    text
}

/// Splits a double into the two little-endian words it occupies in the stream.
pub fn f64_words(value: f64) -> [u32; 2] {
    let bits = value.to_bits();
    [bits as u32, (bits >> 32) as u32]
}

pub fn f64_from_words(lo: u32, hi: u32) -> f64 {
    f64::from_bits(u64::from(hi) << 32 | u64::from(lo))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_every_component_spelling() {
        assert_eq!(parse_u32_literal("1.000000"), Some(0x3f80_0000));
        assert_eq!(parse_u32_literal("-0.500000"), Some(0xbf00_0000));
        assert_eq!(parse_u32_literal("1.5e-3"), Some(0.0015f32.to_bits()));
        assert_eq!(parse_u32_literal("0x3f800000"), Some(0x3f80_0000));
        assert_eq!(parse_u32_literal("7"), Some(7));
        assert_eq!(parse_u32_literal("-1"), Some(0xffff_ffff));
        assert_eq!(parse_u32_literal("4294967295"), Some(u32::MAX));
        assert_eq!(parse_u32_literal("4294967296"), None);
        assert_eq!(parse_u32_literal("1.#INF00"), Some(0x7f80_0000));
        assert_eq!(parse_u32_literal("-1.#INF00"), Some(0xff80_0000));
        assert_eq!(parse_u32_literal("1.#QNAN0"), Some(0x7fc0_0000));
        assert_eq!(parse_u32_literal("-1.#IND00"), Some(0xffc0_0000));
        assert_eq!(parse_u32_literal("r0"), None);
    }

    #[test]
    fn one_formats_with_eight_decimals() {
        assert_eq!(format_f32(0x3f80_0000), "1.00000000");
        assert_eq!(parse_u32_literal("1.00000000"), Some(0x3f80_0000));
    }

    #[test]
    fn precision_follows_the_exponent() {
        assert_eq!(format_f32(0.1f32.to_bits()), "0.100000001");
        assert_eq!(format_f32(0.0015f32.to_bits()).split('.').nth(1).map(str::len), Some(11));
        assert_eq!(format_f32(1.0e10f32.to_bits()), "1.00000000e10");
        assert_eq!(format_f32(0x8000_0000), "-0.00000000");
        assert_eq!(format_f32(0x7f80_0000), "0x7f800000");
        assert_eq!(format_f32(0x7fc0_0001), "0x7fc00001");
    }

    #[test]
    fn doubles_use_seventeen_digits_and_suffix() {
        assert_eq!(format_f64(1.0).as_deref(), Some("1.0l"));
        assert_eq!(format_f64(2.5).as_deref(), Some("2.5l"));
        assert_eq!(format_f64(0.1).as_deref(), Some("0.10000000000000001l"));
        assert_eq!(format_f64(1e300).as_deref(), Some("1.0000000000000001e+300l"));
        assert_eq!(format_f64(f64::NAN), None);
        assert_eq!(format_f64(f64::NEG_INFINITY), None);
    }

    #[test]
    fn double_words_are_low_then_high() {
        assert_eq!(f64_words(1.0), [0, 0x3ff0_0000]);
        assert_eq!(f64_from_words(0, 0x3ff0_0000), 1.0);
    }

    #[test]
    fn every_sampled_float_round_trips() {
        let mut bits = 1u32;
        for _ in 0..4096 {
            bits = bits.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
            let text = format_f32(bits);
            assert_eq!(parse_u32_literal(&text), Some(bits), "{bits:#010x} -> {text}");
        }
    }

    #[test]
    fn every_sampled_double_round_trips() {
        let mut bits = 7u64;
        for _ in 0..4096 {
            bits = bits.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1_442_695_040_888_963_407);
            let value = f64::from_bits(bits);
            if let Some(text) = format_f64(value) {
                assert_eq!(parse_f64_literal(&text).map(f64::to_bits), Some(bits), "{text}");
            }
        }
    }
}
