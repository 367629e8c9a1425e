//! Java numeric and string primitives.
//!
//! Bit conversions canonicalize NaN like `Float.floatToIntBits` and
//! `Double.doubleToLongBits`; comparisons follow `Float.compare` and
//! `Double.compare`; text follows `Float.toString` and `Double.toString`.

use std::cmp::Ordering;

const CANONICAL_FLOAT_NAN: i32 = 0x7fc0_0000;
const CANONICAL_DOUBLE_NAN: i64 = 0x7ff8_0000_0000_0000;

pub fn float_to_int_bits(value: f32) -> i32 {
    if value.is_nan() {
        CANONICAL_FLOAT_NAN
    } else {
        value.to_bits() as i32
    }
}

pub fn double_to_long_bits(value: f64) -> i64 {
    if value.is_nan() {
        CANONICAL_DOUBLE_NAN
    } else {
        value.to_bits() as i64
    }
}

/// `Float.compare`: `-0.0` sorts below `0.0`, NaN above everything and equal to itself.
pub fn float_compare(a: f32, b: f32) -> Ordering {
    match a.partial_cmp(&b) {
        Some(Ordering::Equal) | None => float_to_int_bits(a).cmp(&float_to_int_bits(b)),
        Some(ordering) => ordering,
    }
}

/// `Double.compare`.
pub fn double_compare(a: f64, b: f64) -> Ordering {
    match a.partial_cmp(&b) {
        Some(Ordering::Equal) | None => double_to_long_bits(a).cmp(&double_to_long_bits(b)),
        Some(ordering) => ordering,
    }
}

/// Fold a long into an int the way `Long.hashCode` does.
pub fn fold_long(value: i64) -> i32 {
    (value ^ ((value as u64) >> 32) as i64) as i32
}

/// `String.hashCode` over UTF-16 code units.
pub fn string_hash(text: &str) -> i32 {
    text.encode_utf16()
        .fold(0i32, |hash, unit| hash.wrapping_mul(31).wrapping_add(unit as i32))
}

pub fn float_to_string(value: f32) -> String {
    if let Some(special) = special_to_string(value.is_nan(), value.is_infinite(), value == 0.0, value.is_sign_negative()) {
        return special;
    }
    // `{:e}` yields the shortest digits that read back as the same float
    layout(&format!("{:e}", value))
}

pub fn double_to_string(value: f64) -> String {
    if let Some(special) = special_to_string(value.is_nan(), value.is_infinite(), value == 0.0, value.is_sign_negative()) {
        return special;
    }
    layout(&format!("{:e}", value))
}

fn special_to_string(nan: bool, infinite: bool, zero: bool, negative: bool) -> Option<String> {
    let sign = if negative { "-" } else { "" };
    if nan {
        Some("NaN".to_string())
    } else if infinite {
        Some(format!("{}Infinity", sign))
    } else if zero {
        Some(format!("{}0.0", sign))
    } else {
        None
    }
}

/// Lay out Rust scientific notation (`-1.25e-4`) as Java does: plain decimal
/// for magnitudes in [1e-3, 1e7), otherwise `d.dddE<exp>`.
fn layout(scientific: &str) -> String {
    let (sign, unsigned) = match scientific.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", scientific),
    };
    let (mantissa, exponent) = unsigned.split_once('e').unwrap_or((unsigned, "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();

    let body = if (-3..7).contains(&exponent) {
        if exponent >= 0 {
            let split = exponent as usize + 1;
            if digits.len() > split {
                format!("{}.{}", &digits[..split], &digits[split..])
            } else {
                format!("{}{}.0", digits, "0".repeat(split - digits.len()))
            }
        } else {
            format!("0.{}{}", "0".repeat((-exponent - 1) as usize), digits)
        }
    } else {
        let fraction = if digits.len() > 1 { &digits[1..] } else { "0" };
        format!("{}.{}E{}", &digits[..1], fraction, exponent)
    };
    format!("{}{}", sign, body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nan_bits_are_canonical() {
        let other_nan = f32::from_bits(0x7fc0_0001);
        assert!(other_nan.is_nan());
        assert_eq!(float_to_int_bits(other_nan), float_to_int_bits(f32::NAN));
        assert_eq!(double_to_long_bits(f64::NAN), 0x7ff8_0000_0000_0000);
    }

    #[test]
    fn test_compare_zero_and_nan() {
        assert_eq!(float_compare(-0.0, 0.0), Ordering::Less);
        assert_eq!(float_compare(f32::NAN, f32::NAN), Ordering::Equal);
        assert_eq!(double_compare(f64::NAN, f64::INFINITY), Ordering::Greater);
        assert_eq!(double_compare(1.5, 1.5), Ordering::Equal);
    }

    #[test]
    fn test_string_hash() {
        assert_eq!(string_hash(""), 0);
        assert_eq!(string_hash("a"), 97);
        assert_eq!(string_hash("hello world"), 1794106052);
    }

    #[test]
    fn test_fold_long() {
        assert_eq!(fold_long(17), 17);
        assert_eq!(fold_long(-1), 0);
        assert_eq!(fold_long(1 << 32), 1);
    }

    #[test]
    fn test_double_to_string() {
        assert_eq!(double_to_string(17.0), "17.0");
        assert_eq!(double_to_string(0.5), "0.5");
        assert_eq!(double_to_string(-0.0), "-0.0");
        assert_eq!(double_to_string(123.456), "123.456");
        assert_eq!(double_to_string(0.001), "0.001");
        assert_eq!(double_to_string(1.0e7), "1.0E7");
        assert_eq!(double_to_string(1.25e-4), "1.25E-4");
        assert_eq!(double_to_string(f64::NAN), "NaN");
        assert_eq!(double_to_string(f64::NEG_INFINITY), "-Infinity");
        assert_eq!(double_to_string(1_000_000.0), "1000000.0");
    }

    #[test]
    fn test_float_to_string() {
        assert_eq!(float_to_string(0.1), "0.1");
        assert_eq!(float_to_string(3.0), "3.0");
        assert_eq!(float_to_string(-2.5e10), "-2.5E10");
    }
}
