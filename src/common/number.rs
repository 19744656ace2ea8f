//! Low-level number parsing and formatting helpers.
//!
//! Parsers return `None` for malformed input; callers decide whether a
//! missing value is worth a diagnostic.

/// Parse a floating-point number, tolerating surrounding whitespace.
#[inline]
pub fn parse_double(value: &str) -> Option<f64> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    fast_float2::parse::<f64, _>(value).ok().filter(|v| v.is_finite())
}

/// Parse an unsigned integer, tolerating surrounding whitespace.
#[inline]
pub fn parse_unsigned(value: &str) -> Option<u32> {
    atoi_simd::parse::<u32, false, false>(value.trim().as_bytes()).ok()
}

/// Parse a boolean as written by the format: `1`/`0` or `true`/`false`.
pub fn parse_bool(value: &str) -> Option<bool> {
    match value.trim() {
        "1" | "true" | "yes" => Some(true),
        "0" | "false" | "no" => Some(false),
        _ => None,
    }
}

/// Parse a whitespace-separated pair such as `"1024 768"`.
pub fn parse_pair(value: &str) -> Option<(f64, f64)> {
    let mut parts = value.split_ascii_whitespace();
    let first = parse_double(parts.next()?)?;
    let second = parse_double(parts.next()?)?;
    if parts.next().is_some() {
        return None;
    }
    Some((first, second))
}

/// Write a number compactly: integers without a fraction, other values
/// rounded to at most four decimals with trailing zeros removed.
///
/// # Examples
///
/// ```
/// use apxl::common::number::write_num;
///
/// let mut buf = String::new();
/// write_num(&mut buf, 10.0);
/// buf.push(' ');
/// write_num(&mut buf, -0.5);
/// buf.push(' ');
/// write_num(&mut buf, 1.0 / 3.0);
/// assert_eq!(buf, "10 -0.5 0.3333");
/// ```
#[inline]
pub fn write_num(buf: &mut String, n: f64) {
    let rounded = (n * 10_000.0).round() / 10_000.0;
    if rounded.fract() == 0.0 && rounded.abs() < 1e15 {
        // Avoid "-0"
        let mut ints = itoa::Buffer::new();
        buf.push_str(ints.format(rounded as i64));
    } else if !rounded.is_finite() {
        buf.push('0');
    } else {
        let mut floats = ryu::Buffer::new();
        let s = floats.format(rounded);
        if s.contains('.') && !s.contains('e') {
            buf.push_str(s.trim_end_matches('0').trim_end_matches('.'));
        } else {
            buf.push_str(s);
        }
    }
}

/// Format a number with [`write_num`].
#[inline]
pub fn fmt_num(n: f64) -> String {
    let mut s = String::with_capacity(16);
    write_num(&mut s, n);
    s
}

/// Compare two numbers with an absolute tolerance.
#[inline]
pub fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
    (a - b).abs() <= eps
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_double() {
        assert_eq!(parse_double("1.5"), Some(1.5));
        assert_eq!(parse_double(" -2 "), Some(-2.0));
        assert_eq!(parse_double("1e2"), Some(100.0));
        assert_eq!(parse_double(""), None);
        assert_eq!(parse_double("abc"), None);
    }

    #[test]
    fn test_parse_unsigned() {
        assert_eq!(parse_unsigned("5"), Some(5));
        assert_eq!(parse_unsigned(" 12 "), Some(12));
        assert_eq!(parse_unsigned("-1"), None);
    }

    #[test]
    fn test_parse_bool() {
        assert_eq!(parse_bool("1"), Some(true));
        assert_eq!(parse_bool("false"), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }

    #[test]
    fn test_fmt_num() {
        assert_eq!(fmt_num(0.0), "0");
        assert_eq!(fmt_num(-0.0), "0");
        assert_eq!(fmt_num(1024.0), "1024");
        assert_eq!(fmt_num(2.5), "2.5");
        assert_eq!(fmt_num(0.00001), "0");
        assert_eq!(fmt_num(12.345678), "12.3457");
        assert_eq!(fmt_num(-7.25), "-7.25");
    }

    #[test]
    fn test_parse_pair() {
        assert_eq!(parse_pair("1024 768"), Some((1024.0, 768.0)));
        assert_eq!(parse_pair("1 2 3"), None);
        assert_eq!(parse_pair("1"), None);
    }
}
