//! Number formatting for the display
//!
//! Results are rendered the way a browser renders numbers, because the
//! rendered text is fed back into the expression buffer and the history log.

/// Magnitude above which results switch to scientific notation
pub const SCIENTIFIC_THRESHOLD: f64 = 1e15;

/// Fractional digits kept when rounding plain results
pub const MAX_FRACTION_DIGITS: usize = 10;

/// Fractional digits of the mantissa in scientific notation
pub const SCIENTIFIC_DIGITS: usize = 2;

/// Fractional digits needed to print any `f64` exactly
const EXACT_FRACTION_DIGITS: usize = 1074;

/// Significant digits needed to print any `f64` mantissa exactly
const EXACT_SIGNIFICANT_DIGITS: usize = 767;

/// Formats a finished calculation.
///
/// `|value| > 1e15` renders as `d.dde+N`; anything else is rounded to ten
/// fractional digits and printed without trailing zeros. Both roundings work
/// on the exact decimal expansion and send ties away from zero.
#[must_use]
pub fn format_result(value: f64) -> String {
    if value.abs() > SCIENTIFIC_THRESHOLD {
        return to_exponential(value, SCIENTIFIC_DIGITS);
    }

    let fixed = to_fixed(value, MAX_FRACTION_DIGITS);
    // Parsing our own fixed-point output cannot fail
    let rounded = fixed.parse::<f64>().unwrap_or(value);
    number_to_string(rounded)
}

/// Fixed-point notation with `digits` fractional digits (`0.0004882813`)
#[must_use]
pub fn to_fixed(value: f64, digits: usize) -> String {
    let exact = format!("{:.*}", EXACT_FRACTION_DIGITS, value.abs());
    let (int_part, frac_part) = exact.split_once('.').unwrap_or((exact.as_str(), ""));
    let all: Vec<u8> = int_part.bytes().chain(frac_part.bytes()).collect();

    let (rounded, carried) = round_half_up(&all, int_part.len() + digits);
    let int_len = int_part.len() + usize::from(carried);

    let mut out = String::with_capacity(rounded.len() + 3);
    if value < 0.0 {
        out.push('-');
    }
    for (i, &d) in rounded.iter().enumerate() {
        if i == int_len {
            out.push('.');
        }
        out.push(char::from(d));
    }
    out
}

/// Exponential notation with a fixed number of fractional mantissa digits,
/// always with an explicit exponent sign (`1.23e+16`, `-4.00e-7`).
#[must_use]
pub fn to_exponential(value: f64, digits: usize) -> String {
    let exact = format!("{:.*e}", EXACT_SIGNIFICANT_DIGITS, value.abs());
    let (mantissa, exponent) = exact.split_once('e').unwrap_or((exact.as_str(), "0"));
    let mut exponent = exponent.parse::<i32>().unwrap_or(0);
    let all: Vec<u8> = mantissa.bytes().filter(u8::is_ascii_digit).collect();

    let (mut rounded, carried) = round_half_up(&all, digits + 1);
    if carried {
        rounded.truncate(digits + 1);
        exponent += 1;
    }

    let mut out = String::with_capacity(digits + 8);
    if value < 0.0 {
        out.push('-');
    }
    for (i, &d) in rounded.iter().enumerate() {
        if i == 1 {
            out.push('.');
        }
        out.push(char::from(d));
    }
    let sign = if exponent < 0 { '-' } else { '+' };
    out.push_str(&format!("e{sign}{}", exponent.unsigned_abs()));
    out
}

/// Keeps the first `keep` ASCII digits, rounding half up on the next one.
///
/// Returns the kept digits and whether the carry ran off the front, in which
/// case a leading `1` has been prepended.
fn round_half_up(digits: &[u8], keep: usize) -> (Vec<u8>, bool) {
    let mut kept: Vec<u8> = digits.iter().copied().take(keep).collect();
    kept.resize(keep, b'0');

    if digits.get(keep).is_some_and(|&d| d >= b'5') {
        for d in kept.iter_mut().rev() {
            if *d == b'9' {
                *d = b'0';
            } else {
                *d += 1;
                return (kept, false);
            }
        }
        kept.insert(0, b'1');
        return (kept, true);
    }

    (kept, false)
}

/// Shortest round-trip rendering of a number.
///
/// Plain decimal notation for magnitudes in `[1e-6, 1e21)`, exponent form
/// outside that range. Negative zero renders as `0`.
#[must_use]
pub fn number_to_string(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let magnitude = value.abs();
    if !(1e-6..1e21).contains(&magnitude) {
        return with_signed_exponent(&format!("{value:e}"));
    }

    format!("{value}")
}

fn with_signed_exponent(formatted: &str) -> String {
    match formatted.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{mantissa}e+{exponent}")
        }
        _ => formatted.to_string(),
    }
}
