//! Time spans and their compact text form.
//!
//! A span is written as a sequence of `<number><unit>` terms, largest unit
//! first: `1h2m3.5s`, `1m4.193747377s`, `250ms`, `0s`. Spans under a second use
//! `ms`, `µs` or `ns` with a fractional part; longer spans use `h`, `m` and
//! `s`, where the seconds carry up to nine fractional digits with trailing
//! zeros dropped. The parser accepts any ordering and combination of the units
//! `ns`, `us`, `µs`, `μs`, `ms`, `s`, `m` and `h`, so text such as
//! `64.193747377s` reads back as the same span as `1m4.193747377s`.

use chrono::{NaiveDateTime, TimeDelta};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

const MICROSECOND: u64 = 1_000;
const MILLISECOND: u64 = 1_000 * MICROSECOND;
const SECOND: u64 = 1_000 * MILLISECOND;
const MINUTE: u64 = 60 * SECOND;
const HOUR: u64 = 60 * MINUTE;

/// Largest magnitude a span can hold (the magnitude of `i64::MIN`).
const MAX_MAGNITUDE: u64 = 1 << 63;

/// A signed span of time with nanosecond resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Elapsed(i64);

impl Elapsed {
    /// The empty span, written as `0s`.
    pub const ZERO: Self = Self(0);

    /// Create a span from a nanosecond count.
    #[must_use]
    pub const fn from_nanos(nanos: i64) -> Self {
        Self(nanos)
    }

    /// The span in nanoseconds.
    #[must_use]
    pub const fn as_nanos(self) -> i64 {
        self.0
    }

    /// Whether this is the empty span.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// The span from `start` to `end`, saturating at the representable range.
    #[must_use]
    pub fn between(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        let delta = end - start;
        delta.num_nanoseconds().map_or_else(
            || if delta < TimeDelta::zero() { Self(i64::MIN) } else { Self(i64::MAX) },
            Self,
        )
    }
}

/// Split `value` at `precision` decimal digits.
///
/// Returns the integer part and the fraction as `.ddd` with trailing zeros
/// removed, or an empty string when the fraction is zero.
fn split_fraction(value: u64, precision: u32) -> (u64, String) {
    let scale = 10u64.pow(precision);
    let fraction = value % scale;
    if fraction == 0 {
        return (value / scale, String::new());
    }
    let digits = format!("{fraction:0width$}", width = precision as usize);
    (value / scale, format!(".{}", digits.trim_end_matches('0')))
}

impl fmt::Display for Elapsed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let nanos = self.0.unsigned_abs();
        if nanos == 0 {
            return f.write_str("0s");
        }
        if self.0 < 0 {
            f.write_str("-")?;
        }

        if nanos < SECOND {
            let (unit, precision) = if nanos < MICROSECOND {
                ("ns", 0)
            } else if nanos < MILLISECOND {
                ("µs", 3)
            } else {
                ("ms", 6)
            };
            let (whole, fraction) = split_fraction(nanos, precision);
            return write!(f, "{whole}{fraction}{unit}");
        }

        let (secs, fraction) = split_fraction(nanos, 9);
        let (hours, minutes, seconds) = (secs / 3600, secs / 60 % 60, secs % 60);
        if hours > 0 {
            write!(f, "{hours}h{minutes}m")?;
        } else if minutes > 0 {
            write!(f, "{minutes}m")?;
        }
        write!(f, "{seconds}{fraction}s")
    }
}

/// Error when a duration string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidElapsed {
    /// The rejected input.
    pub input: String,
    /// What was wrong with it.
    pub reason: &'static str,
}

impl fmt::Display for InvalidElapsed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid duration {:?}: {}", self.input, self.reason)
    }
}

impl std::error::Error for InvalidElapsed {}

fn unit_nanos(unit: &str) -> Option<u64> {
    match unit {
        "ns" => Some(1),
        "us" | "\u{b5}s" | "\u{3bc}s" => Some(MICROSECOND),
        "ms" => Some(MILLISECOND),
        "s" => Some(SECOND),
        "m" => Some(MINUTE),
        "h" => Some(HOUR),
        _ => None,
    }
}

/// Parse a run of ASCII digits, failing once the value passes `MAX_MAGNITUDE`.
fn leading_int(digits: &str) -> Option<u64> {
    digits.bytes().try_fold(0u64, |acc, b| {
        acc.checked_mul(10)
            .and_then(|v| v.checked_add(u64::from(b - b'0')))
            .filter(|v| *v <= MAX_MAGNITUDE)
    })
}

/// Parse fractional digits into `(numerator, scale)`.
///
/// Digits that would overflow are consumed but ignored.
fn leading_fraction(digits: &str) -> (u64, f64) {
    let mut value = 0u64;
    let mut scale = 1f64;
    for b in digits.bytes() {
        let next = value.checked_mul(10).and_then(|v| v.checked_add(u64::from(b - b'0')));
        match next {
            Some(v) if v <= MAX_MAGNITUDE => {
                value = v;
                scale *= 10.0;
            }
            _ => break,
        }
    }
    (value, scale)
}

impl FromStr for Elapsed {
    type Err = InvalidElapsed;

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason| InvalidElapsed { input: s.to_string(), reason };

        let (negative, mut rest) = match s.as_bytes().first() {
            Some(b'-') => (true, &s[1..]),
            Some(b'+') => (false, &s[1..]),
            _ => (false, s),
        };
        if rest == "0" {
            return Ok(Self::ZERO);
        }
        if rest.is_empty() {
            return Err(invalid("empty duration"));
        }

        let mut total = 0u64;
        while !rest.is_empty() {
            let int_len = rest.bytes().take_while(u8::is_ascii_digit).count();
            let whole = leading_int(&rest[..int_len]).ok_or_else(|| invalid("out of range"))?;
            rest = &rest[int_len..];

            let mut fraction = (0, 1.0);
            let mut frac_len = 0;
            if let Some(after_dot) = rest.strip_prefix('.') {
                frac_len = after_dot.bytes().take_while(u8::is_ascii_digit).count();
                fraction = leading_fraction(&after_dot[..frac_len]);
                rest = &after_dot[frac_len..];
            } else if int_len == 0 {
                return Err(invalid("expected a number"));
            }
            if int_len == 0 && frac_len == 0 {
                return Err(invalid("expected a number"));
            }

            let unit_len =
                rest.find(|c: char| c == '.' || c.is_ascii_digit()).unwrap_or(rest.len());
            if unit_len == 0 {
                return Err(invalid("missing unit"));
            }
            let unit = unit_nanos(&rest[..unit_len]).ok_or_else(|| invalid("unknown unit"))?;
            rest = &rest[unit_len..];

            let mut value = whole
                .checked_mul(unit)
                .filter(|v| *v <= MAX_MAGNITUDE)
                .ok_or_else(|| invalid("out of range"))?;
            let (numerator, scale) = fraction;
            if numerator > 0 {
                value += (numerator as f64 * (unit as f64 / scale)) as u64;
                if value > MAX_MAGNITUDE {
                    return Err(invalid("out of range"));
                }
            }
            total = total
                .checked_add(value)
                .filter(|v| *v <= MAX_MAGNITUDE)
                .ok_or_else(|| invalid("out of range"))?;
        }

        if negative {
            // `total` is at most 2^63, which is exactly `-i64::MIN`.
            return Ok(Self((-i128::from(total)) as i64));
        }
        i64::try_from(total).map(Self).map_err(|_| invalid("out of range"))
    }
}

impl Serialize for Elapsed {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Elapsed {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(de::Error::custom)
    }
}
