//! Positional-base decoding of share values

use num_bigint::BigInt;

use crate::error::{RecoverError, Result};
use crate::share::Share;

/// Smallest supported base
pub const MIN_BASE: u32 = 2;
/// Largest supported base (digits `0-9` then `a-z`)
pub const MAX_BASE: u32 = 36;

/// Parses a base tag such as `"16"`
pub fn parse_base(tag: &str) -> Result<u32> {
    tag.trim()
        .parse::<u32>()
        .ok()
        .filter(|base| (MIN_BASE..=MAX_BASE).contains(base))
        .ok_or_else(|| RecoverError::InvalidBase(tag.to_string()))
}

/// Decodes a digit string in `base` into an arbitrary-precision integer
///
/// Digits are case-insensitive and a single leading `+` or `-` is allowed.
/// Anything else, including an empty string or digit separators, is rejected.
///
/// # Example
/// ```
/// use shamir_recover::{decode_value, BigInt};
///
/// assert_eq!(decode_value("111", 2).unwrap(), BigInt::from(7));
/// assert_eq!(decode_value("-fF", 16).unwrap(), BigInt::from(-255));
/// assert!(decode_value("129", 8).is_err());
/// ```
pub fn decode_value(value: &str, base: u32) -> Result<BigInt> {
    if !(MIN_BASE..=MAX_BASE).contains(&base) {
        return Err(RecoverError::InvalidBase(base.to_string()));
    }

    let invalid = || RecoverError::InvalidDigits {
        value: value.to_string(),
        base,
    };

    let digits = value.strip_prefix(['+', '-']).unwrap_or(value);
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(base)) {
        return Err(invalid());
    }

    BigInt::parse_bytes(value.as_bytes(), base).ok_or_else(invalid)
}

/// A share as it appears in an input document, before decoding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedShare {
    /// Decimal `x`
    pub x: String,
    pub base: u32,
    /// `y` written in `base`
    pub value: String,
}

impl EncodedShare {
    pub fn new(x: impl Into<String>, base: u32, value: impl Into<String>) -> Self {
        Self {
            x: x.into(),
            base,
            value: value.into(),
        }
    }

    /// Decodes both coordinates
    pub fn decode(&self) -> Result<Share> {
        let x = decode_value(&self.x, 10)?;
        let y = decode_value(&self.value, self.base)?;
        Ok(Share::new(x, y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_bases() {
        assert_eq!(decode_value("4", 10).unwrap(), BigInt::from(4));
        assert_eq!(decode_value("111", 2).unwrap(), BigInt::from(7));
        assert_eq!(decode_value("213", 4).unwrap(), BigInt::from(39));
        assert_eq!(decode_value("aed7015a346d63", 15).unwrap(), BigInt::from(21_394_886_326_566_393i64));
        assert_eq!(decode_value("zz", 36).unwrap(), BigInt::from(1295));
    }

    #[test]
    fn test_arbitrary_precision() {
        let value = "f".repeat(64);
        let expected = (BigInt::from(1) << 256) - 1;
        assert_eq!(decode_value(&value, 16).unwrap(), expected);
    }

    #[test]
    fn test_signs() {
        assert_eq!(decode_value("-101", 2).unwrap(), BigInt::from(-5));
        assert_eq!(decode_value("+17", 10).unwrap(), BigInt::from(17));
        assert!(decode_value("-+1", 10).is_err());
        assert!(decode_value("-", 10).is_err());
    }

    #[test]
    fn test_rejects_bad_digits() {
        for (value, base) in [("", 10), ("12", 2), ("1_000", 10), (" 5", 10), ("g", 16)] {
            assert!(
                matches!(decode_value(value, base), Err(RecoverError::InvalidDigits { .. })),
                "{value:?} in base {base}"
            );
        }
    }

    #[test]
    fn test_base_range() {
        assert!(matches!(decode_value("1", 1), Err(RecoverError::InvalidBase(_))));
        assert!(matches!(decode_value("1", 37), Err(RecoverError::InvalidBase(_))));

        assert_eq!(parse_base(" 16 ").unwrap(), 16);
        assert!(parse_base("0").is_err());
        assert!(parse_base("hex").is_err());
        assert!(parse_base("40").is_err());
    }

    #[test]
    fn test_encoded_share_decode() {
        let share = EncodedShare::new("6", 4, "213").decode().unwrap();
        assert_eq!(share, Share::new(6, 39));

        assert!(EncodedShare::new("six", 4, "213").decode().is_err());
    }
}
