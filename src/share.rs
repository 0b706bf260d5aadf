use num_bigint::BigInt;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One `(x, y)` point of a secret-sharing scheme
///
/// Shares are immutable once built. Within a share set the `x` values must be
/// pairwise distinct; the reconstructor rejects sets that violate this.
///
/// # Example
/// ```
/// use shamir_recover::{BigInt, Share};
///
/// let share = Share::new(2, 6);
/// assert_eq!(share.x(), &BigInt::from(2));
/// assert_eq!(share.y(), &BigInt::from(6));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Share {
    #[serde(with = "decimal")]
    x: BigInt,
    #[serde(with = "decimal")]
    y: BigInt,
}

impl Share {
    /// Creates a share from anything convertible to a big integer
    pub fn new(x: impl Into<BigInt>, y: impl Into<BigInt>) -> Self {
        Self {
            x: x.into(),
            y: y.into(),
        }
    }

    /// The evaluation point
    pub fn x(&self) -> &BigInt {
        &self.x
    }

    /// The polynomial value at `x`
    pub fn y(&self) -> &BigInt {
        &self.y
    }
}

impl fmt::Display for Share {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "x = {}, y = {}", self.x, self.y)
    }
}

/// Serde helpers writing big integers as decimal strings
pub(crate) mod decimal {
    use num_bigint::BigInt;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(value: &BigInt, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(value)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<BigInt, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(D::Error::custom)
    }

    /// Serialize-only helpers for coefficient and `x` lists
    pub mod seq {
        use super::*;

        pub fn serialize<'a, T, S>(values: &'a T, serializer: S) -> Result<S::Ok, S::Error>
        where
            &'a T: IntoIterator<Item = &'a BigInt>,
            S: Serializer,
        {
            serializer.collect_seq(values.into_iter().map(|v| v.to_string()))
        }
    }
}
