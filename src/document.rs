use serde::Deserialize;
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

use crate::decode::{EncodedShare, MAX_BASE, MIN_BASE, decode_value, parse_base};
use crate::error::{RecoverError, Result};
use crate::share::Share;

/// The `keys` header of a share document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Keys {
    /// Declared number of shares
    #[serde(default)]
    pub n: Option<usize>,
    /// Threshold
    pub k: usize,
}

/// A base tag is normally a string, but plain integers are accepted too
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum BaseTag {
    Text(String),
    Number(u64),
}

#[derive(Debug, Deserialize)]
struct RawEntry {
    base: BaseTag,
    value: String,
}

#[derive(Debug, Deserialize)]
struct RawDocument {
    keys: Keys,
    #[serde(flatten)]
    entries: Map<String, Value>,
}

/// A JSON share document
///
/// ```json
/// {
///   "keys": { "n": 4, "k": 3 },
///   "1": { "base": "10", "value": "4" },
///   "2": { "base": "2", "value": "111" }
/// }
/// ```
///
/// Every top-level key besides `keys` is a share whose decimal `x` is the key.
/// Shares keep document order.
///
/// # Example
/// ```
/// use shamir_recover::{BigInt, ShareDocument};
///
/// let doc = ShareDocument::from_json_str(r#"{
///     "keys": { "n": 2, "k": 2 },
///     "1": { "base": "10", "value": "3" },
///     "2": { "base": "2", "value": "110" }
/// }"#).unwrap();
///
/// assert_eq!(doc.threshold(), 2);
/// let shares = doc.shares().unwrap();
/// assert_eq!(shares[1].y(), &BigInt::from(6));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareDocument {
    keys: Keys,
    entries: Vec<EncodedShare>,
}

impl ShareDocument {
    /// Parses a document from JSON text
    ///
    /// # Errors
    /// - `RecoverError::Json` for malformed JSON or a missing `keys` header
    /// - `RecoverError::InvalidDocument` for an entry that is not a share object
    ///   or a key that is not a decimal `x`
    /// - `RecoverError::InvalidBase` for a bad base tag
    pub fn from_json_str(text: &str) -> Result<Self> {
        let raw: RawDocument = serde_json::from_str(text)?;

        let entries = raw
            .entries
            .into_iter()
            .map(|(key, value)| parse_entry(key, value))
            .collect::<Result<Vec<_>>>()?;

        if let Some(declared) = raw.keys.n.filter(|&n| n != entries.len()) {
            warn!(
                declared,
                found = entries.len(),
                "share count differs from keys.n"
            );
        }

        Ok(Self {
            keys: raw.keys,
            entries,
        })
    }

    /// Reads and parses a document file
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading share document");
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Threshold `k` from the header
    pub fn threshold(&self) -> usize {
        self.keys.k
    }

    /// Share count `n` from the header, if present
    pub fn declared_count(&self) -> Option<usize> {
        self.keys.n
    }

    /// Entries before decoding, in document order
    pub fn encoded(&self) -> &[EncodedShare] {
        &self.entries
    }

    /// Decodes every entry, in document order
    pub fn shares(&self) -> Result<Vec<Share>> {
        self.entries.iter().map(EncodedShare::decode).collect()
    }
}

fn parse_entry(key: String, value: Value) -> Result<EncodedShare> {
    if decode_value(&key, 10).is_err() {
        return Err(RecoverError::InvalidDocument(format!(
            "share key {key:?} is not a decimal x"
        )));
    }

    let entry: RawEntry = serde_json::from_value(value)
        .map_err(|err| RecoverError::InvalidDocument(format!("share {key:?}: {err}")))?;

    let base = match entry.base {
        BaseTag::Text(tag) => parse_base(&tag)?,
        BaseTag::Number(number) => u32::try_from(number)
            .ok()
            .filter(|base| (MIN_BASE..=MAX_BASE).contains(base))
            .ok_or_else(|| RecoverError::InvalidBase(number.to_string()))?,
    };

    Ok(EncodedShare {
        x: key,
        base,
        value: entry.value,
    })
}
