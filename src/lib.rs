//! Recover a Shamir secret from a possibly corrupted share set
//!
//! Shares are `(x, y)` integer points on a secret polynomial of degree `k - 1`
//! whose constant term is the secret. Some shares may have been corrupted, so
//! instead of interpolating every point this library searches the `k`-subsets
//! of the input for one that an integer polynomial passes through exactly.
//! Every candidate is fitted with exact big-integer elimination and then
//! re-checked by evaluating the fitted polynomial, and the first candidate in
//! lexicographic order that checks out determines the secret.
//!
//! # Quick Start
//!
//! ```
//! use shamir_recover::{BigInt, ShareDocument, SecretReconstructor};
//!
//! // y = x^2 + 3; every value written in its own base
//! let doc = ShareDocument::from_json_str(r#"{
//!     "keys": { "n": 4, "k": 3 },
//!     "1": { "base": "10", "value": "4" },
//!     "2": { "base": "2", "value": "111" },
//!     "3": { "base": "10", "value": "12" },
//!     "6": { "base": "4", "value": "213" }
//! }"#).unwrap();
//!
//! let shares = doc.shares().unwrap();
//! let outcome = SecretReconstructor::builder(doc.threshold())
//!     .build()
//!     .unwrap()
//!     .reconstruct(&shares)
//!     .unwrap();
//!
//! assert_eq!(outcome.secret(), Some(&BigInt::from(3)));
//! ```

mod combination;
mod config;
mod decode;
mod document;
mod error;
mod polynomial;
mod reconstruct;
pub mod report;
mod share;
mod validate;

pub use combination::{Combinations, candidate_count, candidates};
pub use config::{Classification, Config, SearchMode};
pub use decode::{EncodedShare, MAX_BASE, MIN_BASE, decode_value, parse_base};
pub use document::{Keys, ShareDocument};
pub use error::{RecoverError, Result};
pub use num_bigint::BigInt;
pub use polynomial::{Polynomial, fit, solve, vandermonde};
pub use reconstruct::{
    Outcome, Reconstruction, SecretReconstructor, SecretReconstructorBuilder, reconstruct,
};
pub use share::Share;
pub use validate::{fits_exactly, passes_through};

// Re-export common types for convenience
pub mod prelude {
    pub use super::{
        BigInt, Classification, Config, Outcome, Reconstruction, RecoverError, Result,
        SearchMode, SecretReconstructor, Share, ShareDocument,
    };
}
