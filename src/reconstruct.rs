use num_bigint::BigInt;
use rayon::prelude::*;
use serde::Serialize;
use std::collections::{BTreeSet, HashSet};

use crate::combination::Combinations;
use crate::config::{Classification, Config, SearchMode};
use crate::error::{RecoverError, Result};
use crate::polynomial::{self, Polynomial};
use crate::share::{Share, decimal};
use crate::validate;

/// A polynomial accepted by the search together with the share partition
///
/// # Example
/// ```
/// use shamir_recover::{reconstruct, BigInt, Share};
///
/// let shares = vec![Share::new(1, 3), Share::new(2, 6), Share::new(8, 99)];
/// let found = reconstruct(&shares, 2).unwrap().into_found().unwrap();
///
/// assert_eq!(found.secret(), &BigInt::from(0));
/// assert_eq!(found.wrong_shares(), &[Share::new(8, 99)]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reconstruction {
    polynomial: Polynomial,
    accepted: Vec<Share>,
    #[serde(with = "decimal::seq")]
    consistent: BTreeSet<BigInt>,
    wrong: Vec<Share>,
}

impl Reconstruction {
    /// The accepted polynomial
    pub fn polynomial(&self) -> &Polynomial {
        &self.polynomial
    }

    /// Coefficients in ascending degree order
    pub fn coefficients(&self) -> &[BigInt] {
        self.polynomial.coefficients()
    }

    /// The constant term of the accepted polynomial
    pub fn secret(&self) -> &BigInt {
        self.polynomial.secret()
    }

    /// The `k` shares the polynomial was fitted to, in input order
    pub fn accepted_shares(&self) -> &[Share] {
        &self.accepted
    }

    /// `x` values of the shares classified as consistent
    pub fn consistent_xs(&self) -> &BTreeSet<BigInt> {
        &self.consistent
    }

    /// Shares classified as wrong, in input order
    pub fn wrong_shares(&self) -> &[Share] {
        &self.wrong
    }
}

/// Result of a search over all candidate subsets
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    /// A `k`-subset validated exactly
    Found(Reconstruction),
    /// Every candidate was tried and none validated
    NoValidPolynomial,
}

impl Outcome {
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    pub fn found(&self) -> Option<&Reconstruction> {
        match self {
            Self::Found(found) => Some(found),
            Self::NoValidPolynomial => None,
        }
    }

    pub fn into_found(self) -> Option<Reconstruction> {
        match self {
            Self::Found(found) => Some(found),
            Self::NoValidPolynomial => None,
        }
    }

    /// The recovered secret, if any
    pub fn secret(&self) -> Option<&BigInt> {
        self.found().map(Reconstruction::secret)
    }
}

/// Searches a share set for a self-consistent subset of `threshold` shares
///
/// Candidates are the `threshold`-subsets of the input in lexicographic index
/// order. Each one is fitted with exact integer elimination and then checked
/// by evaluating the fitted polynomial at every member. The first candidate
/// that checks out wins, so identical input always yields the identical
/// result, in both sequential and parallel mode.
///
/// # Example
/// ```
/// use shamir_recover::{BigInt, Config, SearchMode, SecretReconstructor, Share};
///
/// // y = x^2 + 3 with the share at x = 4 corrupted
/// let shares = vec![
///     Share::new(1, 4),
///     Share::new(4, 20),
///     Share::new(2, 7),
///     Share::new(3, 12),
/// ];
///
/// let reconstructor = SecretReconstructor::builder(3)
///     .with_config(Config::new().with_mode(SearchMode::Parallel))
///     .build()
///     .unwrap();
///
/// let outcome = reconstructor.reconstruct(&shares).unwrap();
/// assert_eq!(outcome.secret(), Some(&BigInt::from(3)));
/// ```
#[derive(Debug, Clone)]
pub struct SecretReconstructor {
    threshold: usize,
    config: Config,
}

/// Builder for creating SecretReconstructor instances with custom configuration
#[derive(Debug)]
pub struct SecretReconstructorBuilder {
    threshold: usize,
    config: Config,
}

impl SecretReconstructorBuilder {
    /// Creates a new builder with the given threshold and default configuration
    pub fn new(threshold: usize) -> Self {
        Self {
            threshold,
            config: Config::default(),
        }
    }

    /// Sets a custom configuration
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Builds the reconstructor
    ///
    /// # Errors
    /// Returns `RecoverError` if:
    /// - `threshold` is 0
    /// - Configuration validation fails
    pub fn build(self) -> Result<SecretReconstructor> {
        if self.threshold == 0 {
            return Err(RecoverError::InvalidThreshold {
                threshold: 0,
                total_shares: 0,
            });
        }

        self.config.validate()?;

        Ok(SecretReconstructor {
            threshold: self.threshold,
            config: self.config,
        })
    }
}

/// Indices and polynomial of the winning candidate
struct Accepted {
    indices: Vec<usize>,
    polynomial: Polynomial,
}

impl SecretReconstructor {
    /// Creates a builder for a reconstructor with the given threshold
    pub fn builder(threshold: usize) -> SecretReconstructorBuilder {
        SecretReconstructorBuilder::new(threshold)
    }

    pub fn threshold(&self) -> usize {
        self.threshold
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Runs the search over `shares`
    ///
    /// Running out of candidates is not an error: it yields
    /// `Outcome::NoValidPolynomial`.
    ///
    /// # Errors
    /// Returns `RecoverError` if:
    /// - The threshold exceeds the number of shares (`InvalidThreshold`)
    /// - Two shares have the same `x` (`InvalidInput`)
    /// - The candidate limit runs out first (`CandidateLimitExceeded`)
    pub fn reconstruct(&self, shares: &[Share]) -> Result<Outcome> {
        if self.threshold == 0 || self.threshold > shares.len() {
            return Err(RecoverError::InvalidThreshold {
                threshold: self.threshold,
                total_shares: shares.len(),
            });
        }
        ensure_distinct_xs(shares)?;

        let accepted = match self.config.mode {
            SearchMode::Sequential => self.search_sequential(shares)?,
            SearchMode::Parallel => self.search_parallel(shares)?,
        };

        Ok(match accepted {
            Some(accepted) => Outcome::Found(self.classify(shares, accepted)),
            None => Outcome::NoValidPolynomial,
        })
    }

    fn search_sequential(&self, shares: &[Share]) -> Result<Option<Accepted>> {
        let mut tried: u64 = 0;

        for indices in Combinations::new(shares.len(), self.threshold)? {
            if let Some(limit) = self.config.candidate_limit.filter(|&limit| tried == limit) {
                return Err(RecoverError::CandidateLimitExceeded { limit });
            }
            tried += 1;

            if let Some(polynomial) = try_candidate(shares, &indices)? {
                return Ok(Some(Accepted {
                    indices,
                    polynomial,
                }));
            }
        }

        Ok(None)
    }

    /// Evaluates candidates on the rayon pool
    ///
    /// The candidate list is materialized up front; `find_map_first` keeps
    /// the earliest accepted candidate in enumeration order.
    fn search_parallel(&self, shares: &[Share]) -> Result<Option<Accepted>> {
        let combinations = Combinations::new(shares.len(), self.threshold)?;

        let (batch, truncated) = match self.config.candidate_limit {
            Some(limit) => {
                let cap = usize::try_from(limit).unwrap_or(usize::MAX);
                let mut batch: Vec<Vec<usize>> =
                    combinations.take(cap.saturating_add(1)).collect();
                let truncated = batch.len() > cap;
                batch.truncate(cap);
                (batch, truncated)
            }
            None => (combinations.collect(), false),
        };

        let found = batch
            .into_par_iter()
            .find_map_first(|indices| match try_candidate(shares, &indices) {
                Ok(Some(polynomial)) => Some(Ok(Accepted {
                    indices,
                    polynomial,
                })),
                Ok(None) => None,
                Err(err) => Some(Err(err)),
            })
            .transpose()?;

        match (found, self.config.candidate_limit) {
            (None, Some(limit)) if truncated => {
                Err(RecoverError::CandidateLimitExceeded { limit })
            }
            (found, _) => Ok(found),
        }
    }

    /// Splits the full share set into consistent and wrong shares
    fn classify(&self, shares: &[Share], accepted: Accepted) -> Reconstruction {
        let Accepted {
            indices,
            polynomial,
        } = accepted;

        let in_subset: Vec<bool> = {
            let mut flags = vec![false; shares.len()];
            for &i in &indices {
                flags[i] = true;
            }
            flags
        };

        let is_consistent = |i: usize, share: &Share| match self.config.classification {
            Classification::AcceptedSubset => in_subset[i],
            Classification::OnPolynomial => validate::passes_through(&polynomial, share),
        };

        let mut consistent = BTreeSet::new();
        let mut wrong = Vec::new();
        for (i, share) in shares.iter().enumerate() {
            if is_consistent(i, share) {
                consistent.insert(share.x().clone());
            } else {
                wrong.push(share.clone());
            }
        }

        let accepted = indices.iter().map(|&i| shares[i].clone()).collect();

        Reconstruction {
            polynomial,
            accepted,
            consistent,
            wrong,
        }
    }
}

/// Fits and validates one candidate
///
/// A singular system only rejects this candidate; other errors propagate.
fn try_candidate(shares: &[Share], indices: &[usize]) -> Result<Option<Polynomial>> {
    let points: Vec<&Share> = indices.iter().map(|&i| &shares[i]).collect();

    match polynomial::fit(&points) {
        Ok(polynomial) if validate::fits_exactly(&polynomial, &points) => Ok(Some(polynomial)),
        Ok(_) | Err(RecoverError::SingularSystem { .. }) => Ok(None),
        Err(err) => Err(err),
    }
}

fn ensure_distinct_xs(shares: &[Share]) -> Result<()> {
    let mut seen = HashSet::with_capacity(shares.len());
    for share in shares {
        if !seen.insert(share.x()) {
            return Err(RecoverError::duplicate_x(share.x()));
        }
    }
    Ok(())
}

/// Reconstructs with the default configuration
///
/// # Example
/// ```
/// use shamir_recover::{reconstruct, Outcome, Share};
///
/// // no integer line passes through any two of these points
/// let shares = vec![Share::new(1, 0), Share::new(3, 1), Share::new(5, 2)];
/// assert_eq!(reconstruct(&shares, 2).unwrap(), Outcome::NoValidPolynomial);
/// ```
pub fn reconstruct(shares: &[Share], threshold: usize) -> Result<Outcome> {
    SecretReconstructor::builder(threshold)
        .build()?
        .reconstruct(shares)
}
