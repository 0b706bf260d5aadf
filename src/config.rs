use crate::error::{RecoverError, Result};

/// How candidate subsets are evaluated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchMode {
    /// Try candidates one at a time in enumeration order
    #[default]
    Sequential,
    /// Fit and validate candidates on the rayon pool
    Parallel,
}

/// Which shares count as consistent once a subset is accepted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Classification {
    /// Only the members of the accepted subset
    #[default]
    AcceptedSubset,
    /// Every share the accepted polynomial passes through
    OnPolynomial,
}

/// Configuration options for reconstruction
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Search mode
    pub mode: SearchMode,
    /// Maximum number of candidates to try, unbounded when `None`
    pub candidate_limit: Option<u64>,
    /// Consistent/wrong partition rule
    pub classification: Classification,
}

impl Config {
    /// Creates a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the search mode
    pub fn with_mode(mut self, mode: SearchMode) -> Self {
        self.mode = mode;
        self
    }

    /// Bounds the number of candidates the search may try
    pub fn with_candidate_limit(mut self, limit: u64) -> Result<Self> {
        if limit == 0 {
            return Err(RecoverError::InvalidConfig(
                "Candidate limit cannot be zero".into(),
            ));
        }
        self.candidate_limit = Some(limit);
        Ok(self)
    }

    /// Sets the classification rule
    pub fn with_classification(mut self, classification: Classification) -> Self {
        self.classification = classification;
        self
    }

    /// Validates the configuration
    pub fn validate(&self) -> Result<()> {
        if self.candidate_limit == Some(0) {
            return Err(RecoverError::InvalidConfig(
                "Candidate limit cannot be zero".into(),
            ));
        }

        Ok(())
    }
}
