//! Product ratings.
//!
//! Ratings are kept as running sufficient statistics: the current mean and the
//! number of submissions folded into it. No history is retained.

use crate::domain::products::errors::ProductsServiceError;

/// Lowest accepted submission.
pub const MIN_SUBMISSION: f64 = 1.0;

/// Highest accepted submission.
pub const MAX_SUBMISSION: f64 = 5.0;

const RATE_SCALE: f64 = 100_000.0;

/// Aggregated product rating.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rating {
    pub rate: f64,
    pub count: u64,
}

impl Rating {
    /// State of a product nobody has rated yet.
    pub const UNRATED: Self = Self {
        rate: 0.0,
        count: 0,
    };

    /// Fold one submission into the running mean.
    ///
    /// The stored rate is rounded to five decimal places.
    #[must_use]
    #[expect(
        clippy::cast_precision_loss,
        reason = "rating counts stay far below 2^52"
    )]
    pub fn record(self, submission: RatingSubmission) -> Self {
        let count = self.count + 1;
        let rate = (self.count as f64 * self.rate + submission.value()) / count as f64;

        Self {
            rate: round_rate(rate),
            count,
        }
    }
}

impl Default for Rating {
    fn default() -> Self {
        Self::UNRATED
    }
}

/// A validated rating submission in `[1, 5]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatingSubmission(f64);

impl RatingSubmission {
    /// Validate a raw submission.
    ///
    /// # Errors
    ///
    /// Returns [`ProductsServiceError::InvalidRating`] for non-finite values and
    /// [`ProductsServiceError::RatingOutOfRange`] outside `[1, 5]`.
    pub fn new(value: f64) -> Result<Self, ProductsServiceError> {
        if !value.is_finite() {
            return Err(ProductsServiceError::InvalidRating);
        }

        if !(MIN_SUBMISSION..=MAX_SUBMISSION).contains(&value) {
            return Err(ProductsServiceError::RatingOutOfRange);
        }

        Ok(Self(value))
    }

    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }
}

fn round_rate(rate: f64) -> f64 {
    (rate * RATE_SCALE).round() / RATE_SCALE
}
