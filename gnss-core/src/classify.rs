//! Frequency classification: map a carrier frequency to constellation + band.
//!
//! Matching is tolerance based: an entry matches when the query lies within
//! `tolerance_mhz` of its nominal carrier (or inside its FDMA range). When
//! several constellations share the carrier, an optional constellation context
//! narrows the match; without one the result lists every candidate rather than
//! picking one arbitrarily.

use crate::bands::{ReferenceFrequency, REFERENCE_TABLE};
use crate::types::{
    BandMatch, Classification, ClassificationResult, Constellation, GnssError, Result,
};

/// Default half-width of the match window, MHz.
pub const DEFAULT_TOLERANCE_MHZ: f64 = 0.5;

/// Widest accepted window. Wider windows start swallowing neighbouring bands.
pub const MAX_TOLERANCE_MHZ: f64 = 5.0;

/// Stateless classifier settings. Cheap to copy and safe to share across threads.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classifier {
    tolerance_mhz: f64,
    context: Option<Constellation>,
}

impl Default for Classifier {
    fn default() -> Self {
        Classifier {
            tolerance_mhz: DEFAULT_TOLERANCE_MHZ,
            context: None,
        }
    }
}

impl Classifier {
    /// Build a classifier with a custom tolerance window.
    pub fn new(tolerance_mhz: f64) -> Result<Self> {
        if !tolerance_mhz.is_finite() || tolerance_mhz <= 0.0 {
            return Err(GnssError::Config(format!(
                "tolerance must be a positive number of MHz, got {tolerance_mhz}"
            )));
        }
        if tolerance_mhz > MAX_TOLERANCE_MHZ {
            return Err(GnssError::Config(format!(
                "tolerance {tolerance_mhz} MHz exceeds maximum of {MAX_TOLERANCE_MHZ} MHz"
            )));
        }
        Ok(Classifier {
            tolerance_mhz,
            context: None,
        })
    }

    /// Prefer matches from `constellation` when a carrier is shared.
    ///
    /// `Some(Constellation::Unknown)` is treated as no context.
    pub fn with_context(mut self, constellation: Option<Constellation>) -> Self {
        self.context = constellation.filter(|c| *c != Constellation::Unknown);
        self
    }

    pub fn tolerance_mhz(&self) -> f64 {
        self.tolerance_mhz
    }

    pub fn context(&self) -> Option<Constellation> {
        self.context
    }

    /// Classify one frequency in MHz.
    pub fn classify(&self, freq_mhz: f64) -> Result<ClassificationResult> {
        if !freq_mhz.is_finite() || freq_mhz <= 0.0 {
            return Err(GnssError::InvalidFrequency(freq_mhz));
        }

        let matched: Vec<&ReferenceFrequency> = REFERENCE_TABLE
            .iter()
            .filter(|r| r.matches(freq_mhz, self.tolerance_mhz))
            .collect();

        let retained: Vec<&ReferenceFrequency> = match self.context {
            Some(ctx) if matched.iter().any(|r| r.constellation == ctx) => matched
                .into_iter()
                .filter(|r| r.constellation == ctx)
                .take(1)
                .collect(),
            _ => matched,
        };

        Ok(build_result(freq_mhz, &retained))
    }

    /// Classify each frequency independently.
    ///
    /// One output per input, same order. Invalid inputs yield an `Err` in their
    /// slot without affecting the rest of the batch.
    pub fn classify_all(&self, freqs: &[f64]) -> Vec<Result<ClassificationResult>> {
        freqs.iter().map(|&f| self.classify(f)).collect()
    }

    /// Fail-fast variant of [`Classifier::classify_all`]: the first invalid
    /// input aborts the batch.
    pub fn try_classify_all(&self, freqs: &[f64]) -> Result<Vec<ClassificationResult>> {
        freqs.iter().map(|&f| self.classify(f)).collect()
    }
}

fn build_result(freq_mhz: f64, retained: &[&ReferenceFrequency]) -> ClassificationResult {
    let dual_frequency = retained.iter().any(|r| r.dual_frequency);
    let classification = match retained {
        [] => return ClassificationResult::unidentified(freq_mhz),
        [only] => Classification::Identified {
            constellation: only.constellation,
            band: only.band,
        },
        many => Classification::MultiConstellation {
            candidates: many.iter().map(|r| r.to_match()).collect::<Vec<BandMatch>>(),
        },
    };
    ClassificationResult {
        frequency_mhz: freq_mhz,
        classification,
        dual_frequency,
    }
}

// ---------------------------------------------------------------------------
// Convenience entry points (default classifier)
// ---------------------------------------------------------------------------

/// Classify one frequency with the default tolerance and no context.
pub fn classify(freq_mhz: f64) -> Result<ClassificationResult> {
    Classifier::default().classify(freq_mhz)
}

/// Classify a batch with the default classifier. See [`Classifier::classify_all`].
pub fn classify_all(freqs: &[f64]) -> Vec<Result<ClassificationResult>> {
    Classifier::default().classify_all(freqs)
}

/// True if any result carries a dual-frequency signal.
pub fn aggregate_dual_frequency_capability<'a, I>(results: I) -> bool
where
    I: IntoIterator<Item = &'a ClassificationResult>,
{
    results.into_iter().any(|r| r.dual_frequency)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
