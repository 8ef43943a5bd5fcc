//! Batch summary: which constellations and bands a receiver reported.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::classify::aggregate_dual_frequency_capability;
use crate::types::{Classification, ClassificationResult, Constellation, Result};

/// Aggregate view over a batch of classification results.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CapabilitySummary {
    pub total: usize,
    pub invalid: usize,
    pub unidentified: usize,
    /// Frequencies shared by several constellations with no context to pick one.
    pub ambiguous: usize,
    pub dual_frequency: bool,
    /// Band labels observed per constellation (identified results only).
    pub bands: BTreeMap<Constellation, BTreeSet<&'static str>>,
}

impl CapabilitySummary {
    pub fn from_results<'a, I>(results: I) -> Self
    where
        I: IntoIterator<Item = &'a Result<ClassificationResult>>,
    {
        let mut summary = CapabilitySummary::default();
        let mut valid: Vec<&ClassificationResult> = Vec::new();

        for result in results {
            summary.total += 1;
            let r = match result {
                Ok(r) => r,
                Err(_) => {
                    summary.invalid += 1;
                    continue;
                }
            };
            match &r.classification {
                Classification::Identified {
                    constellation,
                    band,
                } => {
                    summary.bands.entry(*constellation).or_default().insert(*band);
                }
                Classification::MultiConstellation { .. } => summary.ambiguous += 1,
                Classification::Unidentified => summary.unidentified += 1,
            }
            valid.push(r);
        }

        summary.dual_frequency = aggregate_dual_frequency_capability(valid);
        summary
    }

    /// Constellations with at least one identified band.
    pub fn constellations(&self) -> Vec<Constellation> {
        self.bands.keys().copied().collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::{classify_all, Classifier};

    #[test]
    fn test_summary_counts() {
        let results = classify_all(&[1602.0, 1246.4375, 9999.0, 0.0, 1176.45, 1268.52]);
        let s = CapabilitySummary::from_results(&results);
        assert_eq!(s.total, 6);
        assert_eq!(s.invalid, 1);
        assert_eq!(s.unidentified, 1);
        assert_eq!(s.ambiguous, 1);
        assert!(s.dual_frequency);
        assert_eq!(
            s.constellations(),
            vec![Constellation::Glonass, Constellation::Beidou]
        );
        let glo = &s.bands[&Constellation::Glonass];
        assert!(glo.contains("L1") && glo.contains("L2"));
    }

    #[test]
    fn test_summary_with_context() {
        let gps = Classifier::default().with_context(Some(Constellation::Gps));
        let results = gps.classify_all(&[1575.42, 1575.42, 1176.45]);
        let s = CapabilitySummary::from_results(&results);
        assert_eq!(s.ambiguous, 0);
        let bands: Vec<_> = s.bands[&Constellation::Gps].iter().copied().collect();
        assert_eq!(bands, vec!["L1", "L5"]);
    }

    #[test]
    fn test_summary_single_frequency_receiver() {
        let results = classify_all(&[1575.42, 1602.0]);
        let s = CapabilitySummary::from_results(&results);
        assert!(!s.dual_frequency);
    }

    #[test]
    fn test_summary_empty() {
        let s = CapabilitySummary::from_results(&Vec::<Result<ClassificationResult>>::new());
        assert_eq!(s, CapabilitySummary::default());
    }
}
