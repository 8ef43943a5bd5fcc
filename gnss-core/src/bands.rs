//! Carrier frequency reference table: nominal carriers per constellation and band.
//!
//! Several systems broadcast on the same carrier (1176.45 MHz is GPS L5,
//! Galileo E5a, BeiDou B2a, NavIC L5, QZSS L5 and SBAS L5). GLONASS L1/L2 are
//! FDMA: each satellite slot transmits on its own channel, so those entries
//! carry a range instead of relying on the tolerance window.

use crate::types::Constellation::{Beidou, Galileo, Glonass, Gps, Navic, Qzss, Sbas};
use crate::types::{BandMatch, Constellation};

/// Speed of light in vacuum, m/s.
pub const SPEED_OF_LIGHT: f64 = 299_792_458.0;

/// A known carrier frequency.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferenceFrequency {
    pub constellation: Constellation,
    pub band: &'static str,
    pub nominal_mhz: f64,
    /// False only for the primary band family (L1 / E1 / B1 / G1).
    pub dual_frequency: bool,
    /// Inclusive `[min, max]` MHz for FDMA bands.
    pub range_mhz: Option<(f64, f64)>,
}

impl ReferenceFrequency {
    /// Whether `freq_mhz` falls on this carrier.
    ///
    /// Ranged entries match anywhere inside the range or within `tolerance_mhz`
    /// of the nominal value; other entries only within the tolerance window.
    pub fn matches(&self, freq_mhz: f64, tolerance_mhz: f64) -> bool {
        if (freq_mhz - self.nominal_mhz).abs() <= tolerance_mhz {
            return true;
        }
        match self.range_mhz {
            Some((min, max)) => (min..=max).contains(&freq_mhz),
            None => false,
        }
    }

    /// Carrier wavelength in metres.
    pub fn wavelength_m(&self) -> f64 {
        SPEED_OF_LIGHT / (self.nominal_mhz * 1.0e6)
    }

    pub fn to_match(&self) -> BandMatch {
        BandMatch {
            constellation: self.constellation,
            band: self.band,
            nominal_mhz: self.nominal_mhz,
            dual_frequency: self.dual_frequency,
        }
    }
}

const fn carrier(
    constellation: Constellation,
    band: &'static str,
    nominal_mhz: f64,
    dual_frequency: bool,
) -> ReferenceFrequency {
    ReferenceFrequency {
        constellation,
        band,
        nominal_mhz,
        dual_frequency,
        range_mhz: None,
    }
}

// ---------------------------------------------------------------------------
// GLONASS FDMA
// ---------------------------------------------------------------------------

pub const GLONASS_L1_BASE_MHZ: f64 = 1602.0;
pub const GLONASS_L1_STEP_MHZ: f64 = 0.5625;
pub const GLONASS_L2_BASE_MHZ: f64 = 1246.0;
pub const GLONASS_L2_STEP_MHZ: f64 = 0.4375;

/// Lowest and highest FDMA channel numbers in use.
pub const GLONASS_MIN_CHANNEL: i8 = -7;
pub const GLONASS_MAX_CHANNEL: i8 = 6;

/// Maximum distance from a channel centre still attributed to that channel.
const GLONASS_CHANNEL_TOLERANCE_MHZ: f64 = 0.05;

pub const GLONASS_L1_RANGE_MHZ: (f64, f64) = (
    GLONASS_L1_BASE_MHZ + GLONASS_MIN_CHANNEL as f64 * GLONASS_L1_STEP_MHZ,
    GLONASS_L1_BASE_MHZ + GLONASS_MAX_CHANNEL as f64 * GLONASS_L1_STEP_MHZ,
);
pub const GLONASS_L2_RANGE_MHZ: (f64, f64) = (
    GLONASS_L2_BASE_MHZ + GLONASS_MIN_CHANNEL as f64 * GLONASS_L2_STEP_MHZ,
    GLONASS_L2_BASE_MHZ + GLONASS_MAX_CHANNEL as f64 * GLONASS_L2_STEP_MHZ,
);

// ---------------------------------------------------------------------------
// Reference table (constellation order, primary band first)
// ---------------------------------------------------------------------------

pub static REFERENCE_TABLE: &[ReferenceFrequency] = &[
    carrier(Gps, "L1", 1575.42, false),
    carrier(Gps, "L2", 1227.60, true),
    carrier(Gps, "L5", 1176.45, true),
    ReferenceFrequency {
        constellation: Glonass,
        band: "L1",
        nominal_mhz: GLONASS_L1_BASE_MHZ,
        dual_frequency: false,
        range_mhz: Some(GLONASS_L1_RANGE_MHZ),
    },
    ReferenceFrequency {
        constellation: Glonass,
        band: "L2",
        nominal_mhz: GLONASS_L2_BASE_MHZ,
        dual_frequency: true,
        range_mhz: Some(GLONASS_L2_RANGE_MHZ),
    },
    carrier(Glonass, "L3", 1202.025, true),
    carrier(Galileo, "E1", 1575.42, false),
    carrier(Galileo, "E5a", 1176.45, true),
    carrier(Galileo, "E5b", 1207.14, true),
    carrier(Galileo, "E5", 1191.795, true),
    carrier(Galileo, "E6", 1278.75, true),
    carrier(Beidou, "B1", 1561.098, false),
    carrier(Beidou, "B1C", 1575.42, false),
    carrier(Beidou, "B2a", 1176.45, true),
    carrier(Beidou, "B2b", 1207.14, true),
    carrier(Beidou, "B3", 1268.52, true),
    carrier(Navic, "L5", 1176.45, true),
    carrier(Navic, "S", 2492.028, true),
    carrier(Qzss, "L1", 1575.42, false),
    carrier(Qzss, "L2", 1227.60, true),
    carrier(Qzss, "L5", 1176.45, true),
    carrier(Qzss, "L6", 1278.75, true),
    carrier(Sbas, "L1", 1575.42, false),
    carrier(Sbas, "L5", 1176.45, true),
];

// ---------------------------------------------------------------------------
// Lookups
// ---------------------------------------------------------------------------

/// Look up one band of a constellation. Band labels compare case-insensitively.
pub fn band_info(constellation: Constellation, band: &str) -> Option<&'static ReferenceFrequency> {
    let band = band.trim();
    REFERENCE_TABLE
        .iter()
        .find(|r| r.constellation == constellation && r.band.eq_ignore_ascii_case(band))
}

/// All reference carriers of a constellation, in table order.
pub fn carrier_frequencies(
    constellation: Constellation,
) -> impl Iterator<Item = &'static ReferenceFrequency> {
    REFERENCE_TABLE
        .iter()
        .filter(move |r| r.constellation == constellation)
}

/// Resolve a GLONASS FDMA frequency to `(band, channel)`.
///
/// Returns `None` unless the frequency sits within 0.05 MHz of an L1 or L2
/// channel centre with k in -7..=+6.
pub fn glonass_fdma_channel(freq_mhz: f64) -> Option<(&'static str, i8)> {
    if !freq_mhz.is_finite() {
        return None;
    }
    [
        ("L1", GLONASS_L1_BASE_MHZ, GLONASS_L1_STEP_MHZ),
        ("L2", GLONASS_L2_BASE_MHZ, GLONASS_L2_STEP_MHZ),
    ]
    .into_iter()
    .find_map(|(band, base, step)| {
        let k = ((freq_mhz - base) / step).round();
        if k < GLONASS_MIN_CHANNEL as f64 || k > GLONASS_MAX_CHANNEL as f64 {
            return None;
        }
        let centre = base + k * step;
        ((freq_mhz - centre).abs() <= GLONASS_CHANNEL_TOLERANCE_MHZ).then_some((band, k as i8))
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_bands_not_dual() {
        for r in REFERENCE_TABLE {
            let primary = matches!(r.band, "L1" | "E1" | "B1" | "B1C");
            assert_eq!(r.dual_frequency, !primary, "{} {}", r.constellation, r.band);
        }
    }

    #[test]
    fn test_table_has_no_duplicate_pairs() {
        for (i, a) in REFERENCE_TABLE.iter().enumerate() {
            for b in &REFERENCE_TABLE[i + 1..] {
                assert!(
                    !(a.constellation == b.constellation && a.band == b.band),
                    "duplicate {} {}",
                    a.constellation,
                    a.band
                );
            }
        }
    }

    #[test]
    fn test_every_constellation_has_carriers() {
        for c in Constellation::ALL {
            assert!(carrier_frequencies(c).count() >= 2, "{c}");
        }
        assert_eq!(carrier_frequencies(Constellation::Unknown).count(), 0);
    }

    #[test]
    fn test_band_info_lookup() {
        let e5a = band_info(Constellation::Galileo, "e5a").unwrap();
        assert_eq!(e5a.nominal_mhz, 1176.45);
        assert!(e5a.dual_frequency);
        assert!(band_info(Constellation::Gps, "E5a").is_none());
        assert_eq!(band_info(Constellation::Navic, "S").unwrap().nominal_mhz, 2492.028);
    }

    #[test]
    fn test_glonass_ranges() {
        let l1 = band_info(Constellation::Glonass, "L1").unwrap();
        assert_eq!(l1.range_mhz, Some((1598.0625, 1605.375)));
        let l2 = band_info(Constellation::Glonass, "L2").unwrap();
        assert_eq!(l2.range_mhz, Some((1242.9375, 1248.625)));
        assert!(l1.matches(1598.0625, 0.5));
        assert!(l1.matches(1605.375, 0.5));
        assert!(!l1.matches(1606.0, 0.5));
    }

    #[test]
    fn test_glonass_fdma_channel() {
        assert_eq!(glonass_fdma_channel(1602.0), Some(("L1", 0)));
        assert_eq!(glonass_fdma_channel(1602.5625), Some(("L1", 1)));
        assert_eq!(glonass_fdma_channel(1598.0625), Some(("L1", -7)));
        assert_eq!(glonass_fdma_channel(1605.375), Some(("L1", 6)));
        assert_eq!(glonass_fdma_channel(1246.4375), Some(("L2", 1)));
        // Between channel centres
        assert_eq!(glonass_fdma_channel(1602.28), None);
        // k = +7 is outside the allocated plan
        assert_eq!(glonass_fdma_channel(1605.9375), None);
        assert_eq!(glonass_fdma_channel(1575.42), None);
    }

    #[test]
    fn test_wavelength() {
        let l1 = band_info(Constellation::Gps, "L1").unwrap();
        assert!((l1.wavelength_m() - 0.190_293_672).abs() < 1e-6);
    }
}
