//! Shared types, error enum, and classification result types for gnss-core.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

/// All errors produced by gnss-core.
#[derive(Debug, Error)]
pub enum GnssError {
    #[error("invalid frequency: {0} MHz (must be finite and positive)")]
    InvalidFrequency(f64),
    #[error("unknown constellation: {0}")]
    UnknownConstellation(String),
    #[error("config error: {0}")]
    Config(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, GnssError>;

// ---------------------------------------------------------------------------
// Constellations
// ---------------------------------------------------------------------------

/// Satellite navigation system.
///
/// Numeric codes follow the conventional GNSS constellation numbering
/// used by Android's `GnssStatus` (1=GPS, 2=SBAS, 3=GLONASS, 4=QZSS,
/// 5=BeiDou, 6=Galileo, 7=NavIC).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Constellation {
    Unknown,
    Gps,
    Sbas,
    Glonass,
    Qzss,
    Beidou,
    Galileo,
    Navic,
}

impl Constellation {
    /// Every named constellation, in code order. `Unknown` is excluded.
    pub const ALL: [Constellation; 7] = [
        Constellation::Gps,
        Constellation::Sbas,
        Constellation::Glonass,
        Constellation::Qzss,
        Constellation::Beidou,
        Constellation::Galileo,
        Constellation::Navic,
    ];

    /// Build from a numeric constellation code. Unrecognized codes map to `Unknown`.
    pub fn from_code(code: u8) -> Self {
        match code {
            1 => Constellation::Gps,
            2 => Constellation::Sbas,
            3 => Constellation::Glonass,
            4 => Constellation::Qzss,
            5 => Constellation::Beidou,
            6 => Constellation::Galileo,
            7 => Constellation::Navic,
            _ => Constellation::Unknown,
        }
    }

    pub fn code(&self) -> u8 {
        match self {
            Constellation::Unknown => 0,
            Constellation::Gps => 1,
            Constellation::Sbas => 2,
            Constellation::Glonass => 3,
            Constellation::Qzss => 4,
            Constellation::Beidou => 5,
            Constellation::Galileo => 6,
            Constellation::Navic => 7,
        }
    }

    /// Human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            Constellation::Unknown => "Unknown",
            Constellation::Gps => "GPS",
            Constellation::Sbas => "SBAS",
            Constellation::Glonass => "GLONASS",
            Constellation::Qzss => "QZSS",
            Constellation::Beidou => "BeiDou",
            Constellation::Galileo => "Galileo",
            Constellation::Navic => "NavIC",
        }
    }
}

impl fmt::Display for Constellation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Constellation {
    type Err = GnssError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if let Ok(code) = s.parse::<u8>() {
            return match Constellation::from_code(code) {
                Constellation::Unknown if code != 0 => {
                    Err(GnssError::UnknownConstellation(s.to_string()))
                }
                c => Ok(c),
            };
        }
        match s.to_ascii_lowercase().as_str() {
            "gps" | "navstar" => Ok(Constellation::Gps),
            "sbas" => Ok(Constellation::Sbas),
            "glonass" | "glo" => Ok(Constellation::Glonass),
            "qzss" => Ok(Constellation::Qzss),
            "beidou" | "bds" | "compass" => Ok(Constellation::Beidou),
            "galileo" | "gal" => Ok(Constellation::Galileo),
            "navic" | "irnss" => Ok(Constellation::Navic),
            "unknown" => Ok(Constellation::Unknown),
            _ => Err(GnssError::UnknownConstellation(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Classification results
// ---------------------------------------------------------------------------

/// Band label reported when nothing in the reference table matches.
pub const UNIDENTIFIED_BAND: &str = "unidentified";

/// One reference-table entry that matched a queried frequency.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BandMatch {
    pub constellation: Constellation,
    pub band: &'static str,
    pub nominal_mhz: f64,
    pub dual_frequency: bool,
}

impl fmt::Display for BandMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.constellation, self.band)
    }
}

/// What a frequency was identified as.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Classification {
    /// Exactly one reference entry remained after tie-breaking.
    Identified {
        constellation: Constellation,
        band: &'static str,
    },
    /// Several constellations share this carrier and no context picked one.
    MultiConstellation { candidates: Vec<BandMatch> },
    Unidentified,
}

/// Outcome of classifying a single carrier frequency.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassificationResult {
    pub frequency_mhz: f64,
    pub classification: Classification,
    pub dual_frequency: bool,
}

impl ClassificationResult {
    pub fn unidentified(frequency_mhz: f64) -> Self {
        ClassificationResult {
            frequency_mhz,
            classification: Classification::Unidentified,
            dual_frequency: false,
        }
    }

    /// Matched constellation. `Unknown` when unidentified or ambiguous.
    pub fn constellation(&self) -> Constellation {
        match &self.classification {
            Classification::Identified { constellation, .. } => *constellation,
            _ => Constellation::Unknown,
        }
    }

    /// Every constellation that could have produced this frequency.
    pub fn constellations(&self) -> Vec<Constellation> {
        match &self.classification {
            Classification::Identified { constellation, .. } => vec![*constellation],
            Classification::MultiConstellation { candidates } => {
                let mut out: Vec<Constellation> = Vec::with_capacity(candidates.len());
                for c in candidates {
                    if !out.contains(&c.constellation) {
                        out.push(c.constellation);
                    }
                }
                out
            }
            Classification::Unidentified => Vec::new(),
        }
    }

    /// Band label; distinct candidate labels are joined with `/` when ambiguous.
    pub fn band_label(&self) -> String {
        match &self.classification {
            Classification::Identified { band, .. } => (*band).to_string(),
            Classification::MultiConstellation { candidates } => {
                let mut labels: Vec<&str> = Vec::new();
                for c in candidates {
                    if !labels.contains(&c.band) {
                        labels.push(c.band);
                    }
                }
                labels.join("/")
            }
            Classification::Unidentified => UNIDENTIFIED_BAND.to_string(),
        }
    }

    /// Matched at least one reference entry, including shared-carrier results.
    ///
    /// Use [`ClassificationResult::constellation`] to tell a single
    /// identification from a shared carrier.
    pub fn is_matched(&self) -> bool {
        !matches!(self.classification, Classification::Unidentified)
    }

    pub fn is_ambiguous(&self) -> bool {
        matches!(
            self.classification,
            Classification::MultiConstellation { .. }
        )
    }
}

impl fmt::Display for ClassificationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3} MHz: ", self.frequency_mhz)?;
        match &self.classification {
            Classification::Identified {
                constellation,
                band,
            } => write!(f, "{constellation} {band}")?,
            Classification::MultiConstellation { candidates } => {
                let names: Vec<String> = candidates.iter().map(|c| c.to_string()).collect();
                write!(f, "multi-constellation ({})", names.join(", "))?;
            }
            Classification::Unidentified => write!(f, "{UNIDENTIFIED_BAND}")?,
        }
        if self.dual_frequency {
            write!(f, " [dual-frequency]")?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constellation_codes_roundtrip() {
        for c in Constellation::ALL {
            assert_eq!(Constellation::from_code(c.code()), c);
        }
        assert_eq!(Constellation::Gps.code(), 1);
        assert_eq!(Constellation::Glonass.code(), 3);
        assert_eq!(Constellation::Beidou.code(), 5);
        assert_eq!(Constellation::Galileo.code(), 6);
        assert_eq!(Constellation::Navic.code(), 7);
        assert_eq!(Constellation::from_code(42), Constellation::Unknown);
    }

    #[test]
    fn test_constellation_from_str() {
        assert_eq!("gps".parse::<Constellation>().unwrap(), Constellation::Gps);
        assert_eq!("BDS".parse::<Constellation>().unwrap(), Constellation::Beidou);
        assert_eq!("irnss".parse::<Constellation>().unwrap(), Constellation::Navic);
        assert_eq!("6".parse::<Constellation>().unwrap(), Constellation::Galileo);
        assert!(matches!(
            "mars".parse::<Constellation>(),
            Err(GnssError::UnknownConstellation(_))
        ));
        assert!("9".parse::<Constellation>().is_err());
    }

    #[test]
    fn test_unidentified_result() {
        let r = ClassificationResult::unidentified(9999.0);
        assert_eq!(r.constellation(), Constellation::Unknown);
        assert_eq!(r.band_label(), "unidentified");
        assert!(!r.dual_frequency);
        assert!(!r.is_matched());
        assert!(r.constellations().is_empty());
    }

    #[test]
    fn test_multi_band_label_dedups() {
        let m = |constellation, band| BandMatch {
            constellation,
            band,
            nominal_mhz: 1176.45,
            dual_frequency: true,
        };
        let r = ClassificationResult {
            frequency_mhz: 1176.45,
            classification: Classification::MultiConstellation {
                candidates: vec![
                    m(Constellation::Gps, "L5"),
                    m(Constellation::Galileo, "E5a"),
                    m(Constellation::Qzss, "L5"),
                ],
            },
            dual_frequency: true,
        };
        assert_eq!(r.band_label(), "L5/E5a");
        assert!(r.is_matched());
        assert_eq!(r.constellation(), Constellation::Unknown);
        assert_eq!(r.constellations().len(), 3);
        assert!(r.is_ambiguous());
        assert_eq!(
            r.to_string(),
            "1176.450 MHz: multi-constellation (GPS L5, Galileo E5a, QZSS L5) [dual-frequency]"
        );
    }

    #[test]
    fn test_serialize_tagged() {
        let r = ClassificationResult {
            frequency_mhz: 1602.0,
            classification: Classification::Identified {
                constellation: Constellation::Glonass,
                band: "L1",
            },
            dual_frequency: false,
        };
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["classification"]["kind"], "identified");
        assert_eq!(json["classification"]["constellation"], "GLONASS");
        assert_eq!(json["classification"]["band"], "L1");
    }
}
