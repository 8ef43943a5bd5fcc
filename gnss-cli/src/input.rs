//! Frequency input for the `classify` and `file` subcommands.
//!
//! One frequency per argument or per line. Accepted forms:
//! - `1575.42` or `1575.42 MHz`: megahertz
//! - `1575420 kHz`: kilohertz
//! - `1575420000` or `1575420000 Hz`: hertz (Android `getCarrierFrequencyHz`)
//!
//! Bare numbers above 1e6 are taken as Hz. Blank lines and `#` comments are
//! skipped; a trailing `# comment` after a value is allowed.

use std::fs;
use std::io::{self, BufRead};
use std::path::Path;

use serde::Serialize;

/// Bare values above this are interpreted as Hz rather than MHz.
const BARE_HZ_THRESHOLD: f64 = 1.0e6;

/// An input that could not be turned into a frequency.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rejected {
    /// 1-based line number (files) or argument position (command line).
    pub position: usize,
    pub text: String,
}

/// Frequencies read from a source, plus the lines that were rejected.
#[derive(Debug, Default)]
pub struct FrequencyList {
    pub frequencies_mhz: Vec<f64>,
    pub rejected: Vec<Rejected>,
}

/// Read frequencies from a file, or stdin when `path` is `-`.
pub fn read_frequencies(path: &Path) -> io::Result<FrequencyList> {
    let reader: Box<dyn BufRead> = if path.to_str() == Some("-") {
        Box::new(io::stdin().lock())
    } else {
        Box::new(io::BufReader::new(fs::File::open(path)?))
    };
    parse_lines(reader)
}

pub fn parse_lines<R: BufRead>(reader: R) -> io::Result<FrequencyList> {
    let mut list = FrequencyList::default();
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        match parse_frequency_line(&line) {
            Line::Value(mhz) => list.frequencies_mhz.push(mhz),
            Line::Invalid => list.rejected.push(Rejected {
                position: i + 1,
                text: line.trim().to_string(),
            }),
            Line::Blank => {}
        }
    }
    Ok(list)
}

/// Parse command-line values. Unlike file lines, comments are not stripped.
pub fn parse_values<S: AsRef<str>>(values: &[S]) -> FrequencyList {
    let mut list = FrequencyList::default();
    for (i, v) in values.iter().enumerate() {
        let v = v.as_ref();
        match parse_frequency(v) {
            Some(mhz) => list.frequencies_mhz.push(mhz),
            None => list.rejected.push(Rejected {
                position: i + 1,
                text: v.trim().to_string(),
            }),
        }
    }
    list
}

/// One parsed input line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Line {
    Blank,
    Value(f64),
    Invalid,
}

/// Parse one line into MHz.
///
/// Range checks (non-positive, non-finite) are left to the classifier.
pub fn parse_frequency_line(line: &str) -> Line {
    let content = match line.split_once('#') {
        Some((before, _)) => before,
        None => line,
    }
    .trim();
    if content.is_empty() {
        return Line::Blank;
    }
    match parse_frequency(content) {
        Some(mhz) => Line::Value(mhz),
        None => Line::Invalid,
    }
}

/// Unit suffixes, longest first so `mhz` is not read as `hz`.
const UNITS: &[(&str, f64)] = &[("ghz", 1.0e3), ("mhz", 1.0), ("khz", 1.0e-3), ("hz", 1.0e-6)];

/// Parse a value with an optional `Hz`/`kHz`/`MHz`/`GHz` suffix into MHz.
pub fn parse_frequency(text: &str) -> Option<f64> {
    let lower = text.trim().to_ascii_lowercase();
    let (number, scale) = match UNITS.iter().find(|(unit, _)| lower.ends_with(unit)) {
        Some((unit, scale)) => (&lower[..lower.len() - unit.len()], Some(*scale)),
        None => (lower.as_str(), None),
    };
    let value: f64 = number.trim().parse().ok()?;
    let scale = scale.unwrap_or(if value.abs() > BARE_HZ_THRESHOLD {
        1.0e-6
    } else {
        1.0
    });
    Some(value * scale)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_parse_units() {
        assert!(approx(parse_frequency("1575.42").unwrap(), 1575.42));
        assert!(approx(parse_frequency("1575.42 MHz").unwrap(), 1575.42));
        assert!(approx(parse_frequency("1575.42mhz").unwrap(), 1575.42));
        assert!(approx(parse_frequency("1176450 kHz").unwrap(), 1176.45));
        assert!(approx(parse_frequency("1176450000 Hz").unwrap(), 1176.45));
        assert!(approx(parse_frequency("1.60200 GHz").unwrap(), 1602.0));
    }

    #[test]
    fn test_bare_hz() {
        assert!(approx(parse_frequency("1575420000").unwrap(), 1575.42));
        assert!(approx(parse_frequency("1.57542e9").unwrap(), 1575.42));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_frequency("L1").is_none());
        assert!(parse_frequency("1575.42 furlongs").is_none());
        assert!(parse_frequency("MHz").is_none());
        assert!(parse_frequency("").is_none());
    }

    #[test]
    fn test_comment_and_blank_lines() {
        assert_eq!(parse_frequency_line(""), Line::Blank);
        assert_eq!(parse_frequency_line("   "), Line::Blank);
        assert_eq!(parse_frequency_line("# header"), Line::Blank);
        assert_eq!(parse_frequency_line("1602.0 # G1 k=0"), Line::Value(1602.0));
        assert_eq!(parse_frequency_line("G1"), Line::Invalid);
    }

    #[test]
    fn test_zero_passes_through() {
        // The classifier, not the reader, decides that zero is invalid
        assert_eq!(parse_frequency_line("0"), Line::Value(0.0));
    }

    #[test]
    fn test_read_file() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "# capture from handset").unwrap();
        writeln!(f, "1575420000").unwrap();
        writeln!(f).unwrap();
        writeln!(f, "1176.45 MHz").unwrap();
        writeln!(f, "bogus").unwrap();
        writeln!(f, "1602.5625").unwrap();
        f.flush().unwrap();

        let list = read_frequencies(f.path()).unwrap();
        assert_eq!(list.frequencies_mhz.len(), 3);
        assert!(approx(list.frequencies_mhz[0], 1575.42));
        assert!(approx(list.frequencies_mhz[1], 1176.45));
        assert_eq!(
            list.rejected,
            vec![Rejected {
                position: 5,
                text: "bogus".into()
            }]
        );
    }

    #[test]
    fn test_parse_values_keeps_rejects() {
        let list = parse_values(&["1602.0", "L1", "1176450000", "1575.42 furlongs"]);
        assert_eq!(list.frequencies_mhz.len(), 2);
        assert!(approx(list.frequencies_mhz[1], 1176.45));
        let positions: Vec<usize> = list.rejected.iter().map(|r| r.position).collect();
        assert_eq!(positions, vec![2, 4]);
        assert_eq!(list.rejected[0].text, "L1");
    }

    #[test]
    fn test_read_missing_file() {
        assert!(read_frequencies(Path::new("/nonexistent/freqs.txt")).is_err());
    }
}
