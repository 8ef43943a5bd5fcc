//! Report rendering: terminal tables and JSON.

use comfy_table::{Cell, Table};
use serde::Serialize;

use crate::input::Rejected;

use gnss_core::{
    glonass_fdma_channel, CapabilitySummary, ClassificationResult, Constellation, GnssError,
    ReferenceFrequency,
};

/// One row of a batch report: the input and its outcome.
#[derive(Debug, Serialize)]
pub struct ReportRow<'a> {
    pub input_mhz: f64,
    #[serde(flatten)]
    pub outcome: Outcome<'a>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Outcome<'a> {
    Classified(&'a ClassificationResult),
    Failed { error: String },
}

#[derive(Debug, Serialize)]
pub struct BatchReport<'a> {
    pub results: Vec<ReportRow<'a>>,
    /// Inputs that never reached the classifier.
    pub rejected: &'a [Rejected],
    pub summary: &'a CapabilitySummary,
}

pub fn batch_report<'a>(
    inputs: &[f64],
    results: &'a [gnss_core::Result<ClassificationResult>],
    rejected: &'a [Rejected],
    summary: &'a CapabilitySummary,
) -> BatchReport<'a> {
    let rows = inputs
        .iter()
        .zip(results)
        .map(|(&input_mhz, r)| ReportRow {
            input_mhz,
            outcome: match r {
                Ok(c) => Outcome::Classified(c),
                Err(e) => Outcome::Failed {
                    error: e.to_string(),
                },
            },
        })
        .collect();
    BatchReport {
        results: rows,
        rejected,
        summary,
    }
}

pub fn to_json<T: Serialize>(value: &T) -> Result<String, GnssError> {
    serde_json::to_string_pretty(value).map_err(|e| GnssError::Config(format!("JSON: {e}")))
}

/// Render classification results as a table.
pub fn results_table(
    inputs: &[f64],
    results: &[gnss_core::Result<ClassificationResult>],
) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        "Frequency (MHz)",
        "Constellation",
        "Band",
        "Dual",
        "Note",
    ]);

    for (input, result) in inputs.iter().zip(results) {
        match result {
            Ok(r) => {
                let constellations = r
                    .constellations()
                    .iter()
                    .map(|c| c.to_string())
                    .collect::<Vec<_>>();
                let constellation = if constellations.is_empty() {
                    Constellation::Unknown.to_string()
                } else {
                    constellations.join(", ")
                };
                table.add_row(vec![
                    Cell::new(format!("{:.3}", r.frequency_mhz)),
                    Cell::new(constellation),
                    Cell::new(r.band_label()),
                    Cell::new(if r.dual_frequency { "yes" } else { "no" }),
                    Cell::new(note_for(r)),
                ]);
            }
            Err(e) => {
                table.add_row(vec![
                    Cell::new(format!("{input}")),
                    Cell::new("-"),
                    Cell::new("-"),
                    Cell::new("-"),
                    Cell::new(e.to_string()),
                ]);
            }
        }
    }

    table
}

fn note_for(r: &ClassificationResult) -> String {
    if r.is_ambiguous() {
        return "shared carrier".into();
    }
    if r.constellation() == Constellation::Glonass {
        if let Some((_, k)) = glonass_fdma_channel(r.frequency_mhz) {
            return format!("FDMA k={k:+}");
        }
    }
    String::new()
}

/// One-paragraph capability summary.
pub fn summary_text(summary: &CapabilitySummary) -> String {
    let mut lines = vec![format!(
        "Frequencies: {} total, {} invalid, {} unidentified, {} shared-carrier",
        summary.total, summary.invalid, summary.unidentified, summary.ambiguous
    )];
    for (constellation, bands) in &summary.bands {
        let bands: Vec<&str> = bands.iter().copied().collect();
        lines.push(format!("  {constellation}: {}", bands.join(", ")));
    }
    lines.push(format!(
        "Dual-frequency capable: {}",
        if summary.dual_frequency { "yes" } else { "no" }
    ));
    lines.join("\n")
}

/// Lines listing skipped inputs, or `None` when every input parsed.
pub fn rejected_text(rejected: &[Rejected]) -> Option<String> {
    if rejected.is_empty() {
        return None;
    }
    let mut lines = vec![format!("Skipped {} unparseable input(s):", rejected.len())];
    for r in rejected {
        lines.push(format!("  #{}: {}", r.position, r.text));
    }
    Some(lines.join("\n"))
}

/// Render reference carriers as a table.
pub fn reference_table<'a, I>(entries: I) -> Table
where
    I: IntoIterator<Item = &'a ReferenceFrequency>,
{
    let mut table = Table::new();
    table.set_header(vec![
        "Constellation",
        "Code",
        "Band",
        "Nominal (MHz)",
        "Range (MHz)",
        "Wavelength (cm)",
        "Dual",
    ]);

    for r in entries {
        table.add_row(vec![
            Cell::new(r.constellation),
            Cell::new(r.constellation.code()),
            Cell::new(r.band),
            Cell::new(format!("{:.3}", r.nominal_mhz)),
            Cell::new(
                r.range_mhz
                    .map(|(lo, hi)| format!("{lo:.4}-{hi:.4}"))
                    .unwrap_or("-".into()),
            ),
            Cell::new(format!("{:.2}", r.wavelength_m() * 100.0)),
            Cell::new(if r.dual_frequency { "yes" } else { "no" }),
        ]);
    }

    table
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
