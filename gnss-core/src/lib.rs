//! gnss-core: GNSS carrier frequency classification library.
//!
//! No async, no I/O beyond the config file helpers. Maps raw carrier
//! frequencies to constellation + band labels and reports dual-frequency
//! capability. Used by `gnss-cli` (the `gnss-bands` binary).

pub mod bands;
pub mod classify;
pub mod config;
pub mod summary;
pub mod types;

// Re-export commonly used types at crate root
pub use bands::{band_info, carrier_frequencies, glonass_fdma_channel, ReferenceFrequency};
pub use classify::{aggregate_dual_frequency_capability, classify, classify_all, Classifier};
pub use summary::CapabilitySummary;
pub use types::*;
