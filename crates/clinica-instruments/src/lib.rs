//! clinica-instruments
//!
//! Psychometric instrument definitions, score interpretation and longitudinal
//! trend analysis. Pure computation over caller-supplied records: nothing here
//! performs I/O, logs, or fails at runtime. Unknown instruments and short
//! histories come back as explicit sentinel values.

pub mod definition;
pub mod error;
pub mod instruments;
pub mod scoring;
pub mod table;
pub mod trend;

use scoring::{BandRange, BandViolation, Category, Interpretation, Polarity, SeverityBand};

pub use table::InstrumentTable;

/// Trait implemented by each psychometric instrument.
pub trait Instrument: Send + Sync {
    /// Unique identifier for this instrument (e.g., "phq-9", "gad-7").
    fn id(&self) -> &str;

    /// Short display name (e.g., "PHQ-9").
    fn name(&self) -> &str;

    /// Full published name.
    fn full_name(&self) -> &str;

    fn category(&self) -> Category;

    /// Direction in which a score change counts as improvement.
    fn polarity(&self) -> Polarity;

    /// Severity bands, ordered by score range.
    fn bands(&self) -> &[SeverityBand];

    /// Classify a raw score into a severity band.
    fn interpret(&self, score: i32) -> Interpretation {
        scoring::interpret_bands(self.bands(), score)
    }

    /// Full score domain covered by the band table.
    fn score_domain(&self) -> Option<BandRange> {
        let first = self.bands().first()?;
        let last = self.bands().last()?;
        Some(BandRange {
            min: first.range.min,
            max: last.range.max,
        })
    }

    /// Check the band table invariants.
    fn validate_bands(&self) -> Vec<BandViolation> {
        scoring::check_bands(self.bands())
    }
}

/// Return all built-in instruments.
pub fn all_instruments() -> Vec<Box<dyn Instrument>> {
    vec![
        Box::new(instruments::phq9::Phq9),
        Box::new(instruments::gad7::Gad7),
        Box::new(instruments::bdi2::Bdi2),
        Box::new(instruments::bai::Bai),
        Box::new(instruments::who5::Who5),
    ]
}

/// Look up a built-in instrument by ID.
pub fn get_instrument(id: &str) -> Option<Box<dyn Instrument>> {
    all_instruments().into_iter().find(|i| i.id() == id)
}
