use std::collections::HashSet;
use std::fmt;

use clinica_core::models::assessment::AssessmentRecord;

use crate::definition::InstrumentDefinition;
use crate::error::InstrumentError;
use crate::scoring::{Interpretation, Polarity};
use crate::trend::{self, BaselineComparison, TrendResult};
use crate::{Instrument, all_instruments};

/// The instrument reference table shared by score interpretation and trend
/// analysis. Built once per session and read-only afterwards.
pub struct InstrumentTable {
    instruments: Vec<Box<dyn Instrument>>,
}

impl InstrumentTable {
    /// Table holding only the compiled-in instruments.
    pub fn builtin() -> Self {
        Self {
            instruments: all_instruments(),
        }
    }

    /// Table holding only caller-supplied definitions. Every band table is
    /// validated and ids must be unique.
    pub fn from_definitions(definitions: Vec<InstrumentDefinition>) -> Result<Self, InstrumentError> {
        Self { instruments: Vec::new() }.with_definitions(definitions)
    }

    /// Parse a JSON array of [`InstrumentDefinition`]s.
    pub fn from_json(json: &str) -> Result<Self, InstrumentError> {
        let definitions: Vec<InstrumentDefinition> = serde_json::from_str(json)?;
        Self::from_definitions(definitions)
    }

    /// Add caller-supplied definitions to this table.
    pub fn with_definitions(
        mut self,
        definitions: Vec<InstrumentDefinition>,
    ) -> Result<Self, InstrumentError> {
        let mut seen: HashSet<String> = self.instruments.iter().map(|i| i.id().to_string()).collect();

        for definition in definitions {
            if let Some(violation) = definition.validate_bands().into_iter().next() {
                return Err(InstrumentError::InvalidBands {
                    instrument_id: definition.id,
                    violation,
                });
            }
            if !seen.insert(definition.id.clone()) {
                return Err(InstrumentError::DuplicateInstrument(definition.id));
            }
            self.instruments.push(Box::new(definition));
        }
        Ok(self)
    }

    pub fn get(&self, id: &str) -> Option<&dyn Instrument> {
        self.instruments
            .iter()
            .find(|i| i.id() == id)
            .map(|i| i.as_ref())
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Instrument> {
        self.instruments.iter().map(|i| i.as_ref())
    }

    pub fn len(&self) -> usize {
        self.instruments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instruments.is_empty()
    }

    pub fn polarity(&self, id: &str) -> Option<Polarity> {
        self.get(id).map(|i| i.polarity())
    }

    /// Classify a score. Unknown instruments yield
    /// [`Interpretation::NotAvailable`].
    pub fn interpret(&self, instrument_id: &str, score: i32) -> Interpretation {
        match self.get(instrument_id) {
            Some(instrument) => instrument.interpret(score),
            None => Interpretation::NotAvailable,
        }
    }

    /// Trend between the two most recent administrations, with improvement
    /// judged by the instrument's polarity.
    pub fn analyze_trend(&self, instrument_id: &str, series: &[AssessmentRecord]) -> Option<TrendResult> {
        trend::analyze_trend(instrument_id, self.polarity(instrument_id), series)
    }

    pub fn compare_to_baseline(
        &self,
        instrument_id: &str,
        series: &[AssessmentRecord],
    ) -> Option<BaselineComparison> {
        trend::compare_to_baseline(instrument_id, self.polarity(instrument_id), series)
    }

    /// Baseline comparisons for every instrument in a subject's history.
    pub fn compare_all(
        &self,
        records: &[AssessmentRecord],
        since: Option<jiff::Timestamp>,
    ) -> Vec<BaselineComparison> {
        trend::compare_all(records, since, |id| self.polarity(id))
    }

    /// The whole table as plain data.
    pub fn definitions(&self) -> Vec<InstrumentDefinition> {
        self.iter().map(InstrumentDefinition::of).collect()
    }
}

impl Default for InstrumentTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl fmt::Debug for InstrumentTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.instruments.iter().map(|i| i.id()))
            .finish()
    }
}
