//! Data-driven instruments loaded from the reference table supplied by the
//! surrounding application, alongside the compiled-in ones.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::Instrument;
use crate::scoring::{Category, Polarity, SeverityBand};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct InstrumentDefinition {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub category: Category,
    pub polarity: Polarity,
    pub bands: Vec<SeverityBand>,
}

impl InstrumentDefinition {
    /// Snapshot any instrument as plain data, e.g. to hand the built-in
    /// table to the UI layer.
    pub fn of(instrument: &dyn Instrument) -> Self {
        Self {
            id: instrument.id().to_string(),
            name: instrument.name().to_string(),
            full_name: instrument.full_name().to_string(),
            category: instrument.category(),
            polarity: instrument.polarity(),
            bands: instrument.bands().to_vec(),
        }
    }
}

impl Instrument for InstrumentDefinition {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn full_name(&self) -> &str {
        if self.full_name.is_empty() {
            &self.name
        } else {
            &self.full_name
        }
    }

    fn category(&self) -> Category {
        self.category
    }

    fn polarity(&self) -> Polarity {
        self.polarity
    }

    fn bands(&self) -> &[SeverityBand] {
        &self.bands
    }
}
