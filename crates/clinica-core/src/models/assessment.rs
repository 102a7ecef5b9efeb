use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;
use crate::lenient;

/// One completed administration of a psychometric instrument.
///
/// Records are never mutated. A later administration of the same instrument
/// supersedes an earlier one for trend purposes but does not replace it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AssessmentRecord {
    pub instrument_id: String,
    #[serde(deserialize_with = "lenient::score")]
    pub score: i32,
    pub administered_at: jiff::Timestamp,
    #[serde(
        default,
        deserialize_with = "lenient::percentile",
        skip_serializing_if = "Option::is_none"
    )]
    pub percentile: Option<u8>,
}

impl AssessmentRecord {
    pub fn new(instrument_id: impl Into<String>, score: i32, administered_at: jiff::Timestamp) -> Self {
        Self {
            instrument_id: instrument_id.into(),
            score,
            administered_at,
            percentile: None,
        }
    }

    pub fn with_percentile(mut self, percentile: u8) -> Self {
        self.percentile = Some(percentile);
        self
    }
}

/// Parse a subject's assessment history from a JSON array. Entries that are
/// not usable records are skipped.
pub fn history_from_json(json: &str) -> Result<Vec<AssessmentRecord>, CoreError> {
    let entries: Vec<serde_json::Value> = serde_json::from_str(json)?;
    Ok(entries
        .into_iter()
        .filter_map(|entry| serde_json::from_value(entry).ok())
        .collect())
}
