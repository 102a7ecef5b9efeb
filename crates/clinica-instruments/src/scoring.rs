use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

/// Label shown when no band table is registered for an instrument.
pub const NOT_AVAILABLE_LABEL: &str = "No disponible";

/// Label shown when a score falls outside every band of a known instrument.
pub const OUT_OF_RANGE_LABEL: &str = "Fuera de rango";

/// Whether a higher score means a worse or a better clinical status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Polarity {
    /// Symptom scales (PHQ-9, GAD-7, BDI-II, BAI).
    HigherIsWorse,
    /// Well-being and functioning scales (WHO-5).
    HigherIsBetter,
}

impl Polarity {
    /// Whether a signed change (`latest - previous`) is a clinical improvement.
    /// Zero change is never an improvement.
    pub fn is_improvement(self, change: i32) -> bool {
        match self {
            Polarity::HigherIsWorse => change < 0,
            Polarity::HigherIsBetter => change > 0,
        }
    }
}

/// Broad clinical area an instrument belongs to. Descriptive only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "kebab-case")]
#[ts(export)]
pub enum Category {
    Depression,
    Anxiety,
    Personality,
    Cognitive,
    Behavioral,
    Neuropsychological,
    QualityOfLife,
    #[default]
    Other,
}

/// Inclusive integer score range of a severity band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BandRange {
    pub min: i32,
    pub max: i32,
}

impl BandRange {
    pub fn contains(&self, score: i32) -> bool {
        self.min <= score && score <= self.max
    }
}

/// A named severity band covering a contiguous score sub-range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SeverityBand {
    pub range: BandRange,
    pub label: String,
    pub severity_rank: u8,
}

impl SeverityBand {
    pub fn new(min: i32, max: i32, label: &str, severity_rank: u8) -> Self {
        Self {
            range: BandRange { min, max },
            label: label.to_string(),
            severity_rank,
        }
    }
}

/// Result of classifying a score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "status", rename_all = "snake_case")]
#[ts(export)]
pub enum Interpretation {
    Found { label: String, severity_rank: u8 },
    /// No band table is registered for the instrument.
    NotAvailable,
    /// The instrument is known but the score is outside its table.
    OutOfRange,
}

impl Interpretation {
    pub fn label(&self) -> &str {
        match self {
            Interpretation::Found { label, .. } => label,
            Interpretation::NotAvailable => NOT_AVAILABLE_LABEL,
            Interpretation::OutOfRange => OUT_OF_RANGE_LABEL,
        }
    }

    pub fn severity_rank(&self) -> Option<u8> {
        match self {
            Interpretation::Found { severity_rank, .. } => Some(*severity_rank),
            _ => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Interpretation::Found { .. })
    }
}

/// Classify `score` against an ordered band table.
///
/// Bands are sorted by range, so the candidate is the first band whose `max`
/// is not below the score.
pub fn interpret_bands(bands: &[SeverityBand], score: i32) -> Interpretation {
    let idx = bands.partition_point(|b| b.range.max < score);
    match bands.get(idx) {
        Some(band) if band.range.contains(score) => Interpretation::Found {
            label: band.label.clone(),
            severity_rank: band.severity_rank,
        },
        _ => Interpretation::OutOfRange,
    }
}

/// A broken invariant in a band table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BandViolation {
    #[error("no severity bands defined")]
    Empty,

    #[error("band {index} has min {min} greater than max {max}")]
    InvertedRange { index: usize, min: i32, max: i32 },

    #[error("band {index} starts at {min} but the previous band ends at {previous_max} (gap)")]
    Gap {
        index: usize,
        min: i32,
        previous_max: i32,
    },

    #[error("band {index} starts at {min} but the previous band ends at {previous_max} (overlap)")]
    Overlap {
        index: usize,
        min: i32,
        previous_max: i32,
    },

    #[error("severity rank of band {index} breaks the monotonic order")]
    NonMonotonicRank { index: usize },
}

/// Check a band table: non-empty, each range well formed, ranges contiguous
/// and non-overlapping, severity ranks strictly monotonic in either direction.
pub fn check_bands(bands: &[SeverityBand]) -> Vec<BandViolation> {
    let mut violations = Vec::new();
    if bands.is_empty() {
        violations.push(BandViolation::Empty);
        return violations;
    }

    for (index, band) in bands.iter().enumerate() {
        if band.range.min > band.range.max {
            violations.push(BandViolation::InvertedRange {
                index,
                min: band.range.min,
                max: band.range.max,
            });
        }
    }

    for (index, pair) in bands.windows(2).enumerate() {
        let (previous, band) = (&pair[0], &pair[1]);
        let index = index + 1;
        let expected = previous.range.max.saturating_add(1);
        if band.range.min > expected {
            violations.push(BandViolation::Gap {
                index,
                min: band.range.min,
                previous_max: previous.range.max,
            });
        } else if band.range.min < expected {
            violations.push(BandViolation::Overlap {
                index,
                min: band.range.min,
                previous_max: previous.range.max,
            });
        }
    }

    if bands.len() > 1 {
        let ascending = bands[1].severity_rank > bands[0].severity_rank;
        for (index, pair) in bands.windows(2).enumerate() {
            let ordered = if ascending {
                pair[1].severity_rank > pair[0].severity_rank
            } else {
                pair[1].severity_rank < pair[0].severity_rank
            };
            if !ordered {
                violations.push(BandViolation::NonMonotonicRank { index: index + 1 });
            }
        }
    }

    violations
}
