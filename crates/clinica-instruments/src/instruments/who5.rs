use crate::Instrument;
use crate::scoring::{Category, Polarity, SeverityBand};

/// WHO-5: World Health Organization Well-Being Index.
/// 5 items rated 0–5, raw total 0–25. Higher = better well-being,
/// so severity rank decreases as the score rises.
pub struct Who5;

impl Instrument for Who5 {
    fn id(&self) -> &str {
        "who-5"
    }

    fn name(&self) -> &str {
        "WHO-5"
    }

    fn full_name(&self) -> &str {
        "WHO-5 Well-Being Index"
    }

    fn category(&self) -> Category {
        Category::QualityOfLife
    }

    fn polarity(&self) -> Polarity {
        Polarity::HigherIsBetter
    }

    fn bands(&self) -> &[SeverityBand] {
        static BANDS: std::sync::LazyLock<Vec<SeverityBand>> = std::sync::LazyLock::new(|| {
            vec![
                SeverityBand::new(0, 12, "Bienestar bajo", 2),
                SeverityBand::new(13, 25, "Bienestar adecuado", 1),
            ]
        });
        &BANDS
    }
}
