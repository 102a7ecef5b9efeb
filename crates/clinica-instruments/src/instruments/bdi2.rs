use crate::Instrument;
use crate::scoring::{Category, Polarity, SeverityBand};

/// BDI-II: Beck Depression Inventory, Second Edition.
/// 21 items rated 0–3. Total 0–63.
pub struct Bdi2;

impl Instrument for Bdi2 {
    fn id(&self) -> &str {
        "beck-depression"
    }

    fn name(&self) -> &str {
        "BDI-II"
    }

    fn full_name(&self) -> &str {
        "Beck Depression Inventory II"
    }

    fn category(&self) -> Category {
        Category::Depression
    }

    fn polarity(&self) -> Polarity {
        Polarity::HigherIsWorse
    }

    fn bands(&self) -> &[SeverityBand] {
        static BANDS: std::sync::LazyLock<Vec<SeverityBand>> = std::sync::LazyLock::new(|| {
            vec![
                SeverityBand::new(0, 13, "Mínima", 1),
                SeverityBand::new(14, 19, "Leve", 2),
                SeverityBand::new(20, 28, "Moderada", 3),
                SeverityBand::new(29, 63, "Severa", 4),
            ]
        });
        &BANDS
    }
}
