use crate::Instrument;
use crate::scoring::{Category, Polarity, SeverityBand};

/// BAI: Beck Anxiety Inventory. 21 items rated 0–3. Total 0–63.
pub struct Bai;

impl Instrument for Bai {
    fn id(&self) -> &str {
        "beck-anxiety"
    }

    fn name(&self) -> &str {
        "BAI"
    }

    fn full_name(&self) -> &str {
        "Beck Anxiety Inventory"
    }

    fn category(&self) -> Category {
        Category::Anxiety
    }

    fn polarity(&self) -> Polarity {
        Polarity::HigherIsWorse
    }

    fn bands(&self) -> &[SeverityBand] {
        static BANDS: std::sync::LazyLock<Vec<SeverityBand>> = std::sync::LazyLock::new(|| {
            vec![
                SeverityBand::new(0, 7, "Mínima", 1),
                SeverityBand::new(8, 15, "Leve", 2),
                SeverityBand::new(16, 25, "Moderada", 3),
                SeverityBand::new(26, 63, "Severa", 4),
            ]
        });
        &BANDS
    }
}
