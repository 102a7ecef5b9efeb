use crate::Instrument;
use crate::scoring::{Category, Polarity, SeverityBand};

/// GAD-7: Generalized Anxiety Disorder scale, 7 items rated 0–3. Total 0–21.
pub struct Gad7;

impl Instrument for Gad7 {
    fn id(&self) -> &str {
        "gad-7"
    }

    fn name(&self) -> &str {
        "GAD-7"
    }

    fn full_name(&self) -> &str {
        "Generalized Anxiety Disorder 7-item"
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
                SeverityBand::new(0, 4, "Mínima", 1),
                SeverityBand::new(5, 9, "Leve", 2),
                SeverityBand::new(10, 14, "Moderada", 3),
                SeverityBand::new(15, 21, "Severa", 4),
            ]
        });
        &BANDS
    }
}
