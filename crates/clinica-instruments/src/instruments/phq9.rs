use crate::Instrument;
use crate::scoring::{Category, Polarity, SeverityBand};

/// PHQ-9: Patient Health Questionnaire, 9 items rated 0–3. Total 0–27.
pub struct Phq9;

impl Instrument for Phq9 {
    fn id(&self) -> &str {
        "phq-9"
    }

    fn name(&self) -> &str {
        "PHQ-9"
    }

    fn full_name(&self) -> &str {
        "Patient Health Questionnaire-9"
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
                SeverityBand::new(0, 4, "Mínima", 1),
                SeverityBand::new(5, 9, "Leve", 2),
                SeverityBand::new(10, 14, "Moderada", 3),
                SeverityBand::new(15, 19, "Moderadamente severa", 4),
                SeverityBand::new(20, 27, "Severa", 5),
            ]
        });
        &BANDS
    }
}
