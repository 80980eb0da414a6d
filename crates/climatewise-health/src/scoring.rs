//! Client-side risk scoring.
//!
//! Pure and total: no I/O, no persisted state, no error branch for any
//! in-range input. The overall score blends the three pollutant base
//! scores 50% NO2 / 25% HCHO / 25% O3, scaled to 0..=100; per-disease
//! risk uses the disease's own weight triple, normalized at scoring
//! time (catalog weights need not sum to 1).

use crate::types::Sensitivity;

/// Fixed blend for the overall score.
const OVERALL_NO2_WEIGHT: f64 = 0.5;
const OVERALL_HCHO_WEIGHT: f64 = 0.25;
const OVERALL_O3_WEIGHT: f64 = 0.25;

/// Per-pollutant weight triple, each in 0..=1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PollutantWeights {
    pub no2: f64,
    pub hcho: f64,
    pub o3: f64,
}

impl PollutantWeights {
    pub const fn new(no2: f64, hcho: f64, o3: f64) -> Self {
        Self { no2, hcho, o3 }
    }

    pub fn sum(&self) -> f64 {
        self.no2 + self.hcho + self.o3
    }
}

/// Static catalog entry for a selectable condition.
#[derive(Debug, Clone, PartialEq)]
pub struct DiseaseSpec {
    pub id: &'static str,
    pub name: &'static str,
    pub weights: PollutantWeights,
}

impl DiseaseSpec {
    /// A disease with an all-zero weight triple is disabled: excluded
    /// from selection entirely, not merely low-risk.
    pub fn is_enabled(&self) -> bool {
        self.weights.sum() > 0.0
    }
}

/// The static disease catalog.
pub fn catalog() -> &'static [DiseaseSpec] {
    const CATALOG: &[DiseaseSpec] = &[
        DiseaseSpec {
            id: "asthma",
            name: "Asthma",
            weights: PollutantWeights::new(0.5, 0.2, 0.3),
        },
        DiseaseSpec {
            id: "copd",
            name: "COPD",
            weights: PollutantWeights::new(0.45, 0.25, 0.3),
        },
        DiseaseSpec {
            id: "bronchitis",
            name: "Chronic bronchitis",
            weights: PollutantWeights::new(0.4, 0.35, 0.25),
        },
        DiseaseSpec {
            id: "heart_disease",
            name: "Heart disease",
            weights: PollutantWeights::new(0.6, 0.1, 0.3),
        },
        DiseaseSpec {
            id: "allergic_rhinitis",
            name: "Allergic rhinitis",
            weights: PollutantWeights::new(0.3, 0.45, 0.25),
        },
        // placeholder kept while its weighting is unresolved upstream;
        // all-zero weights keep it out of the selection list
        DiseaseSpec {
            id: "diabetes",
            name: "Diabetes",
            weights: PollutantWeights::new(0.0, 0.0, 0.0),
        },
    ];
    CATALOG
}

fn clamp_0_100(value: f64) -> f64 {
    value.clamp(0.0, 100.0)
}

/// Overall 0..=100 health score for a sensitivity tier.
pub fn overall_score(tier: Sensitivity) -> f64 {
    let base = tier.base_score();
    let blended =
        OVERALL_NO2_WEIGHT * base + OVERALL_HCHO_WEIGHT * base + OVERALL_O3_WEIGHT * base;
    clamp_0_100(blended * 10.0)
}

/// Per-disease 0..=100 risk for a sensitivity tier. Disabled diseases
/// score 0 (they are filtered out of selection before this is shown).
pub fn disease_risk(disease: &DiseaseSpec, tier: Sensitivity) -> f64 {
    let sum = disease.weights.sum();
    if sum <= 0.0 {
        return 0.0;
    }
    let base = tier.base_score();
    let weighted = (disease.weights.no2 * base
        + disease.weights.hcho * base
        + disease.weights.o3 * base)
        / sum;
    clamp_0_100(weighted * 10.0)
}

/// Advisory band for the overall score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RiskBand {
    Low,
    Moderate,
    High,
}

impl RiskBand {
    pub fn for_score(score: f64) -> Self {
        if score < 34.0 {
            Self::Low
        } else if score < 67.0 {
            Self::Moderate
        } else {
            Self::High
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Moderate => "Moderate",
            Self::High => "High",
        }
    }
}

/// Color level of an individual disease chip. Cut points differ per
/// sensitivity tier: stricter tiers flag risk earlier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ChipLevel {
    Calm,
    Caution,
    Alert,
}

fn chip_cut_points(tier: Sensitivity) -> (f64, f64) {
    match tier {
        Sensitivity::Sensitive => (25.0, 50.0),
        Sensitivity::Normal => (40.0, 70.0),
        Sensitivity::Relaxed => (55.0, 80.0),
    }
}

pub fn chip_level(risk: f64, tier: Sensitivity) -> ChipLevel {
    let (caution, alert) = chip_cut_points(tier);
    if risk < caution {
        ChipLevel::Calm
    } else if risk < alert {
        ChipLevel::Caution
    } else {
        ChipLevel::Alert
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overall_scores_per_tier() {
        assert_eq!(overall_score(Sensitivity::Sensitive), 20.0);
        assert_eq!(overall_score(Sensitivity::Normal), 60.0);
        assert_eq!(overall_score(Sensitivity::Relaxed), 85.0);
    }

    #[test]
    fn banding_is_total_and_monotonic() {
        let mut previous = RiskBand::Low;
        for score in 0..=100 {
            let band = RiskBand::for_score(score as f64);
            assert!(band >= previous, "band regressed at score {score}");
            previous = band;
        }
        assert_eq!(RiskBand::for_score(0.0), RiskBand::Low);
        assert_eq!(RiskBand::for_score(33.9), RiskBand::Low);
        assert_eq!(RiskBand::for_score(34.0), RiskBand::Moderate);
        assert_eq!(RiskBand::for_score(66.9), RiskBand::Moderate);
        assert_eq!(RiskBand::for_score(67.0), RiskBand::High);
        assert_eq!(RiskBand::for_score(100.0), RiskBand::High);
    }

    #[test]
    fn disease_risk_normalizes_weights() {
        // identical base scores across pollutants make every enabled
        // disease resolve to the tier's blended value
        for disease in catalog().iter().filter(|d| d.is_enabled()) {
            assert!((disease_risk(disease, Sensitivity::Normal) - 60.0).abs() < 1e-9);
            assert!((disease_risk(disease, Sensitivity::Relaxed) - 85.0).abs() < 1e-9);
        }
    }

    #[test]
    fn zero_weight_disease_is_disabled_for_every_tier() {
        let disabled: Vec<_> = catalog().iter().filter(|d| !d.is_enabled()).collect();
        assert!(!disabled.is_empty());
        for disease in disabled {
            assert!(!disease.is_enabled());
            for tier in [
                Sensitivity::Sensitive,
                Sensitivity::Normal,
                Sensitivity::Relaxed,
            ] {
                assert_eq!(disease_risk(disease, tier), 0.0);
            }
        }
    }

    #[test]
    fn chip_cut_points_differ_per_tier() {
        // the same risk renders differently depending on sensitivity
        assert_eq!(chip_level(45.0, Sensitivity::Sensitive), ChipLevel::Caution);
        assert_eq!(chip_level(45.0, Sensitivity::Normal), ChipLevel::Caution);
        assert_eq!(chip_level(45.0, Sensitivity::Relaxed), ChipLevel::Calm);

        assert_eq!(chip_level(60.0, Sensitivity::Sensitive), ChipLevel::Alert);
        assert_eq!(chip_level(60.0, Sensitivity::Normal), ChipLevel::Caution);
        assert_eq!(chip_level(60.0, Sensitivity::Relaxed), ChipLevel::Caution);
    }

    #[test]
    fn scores_stay_in_range() {
        for tier in [
            Sensitivity::Sensitive,
            Sensitivity::Normal,
            Sensitivity::Relaxed,
        ] {
            let overall = overall_score(tier);
            assert!((0.0..=100.0).contains(&overall));
            for disease in catalog() {
                let risk = disease_risk(disease, tier);
                assert!((0.0..=100.0).contains(&risk));
            }
        }
    }
}
