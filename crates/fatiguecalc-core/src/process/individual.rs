//! Individual-factors resolver.

use serde::{Deserialize, Serialize};

use crate::schedule::{GeneticVariant, Sex};

/// Age above which sleep need and sensitivity shift.
const AGE_THRESHOLD: u32 = 40;

/// Multipliers derived once per run from an individual profile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndividualFactors {
    pub sleep_need_modifier: f64,
    pub deprivation_sensitivity: f64,
}

impl Default for IndividualFactors {
    fn default() -> Self {
        Self {
            sleep_need_modifier: 1.0,
            deprivation_sensitivity: 1.0,
        }
    }
}

/// Resolve `(sleep_need_modifier, deprivation_sensitivity)`.
///
/// Variant multipliers compose: DEC2 ×0.8 and PER3 ×1.2 on sleep need, ADA
/// ×1.1 on sensitivity. Female sex ×1.2 sensitivity. Over 40: need ×0.95,
/// sensitivity ×1.1.
pub fn individual_factors(genetic_profile: &[GeneticVariant], sex: Sex, age: u32) -> IndividualFactors {
    let mut factors = IndividualFactors::default();

    for variant in genetic_profile {
        match variant {
            GeneticVariant::Dec2 => factors.sleep_need_modifier *= 0.8,
            GeneticVariant::Per3 => factors.sleep_need_modifier *= 1.2,
            GeneticVariant::Ada => factors.deprivation_sensitivity *= 1.1,
        }
    }

    if sex == Sex::Female {
        factors.deprivation_sensitivity *= 1.2;
    }

    if age > AGE_THRESHOLD {
        factors.sleep_need_modifier *= 0.95;
        factors.deprivation_sensitivity *= 1.1;
    }

    factors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_profile_is_neutral() {
        let f = individual_factors(&[], Sex::Other, 30);
        assert_eq!(f, IndividualFactors::default());
    }

    #[test]
    fn variants_compose_multiplicatively() {
        let f = individual_factors(
            &[GeneticVariant::Dec2, GeneticVariant::Per3, GeneticVariant::Ada],
            Sex::Male,
            30,
        );
        assert!((f.sleep_need_modifier - 0.96).abs() < 1e-12);
        assert!((f.deprivation_sensitivity - 1.1).abs() < 1e-12);
    }

    #[test]
    fn sex_and_age_adjust_sensitivity() {
        let f = individual_factors(&[], Sex::Female, 41);
        assert!((f.sleep_need_modifier - 0.95).abs() < 1e-12);
        assert!((f.deprivation_sensitivity - 1.32).abs() < 1e-12);
    }

    #[test]
    fn age_forty_is_not_over_forty() {
        let f = individual_factors(&[], Sex::Male, 40);
        assert_eq!(f, IndividualFactors::default());
    }
}
