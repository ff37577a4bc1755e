//! Individual profile and the rating scales used to collect it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;
use crate::process::{individual_factors, IndividualFactors};

/// Sleep-related genetic variants the model recognises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GeneticVariant {
    /// Short-sleeper variant.
    #[serde(rename = "DEC2")]
    Dec2,
    /// Long-allele PER3, higher sleep need.
    #[serde(rename = "PER3")]
    Per3,
    /// Adenosine deaminase variant, higher deprivation sensitivity.
    #[serde(rename = "ADA")]
    Ada,
}

impl fmt::Display for GeneticVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            GeneticVariant::Dec2 => "DEC2",
            GeneticVariant::Per3 => "PER3",
            GeneticVariant::Ada => "ADA",
        };
        f.write_str(tag)
    }
}

impl FromStr for GeneticVariant {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "DEC2" => Ok(GeneticVariant::Dec2),
            "PER3" => Ok(GeneticVariant::Per3),
            "ADA" => Ok(GeneticVariant::Ada),
            other => Err(ValidationError::InvalidValue {
                field: "genetic_profile".to_string(),
                message: format!("unknown variant '{other}', expected DEC2, PER3 or ADA"),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
    #[default]
    Other,
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Sex::Male => "male",
            Sex::Female => "female",
            Sex::Other => "other",
        };
        f.write_str(s)
    }
}

impl FromStr for Sex {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "male" | "m" => Ok(Sex::Male),
            "female" | "f" => Ok(Sex::Female),
            "other" | "unknown" | "" => Ok(Sex::Other),
            other => Err(ValidationError::InvalidValue {
                field: "sex".to_string(),
                message: format!("unknown value '{other}', expected male, female or other"),
            }),
        }
    }
}

/// Person-specific inputs to the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndividualProfile {
    #[serde(default)]
    pub genetic_profile: Vec<GeneticVariant>,
    #[serde(default)]
    pub sex: Sex,
    #[serde(default = "default_age")]
    pub age: u32,
    /// Circadian phase shift in hours, negative for early chronotypes.
    #[serde(default)]
    pub chronotype_offset: f64,
}

fn default_age() -> u32 {
    30
}

impl Default for IndividualProfile {
    fn default() -> Self {
        Self {
            genetic_profile: Vec::new(),
            sex: Sex::Other,
            age: default_age(),
            chronotype_offset: 0.0,
        }
    }
}

impl IndividualProfile {
    pub fn factors(&self) -> IndividualFactors {
        individual_factors(&self.genetic_profile, self.sex, self.age)
    }
}

/// Self-reported time of peak alertness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Chronotype {
    /// 06–09
    EarlyMorning,
    /// 09–12
    MidMorning,
    /// 12–18
    Afternoon,
    /// 18–21
    Evening,
    /// after 21
    LateEvening,
}

impl Chronotype {
    /// Map the 1–5 questionnaire answer.
    pub fn from_rating(rating: u8) -> Result<Self, ValidationError> {
        match rating {
            1 => Ok(Chronotype::EarlyMorning),
            2 => Ok(Chronotype::MidMorning),
            3 => Ok(Chronotype::Afternoon),
            4 => Ok(Chronotype::Evening),
            5 => Ok(Chronotype::LateEvening),
            _ => Err(rating_error("chronotype", rating, 5)),
        }
    }

    /// Phase offset in hours.
    pub fn offset(self) -> f64 {
        match self {
            Chronotype::EarlyMorning => -2.5,
            Chronotype::MidMorning => -1.5,
            Chronotype::Afternoon => 0.0,
            Chronotype::Evening => 1.5,
            Chronotype::LateEvening => 2.5,
        }
    }
}

/// Sleep disruption over the last few days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SleepDisruption {
    None,
    /// 1–2 h less sleep
    Mild,
    /// 2–4 h less sleep
    Moderate,
    /// 4+ h less sleep
    Severe,
}

impl SleepDisruption {
    pub fn from_rating(rating: u8) -> Result<Self, ValidationError> {
        match rating {
            1 => Ok(SleepDisruption::None),
            2 => Ok(SleepDisruption::Mild),
            3 => Ok(SleepDisruption::Moderate),
            4 => Ok(SleepDisruption::Severe),
            _ => Err(rating_error("disruption", rating, 4)),
        }
    }

    /// Debt hours added on top of the reported debt.
    pub fn extra_debt(self) -> f64 {
        match self {
            SleepDisruption::None => 0.0,
            SleepDisruption::Mild => 2.0,
            SleepDisruption::Moderate => 6.0,
            SleepDisruption::Severe => 12.0,
        }
    }
}

/// Sleep quality 1 (poor) – 4 (excellent) onto `[0, 1]`.
pub fn sleep_quality_from_rating(rating: u8) -> Result<f64, ValidationError> {
    if !(1..=4).contains(&rating) {
        return Err(rating_error("sleep_quality", rating, 4));
    }
    Ok(f64::from(rating - 1) / 3.0)
}

/// Cognitive demand 1 (low) – 4 (very high) onto the 0–3 load scale.
pub fn cognitive_load_from_rating(rating: u8) -> Result<f64, ValidationError> {
    if !(1..=4).contains(&rating) {
        return Err(rating_error("cognitive_load", rating, 4));
    }
    Ok(f64::from(rating - 1))
}

fn rating_error(field: &str, rating: u8, max: u8) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.to_string(),
        message: format!("rating {rating} is not in 1-{max}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_variants_case_insensitively() {
        assert_eq!("dec2".parse::<GeneticVariant>().unwrap(), GeneticVariant::Dec2);
        assert_eq!(" PER3 ".parse::<GeneticVariant>().unwrap(), GeneticVariant::Per3);
        assert!("CLOCK".parse::<GeneticVariant>().is_err());
    }

    #[test]
    fn variant_serde_uses_gene_names() {
        let json = serde_json::to_string(&vec![GeneticVariant::Ada]).unwrap();
        assert_eq!(json, r#"["ADA"]"#);
    }

    #[test]
    fn profile_deserializes_from_empty_object() {
        let p: IndividualProfile = serde_json::from_str("{}").unwrap();
        assert_eq!(p, IndividualProfile::default());
    }

    #[test]
    fn rating_scales() {
        assert_eq!(sleep_quality_from_rating(1).unwrap(), 0.0);
        assert_eq!(sleep_quality_from_rating(4).unwrap(), 1.0);
        assert!(sleep_quality_from_rating(0).is_err());
        assert_eq!(cognitive_load_from_rating(2).unwrap(), 1.0);
        assert_eq!(Chronotype::from_rating(1).unwrap().offset(), -2.5);
        assert_eq!(SleepDisruption::from_rating(3).unwrap().extra_debt(), 6.0);
        assert!(Chronotype::from_rating(6).is_err());
    }
}
