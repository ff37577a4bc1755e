//! Model flags shared by commands; each one overrides the matching config value.

use clap::Args;

use fatiguecalc_core::error::ValidationError;
use fatiguecalc_core::schedule::{
    cognitive_load_from_rating, sleep_quality_from_rating, Chronotype, GeneticVariant, Sex, SleepDisruption,
};
use fatiguecalc_core::Config;

#[derive(Args, Debug, Default)]
pub struct ModelArgs {
    /// Bedtime, hour of day
    #[arg(long)]
    pub bedtime: Option<f64>,
    /// Wake time, hour of day
    #[arg(long)]
    pub wake: Option<f64>,
    /// Sleep quality in [0, 1]
    #[arg(long, conflicts_with = "quality_rating")]
    pub quality: Option<f64>,
    /// Sleep quality rating: 1 poor, 2 fair, 3 good, 4 excellent
    #[arg(long)]
    pub quality_rating: Option<u8>,
    /// Sleep debt at the start, in hours
    #[arg(long)]
    pub debt: Option<f64>,
    /// Recent disruption: 1 none, 2 mild, 3 moderate, 4 severe (adds debt)
    #[arg(long)]
    pub disruption: Option<u8>,
    /// Work start, hour of day
    #[arg(long)]
    pub work_start: Option<f64>,
    /// Work end, hour of day
    #[arg(long)]
    pub work_end: Option<f64>,
    /// Cognitive load 0-3
    #[arg(long, conflicts_with = "load_rating")]
    pub load: Option<f64>,
    /// Cognitive load rating: 1 light, 2 moderate, 3 high, 4 very high
    #[arg(long)]
    pub load_rating: Option<u8>,
    /// Simulate without work
    #[arg(long)]
    pub no_work: bool,
    /// Work every day, including configured rest days
    #[arg(long)]
    pub no_rest_days: bool,
    #[arg(long)]
    pub age: Option<u32>,
    /// male, female or other
    #[arg(long)]
    pub sex: Option<Sex>,
    /// Genetic variants, comma separated (DEC2, PER3, ADA)
    #[arg(long, value_delimiter = ',')]
    pub genetic: Vec<GeneticVariant>,
    /// Chronotype: 1 early morning, 3 afternoon, 5 late evening
    #[arg(long, conflicts_with = "chronotype_offset")]
    pub chronotype: Option<u8>,
    /// Chronotype offset in hours
    #[arg(long, allow_hyphen_values = true)]
    pub chronotype_offset: Option<f64>,
    /// Output multiplier, e.g. a calibrated factor
    #[arg(long)]
    pub enhancement: Option<f64>,
}

impl ModelArgs {
    /// Overlay the flags onto `config` and validate the result.
    pub fn apply(&self, config: &mut Config) -> Result<(), ValidationError> {
        if let Some(v) = self.bedtime {
            config.sleep.bedtime = v;
        }
        if let Some(v) = self.wake {
            config.sleep.wake_time = v;
        }
        if let Some(v) = self.quality {
            config.sleep.quality = v;
        }
        if let Some(r) = self.quality_rating {
            config.sleep.quality = sleep_quality_from_rating(r)?;
        }
        if let Some(v) = self.debt {
            config.sleep.debt = v;
        }
        if let Some(r) = self.disruption {
            config.sleep.debt += SleepDisruption::from_rating(r)?.extra_debt();
        }

        if let Some(v) = self.work_start {
            config.work.start = v;
        }
        if let Some(v) = self.work_end {
            config.work.end = v;
        }
        if let Some(v) = self.load {
            config.work.load_rating = v;
        }
        if let Some(r) = self.load_rating {
            config.work.load_rating = cognitive_load_from_rating(r)?;
        }
        if self.no_work {
            config.work.enabled = false;
        }
        if self.no_rest_days {
            config.work.rest_days.clear();
        }

        if let Some(v) = self.age {
            config.profile.age = v;
        }
        if let Some(v) = self.sex {
            config.profile.sex = v;
        }
        if !self.genetic.is_empty() {
            config.profile.genetic_profile = self.genetic.clone();
        }
        if let Some(r) = self.chronotype {
            config.profile.chronotype_offset = Chronotype::from_rating(r)?.offset();
        }
        if let Some(v) = self.chronotype_offset {
            config.profile.chronotype_offset = v;
        }
        if let Some(v) = self.enhancement {
            config.model.ml_enhancement = v;
        }

        config.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratings_map_onto_config() {
        let args = ModelArgs {
            quality_rating: Some(4),
            disruption: Some(3),
            load_rating: Some(2),
            chronotype: Some(1),
            ..ModelArgs::default()
        };
        let mut config = Config::default();
        args.apply(&mut config).unwrap();
        assert_eq!(config.sleep.quality, 1.0);
        assert_eq!(config.sleep.debt, 6.0);
        assert_eq!(config.work.load_rating, 1.0);
        assert_eq!(config.profile.chronotype_offset, -2.5);
    }

    #[test]
    fn out_of_range_flag_is_rejected() {
        let args = ModelArgs {
            quality: Some(1.5),
            ..ModelArgs::default()
        };
        assert!(args.apply(&mut Config::default()).is_err());
    }

    #[test]
    fn no_flags_keep_config() {
        let mut config = Config::default();
        ModelArgs::default().apply(&mut config).unwrap();
        assert_eq!(config, Config::default());
    }
}
