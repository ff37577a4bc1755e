//! Schedule inputs: hourly sleep and work patterns plus the individual profile.
//!
//! Patterns are fixed 24-slot arrays indexed by hour of day. Keyed or
//! list-shaped input is validated on construction, so a missing hour fails
//! before any simulation starts.

mod profile;

pub use profile::{
    Chronotype, GeneticVariant, IndividualProfile, Sex, SleepDisruption, cognitive_load_from_rating,
    sleep_quality_from_rating,
};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::ValidationError;

/// Hours in one day.
pub const HOURS_PER_DAY: usize = 24;

/// 24 booleans, one per hour of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<bool>", into = "Vec<bool>")]
pub struct HourlyPattern([bool; HOURS_PER_DAY]);

impl Default for HourlyPattern {
    fn default() -> Self {
        Self::empty()
    }
}

impl HourlyPattern {
    /// Pattern with every hour false.
    pub fn empty() -> Self {
        Self([false; HOURS_PER_DAY])
    }

    pub fn from_array(hours: [bool; HOURS_PER_DAY]) -> Self {
        Self(hours)
    }

    /// Pattern covering `[start, end)` in hour-of-day, wrapping past midnight
    /// when `start > end`. Fractional bounds are compared against whole hours.
    pub fn from_window(start: f64, end: f64) -> Self {
        let start = start.rem_euclid(24.0);
        let end = end.rem_euclid(24.0);
        let mut hours = [false; HOURS_PER_DAY];
        for (h, slot) in hours.iter_mut().enumerate() {
            let h = h as f64;
            *slot = if start <= end {
                start <= h && h < end
            } else {
                h >= start || h < end
            };
        }
        Self(hours)
    }

    /// Build from an hour-keyed map. Every hour 0–23 must be present.
    pub fn from_map(schedule: &str, map: &BTreeMap<u8, bool>) -> Result<Self, ValidationError> {
        let mut hours = [false; HOURS_PER_DAY];
        for (h, slot) in hours.iter_mut().enumerate() {
            let hour = h as u8;
            *slot = *map.get(&hour).ok_or_else(|| ValidationError::MissingHour {
                schedule: schedule.to_string(),
                hour,
            })?;
        }
        Ok(Self(hours))
    }

    /// Build from a list, which must have exactly 24 entries.
    pub fn from_slice(schedule: &str, hours: &[bool]) -> Result<Self, ValidationError> {
        let array: [bool; HOURS_PER_DAY] =
            hours
                .try_into()
                .map_err(|_| ValidationError::IncompletePattern {
                    schedule: schedule.to_string(),
                    len: hours.len(),
                })?;
        Ok(Self(array))
    }

    /// Value for an hour of day (taken modulo 24).
    pub fn get(&self, hour_of_day: usize) -> bool {
        self.0[hour_of_day % HOURS_PER_DAY]
    }

    /// Number of hours set.
    pub fn count(&self) -> usize {
        self.0.iter().filter(|h| **h).count()
    }

    pub fn as_array(&self) -> &[bool; HOURS_PER_DAY] {
        &self.0
    }
}

impl TryFrom<Vec<bool>> for HourlyPattern {
    type Error = ValidationError;

    fn try_from(hours: Vec<bool>) -> Result<Self, Self::Error> {
        Self::from_slice("hourly", &hours)
    }
}

impl From<HourlyPattern> for Vec<bool> {
    fn from(pattern: HourlyPattern) -> Self {
        pattern.0.to_vec()
    }
}

/// Daily sleep pattern and its scalar descriptors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SleepSchedule {
    /// `true` for hours spent asleep.
    pub pattern: HourlyPattern,
    /// Sleep quality in `[0, 1]`.
    pub quality: f64,
    /// Hours of sleep per night.
    pub quantity: f64,
    /// Sleep debt at the start of the run, in hours.
    #[serde(default)]
    pub debt: f64,
}

impl SleepSchedule {
    /// Sleep from `bedtime` to `wake_time` (hours of day), quantity derived
    /// from the window length.
    pub fn from_window(bedtime: f64, wake_time: f64, quality: f64, debt: f64) -> Self {
        Self {
            pattern: HourlyPattern::from_window(bedtime, wake_time),
            quality,
            quantity: (wake_time - bedtime).rem_euclid(24.0),
            debt,
        }
    }

    /// Same window shifted by a chronotype offset in hours.
    pub fn with_chronotype_shift(bedtime: f64, wake_time: f64, offset: f64, quality: f64, debt: f64) -> Self {
        let mut schedule = Self::from_window(bedtime + offset, wake_time + offset, quality, debt);
        schedule.quantity = (wake_time - bedtime).rem_euclid(24.0);
        schedule
    }

    pub fn is_asleep(&self, hour: u32) -> bool {
        self.pattern.get(hour as usize)
    }

    /// Reject quality outside `[0, 1]` or negative quantity/debt.
    pub fn validate(&self) -> Result<(), ValidationError> {
        ValidationError::check_range("sleep.quality", self.quality, 0.0, 1.0)?;
        ValidationError::check_range("sleep.quantity", self.quantity, 0.0, 24.0)?;
        ValidationError::check_range("sleep.debt", self.debt, 0.0, f64::MAX)?;
        Ok(())
    }
}

/// Daily work pattern and workload descriptors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkSchedule {
    /// `true` for hours at work.
    pub pattern: HourlyPattern,
    /// Cognitive load rating, typically 0–3.
    pub load_rating: f64,
    /// Work hours per day.
    #[serde(default)]
    pub daily_hours: f64,
    /// Day indices (0–6, counted from the first simulated day) with no work.
    #[serde(default)]
    pub rest_days: Vec<u8>,
}

impl Default for WorkSchedule {
    fn default() -> Self {
        Self::off()
    }
}

impl WorkSchedule {
    /// Work from `start` to `end` every day.
    pub fn from_window(start: f64, end: f64, load_rating: f64) -> Self {
        Self {
            pattern: HourlyPattern::from_window(start, end),
            load_rating,
            daily_hours: (end - start).rem_euclid(24.0),
            rest_days: Vec::new(),
        }
    }

    /// No work at all.
    pub fn off() -> Self {
        Self {
            pattern: HourlyPattern::empty(),
            load_rating: 0.0,
            daily_hours: 0.0,
            rest_days: Vec::new(),
        }
    }

    pub fn with_rest_days(mut self, rest_days: Vec<u8>) -> Self {
        self.rest_days = rest_days;
        self
    }

    /// Whether absolute simulation hour `hour` falls inside working time.
    pub fn is_at_work(&self, hour: u32) -> bool {
        let day_of_week = ((hour / 24) % 7) as u8;
        self.pattern.get(hour as usize) && !self.rest_days.contains(&day_of_week)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        ValidationError::check_range("work.load_rating", self.load_rating, 0.0, f64::MAX)?;
        ValidationError::check_range("work.daily_hours", self.daily_hours, 0.0, 24.0)?;
        if let Some(day) = self.rest_days.iter().find(|d| **d > 6) {
            return Err(ValidationError::InvalidValue {
                field: "work.rest_days".to_string(),
                message: format!("day index {day} is not in 0-6"),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_wraps_past_midnight() {
        let p = HourlyPattern::from_window(22.0, 6.0);
        assert!(p.get(22) && p.get(23) && p.get(0) && p.get(5));
        assert!(!p.get(6) && !p.get(21) && !p.get(12));
        assert_eq!(p.count(), 8);
    }

    #[test]
    fn window_within_day() {
        let p = HourlyPattern::from_window(9.0, 17.0);
        assert!(p.get(9) && p.get(16));
        assert!(!p.get(17) && !p.get(8));
        assert_eq!(p.count(), 8);
    }

    #[test]
    fn fractional_window_bounds() {
        // 21.5 → 5.5: hours 22..=5
        let p = HourlyPattern::from_window(21.5, 5.5);
        assert!(!p.get(21));
        assert!(p.get(22) && p.get(5));
        assert!(!p.get(6));
    }

    #[test]
    fn map_with_missing_hour_fails() {
        let mut map: BTreeMap<u8, bool> = (0..24).map(|h| (h, false)).collect();
        map.remove(&13);
        let err = HourlyPattern::from_map("sleep", &map).unwrap_err();
        assert_eq!(
            err,
            ValidationError::MissingHour {
                schedule: "sleep".into(),
                hour: 13
            }
        );
    }

    #[test]
    fn short_list_fails() {
        let err = HourlyPattern::from_slice("work", &[true; 23]).unwrap_err();
        assert!(matches!(err, ValidationError::IncompletePattern { len: 23, .. }));
    }

    #[test]
    fn pattern_deserialization_requires_all_hours() {
        let ok: HourlyPattern = serde_json::from_str(&serde_json::to_string(&vec![false; 24]).unwrap()).unwrap();
        assert_eq!(ok.count(), 0);
        let bad = serde_json::from_str::<HourlyPattern>("[true, false]");
        assert!(bad.is_err());
    }

    #[test]
    fn sleep_quantity_from_window() {
        let s = SleepSchedule::from_window(22.0, 7.0, 0.8, 0.0);
        assert_eq!(s.quantity, 9.0);
        assert!(s.validate().is_ok());
    }

    #[test]
    fn chronotype_shift_moves_window_not_quantity() {
        let s = SleepSchedule::with_chronotype_shift(22.0, 6.0, 2.0, 0.8, 0.0);
        assert_eq!(s.quantity, 8.0);
        assert!(!s.is_asleep(22));
        assert!(s.is_asleep(0) && s.is_asleep(7));
        assert!(!s.is_asleep(8));
    }

    #[test]
    fn quality_out_of_range_is_rejected() {
        let s = SleepSchedule::from_window(22.0, 6.0, 1.5, 0.0);
        assert!(matches!(s.validate(), Err(ValidationError::OutOfRange { .. })));
    }

    #[test]
    fn rest_days_suppress_work() {
        let w = WorkSchedule::from_window(9.0, 17.0, 1.0).with_rest_days(vec![1]);
        assert!(w.is_at_work(10));
        assert!(!w.is_at_work(24 + 10));
        assert!(w.is_at_work(48 + 10));
        assert!(w.is_at_work(7 * 24 + 10));
        assert_eq!(w.daily_hours, 8.0);
    }

    #[test]
    fn rest_day_index_must_be_weekday() {
        let w = WorkSchedule::from_window(9.0, 17.0, 1.0).with_rest_days(vec![7]);
        assert!(w.validate().is_err());
    }
}
