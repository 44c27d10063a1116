//! Feature engineering: calendar encoding, day/night usage counts,
//! interaction terms, and demographic flags.

mod encoder;

pub use encoder::{EncodedFeatures, FeatureEncoder};

use crate::error::{PredictorError, Result};

/// Hours of the midnight bucket starting at 0:00 (0:00-4:59).
pub const NIGHTTIME_HOUR_0: usize = 5;
/// Hours of the midnight bucket ending at 23:59 (22:00-23:59).
pub const NIGHTTIME_HOUR_1: usize = 2;

/// Raw engineered width: behavioral(7) + calendar(2) + usage(16) + interactions(32).
pub const RAW_FEATURE_LEN: usize = 57;
/// Width of the logistic ensemble's input.
pub const LOGISTIC_FEATURE_LEN: usize = 4;

/// Feature-selection mask projecting the scaled 57-vector down to the
/// subset the tree ensemble was trained on:
/// age, edu_0, edu_1, day_cos, day_sin, AirConditioner_daytime,
/// AirConditioner_midnight, ClothesWasher_daytime, ClothesWasher_midnight,
/// Microwave_daytime, RiceCooker_midnight, TV_daytime, IH_daytime,
/// day_sin * AirConditioner_daytime, day_sin * Microwave_daytime.
pub const SANITIZER: [bool; RAW_FEATURE_LEN] = [
    true, false, false, true, true, false, false, true, true, true, true, true, true, true,
    false, false, true, true, false, false, false, true, false, false, false, false, false,
    false, false, false, false, false, false, false, false, false, false, false, false, false,
    false, true, false, false, false, true, false, false, false, false, false, false, false,
    false, false, false, false,
];

/// Number of `true` entries in [`SANITIZER`]; the tree ensemble's input width.
pub const SELECTED_FEATURE_LEN: usize = 15;

/// Demographic covariates after domain validation. `sex` uses the survey
/// coding: 1 = male, 2 = female.
#[derive(Debug, Clone, Copy)]
pub struct Demographics {
    pub age: i64,
    pub sex: i64,
    pub edu: i64,
    pub solo: i64,
}

impl Demographics {
    /// Validate the raw queue tuple. The male/solo flags must be 0 or 1;
    /// any violation short-circuits before the series is touched.
    pub fn from_raw(age: i64, male: i64, edu: i64, solo: i64) -> Result<Self> {
        if !(male == 0 || male == 1) {
            return Err(PredictorError::BehavioralFormat(format!(
                "invalid argument male: {male}, expected 1 or 0"
            )));
        }
        if !(solo == 0 || solo == 1) {
            return Err(PredictorError::BehavioralFormat(format!(
                "invalid argument solo: {solo}, expected 1 or 0"
            )));
        }
        let sex = if male == 1 { 1 } else { 2 };
        Ok(Self { age, sex, edu, solo })
    }

    /// `[age, is_male, is_female, edu>9, edu<=9, lives_with_others, lives_alone]`.
    /// Each boolean pair is mutually exclusive and jointly exhaustive.
    pub fn behavioral_flags(&self) -> [f64; 7] {
        [
            self.age as f64,
            (self.sex == 1) as u8 as f64,
            (self.sex == 2) as u8 as f64,
            (self.edu > 9) as u8 as f64,
            (self.edu <= 9) as u8 as f64,
            (self.solo == 0) as u8 as f64,
            (self.solo == 1) as u8 as f64,
        ]
    }

    /// Input vector for the logistic ensemble.
    pub fn logistic_vector(&self) -> [f64; LOGISTIC_FEATURE_LEN] {
        [
            self.age as f64,
            self.sex as f64,
            (self.edu > 9) as u8 as f64,
            self.solo as f64,
        ]
    }
}
