//! Behavioral inputs and the engineered features derived from them.

use serde::{Deserialize, Serialize};

use crate::error::{Result, RiskModelError};

/// Names of the model inputs, in the order of [`RiskFeatures::to_vector`].
pub const FEATURE_NAMES: [&str; 7] = [
    "Daily_Usage_Hours",
    "Sleep_Hours",
    "Phone_Checks_Per_Day",
    "Apps_Used_Daily",
    "Time_on_Social_Media",
    "Usage_to_Sleep_Ratio",
    "Checks_per_App",
];

/// Number of model inputs.
pub const N_FEATURES: usize = FEATURE_NAMES.len();

/// One teen's phone-usage profile.
///
/// Construct with [`RiskFeatures::new`], which rejects values that would make
/// the engineered ratios undefined.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskFeatures {
    pub daily_usage_hours: f64,
    pub sleep_hours: f64,
    pub phone_checks_per_day: f64,
    pub apps_used_daily: f64,
    pub social_media_hours: f64,
}

impl RiskFeatures {
    /// Validate and build a feature set.
    ///
    /// # Errors
    ///
    /// Returns [`RiskModelError::InvalidInput`] if any value is negative or
    /// non-finite, or if `sleep_hours` or `apps_used_daily` is zero.
    pub fn new(
        daily_usage_hours: f64,
        sleep_hours: f64,
        phone_checks_per_day: f64,
        apps_used_daily: f64,
        social_media_hours: f64,
    ) -> Result<Self> {
        let features = Self {
            daily_usage_hours,
            sleep_hours,
            phone_checks_per_day,
            apps_used_daily,
            social_media_hours,
        };
        features.validate()?;
        Ok(features)
    }

    /// Check the invariants enforced by [`RiskFeatures::new`].
    ///
    /// Useful for values built through struct literals or deserialization.
    pub fn validate(&self) -> Result<()> {
        let named = [
            ("daily_usage_hours", self.daily_usage_hours),
            ("sleep_hours", self.sleep_hours),
            ("phone_checks_per_day", self.phone_checks_per_day),
            ("apps_used_daily", self.apps_used_daily),
            ("social_media_hours", self.social_media_hours),
        ];
        for (name, value) in named {
            if !value.is_finite() {
                return Err(RiskModelError::InvalidInput(format!(
                    "{} must be a finite number, got {}",
                    name, value
                )));
            }
            if value < 0.0 {
                return Err(RiskModelError::InvalidInput(format!(
                    "{} cannot be negative, got {}",
                    name, value
                )));
            }
        }

        if self.sleep_hours <= 0.0 {
            return Err(RiskModelError::InvalidInput(
                "sleep_hours must be greater than zero".to_string(),
            ));
        }
        if self.apps_used_daily <= 0.0 {
            return Err(RiskModelError::InvalidInput(
                "apps_used_daily must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Daily usage divided by sleep hours.
    pub fn usage_to_sleep_ratio(&self) -> f64 {
        self.daily_usage_hours / self.sleep_hours
    }

    /// Phone checks per day divided by apps used.
    pub fn checks_per_app(&self) -> f64 {
        self.phone_checks_per_day / self.apps_used_daily
    }

    /// The five raw inputs followed by the two engineered ratios.
    pub fn to_vector(&self) -> [f64; N_FEATURES] {
        [
            self.daily_usage_hours,
            self.sleep_hours,
            self.phone_checks_per_day,
            self.apps_used_daily,
            self.social_media_hours,
            self.usage_to_sleep_ratio(),
            self.checks_per_app(),
        ]
    }
}
