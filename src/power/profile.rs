use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{PowerKey, PowerModel};
use crate::error::{Error, Result};

/// Static power profile table
///
/// Values are average current draws in mA, except `battery.capacity` in mAh.
/// Keys the estimator does not use are kept as-is and ignored, so a full device
/// profile dump can be loaded without editing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PowerProfile {
    values: HashMap<String, f64>,
}

impl PowerProfile {
    /// Builds a profile from `(key, value)` pairs
    pub fn from_pairs<I, K>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, f64)>,
        K: Into<String>,
    {
        let profile = Self { values: pairs.into_iter().map(|(k, v)| (k.into(), v)).collect() };
        profile.validate()?;
        Ok(profile)
    }

    /// Parses a JSON object such as `{ "cpu.idle": 3.0, "radio.active": 200.0 }`
    pub fn from_json_str(json: &str) -> Result<Self> {
        let profile: PowerProfile = serde_json::from_str(json)?;
        profile.validate()?;
        Ok(profile)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn get(&self, key: &str) -> Option<f64> {
        self.values.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn validate(&self) -> Result<()> {
        self.values.iter().try_for_each(|(key, &value)| check_value(key, value))
    }
}

fn check_value(key: &str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(Error::invalid_data(format!(
            "power profile value for '{}' must be a non-negative number, got {}",
            key, value
        )))
    }
}

impl PowerModel for PowerProfile {
    fn lookup(&self, key: PowerKey) -> Result<f64> {
        self.get(key.as_str()).ok_or_else(|| Error::power_model_unavailable(key.as_str()))
    }
}
