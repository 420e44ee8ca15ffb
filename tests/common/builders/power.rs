use drain_metrics::power::{PowerKey, PowerProfile};

/// Builds power profiles, starting from a complete set of coefficients
pub struct TestProfileBuilder {
    values: Vec<(String, f64)>,
}

impl TestProfileBuilder {
    pub fn new() -> Self {
        Self {
            values: vec![
                (PowerKey::CpuIdle.to_string(), 3.0),
                (PowerKey::CpuActive.to_string(), 60.0),
                (PowerKey::WifiControllerRx.to_string(), 80.0),
                (PowerKey::WifiControllerTx.to_string(), 120.0),
                (PowerKey::RadioActive.to_string(), 200.0),
                (PowerKey::BatteryCapacity.to_string(), 3000.0),
            ],
        }
    }

    pub fn value(mut self, key: PowerKey, value: f64) -> Self {
        self.values.retain(|(name, _)| name != key.as_str());
        self.values.push((key.to_string(), value));
        self
    }

    pub fn without(mut self, key: PowerKey) -> Self {
        self.values.retain(|(name, _)| name != key.as_str());
        self
    }

    pub fn build(self) -> PowerProfile {
        PowerProfile::from_pairs(self.values).expect("test profile values are valid")
    }

    pub fn to_json(&self) -> String {
        let map: serde_json::Map<String, serde_json::Value> = self
            .values
            .iter()
            .map(|(key, value)| (key.clone(), serde_json::json!(value)))
            .collect();
        serde_json::Value::Object(map).to_string()
    }
}

impl Default for TestProfileBuilder {
    fn default() -> Self {
        Self::new()
    }
}
