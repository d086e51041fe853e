use serde_json::{Map, Value};
use std::time::Duration;

/// Per-class settings. Position in `Config::classes` is the class index.
#[derive(Debug, Clone)]
pub struct ClassConfig {
    pub label: String,
    pub confidence_threshold: f32,
    /// Empty means: never notify for this class.
    pub webhook_url: String,
    pub extra_payload: Map<String, Value>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub tick_rate: Duration,
    pub topk: usize,
    /// How long sent-notification buckets are kept before being swept.
    pub dedup_retention: Duration,
    pub classes: Vec<ClassConfig>,
    pub sensor_id: String,
    pub direction: String,
    pub logger_timezone: chrono::FixedOffset,
}

impl Config {
    pub fn num_classes(&self) -> usize {
        self.classes.len()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tick_rate: Duration::from_millis(200),
            topk: 10,
            dedup_retention: Duration::from_secs(60),
            logger_timezone: mountain_standard_time(),
            sensor_id: "sensor-0".to_string(),
            direction: "northbound".to_string(),
            classes: vec![
                ClassConfig {
                    label: "car".to_string(),
                    confidence_threshold: 0.6,
                    webhook_url: String::new(),
                    extra_payload: Map::new(),
                },
                ClassConfig {
                    label: "truck".to_string(),
                    confidence_threshold: 0.6,
                    webhook_url: String::new(),
                    extra_payload: Map::new(),
                },
                ClassConfig {
                    label: "background".to_string(),
                    confidence_threshold: 1.0,
                    webhook_url: String::new(),
                    extra_payload: Map::new(),
                },
            ],
        }
    }
}

fn mountain_standard_time() -> chrono::FixedOffset {
    chrono::FixedOffset::west_opt(7 * 3600).unwrap()
}
