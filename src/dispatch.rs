use crate::config::{ClassConfig, Config};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::time::Duration;

/// A webhook notification ready to be posted. Built once, dispatched
/// fire-and-forget, never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct OutboundEvent {
    pub class_index: usize,
    pub url: String,
    pub payload: Map<String, Value>,
}

/// Decides, once per classified frame, which classes get notified.
///
/// De-duplication is keyed by (class, wall-clock second): while a vehicle
/// sits in frame the confidence stays above threshold for many consecutive
/// ticks, and only the first tick in each second may notify. Buckets older
/// than the retention window are swept on every evaluation so the map stays
/// bounded.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    retention_secs: i64,
    sent: BTreeMap<i64, Vec<usize>>,
}

impl Dispatcher {
    pub fn new(retention: Duration) -> Self {
        Self {
            retention_secs: retention.as_secs().max(1) as i64,
            sent: BTreeMap::new(),
        }
    }

    pub fn evaluate(
        &mut self,
        config: &Config,
        confidences: &[f32],
        counts: &[usize],
        now_secs: i64,
    ) -> Vec<OutboundEvent> {
        self.sweep(now_secs);

        let mut events = Vec::new();
        for (class_index, class) in config.classes.iter().enumerate() {
            // Never-trained classes carry no information to report.
            if counts.get(class_index).copied().unwrap_or(0) == 0 {
                continue;
            }
            if self.already_sent(now_secs, class_index) {
                continue;
            }

            let confidence = confidences.get(class_index).copied().unwrap_or(0.0);
            if confidence >= class.confidence_threshold && !class.webhook_url.is_empty() {
                self.mark_sent(now_secs, class_index);
                events.push(OutboundEvent {
                    class_index,
                    url: class.webhook_url.clone(),
                    payload: build_payload(class, config, now_secs),
                });
            }
        }

        events
    }

    #[allow(dead_code)]
    pub fn tracked_buckets(&self) -> usize {
        self.sent.len()
    }

    fn sweep(&mut self, now_secs: i64) {
        self.sent = self.sent.split_off(&(now_secs - self.retention_secs));
    }

    fn already_sent(&self, now_secs: i64, class_index: usize) -> bool {
        self.sent
            .get(&now_secs)
            .map(|classes| classes.contains(&class_index))
            .unwrap_or(false)
    }

    fn mark_sent(&mut self, now_secs: i64, class_index: usize) {
        self.sent.entry(now_secs).or_default().push(class_index);
    }
}

/// The configured extra payload plus the sensor envelope. The envelope keys
/// win when a configured key collides.
fn build_payload(class: &ClassConfig, config: &Config, now_secs: i64) -> Map<String, Value> {
    let mut payload = class.extra_payload.clone();
    payload.insert("timestamp".to_string(), Value::from(now_secs));
    payload.insert("sensor_id".to_string(), Value::from(config.sensor_id.clone()));
    payload.insert("direction".to_string(), Value::from(config.direction.clone()));
    payload
}
