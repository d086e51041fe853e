use crate::library::logger::interface::Logger;
use chrono::Utc;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct LoggerConsole {
    namespace: Option<String>,
    timezone: chrono::FixedOffset,
}

impl LoggerConsole {
    pub fn new(timezone: chrono::FixedOffset) -> Self {
        Self {
            namespace: None,
            timezone,
        }
    }

    fn format_timestamp(&self) -> String {
        let utc_now = Utc::now();
        let local_time = utc_now.with_timezone(&self.timezone);
        local_time.format("%Y-%m-%d %I:%M:%S%.3f %p").to_string()
    }
}

impl Logger for LoggerConsole {
    fn info(&self, message: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        match &self.namespace {
            Some(namespace) => println!("[{}] {}: {}", self.format_timestamp(), namespace, message),
            None => println!("[{}] {}", self.format_timestamp(), message),
        };
        Ok(())
    }

    fn error(&self, message: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        match &self.namespace {
            Some(namespace) => eprintln!(
                "[{} ERROR] {}: {}",
                self.format_timestamp(),
                namespace,
                message
            ),
            None => eprintln!("[{} ERROR] {}", self.format_timestamp(), message),
        };
        Ok(())
    }

    fn with_namespace(&self, namespace: &str) -> Arc<dyn Logger + Send + Sync> {
        let new_namespace = match &self.namespace {
            Some(current) => format!("{}:{}", current, namespace),
            None => namespace.to_string(),
        };

        Arc::new(LoggerConsole {
            namespace: Some(new_namespace),
            timezone: self.timezone,
        })
    }
}
