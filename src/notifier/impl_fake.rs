use crate::dispatch::OutboundEvent;
use crate::library::logger::interface::Logger;
use crate::notifier::interface::Notifier;
use std::sync::{Arc, Mutex};

/// Records notified events so tests can assert on what would have been
/// posted.
pub struct NotifierFake {
    notified: Mutex<Vec<OutboundEvent>>,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl NotifierFake {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            notified: Mutex::new(Vec::new()),
            logger: logger.with_namespace("notifier").with_namespace("fake"),
        }
    }

    #[allow(dead_code)]
    pub fn notified(&self) -> Vec<OutboundEvent> {
        self.notified.lock().unwrap().clone()
    }
}

impl Notifier for NotifierFake {
    fn notify(
        &self,
        event: &OutboundEvent,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.logger
            .info(&format!("NotifierFake::notify({})", event.url))?;
        self.notified.lock().unwrap().push(event.clone());
        Ok(())
    }
}
