use crate::dispatch::OutboundEvent;
use crate::library::logger::interface::Logger;
use crate::notifier::interface::Notifier;
use std::sync::Arc;
use std::time::Duration;

pub struct NotifierHttp {
    client: reqwest::blocking::Client,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl NotifierHttp {
    pub fn new(
        logger: Arc<dyn Logger + Send + Sync>,
    ) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(5))
            .build()?;

        Ok(Self {
            client,
            logger: logger.with_namespace("notifier").with_namespace("http"),
        })
    }
}

impl Notifier for NotifierHttp {
    fn notify(
        &self,
        event: &OutboundEvent,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.logger.info(&format!("POST {}", event.url))?;
        // The response body is of no interest; only transport errors surface.
        self.client.post(&event.url).json(&event.payload).send()?;
        Ok(())
    }
}
