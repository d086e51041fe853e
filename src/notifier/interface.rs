use crate::dispatch::OutboundEvent;

/// Outbound notification transport. Callers treat delivery as
/// fire-and-forget: failures are logged at the call site and never retried.
pub trait Notifier: Send + Sync {
    fn notify(&self, event: &OutboundEvent)
        -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}
