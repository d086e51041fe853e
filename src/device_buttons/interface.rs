/// Momentary per-class train buttons. Holding a button marks every frame
/// captured in the meantime as a training example for that class.
#[derive(Debug, Clone, PartialEq)]
pub enum DeviceButtonsEvent {
    Pressed(usize),
    Released,
}

pub trait DeviceButtons: Send + Sync {
    fn events(&self) -> std::sync::mpsc::Receiver<DeviceButtonsEvent>;
}
