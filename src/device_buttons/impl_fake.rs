use crate::device_buttons::interface::{DeviceButtons, DeviceButtonsEvent};
use crate::library::logger::interface::Logger;
use std::sync::Arc;

pub struct DeviceButtonsFake {
    num_classes: usize,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl DeviceButtonsFake {
    pub fn new(num_classes: usize, logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            num_classes,
            logger: logger.with_namespace("buttons").with_namespace("fake"),
        }
    }
}

impl DeviceButtons for DeviceButtonsFake {
    fn events(&self) -> std::sync::mpsc::Receiver<DeviceButtonsEvent> {
        let (tx, rx) = std::sync::mpsc::channel();
        let num_classes = self.num_classes;
        let logger = self.logger.clone();

        std::thread::spawn(move || {
            // One scripted training pass: hold each button for a couple of
            // seconds so several frames land in its class.
            for class_index in 0..num_classes {
                std::thread::sleep(std::time::Duration::from_secs(3));
                let _ = logger.info(&format!("Pressing train button {}", class_index));
                tx.send(DeviceButtonsEvent::Pressed(class_index)).unwrap();

                std::thread::sleep(std::time::Duration::from_secs(2));
                let _ = logger.info(&format!("Releasing train button {}", class_index));
                tx.send(DeviceButtonsEvent::Released).unwrap();
            }

            loop {
                std::thread::sleep(std::time::Duration::from_secs(60));

                // 5% chance of an operator retraining a random class
                if rand::random::<f32>() < 0.05 {
                    let class_index = rand::random_range(0..num_classes);
                    tx.send(DeviceButtonsEvent::Pressed(class_index)).unwrap();
                    std::thread::sleep(std::time::Duration::from_secs(2));
                    tx.send(DeviceButtonsEvent::Released).unwrap();
                }
            }
        });

        rx
    }
}
