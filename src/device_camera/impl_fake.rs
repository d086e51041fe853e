use crate::device_camera::interface::{DeviceCamera, DeviceCameraEvent, Frame};
use crate::library::logger::interface::Logger;
use rand::Rng;
use std::sync::Arc;

// Matches the fixed input size of the embedding network.
const FRAME_WIDTH: usize = 227;
const FRAME_HEIGHT: usize = 227;
const FRAME_CHANNELS: usize = 3;

pub struct DeviceCameraFake {
    logger: Arc<dyn Logger + Send + Sync>,
}

impl DeviceCameraFake {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            logger: logger.with_namespace("camera").with_namespace("fake"),
        }
    }
}

impl DeviceCamera for DeviceCameraFake {
    fn start(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.logger.info("Starting camera...")?;
        std::thread::sleep(std::time::Duration::from_millis(500));
        self.logger.info("Camera started")?;
        Ok(())
    }

    fn stop(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.logger.info("Stopping camera...")?;
        self.logger.info("Camera stopped")?;
        Ok(())
    }

    fn capture_frame(&self) -> Result<Frame, Box<dyn std::error::Error + Send + Sync>> {
        let mut rng = rand::rng();
        let pixels = (0..FRAME_WIDTH * FRAME_HEIGHT * FRAME_CHANNELS)
            .map(|_| rng.random::<u8>())
            .collect();
        Ok(Frame(pixels))
    }

    fn events(&self) -> std::sync::mpsc::Receiver<DeviceCameraEvent> {
        let (tx, rx) = std::sync::mpsc::channel();

        std::thread::spawn(move || {
            tx.send(DeviceCameraEvent::Connected).unwrap();

            loop {
                std::thread::sleep(std::time::Duration::from_secs(300));

                // 1% chance of disconnecting
                if rand::random::<f32>() < 0.01 {
                    tx.send(DeviceCameraEvent::Disconnected).unwrap();
                    std::thread::sleep(std::time::Duration::from_secs(5));
                    tx.send(DeviceCameraEvent::Connected).unwrap();
                }
            }
        });

        rx
    }
}
