use crate::device_buttons::interface::DeviceButtons;
use crate::device_camera::interface::DeviceCamera;
use crate::embedder::interface::Embedder;
use crate::lane_sensor::core::{Effect, Msg};
use crate::lane_sensor::main::LaneSensor;
use crate::library::logger::interface::Logger;
use crate::notifier::interface::Notifier;
use std::time::Instant;

impl LaneSensor {
    pub fn run_effect(&self, effect: Effect) {
        let _ = self
            .logger
            .info(&format!("Running effect: {}", effect.to_display_string()));

        match effect {
            Effect::SubscribeToCameraEvents => {
                let events = self.device_camera.events();
                loop {
                    match events.recv() {
                        Ok(event) => {
                            if self.msg_sender.send(Msg::CameraEvent(event)).is_err() {
                                break;
                            }
                        }
                        Err(_) => break,
                    }
                }
            }
            Effect::SubscribeToButtonEvents => {
                let events = self.device_buttons.events();
                loop {
                    match events.recv() {
                        Ok(event) => {
                            if self.msg_sender.send(Msg::ButtonEvent(event)).is_err() {
                                break;
                            }
                        }
                        Err(_) => break,
                    }
                }
            }
            Effect::SubscribeTick => loop {
                std::thread::sleep(self.config.tick_rate);
                if self.msg_sender.send(Msg::Tick(Instant::now())).is_err() {
                    break;
                }
            },
            Effect::LoadEmbedder => {
                let loaded = self.embedder.load();
                let _ = self.msg_sender.send(Msg::EmbedderLoadDone(loaded));
            }
            Effect::StartCamera => {
                let started = self.device_camera.start();
                let _ = self.msg_sender.send(Msg::CameraStartDone(started));
            }
            Effect::StopCamera => {
                let stopped = self.device_camera.stop();
                let _ = self.msg_sender.send(Msg::CameraStopDone(stopped));
            }
            Effect::CaptureFrame => {
                let frame = self.device_camera.capture_frame();
                let _ = self.msg_sender.send(Msg::FrameCaptureDone(frame));
            }
            Effect::EmbedFrame { frame, train_class } => {
                // The frame is dropped here, whatever the embedder returns.
                let result = self.embedder.embed(&frame);
                let at_secs = chrono::Utc::now().timestamp();
                let _ = self.msg_sender.send(Msg::FrameEmbedDone {
                    result,
                    train_class,
                    at_secs,
                });
            }
            Effect::DispatchEvents { events } => {
                // Fire-and-forget: no delivery result re-enters the state
                // machine, and nothing is retried.
                for event in &events {
                    if let Err(e) = self.notifier.notify(event) {
                        let _ = self.logger.error(&format!(
                            "Webhook delivery failed for {}: {}",
                            event.url, e
                        ));
                    }
                }
            }
        }
    }
}
