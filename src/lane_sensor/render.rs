use crate::device_display::interface::DeviceDisplay;
use crate::lane_sensor::core::{CameraState, EmbedderState, Model, Phase};
use crate::lane_sensor::main::LaneSensor;
use std::time::Duration;

impl LaneSensor {
    pub fn render(&self, model: &Model) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let mut device_display = self.device_display.lock().unwrap();

        device_display.clear()?;

        match &model.phase {
            Phase::Faulted { message } => {
                device_display.write_line(0, &format!("Error: {}", message))?;
            }
            Phase::DevicesInitializing { device_states } => {
                match device_states.camera {
                    CameraState::Disconnected => {
                        device_display.write_line(0, "Camera connecting...")?;
                    }
                    CameraState::Connected(time) => {
                        if time.elapsed() > Duration::from_secs(2) {
                            device_display.write_line(0, "Camera connected")?;
                        } else {
                            device_display.write_line(0, "Camera connecting...")?;
                        }
                    }
                    CameraState::Started => {
                        device_display.write_line(0, "Camera connected")?;
                    }
                }

                match device_states.embedder {
                    EmbedderState::Loading => {
                        device_display.write_line(1, "Model loading...")?;
                    }
                    EmbedderState::Ready => {
                        device_display.write_line(1, "Model ready")?;
                    }
                }
            }
            Phase::Stopped => {
                device_display.write_line(0, "Stopped")?;
            }
            Phase::Running => {
                match model.active_class {
                    Some(class_index) => {
                        let label = self
                            .config
                            .classes
                            .get(class_index)
                            .map(|c| c.label.as_str())
                            .unwrap_or("?");
                        device_display.write_line(0, &format!("Training '{}'", label))?;
                    }
                    None => {
                        device_display.write_line(0, "Watching")?;
                    }
                }

                for (class_index, class) in self.config.classes.iter().enumerate() {
                    let count = model
                        .store
                        .counts()
                        .get(class_index)
                        .copied()
                        .unwrap_or(0);

                    let text = if count == 0 {
                        format!("{}: no examples added, hold to train", class.label)
                    } else {
                        let percent = model
                            .last_confidences
                            .as_ref()
                            .and_then(|confidences| confidences.get(class_index))
                            .map(|confidence| confidence * 100.0)
                            .unwrap_or(0.0);
                        format!(
                            "{}: {} examples - {:.0}%",
                            class.label, count, percent
                        )
                    };

                    device_display.write_line((class_index + 1) as u8, &text)?;
                }
            }
        }

        Ok(())
    }
}
