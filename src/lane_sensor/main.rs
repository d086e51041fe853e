use crate::config::Config;
use crate::device_buttons::interface::DeviceButtons;
use crate::device_camera::interface::DeviceCamera;
use crate::device_display::interface::DeviceDisplay;
use crate::embedder::interface::Embedder;
use crate::lane_sensor::core::{init, transition, Effect, Msg};
use crate::library::logger::interface::Logger;
use crate::notifier::interface::Notifier;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub struct LaneSensor {
    pub config: Config,
    pub logger: Arc<dyn Logger + Send + Sync>,
    pub device_camera: Arc<dyn DeviceCamera + Send + Sync>,
    pub device_buttons: Arc<dyn DeviceButtons + Send + Sync>,
    pub device_display: Arc<Mutex<dyn DeviceDisplay + Send + Sync>>,
    pub embedder: Arc<dyn Embedder + Send + Sync>,
    pub notifier: Arc<dyn Notifier + Send + Sync>,
    pub msg_sender: Sender<Msg>,
    pub msg_receiver: Arc<Mutex<Receiver<Msg>>>,
}

impl LaneSensor {
    pub fn new(
        config: Config,
        logger: Arc<dyn Logger + Send + Sync>,
        device_camera: Arc<dyn DeviceCamera + Send + Sync>,
        device_buttons: Arc<dyn DeviceButtons + Send + Sync>,
        device_display: Arc<Mutex<dyn DeviceDisplay + Send + Sync>>,
        embedder: Arc<dyn Embedder + Send + Sync>,
        notifier: Arc<dyn Notifier + Send + Sync>,
    ) -> Self {
        let (msg_sender, msg_receiver) = channel();

        Self {
            config,
            logger,
            device_camera,
            device_buttons,
            device_display,
            embedder,
            notifier,
            msg_sender,
            msg_receiver: Arc::new(Mutex::new(msg_receiver)),
        }
    }

    /// Resume ticking after a `stop()`. Stored examples are untouched.
    #[allow(dead_code)]
    pub fn start(&self) {
        let _ = self.msg_sender.send(Msg::StartRequested);
    }

    /// Halt frame capture. Safe to call at any point; an in-flight
    /// classification completes but schedules nothing further.
    #[allow(dead_code)]
    pub fn stop(&self) {
        let _ = self.msg_sender.send(Msg::StopRequested);
    }

    fn spawn_effects(&self, effects: Vec<Effect>) {
        for effect in effects {
            let self_clone = self.clone();
            std::thread::spawn(move || self_clone.run_effect(effect));
        }
    }

    pub fn run(&self) -> Result<(), Arc<dyn std::error::Error + Send + Sync>> {
        let (mut current_model, effects) = init(&self.config);

        self.spawn_effects(effects);

        loop {
            match self.msg_receiver.lock().unwrap().recv() {
                Ok(msg) => {
                    let _ = self
                        .logger
                        .info(&format!("Processing msg: {}", msg.to_display_string()));

                    let (new_model, effects) = transition(&self.config, current_model, msg);
                    current_model = new_model;

                    if !effects.is_empty() {
                        let _ = self.logger.info(&format!(
                            "Effects: [{}]",
                            effects
                                .iter()
                                .map(|e| e.to_display_string())
                                .collect::<Vec<_>>()
                                .join(", ")
                        ));
                    }

                    if let Err(e) = self.render(&current_model) {
                        let _ = self.logger.error(&format!("Render failed: {}", e));
                    }

                    self.spawn_effects(effects);
                }
                Err(e) => {
                    return Err(Arc::new(e));
                }
            }
        }
    }
}
