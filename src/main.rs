use config::Config;
use device_buttons::impl_fake::DeviceButtonsFake;
use device_camera::impl_fake::DeviceCameraFake;
use device_display::impl_console::DeviceDisplayConsole;
use embedder::impl_fake::EmbedderFake;
use embedder::interface::Embedder;
use lane_sensor::main::LaneSensor;
use library::logger::impl_console::LoggerConsole;
use library::logger::interface::Logger;
use notifier::impl_http::NotifierHttp;
use std::sync::{Arc, Mutex};

mod config;
mod device_buttons;
mod device_camera;
mod device_display;
mod dispatch;
mod embedder;
mod knn;
mod lane_sensor;
mod library;
mod notifier;

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let mut config = Config::default();

    // Sensor identity comes from the deployment, not the build.
    let mut args = std::env::args().skip(1);
    if let Some(sensor_id) = args.next() {
        config.sensor_id = sensor_id;
    }
    if let Some(direction) = args.next() {
        config.direction = direction;
    }

    let logger: Arc<dyn Logger + Send + Sync> =
        Arc::new(LoggerConsole::new(config.logger_timezone));

    let device_camera = Arc::new(DeviceCameraFake::new(logger.clone()));

    let device_buttons = Arc::new(DeviceButtonsFake::new(config.num_classes(), logger.clone()));

    let device_display = Arc::new(Mutex::new(DeviceDisplayConsole::new(
        (config.num_classes() + 1) as u8,
    )));

    let embedder = Arc::new(EmbedderFake::new(logger.clone()));

    let notifier = Arc::new(NotifierHttp::new(logger.clone())?);

    logger.info(&format!(
        "Starting lane sensor '{}' ({}), embedding dimension {}",
        config.sensor_id,
        config.direction,
        embedder.dimension()
    ))?;

    let lane_sensor = LaneSensor::new(
        config,
        logger,
        device_camera,
        device_buttons,
        device_display,
        embedder,
        notifier,
    );

    lane_sensor.run().map_err(|e| e.to_string())?;

    Ok(())
}
