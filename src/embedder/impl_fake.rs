use crate::device_camera::interface::Frame;
use crate::embedder::interface::{Embedder, Embedding};
use crate::library::logger::interface::Logger;
use rand::distr::{Distribution, Uniform};
use std::sync::Arc;

const DIMENSION: usize = 64;

/// Stands in for the real embedding network. Components are derived from
/// chunk means of the frame bytes plus a little noise, so similar frames
/// land near each other without any actual model.
pub struct EmbedderFake {
    logger: Arc<dyn Logger + Send + Sync>,
}

impl EmbedderFake {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            logger: logger.with_namespace("embedder").with_namespace("fake"),
        }
    }
}

impl Embedder for EmbedderFake {
    fn load(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.logger.info("Loading embedding model...")?;
        std::thread::sleep(std::time::Duration::from_millis(500));
        self.logger.info("Embedding model loaded")?;
        Ok(())
    }

    fn embed(&self, frame: &Frame) -> Result<Embedding, Box<dyn std::error::Error + Send + Sync>> {
        let bytes = &frame.0;
        if bytes.is_empty() {
            return Err("cannot embed an empty frame".into());
        }

        let chunk_size = (bytes.len() / DIMENSION).max(1);
        let mut rng = rand::rng();
        let noise = Uniform::new(-0.05f32, 0.05f32)?;

        let embedding = (0..DIMENSION)
            .map(|i| {
                let start = (i * chunk_size).min(bytes.len() - 1);
                let end = ((i + 1) * chunk_size).min(bytes.len());
                let sum: u64 = bytes[start..end].iter().map(|&b| b as u64).sum();
                let mean = sum as f32 / (end - start).max(1) as f32;
                mean / 255.0 + noise.sample(&mut rng)
            })
            .collect();

        Ok(embedding)
    }

    fn dimension(&self) -> usize {
        DIMENSION
    }
}
