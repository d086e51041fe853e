use crate::device_camera::interface::Frame;

pub type Embedding = Vec<f32>;

/// Opaque feature-extraction network: maps a frame to a fixed-length vector.
/// The numerical design of the network is not this crate's concern; the
/// classifier only requires that similar frames embed close together.
pub trait Embedder: Send + Sync {
    /// Load the underlying model. Must complete successfully before the
    /// first `embed` call.
    fn load(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    fn embed(&self, frame: &Frame) -> Result<Embedding, Box<dyn std::error::Error + Send + Sync>>;

    /// Output dimensionality, fixed for the life of the model.
    fn dimension(&self) -> usize;
}
