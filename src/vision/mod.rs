//! Contract for the external image-classification collaborator.
//!
//! The engine never talks to real capture hardware or a real model; it
//! consumes these traits. Callers (and tests) provide implementations. The
//! core only ever uses the top-confidence label and its confidence value.

use crate::error::VisionError;
use async_trait::async_trait;

pub mod recognition;

pub use recognition::{RecognitionSession, RecognitionTask};

/// A single captured image, opaque to the engine.
#[derive(Debug, Clone, Default)]
pub struct Frame(pub Vec<u8>);

/// One labelled guess from the classifier.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub label: String,
    /// Confidence in `0.0..=1.0`.
    pub confidence: f64,
}

/// The confirmed label-and-confidence result attached to a served session.
#[derive(Debug, Clone, PartialEq)]
pub struct RecognitionOutcome {
    pub label: String,
    /// Confidence in `0.0..=1.0`.
    pub confidence: f64,
}

impl RecognitionOutcome {
    /// Confidence as a fixed two-decimal percentage string, e.g. `"97.25"`.
    pub fn confidence_percent(&self) -> String {
        format!("{:.2}", self.confidence * 100.0)
    }
}

impl From<Prediction> for RecognitionOutcome {
    fn from(prediction: Prediction) -> Self {
        Self {
            label: prediction.label,
            confidence: prediction.confidence,
        }
    }
}

/// Loads classifier assets from a location (directory, URL, ...).
#[async_trait]
pub trait ModelLoader: Send + Sync {
    /// Fails with [`VisionError::ModelLoad`] on missing or invalid assets.
    async fn load(&self, location: &str) -> Result<Box<dyn Classifier>, VisionError>;
}

/// A loaded classification model.
#[async_trait]
pub trait Classifier: Send {
    /// Classifies one frame into labelled confidences. Ordering is not
    /// assumed; consumers pick the top-confidence entry themselves.
    async fn classify(&mut self, frame: &Frame) -> Result<Vec<Prediction>, VisionError>;
}

/// A capture device handle with an acquire/frame/release lifecycle.
#[async_trait]
pub trait CaptureDevice: Send {
    /// Acquires the device. Permission or availability failures surface as
    /// [`VisionError::Device`].
    async fn acquire(&mut self) -> Result<(), VisionError>;

    /// Captures the next frame.
    async fn frame(&mut self) -> Result<Frame, VisionError>;

    /// Releases the device. Must be called exactly once after a successful
    /// acquire; the recognition loop guarantees this.
    async fn release(&mut self);
}
