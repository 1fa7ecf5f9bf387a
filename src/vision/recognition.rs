use super::{CaptureDevice, Classifier, Prediction, RecognitionOutcome};
use crate::error::VisionError;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// How often the loop grabs and classifies a frame. Stands in for one
/// classification per display refresh.
const TICK: Duration = Duration::from_millis(100);

/// A running capture-and-classify loop.
///
/// The spawned task owns the capture device and the classifier for its whole
/// lifetime and always releases the device on the way out, whether the loop
/// was stopped, confirmed, or ended by an error. Cancellation is structural:
/// [`RecognitionTask::stop`] signals shutdown and awaits the task, and
/// dropping the handle signals shutdown as well (the sender side of the
/// shutdown channel goes away).
pub struct RecognitionTask {
    shutdown: watch::Sender<bool>,
    latest: watch::Receiver<Option<Prediction>>,
    status: watch::Receiver<String>,
    handle: JoinHandle<()>,
}

impl RecognitionTask {
    /// Acquires the device and spawns the classify loop.
    ///
    /// Device acquisition failures surface here, before any task exists; the
    /// sub-flow simply does not start in that case.
    pub async fn start(
        mut classifier: Box<dyn Classifier>,
        mut device: Box<dyn CaptureDevice>,
    ) -> Result<Self, VisionError> {
        device.acquire().await?;

        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
        let (latest_tx, latest_rx) = watch::channel(None);
        let (status_tx, status_rx) = watch::channel("Camera started, recognizing...".to_string());

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(TICK);
            loop {
                tokio::select! {
                    _ = shutdown_rx.changed() => break,
                    _ = ticker.tick() => {
                        let frame = match device.frame().await {
                            Ok(frame) => frame,
                            Err(e) => {
                                warn!(error = %e, "frame capture failed, ending recognition");
                                let _ = status_tx.send(e.status_message());
                                break;
                            }
                        };
                        match classifier.classify(&frame).await {
                            Ok(predictions) => {
                                let top = predictions
                                    .into_iter()
                                    .max_by(|a, b| a.confidence.total_cmp(&b.confidence));
                                if let Some(top) = top {
                                    let _ = status_tx.send(format!(
                                        "Recognized: {} ({:.2}%)",
                                        top.label,
                                        top.confidence * 100.0
                                    ));
                                    let _ = latest_tx.send(Some(top));
                                }
                            }
                            Err(e) => {
                                warn!(error = %e, "classification failed, ending recognition");
                                let _ = status_tx.send(e.status_message());
                                break;
                            }
                        }
                    }
                }
            }
            device.release().await;
            debug!("capture device released");
        });

        Ok(Self {
            shutdown: shutdown_tx,
            latest: latest_rx,
            status: status_rx,
            handle,
        })
    }

    /// The most recent top-confidence prediction, if any frame has been
    /// classified yet.
    pub fn latest(&self) -> Option<Prediction> {
        self.latest.borrow().clone()
    }

    /// The user-visible status line.
    pub fn status(&self) -> String {
        self.status.borrow().clone()
    }

    /// Whether the loop has already ended on its own (device or classifier
    /// error).
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Signals the loop to stop and awaits task shutdown and device release.
    pub async fn stop(self) {
        let _ = self.shutdown.send(true);
        if let Err(e) = self.handle.await {
            warn!(error = %e, "recognition task ended abnormally");
        }
    }

    /// Stops the loop and converts the last prediction into a confirmed
    /// outcome. `None` if no frame was ever classified.
    pub async fn confirm(self) -> Option<RecognitionOutcome> {
        let outcome = self.latest().map(RecognitionOutcome::from);
        self.stop().await;
        outcome
    }
}

/// Owner of at most one capture-and-classify cycle.
///
/// Starting a new cycle first tears down any active one, awaiting its device
/// release before the new device is acquired. This is what keeps a restarted
/// recognition from polling an already-released device.
///
/// This owner is deliberately decoupled from
/// [`Session`](crate::session::Session): `Session::reset`
/// knows nothing about capture hardware. An embedder that restarts a round
/// must call [`stop`](Self::stop) (or [`confirm`](Self::confirm)) alongside
/// the reset, so the device is released before the next round begins.
#[derive(Default)]
pub struct RecognitionSession {
    active: Option<RecognitionTask>,
}

impl RecognitionSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tears down any running loop, then acquires `device` and starts a new
    /// one.
    pub async fn start(
        &mut self,
        classifier: Box<dyn Classifier>,
        device: Box<dyn CaptureDevice>,
    ) -> Result<(), VisionError> {
        if let Some(task) = self.active.take() {
            task.stop().await;
        }
        let task = RecognitionTask::start(classifier, device).await?;
        self.active = Some(task);
        Ok(())
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// The most recent prediction of the running loop.
    pub fn latest(&self) -> Option<Prediction> {
        self.active.as_ref().and_then(RecognitionTask::latest)
    }

    /// The user-visible status line of the running loop.
    pub fn status(&self) -> Option<String> {
        self.active.as_ref().map(RecognitionTask::status)
    }

    /// Whether the active loop ended on its own (device or classifier
    /// error).
    pub fn is_finished(&self) -> bool {
        self.active.as_ref().is_some_and(RecognitionTask::is_finished)
    }

    /// Confirms the recognized drink: stops the loop and yields the latest
    /// prediction, if any.
    pub async fn confirm(&mut self) -> Result<Option<RecognitionOutcome>, VisionError> {
        match self.active.take() {
            Some(task) => Ok(task.confirm().await),
            None => Err(VisionError::NotRunning),
        }
    }

    /// Stops any running loop, awaiting device release.
    pub async fn stop(&mut self) {
        if let Some(task) = self.active.take() {
            task.stop().await;
        }
    }
}
