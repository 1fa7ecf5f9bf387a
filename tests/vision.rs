//! Tests for the recognition loop lifecycle: latest-prediction publishing,
//! structural cancellation, and device release ordering.
use async_trait::async_trait;
use barkeep::prelude::*;
use std::result::Result;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

/// Classifier that always returns the same prediction list.
struct FixedClassifier {
    predictions: Vec<Prediction>,
}

#[async_trait]
impl Classifier for FixedClassifier {
    async fn classify(&mut self, _frame: &Frame) -> Result<Vec<Prediction>, VisionError> {
        Ok(self.predictions.clone())
    }
}

/// Classifier that fails on every frame.
struct BrokenClassifier;

#[async_trait]
impl Classifier for BrokenClassifier {
    async fn classify(&mut self, _frame: &Frame) -> Result<Vec<Prediction>, VisionError> {
        Err(VisionError::ModelLoad {
            location: "model/".to_string(),
            message: "corrupt weights".to_string(),
        })
    }
}

/// Capture device that records its lifecycle into a shared event log.
struct LoggedDevice {
    name: &'static str,
    log: Arc<Mutex<Vec<String>>>,
    fail_acquire: bool,
    fail_frame: bool,
}

impl LoggedDevice {
    fn new(name: &'static str, log: Arc<Mutex<Vec<String>>>) -> Self {
        Self {
            name,
            log,
            fail_acquire: false,
            fail_frame: false,
        }
    }

    fn push(&self, event: &str) {
        self.log.lock().unwrap().push(format!("{} {}", self.name, event));
    }
}

#[async_trait]
impl CaptureDevice for LoggedDevice {
    async fn acquire(&mut self) -> Result<(), VisionError> {
        if self.fail_acquire {
            return Err(VisionError::Device("permission denied".to_string()));
        }
        self.push("acquired");
        Ok(())
    }

    async fn frame(&mut self) -> Result<Frame, VisionError> {
        if self.fail_frame {
            return Err(VisionError::Device("device disconnected".to_string()));
        }
        Ok(Frame::default())
    }

    async fn release(&mut self) {
        self.push("released");
    }
}

fn mojito_guess() -> Vec<Prediction> {
    vec![
        Prediction {
            label: "Gin Fizz".to_string(),
            confidence: 0.08,
        },
        Prediction {
            label: "Mojito".to_string(),
            confidence: 0.91,
        },
    ]
}

#[tokio::test]
async fn test_loop_publishes_top_confidence_prediction() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let mut recognition = RecognitionSession::new();
    recognition
        .start(
            Box::new(FixedClassifier {
                predictions: mojito_guess(),
            }),
            Box::new(LoggedDevice::new("cam", log.clone())),
        )
        .await
        .unwrap();

    sleep(Duration::from_millis(50)).await;

    let latest = recognition.latest().expect("a prediction by now");
    assert_eq!(latest.label, "Mojito");
    assert_eq!(latest.confidence, 0.91);
    let status = recognition.status().unwrap();
    assert!(status.contains("Mojito"), "status was: {status}");
    assert!(status.contains("91.00"), "status was: {status}");

    recognition.stop().await;
    assert!(!recognition.is_active());
}

#[tokio::test]
async fn test_confirm_yields_outcome_and_releases_device() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let mut recognition = RecognitionSession::new();
    recognition
        .start(
            Box::new(FixedClassifier {
                predictions: mojito_guess(),
            }),
            Box::new(LoggedDevice::new("cam", log.clone())),
        )
        .await
        .unwrap();

    sleep(Duration::from_millis(50)).await;

    let outcome = recognition.confirm().await.unwrap().expect("outcome");
    assert_eq!(outcome.label, "Mojito");
    assert_eq!(outcome.confidence_percent(), "91.00");

    // Confirming awaited the task; the device is already released.
    let events = log.lock().unwrap().clone();
    assert_eq!(events, vec!["cam acquired", "cam released"]);
    assert!(!recognition.is_active());
}

#[tokio::test]
async fn test_confirm_without_running_loop_is_an_error() {
    let mut recognition = RecognitionSession::new();
    let err = recognition.confirm().await.unwrap_err();
    assert!(matches!(err, VisionError::NotRunning));
}

#[tokio::test]
async fn test_acquire_failure_surfaces_before_the_loop_starts() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let mut device = LoggedDevice::new("cam", log.clone());
    device.fail_acquire = true;

    let mut recognition = RecognitionSession::new();
    let err = recognition
        .start(
            Box::new(FixedClassifier {
                predictions: mojito_guess(),
            }),
            Box::new(device),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, VisionError::Device(_)));
    assert!(err.status_message().contains("camera"));
    assert!(!recognition.is_active());
    assert!(log.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_frame_error_ends_loop_and_releases_device() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let mut device = LoggedDevice::new("cam", log.clone());
    device.fail_frame = true;

    let mut recognition = RecognitionSession::new();
    recognition
        .start(
            Box::new(FixedClassifier {
                predictions: mojito_guess(),
            }),
            Box::new(device),
        )
        .await
        .unwrap();

    sleep(Duration::from_millis(50)).await;

    assert!(recognition.is_finished());
    let status = recognition.status().unwrap();
    assert!(status.contains("camera"), "status was: {status}");
    let events = log.lock().unwrap().clone();
    assert_eq!(events, vec!["cam acquired", "cam released"]);

    // Latest prediction never appeared and confirm reflects that.
    assert_eq!(recognition.confirm().await.unwrap(), None);
}

#[tokio::test]
async fn test_classifier_error_ends_loop_and_releases_device() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let mut recognition = RecognitionSession::new();
    recognition
        .start(
            Box::new(BrokenClassifier),
            Box::new(LoggedDevice::new("cam", log.clone())),
        )
        .await
        .unwrap();

    sleep(Duration::from_millis(50)).await;

    assert!(recognition.is_finished());
    let events = log.lock().unwrap().clone();
    assert_eq!(events, vec!["cam acquired", "cam released"]);
}

#[tokio::test]
async fn test_restart_tears_down_the_previous_cycle_first() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let mut recognition = RecognitionSession::new();

    recognition
        .start(
            Box::new(FixedClassifier {
                predictions: mojito_guess(),
            }),
            Box::new(LoggedDevice::new("first", log.clone())),
        )
        .await
        .unwrap();

    recognition
        .start(
            Box::new(FixedClassifier {
                predictions: mojito_guess(),
            }),
            Box::new(LoggedDevice::new("second", log.clone())),
        )
        .await
        .unwrap();

    recognition.stop().await;

    // Only ever one active cycle: the first device was fully released
    // before the second was acquired.
    let events = log.lock().unwrap().clone();
    assert_eq!(
        events,
        vec![
            "first acquired",
            "first released",
            "second acquired",
            "second released",
        ]
    );
}

#[test]
fn test_dropping_the_task_signals_shutdown() {
    tokio_test::block_on(async {
        let log = Arc::new(Mutex::new(Vec::new()));
        {
            let mut recognition = RecognitionSession::new();
            recognition
                .start(
                    Box::new(FixedClassifier {
                        predictions: mojito_guess(),
                    }),
                    Box::new(LoggedDevice::new("cam", log.clone())),
                )
                .await
                .unwrap();
            // Dropped without stop(): the shutdown sender goes away.
        }
        sleep(Duration::from_millis(50)).await;
        let events = log.lock().unwrap().clone();
        assert_eq!(events, vec!["cam acquired", "cam released"]);
    });
}
