// src/state/image_state.rs
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::Local;

use crate::analysis::GenderResult;
use crate::api::{AnalysisBackend, ApiError, CONNECT_ERROR_MESSAGE};
use crate::capture::{capture_frames, CancelToken, CaptureSettings, FrameSource, StillImageSource};
use crate::file::save_report;
use crate::report::ReportFormat;
use crate::state::request::{PendingRequest, WorkerLost};

pub const ANALYSIS_FAILED: &str = "Analysis failed.";
pub const NO_FRAMES: &str = "No frames captured from camera.";
pub const CAPTURE_CANCELLED: &str = "Capture cancelled.";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ImageMode {
    Upload,
    Camera,
}

#[derive(Debug, thiserror::Error)]
pub enum AnalyzeError {
    #[error("no frames captured")]
    NoFrames,
    #[error("capture cancelled")]
    Cancelled,
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl AnalyzeError {
    fn user_message(&self) -> String {
        match self {
            AnalyzeError::NoFrames => NO_FRAMES.to_string(),
            AnalyzeError::Cancelled => CAPTURE_CANCELLED.to_string(),
            AnalyzeError::Api(e) => e.user_message(ANALYSIS_FAILED),
        }
    }
}

#[derive(Debug)]
pub struct ImageState {
    pub mode: ImageMode,
    pub selected_file: Option<PathBuf>,
    pub error: Option<String>,
    pub result: Option<GenderResult>,
    /// Outcome of the last report export, shown under the buttons.
    pub export_status: Option<String>,
    request: PendingRequest<Result<GenderResult, AnalyzeError>>,
    cancel: CancelToken,
    /// Raised while the worker is still sampling, lowered before the upload.
    capturing: Arc<AtomicBool>,
}

impl Default for ImageState {
    fn default() -> Self {
        Self {
            mode: ImageMode::Upload,
            selected_file: None,
            error: None,
            result: None,
            export_status: None,
            request: PendingRequest::default(),
            cancel: CancelToken::new(),
            capturing: Arc::new(AtomicBool::new(false)),
        }
    }
}

impl ImageState {
    pub fn is_analyzing(&self) -> bool {
        self.request.is_in_flight()
    }

    /// True only during the capture phase, the part that can be cancelled.
    pub fn is_capturing(&self) -> bool {
        self.is_analyzing() && self.capturing.load(Ordering::SeqCst)
    }

    /// Captures `settings.count` frames from `source` and sends them in one
    /// request. No-op while a previous analysis is running.
    pub fn analyze_camera(
        &mut self,
        backend: Arc<dyn AnalysisBackend>,
        source: Box<dyn FrameSource>,
        settings: CaptureSettings,
    ) -> bool {
        tracing::info!(count = settings.count, delay_ms = settings.delay.as_millis() as u64, "Starting camera analysis");
        self.start(backend, source, settings)
    }

    /// Sends the selected image file as a single frame.
    pub fn analyze_file(&mut self, backend: Arc<dyn AnalysisBackend>) -> bool {
        let Some(path) = self.selected_file.clone() else {
            self.error = Some("Please choose an image first".to_string());
            return false;
        };
        tracing::info!(path = %path.display(), "Starting image analysis");
        let settings = CaptureSettings { count: 1, delay: Duration::ZERO };
        self.start(backend, Box::new(StillImageSource::new(path)), settings)
    }

    fn start(
        &mut self,
        backend: Arc<dyn AnalysisBackend>,
        mut source: Box<dyn FrameSource>,
        settings: CaptureSettings,
    ) -> bool {
        if self.is_analyzing() {
            return false;
        }

        self.error = None;
        self.result = None;
        self.export_status = None;
        self.cancel = CancelToken::new();
        let cancel = self.cancel.clone();
        self.capturing = Arc::new(AtomicBool::new(true));
        let capturing = self.capturing.clone();

        self.request.spawn(move || {
            let frames = capture_frames(source.as_mut(), settings, &cancel);
            capturing.store(false, Ordering::SeqCst);
            if cancel.is_cancelled() {
                return Err(AnalyzeError::Cancelled);
            }
            if frames.is_empty() {
                return Err(AnalyzeError::NoFrames);
            }
            tracing::info!(frames = frames.len(), "Sending frames for analysis");
            Ok(backend.analyze_gender_frames(&frames)?)
        })
    }

    /// Aborts a running capture. An HTTP call already under way is
    /// abandoned once it returns.
    pub fn cancel(&mut self) {
        if self.is_capturing() {
            self.cancel.cancel();
        }
    }

    pub fn poll(&mut self) {
        if let Some(outcome) = self.request.poll() {
            self.finish(outcome);
        }
    }

    #[cfg(test)]
    pub fn wait(&mut self) {
        if let Some(outcome) = self.request.wait() {
            self.finish(outcome);
        }
    }

    fn finish(&mut self, outcome: Result<Result<GenderResult, AnalyzeError>, WorkerLost>) {
        match outcome {
            Ok(Ok(result)) => {
                tracing::info!(gender = %result.gender, confidence = result.confidence, "Gender analysis complete");
                self.result = Some(result);
            }
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "Gender analysis failed");
                self.error = Some(e.user_message());
            }
            Err(lost) => {
                tracing::error!(error = %lost, "Analysis worker lost");
                self.error = Some(CONNECT_ERROR_MESSAGE.to_string());
            }
        }
    }

    /// Writes the current result as a report into `dir`.
    pub fn export(&mut self, format: ReportFormat, dir: &Path) -> Option<PathBuf> {
        let result = self.result.as_ref()?;
        match save_report(dir, format, result, &Local::now()) {
            Ok(path) => {
                self.export_status = Some(format!("Saved {}", path.display()));
                Some(path)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Report export failed");
                self.export_status = Some(format!("Could not save report: {:#}", e));
                None
            }
        }
    }
}
