// src/capture/mod.rs
//! Timed multi-frame capture.
//!
//! A `FrameSource` is sampled a fixed number of times with a fixed delay in
//! between. Samples that produce no frame are skipped, so the returned
//! sequence may be shorter than requested.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

use crate::config::CaptureConfig;

pub mod ffmpeg;
pub mod still;

pub use ffmpeg::FfmpegSource;
pub use still::StillImageSource;

/// Longest single sleep between cancellation checks.
const CANCEL_POLL: Duration = Duration::from_millis(10);

/// Anything that can hand out the current picture of a video source.
pub trait FrameSource: Send {
    /// `Ok(None)` when the source has nothing yet (camera warming up, empty
    /// read). Errors are treated the same way by the capture loop. Sources
    /// that can block watch `cancel` and give up early.
    fn grab(&mut self, cancel: &CancelToken) -> Result<Option<Frame>>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub mime: &'static str,
    pub data: Vec<u8>,
}

impl Frame {
    pub fn jpeg(data: Vec<u8>) -> Self {
        Self { mime: "image/jpeg", data }
    }

    /// `data:<mime>;base64,<payload>` as expected by the backend.
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime, BASE64.encode(&self.data))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaptureSettings {
    pub count: usize,
    pub delay: Duration,
}

impl Default for CaptureSettings {
    fn default() -> Self {
        Self {
            count: 8,
            delay: Duration::from_millis(150),
        }
    }
}

impl From<&CaptureConfig> for CaptureSettings {
    fn from(config: &CaptureConfig) -> Self {
        Self {
            count: config.frame_count,
            delay: config.frame_delay(),
        }
    }
}

/// Shared flag used to abort a running capture.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Samples `source` `settings.count` times, `settings.delay` apart, and
/// returns the frames as data URLs in capture order.
///
/// Stops early only when `cancel` is raised; whatever was captured up to
/// that point is returned.
pub fn capture_frames(
    source: &mut dyn FrameSource,
    settings: CaptureSettings,
    cancel: &CancelToken,
) -> Vec<String> {
    let mut frames = Vec::with_capacity(settings.count);

    for index in 0..settings.count {
        if cancel.is_cancelled() {
            tracing::info!(captured = frames.len(), "Capture cancelled");
            break;
        }

        match source.grab(cancel) {
            Ok(Some(frame)) => {
                tracing::debug!(index, bytes = frame.data.len(), "Captured frame");
                frames.push(frame.to_data_url());
            }
            Ok(None) => tracing::debug!(index, "No frame available, skipping"),
            Err(e) => tracing::warn!(index, error = %e, "Frame grab failed, skipping"),
        }

        if !sleep_unless_cancelled(settings.delay, cancel) {
            tracing::info!(captured = frames.len(), "Capture cancelled");
            break;
        }
    }

    frames
}

/// Returns false if the wait was cut short by cancellation.
fn sleep_unless_cancelled(delay: Duration, cancel: &CancelToken) -> bool {
    let deadline = Instant::now() + delay;
    loop {
        if cancel.is_cancelled() {
            return false;
        }
        let now = Instant::now();
        if now >= deadline {
            return true;
        }
        std::thread::sleep((deadline - now).min(CANCEL_POLL));
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::collections::VecDeque;

    /// Replays a fixed script of grab outcomes; `None` entries mean "no frame".
    pub(crate) struct ScriptedSource {
        pub script: VecDeque<Option<u8>>,
        pub grabs: usize,
    }

    impl ScriptedSource {
        pub(crate) fn always(count: usize) -> Self {
            Self::from_script((0..count).map(|i| Some(i as u8)).collect())
        }

        pub(crate) fn from_script(script: Vec<Option<u8>>) -> Self {
            Self { script: script.into(), grabs: 0 }
        }
    }

    impl FrameSource for ScriptedSource {
        fn grab(&mut self, _cancel: &CancelToken) -> Result<Option<Frame>> {
            self.grabs += 1;
            match self.script.pop_front() {
                Some(Some(byte)) => Ok(Some(Frame::jpeg(vec![byte]))),
                Some(None) => Ok(None),
                None => Err(anyhow::anyhow!("script exhausted")),
            }
        }
    }

    fn fast(count: usize) -> CaptureSettings {
        CaptureSettings { count, delay: Duration::from_millis(1) }
    }

    #[test]
    fn test_always_ready_source_yields_every_frame_in_order() {
        let mut source = ScriptedSource::always(8);
        let frames = capture_frames(&mut source, fast(8), &CancelToken::new());

        assert_eq!(frames.len(), 8);
        let expected: Vec<String> = (0..8u8).map(|b| Frame::jpeg(vec![b]).to_data_url()).collect();
        assert_eq!(frames, expected);
    }

    #[test]
    fn test_default_cadence_takes_at_least_the_delays() {
        let mut source = ScriptedSource::always(8);
        let settings = CaptureSettings::default();
        let started = Instant::now();
        let frames = capture_frames(&mut source, settings, &CancelToken::new());

        assert_eq!(frames.len(), 8);
        assert!(started.elapsed() >= settings.delay * 8);
    }

    #[test]
    fn test_missing_frames_are_skipped_not_retried() {
        let mut source = ScriptedSource::from_script(vec![
            None, Some(1), None, Some(3), Some(4), None, None, Some(7),
        ]);
        let frames = capture_frames(&mut source, fast(8), &CancelToken::new());

        assert_eq!(frames.len(), 4);
        assert_eq!(source.grabs, 8);
        assert_eq!(frames[0], Frame::jpeg(vec![1]).to_data_url());
        assert_eq!(frames[3], Frame::jpeg(vec![7]).to_data_url());
    }

    #[test]
    fn test_source_errors_do_not_abort_capture() {
        let mut source = ScriptedSource::from_script(vec![Some(0), Some(1)]);
        let frames = capture_frames(&mut source, fast(5), &CancelToken::new());

        assert_eq!(frames.len(), 2);
        assert_eq!(source.grabs, 5);
    }

    #[test]
    fn test_cancelled_before_start_grabs_nothing() {
        let cancel = CancelToken::new();
        cancel.cancel();
        let mut source = ScriptedSource::always(8);
        let frames = capture_frames(&mut source, fast(8), &cancel);

        assert!(frames.is_empty());
        assert_eq!(source.grabs, 0);
    }

    #[test]
    fn test_cancel_during_wait_stops_early() {
        let cancel = CancelToken::new();
        let remote = cancel.clone();
        let handle = std::thread::spawn(move || {
            std::thread::sleep(Duration::from_millis(50));
            remote.cancel();
        });

        let mut source = ScriptedSource::always(8);
        let settings = CaptureSettings { count: 8, delay: Duration::from_secs(5) };
        let frames = capture_frames(&mut source, settings, &cancel);
        handle.join().unwrap();

        assert_eq!(frames.len(), 1);
        assert_eq!(source.grabs, 1);
    }

    #[test]
    fn test_data_url_encoding() {
        let frame = Frame::jpeg(b"hi".to_vec());
        assert_eq!(frame.to_data_url(), "data:image/jpeg;base64,aGk=");
    }
}
