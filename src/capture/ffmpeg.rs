// src/capture/ffmpeg.rs
use std::io::Read;
use std::process::{Child, Command, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};

use super::{CancelToken, Frame, FrameSource, CANCEL_POLL};
use crate::config::CaptureConfig;

/// Grabs single JPEG stills from a camera by running ffmpeg once per sample.
#[derive(Debug, Clone)]
pub struct FfmpegSource {
    program: String,
    input_format: String,
    device: String,
    timeout: Duration,
}

impl FfmpegSource {
    pub fn new(config: &CaptureConfig) -> Self {
        Self {
            program: config.ffmpeg.clone(),
            input_format: config.input_format.clone(),
            device: config.device.clone(),
            timeout: config.grab_timeout(),
        }
    }

    pub fn device(&self) -> &str {
        &self.device
    }

    fn args(&self) -> Vec<String> {
        [
            "-hide_banner", "-loglevel", "error",
            "-f", self.input_format.as_str(),
            "-i", self.device.as_str(),
            "-frames:v", "1",
            "-f", "image2pipe",
            "-vcodec", "mjpeg",
            "-",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect()
    }

    fn stop(&self, child: &mut Child, reason: &str) {
        // The pipe readers are left to finish on their own once the process is gone
        let _ = child.kill();
        let _ = child.wait();
        tracing::warn!(device = %self.device, reason, "ffmpeg grab stopped");
    }
}

/// Drains a child pipe on its own thread so a full pipe never stalls ffmpeg.
fn drain<R: Read + Send + 'static>(mut pipe: R) -> JoinHandle<Vec<u8>> {
    thread::spawn(move || {
        let mut buffer = Vec::new();
        let _ = pipe.read_to_end(&mut buffer);
        buffer
    })
}

fn collect(reader: Option<JoinHandle<Vec<u8>>>) -> Vec<u8> {
    reader
        .map(|handle| handle.join().unwrap_or_default())
        .unwrap_or_default()
}

impl FrameSource for FfmpegSource {
    fn grab(&mut self, cancel: &CancelToken) -> Result<Option<Frame>> {
        let mut child = Command::new(&self.program)
            .args(self.args())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .with_context(|| format!("Failed to run {}", self.program))?;

        let stdout = child.stdout.take().map(drain);
        let stderr = child.stderr.take().map(drain);
        let deadline = Instant::now() + self.timeout;

        let status = loop {
            if let Some(status) = child.try_wait().context("Failed to wait for ffmpeg")? {
                break status;
            }
            if cancel.is_cancelled() {
                self.stop(&mut child, "cancelled");
                return Ok(None);
            }
            if Instant::now() >= deadline {
                self.stop(&mut child, "timed out");
                return Ok(None);
            }
            thread::sleep(CANCEL_POLL);
        };

        let data = collect(stdout);
        let errors = collect(stderr);

        if !status.success() {
            tracing::debug!(
                device = %self.device,
                status = ?status.code(),
                stderr = %String::from_utf8_lossy(&errors).trim(),
                "ffmpeg produced no frame"
            );
            return Ok(None);
        }

        if data.is_empty() {
            return Ok(None);
        }

        Ok(Some(Frame::jpeg(data)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_target_configured_device() {
        let source = FfmpegSource::new(&CaptureConfig {
            device: "video=Integrated Camera".to_string(),
            input_format: "dshow".to_string(),
            ..CaptureConfig::default()
        });
        let args = source.args();
        let input = args.iter().position(|a| a == "-i").unwrap();
        assert_eq!(args[input + 1], "video=Integrated Camera");
        assert_eq!(args[input - 1], "dshow");
        assert_eq!(args.last().map(String::as_str), Some("-"));
    }

    #[test]
    fn test_missing_program_is_an_error() {
        let mut source = FfmpegSource::new(&CaptureConfig {
            ffmpeg: "/nonexistent/ffmpeg-binary".to_string(),
            ..CaptureConfig::default()
        });
        assert!(source.grab(&CancelToken::new()).is_err());
    }

    #[cfg(unix)]
    mod fake_ffmpeg {
        use super::*;
        use std::fs;
        use std::os::unix::fs::PermissionsExt;
        use std::path::Path;

        fn script(dir: &Path, body: &str) -> String {
            let path = dir.join("ffmpeg");
            fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
            fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
            path.to_string_lossy().into_owned()
        }

        fn source(program: String, timeout_ms: u64) -> FfmpegSource {
            FfmpegSource::new(&CaptureConfig {
                ffmpeg: program,
                grab_timeout_ms: timeout_ms,
                ..CaptureConfig::default()
            })
        }

        #[test]
        fn test_frame_is_read_from_stdout() {
            let dir = tempfile::tempdir().unwrap();
            let mut source = source(script(dir.path(), "printf 'jpeg'"), 5_000);

            let frame = source.grab(&CancelToken::new()).unwrap();
            assert_eq!(frame, Some(Frame::jpeg(b"jpeg".to_vec())));
        }

        #[test]
        fn test_failed_run_is_no_frame() {
            let dir = tempfile::tempdir().unwrap();
            let mut source = source(script(dir.path(), "echo busy >&2; exit 1"), 5_000);

            assert_eq!(source.grab(&CancelToken::new()).unwrap(), None);
        }

        #[test]
        fn test_hung_grab_is_killed_after_timeout() {
            let dir = tempfile::tempdir().unwrap();
            let mut source = source(script(dir.path(), "exec sleep 5"), 100);

            let started = Instant::now();
            assert_eq!(source.grab(&CancelToken::new()).unwrap(), None);
            assert!(started.elapsed() < Duration::from_secs(3));
        }

        #[test]
        fn test_cancel_interrupts_hung_grab() {
            let dir = tempfile::tempdir().unwrap();
            let mut source = source(script(dir.path(), "exec sleep 5"), 60_000);

            let cancel = CancelToken::new();
            let remote = cancel.clone();
            let handle = thread::spawn(move || {
                thread::sleep(Duration::from_millis(100));
                remote.cancel();
            });

            let started = Instant::now();
            assert_eq!(source.grab(&cancel).unwrap(), None);
            handle.join().unwrap();
            assert!(started.elapsed() < Duration::from_secs(3));
        }

        #[test]
        fn test_capture_stops_when_cancelled_mid_grab() {
            let dir = tempfile::tempdir().unwrap();
            let mut source = source(script(dir.path(), "exec sleep 5"), 60_000);
            let settings = crate::capture::CaptureSettings::default();

            let cancel = CancelToken::new();
            let remote = cancel.clone();
            let handle = thread::spawn(move || {
                thread::sleep(Duration::from_millis(100));
                remote.cancel();
            });

            let started = Instant::now();
            let frames = crate::capture::capture_frames(&mut source, settings, &cancel);
            handle.join().unwrap();

            assert!(frames.is_empty());
            assert!(started.elapsed() < Duration::from_secs(3));
        }
    }
}
