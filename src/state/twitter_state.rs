// src/state/twitter_state.rs
use std::sync::Arc;

use crate::analysis::TwitterResult;
use crate::api::{AnalysisBackend, ApiError, CONNECT_ERROR_MESSAGE};
use crate::state::request::{PendingRequest, WorkerLost};

pub const TWITTER_FAILED: &str = "Twitter analysis failed. Please try again.";
pub const EMPTY_USERNAME: &str = "Please enter a Twitter/X username";

#[derive(Debug, Default)]
pub struct TwitterState {
    pub username: String,
    pub error: Option<String>,
    pub result: Option<TwitterResult>,
    /// Handle the current/last request was made for.
    pub submitted_username: String,
    request: PendingRequest<Result<TwitterResult, ApiError>>,
}

impl TwitterState {
    pub fn is_analyzing(&self) -> bool {
        self.request.is_in_flight()
    }

    /// Mirrors the button's enabled state.
    pub fn can_submit(&self) -> bool {
        !self.is_analyzing() && !self.username.trim().is_empty()
    }

    pub fn submit(&mut self, backend: Arc<dyn AnalysisBackend>) -> bool {
        if self.is_analyzing() {
            return false;
        }
        let username = self.username.trim().to_string();
        if username.is_empty() {
            self.error = Some(EMPTY_USERNAME.to_string());
            return false;
        }

        self.error = None;
        self.result = None;
        self.submitted_username = username.clone();
        tracing::info!(username = %username, "Submitting Twitter analysis");

        self.request.spawn(move || backend.analyze_twitter(&username))
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

    fn finish(&mut self, outcome: Result<Result<TwitterResult, ApiError>, WorkerLost>) {
        match outcome {
            Ok(Ok(result)) => {
                tracing::info!(username = %self.submitted_username, "Twitter analysis complete");
                self.result = Some(result);
            }
            Ok(Err(e)) => {
                tracing::warn!(username = %self.submitted_username, error = %e, "Twitter analysis failed");
                self.error = Some(e.user_message(TWITTER_FAILED));
            }
            Err(lost) => {
                tracing::error!(error = %lost, "Twitter worker lost");
                self.error = Some(CONNECT_ERROR_MESSAGE.to_string());
            }
        }
    }

    /// Header handle: what the backend says, else what was asked for.
    pub fn display_username(&self) -> &str {
        self.result.as_ref()
            .and_then(|r| r.username.as_deref())
            .unwrap_or(&self.submitted_username)
    }

    /// Extra line under failure messages pointing at the server.
    pub fn error_hint(&self, base_url: &str) -> Option<String> {
        self.error.as_ref()
            .filter(|e| e.to_lowercase().contains("failed"))
            .map(|_| format!("Check if the analysis server is running at {}", base_url))
    }
}
