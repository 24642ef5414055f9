// src/state/login_state.rs
use std::sync::Arc;

use crate::api::{AnalysisBackend, ApiError, LoginResponse, CONNECT_ERROR_MESSAGE};
use crate::file::Session;
use crate::state::request::PendingRequest;

pub const LOGIN_FAILED: &str = "Login failed";

#[derive(Debug, Default)]
pub struct LoginState {
    pub username: String,
    pub password: String,
    pub error: Option<String>,
    request: PendingRequest<Result<LoginResponse, ApiError>>,
}

impl LoginState {
    pub fn is_submitting(&self) -> bool {
        self.request.is_in_flight()
    }

    /// Sends the credentials. No-op while a login is already in flight.
    pub fn submit(&mut self, backend: Arc<dyn AnalysisBackend>) -> bool {
        if self.is_submitting() {
            return false;
        }
        if self.username.trim().is_empty() || self.password.is_empty() {
            self.error = Some("Please enter your username and password".to_string());
            return false;
        }

        self.error = None;
        let username = self.username.trim().to_string();
        let password = self.password.clone();
        tracing::info!(username = %username, "Submitting login");

        self.request.spawn(move || backend.login(&username, &password))
    }

    /// Checks on the outstanding login; yields the new session on success.
    pub fn poll(&mut self) -> Option<Session> {
        let outcome = self.request.poll()?;
        self.finish(outcome)
    }

    #[cfg(test)]
    pub fn wait(&mut self) -> Option<Session> {
        let outcome = self.request.wait()?;
        self.finish(outcome)
    }

    fn finish(
        &mut self,
        outcome: Result<Result<LoginResponse, ApiError>, crate::state::request::WorkerLost>,
    ) -> Option<Session> {
        match outcome {
            Ok(Ok(response)) => {
                tracing::info!(username = %self.username.trim(), "Login successful");
                self.password.clear();
                Some(Session {
                    token: response.token,
                    user_name: Some(self.username.trim().to_string()),
                })
            }
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "Login failed");
                self.error = Some(e.user_message(LOGIN_FAILED));
                None
            }
            Err(lost) => {
                tracing::error!(error = %lost, "Login worker lost");
                self.error = Some(CONNECT_ERROR_MESSAGE.to_string());
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::tests::ScriptedBackend;

    fn filled() -> LoginState {
        LoginState {
            username: " ada ".to_string(),
            password: "secret".to_string(),
            ..LoginState::default()
        }
    }

    #[test]
    fn test_success_yields_session() {
        let backend = ScriptedBackend::new();
        backend.push_login(Ok(LoginResponse { token: "tok".to_string() }));

        let mut state = filled();
        assert!(state.submit(backend.clone()));
        let session = state.wait().unwrap();

        assert_eq!(session.token, "tok");
        assert_eq!(session.user_name.as_deref(), Some("ada"));
        assert!(state.password.is_empty());
        assert!(state.error.is_none());
        assert_eq!(backend.logins(), vec![("ada".to_string(), "secret".to_string())]);
    }

    #[test]
    fn test_backend_error_is_shown_verbatim() {
        let backend = ScriptedBackend::new();
        backend.push_login(Err(ApiError::Backend { status: 401, message: Some("Invalid credentials".to_string()) }));

        let mut state = filled();
        state.submit(backend);
        assert!(state.wait().is_none());
        assert_eq!(state.error.as_deref(), Some("Invalid credentials"));
        assert!(!state.is_submitting());
    }

    #[test]
    fn test_backend_error_without_message_uses_fallback() {
        let backend = ScriptedBackend::new();
        backend.push_login(Err(ApiError::Backend { status: 500, message: None }));

        let mut state = filled();
        state.submit(backend);
        state.wait();
        assert_eq!(state.error.as_deref(), Some(LOGIN_FAILED));
    }

    #[test]
    fn test_network_failure_is_generic() {
        let backend = ScriptedBackend::new();
        backend.push_login(Err(ApiError::Connect("connection refused".to_string())));

        let mut state = filled();
        state.submit(backend);
        state.wait();
        assert_eq!(state.error.as_deref(), Some(CONNECT_ERROR_MESSAGE));
    }

    #[test]
    fn test_resubmit_while_in_flight_is_noop() {
        let backend = ScriptedBackend::new();
        let release = backend.hold();
        backend.push_login(Ok(LoginResponse { token: "tok".to_string() }));

        let mut state = filled();
        assert!(state.submit(backend.clone()));
        assert!(state.is_submitting());
        assert!(!state.submit(backend.clone()));
        assert!(state.poll().is_none());

        release.send(()).unwrap();
        assert!(state.wait().is_some());
        assert_eq!(backend.logins().len(), 1);
    }

    #[test]
    fn test_empty_fields_do_not_submit() {
        let backend = ScriptedBackend::new();
        let mut state = LoginState::default();
        assert!(!state.submit(backend.clone()));
        assert!(state.error.is_some());
        assert!(backend.logins().is_empty());
    }
}
