// src/state/signup_state.rs
use uuid::Uuid;

use crate::file::Session;

/// Signup never reaches a backend: it only mints a local token so the
/// analyzer pages open. No account is created anywhere.
#[derive(Debug, Default)]
pub struct SignupState {
    pub name: String,
    pub email: String,
    pub password: String,
    pub error: Option<String>,
}

impl SignupState {
    pub fn submit(&mut self) -> Option<Session> {
        if let Some(problem) = self.validate() {
            self.error = Some(problem.to_string());
            return None;
        }

        self.error = None;
        self.password.clear();
        let name = self.name.trim().to_string();
        tracing::info!(user = %name, "Created local session");

        Some(Session {
            token: format!("local-{}", Uuid::new_v4()),
            user_name: Some(name),
        })
    }

    fn validate(&self) -> Option<&'static str> {
        if self.name.trim().is_empty() {
            return Some("Please enter your name");
        }
        let email = self.email.trim();
        if email.is_empty() || !email.contains('@') {
            return Some("Please enter a valid email address");
        }
        if self.password.is_empty() {
            return Some("Please choose a password");
        }
        None
    }
}
