// src/state/mod.rs
use std::path::PathBuf;
use std::sync::Arc;

use crate::api::AnalysisBackend;
use crate::capture::{CaptureSettings, FfmpegSource, FrameSource};
use crate::config::AppConfig;
use crate::file::{Session, SessionStore};

pub mod image_state;
pub mod login_state;
pub mod request;
pub mod signup_state;
pub mod twitter_state;

pub use image_state::{ImageMode, ImageState};
pub use login_state::LoginState;
pub use signup_state::SignupState;
pub use twitter_state::TwitterState;

// Screen/tab tracking
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Screen {
    Login,
    Signup,
    ImageAnalyzer,
    TwitterAnalyzer,
}

impl Screen {
    pub fn requires_session(&self) -> bool {
        matches!(self, Screen::ImageAnalyzer | Screen::TwitterAnalyzer)
    }
}

/// Where login and signup land.
pub const HOME_SCREEN: Screen = Screen::TwitterAnalyzer;

// Core application state
pub struct AppState {
    pub config: AppConfig,
    pub backend: Arc<dyn AnalysisBackend>,
    session_store: Box<dyn SessionStore>,
    pub session: Option<Session>,

    // Minimal UI state
    pub current_screen: Screen,
    pub error_message: Option<String>,
    pub export_dir: PathBuf,

    // Pages
    pub login: LoginState,
    pub signup: SignupState,
    pub image: ImageState,
    pub twitter: TwitterState,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        backend: Arc<dyn AnalysisBackend>,
        session_store: Box<dyn SessionStore>,
    ) -> Self {
        let mut error_message = None;
        let session = match session_store.load() {
            Ok(session) => session,
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring unreadable session");
                error_message = Some(format!("Could not restore session: {:#}", e));
                None
            }
        };

        let current_screen = if session.is_some() { HOME_SCREEN } else { Screen::Login };
        let export_dir = config.export_dir();

        Self {
            config,
            backend,
            session_store,
            session,
            current_screen,
            error_message,
            export_dir,
            login: LoginState::default(),
            signup: SignupState::default(),
            image: ImageState::default(),
            twitter: TwitterState::default(),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    pub fn user_name(&self) -> Option<&str> {
        self.session.as_ref().and_then(|s| s.user_name.as_deref())
    }

    /// Analyzer pages bounce to Login without a session.
    pub fn navigate(&mut self, screen: Screen) {
        self.current_screen = if screen.requires_session() && !self.is_authenticated() {
            Screen::Login
        } else {
            screen
        };
    }

    /// Persists `session` and opens the home screen. A failed write is
    /// reported but the session still holds for this run.
    pub fn start_session(&mut self, session: Session) {
        if let Err(e) = self.session_store.save(&session) {
            tracing::warn!(error = %e, "Failed to persist session");
            self.error_message = Some(format!("Could not save session: {:#}", e));
        }
        self.session = Some(session);
        self.navigate(HOME_SCREEN);
    }

    pub fn logout(&mut self) {
        if let Err(e) = self.session_store.clear() {
            tracing::warn!(error = %e, "Failed to clear session");
            self.error_message = Some(format!("Could not clear session: {:#}", e));
        }
        tracing::info!("Logged out");
        self.session = None;
        self.image.cancel();
        self.image = ImageState::default();
        self.twitter = TwitterState::default();
        self.navigate(Screen::Login);
    }

    /// A login that finishes after another session started (e.g. a signup
    /// in the meantime) is dropped.
    fn accept_login(&mut self, session: Session) {
        if self.is_authenticated() {
            tracing::info!("Ignoring login that completed after a session was already started");
            return;
        }
        self.start_session(session);
    }

    pub fn submit_login(&mut self) -> bool {
        self.login.submit(self.backend.clone())
    }

    pub fn submit_signup(&mut self) {
        if let Some(session) = self.signup.submit() {
            self.start_session(session);
        }
    }

    pub fn submit_twitter(&mut self) -> bool {
        self.twitter.submit(self.backend.clone())
    }

    pub fn capture_settings(&self) -> CaptureSettings {
        CaptureSettings::from(&self.config.capture)
    }

    pub fn camera_source(&self) -> Box<dyn FrameSource> {
        let source = FfmpegSource::new(&self.config.capture);
        tracing::debug!(device = source.device(), "Opening camera");
        Box::new(source)
    }

    pub fn analyze_camera(&mut self) -> bool {
        let source = self.camera_source();
        let settings = self.capture_settings();
        self.image.analyze_camera(self.backend.clone(), source, settings)
    }

    pub fn analyze_file(&mut self) -> bool {
        self.image.analyze_file(self.backend.clone())
    }

    /// Drains finished requests. Returns true while any page still waits,
    /// so the UI keeps repainting.
    pub fn poll(&mut self) -> bool {
        if let Some(session) = self.login.poll() {
            self.accept_login(session);
        }
        self.image.poll();
        self.twitter.poll();

        self.login.is_submitting() || self.image.is_analyzing() || self.twitter.is_analyzing()
    }
}
