// src/api/mod.rs
//! Client for the analysis backend.
//!
//! Every call is a single JSON POST with no retries; the only timeout is the
//! transport timeout configured on the underlying client.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::analysis::{GenderResult, TwitterResult};
use crate::config::ApiConfig;

pub const LOGIN_PATH: &str = "/auth/login";
pub const GENDER_FRAMES_PATH: &str = "/analyze/gender_frames";
pub const TWITTER_PATH: &str = "/analyze/twitter";

pub const CONNECT_ERROR_MESSAGE: &str = "Failed to connect to backend.";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Backend unreachable or the exchange broke off.
    #[error("Failed to connect to backend: {0}")]
    Connect(String),

    /// Non-success status; `message` is the body's `error` field if any.
    #[error("Backend returned {status}: {}", .message.as_deref().unwrap_or("no error message"))]
    Backend { status: u16, message: Option<String> },

    /// Success status but the body was not the JSON we expect.
    #[error("Invalid response from backend: {0}")]
    Decode(String),
}

impl ApiError {
    /// Text shown inline on a page. Backend messages are shown verbatim,
    /// otherwise the page's own fallback.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Connect(_) => CONNECT_ERROR_MESSAGE.to_string(),
            ApiError::Backend { message: Some(message), .. } => message.clone(),
            ApiError::Backend { message: None, .. } | ApiError::Decode(_) => fallback.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct GenderFramesRequest<'a> {
    pub frames: &'a [String],
}

#[derive(Debug, Clone, Serialize)]
pub struct TwitterRequest<'a> {
    pub username: &'a str,
}

/// What the pages need from the backend.
pub trait AnalysisBackend: Send + Sync {
    fn login(&self, username: &str, password: &str) -> Result<LoginResponse, ApiError>;
    fn analyze_gender_frames(&self, frames: &[String]) -> Result<GenderResult, ApiError>;
    fn analyze_twitter(&self, username: &str) -> Result<TwitterResult, ApiError>;

    fn base_url(&self) -> &str;
}

pub struct ApiClient {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| ApiError::Connect(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// One POST with a JSON body, decoded into `Resp` on success.
    pub fn post_json<Req, Resp>(&self, path: &str, body: &Req) -> Result<Resp, ApiError>
    where
        Req: Serialize + ?Sized,
        Resp: DeserializeOwned,
    {
        let url = self.url(path);
        tracing::debug!(url = %url, "POST");

        let response = self.client
            .post(&url)
            .json(body)
            .send()
            .map_err(|e| {
                tracing::warn!(url = %url, error = %e, "Backend request failed");
                ApiError::Connect(e.to_string())
            })?;

        let status = response.status();
        let text = response.text().map_err(|e| ApiError::Connect(e.to_string()))?;

        if !status.is_success() {
            let message = error_message(&text);
            tracing::warn!(
                url = %url,
                status = status.as_u16(),
                message = message.as_deref().unwrap_or(""),
                "Backend returned error"
            );
            return Err(ApiError::Backend { status: status.as_u16(), message });
        }

        serde_json::from_str(&text).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

/// The `error` field of an error body, if the body is JSON and has one.
fn error_message(body: &str) -> Option<String> {
    serde_json::from_str::<Value>(body)
        .ok()?
        .get("error")?
        .as_str()
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

impl AnalysisBackend for ApiClient {
    fn login(&self, username: &str, password: &str) -> Result<LoginResponse, ApiError> {
        self.post_json(LOGIN_PATH, &LoginRequest { username, password })
    }

    fn analyze_gender_frames(&self, frames: &[String]) -> Result<GenderResult, ApiError> {
        self.post_json(GENDER_FRAMES_PATH, &GenderFramesRequest { frames })
    }

    fn analyze_twitter(&self, username: &str) -> Result<TwitterResult, ApiError> {
        let raw: Value = self.post_json(TWITTER_PATH, &TwitterRequest { username })?;
        Ok(TwitterResult::from_value(raw))
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufRead, BufReader, Read, Write};
    use std::net::TcpListener;
    use std::sync::mpsc;
    use std::thread;

    /// Serves exactly one HTTP response and hands back the request body.
    fn one_shot_server(status_line: &'static str, body: &'static str) -> (String, mpsc::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream.try_clone().unwrap());
            let mut content_length = 0;
            loop {
                let mut line = String::new();
                reader.read_line(&mut line).unwrap();
                if line == "\r\n" || line.is_empty() {
                    break;
                }
                if let Some(value) = line.to_ascii_lowercase().strip_prefix("content-length:") {
                    content_length = value.trim().parse().unwrap();
                }
            }
            let mut request_body = vec![0; content_length];
            reader.read_exact(&mut request_body).unwrap();
            tx.send(String::from_utf8(request_body).unwrap()).unwrap();

            let mut stream = stream;
            write!(
                stream,
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            ).unwrap();
        });

        (format!("http://{}", addr), rx)
    }

    fn client(base_url: &str) -> ApiClient {
        ApiClient::new(&ApiConfig { base_url: base_url.to_string(), timeout_secs: 5 }).unwrap()
    }

    #[test]
    fn test_login_success_sends_credentials() {
        let (url, body) = one_shot_server("200 OK", r#"{"token":"abc123"}"#);
        let response = client(&url).login("ada", "secret").unwrap();
        assert_eq!(response.token, "abc123");

        let sent: Value = serde_json::from_str(&body.recv().unwrap()).unwrap();
        assert_eq!(sent["username"], "ada");
        assert_eq!(sent["password"], "secret");
    }

    #[test]
    fn test_backend_error_field_is_surfaced() {
        let (url, _body) = one_shot_server("401 Unauthorized", r#"{"error":"Invalid credentials"}"#);
        let err = client(&url).login("ada", "wrong").unwrap_err();
        assert!(matches!(err, ApiError::Backend { status: 401, .. }));
        assert_eq!(err.user_message("Login failed"), "Invalid credentials");
    }

    #[test]
    fn test_backend_error_without_message_uses_fallback() {
        let (url, _body) = one_shot_server("500 Internal Server Error", "oops");
        let err = client(&url).analyze_twitter("someone").unwrap_err();
        assert_eq!(err.user_message("Twitter analysis failed. Please try again."),
                   "Twitter analysis failed. Please try again.");
    }

    #[test]
    fn test_unreachable_backend_is_connect_error() {
        // Bind then drop to get a port nobody listens on.
        let port = TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap().port();
        let err = client(&format!("http://127.0.0.1:{}", port)).login("ada", "pw").unwrap_err();
        assert!(matches!(err, ApiError::Connect(_)));
        assert_eq!(err.user_message("Login failed"), CONNECT_ERROR_MESSAGE);
    }

    #[test]
    fn test_gender_frames_payload_and_response() {
        let (url, body) = one_shot_server(
            "200 OK",
            r#"{"gender":"female","confidence":0.91,"frame_genders":[{"gender":"female","confidence":0.9}]}"#,
        );
        let frames = vec!["data:image/jpeg;base64,AAAA".to_string()];
        let result = client(&url).analyze_gender_frames(&frames).unwrap();
        assert_eq!(result.display_gender(), "FEMALE");
        assert_eq!(result.frames().map(|f| f.len()), Some(1));

        let sent: Value = serde_json::from_str(&body.recv().unwrap()).unwrap();
        assert_eq!(sent["frames"][0], "data:image/jpeg;base64,AAAA");
    }

    #[test]
    fn test_twitter_result_keeps_raw_payload() {
        let (url, _body) = one_shot_server("200 OK", r#"{"username":"nasa","bio":"space"}"#);
        let result = client(&url).analyze_twitter("nasa").unwrap();
        assert_eq!(result.bio.as_deref(), Some("space"));
        assert_eq!(result.raw["username"], "nasa");
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let api = client("http://localhost:5000/");
        assert_eq!(api.url(LOGIN_PATH), "http://localhost:5000/auth/login");
        assert_eq!(api.base_url(), "http://localhost:5000");
    }
}
