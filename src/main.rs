// src/main.rs
use std::sync::Arc;

use anyhow::{Context, Result};
use eframe::egui;
use tracing_subscriber::EnvFilter;

mod analysis;
mod api;
mod app;
mod capture;
mod config;
mod file;
mod report;
mod state;
mod ui;

use api::ApiClient;
use app::PersonaApp;
use config::AppConfig;
use file::FileSessionStore;
use state::AppState;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("persona_gui=info")),
        )
        .init();

    let config = AppConfig::load().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Falling back to default configuration");
        AppConfig::default()
    });
    tracing::info!(base_url = %config.api.base_url, "Starting persona-gui");

    let backend = Arc::new(ApiClient::new(&config.api).context("Failed to build HTTP client")?);
    let store = FileSessionStore::default_location();
    tracing::debug!(path = %store.path().display(), "Using session file");

    let state = AppState::new(config, backend, Box::new(store));

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1024.0, 768.0])
            .with_title("Persona"),
        ..Default::default()
    };

    eframe::run_native(
        "Persona",
        options,
        Box::new(|_cc| Box::new(PersonaApp::new(state))),
    ).map_err(|e| anyhow::anyhow!("Failed to run application: {}", e))
}
