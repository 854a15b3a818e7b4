pub mod handlers;
pub mod page;

use crate::config::Config;
use crate::models::TeamRoster;
use crate::report_generator::ReportGenerator;
use crate::utils::TabienError;
use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use axum::Router;
use std::path::PathBuf;
use std::sync::Arc;

/// Shared state handed to every request.
pub struct AppState {
    pub roster: TeamRoster,
    pub generator: ReportGenerator,
    pub output_dir: PathBuf,
}

impl AppState {
    pub fn from_config(config: &Config) -> Result<Self, TabienError> {
        let roster = config.load_roster()?;
        let generator = ReportGenerator::new(
            config.template.clone(),
            config.output_dir.clone(),
            config.pdf_converter(),
        );
        Ok(AppState {
            roster,
            generator,
            output_dir: config.output_dir.clone(),
        })
    }
}

pub fn router(state: Arc<AppState>, body_limit: usize) -> Router {
    Router::new()
        .route("/", get(handlers::index).post(handlers::submit_report))
        .route("/download/*filename", get(handlers::download))
        .route("/health", get(handlers::health))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

/// Bind and serve until the process is stopped.
pub async fn run(config: Config) -> Result<(), TabienError> {
    std::fs::create_dir_all(&config.output_dir).map_err(|e| {
        TabienError::ServerError(format!(
            "Failed to create output directory {}: {}",
            config.output_dir.display(),
            e
        ))
    })?;

    if !config.template.is_file() {
        log::warn!(
            "Template {} not found; report generation will fail until it exists",
            config.template.display()
        );
    }

    let state = Arc::new(AppState::from_config(&config)?);
    let app = router(state, config.body_limit_bytes());

    let addr = format!("{}:{}", config.bind, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| TabienError::ServerError(format!("Failed to bind {}: {}", addr, e)))?;

    log::info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| TabienError::ServerError(e.to_string()))
}
