//! actix-web front end. Two deployment shapes share one process:
//! the JSON API under `/api` (credentials from server configuration) and the
//! server-rendered pages under `/` (credentials entered per session).

pub mod api;
pub mod pages;

use crate::{
    branding::SessionStore,
    clients::LogoflowClient,
    config::ServerConfig,
    error::LogoflowError,
    models::ErrorResponse,
};
use actix_web::{error::InternalError, http::StatusCode, web, App, HttpResponse, HttpServer};

pub struct AppState {
    pub client: LogoflowClient,
    pub config: ServerConfig,
    pub sessions: SessionStore,
}

impl AppState {
    pub fn new(config: ServerConfig, client: LogoflowClient) -> Self {
        let sessions = SessionStore::with_idle_timeout(config.session_idle_timeout);
        Self {
            client,
            config,
            sessions,
        }
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        let response = HttpResponse::BadRequest().json(ErrorResponse {
            error: err.to_string(),
        });
        InternalError::from_response(err, response).into()
    }))
    .configure(api::configure)
    .configure(pages::configure);
}

/// HTTP status used to report `err` to a remote caller.
pub fn status_for(err: &LogoflowError) -> StatusCode {
    match err {
        LogoflowError::ModelNotFound { .. } => StatusCode::NOT_FOUND,
        LogoflowError::SessionError(_) => StatusCode::BAD_REQUEST,
        LogoflowError::MissingCredential(_) => StatusCode::INTERNAL_SERVER_ERROR,
        e if e.is_upstream() => StatusCode::BAD_GATEWAY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// The requested model, or `fallback` when none (or a blank one) was given.
fn model_or<'a>(requested: Option<&'a str>, fallback: &'a str) -> &'a str {
    requested
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .unwrap_or(fallback)
}

pub async fn run(config: ServerConfig, client: LogoflowClient) -> std::io::Result<()> {
    let bind = (config.host.clone(), config.port);
    let state = web::Data::new(AppState::new(config, client));

    log::info!("✅ Listening on http://{}:{}", bind.0, bind.1);

    HttpServer::new(move || App::new().app_data(state.clone()).configure(configure))
        .bind(bind)?
        .run()
        .await
}
