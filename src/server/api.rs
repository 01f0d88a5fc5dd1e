use super::{model_or, status_for, AppState};
use crate::{
    branding::{self, CredentialGate},
    error::LogoflowError,
    models::{
        logo_models, name_models, ErrorResponse, GenerateLogoRequest, GenerateNamesRequest,
        LogoResponse, NamesResponse,
    },
};
use actix_web::{get, http::StatusCode, post, web, HttpResponse};
use serde_json::json;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(health)
        .service(
            web::scope("/api")
                .service(models)
                .service(generate_names)
                .service(generate_logo),
        );
}

fn error_response(status: StatusCode, message: impl Into<String>) -> HttpResponse {
    HttpResponse::build(status).json(ErrorResponse {
        error: message.into(),
    })
}

fn upstream_error(err: &LogoflowError) -> HttpResponse {
    log::error!("Generation failed: {}", err);
    error_response(status_for(err), err.to_string())
}

/// Both endpoints need both server keys; otherwise the 500 names every
/// missing variable.
fn check_server_credentials(state: &AppState) -> Option<HttpResponse> {
    let gate = CredentialGate::new(&state.config.credentials);
    if gate.is_ready() {
        return None;
    }

    let missing = gate
        .missing()
        .iter()
        .map(|service| service.env_var())
        .collect::<Vec<_>>()
        .join(", ");
    let err = LogoflowError::MissingCredential(missing.clone());
    log::error!("{}", err);
    Some(error_response(
        status_for(&err),
        format!("Server Configuration Error: {} not set", missing),
    ))
}

#[get("/health")]
async fn health(state: web::Data<AppState>) -> HttpResponse {
    let credentials = &state.config.credentials;
    HttpResponse::Ok().json(json!({
        "status": "ok",
        "ready": CredentialGate::new(credentials).is_ready(),
        "text_generation": credentials.gemini_api_key.is_some(),
        "image_generation": credentials.hf_api_token.is_some(),
    }))
}

#[get("/models")]
async fn models() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "name_models": name_models(),
        "logo_models": logo_models(),
    }))
}

#[post("/generate-names")]
async fn generate_names(
    state: web::Data<AppState>,
    body: web::Json<GenerateNamesRequest>,
) -> HttpResponse {
    let description = body.description.trim();
    if description.is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "Please describe your vision first.");
    }

    if let Some(response) = check_server_credentials(&state) {
        return response;
    }
    let api_key = state.config.credentials.gemini_api_key.as_ref();
    let model = model_or(body.model.as_deref(), &state.config.name_model);

    match branding::generate_names(state.client.text(), description, Some(model), api_key).await
    {
        Ok(names) => HttpResponse::Ok().json(NamesResponse { names }),
        Err(e) => upstream_error(&e),
    }
}

#[post("/generate-logo")]
async fn generate_logo(
    state: web::Data<AppState>,
    body: web::Json<GenerateLogoRequest>,
) -> HttpResponse {
    let name = body.name.trim();
    if name.is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "Select a name first.");
    }

    if let Some(response) = check_server_credentials(&state) {
        return response;
    }
    let api_key = state.config.credentials.hf_api_token.as_ref();
    let model = model_or(body.model.as_deref(), &state.config.logo_model);

    match branding::generate_logo(
        state.client.image(),
        name,
        body.description.trim(),
        Some(model),
        api_key,
    )
    .await
    {
        Ok(Some(logo)) => HttpResponse::Ok().json(LogoResponse {
            image: logo.to_data_uri(),
        }),
        Ok(None) => error_response(StatusCode::INTERNAL_SERVER_ERROR, "No logo was produced."),
        Err(e) => upstream_error(&e),
    }
}
