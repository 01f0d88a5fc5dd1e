use super::{model_or, AppState};
use crate::{
    branding::{self, CredentialGate, Session, SessionId},
    config::ApiKey,
    models::{logo_models, name_models, LogoArtifact, ModelInfo},
};
use actix_web::{
    cookie::{Cookie, SameSite},
    get, post, web, HttpRequest, HttpResponse,
};
use serde::Deserialize;
use std::fmt::Write;

pub const SESSION_COOKIE: &str = "logoflow_session";

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(index)
        .service(submit_credentials)
        .service(submit_names)
        .service(submit_selection)
        .service(submit_logo);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Success,
    Warning,
    Error,
}

impl NoticeKind {
    fn class(&self) -> &'static str {
        match self {
            NoticeKind::Info => "info",
            NoticeKind::Success => "success",
            NoticeKind::Warning => "warning",
            NoticeKind::Error => "error",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    fn new(kind: NoticeKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CredentialsForm {
    #[serde(default)]
    pub gemini_api_key: String,
    #[serde(default)]
    pub hf_api_token: String,
}

#[derive(Debug, Deserialize)]
pub struct NamesForm {
    #[serde(default)]
    pub description: String,
    pub model: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SelectForm {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct LogoForm {
    pub model: Option<String>,
}

fn session_id(req: &HttpRequest) -> Option<SessionId> {
    req.cookie(SESSION_COOKIE)
        .and_then(|c| c.value().parse().ok())
}

fn session_cookie(id: SessionId) -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE, id.to_string())
        .path("/")
        .http_only(true)
        .same_site(SameSite::Strict)
        .finish()
}

/// Sets the cookie only when there is a stored session behind it.
fn page_response(id: Option<SessionId>, html: String) -> HttpResponse {
    let mut response = HttpResponse::Ok();
    if let Some(id) = id {
        response.cookie(session_cookie(id));
    }
    response.content_type("text/html; charset=utf-8").body(html)
}

/// The caller's live session, or an unsaved blank one. Pages never create a
/// stored session: only saving keys does.
fn current_session(req: &HttpRequest, state: &AppState) -> (Option<SessionId>, Session) {
    session_id(req)
        .and_then(|id| state.sessions.get(&id).map(|session| (Some(id), session)))
        .unwrap_or_default()
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn model_options(models: &[ModelInfo], selected: &str) -> String {
    models
        .iter()
        .map(|m| {
            let mark = if m.id == selected { " selected" } else { "" };
            format!(
                "<option value=\"{}\"{}>{}</option>",
                escape(&m.id),
                mark,
                escape(&m.name)
            )
        })
        .collect()
}

/// What a page shows on top of the stored session.
#[derive(Debug, Default)]
pub struct PageView<'a> {
    pub notice: Option<&'a Notice>,
    pub logo: Option<&'a LogoArtifact>,
    /// Text to put back in the description box instead of the stored one.
    pub description: Option<&'a str>,
}

impl<'a> PageView<'a> {
    fn notice(notice: &'a Notice) -> Self {
        Self {
            notice: Some(notice),
            ..Default::default()
        }
    }
}

/// Renders the whole page for one session.
pub fn render_page(session: &Session, state: &AppState, view: PageView<'_>) -> String {
    let mut html = String::from(
        "<!DOCTYPE html>\n<html><head><meta charset=\"utf-8\"><title>Logoflow</title></head><body>\n\
         <h1>Logoflow</h1><p><em>Your AI Branding Partner</em></p>\n",
    );

    if let Some(notice) = view.notice {
        let _ = writeln!(
            html,
            "<div class=\"notice {}\">{}</div>",
            notice.kind.class(),
            escape(&notice.message)
        );
    }

    html.push_str(
        "<section id=\"setup\"><h2>Security &amp; Setup</h2>\n\
         <form method=\"post\" action=\"/credentials\">\n\
         <label>Google Gemini API Key <input type=\"password\" name=\"gemini_api_key\"></label>\n\
         <label>Hugging Face Token <input type=\"password\" name=\"hf_api_token\"></label>\n\
         <button type=\"submit\">Save keys</button></form>\n\
         <p>Your keys are kept in memory for this session only and never stored.</p></section>\n",
    );

    let gate = CredentialGate::new(&session.credentials);
    if !gate.is_ready() {
        html.push_str("<section id=\"welcome\"><h2>Welcome to Logoflow!</h2>\n<p>To get started, please enter your API keys.</p><ul>\n");
        for line in gate.guidance() {
            let _ = writeln!(html, "<li>{}</li>", escape(&line));
        }
        html.push_str("</ul></section>\n</body></html>\n");
        return html;
    }

    let _ = write!(
        html,
        "<section id=\"vision\"><h2>1. Vision Board</h2>\n\
         <form method=\"post\" action=\"/names\">\n\
         <textarea name=\"description\" rows=\"5\" placeholder=\"Example: A futuristic sneaker brand for urban runners. Values: Speed, Technology, Sustainability.\">{}</textarea>\n\
         <select name=\"model\">{}</select>\n\
         <button type=\"submit\">Launch Branding Session</button></form></section>\n",
        escape(view.description.unwrap_or(session.description())),
        model_options(&name_models(), &state.config.name_model)
    );

    if let Some(candidates) = session.candidates() {
        html.push_str("<section id=\"names\"><h2>2. Choose Identity</h2>\n<form method=\"post\" action=\"/select\">\n");
        for name in candidates {
            let checked = if session.selected() == Some(name.as_str()) {
                " checked"
            } else {
                ""
            };
            let _ = writeln!(
                html,
                "<label><input type=\"radio\" name=\"name\" value=\"{0}\"{1}> {0}</label>",
                escape(name),
                checked
            );
        }
        html.push_str("<button type=\"submit\">Select</button></form></section>\n");
    }

    if let Some(selected) = session.selected() {
        let _ = write!(
            html,
            "<section id=\"logo\"><h2>3. Visual Mark</h2>\n\
             <div class=\"generated-name\">{0}</div>\n\
             <form method=\"post\" action=\"/logo\">\n\
             <select name=\"model\">{1}</select>\n\
             <button type=\"submit\">Design Logo for {0}</button></form>\n",
            escape(selected),
            model_options(&logo_models(), &state.config.logo_model)
        );
        if let Some(logo) = view.logo {
            let _ = writeln!(
                html,
                "<figure><img src=\"{}\" alt=\"Logo for {}\"><figcaption>Identity for {}</figcaption></figure>",
                logo.to_data_uri(),
                escape(selected),
                escape(selected)
            );
        }
        html.push_str("</section>\n");
    }

    html.push_str("</body></html>\n");
    html
}

#[get("/")]
async fn index(req: HttpRequest, state: web::Data<AppState>) -> HttpResponse {
    let (id, session) = current_session(&req, &state);
    page_response(id, render_page(&session, &state, PageView::default()))
}

#[post("/credentials")]
async fn submit_credentials(
    req: HttpRequest,
    state: web::Data<AppState>,
    form: web::Form<CredentialsForm>,
) -> HttpResponse {
    let id = state.sessions.get_or_create(session_id(&req));
    let form = form.into_inner();

    let session = state
        .sessions
        .update(&id, |s| {
            s.credentials.gemini_api_key = ApiKey::new(form.gemini_api_key);
            s.credentials.hf_api_token = ApiKey::new(form.hf_api_token);
            s.clone()
        })
        .unwrap_or_default();

    let notice = if session.credentials.is_ready() {
        Notice::new(NoticeKind::Success, "Keys saved for this session.")
    } else {
        Notice::new(NoticeKind::Info, "Both keys are required to continue.")
    };
    page_response(Some(id), render_page(&session, &state, PageView::notice(&notice)))
}

#[post("/names")]
async fn submit_names(
    req: HttpRequest,
    state: web::Data<AppState>,
    form: web::Form<NamesForm>,
) -> HttpResponse {
    let (id, session) = current_session(&req, &state);

    let Some(id) = id.filter(|_| session.credentials.is_ready()) else {
        let notice = Notice::new(NoticeKind::Warning, "Enter both API keys first.");
        return page_response(id, render_page(&session, &state, PageView::notice(&notice)));
    };

    let description = form.description.trim();
    if description.is_empty() {
        let notice = Notice::new(NoticeKind::Warning, "Please describe your vision first.");
        return page_response(Some(id), render_page(&session, &state, PageView::notice(&notice)));
    }

    let result = branding::generate_names(
        state.client.text(),
        description,
        Some(model_or(form.model.as_deref(), &state.config.name_model)),
        session.credentials.gemini_api_key.as_ref(),
    )
    .await;

    let (notice, recorded) = match result {
        Ok(names) => {
            let recorded = state
                .sessions
                .update(&id, |s| s.record_candidates(description, names))
                .unwrap_or(false);
            if recorded {
                (Notice::new(NoticeKind::Success, "Brand names crystallized!"), true)
            } else {
                (Notice::new(NoticeKind::Warning, "No names came back. Try again."), false)
            }
        }
        Err(e) => {
            log::error!("Name generation failed: {}", e);
            (Notice::new(NoticeKind::Error, e.to_string()), false)
        }
    };

    let session = state.sessions.get(&id).unwrap_or(session);
    let view = PageView {
        notice: Some(&notice),
        // Keep what was typed when nothing new was stored.
        description: (!recorded).then_some(description),
        ..Default::default()
    };
    page_response(Some(id), render_page(&session, &state, view))
}

#[post("/select")]
async fn submit_selection(
    req: HttpRequest,
    state: web::Data<AppState>,
    form: web::Form<SelectForm>,
) -> HttpResponse {
    let (id, _) = current_session(&req, &state);

    let notice = match id.and_then(|id| state.sessions.update(&id, |s| s.select(&form.name))) {
        Some(Ok(())) => None,
        Some(Err(e)) => Some(Notice::new(NoticeKind::Warning, e.to_string())),
        None => Some(Notice::new(NoticeKind::Warning, "Enter both API keys first.")),
    };

    let session = id
        .and_then(|id| state.sessions.get(&id))
        .unwrap_or_default();
    let view = PageView {
        notice: notice.as_ref(),
        ..Default::default()
    };
    page_response(id, render_page(&session, &state, view))
}

#[post("/logo")]
async fn submit_logo(
    req: HttpRequest,
    state: web::Data<AppState>,
    form: web::Form<LogoForm>,
) -> HttpResponse {
    let (id, session) = current_session(&req, &state);

    let Some(selected) = session.selected().filter(|_| session.can_generate_logo()) else {
        let notice = Notice::new(NoticeKind::Warning, "Select a name first.");
        return page_response(id, render_page(&session, &state, PageView::notice(&notice)));
    };

    let result = branding::generate_logo(
        state.client.image(),
        selected,
        session.description(),
        Some(model_or(form.model.as_deref(), &state.config.logo_model)),
        session.credentials.hf_api_token.as_ref(),
    )
    .await;

    let (notice, logo) = match result {
        Ok(Some(logo)) => (None, Some(logo)),
        Ok(None) => (
            Some(Notice::new(NoticeKind::Warning, "Enter both API keys first.")),
            None,
        ),
        Err(e) => {
            log::error!("Logo generation failed: {}", e);
            (Some(Notice::new(NoticeKind::Error, e.to_string())), None)
        }
    };

    let view = PageView {
        notice: notice.as_ref(),
        logo: logo.as_ref(),
        ..Default::default()
    };
    page_response(id, render_page(&session, &state, view))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        branding::logo_prompt,
        clients::{
            fake::{FakeImageGenerator, FakeReply, FakeTextGenerator},
            LogoflowClient,
        },
        config::ServerConfig,
        models::DEFAULT_LOGO_MODEL,
        server::configure as configure_app,
    };
    // Aliased so `#[test]` keeps meaning the built-in attribute.
    use actix_web::{dev::ServiceResponse, test as atest, App};
    use std::sync::Arc;

    const SNEAKERS: &str =
        "A futuristic sneaker brand for urban runners. Values: Speed, Technology, Sustainability.";

    async fn body_text(resp: ServiceResponse) -> String {
        String::from_utf8(atest::read_body(resp).await.to_vec()).unwrap()
    }

    macro_rules! post_form {
        ($app:expr, $cookie:expr, $uri:expr, $form:expr $(,)?) => {{
            let req = atest::TestRequest::post()
                .uri($uri)
                .cookie($cookie.clone())
                .set_form($form)
                .to_request();
            body_text(atest::call_service($app, req).await).await
        }};
    }

    /// Saves both keys without a cookie and returns the new session cookie.
    macro_rules! save_keys {
        ($app:expr) => {{
            let req = atest::TestRequest::post()
                .uri("/credentials")
                .set_form(&[("gemini_api_key", "g-key"), ("hf_api_token", "hf-key")])
                .to_request();
            let resp = atest::call_service($app, req).await;
            resp.response()
                .cookies()
                .find(|c| c.name() == SESSION_COOKIE)
                .unwrap()
                .into_owned()
        }};
    }

    fn app_state(text: Arc<FakeTextGenerator>, image: Arc<FakeImageGenerator>) -> web::Data<AppState> {
        web::Data::new(AppState::new(
            ServerConfig::new(),
            LogoflowClient::new(text, image),
        ))
    }

    #[test]
    fn escape_neutralises_markup() {
        assert_eq!(
            escape("<b>\"Tom\" & 'Jerry'</b>"),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
    }

    #[actix_web::test]
    async fn first_visit_shows_onboarding_without_a_session() {
        let text = Arc::new(FakeTextGenerator::replying("A"));
        let image = Arc::new(FakeImageGenerator::png("img"));
        let state = app_state(text, image);
        let app = atest::init_service(
            App::new()
                .app_data(state.clone())
                .configure(configure_app),
        )
        .await;

        for _ in 0..5 {
            let resp =
                atest::call_service(&app, atest::TestRequest::get().uri("/").to_request()).await;
            assert!(!resp.response().cookies().any(|c| c.name() == SESSION_COOKIE));

            let html = body_text(resp).await;
            assert!(html.contains("Welcome to Logoflow!"));
            assert!(html.contains("Google Gemini API Key: for generating creative brand names."));
            assert!(!html.contains("Vision Board"));
        }
        assert!(state.sessions.is_empty());
    }

    #[actix_web::test]
    async fn full_branding_flow() {
        let text = Arc::new(FakeTextGenerator::replying(
            "AeroStride, Velocity Runners, EcoPulse",
        ));
        let image = Arc::new(FakeImageGenerator::png("img"));
        let state = app_state(text.clone(), image.clone());
        let app = atest::init_service(
            App::new()
                .app_data(state.clone())
                .configure(configure_app),
        )
        .await;

        // Blocked until keys are entered: no upstream call, no stored session.
        let stale = Cookie::new(SESSION_COOKIE, uuid::Uuid::new_v4().to_string());
        let html = post_form!(&app, &stale, "/names", &[("description", SNEAKERS)]);
        assert!(html.contains("Enter both API keys first."));
        assert!(text.calls().is_empty());
        assert!(state.sessions.is_empty());

        let cookie = save_keys!(&app);
        let resp = atest::call_service(
            &app,
            atest::TestRequest::get().uri("/").cookie(cookie.clone()).to_request(),
        )
        .await;
        let html = body_text(resp).await;
        assert!(html.contains("Vision Board"));
        assert!(!html.contains("g-key"));

        // Logo without a selection is a no-op.
        let html = post_form!(&app, &cookie, "/logo", &[("model", DEFAULT_LOGO_MODEL)]);
        assert!(html.contains("Select a name first."));
        assert!(image.calls().is_empty());

        let html = post_form!(
            &app,
            &cookie,
            "/names",
            &[("description", SNEAKERS), ("model", "gemini-2.5-flash")],
        );
        assert!(html.contains("Brand names crystallized!"));
        assert!(html.contains("value=\"Velocity Runners\""));
        assert_eq!(text.calls()[0].api_key, "g-key");

        let html = post_form!(&app, &cookie, "/select", &[("name", "Velocity Runners")]);
        assert!(html.contains("Design Logo for Velocity Runners"));

        let html = post_form!(&app, &cookie, "/logo", &[("model", DEFAULT_LOGO_MODEL)]);
        assert!(html.contains("src=\"data:image/png;base64,aW1n\""));

        let calls = image.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].api_key, "hf-key");
        assert_eq!(calls[0].prompt, logo_prompt("Velocity Runners", SNEAKERS));
        assert_eq!(state.sessions.len(), 1);
    }

    #[actix_web::test]
    async fn failed_generation_keeps_previous_names() {
        let text = Arc::new(FakeTextGenerator::replying("Nova, Pulse"));
        let image = Arc::new(FakeImageGenerator::png("img"));
        let app = atest::init_service(
            App::new()
                .app_data(app_state(text.clone(), image))
                .configure(configure_app),
        )
        .await;

        let cookie = save_keys!(&app);
        post_form!(&app, &cookie, "/names", &[("description", "space app")]);
        post_form!(&app, &cookie, "/select", &[("name", "Pulse")]);

        text.set_reply(FakeReply::NotFound);
        let html = post_form!(
            &app,
            &cookie,
            "/names",
            &[("description", "a tea shop & bakery"), ("model", "gemini-0")],
        );
        assert!(html.contains("Model not found: gemini-0"));
        assert!(html.contains("value=\"Nova\""));
        assert!(html.contains("Design Logo for Pulse"));
        // The typed text stays in the box even though nothing was stored.
        assert!(html.contains(">a tea shop &amp; bakery</textarea>"));

        // A stale or forged choice is refused.
        let html = post_form!(&app, &cookie, "/select", &[("name", "Zenith")]);
        assert!(html.contains("is not one of the current names"));
        assert!(html.contains("Design Logo for Pulse"));
        assert!(html.contains(">space app</textarea>"));
    }

    #[actix_web::test]
    async fn blank_model_falls_back_to_configured_model() {
        let text = Arc::new(FakeTextGenerator::replying("Nova, Pulse"));
        let image = Arc::new(FakeImageGenerator::png("img"));
        let config = ServerConfig::new().with_models("gemini-2.5-pro", DEFAULT_LOGO_MODEL);
        let app = atest::init_service(
            App::new()
                .app_data(web::Data::new(AppState::new(
                    config,
                    LogoflowClient::new(text.clone(), image),
                )))
                .configure(configure_app),
        )
        .await;

        let cookie = save_keys!(&app);
        post_form!(&app, &cookie, "/names", &[("description", "d"), ("model", "")]);
        assert_eq!(text.calls()[0].model, "gemini-2.5-pro");
    }

    #[actix_web::test]
    async fn sessions_do_not_share_selections() {
        let text = Arc::new(FakeTextGenerator::replying("Nova, Pulse"));
        let image = Arc::new(FakeImageGenerator::png("img"));
        let state = app_state(text, image);
        let app = atest::init_service(
            App::new()
                .app_data(state.clone())
                .configure(configure_app),
        )
        .await;

        let cookies = vec![save_keys!(&app), save_keys!(&app)];
        assert_ne!(cookies[0].value(), cookies[1].value());

        for cookie in &cookies {
            post_form!(&app, cookie, "/names", &[("description", "d")]);
        }
        post_form!(&app, &cookies[0], "/select", &[("name", "Nova")]);

        let html = post_form!(&app, &cookies[1], "/logo", &[("model", DEFAULT_LOGO_MODEL)]);
        assert!(html.contains("Select a name first."));
        assert_eq!(state.sessions.len(), 2);
    }
}
