use crate::infrastructure::settings::Settings;
use async_trait::async_trait;
use axum::Router;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::{HeaderValue, Method, StatusCode};
use axum::response::Html;
use axum::routing::get;
use di_axum::Inject;
use log::{error, warn};
use minijinja::{Environment, context};
use std::convert::Infallible;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use uuid::Uuid;

pub mod chat;

pub const X_SESSION_ID: &str = "X-Session-ID";

const INDEX_TEMPLATE: &str = include_str!("../../static/index.html");

/// The session id sent in the `X-Session-ID` header, if any.
///
/// Any string is accepted; a header that is not valid UTF-8 counts as absent.
#[derive(Debug)]
pub struct ExtractSession(pub Option<String>);

#[async_trait]
impl<S> FromRequestParts<S> for ExtractSession
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Infallible> {
        let session_id = parts
            .headers
            .get(X_SESSION_ID)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);

        Ok(ExtractSession(session_id))
    }
}

/// Mints an identifier for a request that did not carry one.
pub fn new_session_id() -> String {
    Uuid::new_v4().to_string()
}

pub fn router(settings: &Settings) -> Router {
    Router::new()
        .route("/", get(index))
        .nest_service(
            "/static",
            ServiceBuilder::new().service(ServeDir::new(&settings.static_dir)),
        )
        .merge(chat::router())
}

pub fn cors_layer(settings: &Settings) -> CorsLayer {
    let origins: Vec<HeaderValue> = settings
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("ignoring invalid CORS origin {origin:?}");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_headers(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_origin(origins)
}

async fn index(
    Inject(settings): Inject<Settings>,
) -> Result<Html<String>, (StatusCode, &'static str)> {
    render_index(&settings).map(Html).map_err(|e| {
        error!("failed to render index page: {e}");
        (StatusCode::INTERNAL_SERVER_ERROR, "failed to render page")
    })
}

fn render_index(settings: &Settings) -> Result<String, minijinja::Error> {
    let mut env = Environment::new();
    env.add_template("index.html", INDEX_TEMPLATE)?;
    env.get_template("index.html")?.render(context! {
        title => settings.title,
        model => settings.model,
    })
}
