//! Process configuration, read from the environment

use di::inject;
use di::injectable;
use log::warn;
use std::env;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Settings {
    pub bind_address: SocketAddr,
    /// Base URL of the Ollama server, without a trailing slash.
    pub ollama_url: String,
    pub model: String,
    /// `None` lets a model call run for as long as it takes.
    pub request_timeout: Option<Duration>,
    pub allowed_origins: Vec<String>,
    pub static_dir: String,
    pub title: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            bind_address: SocketAddr::from(([0, 0, 0, 0], 5000)),
            ollama_url: "http://localhost:11434".to_owned(),
            model: "gemma3:1b".to_owned(),
            request_timeout: None,
            allowed_origins: vec![
                "http://localhost:3000".to_owned(),
                "http://localhost:5173".to_owned(),
            ],
            static_dir: "static".to_owned(),
            title: "CodeMind AI".to_owned(),
        }
    }
}

#[injectable]
impl Settings {
    #[inject]
    pub fn create() -> Settings {
        Settings::from_env()
    }
}

impl Settings {
    /// Reads settings from the process environment, after loading `.env` if there is one.
    pub fn from_env() -> Settings {
        dotenvy::dotenv().ok();
        Settings::from_lookup(|key| env::var(key).ok())
    }

    /// Builds settings from an arbitrary key lookup. Missing or unparseable values keep their
    /// defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Settings {
        let mut settings = Settings::default();

        if let Some(address) = parse(&lookup, "BIND_ADDRESS") {
            settings.bind_address = address;
        }
        if let Some(url) = lookup("OLLAMA_URL") {
            settings.ollama_url = url.trim_end_matches('/').to_owned();
        }
        if let Some(model) = lookup("OLLAMA_MODEL") {
            settings.model = model;
        }
        if let Some(seconds) = parse::<u64>(&lookup, "OLLAMA_TIMEOUT_SECS") {
            settings.request_timeout = (seconds > 0).then(|| Duration::from_secs(seconds));
        }
        if let Some(origins) = lookup("CORS_ALLOWED_ORIGINS") {
            settings.allowed_origins = origins
                .split(',')
                .map(str::trim)
                .filter(|origin| !origin.is_empty())
                .map(str::to_owned)
                .collect();
        }
        if let Some(dir) = lookup("STATIC_DIR") {
            settings.static_dir = dir;
        }
        if let Some(title) = lookup("APP_TITLE") {
            settings.title = title;
        }

        settings
    }
}

fn parse<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    let value = lookup(key)?;
    match value.trim().parse() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            warn!("ignoring invalid {key}={value:?}, using the default");
            None
        }
    }
}
