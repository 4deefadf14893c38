use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, path::PathBuf};

pub mod gallery;
pub mod lightbox;
pub mod pages;
pub mod startup_checks;
pub mod templating;


#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub server: ServerConfig,
    pub app: AppConfig,
    pub templates: TemplateConfig,
    pub static_files: StaticConfig,
    pub lightbox: LightboxConfig,
    #[serde(default)]
    pub pages: Vec<PageConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    pub name: String,
    pub log_level: String,
    #[serde(default)]
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TemplateConfig {
    pub directory: PathBuf,
}

/// Public web root. Gallery directories are relative to it.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StaticConfig {
    pub directory: PathBuf,
}

/// Directory holding the lightbox `js/`, `css/` and `images/` folders.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LightboxConfig {
    pub directory: PathBuf,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PageConfig {
    pub url: String,
    pub title: String,
    #[serde(default)]
    pub behavior: pages::PageBehavior,
    #[serde(default)]
    pub layout: Option<String>,
    #[serde(default = "default_lightbox")]
    pub lightbox: bool,
    #[serde(default)]
    pub parts: BTreeMap<String, String>,
}

fn default_lightbox() -> bool {
    true
}

const DEFAULT_GALLERY_BODY: &str = r#"{{ gallery.lightbox }}
<h1>{{ page.title }}</h1>
{% if gallery.if_subgallery %}<p><a href="{{ gallery.parent.url }}">Up</a></p>{% endif %}
<ul class="folders">
{% for folder in gallery.folders %}  <li>{{ folder.link }}</li>
{% endfor %}</ul>
<div class="images">
{% for image in gallery.images %}  {{ image.thumbnail }}
{% endfor %}</div>"#;

impl Default for Config {
    fn default() -> Self {
        let mut parts = BTreeMap::new();
        parts.insert("body".to_string(), DEFAULT_GALLERY_BODY.to_string());
        parts.insert("gallery".to_string(), "photos".to_string());

        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 3000,
            },
            app: AppConfig {
                name: "Folio".to_string(),
                log_level: "info".to_string(),
                base_url: None,
            },
            templates: TemplateConfig {
                directory: PathBuf::from("templates"),
            },
            static_files: StaticConfig {
                directory: PathBuf::from("public"),
            },
            lightbox: LightboxConfig {
                directory: PathBuf::from("public/lightbox"),
            },
            pages: vec![PageConfig {
                url: "/gallery/".to_string(),
                title: "Gallery".to_string(),
                behavior: pages::PageBehavior::Gallery,
                layout: None,
                lightbox: true,
                parts,
            }],
        }
    }
}

use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub template_engine: Arc<templating::TemplateEngine>,
    pub lightbox: lightbox::LightboxAssets,
    pub pages: Arc<pages::PageRegistry>,
    pub config: Config,
}

pub async fn create_app(config: Config) -> Router {
    let template_engine = Arc::new(templating::TemplateEngine::new(
        config.templates.directory.clone(),
    ));

    let lightbox = lightbox::LightboxAssets::new(config.lightbox.directory.clone());

    let pages = Arc::new(pages::PageRegistry::new(&config.pages));

    let app_state = AppState {
        template_engine,
        lightbox,
        pages,
        config: config.clone(),
    };

    Router::new()
        .route("/", axum::routing::get(pages::page_handler))
        .route("/{*path}", axum::routing::get(pages::page_handler))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    let method = request.method();
                    let uri = request.uri();
                    let matched_path = request
                        .extensions()
                        .get::<axum::extract::MatchedPath>()
                        .map(|matched_path| matched_path.as_str());

                    tracing::info_span!(
                        "http_request",
                        method = %method,
                        uri = %uri,
                        matched_path,
                    )
                })
                .on_request(|request: &axum::http::Request<_>, _span: &tracing::Span| {
                    let method = request.method();
                    let uri = request.uri();
                    let headers = request.headers();
                    let user_agent = headers
                        .get("user-agent")
                        .and_then(|h| h.to_str().ok())
                        .unwrap_or("-");
                    let referer = headers
                        .get("referer")
                        .and_then(|h| h.to_str().ok())
                        .unwrap_or("-");

                    tracing::info!(
                        target: "access_log",
                        method = %method,
                        path = %uri.path(),
                        query = ?uri.query(),
                        user_agent = %user_agent,
                        referer = %referer,
                        "request"
                    );
                })
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     _span: &tracing::Span| {
                        let status = response.status();
                        let size = response
                            .headers()
                            .get("content-length")
                            .and_then(|h| h.to_str().ok())
                            .unwrap_or("-");

                        tracing::info!(
                            target: "access_log",
                            status = %status,
                            size = %size,
                            latency_ms = %latency.as_millis(),
                            "response"
                        );
                    },
                ),
        )
        .with_state(app_state)
}
