use super::{Page, PageBehavior, render_page};
use crate::{AppState, gallery::GalleryBehavior};
use axum::{
    extract::State,
    http::{StatusCode, Uri},
    response::{Html, IntoResponse, Response},
};
use tracing::{debug, error};

/// Catch-all page handler.
///
/// Gallery pages get the first chance at any path below their url and fall
/// through when they produce nothing; other pages only answer their own url.
pub async fn page_handler(State(app_state): State<AppState>, uri: Uri) -> Response {
    let path = match urlencoding::decode(uri.path()) {
        Ok(path) => path.into_owned(),
        Err(e) => {
            debug!("Undecodable path {}: {}", uri.path(), e);
            return (StatusCode::BAD_REQUEST, "Invalid path").into_response();
        }
    };

    for page in app_state.pages.candidates(&path) {
        match page.behavior {
            PageBehavior::Gallery => {
                let behavior = match GalleryBehavior::new(
                    page,
                    &app_state.config.static_files.directory,
                    &app_state.template_engine,
                    &app_state.lightbox,
                ) {
                    Ok(behavior) => behavior,
                    Err(e) => {
                        error!("Gallery page {} is misconfigured: {}", page.url, e);
                        continue;
                    }
                };

                if let Some(response) = behavior.find_page_by_url(&path).await {
                    return response;
                }
                debug!("Gallery page {} produced nothing for {}", page.url, path);
            }
            PageBehavior::Normal => {
                if page.is_exact(&path) {
                    return render_normal_page(&app_state, page).await;
                }
            }
        }
    }

    (StatusCode::NOT_FOUND, "Page not found").into_response()
}

async fn render_normal_page(app_state: &AppState, page: &Page) -> Response {
    let globals = liquid::object!({
        "app_name": app_state.config.app.name,
        "base_url": app_state.config.app.base_url,
    });

    match render_page(&app_state.template_engine, page, globals).await {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            error!("Template rendering error: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR).into_response()
        }
    }
}
