use super::{Gallery, GalleryError, GalleryTags, PreparedImage, Target, Variant};
use crate::{
    lightbox::LightboxAssets,
    pages::{Page, render_page},
    templating::TemplateEngine,
};
use axum::{
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use std::path::Path;
use tracing::{debug, error, warn};

/// Gallery responses are produced fresh for every request.
const CACHE_CONTROL: &str = "no-cache";

/// Turns a page into a gallery of the directory named by its `gallery` part.
pub struct GalleryBehavior<'a> {
    page: &'a Page,
    gallery: Gallery,
    templates: &'a TemplateEngine,
    lightbox: &'a LightboxAssets,
}

impl<'a> GalleryBehavior<'a> {
    pub fn new(
        page: &'a Page,
        public_root: &Path,
        templates: &'a TemplateEngine,
        lightbox: &'a LightboxAssets,
    ) -> Result<Self, GalleryError> {
        let gallery_path = page
            .part("gallery")
            .ok_or(GalleryError::MissingGalleryPart)?;

        Ok(Self {
            page,
            gallery: Gallery::new(public_root, gallery_path),
            templates,
            lightbox,
        })
    }

    /// Produce the response for `path`, or `None` when the gallery has nothing
    /// for it and normal page resolution should continue.
    pub async fn find_page_by_url(&self, path: &str) -> Option<Response> {
        let inner_path = self.page.inner_path(path)?;

        match self.gallery.resolve(inner_path) {
            Target::Asset(file_name) => self.lightbox.serve(&file_name).await,
            Target::Folder(folder) => self.render_folder(folder).await,
            Target::Image {
                directory,
                name,
                variant,
            } => self
                .serve_image(directory, name, variant)
                .await
                .map(image_response),
            Target::Nothing => None,
        }
    }

    async fn render_folder(&self, folder: String) -> Option<Response> {
        let gallery = self.gallery.clone();
        let relative = folder.clone();
        let listing = tokio::task::spawn_blocking(move || -> Result<_, GalleryError> {
            Ok((gallery.folders(&relative)?, gallery.images(&relative)?))
        })
        .await;

        let (folders, images) = match listing {
            Ok(Ok(listing)) => listing,
            Ok(Err(e)) => {
                warn!("Failed to scan gallery folder {:?}: {}", folder, e);
                return None;
            }
            Err(e) => {
                error!("Gallery scan task failed: {}", e);
                return None;
            }
        };

        let tags = GalleryTags::new(self.page, &folder)
            .with_folders(folders)
            .with_images(images);

        let mut globals = liquid::Object::new();
        globals.insert(
            "gallery".into(),
            liquid::model::Value::Object(tags.to_liquid()),
        );

        let response = match render_page(self.templates, self.page, globals).await {
            Ok(html) => (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, "text/html; charset=utf-8"),
                    (header::CACHE_CONTROL, CACHE_CONTROL),
                ],
                html,
            )
                .into_response(),
            Err(e) => {
                error!("Failed to render gallery page {}: {}", self.page.url, e);
                (StatusCode::INTERNAL_SERVER_ERROR).into_response()
            }
        };

        Some(response)
    }

    /// Load and size an image. Every failure, including undecodable files,
    /// reads as "no image".
    async fn serve_image(
        &self,
        directory: String,
        name: String,
        variant: Variant,
    ) -> Option<PreparedImage> {
        let gallery = self.gallery.clone();
        let result = tokio::task::spawn_blocking(move || {
            gallery.load_variant(&directory, &name, variant)
        })
        .await;

        match result {
            Ok(Ok(prepared)) => prepared,
            Ok(Err(GalleryError::ImageError(e))) => {
                warn!("Failed to decode image below {}: {}", self.page.url, e);
                None
            }
            Ok(Err(e)) => {
                debug!("No image produced below {}: {}", self.page.url, e);
                None
            }
            Err(e) => {
                error!("Image processing task failed: {}", e);
                None
            }
        }
    }
}

fn image_response(image: PreparedImage) -> Response {
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, image.content_type),
            (header::CACHE_CONTROL, CACHE_CONTROL.to_string()),
        ],
        image.bytes,
    )
        .into_response()
}
