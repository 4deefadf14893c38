use crate::{
    Config,
    gallery::Gallery,
    pages::{Page, PageBehavior, PageError, PageRegistry},
};
use std::path::Path;
use thiserror::Error;
use tracing::{error, info, warn};

#[derive(Debug, Error)]
pub enum StartupCheckError {
    #[error("Public root directory does not exist: {0}")]
    PublicRootMissing(String),

    #[error("Lightbox directory does not exist: {0}")]
    LightboxDirectoryMissing(String),

    #[error("Templates directory does not exist: {0}")]
    TemplatesDirectoryMissing(String),

    #[error("Gallery directory for page {0} does not exist: {1}")]
    GalleryDirectoryMissing(String, String),

    #[error(transparent)]
    Page(#[from] PageError),
}

impl StartupCheckError {
    /// Failures that make serving pointless.
    pub fn is_critical(&self) -> bool {
        matches!(
            self,
            StartupCheckError::PublicRootMissing(_) | StartupCheckError::Page(_)
        )
    }
}

pub async fn perform_startup_checks(config: &Config) -> Result<(), Vec<StartupCheckError>> {
    let mut errors = Vec::new();

    info!("Performing startup checks...");

    let public_root = Path::new(&config.static_files.directory);
    if !public_root.is_dir() {
        error!("Public root directory does not exist: {:?}", public_root);
        errors.push(StartupCheckError::PublicRootMissing(
            public_root.display().to_string(),
        ));
    } else {
        info!("Public root directory exists: {:?}", public_root);
    }

    let lightbox_dir = Path::new(&config.lightbox.directory);
    if !lightbox_dir.is_dir() {
        warn!("Lightbox directory does not exist: {:?}", lightbox_dir);
        errors.push(StartupCheckError::LightboxDirectoryMissing(
            lightbox_dir.display().to_string(),
        ));
    } else {
        info!("Lightbox directory exists: {:?}", lightbox_dir);
    }

    let templates_dir = Path::new(&config.templates.directory);
    if !templates_dir.is_dir() {
        warn!("Templates directory does not exist: {:?}", templates_dir);
        warn!("Pages with a layout will fail to render");
        errors.push(StartupCheckError::TemplatesDirectoryMissing(
            templates_dir.display().to_string(),
        ));
    } else {
        info!("Templates directory exists: {:?}", templates_dir);
    }

    for duplicate in PageRegistry::duplicate_urls(&config.pages) {
        error!("{}", duplicate);
        errors.push(duplicate.into());
    }

    for page_config in &config.pages {
        if page_config.behavior != PageBehavior::Gallery {
            continue;
        }

        let page = Page::from_config(page_config);
        let Some(gallery_path) = page.part("gallery") else {
            error!("Gallery page {} has no gallery part", page.url);
            errors.push(PageError::MissingPart(page.url.clone(), "gallery".to_string()).into());
            continue;
        };

        let gallery = Gallery::new(public_root, gallery_path);
        if gallery.local_path().is_dir() {
            info!(
                "Gallery page {} serves directory {:?}",
                page.url,
                gallery.local_path()
            );
        } else {
            warn!(
                "Gallery directory for page {} does not exist: {:?}",
                page.url,
                gallery.local_path()
            );
            errors.push(StartupCheckError::GalleryDirectoryMissing(
                page.url.clone(),
                gallery.local_path().display().to_string(),
            ));
        }
    }

    if errors.is_empty() {
        info!("All startup checks passed");
        Ok(())
    } else {
        error!("Startup checks failed with {} errors", errors.len());
        Err(errors)
    }
}
