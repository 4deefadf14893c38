use axum::{
    body::Body,
    http::{StatusCode, header},
    response::Response,
};
use std::{path::PathBuf, time::UNIX_EPOCH};
use tokio::fs::File;
use tokio_util::io::ReaderStream;
use tracing::{debug, warn};

pub const JAVASCRIPTS: [&str; 4] = ["prototype.js", "scriptaculous.js", "effects.js", "lightbox.js"];
pub const STYLESHEETS: [&str; 1] = ["lightbox.css"];
pub const IMAGES: [&str; 8] = [
    "blank.gif",
    "close.gif",
    "closelabel.gif",
    "loading.gif",
    "next.gif",
    "nextlabel.gif",
    "prev.gif",
    "prevlabel.gif",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Script,
    Stylesheet,
    Image,
}

impl AssetKind {
    /// Kind of an allowlisted asset, `None` for any other file name.
    pub fn for_file_name(file_name: &str) -> Option<Self> {
        if JAVASCRIPTS.contains(&file_name) {
            Some(AssetKind::Script)
        } else if STYLESHEETS.contains(&file_name) {
            Some(AssetKind::Stylesheet)
        } else if IMAGES.contains(&file_name) {
            Some(AssetKind::Image)
        } else {
            None
        }
    }

    pub fn directory(&self) -> &'static str {
        match self {
            AssetKind::Script => "js",
            AssetKind::Stylesheet => "css",
            AssetKind::Image => "images",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            AssetKind::Script => "text/javascript",
            AssetKind::Stylesheet => "text/css",
            AssetKind::Image => "image/gif",
        }
    }
}

/// Serves the bundled lightbox widget files from `<asset_dir>/{js,css,images}`.
#[derive(Clone)]
pub struct LightboxAssets {
    pub asset_dir: PathBuf,
}

impl LightboxAssets {
    pub fn new(asset_dir: PathBuf) -> Self {
        Self { asset_dir }
    }

    pub fn asset_path(&self, file_name: &str) -> Option<(AssetKind, PathBuf)> {
        let kind = AssetKind::for_file_name(file_name)?;
        Some((kind, self.asset_dir.join(kind.directory()).join(file_name)))
    }

    /// Response for an allowlisted asset; `None` for unknown or unreadable files.
    pub async fn serve(&self, file_name: &str) -> Option<Response> {
        let Some((kind, file_path)) = self.asset_path(file_name) else {
            debug!("Lightbox asset not in allowlist: {}", file_name);
            return None;
        };

        debug!("Attempting to serve lightbox asset: {:?}", file_path);

        let metadata = match tokio::fs::metadata(&file_path).await {
            Ok(m) => m,
            Err(e) => {
                warn!("Failed to get metadata for {:?}: {}", file_path, e);
                return None;
            }
        };

        let file = match File::open(&file_path).await {
            Ok(file) => file,
            Err(e) => {
                warn!("Failed to open file {:?}: {}", file_path, e);
                return None;
            }
        };

        let stream = ReaderStream::new(file);
        let body = Body::from_stream(stream);

        let mut response = Response::builder()
            .status(StatusCode::OK)
            .header(header::CONTENT_TYPE, kind.content_type())
            .header(header::CONTENT_LENGTH, metadata.len())
            .header(header::CACHE_CONTROL, "no-cache");

        // Add Last-Modified header
        if let Ok(modified) = metadata.modified()
            && let Ok(duration) = modified.duration_since(UNIX_EPOCH)
        {
            let http_date = httpdate::fmt_http_date(modified);
            response = response.header(header::LAST_MODIFIED, http_date);

            // Add ETag based on modification time and file size
            let etag = format!("\"{}-{}\"", duration.as_secs(), metadata.len());
            response = response.header(header::ETAG, etag);
        }

        response.body(body).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_allowlists() {
        assert_eq!(AssetKind::for_file_name("lightbox.js"), Some(AssetKind::Script));
        assert_eq!(AssetKind::for_file_name("effects.js"), Some(AssetKind::Script));
        assert_eq!(
            AssetKind::for_file_name("lightbox.css"),
            Some(AssetKind::Stylesheet)
        );
        assert_eq!(AssetKind::for_file_name("closelabel.gif"), Some(AssetKind::Image));
        assert_eq!(AssetKind::for_file_name("evil.js"), None);
        assert_eq!(AssetKind::for_file_name("../lightbox.js"), None);
        assert_eq!(AssetKind::for_file_name(""), None);
    }

    #[test]
    fn test_asset_path_uses_category_directory() {
        let assets = LightboxAssets::new(PathBuf::from("/opt/lightbox"));
        assert_eq!(
            assets.asset_path("loading.gif"),
            Some((
                AssetKind::Image,
                PathBuf::from("/opt/lightbox/images/loading.gif")
            ))
        );
        assert_eq!(assets.asset_path("readme.txt"), None);
    }

    #[tokio::test]
    async fn test_serve_sets_content_type() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir_all(temp_dir.path().join("css")).unwrap();
        fs::write(temp_dir.path().join("css/lightbox.css"), "#lightbox {}").unwrap();

        let assets = LightboxAssets::new(temp_dir.path().to_path_buf());
        let response = assets.serve("lightbox.css").await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "text/css");
        assert_eq!(response.headers()[header::CONTENT_LENGTH], "12");
        assert!(response.headers().contains_key(header::ETAG));
    }

    #[tokio::test]
    async fn test_serve_missing_or_unlisted_is_none() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir_all(temp_dir.path().join("js")).unwrap();
        fs::write(temp_dir.path().join("js/other.js"), "alert(1)").unwrap();

        let assets = LightboxAssets::new(temp_dir.path().to_path_buf());
        assert!(assets.serve("other.js").await.is_none());
        assert!(assets.serve("prototype.js").await.is_none());
    }
}
