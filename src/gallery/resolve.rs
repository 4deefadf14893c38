use super::{Gallery, Target, Variant};
use tracing::debug;

/// Extensions removed from file names to form image ids, matched case-insensitively.
pub const IMAGE_EXTENSIONS: [&str; 6] = ["jpg", "jpeg", "tif", "tiff", "png", "gif"];

const LIGHTBOX_CATEGORIES: [&str; 3] = ["images", "css", "js"];

/// Strip a known image extension from a file name.
pub fn strip_image_extension(file_name: &str) -> &str {
    if let Some((stem, extension)) = file_name.rsplit_once('.')
        && IMAGE_EXTENSIONS
            .iter()
            .any(|known| known.eq_ignore_ascii_case(extension))
    {
        return stem;
    }
    file_name
}

/// File name of a lightbox asset request (`lightbox/{images,css,js}/<file>`).
pub fn lightbox_asset(inner_path: &str) -> Option<&str> {
    let segments: Vec<&str> = inner_path.split('/').collect();

    let matches = segments.windows(2).enumerate().any(|(i, pair)| {
        pair[0] == "lightbox"
            && LIGHTBOX_CATEGORIES.contains(&pair[1])
            && segments[i + 2..].iter().any(|s| !s.is_empty())
    });

    if matches {
        segments.iter().rev().find(|s| !s.is_empty()).copied()
    } else {
        None
    }
}

impl Gallery {
    /// Classify the part of a request path below the gallery page.
    ///
    /// Lightbox assets win over folders, folders over image variants.
    pub fn resolve(&self, inner_path: &str) -> Target {
        if let Some(file_name) = lightbox_asset(inner_path) {
            debug!("Resolved {:?} to lightbox asset {}", inner_path, file_name);
            return Target::Asset(file_name.to_string());
        }

        if self.is_folder(inner_path) {
            let folder = folder_path(inner_path);
            debug!("Resolved {:?} to folder {:?}", inner_path, folder);
            return Target::Folder(folder);
        }

        let trimmed = inner_path.strip_suffix('/').unwrap_or(inner_path);
        let Some((image_path, variant_name)) = trimmed.rsplit_once('/') else {
            return Target::Nothing;
        };
        let Some(variant) = Variant::from_name(variant_name) else {
            debug!("Unknown variant {:?} in {:?}", variant_name, inner_path);
            return Target::Nothing;
        };

        let (directory, name) = image_path.rsplit_once('/').unwrap_or(("", image_path));
        if name.is_empty() {
            return Target::Nothing;
        }

        Target::Image {
            directory: directory.to_string(),
            name: name.to_string(),
            variant,
        }
    }
}

/// Folder paths are empty at the gallery root and end in `/` below it.
fn folder_path(inner_path: &str) -> String {
    let trimmed = inner_path.trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("{}/", trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn setup() -> (TempDir, Gallery) {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir_all(temp_dir.path().join("photos/Nova_Scotia/Halifax")).unwrap();
        let gallery = Gallery::new(temp_dir.path(), "photos");
        (temp_dir, gallery)
    }

    #[test]
    fn test_strip_image_extension() {
        assert_eq!(strip_image_extension("pic1.jpg"), "pic1");
        assert_eq!(strip_image_extension("pic5.JPEG"), "pic5");
        assert_eq!(strip_image_extension("pic4.tiff"), "pic4");
        assert_eq!(strip_image_extension("anim.Gif"), "anim");
        assert_eq!(strip_image_extension("pic6"), "pic6");
        assert_eq!(strip_image_extension("photo.webp"), "photo.webp");
        assert_eq!(strip_image_extension("archive.tar.png"), "archive.tar");
    }

    #[test]
    fn test_lightbox_asset_paths() {
        assert_eq!(lightbox_asset("lightbox/js/lightbox.js"), Some("lightbox.js"));
        assert_eq!(lightbox_asset("lightbox/css/lightbox.css"), Some("lightbox.css"));
        assert_eq!(lightbox_asset("lightbox/images/close.gif"), Some("close.gif"));
        assert_eq!(
            lightbox_asset("Nova_Scotia/lightbox/images/next.gif"),
            Some("next.gif")
        );
        assert_eq!(lightbox_asset("lightbox/js/"), None);
        assert_eq!(lightbox_asset("lightbox/fonts/a.woff"), None);
        assert_eq!(lightbox_asset("lightbox"), None);
        assert_eq!(lightbox_asset(""), None);
    }

    #[test]
    fn test_resolve_folders() {
        let (_temp_dir, gallery) = setup();
        assert_eq!(gallery.resolve(""), Target::Folder(String::new()));
        assert_eq!(
            gallery.resolve("Nova_Scotia"),
            Target::Folder("Nova_Scotia/".to_string())
        );
        assert_eq!(
            gallery.resolve("Nova_Scotia/Halifax/"),
            Target::Folder("Nova_Scotia/Halifax/".to_string())
        );
    }

    #[test]
    fn test_resolve_image_variants() {
        let (_temp_dir, gallery) = setup();
        assert_eq!(
            gallery.resolve("pic1/thumbnail"),
            Target::Image {
                directory: String::new(),
                name: "pic1".to_string(),
                variant: Variant::Thumbnail,
            }
        );
        assert_eq!(
            gallery.resolve("Nova_Scotia/Halifax/harbour/original/"),
            Target::Image {
                directory: "Nova_Scotia/Halifax".to_string(),
                name: "harbour".to_string(),
                variant: Variant::Original,
            }
        );
    }

    #[test]
    fn test_resolve_nothing() {
        let (_temp_dir, gallery) = setup();
        assert_eq!(gallery.resolve("pic1/huge"), Target::Nothing);
        assert_eq!(gallery.resolve("pic1"), Target::Nothing);
        assert_eq!(gallery.resolve("medium"), Target::Nothing);
        assert_eq!(gallery.resolve("/medium"), Target::Nothing);
        assert_eq!(gallery.resolve("Missing_Folder/"), Target::Nothing);
    }

    #[test]
    fn test_variant_after_folder_names_an_image() {
        let (_temp_dir, gallery) = setup();
        // The folder test sees the whole remainder, so a variant after a
        // folder name asks for an image called like the folder.
        assert_eq!(
            gallery.resolve("Nova_Scotia/medium"),
            Target::Image {
                directory: String::new(),
                name: "Nova_Scotia".to_string(),
                variant: Variant::Medium,
            }
        );
        assert_eq!(
            gallery.resolve("Nova_Scotia/Halifax/thumbnail/"),
            Target::Image {
                directory: "Nova_Scotia".to_string(),
                name: "Halifax".to_string(),
                variant: Variant::Thumbnail,
            }
        );
    }

    #[test]
    fn test_lightbox_wins_over_folder() {
        let (temp_dir, gallery) = setup();
        fs::create_dir_all(temp_dir.path().join("photos/lightbox/js/lightbox.js")).unwrap();
        assert_eq!(
            gallery.resolve("lightbox/js/lightbox.js"),
            Target::Asset("lightbox.js".to_string())
        );
    }
}
