use super::{FolderItem, ImageEntry, ImageItem, ParentItem, Variant};
use crate::pages::Page;

/// Template data describing the gallery folder being browsed.
///
/// Rendered into page parts as the `gallery` object:
///
/// * `gallery.lightbox` - lightbox stylesheet and script includes
/// * `gallery.if_subgallery` - true below the configured gallery directory
/// * `gallery.parent.url` - url of the enclosing gallery folder
/// * `gallery.folders` - each with `name` and `link`
/// * `gallery.images` - each with `name`, `file_name`, `width`, `height` and `thumbnail`
#[derive(Debug, Clone)]
pub struct GalleryTags {
    page_url: String,
    slug: String,
    inner_path: String,
    lightbox: bool,
    folders: Vec<String>,
    images: Vec<ImageEntry>,
}

impl GalleryTags {
    /// `inner_path` is empty for the gallery root, otherwise it ends in `/`.
    pub fn new(page: &Page, inner_path: &str) -> Self {
        Self {
            page_url: page.url.clone(),
            slug: page.slug.clone(),
            inner_path: inner_path.to_string(),
            lightbox: page.lightbox,
            folders: Vec::new(),
            images: Vec::new(),
        }
    }

    pub fn with_folders(mut self, folders: Vec<String>) -> Self {
        self.folders = folders;
        self
    }

    pub fn with_images(mut self, images: Vec<ImageEntry>) -> Self {
        self.images = images;
        self
    }

    pub fn if_subgallery(&self) -> bool {
        !self.inner_path.is_empty()
    }

    pub fn parent_url(&self) -> String {
        let trimmed = self.inner_path.trim_end_matches('/');
        match trimmed.rsplit_once('/') {
            Some((parent, _)) => format!("{}{}/", self.page_url, encode_path(parent)),
            None => self.page_url.clone(),
        }
    }

    pub fn lightbox_includes(&self) -> String {
        if !self.lightbox {
            return String::new();
        }

        let base = &self.page_url;
        format!(
            r#"<link rel="stylesheet" href="{base}lightbox/css/lightbox.css" type="text/css" media="screen" />
<script src="{base}lightbox/js/prototype.js" type="text/javascript"></script>
<script src="{base}lightbox/js/scriptaculous.js?load=effects" type="text/javascript"></script>
<script src="{base}lightbox/js/lightbox.js" type="text/javascript"></script>"#
        )
    }

    pub fn folder_link(&self, folder: &str) -> String {
        format!(
            r#"<a href="{}{}/">{}</a>"#,
            self.page_url,
            encode_path(&format!("{}{}", self.inner_path, folder)),
            html_escape::encode_text(folder)
        )
    }

    pub fn image_thumbnail(&self, image: &ImageEntry) -> String {
        let image_name = format!("{}{}", self.inner_path, image.display_name);
        let image_url = format!("{}{}", self.page_url, encode_path(&image_name));
        format!(
            r#"<a class="lightbox" href="{url}/{large}" rel="lightbox[{slug}]" title="{name}"><img src="{url}/{small}" alt="{name}" /></a>"#,
            url = image_url,
            large = Variant::Medium,
            small = Variant::Thumbnail,
            slug = html_escape::encode_double_quoted_attribute(&self.slug),
            name = html_escape::encode_double_quoted_attribute(&image_name),
        )
    }

    pub fn to_liquid(&self) -> liquid::Object {
        let folders: Vec<FolderItem> = self
            .folders
            .iter()
            .map(|name| FolderItem {
                name: name.clone(),
                link: self.folder_link(name),
            })
            .collect();

        let images: Vec<ImageItem> = self
            .images
            .iter()
            .map(|image| ImageItem {
                name: image.display_name.clone(),
                file_name: image.file_name.clone(),
                width: image.dimensions.0,
                height: image.dimensions.1,
                thumbnail: self.image_thumbnail(image),
            })
            .collect();

        let parent = ParentItem {
            url: self.parent_url(),
        };

        liquid::object!({
            "lightbox": self.lightbox_includes(),
            "if_subgallery": self.if_subgallery(),
            "inner_path": self.inner_path.clone(),
            "parent": parent,
            "folders": folders,
            "images": images,
        })
    }
}

fn encode_path(path: &str) -> String {
    path.split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PageConfig;
    use std::time::SystemTime;

    fn gallery_page() -> Page {
        Page::from_config(&PageConfig {
            url: "/gallery-test".to_string(),
            title: "Test Gallery".to_string(),
            behavior: crate::pages::PageBehavior::Gallery,
            layout: None,
            lightbox: true,
            parts: [("gallery".to_string(), "test-gallery".to_string())]
                .into_iter()
                .collect(),
        })
    }

    fn image(file_name: &str, display_name: &str) -> ImageEntry {
        ImageEntry {
            file_name: file_name.to_string(),
            display_name: display_name.to_string(),
            dimensions: (640, 480),
            modified: SystemTime::UNIX_EPOCH,
        }
    }

    #[test]
    fn test_if_subgallery() {
        let page = gallery_page();
        assert!(!GalleryTags::new(&page, "").if_subgallery());
        assert!(GalleryTags::new(&page, "sub-gallery/").if_subgallery());
    }

    #[test]
    fn test_parent_url_trims_one_segment() {
        let page = gallery_page();
        assert_eq!(GalleryTags::new(&page, "").parent_url(), "/gallery-test/");
        assert_eq!(
            GalleryTags::new(&page, "Nova_Scotia/").parent_url(),
            "/gallery-test/"
        );
        assert_eq!(
            GalleryTags::new(&page, "Nova_Scotia/Halifax/").parent_url(),
            "/gallery-test/Nova_Scotia/"
        );
        assert_eq!(
            GalleryTags::new(&page, "a/b/c/").parent_url(),
            "/gallery-test/a/b/"
        );
    }

    #[test]
    fn test_folder_link() {
        let page = gallery_page();
        let tags = GalleryTags::new(&page, "");
        assert_eq!(
            tags.folder_link("sub-gallery"),
            r#"<a href="/gallery-test/sub-gallery/">sub-gallery</a>"#
        );

        let nested = GalleryTags::new(&page, "Summer 2024/");
        assert_eq!(
            nested.folder_link("Day 1"),
            r#"<a href="/gallery-test/Summer%202024/Day%201/">Day 1</a>"#
        );
    }

    #[test]
    fn test_image_thumbnail_markup() {
        let page = gallery_page();
        let tags = GalleryTags::new(&page, "");
        assert_eq!(
            tags.image_thumbnail(&image("pic1.jpg", "pic1")),
            r#"<a class="lightbox" href="/gallery-test/pic1/medium" rel="lightbox[gallery-test]" title="pic1"><img src="/gallery-test/pic1/thumbnail" alt="pic1" /></a>"#
        );

        let nested = GalleryTags::new(&page, "sub-gallery/");
        assert_eq!(
            nested.image_thumbnail(&image("pic2", "pic2")),
            r#"<a class="lightbox" href="/gallery-test/sub-gallery/pic2/medium" rel="lightbox[gallery-test]" title="sub-gallery/pic2"><img src="/gallery-test/sub-gallery/pic2/thumbnail" alt="sub-gallery/pic2" /></a>"#
        );
    }

    #[test]
    fn test_names_are_html_escaped() {
        let page = gallery_page();
        let tags = GalleryTags::new(&page, "");

        let link = tags.folder_link("<img src=x onerror=alert(1)>");
        assert_eq!(
            link,
            r#"<a href="/gallery-test/%3Cimg%20src%3Dx%20onerror%3Dalert%281%29%3E/">&lt;img src=x onerror=alert(1)&gt;</a>"#
        );
        assert!(!link.contains("<img"));

        let thumbnail = tags.image_thumbnail(&image(r#"say "cheese" <b>.jpg"#, r#"say "cheese" <b>"#));
        assert!(thumbnail.contains(r#"href="/gallery-test/say%20%22cheese%22%20%3Cb%3E/medium""#));
        assert!(thumbnail.contains("title=\"say &quot;cheese&quot; &lt;b"));
        assert!(thumbnail.contains("alt=\"say &quot;cheese&quot; &lt;b"));
        assert!(!thumbnail.contains("<b>"));
        assert!(!thumbnail.contains(r#""cheese""#));
    }

    #[test]
    fn test_lightbox_includes_can_be_disabled() {
        let mut page = gallery_page();
        let includes = GalleryTags::new(&page, "").lightbox_includes();
        assert!(includes.contains(r#"href="/gallery-test/lightbox/css/lightbox.css""#));
        assert!(includes.contains(r#"src="/gallery-test/lightbox/js/prototype.js""#));
        assert!(includes.contains(r#"src="/gallery-test/lightbox/js/scriptaculous.js?load=effects""#));
        assert!(includes.contains(r#"src="/gallery-test/lightbox/js/lightbox.js""#));

        page.lightbox = false;
        assert_eq!(GalleryTags::new(&page, "").lightbox_includes(), "");
    }

    #[test]
    fn test_liquid_rendering() {
        let page = gallery_page();
        let tags = GalleryTags::new(&page, "")
            .with_folders(vec!["sub-gallery".to_string()])
            .with_images(vec![image("pic1.jpg", "pic1"), image("pic6", "pic6")]);

        let template = liquid::ParserBuilder::with_stdlib()
            .build()
            .unwrap()
            .parse(
                "{% if gallery.if_subgallery %}up{% endif %}\
                 {% for folder in gallery.folders %}{{ folder.link }}{% endfor %}\
                 {% for image in gallery.images %}[{{ image.name }}]{% endfor %}",
            )
            .unwrap();

        let mut globals = liquid::Object::new();
        globals.insert(
            "gallery".into(),
            liquid::model::Value::Object(tags.to_liquid()),
        );

        let output = template.render(&globals).unwrap();
        assert_eq!(
            output,
            r#"<a href="/gallery-test/sub-gallery/">sub-gallery</a>[pic1][pic6]"#
        );
    }
}
