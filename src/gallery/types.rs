use serde::Serialize;
use std::time::SystemTime;

/// Named size presets an image can be requested in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    Thumbnail,
    Small,
    Medium,
    Large,
    XLarge,
    Original,
}

impl Variant {
    pub const ALL: [Variant; 6] = [
        Variant::Thumbnail,
        Variant::Small,
        Variant::Medium,
        Variant::Large,
        Variant::XLarge,
        Variant::Original,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Variant::Thumbnail => "thumbnail",
            Variant::Small => "small",
            Variant::Medium => "medium",
            Variant::Large => "large",
            Variant::XLarge => "xlarge",
            Variant::Original => "original",
        }
    }

    /// Bounding box the image has to fit in, `None` for the unscaled original.
    pub fn bounds(&self) -> Option<(u32, u32)> {
        match self {
            Variant::Thumbnail => Some((100, 100)),
            Variant::Small => Some((200, 200)),
            Variant::Medium => Some((400, 400)),
            Variant::Large => Some((600, 600)),
            Variant::XLarge => Some((800, 800)),
            Variant::Original => None,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.name() == name)
    }
}

impl std::fmt::Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// An image found while scanning a gallery folder.
#[derive(Debug, Clone)]
pub struct ImageEntry {
    pub file_name: String,
    /// File name with a known image extension removed; used as the image id in urls.
    pub display_name: String,
    pub dimensions: (u32, u32),
    pub modified: SystemTime,
}

/// What a remainder path below a gallery page refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Asset(String),
    Folder(String),
    Image {
        /// Directory relative to the gallery root, empty for the root itself.
        directory: String,
        name: String,
        variant: Variant,
    },
    Nothing,
}

/// Final image payload for a variant request.
#[derive(Debug, Clone)]
pub struct PreparedImage {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct FolderItem {
    pub name: String,
    pub link: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ImageItem {
    pub name: String,
    pub file_name: String,
    pub width: u32,
    pub height: u32,
    pub thumbnail: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ParentItem {
    pub url: String,
}
