use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::PageConfig;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PageBehavior {
    #[default]
    Normal,
    Gallery,
}

/// A configured page with its url normalized to start and end with `/`.
#[derive(Debug, Clone)]
pub struct Page {
    pub url: String,
    pub slug: String,
    pub title: String,
    pub behavior: PageBehavior,
    pub layout: Option<String>,
    pub lightbox: bool,
    parts: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PageSummary {
    pub title: String,
    pub url: String,
    pub slug: String,
}

impl Page {
    pub fn from_config(config: &PageConfig) -> Self {
        let url = normalize_url(&config.url);
        let slug = url
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .unwrap_or_default()
            .to_string();

        Self {
            url,
            slug,
            title: config.title.clone(),
            behavior: config.behavior,
            layout: config.layout.clone(),
            lightbox: config.lightbox,
            parts: config.parts.clone(),
        }
    }

    pub fn part(&self, name: &str) -> Option<&str> {
        self.parts.get(name).map(String::as_str)
    }

    /// Path below this page, `None` when `path` is not under the page url.
    ///
    /// The page url without its trailing slash counts as the page itself.
    pub fn inner_path<'a>(&self, path: &'a str) -> Option<&'a str> {
        if let Some(rest) = path.strip_prefix(self.url.as_str()) {
            Some(rest)
        } else if path == self.url.trim_end_matches('/') {
            Some("")
        } else {
            None
        }
    }

    pub fn is_exact(&self, path: &str) -> bool {
        self.inner_path(path).is_some_and(str::is_empty)
    }

    pub fn summary(&self) -> PageSummary {
        PageSummary {
            title: self.title.clone(),
            url: self.url.clone(),
            slug: self.slug.clone(),
        }
    }
}

pub(crate) fn normalize_url(url: &str) -> String {
    let trimmed = url.trim().trim_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        format!("/{}/", trimmed)
    }
}
