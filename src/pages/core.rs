use super::{Page, PageError};
use crate::{PageConfig, templating::TemplateEngine};
use tracing::{debug, warn};

/// Configured pages, ordered so that the most specific url comes first.
pub struct PageRegistry {
    pages: Vec<Page>,
}

impl PageRegistry {
    pub fn new(configs: &[PageConfig]) -> Self {
        let mut pages: Vec<Page> = Vec::with_capacity(configs.len());

        for config in configs {
            let page = Page::from_config(config);
            if pages.iter().any(|p| p.url == page.url) {
                warn!("Ignoring duplicate page url: {}", page.url);
                continue;
            }
            pages.push(page);
        }

        pages.sort_by(|a, b| b.url.len().cmp(&a.url.len()).then_with(|| a.url.cmp(&b.url)));

        Self { pages }
    }

    /// Urls configured more than once.
    pub fn duplicate_urls(configs: &[PageConfig]) -> Vec<PageError> {
        let mut seen = std::collections::HashSet::new();
        configs
            .iter()
            .map(Page::from_config)
            .filter(|page| !seen.insert(page.url.clone()))
            .map(|page| PageError::DuplicateUrl(page.url))
            .collect()
    }

    #[cfg(test)]
    pub(crate) fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// Pages whose url covers `path`, most specific first.
    pub fn candidates<'a>(&'a self, path: &'a str) -> impl Iterator<Item = &'a Page> + 'a {
        self.pages
            .iter()
            .filter(move |page| page.inner_path(path).is_some())
    }
}

/// Render a page: its `body` part, wrapped in the page layout when one is set.
///
/// `globals` is extended with the `page` object; the layout additionally
/// receives the rendered body as `content`.
pub async fn render_page(
    engine: &TemplateEngine,
    page: &Page,
    mut globals: liquid::Object,
) -> Result<String, PageError> {
    let summary = page.summary();
    globals.insert(
        "page".into(),
        liquid::model::Value::Object(liquid::object!({
            "title": summary.title,
            "url": summary.url,
            "slug": summary.slug,
        })),
    );

    let body = page.part("body").unwrap_or_default();
    let content = engine
        .render_source(body, &globals)
        .await
        .map_err(PageError::TemplateError)?;

    match &page.layout {
        Some(layout) => {
            debug!("Rendering page {} with layout {}", page.url, layout);
            globals.insert(
                "content".into(),
                liquid::model::Value::Scalar(content.into()),
            );
            engine
                .render_template(layout, globals)
                .await
                .map_err(PageError::TemplateError)
        }
        None => Ok(content),
    }
}
