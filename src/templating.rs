use std::{collections::HashMap, path::PathBuf, sync::Arc, time::SystemTime};
use tokio::sync::RwLock;
use tracing::{debug, error, info};

type Partials = liquid::partials::EagerCompiler<liquid::partials::InMemorySource>;

/// Liquid renderer for page parts and the layout files of a template directory.
///
/// Files in the directory starting with `_` are available to `{% include %}`.
pub struct TemplateEngine {
    template_dir: PathBuf,
    cache: Arc<RwLock<HashMap<String, CachedTemplate>>>,
}

struct CachedTemplate {
    content: String,
    modified: SystemTime,
}

impl TemplateEngine {
    pub fn new(template_dir: PathBuf) -> Self {
        Self {
            template_dir,
            cache: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    async fn load_template(&self, path: &str) -> Result<String, String> {
        let template_path = self.template_dir.join(path);

        let metadata = tokio::fs::metadata(&template_path)
            .await
            .map_err(|e| format!("Failed to get metadata for {}: {}", path, e))?;

        let modified = metadata
            .modified()
            .map_err(|e| format!("Failed to get modified time: {}", e))?;

        let mut cache = self.cache.write().await;

        if let Some(cached) = cache.get(path)
            && cached.modified >= modified
        {
            debug!("Using cached template for {}", path);
            return Ok(cached.content.clone());
        }

        info!("Loading template: {}", path);

        let content = tokio::fs::read_to_string(&template_path)
            .await
            .map_err(|e| format!("Failed to read template {}: {}", path, e))?;

        cache.insert(
            path.to_string(),
            CachedTemplate {
                content: content.clone(),
                modified,
            },
        );

        Ok(content)
    }

    async fn load_partials(&self) -> Partials {
        let mut partials = Partials::empty();

        let mut entries = match tokio::fs::read_dir(&self.template_dir).await {
            Ok(entries) => entries,
            Err(e) => {
                debug!("No partials loaded from {:?}: {}", self.template_dir, e);
                return partials;
            }
        };

        while let Ok(Some(entry)) = entries.next_entry().await {
            let name = entry.file_name().to_string_lossy().to_string();
            if !name.starts_with('_') || !name.ends_with(".liquid") {
                continue;
            }

            match self.load_template(&name).await {
                Ok(content) => {
                    partials.add(name, content);
                }
                Err(e) => error!("Failed to load partial: {}", e),
            }
        }

        partials
    }

    async fn parser(&self) -> Result<liquid::Parser, String> {
        liquid::ParserBuilder::with_stdlib()
            .partials(self.load_partials().await)
            .build()
            .map_err(|e| format!("Failed to create parser: {}", e))
    }

    /// Render template source held in memory, such as a page part.
    pub async fn render_source(
        &self,
        source: &str,
        globals: &liquid::Object,
    ) -> Result<String, String> {
        let template = self
            .parser()
            .await?
            .parse(source)
            .map_err(|e| format!("Failed to parse template: {}", e))?;

        template
            .render(globals)
            .map_err(|e| format!("Failed to render template: {}", e))
    }

    /// Render a template file from the template directory.
    pub async fn render_template(
        &self,
        template_name: &str,
        globals: liquid::Object,
    ) -> Result<String, String> {
        let template_content = self.load_template(template_name).await?;
        self.render_source(&template_content, &globals).await
    }
}
