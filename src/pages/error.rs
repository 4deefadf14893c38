use thiserror::Error;

#[derive(Debug, Error)]
pub enum PageError {
    #[error("Template error: {0}")]
    TemplateError(String),

    #[error("Duplicate page url: {0}")]
    DuplicateUrl(String),

    #[error("Page {0} is missing part: {1}")]
    MissingPart(String, String),
}
