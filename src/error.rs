use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("no gallery id found on the listing page")]
    NoGalleryId,
    #[error("invalid gallery id: {0:?}")]
    InvalidGalleryId(String),
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("field `{0}` missing from metadata response")]
    MissingField(&'static str),
    #[error("failed to parse html")]
    Html,
    #[error("request failed")]
    Http(#[from] reqwest::Error),
    #[error("malformed json")]
    Json(#[from] serde_json::Error),
    #[error("`{field}` does not match the gallery schema")]
    Schema {
        field: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to write {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("bad config: {0}")]
    Config(String),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| Error::Io { path, source }
    }
}
