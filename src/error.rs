use thiserror::Error;

/// Failures that can occur while loading or validating a locale corpus.
///
/// This is the only place this crate can fail: once a [`crate::corpus::LocaleSet`]
/// and a [`crate::DateParser`] are built, `parse` is infallible (see module docs
/// on `crate::parser`).
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum CorpusError {
    #[error("failed to parse locale corpus as JSON")]
    Json(#[from] serde_json::Error),
    #[error("failed to read locale corpus")]
    Io(#[from] std::io::Error),
    #[error("no bundled corpus named `{0}`")]
    UnknownProvider(String),
}
