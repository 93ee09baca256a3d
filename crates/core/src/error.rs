use thiserror::Error;

/// Failures here are deliberately narrow: unreadable settings files are
/// skipped with a warning rather than surfaced, so only watch registration
/// flows through `Result`.
#[derive(Error, Debug)]
pub enum DjsetError {
    #[error("watch error: {0}")]
    Watch(#[from] notify::Error),
}

pub type Result<T> = std::result::Result<T, DjsetError>;
