use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    #[error("scene index {index} out of range ({count} scenes)")]
    UnknownScene { index: usize, count: usize },

    #[error("browser global missing: {0}")]
    MissingGlobal(&'static str),

    #[error("element not found: {0}")]
    MissingElement(String),

    #[error("splash asset request failed with HTTP {0}")]
    SplashStatus(u16),

    #[error("JavaScript error: {0}")]
    Js(String),
}

pub type Result<T> = std::result::Result<T, SceneError>;
