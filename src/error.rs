#[derive(Debug, thiserror::Error)]
pub enum RoverError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("error getting {url}: {errors}")]
    Api {
        url: String,
        errors: serde_json::Value,
    },
    #[error("Transport error: {0}")]
    Transport(#[from] ureq::Error),
    #[error("Response is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("Unexpected response shape: {0}")]
    MalformedResponse(String),
    #[error("Image decoding error: {0}")]
    Decode(#[from] image::ImageError),
    #[error("Invalid date: {0}")]
    InvalidDate(#[from] chrono::ParseError),
    #[error("Image shapes differ: {left:?} vs {right:?}")]
    ShapeMismatch {
        left: (u32, u32, u8),
        right: (u32, u32, u8),
    },
    #[error("Camera distribution is empty")]
    EmptyDistribution,
}

pub type RoverResult<T> = Result<T, RoverError>;
