use thiserror::Error;

pub type Result<T> = std::result::Result<T, DashboardError>;

#[derive(Error, Debug)]
pub enum DashboardError {
    /// The renderer needs at least one semester to build the latest-semester view.
    #[error("Academic record has no semesters to render")]
    EmptySemesters,

    #[error("Carousel needs at least one testimonial")]
    EmptyCarousel,

    #[error("Chat widget needs at least one reply")]
    EmptyReplies,

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DashboardError {
    pub fn config(message: impl Into<String>) -> Self {
        DashboardError::Config {
            message: message.into(),
        }
    }
}
