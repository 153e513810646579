use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MazeError {
    #[error("Invalid maze configuration: {reason}")]
    InvalidConfig { reason: String },

    #[error("Cells {0} and {1} are not adjacent")]
    NotAdjacent(usize, usize),

    #[error("Maze has not been generated yet")]
    NotGenerated,

    #[error("Maze has already been generated, reset its walls before generating again")]
    AlreadyGenerated,
}

impl MazeError {
    pub(crate) fn invalid_config(reason: impl Into<String>) -> Self {
        MazeError::InvalidConfig {
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, MazeError>;
