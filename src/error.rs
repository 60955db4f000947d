use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("invalid move: {0}")]
    InvalidMove(String),

    #[error("invalid position: {0}")]
    InvalidPosition(String),

    #[error("the game has not been started yet")]
    GameNotStarted,

    #[error("the game is already over")]
    GameOver,
}

impl GameError {
    pub fn invalid_move(reason: impl Into<String>) -> Self {
        GameError::InvalidMove(reason.into())
    }

    pub fn invalid_position(reason: impl Into<String>) -> Self {
        GameError::InvalidPosition(reason.into())
    }
}
