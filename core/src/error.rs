use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid stage configuration")]
    InvalidConfig,
    #[error("Card id out of range")]
    OutOfRange,
    #[error("Invalid argument")]
    InvalidArgument,
}

pub type Result<T> = core::result::Result<T, GameError>;
