use thiserror::Error;

#[derive(Error, Debug)]
pub enum ZombsoleError {
    #[error("{0} is not a valid weapon name (knife, axe, gun, rifle, shotgun, random)")]
    InvalidWeapon(String),

    #[error("{0} is not a valid rules name (extermination, survival, evacuation, safehouse)")]
    InvalidRules(String),

    #[error("Position {0} is out of the world bounds")]
    OutOfBounds(crate::core::types::Position),

    #[error("Position {0} is already occupied")]
    PositionOccupied(crate::core::types::Position),

    #[error("No room left to spawn {0}")]
    NoRoom(String),

    #[error("No agent known as {0}")]
    UnknownAgent(String),

    #[error("Malformed map: {0}")]
    MalformedMap(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ZombsoleError>;
