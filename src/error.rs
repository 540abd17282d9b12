use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("piece '{label}' of {owner} is {length} long, longer than the {bar_length} bar")]
    OversizedPiece {
        owner: String,
        label: String,
        length: f64,
        bar_length: f64,
    },

    #[error("piece '{label}' of {owner} has invalid length {length}")]
    InvalidPiece {
        owner: String,
        label: String,
        length: f64,
    },

    #[error("invalid stock: bar length {bar_length}, kerf {kerf}")]
    InvalidStock { bar_length: f64, kerf: f64 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
